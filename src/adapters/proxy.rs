use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::SolEvent;
use tracing::{debug, warn};

use crate::env::{CallContext, Env};
use crate::extensions::env_extensions::EnvExtensions;
use crate::extensions::reentrancy::non_reentrant;
use crate::extensions::safe_transfer::{
    balance_of, safe_approve, safe_transfer, safe_transfer_from, send_native,
};
use crate::types::error::{Result, RouterError};
use crate::types::interfaces::IAggregatorProxy::{
    FeeCollected, FeeRecipientNotSet, InvalidNativeAmount, TokensTransferred,
};
use crate::types::provider::Provider;
use crate::types::swap_request::SwapRequest;
use crate::types::token_with_fee::TokenWithFee;

// Forward a swap to an aggregator, collecting the input and output fees on the way
//
// # Arguments
//
// * `e` - The environment
// * `ctx` - Frame of the swap entry point, delegatecalled by the diamond
// * `provider` - Aggregator provider, used for tracing
// * `aggregator` - Aggregator contract address
// * `request` - Decoded swap arguments
//
// # Errors
//
// Fails if the lock is held (reentrancy)
// Fails if the attached native value does not match the input leg
// Fails if a fee is due and no fee recipient is configured
// Fails if a token transfer fails
// Fails with the aggregator's own revert data if the aggregator call reverts
pub fn call_aggregator(
    e: &mut Env,
    ctx: &CallContext,
    provider: Provider,
    aggregator: Address,
    request: SwapRequest,
) -> Result<Bytes> {
    non_reentrant(e, ctx, |e| {
        let diamond = ctx.address;
        let trader = ctx.caller;
        //native balance the diamond held before this transaction's value arrived
        let native_before = e.balance(diamond).saturating_sub(ctx.value);

        let (input_fee, swap_amount) = request.from.split(request.from_amount)?;
        debug!(
            %provider,
            %trader,
            from = %request.from.token,
            to = %request.to.token,
            amount = %request.from_amount,
            %input_fee,
            "forwarding swap"
        );

        //collect the input fee and hand the rest to the aggregator
        let call_value = if request.from.is_native() {
            if ctx.value != request.from_amount {
                return Err(InvalidNativeAmount {
                    expected: request.from_amount,
                    actual: ctx.value,
                }
                .into());
            }
            if let Some(recipient) = fee_recipient(e, diamond, input_fee)? {
                send_native(e, diamond, recipient, input_fee)?;
                emit_fee_collected(e, diamond, Address::ZERO, recipient, input_fee);
            }
            swap_amount
        } else {
            if !ctx.value.is_zero() {
                return Err(InvalidNativeAmount {
                    expected: U256::ZERO,
                    actual: ctx.value,
                }
                .into());
            }
            let token = request.from.token;
            if let Some(recipient) = fee_recipient(e, diamond, input_fee)? {
                safe_transfer_from(e, diamond, token, trader, recipient, input_fee)?;
                emit_fee_collected(e, diamond, token, recipient, input_fee);
            }
            safe_transfer_from(e, diamond, token, trader, diamond, swap_amount)?;
            safe_approve(e, diamond, token, aggregator, swap_amount)?;
            U256::ZERO
        };

        //execute the swap
        if let Err(reverted) = e.call(diamond, aggregator, call_value, &request.call_data) {
            warn!(%provider, %aggregator, revert_data = ?reverted.0, "aggregator call reverted");
            return Err(RouterError::from(reverted));
        }

        if !request.from.is_native() {
            safe_approve(e, diamond, request.from.token, aggregator, U256::ZERO)?;
        }

        //refund whatever the aggregator left of the input
        if !request.is_same_token() {
            let unspent = held_amount(e, diamond, request.from, native_before)?;
            if !unspent.is_zero() {
                debug!(%provider, %trader, token = %request.from.token, %unspent, "refunding unspent input");
                pay_out(e, diamond, request.from.token, trader, unspent)?;
                emit_tokens_transferred(e, diamond, request.from.token, trader, unspent);
            }
        }

        //split the bought amount into output fee and trader share
        let bought = held_amount(e, diamond, request.to, native_before)?;
        let (output_fee, received) = request.to.split(bought)?;
        let token = request.to.token;
        if let Some(recipient) = fee_recipient(e, diamond, output_fee)? {
            pay_out(e, diamond, token, recipient, output_fee)?;
            emit_fee_collected(e, diamond, token, recipient, output_fee);
        }
        if !received.is_zero() {
            pay_out(e, diamond, token, trader, received)?;
            emit_tokens_transferred(e, diamond, token, trader, received);
        }
        debug!(%provider, %trader, %bought, %output_fee, %received, "swap settled");
        Ok(Bytes::new())
    })
}

// Recipient of a non-zero fee, None when there is nothing to collect
fn fee_recipient(e: &Env, diamond: Address, fee: U256) -> Result<Option<Address>> {
    if fee.is_zero() {
        return Ok(None);
    }
    match e.fee_recipient(diamond) {
        Some(recipient) => Ok(Some(recipient)),
        None => Err(FeeRecipientNotSet {}.into()),
    }
}

// Amount of `token` the diamond holds on behalf of the current swap
fn held_amount(e: &mut Env, diamond: Address, token: TokenWithFee, native_before: U256) -> Result<U256> {
    if token.is_native() {
        Ok(e.balance(diamond).saturating_sub(native_before))
    } else {
        balance_of(e, diamond, token.token, diamond)
    }
}

fn pay_out(e: &mut Env, diamond: Address, token: Address, to: Address, amount: U256) -> Result<()> {
    if token.is_zero() {
        send_native(e, diamond, to, amount)
    } else {
        safe_transfer(e, diamond, token, to, amount)
    }
}

fn emit_fee_collected(e: &mut Env, diamond: Address, token: Address, recipient: Address, amount: U256) {
    let event = FeeCollected {
        token,
        recipient,
        amount,
    };
    e.emit(diamond, event.encode_log_data());
}

fn emit_tokens_transferred(e: &mut Env, diamond: Address, token: Address, to: Address, amount: U256) {
    let event = TokensTransferred { token, to, amount };
    e.emit(diamond, event.encode_log_data());
}
