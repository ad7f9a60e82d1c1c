use alloy_primitives::{Address, Bytes, U256};
use alloy_sol_types::{SolCall, SolValue};
use tracing::trace;

use crate::env::Env;
use crate::types::error::{Result, RouterError};
use crate::types::interfaces::IAggregatorProxy::{NativeTransferFailed, TokenCallFailed};
use crate::types::interfaces::IERC20;

// Transfer `amount` of `token` held by `from` to `to`
//
// # Arguments
//
// * `e` - The environment
// * `from` - Account issuing the call (the diamond)
// * `token` - ERC-20 token address
// * `to` - Receiver
// * `amount` - Amount to transfer, zero is a no-op
//
// # Errors
//
// `TokenCallFailed` if the token reports failure or reverts without data, a token revert
// carrying data is bubbled unchanged
pub fn safe_transfer(e: &mut Env, from: Address, token: Address, to: Address, amount: U256) -> Result<()> {
    if amount.is_zero() {
        return Ok(());
    }
    let call = IERC20::transferCall { to, amount };
    call_optional_return(e, from, token, &call.abi_encode())
}

// Move `amount` of `token` from `owner` to `to` using the allowance granted to `spender`
pub fn safe_transfer_from(
    e: &mut Env,
    spender: Address,
    token: Address,
    owner: Address,
    to: Address,
    amount: U256,
) -> Result<()> {
    if amount.is_zero() {
        return Ok(());
    }
    let call = IERC20::transferFromCall {
        from: owner,
        to,
        amount,
    };
    call_optional_return(e, spender, token, &call.abi_encode())
}

// Set the allowance of `spender` over the tokens of `owner` to exactly `amount`
pub fn safe_approve(e: &mut Env, owner: Address, token: Address, spender: Address, amount: U256) -> Result<()> {
    let call = IERC20::approveCall { spender, amount };
    call_optional_return(e, owner, token, &call.abi_encode())
}

// ERC-20 balance of `account`
pub fn balance_of(e: &mut Env, caller: Address, token: Address, account: Address) -> Result<U256> {
    let call = IERC20::balanceOfCall { account };
    let output = token_call(e, caller, token, &call.abi_encode())?;
    <U256 as SolValue>::abi_decode(&output).map_err(|_| TokenCallFailed { token }.into())
}

// Send native asset by plain value transfer
//
// # Errors
//
// `NativeTransferFailed` if the receiver rejects the value or the sender lacks the balance
pub fn send_native(e: &mut Env, from: Address, to: Address, amount: U256) -> Result<()> {
    if amount.is_zero() {
        return Ok(());
    }
    e.call(from, to, amount, &[])
        .map_err(|_| NativeTransferFailed { to, amount })?;
    Ok(())
}

// Calls a token that may or may not return a bool. Empty output is accepted only from an account
// with code, otherwise the first returned word must be exactly 1.
fn call_optional_return(e: &mut Env, caller: Address, token: Address, input: &[u8]) -> Result<()> {
    let output = token_call(e, caller, token, input)?;
    if returned_success(e, token, &output) {
        Ok(())
    } else {
        trace!(%token, output = ?output, "token call reported failure");
        Err(TokenCallFailed { token }.into())
    }
}

// A reverting token bubbles its revert data, a revert without data becomes TokenCallFailed
fn token_call(e: &mut Env, caller: Address, token: Address, input: &[u8]) -> Result<Bytes> {
    e.call(caller, token, U256::ZERO, input).map_err(|reverted| {
        trace!(%token, revert_data = ?reverted.0, "token call reverted");
        if reverted.data().is_empty() {
            RouterError::from(TokenCallFailed { token })
        } else {
            RouterError::from(reverted)
        }
    })
}

fn returned_success(e: &Env, token: Address, output: &Bytes) -> bool {
    if output.is_empty() {
        return e.has_code(token);
    }
    if output.len() < 32 {
        return false;
    }
    let word = U256::from_be_slice(&output[..32]);
    word == U256::from(1u64)
}
