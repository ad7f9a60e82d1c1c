use alloy_primitives::{Address, Bytes, Selector};
use alloy_sol_types::{SolEvent, SolValue};
use tracing::info;

use crate::auth;
use crate::diamond::{decode_calldata, enforce_non_payable, interface_selectors, Facet};
use crate::env::{CallContext, CallResult, Contract, Env};
use crate::extensions::env_extensions::EnvExtensions;
use crate::types::error::Result;
use crate::types::interfaces::IFeeCollector::{
    FeeRecipientIsDiamond, FeeRecipientSameAsCurrent, FeeRecipientUpdated,
    FeeRecipientZeroAddress, IFeeCollectorCalls,
};

// Administration of the account receiving swap fees
#[derive(Debug, Default, Clone, Copy)]
pub struct FeeCollectorFacet;

impl FeeCollectorFacet {
    fn dispatch(e: &mut Env, ctx: &CallContext, input: &[u8]) -> Result<Bytes> {
        enforce_non_payable(ctx)?;
        match decode_calldata::<IFeeCollectorCalls>(input)? {
            IFeeCollectorCalls::setFeeRecipient(call) => {
                auth::enforce_is_contract_owner(e, ctx)?;
                set_fee_recipient(e, ctx.address, call.recipient)?;
                Ok(Bytes::new())
            }
            // Zero address while unset
            IFeeCollectorCalls::getFeeRecipient(_) => Ok(e
                .fee_recipient(ctx.address)
                .unwrap_or_default()
                .abi_encode()
                .into()),
        }
    }
}

impl Contract for FeeCollectorFacet {
    fn name(&self) -> &'static str {
        "FeeCollectorFacet"
    }

    fn execute(&self, e: &mut Env, ctx: &CallContext, input: &[u8]) -> CallResult {
        Ok(Self::dispatch(e, ctx, input)?)
    }
}

impl Facet for FeeCollectorFacet {
    fn selectors(&self) -> Vec<Selector> {
        interface_selectors::<IFeeCollectorCalls>()
    }
}

// Validate and store a new fee recipient
//
// # Arguments
//
// * `e` - The environment
// * `diamond` - Diamond whose storage holds the recipient
// * `recipient` - New fee recipient
//
// # Errors
//
// Fails if the recipient is the zero address, the diamond itself or the current recipient
pub fn set_fee_recipient(e: &mut Env, diamond: Address, recipient: Address) -> Result<()> {
    if recipient.is_zero() {
        return Err(FeeRecipientZeroAddress {}.into());
    }
    if recipient == diamond {
        return Err(FeeRecipientIsDiamond {}.into());
    }
    let previous = e.fee_recipient(diamond).unwrap_or_default();
    if previous == recipient {
        return Err(FeeRecipientSameAsCurrent {}.into());
    }
    e.set_fee_recipient_slot(diamond, recipient);
    let event = FeeRecipientUpdated {
        previousRecipient: previous,
        newRecipient: recipient,
    };
    e.emit(diamond, event.encode_log_data());
    info!(%diamond, %previous, %recipient, "fee recipient updated");
    Ok(())
}
