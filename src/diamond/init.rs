use alloy_primitives::Bytes;
use tracing::debug;

use super::{decode_calldata, enforce_non_payable, interface_id};
use crate::env::{CallContext, CallResult, Contract, Env};
use crate::extensions::env_extensions::EnvExtensions;
use crate::fees::fee_collector;
use crate::types::error::Result;
use crate::types::interfaces::{
    IDiamondCut::IDiamondCutCalls, IDiamondInit::IDiamondInitCalls,
    IDiamondLoupe::IDiamondLoupeCalls, IERC165::IERC165Calls, IERC173::IERC173Calls,
};

// One-shot initializer delegatecalled by the first diamond cut
#[derive(Debug, Default, Clone, Copy)]
pub struct DiamondInit;

impl DiamondInit {
    // Register the standard interfaces and set the fee recipient
    //
    // # Arguments
    //
    // * `fee_recipient` - Initial fee recipient
    //
    // # Errors
    //
    // Fails with the fee collector errors for an invalid recipient
    fn init(e: &mut Env, ctx: &CallContext, input: &[u8]) -> Result<Bytes> {
        enforce_non_payable(ctx)?;
        let IDiamondInitCalls::init(call) = decode_calldata::<IDiamondInitCalls>(input)?;
        let diamond = ctx.address;
        for interface in [
            interface_id::<IERC165Calls>(),
            interface_id::<IDiamondCutCalls>(),
            interface_id::<IDiamondLoupeCalls>(),
            interface_id::<IERC173Calls>(),
        ] {
            e.set_supported_interface(diamond, interface, true);
        }
        fee_collector::set_fee_recipient(e, diamond, call.feeRecipient)?;
        debug!(%diamond, fee_recipient = %call.feeRecipient, "diamond initialized");
        Ok(Bytes::new())
    }
}

impl Contract for DiamondInit {
    fn name(&self) -> &'static str {
        "DiamondInit"
    }

    fn execute(&self, e: &mut Env, ctx: &CallContext, input: &[u8]) -> CallResult {
        Ok(Self::init(e, ctx, input)?)
    }
}
