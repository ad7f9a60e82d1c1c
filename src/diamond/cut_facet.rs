use alloy_primitives::{Bytes, Selector};

use super::{decode_calldata, enforce_non_payable, interface_selectors, lib_diamond, Facet};
use crate::auth;
use crate::env::{CallContext, CallResult, Contract, Env};
use crate::types::error::Result;
use crate::types::interfaces::IDiamondCut::{diamondCutCall, IDiamondCutCalls};

// Owner-only facet management entry point
#[derive(Debug, Default, Clone, Copy)]
pub struct DiamondCutFacet;

impl DiamondCutFacet {
    // Add, replace or remove functions and optionally run an initializer, atomically
    //
    // # Arguments
    //
    // * `call` - Cuts to apply, initializer address and its calldata
    //
    // # Errors
    //
    // Fails if the caller is not the contract owner
    // Fails if any cut is invalid or the initializer fails
    fn diamond_cut(e: &mut Env, ctx: &CallContext, call: diamondCutCall) -> Result<Bytes> {
        auth::enforce_is_contract_owner(e, ctx)?;
        lib_diamond::diamond_cut(e, ctx, &call.cuts, call.init, &call.initCalldata)?;
        Ok(Bytes::new())
    }
}

impl Contract for DiamondCutFacet {
    fn name(&self) -> &'static str {
        "DiamondCutFacet"
    }

    fn execute(&self, e: &mut Env, ctx: &CallContext, input: &[u8]) -> CallResult {
        enforce_non_payable(ctx)?;
        let result = match decode_calldata::<IDiamondCutCalls>(input)? {
            IDiamondCutCalls::diamondCut(call) => Self::diamond_cut(e, ctx, call),
        };
        Ok(result?)
    }
}

impl Facet for DiamondCutFacet {
    fn selectors(&self) -> Vec<Selector> {
        interface_selectors::<IDiamondCutCalls>()
    }
}
