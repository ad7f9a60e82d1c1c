use alloy_primitives::{Bytes, Selector};
use alloy_sol_types::SolValue;

use super::{decode_calldata, enforce_non_payable, interface_selectors, Facet};
use crate::auth;
use crate::env::{CallContext, CallResult, Contract, Env};
use crate::extensions::env_extensions::EnvExtensions;
use crate::types::error::Result;
use crate::types::interfaces::IERC173::IERC173Calls;

// ERC-173 ownership of the diamond
#[derive(Debug, Default, Clone, Copy)]
pub struct OwnershipFacet;

impl OwnershipFacet {
    fn dispatch(e: &mut Env, ctx: &CallContext, input: &[u8]) -> Result<Bytes> {
        enforce_non_payable(ctx)?;
        match decode_calldata::<IERC173Calls>(input)? {
            IERC173Calls::owner(_) => Ok(e.contract_owner(ctx.address).abi_encode().into()),
            // Transfer ownership, the zero address renounces it
            IERC173Calls::transferOwnership(call) => {
                auth::enforce_is_contract_owner(e, ctx)?;
                auth::set_contract_owner(e, ctx.address, call.newOwner);
                Ok(Bytes::new())
            }
        }
    }
}

impl Contract for OwnershipFacet {
    fn name(&self) -> &'static str {
        "OwnershipFacet"
    }

    fn execute(&self, e: &mut Env, ctx: &CallContext, input: &[u8]) -> CallResult {
        Ok(Self::dispatch(e, ctx, input)?)
    }
}

impl Facet for OwnershipFacet {
    fn selectors(&self) -> Vec<Selector> {
        interface_selectors::<IERC173Calls>()
    }
}
