use alloy_primitives::Address;
use alloy_sol_types::SolEvent;
use tracing::info;

use crate::env::{CallContext, Env};
use crate::extensions::env_extensions::EnvExtensions;
use crate::types::error::Result;
use crate::types::interfaces::{IERC173::OwnershipTransferred, LibDiamond::NotContractOwner};

// Fail unless the caller of the current frame is the diamond owner
pub fn enforce_is_contract_owner(e: &Env, ctx: &CallContext) -> Result<()> {
    let owner = e.contract_owner(ctx.address);
    if ctx.caller != owner {
        return Err(NotContractOwner {
            user: ctx.caller,
            contractOwner: owner,
        }
        .into());
    }
    Ok(())
}

// Store a new owner and emit OwnershipTransferred(previous, new)
pub fn set_contract_owner(e: &mut Env, diamond: Address, new_owner: Address) {
    let previous_owner = e.contract_owner(diamond);
    e.set_contract_owner_slot(diamond, new_owner);
    let event = OwnershipTransferred {
        previousOwner: previous_owner,
        newOwner: new_owner,
    };
    e.emit(diamond, event.encode_log_data());
    info!(%diamond, %previous_owner, %new_owner, "ownership transferred");
}
