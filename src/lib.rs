pub mod adapters;
pub mod auth;
pub mod config;
pub mod deploy;
pub mod diamond;
pub mod env;
pub mod extensions;
pub mod fees;
pub mod storage;
#[cfg(test)]
mod tests;
pub mod types;

use std::rc::Rc;

use alloy_primitives::{Address, Bytes, Selector};
use diamond::{add_cut, cut_facet::DiamondCutFacet, lib_diamond};
use env::{CallContext, CallResult, Contract, Env, Reverted};
use tracing::trace;
use types::{
    error::{Result, RouterError},
    interfaces::LibDiamond::FunctionNotFound,
};

// Upgradeable proxy routing every call to the facet registered for its selector
#[derive(Debug, Default, Clone, Copy)]
pub struct Diamond;

impl Diamond {
    // Deploy a diamond
    //
    // # Arguments
    //
    // * `e` - The environment
    // * `deployer` - Deploying account
    // * `owner` - Initial contract owner
    // * `diamond_cut_facet` - Deployed DiamondCutFacet, receives the `diamondCut` selector
    //
    // # Errors
    //
    // Fails if the cut facet has no code
    //
    // # Returns
    //
    // * Address of the new diamond
    pub fn deploy(e: &mut Env, deployer: Address, owner: Address, diamond_cut_facet: Address) -> Result<Address> {
        e.create::<RouterError>(deployer, Rc::new(Diamond), |e, ctx| {
            auth::set_contract_owner(e, ctx.address, owner);
            let cut = add_cut(diamond_cut_facet, &DiamondCutFacet);
            lib_diamond::diamond_cut(e, ctx, &[cut], Address::ZERO, &Bytes::new())
        })
    }
}

impl Contract for Diamond {
    fn name(&self) -> &'static str {
        "Diamond"
    }

    fn execute(&self, e: &mut Env, ctx: &CallContext, input: &[u8]) -> CallResult {
        //plain native transfer
        if input.is_empty() {
            return Ok(Bytes::new());
        }
        let selector = call_selector(input);
        //find facet for function that is called and execute it in the diamond's context
        let facet = lib_diamond::facet_address(e, ctx.address, selector);
        if facet.is_zero() {
            trace!(diamond = %ctx.address, %selector, "function not found");
            return Err(Reverted::from(RouterError::from(FunctionNotFound {
                functionSelector: selector,
            })));
        }
        e.delegate_call(ctx, facet, input)
    }
}

// First four bytes of calldata, zero padded when shorter
fn call_selector(input: &[u8]) -> Selector {
    let mut selector = [0u8; 4];
    let len = input.len().min(4);
    selector[..len].copy_from_slice(&input[..len]);
    Selector::from(selector)
}

