pub mod cut_facet;
pub mod init;
pub mod lib_diamond;
pub mod loupe_facet;
pub mod ownership_facet;

use alloy_primitives::{Address, Bytes, Selector};
use alloy_sol_types::SolInterface;

use crate::env::{CallContext, Contract};
use crate::types::error::{Result, RouterError};
use crate::types::facet_cut::{facet_cut, FacetCutAction};
use crate::types::interfaces::IDiamondCut::FacetCut;

// Contract whose functions are served through a diamond
pub trait Facet: Contract {
    // Function selectors the facet registers in a cut
    fn selectors(&self) -> Vec<Selector>;
}

// Cut adding every selector of `facet`, deployed at `address`
pub fn add_cut(address: Address, facet: &dyn Facet) -> FacetCut {
    facet_cut(address, FacetCutAction::Add, facet.selectors())
}

// Selectors declared by a sol! interface
pub fn interface_selectors<I: SolInterface>() -> Vec<Selector> {
    I::selectors().map(Selector::from).collect()
}

// ERC-165 identifier of an interface: XOR of all its function selectors
pub fn interface_id<I: SolInterface>() -> Selector {
    let id = I::selectors().fold([0u8; 4], |mut id, selector| {
        id.iter_mut()
            .zip(selector)
            .for_each(|(byte, other)| *byte ^= other);
        id
    });
    Selector::from(id)
}

// Decodes calldata into the call enum of an interface; undecodable input reverts without data
pub fn decode_calldata<I: SolInterface>(input: &[u8]) -> Result<I> {
    I::abi_decode(input).map_err(|_| RouterError::Reverted(Bytes::new()))
}

// Nonpayable functions refuse attached value
pub fn enforce_non_payable(ctx: &CallContext) -> Result<()> {
    if !ctx.value.is_zero() {
        return Err(RouterError::Reverted(Bytes::new()));
    }
    Ok(())
}
