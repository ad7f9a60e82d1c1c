use alloy_primitives::{Address, Selector};

use crate::types::error::{Result, RouterError};
use crate::types::interfaces::{IDiamondCut::FacetCut, LibDiamond::IncorrectFacetCutAction};

// Action applied to the selectors of one facet cut
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FacetCutAction {
    Add = 0,
    Replace = 1,
    Remove = 2,
}

impl TryFrom<u8> for FacetCutAction {
    type Error = RouterError;

    fn try_from(action: u8) -> Result<Self> {
        match action {
            0 => Ok(Self::Add),
            1 => Ok(Self::Replace),
            2 => Ok(Self::Remove),
            _ => Err(IncorrectFacetCutAction { action }.into()),
        }
    }
}

// Builds one cut entry
pub fn facet_cut(facet: Address, action: FacetCutAction, selectors: Vec<Selector>) -> FacetCut {
    FacetCut {
        facetAddress: facet,
        action: action as u8,
        functionSelectors: selectors,
    }
}
