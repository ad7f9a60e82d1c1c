// Selector registry of a diamond.
//
// All bookkeeping lives in the diamond's own storage under the diamond storage namespace,
// using the Solidity layout of
//
// ```text
// struct DiamondStorage {
//     mapping(bytes4 => FacetAddressAndPosition) selectorToFacetAndPosition;
//     mapping(address => FacetFunctionSelectors) facetFunctionSelectors;
//     address[] facetAddresses;
//     mapping(bytes4 => bool) supportedInterfaces;
//     address contractOwner;
// }
// ```
//
// Removals use swap-and-pop on both the per-facet selector arrays and the facet list, so every
// bound selector always points at its own index and no array keeps holes.

use alloy_primitives::{Address, Bytes, Selector, U256};
use alloy_sol_types::{SolCall, SolEvent};
use tracing::{debug, warn};

use crate::env::{CallContext, Env};
use crate::storage;
use crate::types::error::{Result, RouterError};
use crate::types::facet_cut::FacetCutAction;
use crate::types::interfaces::IDiamondCut::{self, DiamondCut, FacetCut};
use crate::types::interfaces::LibDiamond::{
    CannotAddFunctionToDiamondThatAlreadyExists, CannotAddSelectorsToZeroAddress,
    CannotRemoveFunctionThatDoesNotExist, CannotRemoveImmutableFunction,
    CannotReplaceFunctionThatDoesNotExists, CannotReplaceFunctionWithTheSameFunctionFromTheSameFacet,
    CannotReplaceFunctionsFromFacetWithZeroAddress, CannotReplaceImmutableFunction,
    InitializationFunctionReverted, NoBytecodeAtAddress, NoFacetCutsProvided,
    NoSelectorsProvidedForFacetForCut, RemoveFacetAddressMustBeZeroAddress,
};

const POSITION_OFFSET: usize = 160;

// Selector of the one function that can never be removed
pub fn diamond_cut_selector() -> Selector {
    IDiamondCut::diamondCutCall::SELECTOR.into()
}

// Facet bound to `selector`, zero when unbound
pub fn facet_address(e: &Env, diamond: Address, selector: Selector) -> Address {
    selector_binding(e, diamond, selector).0
}

// Selectors bound to `facet` in insertion order (modulo swap-and-pop)
pub fn facet_function_selectors(e: &Env, diamond: Address, facet: Address) -> Vec<Selector> {
    let slot = facet_selectors_slot(facet);
    (0..selector_count(e, diamond, facet))
        .map(|index| {
            let (word_slot, lane) = storage::packed_selector_location(slot, index);
            storage::read_packed_selector(e.sload(diamond, word_slot), lane)
        })
        .collect()
}

// Every facet with at least one selector
pub fn facet_addresses(e: &Env, diamond: Address) -> Vec<Address> {
    let slot = facet_addresses_slot();
    let data = storage::array_data_slot(slot);
    let len = array_len(e, diamond, slot);
    (0..len)
        .map(|index| storage::word_to_address(e.sload(diamond, storage::field(data, index as u64))))
        .collect()
}

// Apply `cuts` in order, emit DiamondCut, then run the initializer
//
// # Arguments
//
// * `e` - The environment
// * `ctx` - Frame running in the diamond's context
// * `cuts` - Batch of facet cuts
// * `init` - Initializer contract, zero for none
// * `calldata` - Initializer calldata
//
// # Errors
//
// `NoFacetCutsProvided` for an empty batch, `IncorrectFacetCutAction` for unknown actions,
// any per-selector validation error, or the initializer's failure
pub fn diamond_cut(
    e: &mut Env,
    ctx: &CallContext,
    cuts: &[FacetCut],
    init: Address,
    calldata: &Bytes,
) -> Result<()> {
    if cuts.is_empty() {
        return Err(NoFacetCutsProvided {}.into());
    }
    for cut in cuts {
        let action = FacetCutAction::try_from(cut.action)?;
        debug!(
            diamond = %ctx.address,
            facet = %cut.facetAddress,
            ?action,
            selectors = cut.functionSelectors.len(),
            "applying facet cut"
        );
        match action {
            FacetCutAction::Add => {
                add_functions(e, ctx.address, cut.facetAddress, &cut.functionSelectors)?
            }
            FacetCutAction::Replace => {
                replace_functions(e, ctx.address, cut.facetAddress, &cut.functionSelectors)?
            }
            FacetCutAction::Remove => {
                remove_functions(e, ctx.address, cut.facetAddress, &cut.functionSelectors)?
            }
        }
    }
    let event = DiamondCut {
        cuts: cuts.to_vec(),
        init,
        initCalldata: calldata.clone(),
    };
    e.emit(ctx.address, event.encode_log_data());
    initialize_diamond_cut(e, ctx, init, calldata)
}

// Bind new selectors to `facet`
pub fn add_functions(e: &mut Env, diamond: Address, facet: Address, selectors: &[Selector]) -> Result<()> {
    if selectors.is_empty() {
        return Err(NoSelectorsProvidedForFacetForCut { facetAddress: facet }.into());
    }
    if facet.is_zero() {
        return Err(CannotAddSelectorsToZeroAddress {
            selectors: selectors.to_vec(),
        }
        .into());
    }
    enforce_has_contract_code(e, facet, "LibDiamondCut: Add facet has no code")?;
    for &selector in selectors {
        if !facet_address(e, diamond, selector).is_zero() {
            return Err(CannotAddFunctionToDiamondThatAlreadyExists { selector }.into());
        }
        add_function(e, diamond, selector, facet);
    }
    Ok(())
}

// Rebind bound selectors to `facet`
pub fn replace_functions(
    e: &mut Env,
    diamond: Address,
    facet: Address,
    selectors: &[Selector],
) -> Result<()> {
    if selectors.is_empty() {
        return Err(NoSelectorsProvidedForFacetForCut { facetAddress: facet }.into());
    }
    if facet.is_zero() {
        return Err(CannotReplaceFunctionsFromFacetWithZeroAddress {
            selectors: selectors.to_vec(),
        }
        .into());
    }
    enforce_has_contract_code(e, facet, "LibDiamondCut: Replace facet has no code")?;
    for &selector in selectors {
        let old_facet = facet_address(e, diamond, selector);
        if old_facet.is_zero() {
            return Err(CannotReplaceFunctionThatDoesNotExists { selector }.into());
        }
        if old_facet == diamond {
            return Err(CannotReplaceImmutableFunction { selector }.into());
        }
        if old_facet == facet {
            return Err(CannotReplaceFunctionWithTheSameFunctionFromTheSameFacet { selector }.into());
        }
        remove_function(e, diamond, old_facet, selector);
        add_function(e, diamond, selector, facet);
    }
    Ok(())
}

// Unbind selectors, `facet` must be the zero address
pub fn remove_functions(
    e: &mut Env,
    diamond: Address,
    facet: Address,
    selectors: &[Selector],
) -> Result<()> {
    if selectors.is_empty() {
        return Err(NoSelectorsProvidedForFacetForCut { facetAddress: facet }.into());
    }
    if !facet.is_zero() {
        return Err(RemoveFacetAddressMustBeZeroAddress { facetAddress: facet }.into());
    }
    for &selector in selectors {
        let old_facet = facet_address(e, diamond, selector);
        if old_facet.is_zero() {
            return Err(CannotRemoveFunctionThatDoesNotExist { selector }.into());
        }
        if old_facet == diamond || selector == diamond_cut_selector() {
            return Err(CannotRemoveImmutableFunction { selector }.into());
        }
        remove_function(e, diamond, old_facet, selector);
    }
    Ok(())
}

// Delegatecall the initializer of a cut, a zero address skips it
//
// # Errors
//
// `NoBytecodeAtAddress` when `init` has no code. A reverting initializer bubbles its revert data,
// or `InitializationFunctionReverted` when it reverted without data.
pub fn initialize_diamond_cut(
    e: &mut Env,
    ctx: &CallContext,
    init: Address,
    calldata: &Bytes,
) -> Result<()> {
    if init.is_zero() {
        return Ok(());
    }
    enforce_has_contract_code(e, init, "LibDiamondCut: _init address has no code")?;
    match e.delegate_call(ctx, init, calldata) {
        Ok(_) => Ok(()),
        Err(reverted) if reverted.data().is_empty() => {
            warn!(diamond = %ctx.address, %init, "initializer reverted without data");
            Err(InitializationFunctionReverted {
                initializationContractAddress: init,
                initCalldata: calldata.clone(),
            }
            .into())
        }
        Err(reverted) => {
            warn!(diamond = %ctx.address, %init, "initializer reverted");
            Err(RouterError::from(reverted))
        }
    }
}

pub fn enforce_has_contract_code(e: &Env, address: Address, message: &str) -> Result<()> {
    if !e.has_code(address) {
        return Err(NoBytecodeAtAddress {
            contractAddress: address,
            message: message.to_string(),
        }
        .into());
    }
    Ok(())
}

fn add_function(e: &mut Env, diamond: Address, selector: Selector, facet: Address) {
    let position = selector_count(e, diamond, facet);
    if position == 0 {
        add_facet(e, diamond, facet);
    }
    let slot = facet_selectors_slot(facet);
    set_packed_selector(e, diamond, slot, position, selector);
    e.sstore(diamond, slot, U256::from(position + 1));
    set_selector_binding(e, diamond, selector, facet, position);
}

fn add_facet(e: &mut Env, diamond: Address, facet: Address) {
    let slot = facet_addresses_slot();
    let len = array_len(e, diamond, slot);
    let data = storage::array_data_slot(slot);
    e.sstore(diamond, storage::field(data, len as u64), storage::address_to_word(facet));
    e.sstore(diamond, slot, U256::from(len + 1));
    e.sstore(diamond, facet_address_position_slot(facet), U256::from(len));
}

// Swap-and-pop `selector` out of `facet`, dropping the facet once it has no selectors left
fn remove_function(e: &mut Env, diamond: Address, facet: Address, selector: Selector) {
    let slot = facet_selectors_slot(facet);
    let (_, position) = selector_binding(e, diamond, selector);
    let last_position = selector_count(e, diamond, facet) - 1;
    if position != last_position {
        let last_selector = packed_selector(e, diamond, slot, last_position);
        set_packed_selector(e, diamond, slot, position, last_selector);
        set_selector_binding(e, diamond, last_selector, facet, position);
    }
    set_packed_selector(e, diamond, slot, last_position, Selector::ZERO);
    e.sstore(diamond, slot, U256::from(last_position));
    e.sstore(diamond, selector_slot(selector), U256::ZERO);

    if last_position == 0 {
        remove_facet(e, diamond, facet);
    }
}

fn remove_facet(e: &mut Env, diamond: Address, facet: Address) {
    let slot = facet_addresses_slot();
    let data = storage::array_data_slot(slot);
    let last_position = array_len(e, diamond, slot) - 1;
    let position = e.sload(diamond, facet_address_position_slot(facet)).to::<usize>();
    if position != last_position {
        let last_facet = storage::word_to_address(e.sload(diamond, storage::field(data, last_position as u64)));
        e.sstore(diamond, storage::field(data, position as u64), storage::address_to_word(last_facet));
        e.sstore(diamond, facet_address_position_slot(last_facet), U256::from(position));
    }
    e.sstore(diamond, storage::field(data, last_position as u64), U256::ZERO);
    e.sstore(diamond, slot, U256::from(last_position));
    e.sstore(diamond, facet_address_position_slot(facet), U256::ZERO);
}

fn selector_binding(e: &Env, diamond: Address, selector: Selector) -> (Address, usize) {
    let word = e.sload(diamond, selector_slot(selector));
    (
        storage::word_to_address(word),
        (word >> POSITION_OFFSET).to::<usize>(),
    )
}

fn set_selector_binding(e: &mut Env, diamond: Address, selector: Selector, facet: Address, position: usize) {
    let word = storage::address_to_word(facet) | (U256::from(position) << POSITION_OFFSET);
    e.sstore(diamond, selector_slot(selector), word);
}

fn selector_count(e: &Env, diamond: Address, facet: Address) -> usize {
    array_len(e, diamond, facet_selectors_slot(facet))
}

fn packed_selector(e: &Env, diamond: Address, slot: U256, index: usize) -> Selector {
    let (word_slot, lane) = storage::packed_selector_location(slot, index);
    storage::read_packed_selector(e.sload(diamond, word_slot), lane)
}

fn set_packed_selector(e: &mut Env, diamond: Address, slot: U256, index: usize, selector: Selector) {
    let (word_slot, lane) = storage::packed_selector_location(slot, index);
    let word = storage::write_packed_selector(e.sload(diamond, word_slot), lane, selector);
    e.sstore(diamond, word_slot, word);
}

fn array_len(e: &Env, diamond: Address, slot: U256) -> usize {
    e.sload(diamond, slot).to::<usize>()
}

fn selector_slot(selector: Selector) -> U256 {
    storage::mapping_slot(
        storage::selector_key(selector),
        diamond_field(storage::SELECTOR_TO_FACET_AND_POSITION),
    )
}

// FacetFunctionSelectors struct of `facet`: selectors array at +0, facetAddressPosition at +1
fn facet_selectors_slot(facet: Address) -> U256 {
    storage::mapping_slot(
        storage::address_key(facet),
        diamond_field(storage::FACET_FUNCTION_SELECTORS),
    )
}

fn facet_address_position_slot(facet: Address) -> U256 {
    storage::field(facet_selectors_slot(facet), 1)
}

fn facet_addresses_slot() -> U256 {
    diamond_field(storage::FACET_ADDRESSES)
}

fn diamond_field(offset: u64) -> U256 {
    storage::field(storage::diamond_storage_position(), offset)
}

// Cross-checks the selector mapping, the per-facet arrays and the facet list
#[cfg(test)]
pub(crate) fn check_invariants(e: &Env, diamond: Address) -> std::result::Result<(), String> {
    let facets = facet_addresses(e, diamond);
    for (index, facet) in facets.iter().enumerate() {
        let position = e.sload(diamond, facet_address_position_slot(*facet)).to::<usize>();
        if position != index {
            return Err(format!("facet {facet} recorded at {position}, found at {index}"));
        }
        let selectors = facet_function_selectors(e, diamond, *facet);
        if selectors.is_empty() {
            return Err(format!("facet {facet} listed without selectors"));
        }
        for (index, selector) in selectors.iter().enumerate() {
            let binding = selector_binding(e, diamond, *selector);
            if binding != (*facet, index) {
                return Err(format!(
                    "selector {selector} of {facet} at {index} is bound to {binding:?}"
                ));
            }
        }
        // slot holding the lane past the end must be clear beyond the last element
        let len = selectors.len();
        if len % storage::SELECTORS_PER_SLOT != 0 {
            let slot = facet_selectors_slot(*facet);
            let (word_slot, lane) = storage::packed_selector_location(slot, len);
            let tail = e.sload(diamond, word_slot) >> (lane * 32);
            if !tail.is_zero() {
                return Err(format!("stale selectors after index {len} of {facet}"));
            }
        }
    }
    Ok(())
}
