// Storage layout helpers. Each module owns an isolated region of the proxy's storage rooted
// at keccak256 of a namespace string, and lays its fields out by Solidity rules from there.

use alloy_primitives::{keccak256, Address, Selector, B256, U256};

const DIAMOND_STORAGE_NAMESPACE: &str = "diamond.standard.diamond.storage";
const FEE_COLLECTOR_STORAGE_NAMESPACE: &str = "aggregator.proxy.fee.collector.storage";
const REENTRANCY_STORAGE_NAMESPACE: &str = "aggregator.proxy.reentrancy.guard.storage";

// Diamond storage field offsets
pub const SELECTOR_TO_FACET_AND_POSITION: u64 = 0;
pub const FACET_FUNCTION_SELECTORS: u64 = 1;
pub const FACET_ADDRESSES: u64 = 2;
pub const SUPPORTED_INTERFACES: u64 = 3;
pub const CONTRACT_OWNER: u64 = 4;

// Selectors per packed bytes4[] slot
pub const SELECTORS_PER_SLOT: usize = 8;

const SELECTOR_MASK: u64 = 0xffff_ffff;

// Root slot of a namespace
pub fn namespace(name: &str) -> U256 {
    U256::from_be_bytes(keccak256(name.as_bytes()).0)
}

pub fn diamond_storage_position() -> U256 {
    namespace(DIAMOND_STORAGE_NAMESPACE)
}

pub fn fee_collector_storage_position() -> U256 {
    namespace(FEE_COLLECTOR_STORAGE_NAMESPACE)
}

pub fn reentrancy_storage_position() -> U256 {
    namespace(REENTRANCY_STORAGE_NAMESPACE)
}

// Slot of a struct field `offset` slots after `base`
pub fn field(base: U256, offset: u64) -> U256 {
    base.wrapping_add(U256::from(offset))
}

// Slot of `mapping[key]` for a mapping declared at `slot`
pub fn mapping_slot(key: B256, slot: U256) -> U256 {
    let mut preimage = [0u8; 64];
    preimage[..32].copy_from_slice(key.as_slice());
    preimage[32..].copy_from_slice(&slot.to_be_bytes::<32>());
    U256::from_be_bytes(keccak256(preimage).0)
}

// Mapping key of an address (left padded)
pub fn address_key(address: Address) -> B256 {
    address.into_word()
}

// Mapping key of a bytes4 (right padded)
pub fn selector_key(selector: Selector) -> B256 {
    let mut key = B256::ZERO;
    key[..4].copy_from_slice(selector.as_slice());
    key
}

// First data slot of a dynamic array whose length lives at `slot`
pub fn array_data_slot(slot: U256) -> U256 {
    U256::from_be_bytes(keccak256(slot.to_be_bytes::<32>()).0)
}

// Slot and in-slot index of element `index` of a packed bytes4[]
pub fn packed_selector_location(slot: U256, index: usize) -> (U256, usize) {
    let data = array_data_slot(slot);
    (
        field(data, (index / SELECTORS_PER_SLOT) as u64),
        index % SELECTORS_PER_SLOT,
    )
}

// Reads the `lane`-th bytes4 of a packed word, lane 0 sits in the lowest-order bytes
pub fn read_packed_selector(word: U256, lane: usize) -> Selector {
    let value = ((word >> (lane * 32)) & U256::from(SELECTOR_MASK)).to::<u64>() as u32;
    Selector::from(value.to_be_bytes())
}

pub fn write_packed_selector(word: U256, lane: usize, selector: Selector) -> U256 {
    let shift = lane * 32;
    let cleared = word & !(U256::from(SELECTOR_MASK) << shift);
    let value = u32::from_be_bytes(selector.0);
    cleared | (U256::from(value) << shift)
}

pub fn address_to_word(address: Address) -> U256 {
    U256::from_be_slice(address.as_slice())
}

// Low 160 bits of a slot as an address
pub fn word_to_address(word: U256) -> Address {
    Address::from_word(B256::from(word.to_be_bytes::<32>()))
}
