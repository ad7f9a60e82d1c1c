use alloy_primitives::{Address, Selector, U256};

use crate::env::Env;
use crate::storage;

// Reentrancy guard states; an unset slot reads as zero and counts as not entered
pub const NOT_ENTERED: u64 = 1;
pub const ENTERED: u64 = 2;

// Typed access to the namespaced storage of a diamond
pub trait EnvExtensions {
    fn contract_owner(&self, diamond: Address) -> Address;

    fn set_contract_owner_slot(&mut self, diamond: Address, owner: Address);

    fn fee_recipient(&self, diamond: Address) -> Option<Address>;

    fn set_fee_recipient_slot(&mut self, diamond: Address, recipient: Address);

    fn is_entered(&self, diamond: Address) -> bool;

    fn set_entered(&mut self, diamond: Address, entered: bool);

    fn supports_interface(&self, diamond: Address, interface_id: Selector) -> bool;

    fn set_supported_interface(&mut self, diamond: Address, interface_id: Selector, supported: bool);
}

impl EnvExtensions for Env {
    fn contract_owner(&self, diamond: Address) -> Address {
        storage::word_to_address(self.sload(diamond, contract_owner_slot()))
    }

    fn set_contract_owner_slot(&mut self, diamond: Address, owner: Address) {
        self.sstore(diamond, contract_owner_slot(), storage::address_to_word(owner));
    }

    fn fee_recipient(&self, diamond: Address) -> Option<Address> {
        let recipient = storage::word_to_address(self.sload(diamond, fee_recipient_slot()));
        (!recipient.is_zero()).then_some(recipient)
    }

    fn set_fee_recipient_slot(&mut self, diamond: Address, recipient: Address) {
        self.sstore(
            diamond,
            fee_recipient_slot(),
            storage::address_to_word(recipient),
        );
    }

    fn is_entered(&self, diamond: Address) -> bool {
        self.sload(diamond, storage::reentrancy_storage_position()) == U256::from(ENTERED)
    }

    fn set_entered(&mut self, diamond: Address, entered: bool) {
        let status = if entered { ENTERED } else { NOT_ENTERED };
        self.sstore(
            diamond,
            storage::reentrancy_storage_position(),
            U256::from(status),
        );
    }

    fn supports_interface(&self, diamond: Address, interface_id: Selector) -> bool {
        !self
            .sload(diamond, supported_interface_slot(interface_id))
            .is_zero()
    }

    fn set_supported_interface(&mut self, diamond: Address, interface_id: Selector, supported: bool) {
        self.sstore(
            diamond,
            supported_interface_slot(interface_id),
            U256::from(supported as u8),
        );
    }
}

fn contract_owner_slot() -> U256 {
    storage::field(storage::diamond_storage_position(), storage::CONTRACT_OWNER)
}

fn fee_recipient_slot() -> U256 {
    storage::fee_collector_storage_position()
}

fn supported_interface_slot(interface_id: Selector) -> U256 {
    storage::mapping_slot(
        storage::selector_key(interface_id),
        storage::field(
            storage::diamond_storage_position(),
            storage::SUPPORTED_INTERFACES,
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fee_recipient_and_owner_live_in_separate_namespaces() {
        let mut e = Env::new();
        let diamond = Address::with_last_byte(0xd1);
        assert_eq!(e.fee_recipient(diamond), None);

        e.set_contract_owner_slot(diamond, Address::with_last_byte(1));
        e.set_fee_recipient_slot(diamond, Address::with_last_byte(2));
        assert_eq!(e.contract_owner(diamond), Address::with_last_byte(1));
        assert_eq!(e.fee_recipient(diamond), Some(Address::with_last_byte(2)));
        assert_eq!(
            e.sload(diamond, storage::fee_collector_storage_position()),
            U256::from(2u64)
        );
    }

    #[test]
    fn unset_guard_counts_as_not_entered() {
        let mut e = Env::new();
        let diamond = Address::with_last_byte(0xd1);
        assert!(!e.is_entered(diamond));
        e.set_entered(diamond, true);
        assert!(e.is_entered(diamond));
        e.set_entered(diamond, false);
        assert_eq!(
            e.sload(diamond, storage::reentrancy_storage_position()),
            U256::from(NOT_ENTERED)
        );
    }
}
