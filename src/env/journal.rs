use alloy_primitives::{Address, U256};

// Single reversible state change
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JournalEntry {
    // Storage slot overwritten, holds the previous value
    StorageChanged {
        address: Address,
        slot: U256,
        previous: U256,
    },
    // Native value moved between two accounts
    ValueTransferred {
        from: Address,
        to: Address,
        value: U256,
    },
    // Balance overwritten outside of a transfer, holds the previous value
    BalanceSet { address: Address, previous: U256 },
    NonceIncremented { address: Address },
    CodeDeployed { address: Address },
    LogEmitted,
}

// Ordered change log used to roll back reverted frames
#[derive(Debug, Default)]
pub struct Journal {
    entries: Vec<JournalEntry>,
}

// Journal position to roll back to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint(usize);

impl Journal {
    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.entries.len())
    }

    pub fn record(&mut self, entry: JournalEntry) {
        self.entries.push(entry);
    }

    // Pops entries recorded after the checkpoint, newest first
    pub fn unwind(&mut self, checkpoint: Checkpoint) -> Vec<JournalEntry> {
        let mut undone = self.entries.split_off(checkpoint.0);
        undone.reverse();
        undone
    }

    // Drops the change log once the outermost frame succeeded
    pub fn commit(&mut self) {
        self.entries.clear();
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unwind_returns_newest_entries_first() {
        let mut journal = Journal::default();
        let address = Address::with_last_byte(1);
        journal.record(JournalEntry::NonceIncremented { address });
        let checkpoint = journal.checkpoint();
        journal.record(JournalEntry::CodeDeployed { address });
        journal.record(JournalEntry::LogEmitted);

        let undone = journal.unwind(checkpoint);
        assert_eq!(
            undone,
            vec![
                JournalEntry::LogEmitted,
                JournalEntry::CodeDeployed { address }
            ]
        );
        assert_eq!(journal.len(), 1);
    }
}
