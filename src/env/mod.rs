// Deterministic EVM-semantics host the diamond and its facets run on.
//
// Accounts carry a native balance, a nonce, 256-bit storage slots and optional code.
// Calls are synchronous frames; every state change is journaled so a reverted frame
// (and everything it called) is rolled back without a trace, mirroring EVM atomicity.

mod contract;
mod journal;

use std::{collections::HashMap, rc::Rc};

use alloy_primitives::{Address, Bytes, Log, LogData, U256};
use tracing::trace;

pub use contract::{CallContext, CallResult, Contract, Reverted};
use journal::{Checkpoint, Journal, JournalEntry};

// Maximum nesting of call frames, deeper calls fail
pub const MAX_CALL_DEPTH: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EnvError {
    #[error("insufficient balance on {address}: required {required}, available {available}")]
    InsufficientBalance {
        address: Address,
        required: U256,
        available: U256,
    },
    #[error("balance overflow on {0}")]
    BalanceOverflow(Address),
    #[error("call depth limit of {MAX_CALL_DEPTH} frames reached")]
    CallDepthExceeded,
    #[error("account {0} already has code")]
    CreateCollision(Address),
}

#[derive(Default, Clone)]
struct Account {
    balance: U256,
    nonce: u64,
    code: Option<Rc<dyn Contract>>,
    storage: HashMap<U256, U256>,
}

// World state plus the call machinery
#[derive(Default)]
pub struct Env {
    accounts: HashMap<Address, Account>,
    journal: Journal,
    logs: Vec<Log>,
    depth: usize,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn balance(&self, address: Address) -> U256 {
        self.accounts
            .get(&address)
            .map(|account| account.balance)
            .unwrap_or_default()
    }

    pub fn nonce(&self, address: Address) -> u64 {
        self.accounts
            .get(&address)
            .map(|account| account.nonce)
            .unwrap_or_default()
    }

    pub fn has_code(&self, address: Address) -> bool {
        self.code(address).is_some()
    }

    pub fn code(&self, address: Address) -> Option<Rc<dyn Contract>> {
        self.accounts
            .get(&address)
            .and_then(|account| account.code.clone())
    }

    // Current call nesting, zero outside of any transaction
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn sload(&self, address: Address, slot: U256) -> U256 {
        self.accounts
            .get(&address)
            .and_then(|account| account.storage.get(&slot).copied())
            .unwrap_or_default()
    }

    pub fn sstore(&mut self, address: Address, slot: U256, value: U256) {
        let account = self.accounts.entry(address).or_default();
        let previous = if value.is_zero() {
            account.storage.remove(&slot)
        } else {
            account.storage.insert(slot, value)
        }
        .unwrap_or_default();
        if previous != value {
            self.journal.record(JournalEntry::StorageChanged {
                address,
                slot,
                previous,
            });
        }
    }

    pub fn emit(&mut self, address: Address, data: LogData) {
        self.logs.push(Log { address, data });
        self.journal.record(JournalEntry::LogEmitted);
    }

    // Logs of all committed and in-flight frames
    pub fn logs(&self) -> &[Log] {
        &self.logs
    }

    // Drains the log buffer, only meaningful between transactions
    pub fn take_logs(&mut self) -> Vec<Log> {
        std::mem::take(&mut self.logs)
    }

    // Overwrites the native balance of an account (genesis allocation)
    pub fn deal(&mut self, address: Address, amount: U256) {
        let account = self.accounts.entry(address).or_default();
        let previous = std::mem::replace(&mut account.balance, amount);
        self.journal
            .record(JournalEntry::BalanceSet { address, previous });
    }

    // Deploys `code` at the CREATE address of `deployer` and runs its constructor
    //
    // # Errors
    //
    // Returns the constructor error (or a collision) after rolling the deployment back
    pub fn create<E>(
        &mut self,
        deployer: Address,
        code: Rc<dyn Contract>,
        constructor: impl FnOnce(&mut Env, &CallContext) -> Result<(), E>,
    ) -> Result<Address, E>
    where
        E: From<EnvError>,
    {
        let address = deployer.create(self.nonce(deployer));
        self.bump_nonce(deployer);
        if self.has_code(address) {
            return Err(EnvError::CreateCollision(address).into());
        }
        if self.depth >= MAX_CALL_DEPTH {
            return Err(EnvError::CallDepthExceeded.into());
        }

        let checkpoint = self.journal.checkpoint();
        let name = code.name();
        self.accounts.entry(address).or_default().code = Some(code);
        self.journal.record(JournalEntry::CodeDeployed { address });

        let ctx = CallContext {
            address,
            code_address: address,
            caller: deployer,
            value: U256::ZERO,
        };
        self.depth += 1;
        let result = constructor(self, &ctx);
        self.depth -= 1;

        match result {
            Ok(()) => {
                trace!(contract = name, %address, %deployer, "contract deployed");
                self.commit_if_outermost();
                Ok(address)
            }
            Err(err) => {
                trace!(contract = name, %address, %deployer, "constructor reverted");
                self.revert_to(checkpoint);
                Err(err)
            }
        }
    }

    // Message call from `caller` into `target`, moving `value` along
    pub fn call(
        &mut self,
        caller: Address,
        target: Address,
        value: U256,
        input: &[u8],
    ) -> CallResult {
        if self.depth >= MAX_CALL_DEPTH {
            trace!(%caller, %target, "call depth exceeded");
            return Err(Reverted::default());
        }
        let checkpoint = self.journal.checkpoint();
        if let Err(err) = self.transfer_value(caller, target, value) {
            trace!(%caller, %target, %err, "value transfer failed");
            return Err(Reverted::default());
        }
        let Some(code) = self.code(target) else {
            // plain account, nothing to execute
            return Ok(Bytes::new());
        };
        let ctx = CallContext {
            address: target,
            code_address: target,
            caller,
            value,
        };
        self.run(code, &ctx, input, checkpoint)
    }

    // Runs the code of `code_address` inside the current frame's storage, caller and value
    pub fn delegate_call(
        &mut self,
        ctx: &CallContext,
        code_address: Address,
        input: &[u8],
    ) -> CallResult {
        if self.depth >= MAX_CALL_DEPTH {
            trace!(address = %ctx.address, %code_address, "delegatecall depth exceeded");
            return Err(Reverted::default());
        }
        let checkpoint = self.journal.checkpoint();
        let Some(code) = self.code(code_address) else {
            return Ok(Bytes::new());
        };
        let frame = CallContext {
            code_address,
            ..*ctx
        };
        self.run(code, &frame, input, checkpoint)
    }

    // Top-level transaction. The sender nonce is consumed even when execution reverts.
    pub fn transact(
        &mut self,
        from: Address,
        to: Address,
        value: U256,
        input: &[u8],
    ) -> CallResult {
        debug_assert_eq!(self.depth, 0, "transactions cannot be nested");
        self.bump_nonce(from);
        let result = self.call(from, to, value, input);
        self.journal.commit();
        result
    }

    // Read-only call, every state change is discarded afterwards
    pub fn view(&mut self, caller: Address, to: Address, input: &[u8]) -> CallResult {
        let checkpoint = self.journal.checkpoint();
        let result = self.call(caller, to, U256::ZERO, input);
        self.revert_to(checkpoint);
        result
    }

    fn run(
        &mut self,
        code: Rc<dyn Contract>,
        ctx: &CallContext,
        input: &[u8],
        checkpoint: Checkpoint,
    ) -> CallResult {
        trace!(
            contract = code.name(),
            address = %ctx.address,
            caller = %ctx.caller,
            value = %ctx.value,
            depth = self.depth,
            "entering frame"
        );
        self.depth += 1;
        let result = code.execute(self, ctx, input);
        self.depth -= 1;
        if let Err(reverted) = &result {
            trace!(
                contract = code.name(),
                address = %ctx.address,
                revert_data = ?reverted.0,
                "frame reverted"
            );
            self.revert_to(checkpoint);
        }
        result
    }

    fn transfer_value(&mut self, from: Address, to: Address, value: U256) -> Result<(), EnvError> {
        if value.is_zero() {
            return Ok(());
        }
        let sender = self.accounts.entry(from).or_default();
        if sender.balance < value {
            return Err(EnvError::InsufficientBalance {
                address: from,
                required: value,
                available: sender.balance,
            });
        }
        sender.balance -= value;

        let recipient = self.accounts.entry(to).or_default();
        match recipient.balance.checked_add(value) {
            Some(balance) => recipient.balance = balance,
            None => {
                self.accounts.entry(from).or_default().balance += value;
                return Err(EnvError::BalanceOverflow(to));
            }
        }
        self.journal
            .record(JournalEntry::ValueTransferred { from, to, value });
        Ok(())
    }

    fn bump_nonce(&mut self, address: Address) {
        self.accounts.entry(address).or_default().nonce += 1;
        self.journal
            .record(JournalEntry::NonceIncremented { address });
    }

    fn commit_if_outermost(&mut self) {
        if self.depth == 0 {
            self.journal.commit();
        }
    }

    fn revert_to(&mut self, checkpoint: Checkpoint) {
        for entry in self.journal.unwind(checkpoint) {
            match entry {
                JournalEntry::StorageChanged {
                    address,
                    slot,
                    previous,
                } => {
                    let storage = &mut self.accounts.entry(address).or_default().storage;
                    if previous.is_zero() {
                        storage.remove(&slot);
                    } else {
                        storage.insert(slot, previous);
                    }
                }
                JournalEntry::ValueTransferred { from, to, value } => {
                    self.accounts.entry(to).or_default().balance -= value;
                    self.accounts.entry(from).or_default().balance += value;
                }
                JournalEntry::BalanceSet { address, previous } => {
                    self.accounts.entry(address).or_default().balance = previous;
                }
                JournalEntry::NonceIncremented { address } => {
                    self.accounts.entry(address).or_default().nonce -= 1;
                }
                JournalEntry::CodeDeployed { address } => {
                    self.accounts.entry(address).or_default().code = None;
                }
                JournalEntry::LogEmitted => {
                    self.logs.pop();
                }
            }
        }
    }
}
