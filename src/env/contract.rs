use alloy_primitives::{Address, Bytes, U256};

use super::Env;

// Execution frame of a single call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallContext {
    // Account whose storage and balance the running code operates on
    pub address: Address,
    // Account the running code was loaded from (differs from `address` under delegatecall)
    pub code_address: Address,
    // Immediate caller of the frame
    pub caller: Address,
    // Native value attached to the frame
    pub value: U256,
}

// Revert data returned by a failed frame
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("execution reverted with {} bytes of revert data", .0.len())]
pub struct Reverted(pub Bytes);

impl Reverted {
    pub fn data(&self) -> &Bytes {
        &self.0
    }
}

impl From<Vec<u8>> for Reverted {
    fn from(data: Vec<u8>) -> Self {
        Self(data.into())
    }
}

pub type CallResult = Result<Bytes, Reverted>;

// Code installed at an account. Implementations are stateless, all state lives in `Env` storage.
pub trait Contract {
    // Short name used in traces
    fn name(&self) -> &'static str;

    // Runs the code against the frame described by `ctx`
    fn execute(&self, e: &mut Env, ctx: &CallContext, input: &[u8]) -> CallResult;
}
