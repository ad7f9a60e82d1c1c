use alloy_primitives::Bytes;
use alloy_sol_types::SolInterface;

use crate::env::{EnvError, Reverted};
use crate::types::interfaces::{IAggregatorProxy, IFeeCollector, IReentrancyGuard, LibDiamond};

pub use IAggregatorProxy::IAggregatorProxyErrors as AggregatorError;
pub use IFeeCollector::IFeeCollectorErrors as FeeCollectorError;
pub use IReentrancyGuard::IReentrancyGuardErrors as ReentrancyError;
pub use LibDiamond::LibDiamondErrors as DiamondError;

// Standard router errors. Every variant maps onto the revert data a caller observes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RouterError {
    // Selector registry, ownership and cut validation failures
    #[error("diamond error: {0:?}")]
    Diamond(DiamondError),

    // Swap forwarding and fee custody failures
    #[error("aggregator proxy error: {0:?}")]
    Aggregator(AggregatorError),

    // Fee recipient administration failures
    #[error("fee collector error: {0:?}")]
    FeeCollector(FeeCollectorError),

    // Guarded entry point re-entered
    #[error("reentrancy guard error: {0:?}")]
    Reentrancy(ReentrancyError),

    // Host level failure (balance, depth, address collision), reverts without data
    #[error("environment error: {0}")]
    Env(#[from] EnvError),

    // Revert data of a nested call, propagated unchanged
    #[error("call reverted with {} bytes of revert data", .0.len())]
    Reverted(Bytes),
}

pub type Result<T> = std::result::Result<T, RouterError>;

impl RouterError {
    // ABI encoded revert data surfaced to the caller
    pub fn revert_data(&self) -> Bytes {
        match self {
            Self::Diamond(err) => err.abi_encode().into(),
            Self::Aggregator(err) => err.abi_encode().into(),
            Self::FeeCollector(err) => err.abi_encode().into(),
            Self::Reentrancy(err) => err.abi_encode().into(),
            Self::Env(_) => Bytes::new(),
            Self::Reverted(data) => data.clone(),
        }
    }
}

impl From<Reverted> for RouterError {
    fn from(reverted: Reverted) -> Self {
        Self::Reverted(reverted.0)
    }
}

impl From<RouterError> for Reverted {
    fn from(err: RouterError) -> Self {
        Reverted(err.revert_data())
    }
}

macro_rules! impl_from_sol_errors {
    ($module:ident :: $group:ident => $variant:ident { $($error:ident),+ $(,)? }) => {
        impl From<$module::$group> for RouterError {
            fn from(err: $module::$group) -> Self {
                Self::$variant(err)
            }
        }

        $(
            impl From<$module::$error> for RouterError {
                fn from(err: $module::$error) -> Self {
                    Self::$variant($module::$group::$error(err))
                }
            }
        )+
    };
}

impl_from_sol_errors!(LibDiamond::LibDiamondErrors => Diamond {
    NotContractOwner,
    NoFacetCutsProvided,
    NoSelectorsProvidedForFacetForCut,
    CannotAddSelectorsToZeroAddress,
    NoBytecodeAtAddress,
    IncorrectFacetCutAction,
    CannotAddFunctionToDiamondThatAlreadyExists,
    CannotReplaceFunctionsFromFacetWithZeroAddress,
    CannotReplaceImmutableFunction,
    CannotReplaceFunctionWithTheSameFunctionFromTheSameFacet,
    CannotReplaceFunctionThatDoesNotExists,
    RemoveFacetAddressMustBeZeroAddress,
    CannotRemoveFunctionThatDoesNotExist,
    CannotRemoveImmutableFunction,
    InitializationFunctionReverted,
    FunctionNotFound,
});

impl_from_sol_errors!(IAggregatorProxy::IAggregatorProxyErrors => Aggregator {
    InvalidFeePercentage,
    MalformedTokenWithFee,
    InvalidAggregatorAddress,
    InvalidNativeAmount,
    FeeRecipientNotSet,
    TokenCallFailed,
    NativeTransferFailed,
    AmountOverflow,
});

impl_from_sol_errors!(IFeeCollector::IFeeCollectorErrors => FeeCollector {
    FeeRecipientZeroAddress,
    FeeRecipientIsDiamond,
    FeeRecipientSameAsCurrent,
});

impl_from_sol_errors!(IReentrancyGuard::IReentrancyGuardErrors => Reentrancy {
    ReentrancyGuardReentrantCall,
});
