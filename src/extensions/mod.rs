pub mod env_extensions;
pub mod reentrancy;
pub mod safe_transfer;
