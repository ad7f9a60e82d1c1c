use alloy_primitives::{Bytes, U256};

use crate::types::error::Result;
use crate::types::token_with_fee::TokenWithFee;

// Normalized aggregator swap descriptor
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SwapRequest {
    // Selling token and input fee
    pub from: TokenWithFee,
    // Amount of tokens to sell, input fee included
    pub from_amount: U256,
    // Buying token and output fee
    pub to: TokenWithFee,
    // Opaque aggregator calldata
    pub call_data: Bytes,
}

impl SwapRequest {
    // Decode the packed token arguments of a swap entry point
    pub fn decode(
        from_token_with_fee: U256,
        from_amount: U256,
        to_token_with_fee: U256,
        call_data: Bytes,
    ) -> Result<Self> {
        Ok(Self {
            from: TokenWithFee::decode(from_token_with_fee)?,
            from_amount,
            to: TokenWithFee::decode(to_token_with_fee)?,
            call_data,
        })
    }

    // Input and output are the same asset, unspent input counts as output
    pub fn is_same_token(&self) -> bool {
        self.from.token == self.to.token
    }
}
