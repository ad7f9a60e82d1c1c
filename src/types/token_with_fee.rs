use alloy_primitives::{Address, B256, U256};

use crate::types::error::Result;
use crate::types::interfaces::IAggregatorProxy::{
    AmountOverflow, InvalidFeePercentage, MalformedTokenWithFee,
};

// Fee denominator, 10000 bps = 100%
pub const FEE_DENOMINATOR: u16 = 10_000;

const FEE_OFFSET: usize = 160;
const FEE_BITS: usize = 16;
// First bit above the fee field, everything from here up must be clear
const PACKED_BITS: usize = FEE_OFFSET + FEE_BITS;

// Token address and basis-point fee packed into one word:
// token in bits 0..160, fee in bits 160..176
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TokenWithFee {
    pub token: Address,
    pub fee_bps: u16,
}

impl TokenWithFee {
    pub fn new(token: Address, fee_bps: u16) -> Self {
        Self { token, fee_bps }
    }

    // Unpacks and validates a packed value
    //
    // # Errors
    //
    // `MalformedTokenWithFee` if any bit above the fee field is set,
    // `InvalidFeePercentage` if the fee is 100% or more
    pub fn decode(packed: U256) -> Result<Self> {
        if !(packed >> PACKED_BITS).is_zero() {
            return Err(MalformedTokenWithFee {
                tokenWithFee: packed,
            }
            .into());
        }
        let fee = (packed >> FEE_OFFSET).to::<u64>();
        if fee >= u64::from(FEE_DENOMINATOR) {
            return Err(InvalidFeePercentage {
                fee: U256::from(fee),
            }
            .into());
        }
        let token = Address::from_word(B256::from(packed.to_be_bytes::<32>()));
        Ok(Self {
            token,
            fee_bps: fee as u16,
        })
    }

    pub fn encode(&self) -> U256 {
        U256::from_be_slice(self.token.as_slice()) | (U256::from(self.fee_bps) << FEE_OFFSET)
    }

    // Zero address stands for the chain's native asset
    pub fn is_native(&self) -> bool {
        self.token.is_zero()
    }

    // floor(amount * fee_bps / 10000)
    pub fn fee_amount(&self, amount: U256) -> Result<U256> {
        let scaled = amount
            .checked_mul(U256::from(self.fee_bps))
            .ok_or(AmountOverflow {})?;
        Ok(scaled / U256::from(FEE_DENOMINATOR))
    }

    // Splits `amount` into (fee, remainder); the two always add up to `amount`
    pub fn split(&self, amount: U256) -> Result<(U256, U256)> {
        let fee = self.fee_amount(amount)?;
        Ok((fee, amount - fee))
    }
}
