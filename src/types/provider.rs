use std::fmt;

use alloy_primitives::Selector;
use alloy_sol_types::SolCall;
use serde::Serialize;

use crate::types::interfaces::{ILiFiFacet, IOneInchFacet};

// Aggregator provider type
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    OneInch = 0,
    LiFi = 1,
}

impl Provider {
    pub const ALL: [Provider; 2] = [Provider::OneInch, Provider::LiFi];

    // Selector of the provider's swap entry point, distinct per provider
    pub fn swap_selector(&self) -> Selector {
        match self {
            Provider::OneInch => IOneInchFacet::callOneInchCall::SELECTOR.into(),
            Provider::LiFi => ILiFiFacet::callLiFiCall::SELECTOR.into(),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OneInch => f.write_str("1inch"),
            Provider::LiFi => f.write_str("LiFi"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn swap_selectors_do_not_collide() {
        assert_ne!(
            Provider::OneInch.swap_selector(),
            Provider::LiFi.swap_selector()
        );
    }
}
