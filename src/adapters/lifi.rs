use alloy_primitives::{Address, Selector};

use super::adapter::AggregatorAdapter;
use crate::diamond::{decode_calldata, interface_selectors, Facet};
use crate::env::{CallContext, CallResult, Contract, Env};
use crate::types::interfaces::ILiFiFacet::ILiFiFacetCalls;
use crate::types::provider::Provider;

// Swap entry point forwarding to the LiFi diamond
#[derive(Debug, Clone, Copy)]
pub struct LiFiFacet {
    aggregator: Address,
}

impl LiFiFacet {
    pub fn new(aggregator: Address) -> Self {
        Self { aggregator }
    }
}

impl AggregatorAdapter for LiFiFacet {
    fn provider(&self) -> Provider {
        Provider::LiFi
    }

    fn aggregator(&self) -> Address {
        self.aggregator
    }
}

impl Contract for LiFiFacet {
    fn name(&self) -> &'static str {
        "LiFiFacet"
    }

    fn execute(&self, e: &mut Env, ctx: &CallContext, input: &[u8]) -> CallResult {
        let ILiFiFacetCalls::callLiFi(call) = decode_calldata::<ILiFiFacetCalls>(input)?;
        let result = self.swap(
            e,
            ctx,
            call.fromTokenWithFee,
            call.fromAmount,
            call.toTokenWithFee,
            call.callData,
        );
        Ok(result?)
    }
}

impl Facet for LiFiFacet {
    fn selectors(&self) -> Vec<Selector> {
        interface_selectors::<ILiFiFacetCalls>()
    }
}
