use alloy_primitives::{Address, Selector};

use super::adapter::AggregatorAdapter;
use crate::diamond::{decode_calldata, interface_selectors, Facet};
use crate::env::{CallContext, CallResult, Contract, Env};
use crate::types::interfaces::IOneInchFacet::IOneInchFacetCalls;
use crate::types::provider::Provider;

// Swap entry point forwarding to the 1inch aggregation router
#[derive(Debug, Clone, Copy)]
pub struct OneInchFacet {
    aggregator: Address,
}

impl OneInchFacet {
    pub fn new(aggregator: Address) -> Self {
        Self { aggregator }
    }
}

impl AggregatorAdapter for OneInchFacet {
    fn provider(&self) -> Provider {
        Provider::OneInch
    }

    fn aggregator(&self) -> Address {
        self.aggregator
    }
}

impl Contract for OneInchFacet {
    fn name(&self) -> &'static str {
        "OneInchFacet"
    }

    fn execute(&self, e: &mut Env, ctx: &CallContext, input: &[u8]) -> CallResult {
        let IOneInchFacetCalls::callOneInch(call) = decode_calldata::<IOneInchFacetCalls>(input)?;
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

impl Facet for OneInchFacet {
    fn selectors(&self) -> Vec<Selector> {
        interface_selectors::<IOneInchFacetCalls>()
    }
}
