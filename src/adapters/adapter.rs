use std::rc::Rc;

use alloy_primitives::{Address, Bytes, U256};
use tracing::debug;

use super::{lifi::LiFiFacet, one_inch::OneInchFacet, proxy};
use crate::diamond::Facet;
use crate::env::{CallContext, Contract, Env};
use crate::types::error::{Result, RouterError};
use crate::types::interfaces::IAggregatorProxy::InvalidAggregatorAddress;
use crate::types::provider::Provider;
use crate::types::swap_request::SwapRequest;

// Standard interface for all aggregator facets
pub trait AggregatorAdapter: Facet {
    // Aggregator family the facet talks to
    fn provider(&self) -> Provider;

    // Aggregator contract baked into the facet at deployment
    fn aggregator(&self) -> Address;

    // Decode the swap arguments and run them through the shared proxy logic
    fn swap(
        &self,
        e: &mut Env,
        ctx: &CallContext,
        from_token_with_fee: U256,
        from_amount: U256,
        to_token_with_fee: U256,
        call_data: Bytes,
    ) -> Result<Bytes> {
        let request = SwapRequest::decode(from_token_with_fee, from_amount, to_token_with_fee, call_data)?;
        proxy::call_aggregator(e, ctx, self.provider(), self.aggregator(), request)
    }
}

// Deploy the facet of `provider` bound to `aggregator`
//
// # Arguments
//
// * `e` - The environment
// * `deployer` - Deploying account
// * `provider` - Aggregator provider
// * `aggregator` - Aggregator contract address
//
// # Errors
//
// `InvalidAggregatorAddress` if the aggregator is the zero address or has no code
pub fn deploy_adapter(e: &mut Env, deployer: Address, provider: Provider, aggregator: Address) -> Result<Address> {
    //match by provider
    let code: Rc<dyn Contract> = match provider {
        Provider::OneInch => Rc::new(OneInchFacet::new(aggregator)),
        Provider::LiFi => Rc::new(LiFiFacet::new(aggregator)),
    };
    e.create::<RouterError>(deployer, code, |e, ctx| {
        //aggregator should be a deployed contract
        if aggregator.is_zero() || !e.has_code(aggregator) {
            return Err(InvalidAggregatorAddress { aggregator }.into());
        }
        debug!(%provider, facet = %ctx.address, %aggregator, "aggregator facet deployed");
        Ok(())
    })
}
