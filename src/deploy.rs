use std::rc::Rc;

use alloy_primitives::{Address, U256};
use alloy_sol_types::SolCall;
use serde::Serialize;
use tracing::info;

use crate::adapters::adapter::deploy_adapter;
use crate::config::DiamondConfig;
use crate::diamond::{
    add_cut, cut_facet::DiamondCutFacet, init::DiamondInit, loupe_facet::DiamondLoupeFacet,
    ownership_facet::OwnershipFacet, Facet,
};
use crate::env::Env;
use crate::fees::fee_collector::FeeCollectorFacet;
use crate::types::error::{Result, RouterError};
use crate::types::facet_cut::{facet_cut, FacetCutAction};
use crate::types::interfaces::{IDiamondCut, IDiamondInit};
use crate::types::provider::Provider;
use crate::Diamond;

// Addresses of a deployed diamond and its facets, serializable as a deployment record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiamondDeployment {
    pub diamond: Address,
    pub diamond_cut_facet: Address,
    pub diamond_loupe_facet: Address,
    pub ownership_facet: Address,
    pub fee_collector_facet: Address,
    pub diamond_init: Address,
    // Aggregator facets in provider order
    pub aggregator_facets: Vec<(Provider, Address)>,
}

impl DiamondDeployment {
    pub fn aggregator_facet(&self, provider: Provider) -> Option<Address> {
        self.aggregator_facets
            .iter()
            .find(|(p, _)| *p == provider)
            .map(|(_, facet)| *facet)
    }
}

// Deploy every facet, the diamond and the initializer, then wire them in one owner cut
//
// # Arguments
//
// * `e` - The environment
// * `deployer` - Account paying for the deployments
// * `config` - Validated deployment settings
//
// # Errors
//
// Fails if any deployment fails or the initial cut reverts
pub fn deploy_diamond(e: &mut Env, deployer: Address, config: &DiamondConfig) -> Result<DiamondDeployment> {
    let diamond_cut_facet = deploy_facet(e, deployer, DiamondCutFacet)?;
    let diamond = Diamond::deploy(e, deployer, config.owner, diamond_cut_facet)?;

    let diamond_loupe_facet = deploy_facet(e, deployer, DiamondLoupeFacet)?;
    let ownership_facet = deploy_facet(e, deployer, OwnershipFacet)?;
    let fee_collector_facet = deploy_facet(e, deployer, FeeCollectorFacet)?;
    let diamond_init = e.create::<RouterError>(deployer, Rc::new(DiamondInit), |_, _| Ok(()))?;

    let mut cuts = vec![
        add_cut(diamond_loupe_facet, &DiamondLoupeFacet),
        add_cut(ownership_facet, &OwnershipFacet),
        add_cut(fee_collector_facet, &FeeCollectorFacet),
    ];
    let mut aggregator_facets = Vec::new();
    for (provider, aggregator) in config.aggregators() {
        let facet = deploy_adapter(e, deployer, provider, aggregator)?;
        cuts.push(facet_cut(facet, FacetCutAction::Add, vec![provider.swap_selector()]));
        aggregator_facets.push((provider, facet));
    }

    let init_calldata = IDiamondInit::initCall {
        feeRecipient: config.fee_recipient,
    }
    .abi_encode();
    let cut = IDiamondCut::diamondCutCall {
        cuts,
        init: diamond_init,
        initCalldata: init_calldata.into(),
    };
    e.transact(config.owner, diamond, U256::ZERO, &cut.abi_encode())?;

    info!(
        %diamond,
        owner = %config.owner,
        fee_recipient = %config.fee_recipient,
        aggregators = aggregator_facets.len(),
        "diamond deployed"
    );
    Ok(DiamondDeployment {
        diamond,
        diamond_cut_facet,
        diamond_loupe_facet,
        ownership_facet,
        fee_collector_facet,
        diamond_init,
        aggregator_facets,
    })
}

// Deploy a facet without constructor logic
pub fn deploy_facet<F: Facet + 'static>(e: &mut Env, deployer: Address, facet: F) -> Result<Address> {
    e.create::<RouterError>(deployer, Rc::new(facet), |_, _| Ok(()))
}

