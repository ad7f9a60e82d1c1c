use alloy_primitives::{Bytes, Selector};
use alloy_sol_types::{SolInterface, SolValue};

use super::{decode_calldata, enforce_non_payable, interface_selectors, lib_diamond, Facet};
use crate::env::{CallContext, CallResult, Contract, Env};
use crate::extensions::env_extensions::EnvExtensions;
use crate::types::error::Result;
use crate::types::interfaces::IDiamondLoupe::{self, IDiamondLoupeCalls};
use crate::types::interfaces::IERC165::IERC165Calls;

// Read-only introspection of the selector registry plus ERC-165
#[derive(Debug, Default, Clone, Copy)]
pub struct DiamondLoupeFacet;

impl DiamondLoupeFacet {
    fn loupe(e: &Env, ctx: &CallContext, call: IDiamondLoupeCalls) -> Bytes {
        let diamond = ctx.address;
        match call {
            IDiamondLoupeCalls::facets(_) => {
                let facets: Vec<IDiamondLoupe::Facet> = lib_diamond::facet_addresses(e, diamond)
                    .into_iter()
                    .map(|facet| IDiamondLoupe::Facet {
                        facetAddress: facet,
                        functionSelectors: lib_diamond::facet_function_selectors(e, diamond, facet),
                    })
                    .collect();
                facets.abi_encode().into()
            }
            IDiamondLoupeCalls::facetFunctionSelectors(call) => {
                lib_diamond::facet_function_selectors(e, diamond, call.facet)
                    .abi_encode()
                    .into()
            }
            IDiamondLoupeCalls::facetAddresses(_) => {
                lib_diamond::facet_addresses(e, diamond).abi_encode().into()
            }
            IDiamondLoupeCalls::facetAddress(call) => {
                lib_diamond::facet_address(e, diamond, call.functionSelector)
                    .abi_encode()
                    .into()
            }
        }
    }

    fn dispatch(e: &Env, ctx: &CallContext, input: &[u8]) -> Result<Bytes> {
        enforce_non_payable(ctx)?;
        if input.len() >= 4 && IERC165Calls::valid_selector([input[0], input[1], input[2], input[3]]) {
            let IERC165Calls::supportsInterface(call) = decode_calldata::<IERC165Calls>(input)?;
            return Ok(e
                .supports_interface(ctx.address, call.interfaceId)
                .abi_encode()
                .into());
        }
        Ok(Self::loupe(e, ctx, decode_calldata(input)?))
    }
}

impl Contract for DiamondLoupeFacet {
    fn name(&self) -> &'static str {
        "DiamondLoupeFacet"
    }

    fn execute(&self, e: &mut Env, ctx: &CallContext, input: &[u8]) -> CallResult {
        Ok(Self::dispatch(e, ctx, input)?)
    }
}

impl Facet for DiamondLoupeFacet {
    fn selectors(&self) -> Vec<Selector> {
        let mut selectors = interface_selectors::<IDiamondLoupeCalls>();
        selectors.extend(interface_selectors::<IERC165Calls>());
        selectors
    }
}
