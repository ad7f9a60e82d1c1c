// Deployment settings.
//
// Loaded from a JSON file (or string) with `DIAMOND_ROUTER_*` environment variables layered on
// top, e.g. `DIAMOND_ROUTER_FEE_RECIPIENT=0x...` overrides `fee_recipient`.

use std::path::Path;

use alloy_primitives::Address;
use ::config::{Config, ConfigBuilder, Environment, File, FileFormat};
use serde::Deserialize;

use crate::types::provider::Provider;

pub const ENV_PREFIX: &str = "DIAMOND_ROUTER";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to load configuration: {0}")]
    Load(#[from] ::config::ConfigError),
    #[error("owner must not be the zero address")]
    ZeroOwner,
    #[error("fee recipient must not be the zero address")]
    ZeroFeeRecipient,
    #[error("{0} aggregator must not be the zero address")]
    ZeroAggregator(Provider),
    #[error("at least one aggregator must be configured")]
    NoAggregators,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DiamondConfig {
    // Initial diamond owner, the only account allowed to cut
    pub owner: Address,
    // Initial fee recipient, set by the diamond initializer
    pub fee_recipient: Address,
    // 1inch aggregation router, no facet is deployed when absent
    #[serde(default)]
    pub one_inch_aggregator: Option<Address>,
    // LiFi diamond, no facet is deployed when absent
    #[serde(default)]
    pub lifi_aggregator: Option<Address>,
}

impl DiamondConfig {
    // Load and validate settings from a JSON file plus environment overrides
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        Self::build(
            Config::builder().add_source(File::from(path).format(FileFormat::Json).required(true)),
            ENV_PREFIX,
        )
    }

    // Load and validate settings from a JSON document plus environment overrides
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Self::build(
            Config::builder().add_source(File::from_str(json, FileFormat::Json)),
            ENV_PREFIX,
        )
    }

    fn build(
        builder: ConfigBuilder<::config::builder::DefaultState>,
        env_prefix: &str,
    ) -> Result<Self, ConfigError> {
        let settings: DiamondConfig = builder
            .add_source(Environment::with_prefix(env_prefix))
            .build()?
            .try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.owner.is_zero() {
            return Err(ConfigError::ZeroOwner);
        }
        if self.fee_recipient.is_zero() {
            return Err(ConfigError::ZeroFeeRecipient);
        }
        let aggregators = self.aggregators();
        if aggregators.is_empty() {
            return Err(ConfigError::NoAggregators);
        }
        if let Some((provider, _)) = aggregators.iter().find(|(_, address)| address.is_zero()) {
            return Err(ConfigError::ZeroAggregator(*provider));
        }
        Ok(())
    }

    // Configured aggregators in provider order
    pub fn aggregators(&self) -> Vec<(Provider, Address)> {
        Provider::ALL
            .into_iter()
            .filter_map(|provider| {
                let address = match provider {
                    Provider::OneInch => self.one_inch_aggregator,
                    Provider::LiFi => self.lifi_aggregator,
                };
                address.map(|address| (provider, address))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"{
        "owner": "0x00000000000000000000000000000000000000a1",
        "fee_recipient": "0x00000000000000000000000000000000000000f1",
        "one_inch_aggregator": "0x1111111254eeb25477b68fb85ed929f73a960582"
    }"#;

    fn from_json_with_prefix(json: &str, prefix: &str) -> Result<DiamondConfig, ConfigError> {
        DiamondConfig::build(
            Config::builder().add_source(File::from_str(json, FileFormat::Json)),
            prefix,
        )
    }

    #[test]
    fn loads_addresses_from_json() {
        let config = from_json_with_prefix(CONFIG, "DIAMOND_ROUTER_TEST_JSON").unwrap();
        assert_eq!(config.owner, Address::with_last_byte(0xa1));
        assert_eq!(config.fee_recipient, Address::with_last_byte(0xf1));
        assert_eq!(config.lifi_aggregator, None);
        assert_eq!(config.aggregators().len(), 1);
        assert_eq!(config.aggregators()[0].0, Provider::OneInch);
    }

    #[test]
    fn environment_overrides_file_values() {
        std::env::set_var(
            "DIAMOND_ROUTER_TEST_ENV_FEE_RECIPIENT",
            "0x00000000000000000000000000000000000000f2",
        );
        let config = from_json_with_prefix(CONFIG, "DIAMOND_ROUTER_TEST_ENV").unwrap();
        assert_eq!(config.fee_recipient, Address::with_last_byte(0xf2));
    }

    #[test]
    fn rejects_zero_addresses_and_missing_aggregators() {
        let zero_owner = CONFIG.replace("00000000000000000000000000000000000000a1", &"0".repeat(40));
        assert!(matches!(
            from_json_with_prefix(&zero_owner, "DIAMOND_ROUTER_TEST_ZERO"),
            Err(ConfigError::ZeroOwner)
        ));

        let mut config = from_json_with_prefix(CONFIG, "DIAMOND_ROUTER_TEST_ZERO").unwrap();
        config.lifi_aggregator = Some(Address::ZERO);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroAggregator(Provider::LiFi))
        ));
        config.one_inch_aggregator = None;
        config.lifi_aggregator = None;
        assert!(matches!(config.validate(), Err(ConfigError::NoAggregators)));
    }

    #[test]
    fn malformed_address_fails_to_load() {
        let broken = CONFIG.replace("0x00000000000000000000000000000000000000f1", "not-an-address");
        assert!(matches!(
            from_json_with_prefix(&broken, "DIAMOND_ROUTER_TEST_BROKEN"),
            Err(ConfigError::Load(_))
        ));
    }
}
