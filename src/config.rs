// 7.0 config.rs: indexer settings. collateral precision, placeholder policy, log level.
// 7.1 from_env reads STATS_* variables; anything unset keeps its default.

use serde::{Deserialize, Serialize};

use crate::scale::{CollateralScale, MAX_DECIMALS};

pub const ENV_COLLATERAL_DECIMALS: &str = "STATS_COLLATERAL_DECIMALS";
pub const ENV_RECONCILE_PLACEHOLDERS: &str = "STATS_RECONCILE_PLACEHOLDERS";
pub const ENV_LOG_LEVEL: &str = "LOG_LEVEL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexerConfig {
    // Decimals of the collateral token (USDC = 6)
    pub collateral_decimals: u32,
    // Let TokenRegistered overwrite an "unknown" condition left by an early fill
    pub reconcile_placeholders: bool,
    // Default tracing filter when RUST_LOG is unset
    pub log_level: String,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            collateral_decimals: CollateralScale::USDC.decimals(),
            reconcile_placeholders: false,
            log_level: "info".to_string(),
        }
    }
}

impl IndexerConfig {
    // Preset that repairs placeholder market data once the token is registered
    pub fn reconciling() -> Self {
        Self {
            reconcile_placeholders: true,
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // split out so tests don't touch the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_COLLATERAL_DECIMALS) {
            config.collateral_decimals = raw.trim().parse().map_err(|_| ConfigError::InvalidVar {
                name: ENV_COLLATERAL_DECIMALS,
                value: raw.clone(),
            })?;
        }

        if let Some(raw) = lookup(ENV_RECONCILE_PLACEHOLDERS) {
            config.reconcile_placeholders = match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" => false,
                _ => {
                    return Err(ConfigError::InvalidVar {
                        name: ENV_RECONCILE_PLACEHOLDERS,
                        value: raw.clone(),
                    })
                }
            };
        }

        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            config.log_level = level;
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.collateral_decimals > MAX_DECIMALS {
            return Err(ConfigError::InvalidDecimals {
                decimals: self.collateral_decimals,
                max: MAX_DECIMALS,
            });
        }
        Ok(())
    }

    pub fn collateral_scale(&self) -> Result<CollateralScale, ConfigError> {
        CollateralScale::new(self.collateral_decimals).ok_or(ConfigError::InvalidDecimals {
            decimals: self.collateral_decimals,
            max: MAX_DECIMALS,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Collateral decimals {decimals} above maximum {max}")]
    InvalidDecimals { decimals: u32, max: u32 },

    #[error("Invalid value for {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn default_config_valid() {
        let config = IndexerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.collateral_decimals, 6);
        assert!(!config.reconcile_placeholders);
        assert_eq!(config.collateral_scale().unwrap(), CollateralScale::USDC);
    }

    #[test]
    fn reconciling_preset() {
        let config = IndexerConfig::reconciling();
        assert!(config.reconcile_placeholders);
        assert_eq!(config.collateral_decimals, 6);
    }

    #[test]
    fn env_overrides() {
        let config = IndexerConfig::from_lookup(lookup(&[
            (ENV_COLLATERAL_DECIMALS, "18"),
            (ENV_RECONCILE_PLACEHOLDERS, "true"),
            (ENV_LOG_LEVEL, "debug"),
        ]))
        .unwrap();

        assert_eq!(config.collateral_decimals, 18);
        assert!(config.reconcile_placeholders);
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn empty_env_is_default() {
        let config = IndexerConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, IndexerConfig::default());
    }

    #[test]
    fn bad_env_values_rejected() {
        let result = IndexerConfig::from_lookup(lookup(&[(ENV_COLLATERAL_DECIMALS, "six")]));
        assert!(matches!(result, Err(ConfigError::InvalidVar { .. })));

        let result = IndexerConfig::from_lookup(lookup(&[(ENV_RECONCILE_PLACEHOLDERS, "maybe")]));
        assert!(matches!(result, Err(ConfigError::InvalidVar { .. })));

        let result = IndexerConfig::from_lookup(lookup(&[(ENV_COLLATERAL_DECIMALS, "40")]));
        assert!(matches!(result, Err(ConfigError::InvalidDecimals { decimals: 40, .. })));
    }

    #[test]
    fn config_serialization() {
        let config = IndexerConfig::reconciling();
        let json = serde_json::to_string(&config).unwrap();
        let back: IndexerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
