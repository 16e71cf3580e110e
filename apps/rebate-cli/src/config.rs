//! # CLI Configuration
//!
//! Settings and discount rules for the `rebate` binary.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     REBATE_CURRENCY=USD                                                │
//! │     REBATE_STRATEGY=best                                               │
//! │     REBATE_VERBOSE=1                                                   │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --rules <PATH>, or                                                 │
//! │     ~/.config/rebate/rebate.toml (Linux)                               │
//! │     ~/Library/Application Support/com.rebate.rebate/rebate.toml (macOS)│
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     EUR, best strategy, no discounts                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [settings]
//! default_currency = "EUR"   # reported for empty carts
//! verbose = false
//!
//! [rules]
//! strategy = "best"
//!
//! [[rules.discounts]]
//! kind = "fixed_amount"
//! amount = 200
//! currency = "EUR"
//! conditions = [
//!   { kind = "product_code", codes = ["BULK001"] },
//!   { kind = "min_quantity", min_quantity = 5 },
//! ]
//!
//! [[rules.discounts]]
//! kind = "percentage"
//! percentage = 10
//! ```

use std::path::{Path, PathBuf};

use rebate_core::validation::validate_currency_code;
use rebate_core::RuleBook;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CliError, CliResult};

// =============================================================================
// Settings
// =============================================================================

/// General CLI behavior.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Currency reported when a cart is empty and the total has none.
    #[serde(default = "default_currency")]
    pub default_currency: String,

    /// Enable debug logging for rebate crates.
    #[serde(default)]
    pub verbose: bool,
}

fn default_currency() -> String {
    "EUR".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            default_currency: default_currency(),
            verbose: false,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebateConfig {
    #[serde(default)]
    pub settings: Settings,

    /// Discount rules and resolution strategy.
    #[serde(default)]
    pub rules: RuleBook,
}

impl RebateConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (`rebate.toml`)
    /// 3. Environment variables
    ///
    /// An explicitly given path must exist; the default path is optional.
    pub fn load(config_path: Option<PathBuf>) -> CliResult<Self> {
        let mut config = Self::default();

        match config_path {
            Some(path) => {
                config = Self::from_file(&path)?;
            }
            None => match Self::default_config_path() {
                Some(path) if path.exists() => {
                    config = Self::from_file(&path)?;
                }
                Some(path) => {
                    debug!(?path, "Config file not found, using defaults");
                }
                None => {
                    warn!("No config directory available, using defaults");
                }
            },
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Reads and parses one TOML file.
    pub fn from_file(path: &Path) -> CliResult<Self> {
        info!(?path, "Loading rebate config from file");
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parses a TOML document.
    pub fn from_toml_str(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> CliResult<()> {
        validate_currency_code(&self.settings.default_currency).map_err(|e| {
            CliError::InvalidConfig(format!("settings.default_currency: {e}"))
        })?;

        self.rules.validate()?;

        Ok(())
    }

    /// Applies `REBATE_*` environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    /// Applies overrides from any key lookup (the environment in production).
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(currency) = lookup("REBATE_CURRENCY") {
            debug!(currency = %currency, "Overriding default currency from environment");
            self.settings.default_currency = currency;
        }

        if let Some(strategy) = lookup("REBATE_STRATEGY") {
            debug!(strategy = %strategy, "Overriding resolution strategy from environment");
            self.rules.strategy = strategy;
        }

        if let Some(verbose) = lookup("REBATE_VERBOSE") {
            match verbose.to_lowercase().as_str() {
                "1" | "true" | "yes" => self.settings.verbose = true,
                "0" | "false" | "no" => self.settings.verbose = false,
                _ => warn!(value = %verbose, "Unknown REBATE_VERBOSE value"),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "rebate", "rebate")
            .map(|dirs| dirs.config_dir().join("rebate.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rebate_core::{DiscountRule, ResolutionStrategy};
    use std::collections::HashMap;

    const SAMPLE: &str = r#"
        [settings]
        default_currency = "USD"

        [rules]
        strategy = "best"

        [[rules.discounts]]
        kind = "fixed_amount"
        amount = 200
        currency = "USD"
        conditions = [
          { kind = "product_code", codes = ["BULK001"] },
          { kind = "min_quantity", min_quantity = 5 },
        ]

        [[rules.discounts]]
        kind = "percentage"
        percentage = 10
    "#;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = RebateConfig::default();
        assert_eq!(config.settings.default_currency, "EUR");
        assert!(!config.settings.verbose);
        assert!(config.rules.discounts.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_toml() {
        let config = RebateConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.settings.default_currency, "USD");
        assert_eq!(config.rules.strategy().unwrap(), ResolutionStrategy::Best);
        assert_eq!(config.rules.discounts.len(), 2);
        assert!(matches!(
            config.rules.discounts[1],
            DiscountRule::Percentage { .. }
        ));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = RebateConfig::from_toml_str("").unwrap();
        assert_eq!(config, RebateConfig::default());
    }

    #[test]
    fn test_invalid_percentage_fails_parse() {
        let result = RebateConfig::from_toml_str(
            r#"
            [[rules.discounts]]
            kind = "percentage"
            percentage = 150
            "#,
        );
        assert!(matches!(result, Err(CliError::Toml(_))));
    }

    #[test]
    fn test_overrides() {
        let mut config = RebateConfig::from_toml_str(SAMPLE).unwrap();
        config.apply_overrides(lookup(&[
            ("REBATE_CURRENCY", "GBP"),
            ("REBATE_VERBOSE", "true"),
        ]));
        assert_eq!(config.settings.default_currency, "GBP");
        assert!(config.settings.verbose);
        assert_eq!(config.rules.strategy, "best");
    }

    #[test]
    fn test_unknown_strategy_fails_validation() {
        let mut config = RebateConfig::default();
        config.apply_overrides(lookup(&[("REBATE_STRATEGY", "stack_all")]));
        assert!(matches!(
            config.validate(),
            Err(CliError::Core(rebate_core::CoreError::UnimplementedVariant { .. }))
        ));
    }

    #[test]
    fn test_invalid_currency_fails_validation() {
        let mut config = RebateConfig::default();
        config.settings.default_currency = "euro".to_string();
        assert!(matches!(config.validate(), Err(CliError::InvalidConfig(_))));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let result = RebateConfig::load(Some(PathBuf::from("/nonexistent/rebate.toml")));
        assert!(matches!(result, Err(CliError::ReadFailed { .. })));
    }

    #[test]
    fn test_toml_serialization() {
        let config = RebateConfig::from_toml_str(SAMPLE).unwrap();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[settings]"));
        assert_eq!(RebateConfig::from_toml_str(&toml_str).unwrap(), config);
    }
}
