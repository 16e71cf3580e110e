//! # Cart Files
//!
//! Reads a cart from TOML and turns each record into a validated
//! [`CartItem`].
//!
//! ```toml
//! [[items]]
//! code = "BULK001"
//! amount = 100        # unit price in minor units
//! currency = "EUR"
//! quantity = 10
//! ```

use std::path::Path;

use rebate_core::validation::{validate_currency_code, validate_product_code};
use rebate_core::{CartItem, CoreError, Money};
use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// One `[[items]]` entry as written in the file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CartRecord {
    pub code: String,
    pub amount: i64,
    pub currency: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

impl CartRecord {
    /// Validates the record and builds the domain item.
    pub fn into_item(self) -> CliResult<CartItem> {
        validate_product_code(&self.code).map_err(CoreError::from)?;
        validate_currency_code(&self.currency).map_err(CoreError::from)?;

        Ok(CartItem::new(
            self.code,
            Money::new(self.amount, self.currency),
            self.quantity,
        )?)
    }
}

/// A whole cart file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CartFile {
    #[serde(default)]
    pub items: Vec<CartRecord>,
}

impl CartFile {
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|source| CliError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> CliResult<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Converts every record, stopping at the first invalid one.
    pub fn into_items(self) -> CliResult<Vec<CartItem>> {
        let items = self
            .items
            .into_iter()
            .map(CartRecord::into_item)
            .collect::<CliResult<Vec<_>>>()?;
        debug!(count = items.len(), "Cart loaded");
        Ok(items)
    }
}

/// Loads and validates a cart file in one step.
pub fn load_cart(path: &Path) -> CliResult<Vec<CartItem>> {
    CartFile::from_file(path)?.into_items()
}
