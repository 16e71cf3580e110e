//! # Rule Books
//!
//! Discount rules described as data, and their conversion into live
//! discounts and resolvers.
//!
//! ## From Data to Behavior
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  rebate.toml / rules.json                                               │
//! │        │  serde                                                         │
//! │        ▼                                                                │
//! │  RuleBook { strategy: "best", discounts: [DiscountRule, ...] }          │
//! │        │  build_discounts()          │  strategy()                      │
//! │        ▼                             ▼                                  │
//! │  Vec<Arc<dyn Discount>>  ──────►  ResolutionStrategy::build            │
//! │                                      │                                  │
//! │                                      ▼                                  │
//! │                          DiscountCalculator<Box<dyn DiscountResolver>>  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## JSON Shape
//! ```json
//! {
//!   "strategy": "best",
//!   "discounts": [
//!     { "kind": "fixed_amount", "amount": 200, "currency": "EUR",
//!       "conditions": [
//!         { "kind": "product_code", "codes": ["BULK001"] },
//!         { "kind": "min_quantity", "min_quantity": 5 }
//!       ] },
//!     { "kind": "percentage", "percentage": 10 }
//!   ]
//! }
//! ```

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculator::DiscountCalculator;
use crate::condition::{DiscountCondition, MinQuantityCondition, ProductCodeCondition};
use crate::discount::{ConditionList, Discount, FixedAmountDiscount, PercentageDiscount};
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::resolver::{BestDiscountResolver, DiscountResolver};
use crate::types::Percentage;
use crate::validation::{
    validate_currency_code, validate_discount_amount, validate_product_code,
};

// =============================================================================
// Resolution Strategy
// =============================================================================

/// Named resolution strategies a rule book can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolutionStrategy {
    /// Highest single eligible discount, first one wins ties.
    #[default]
    Best,
}

impl ResolutionStrategy {
    /// Builds the resolver for this strategy over `discounts`.
    pub fn build(self, discounts: Vec<Arc<dyn Discount>>) -> Box<dyn DiscountResolver> {
        match self {
            ResolutionStrategy::Best => Box::new(BestDiscountResolver::new(discounts)),
        }
    }
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResolutionStrategy::Best => write!(f, "best"),
        }
    }
}

impl FromStr for ResolutionStrategy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "best" | "best_discount" => Ok(ResolutionStrategy::Best),
            other => Err(CoreError::UnimplementedVariant {
                kind: "resolution strategy",
                name: other.to_string(),
            }),
        }
    }
}

// =============================================================================
// Rule Types
// =============================================================================

/// Serialized form of a [`DiscountCondition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConditionRule {
    /// See [`MinQuantityCondition`].
    MinQuantity { min_quantity: i64 },
    /// See [`ProductCodeCondition`].
    ProductCode { codes: BTreeSet<String> },
}

impl ConditionRule {
    pub fn build(&self) -> Arc<dyn DiscountCondition> {
        match self {
            ConditionRule::MinQuantity { min_quantity } => {
                Arc::new(MinQuantityCondition::new(*min_quantity))
            }
            ConditionRule::ProductCode { codes } => {
                Arc::new(ProductCodeCondition::new(codes.iter().cloned()))
            }
        }
    }

    fn validate(&self) -> CoreResult<()> {
        if let ConditionRule::ProductCode { codes } = self {
            for code in codes {
                validate_product_code(code)?;
            }
        }
        Ok(())
    }
}

/// Serialized form of a [`Discount`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscountRule {
    /// See [`FixedAmountDiscount`].
    FixedAmount {
        amount: i64,
        currency: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        conditions: Vec<ConditionRule>,
    },
    /// See [`PercentageDiscount`].
    Percentage {
        percentage: Percentage,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        conditions: Vec<ConditionRule>,
    },
}

impl DiscountRule {
    pub fn conditions(&self) -> &[ConditionRule] {
        match self {
            DiscountRule::FixedAmount { conditions, .. }
            | DiscountRule::Percentage { conditions, .. } => conditions,
        }
    }

    pub fn build(&self) -> Arc<dyn Discount> {
        let conditions: ConditionList = self.conditions().iter().map(ConditionRule::build).collect();

        match self {
            DiscountRule::FixedAmount {
                amount, currency, ..
            } => Arc::new(
                FixedAmountDiscount::new(Money::new(*amount, currency.as_str()))
                    .with_conditions(conditions),
            ),
            DiscountRule::Percentage { percentage, .. } => {
                Arc::new(PercentageDiscount::new(*percentage).with_conditions(conditions))
            }
        }
    }

    fn validate(&self) -> CoreResult<()> {
        if let DiscountRule::FixedAmount {
            amount, currency, ..
        } = self
        {
            validate_discount_amount(*amount)?;
            validate_currency_code(currency)?;
        }
        self.conditions().iter().try_for_each(ConditionRule::validate)
    }
}

// =============================================================================
// Rule Book
// =============================================================================

fn default_strategy() -> String {
    ResolutionStrategy::default().to_string()
}

/// A complete set of discount rules plus the strategy that arbitrates them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBook {
    /// Strategy name, parsed by [`RuleBook::strategy`].
    #[serde(default = "default_strategy")]
    pub strategy: String,

    /// Discount rules in evaluation order. Order matters for tie-breaks.
    #[serde(default)]
    pub discounts: Vec<DiscountRule>,
}

impl Default for RuleBook {
    fn default() -> Self {
        RuleBook {
            strategy: default_strategy(),
            discounts: Vec::new(),
        }
    }
}

impl RuleBook {
    /// Parses a rule book from JSON.
    pub fn from_json(json: &str) -> CoreResult<Self> {
        serde_json::from_str(json).map_err(|e| CoreError::InvalidRuleBook(e.to_string()))
    }

    /// The configured strategy.
    ///
    /// ## Errors
    /// [`CoreError::UnimplementedVariant`] for an unknown strategy name.
    pub fn strategy(&self) -> CoreResult<ResolutionStrategy> {
        self.strategy.parse()
    }

    /// Checks strategy, currency codes and product codes.
    pub fn validate(&self) -> CoreResult<()> {
        self.strategy()?;
        self.discounts.iter().try_for_each(DiscountRule::validate)
    }

    /// Live discounts, in rule order.
    pub fn build_discounts(&self) -> Vec<Arc<dyn Discount>> {
        self.discounts.iter().map(DiscountRule::build).collect()
    }

    /// Resolver for the configured strategy.
    pub fn build_resolver(&self) -> CoreResult<Box<dyn DiscountResolver>> {
        let strategy = self.strategy()?;
        debug!(%strategy, rules = self.discounts.len(), "Building discount resolver");
        Ok(strategy.build(self.build_discounts()))
    }

    /// Calculator for the configured strategy.
    pub fn build_calculator(&self) -> CoreResult<DiscountCalculator<Box<dyn DiscountResolver>>> {
        Ok(DiscountCalculator::new(self.build_resolver()?))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
