//! # Discounts
//!
//! Discount variants and the shared evaluation contract.
//!
//! ## Evaluation Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Discount::calculate(cart_item)                         │
//! │                                                                         │
//! │  1. is_eligible?  ── AND over all conditions (empty list = true)       │
//! │        │ no ───────────────────────────────────────────► None          │
//! │        ▼ yes                                                            │
//! │  2. raw_amount    ── variant-specific (fixed / percentage / ...)       │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  3. currency guard ── raw currency == line currency?                   │
//! │        │ no ───────────────────────────────────────────► None          │
//! │        ▼ yes                                                            │
//! │     Some(amount)                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `None` means the discount does not apply at all, which is different from a
//! discount that applies and happens to be worth zero.

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::condition::DiscountCondition;
use crate::money::Money;
use crate::types::{CartItem, Percentage};

/// Conditions shared between discounts. Immutable once built.
pub type ConditionList = Vec<Arc<dyn DiscountCondition>>;

// =============================================================================
// Discount Trait
// =============================================================================

/// A discount rule that may apply to a cart line.
///
/// Implementors provide the conditions and the raw amount; eligibility and the
/// currency guard come from the provided methods. New discount kinds (e.g.
/// buy-X-get-Y) implement this trait and plug into any resolver unchanged.
pub trait Discount: fmt::Debug + Send + Sync {
    /// Conditions that must all hold for the discount to apply.
    fn conditions(&self) -> &[Arc<dyn DiscountCondition>];

    /// Variant-specific amount, computed without eligibility or currency
    /// checks.
    fn raw_amount(&self, item: &CartItem) -> Money;

    /// Short human-readable description, e.g. `"10% off"`.
    fn describe(&self) -> String;

    /// AND over [`Discount::conditions`]; vacuously true when there are none.
    fn is_eligible(&self, item: &CartItem) -> bool {
        self.conditions().iter().all(|c| c.is_eligible(item))
    }

    /// The discount for `item`, or `None` when ineligible, when the raw
    /// amount is in a different currency than the line, or when it is
    /// negative. A returned amount is never below zero.
    fn calculate(&self, item: &CartItem) -> Option<Money> {
        if !self.is_eligible(item) {
            return None;
        }

        let amount = self.raw_amount(item);
        if amount.currency() != item.currency() {
            trace!(
                code = item.code(),
                discount_currency = amount.currency(),
                line_currency = item.currency(),
                "Discount currency differs from line, skipping"
            );
            return None;
        }

        if amount.is_negative() {
            trace!(
                code = item.code(),
                amount = amount.amount(),
                "Negative discount amount, skipping"
            );
            return None;
        }

        Some(amount)
    }
}

/// Renders the `" if a and b"` suffix used by `describe`.
fn describe_conditions(conditions: &[Arc<dyn DiscountCondition>]) -> String {
    if conditions.is_empty() {
        return String::new();
    }

    let parts: Vec<String> = conditions.iter().map(|c| c.describe()).collect();
    format!(" if {}", parts.join(" and "))
}

// =============================================================================
// Fixed Amount
// =============================================================================

/// Takes a fixed amount off the line, regardless of price or quantity.
#[derive(Debug, Clone)]
pub struct FixedAmountDiscount {
    amount: Money,
    conditions: ConditionList,
}

impl FixedAmountDiscount {
    pub fn new(amount: Money) -> Self {
        FixedAmountDiscount {
            amount,
            conditions: Vec::new(),
        }
    }

    /// Adds one condition (builder style).
    pub fn with_condition(mut self, condition: impl DiscountCondition + 'static) -> Self {
        self.conditions.push(Arc::new(condition));
        self
    }

    /// Adds already-shared conditions (builder style).
    pub fn with_conditions(mut self, conditions: ConditionList) -> Self {
        self.conditions.extend(conditions);
        self
    }
}

impl Discount for FixedAmountDiscount {
    fn conditions(&self) -> &[Arc<dyn DiscountCondition>] {
        &self.conditions
    }

    fn raw_amount(&self, _item: &CartItem) -> Money {
        self.amount.clone()
    }

    fn describe(&self) -> String {
        format!("{} off{}", self.amount, describe_conditions(&self.conditions))
    }
}

// =============================================================================
// Percentage
// =============================================================================

/// Takes a percentage of the *unit* price off the line.
///
/// ## Rounding
/// ```text
/// unit price 99, 15%  →  99 × 15 / 100 = 14.85  →  14
/// ```
/// Truncation always favours the merchant by less than one minor unit.
#[derive(Debug, Clone)]
pub struct PercentageDiscount {
    percentage: Percentage,
    conditions: ConditionList,
}

impl PercentageDiscount {
    pub fn new(percentage: Percentage) -> Self {
        PercentageDiscount {
            percentage,
            conditions: Vec::new(),
        }
    }

    /// Adds one condition (builder style).
    pub fn with_condition(mut self, condition: impl DiscountCondition + 'static) -> Self {
        self.conditions.push(Arc::new(condition));
        self
    }

    /// Adds already-shared conditions (builder style).
    pub fn with_conditions(mut self, conditions: ConditionList) -> Self {
        self.conditions.extend(conditions);
        self
    }
}

impl Discount for PercentageDiscount {
    fn conditions(&self) -> &[Arc<dyn DiscountCondition>] {
        &self.conditions
    }

    fn raw_amount(&self, item: &CartItem) -> Money {
        let price = item.unit_price();
        Money::new(self.percentage.of_amount(price.amount()), price.currency())
    }

    fn describe(&self) -> String {
        format!(
            "{} off{}",
            self.percentage,
            describe_conditions(&self.conditions)
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
