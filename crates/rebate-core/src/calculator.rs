//! # Discount Calculator
//!
//! Applies a resolver to every line of a cart and totals the result.
//!
//! ## Cart Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  cart: [A 100 EUR ×1, B 200 EUR ×1]      discounts: [10% off]           │
//! │                                                                         │
//! │  A ──► resolver.calculate_discount ──► 10 EUR ─┐                        │
//! │  B ──► resolver.calculate_discount ──► 20 EUR ─┼──► Money::sum ► 30 EUR │
//! │                                                 │                        │
//! │  [] ─────────────────────────────────────────────► MoneySum::Zero       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The resolver is injected, so tests and alternative selection policies can
//! swap it without touching this module.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use ts_rs::TS;

use crate::discount::Discount;
use crate::error::CoreResult;
use crate::money::{Money, MoneySum};
use crate::resolver::{BestDiscountResolver, DiscountResolver};
use crate::types::CartItem;

// =============================================================================
// Breakdown Types
// =============================================================================

/// The resolved discount for one cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct LineDiscount {
    pub code: String,
    pub quantity: i64,
    pub line_total: Money,
    pub discount: Money,
}

/// Per-line discounts plus their sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct DiscountBreakdown {
    pub lines: Vec<LineDiscount>,
    pub total: MoneySum,
}

// =============================================================================
// Calculator
// =============================================================================

/// Totals discounts over a cart using an injected [`DiscountResolver`].
#[derive(Debug, Clone)]
pub struct DiscountCalculator<R> {
    resolver: R,
}

impl<R: DiscountResolver> DiscountCalculator<R> {
    /// Creates a calculator around any resolution strategy.
    pub fn new(resolver: R) -> Self {
        DiscountCalculator { resolver }
    }

    /// Sum of the per-line discounts.
    ///
    /// ## Empty Carts
    /// An empty cart returns [`MoneySum::Zero`], which has no currency. Use
    /// [`MoneySum::or_currency`] when a `Money` is required.
    ///
    /// ## Errors
    /// [`CoreError::CurrencyMismatch`](crate::CoreError::CurrencyMismatch)
    /// when lines resolve to different currencies.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use rebate_core::{CartItem, DiscountCalculator, Money, Percentage, PercentageDiscount};
    ///
    /// let calculator = DiscountCalculator::with_discounts(vec![
    ///     Arc::new(PercentageDiscount::new(Percentage::new(10).unwrap())),
    /// ]);
    /// let cart = vec![
    ///     CartItem::new("A", Money::new(100, "EUR"), 1).unwrap(),
    ///     CartItem::new("B", Money::new(200, "EUR"), 1).unwrap(),
    /// ];
    ///
    /// let total = calculator.calculate_total_discount(&cart).unwrap();
    /// assert_eq!(total.or_currency("EUR"), Money::new(30, "EUR"));
    /// ```
    pub fn calculate_total_discount(&self, items: &[CartItem]) -> CoreResult<MoneySum> {
        let total = Money::sum(items.iter().map(|item| self.line_discount(item)))?;
        debug!(lines = items.len(), total = %total, "Cart discount calculated");
        Ok(total)
    }

    /// Per-line discounts along with their total.
    pub fn calculate_breakdown(&self, items: &[CartItem]) -> CoreResult<DiscountBreakdown> {
        let mut lines = Vec::with_capacity(items.len());
        let mut total = MoneySum::Zero;

        for item in items {
            let discount = self.line_discount(item);
            total = total.checked_add(discount.clone())?;
            lines.push(LineDiscount {
                code: item.code().to_string(),
                quantity: item.quantity(),
                line_total: item.total_price(),
                discount,
            });
        }

        debug!(lines = lines.len(), total = %total, "Cart breakdown calculated");
        Ok(DiscountBreakdown { lines, total })
    }

    fn line_discount(&self, item: &CartItem) -> Money {
        let discount = self.resolver.calculate_discount(item);
        debug!(code = item.code(), discount = %discount, "Line discount resolved");
        discount
    }
}

impl DiscountCalculator<BestDiscountResolver> {
    /// Calculator using the best-single-discount strategy.
    pub fn with_discounts(discounts: Vec<Arc<dyn Discount>>) -> Self {
        DiscountCalculator::new(BestDiscountResolver::new(discounts))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
