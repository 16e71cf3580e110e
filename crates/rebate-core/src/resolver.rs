//! # Discount Resolution
//!
//! Decides which single discount applies to a cart line.
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │            DiscountResolver::calculate_discount(cart_item)              │
//! │                                                                         │
//! │  resolve(cart_item)  ← strategy-specific (e.g. best single discount)   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  cap: amount > line total?  ── yes ──► line total                      │
//! │        │ no                                                             │
//! │        ▼                                                                │
//! │     amount                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The cap lives in the provided method so every strategy gets it for free.
//! Discounts never stack: a strategy returns exactly one amount per line.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::discount::Discount;
use crate::money::Money;
use crate::types::CartItem;

// =============================================================================
// Resolver Trait
// =============================================================================

/// A strategy for turning a set of discounts into one amount per cart line.
pub trait DiscountResolver: Send + Sync {
    /// Strategy-specific discount for `item`, before the cap is applied.
    ///
    /// Must return an amount in the line's currency.
    fn resolve(&self, item: &CartItem) -> Money;

    /// Discount for `item`, never more than the line's total price.
    fn calculate_discount(&self, item: &CartItem) -> Money {
        let amount = self.resolve(item);
        let line_total = item.total_price();

        if amount.amount() > line_total.amount() {
            debug!(
                code = item.code(),
                resolved = amount.amount(),
                line_total = line_total.amount(),
                "Discount capped at line total"
            );
            return line_total;
        }

        amount
    }
}

impl<R: DiscountResolver + ?Sized> DiscountResolver for Box<R> {
    fn resolve(&self, item: &CartItem) -> Money {
        (**self).resolve(item)
    }

    fn calculate_discount(&self, item: &CartItem) -> Money {
        (**self).calculate_discount(item)
    }
}

impl<R: DiscountResolver + ?Sized> DiscountResolver for Arc<R> {
    fn resolve(&self, item: &CartItem) -> Money {
        (**self).resolve(item)
    }

    fn calculate_discount(&self, item: &CartItem) -> Money {
        (**self).calculate_discount(item)
    }
}

// =============================================================================
// Best Discount Strategy
// =============================================================================

/// Applies the single highest-value eligible discount.
///
/// ## Tie-Break
/// Discounts are scanned in list order and a candidate replaces the current
/// best only when it is *strictly* greater. The first discount to reach the
/// maximum wins; reordering the list can change which discount is selected,
/// never the amount.
#[derive(Debug, Clone, Default)]
pub struct BestDiscountResolver {
    discounts: Vec<Arc<dyn Discount>>,
}

impl BestDiscountResolver {
    pub fn new(discounts: Vec<Arc<dyn Discount>>) -> Self {
        BestDiscountResolver { discounts }
    }

    /// Index and amount of the winning discount, or `None` when nothing
    /// beats zero. The amount is uncapped.
    ///
    /// ## Example
    /// ```rust
    /// use std::sync::Arc;
    /// use rebate_core::discount::{Discount, FixedAmountDiscount};
    /// use rebate_core::money::Money;
    /// use rebate_core::resolver::BestDiscountResolver;
    /// use rebate_core::types::CartItem;
    ///
    /// let discounts: Vec<Arc<dyn Discount>> = vec![
    ///     Arc::new(FixedAmountDiscount::new(Money::new(20, "USD"))),
    ///     Arc::new(FixedAmountDiscount::new(Money::new(20, "USD"))),
    /// ];
    /// let resolver = BestDiscountResolver::new(discounts);
    /// let item = CartItem::new("X", Money::new(100, "USD"), 1).unwrap();
    ///
    /// // First of two equal discounts wins
    /// assert_eq!(resolver.best_match(&item), Some((0, Money::new(20, "USD"))));
    /// ```
    pub fn best_match(&self, item: &CartItem) -> Option<(usize, Money)> {
        let mut best: Option<(usize, Money)> = None;
        let mut best_amount = 0;

        for (index, discount) in self.discounts.iter().enumerate() {
            let Some(candidate) = discount.calculate(item) else {
                continue;
            };

            trace!(
                code = item.code(),
                index,
                amount = candidate.amount(),
                "Eligible discount"
            );

            if candidate.amount() > best_amount {
                best_amount = candidate.amount();
                best = Some((index, candidate));
            }
        }

        best
    }
}

impl DiscountResolver for BestDiscountResolver {
    fn resolve(&self, item: &CartItem) -> Money {
        match self.best_match(item) {
            Some((_, amount)) => amount,
            None => Money::zero(item.currency()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
