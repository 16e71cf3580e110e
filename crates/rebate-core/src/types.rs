//! # Domain Types
//!
//! Value types that discounts are evaluated against.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────────────────────────┐         │
//! │  │   Percentage    │   │             CartItem                │         │
//! │  │  ─────────────  │   │  ─────────────────────────────────  │         │
//! │  │  value (0-100)  │   │  code         "BULK001"             │         │
//! │  │  15 = 15%       │   │  unit_price   Money(100, "EUR")     │         │
//! │  └─────────────────┘   │  quantity     10                    │         │
//! │                        │  total_price  Money(1000, "EUR")    │         │
//! │                        └─────────────────────────────────────┘         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both types are immutable after construction; every field is private and
//! exposed through accessors only.

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::{validate_price, validate_quantity};

// =============================================================================
// Percentage
// =============================================================================

/// A whole-number percentage in the inclusive range `0..=100`.
///
/// Deserialization goes through the same range check as [`Percentage::new`],
/// so an out-of-range value in a rule book is rejected at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct Percentage(u8);

impl Percentage {
    /// Largest accepted value.
    pub const MAX: u8 = 100;

    /// Creates a percentage, rejecting values outside `0..=100`.
    ///
    /// ## Example
    /// ```rust
    /// use rebate_core::types::Percentage;
    ///
    /// assert_eq!(Percentage::new(15).unwrap().value(), 15);
    /// assert!(Percentage::new(101).is_err());
    /// assert!(Percentage::new(-1).is_err());
    /// ```
    pub fn new(value: i64) -> CoreResult<Self> {
        if !(0..=i64::from(Self::MAX)).contains(&value) {
            return Err(CoreError::InvalidPercentage { value });
        }

        Ok(Percentage(value as u8))
    }

    /// Returns the percentage as a whole number (15 = 15%).
    #[inline]
    pub const fn value(&self) -> u8 {
        self.0
    }

    /// Applies the percentage to an amount, truncating to whole minor units.
    ///
    /// `floor(amount * value / 100)`: 15% of 99 is 14.85, which yields 14.
    #[inline]
    pub fn of_amount(&self, amount: i64) -> i64 {
        // i128 keeps the intermediate product from overflowing
        (i128::from(amount) * i128::from(self.0)).div_euclid(100) as i64
    }
}

impl TryFrom<i64> for Percentage {
    type Error = CoreError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Percentage::new(value)
    }
}

impl From<Percentage> for i64 {
    fn from(percentage: Percentage) -> Self {
        i64::from(percentage.0)
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// One priced, quantified product line in a cart.
///
/// ## Invariants
/// - `quantity >= 0`
/// - `unit_price.amount() >= 0`
///
/// Together these keep [`CartItem::total_price`] non-negative, which is what
/// the resolver's cap relies on to keep every line discount at zero or above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct CartItem {
    code: String,
    unit_price: Money,
    quantity: i64,
    #[serde(skip)]
    total_price: Money,
}

impl CartItem {
    /// Creates a cart line.
    ///
    /// ## Errors
    /// - [`CoreError::Validation`] for a negative quantity or unit price
    /// - [`CoreError::Overflow`] when the line total does not fit in `i64`
    ///
    /// ## Example
    /// ```rust
    /// use rebate_core::money::Money;
    /// use rebate_core::types::CartItem;
    ///
    /// let item = CartItem::new("ITEM001", Money::new(50, "EUR"), 2).unwrap();
    /// assert_eq!(item.total_price(), Money::new(100, "EUR"));
    ///
    /// assert!(CartItem::new("ITEM001", Money::new(50, "EUR"), -1).is_err());
    /// ```
    pub fn new(code: impl Into<String>, unit_price: Money, quantity: i64) -> CoreResult<Self> {
        validate_quantity(quantity)?;
        validate_price(unit_price.amount())?;
        let total_price = unit_price.multiply_quantity(quantity)?;

        Ok(CartItem {
            code: code.into(),
            unit_price,
            quantity,
            total_price,
        })
    }

    /// Product code, matched exactly by product-code conditions.
    #[inline]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Price of a single unit.
    #[inline]
    pub fn unit_price(&self) -> &Money {
        &self.unit_price
    }

    /// Number of units on this line.
    #[inline]
    pub const fn quantity(&self) -> i64 {
        self.quantity
    }

    /// Currency of the line, taken from the unit price.
    #[inline]
    pub fn currency(&self) -> &str {
        self.unit_price.currency()
    }

    /// Unit price × quantity, in the unit price currency. Range-checked once
    /// in [`CartItem::new`].
    #[inline]
    pub fn total_price(&self) -> Money {
        self.total_price.clone()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_bounds() {
        assert_eq!(Percentage::new(0).unwrap().value(), 0);
        assert_eq!(Percentage::new(100).unwrap().value(), 100);
        assert!(matches!(
            Percentage::new(101),
            Err(CoreError::InvalidPercentage { value: 101 })
        ));
        assert!(matches!(
            Percentage::new(-5),
            Err(CoreError::InvalidPercentage { value: -5 })
        ));
    }

    #[test]
    fn test_percentage_of_amount_truncates() {
        let pct = Percentage::new(15).unwrap();
        assert_eq!(pct.of_amount(99), 14);
        assert_eq!(pct.of_amount(100), 15);
        assert_eq!(Percentage::new(0).unwrap().of_amount(12345), 0);
        assert_eq!(Percentage::new(100).unwrap().of_amount(12345), 12345);
    }

    #[test]
    fn test_percentage_serde_validates() {
        let pct: Percentage = serde_json::from_str("20").unwrap();
        assert_eq!(pct.value(), 20);
        assert_eq!(serde_json::to_string(&pct).unwrap(), "20");

        assert!(serde_json::from_str::<Percentage>("150").is_err());
        assert!(serde_json::from_str::<Percentage>("-1").is_err());
    }

    #[test]
    fn test_percentage_display() {
        assert_eq!(Percentage::new(30).unwrap().to_string(), "30%");
    }

    #[test]
    fn test_cart_item_total_price() {
        let item = CartItem::new("ITEM001", Money::new(100, "USD"), 3).unwrap();
        assert_eq!(item.code(), "ITEM001");
        assert_eq!(item.quantity(), 3);
        assert_eq!(item.currency(), "USD");
        assert_eq!(item.unit_price(), &Money::new(100, "USD"));
        assert_eq!(item.total_price(), Money::new(300, "USD"));
    }

    #[test]
    fn test_cart_item_zero_quantity() {
        let item = CartItem::new("ITEM001", Money::new(100, "USD"), 0).unwrap();
        assert_eq!(item.total_price(), Money::zero("USD"));
    }

    #[test]
    fn test_cart_item_rejects_negatives() {
        assert!(matches!(
            CartItem::new("ITEM001", Money::new(100, "USD"), -1),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            CartItem::new("ITEM001", Money::new(-100, "USD"), 1),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn test_cart_item_rejects_overflowing_total() {
        let result = CartItem::new("ITEM001", Money::new(i64::MAX / 2 + 1, "EUR"), 2);
        assert!(matches!(result, Err(CoreError::Overflow { .. })));

        let largest = CartItem::new("ITEM001", Money::new(i64::MAX, "EUR"), 1).unwrap();
        assert_eq!(largest.total_price().amount(), i64::MAX);
    }

    #[test]
    fn test_cart_item_serializes_without_total() {
        let item = CartItem::new("ITEM001", Money::new(100, "USD"), 3).unwrap();
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["quantity"], 3);
        assert!(json.get("total_price").is_none());
    }
}
