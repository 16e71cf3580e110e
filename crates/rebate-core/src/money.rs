//! # Money Module
//!
//! Provides the `Money` type for currency-tagged monetary values and the
//! `MoneySum` type for reducing collections of them.
//!
//! ## Integer Minor Units
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Money { amount: 1099, currency: "EUR" }  =  10.99 EUR                  │
//! │                                                                         │
//! │  • amount is always an integer count of minor units (cents)            │
//! │  • currency travels with the amount; adding EUR to USD is an error     │
//! │  • no floating point anywhere, percentage math truncates explicitly    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Summing Without Inventing a Currency
//! ```text
//! Money::sum([])                       → MoneySum::Zero
//! Money::sum([10 EUR])                 → MoneySum::Total(10 EUR)
//! Money::sum([10 EUR, 5 EUR])          → MoneySum::Total(15 EUR)
//! Money::sum([10 EUR, 5 USD])          → Err(CurrencyMismatch)
//! ```
//! An empty reduction has no currency to report, so it is its own variant
//! instead of a `Money` with a made-up code. Callers that need a `Money`
//! anyway name the currency explicitly with [`MoneySum::or_currency`].
//!
//! ## Usage
//! ```rust
//! use rebate_core::money::Money;
//!
//! let price = Money::new(1099, "EUR");
//! let line = price.multiply_quantity(3).unwrap();
//! assert_eq!(line.amount(), 3297);
//!
//! let total = price.checked_add(&Money::new(1, "EUR")).unwrap();
//! assert_eq!(total.amount(), 1100);
//! assert!(price.checked_add(&Money::new(1, "USD")).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest unit of its currency.
///
/// ## Design Decisions
/// - **i64 (signed)**: arithmetic stays total; sign rules live in validation
/// - **Owned currency code**: codes are free-form strings, compared exactly
/// - **No `Ord`**: ordering across currencies is meaningless, so comparisons
///   go through [`Money::amount`] after a currency check
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money {
    amount: i64,
    currency: String,
}

impl Money {
    /// Creates a Money value from minor units and a currency code.
    #[inline]
    pub fn new(amount: i64, currency: impl Into<String>) -> Self {
        Money {
            amount,
            currency: currency.into(),
        }
    }

    /// Zero in the given currency.
    ///
    /// ## Example
    /// ```rust
    /// use rebate_core::money::Money;
    ///
    /// let zero = Money::zero("USD");
    /// assert!(zero.is_zero());
    /// assert_eq!(zero.currency(), "USD");
    /// ```
    #[inline]
    pub fn zero(currency: impl Into<String>) -> Self {
        Money::new(0, currency)
    }

    /// Returns the amount in minor units.
    #[inline]
    pub const fn amount(&self) -> i64 {
        self.amount
    }

    /// Returns the currency code.
    #[inline]
    pub fn currency(&self) -> &str {
        &self.currency
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.amount == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.amount < 0
    }

    /// True when both values carry the same currency code.
    #[inline]
    pub fn same_currency(&self, other: &Money) -> bool {
        self.currency == other.currency
    }

    /// Adds two values of the same currency.
    ///
    /// ## Errors
    /// - [`CoreError::CurrencyMismatch`] when the currencies differ. No
    ///   conversion is ever attempted.
    /// - [`CoreError::Overflow`] when the sum does not fit in `i64`.
    pub fn checked_add(&self, other: &Money) -> CoreResult<Money> {
        if !self.same_currency(other) {
            return Err(CoreError::CurrencyMismatch {
                left: self.currency.clone(),
                right: other.currency.clone(),
            });
        }

        let amount = self
            .amount
            .checked_add(other.amount)
            .ok_or_else(|| self.overflow("addition", other.amount))?;
        Ok(Money::new(amount, self.currency.clone()))
    }

    /// Multiplies the amount by a quantity, keeping the currency.
    ///
    /// ## User Workflow
    /// ```text
    /// Unit price: 299 EUR-cents
    /// Quantity: 3
    ///      │
    ///      ▼
    /// multiply_quantity(3) ← THIS FUNCTION
    ///      │
    ///      ▼
    /// Line total: 897 EUR-cents
    /// ```
    ///
    /// ## Errors
    /// [`CoreError::Overflow`] when the product does not fit in `i64`.
    pub fn multiply_quantity(&self, qty: i64) -> CoreResult<Money> {
        let amount = self
            .amount
            .checked_mul(qty)
            .ok_or_else(|| self.overflow("multiplication", qty))?;
        Ok(Money::new(amount, self.currency.clone()))
    }

    fn overflow(&self, operation: &'static str, right: i64) -> CoreError {
        CoreError::Overflow {
            operation,
            left: self.amount,
            right,
            currency: self.currency.clone(),
        }
    }

    /// Sums a collection of values.
    ///
    /// Returns [`MoneySum::Zero`] for an empty input and fails on the first
    /// currency mismatch.
    pub fn sum<I>(values: I) -> CoreResult<MoneySum>
    where
        I: IntoIterator<Item = Money>,
    {
        values
            .into_iter()
            .try_fold(MoneySum::Zero, |acc, value| acc.checked_add(value))
    }
}

/// Debug-oriented rendering: `"1099 EUR"`. Frontends format for display.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

// =============================================================================
// MoneySum
// =============================================================================

/// Result of summing zero or more `Money` values.
///
/// ## API Contract
/// `Zero` means "nothing was summed", not "zero in some currency". A caller
/// holding `Zero` that must hand a `Money` to someone else supplies the
/// currency itself via [`MoneySum::or_currency`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "kind", content = "money", rename_all = "snake_case")]
pub enum MoneySum {
    /// Empty reduction; carries no currency.
    #[default]
    Zero,
    /// At least one value was summed.
    Total(Money),
}

impl MoneySum {
    /// Adds one more value to the running sum.
    pub fn checked_add(self, value: Money) -> CoreResult<MoneySum> {
        match self {
            MoneySum::Zero => Ok(MoneySum::Total(value)),
            MoneySum::Total(total) => Ok(MoneySum::Total(total.checked_add(&value)?)),
        }
    }

    /// Amount in minor units; `0` for the empty sum.
    #[inline]
    pub fn amount(&self) -> i64 {
        match self {
            MoneySum::Zero => 0,
            MoneySum::Total(money) => money.amount(),
        }
    }

    /// True for the empty sum or a total that nets to zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.amount() == 0
    }

    /// True only for the empty sum.
    #[inline]
    pub fn is_empty(&self) -> bool {
        matches!(self, MoneySum::Zero)
    }

    /// Borrows the currency-bearing total, if any.
    pub fn as_money(&self) -> Option<&Money> {
        match self {
            MoneySum::Zero => None,
            MoneySum::Total(money) => Some(money),
        }
    }

    /// Consumes the sum, returning the currency-bearing total, if any.
    pub fn into_money(self) -> Option<Money> {
        match self {
            MoneySum::Zero => None,
            MoneySum::Total(money) => Some(money),
        }
    }

    /// Converts to `Money`, using `currency` only when the sum is empty.
    ///
    /// ## Example
    /// ```rust
    /// use rebate_core::money::{Money, MoneySum};
    ///
    /// assert_eq!(MoneySum::Zero.or_currency("EUR"), Money::zero("EUR"));
    ///
    /// let total = MoneySum::Total(Money::new(30, "USD"));
    /// assert_eq!(total.or_currency("EUR"), Money::new(30, "USD"));
    /// ```
    pub fn or_currency(self, currency: impl Into<String>) -> Money {
        match self {
            MoneySum::Zero => Money::zero(currency),
            MoneySum::Total(money) => money,
        }
    }
}

impl From<Money> for MoneySum {
    fn from(money: Money) -> Self {
        MoneySum::Total(money)
    }
}

impl fmt::Display for MoneySum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoneySum::Zero => write!(f, "0"),
            MoneySum::Total(money) => fmt::Display::fmt(money, f),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
