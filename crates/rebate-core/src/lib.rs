//! # rebate-core: Cart Discount Resolution
//!
//! This crate decides which discount applies to each line of a shopping cart
//! and totals the result. Everything here is a pure function over immutable
//! values: no I/O, no shared mutable state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Rebate Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    rebate-cli (apps/)                           │   │
//! │  │     config (TOML + env) ──► cart file ──► breakdown / JSON      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ rebate-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │  calculator ──► resolver ──► discount ──► condition             │   │
//! │  │       │             │            │             │                │   │
//! │  │       └─────────────┴────────────┴─────────────┘                │   │
//! │  │                money • types • rules • validation               │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`money`] - `Money` with currency-checked addition, `MoneySum` for reductions
//! - [`types`] - `Percentage` and `CartItem`
//! - [`condition`] - Eligibility predicates (`MinQuantityCondition`, `ProductCodeCondition`)
//! - [`discount`] - Discount variants (`FixedAmountDiscount`, `PercentageDiscount`)
//! - [`resolver`] - Per-line selection strategies (`BestDiscountResolver`)
//! - [`calculator`] - Whole-cart totals and breakdowns
//! - [`rules`] - Rule books: discounts described as serde data
//! - [`validation`] - Construction-time input checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **One discount per line**: the best eligible discount wins, never stacked
//! 2. **Capped**: a line discount never exceeds the line total
//! 3. **No conversion**: a discount in another currency is simply absent
//! 4. **No invented currencies**: an empty cart totals to `MoneySum::Zero`
//!
//! ## Example Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use rebate_core::{
//!     CartItem, DiscountCalculator, FixedAmountDiscount, MinQuantityCondition, Money,
//!     MoneySum, Percentage, PercentageDiscount, ProductCodeCondition,
//! };
//!
//! let bulk = FixedAmountDiscount::new(Money::new(200, "EUR"))
//!     .with_condition(ProductCodeCondition::new(["BULK001"]))
//!     .with_condition(MinQuantityCondition::new(5));
//! let fallback = PercentageDiscount::new(Percentage::new(10).unwrap());
//!
//! let calculator = DiscountCalculator::with_discounts(vec![
//!     Arc::new(bulk),
//!     Arc::new(fallback),
//! ]);
//!
//! let cart = vec![
//!     CartItem::new("BULK001", Money::new(100, "EUR"), 10).unwrap(),
//!     CartItem::new("OTHER001", Money::new(100, "EUR"), 10).unwrap(),
//! ];
//!
//! let total = calculator.calculate_total_discount(&cart).unwrap();
//! assert_eq!(total, MoneySum::Total(Money::new(210, "EUR")));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calculator;
pub mod condition;
pub mod discount;
pub mod error;
pub mod money;
pub mod resolver;
pub mod rules;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use calculator::{DiscountBreakdown, DiscountCalculator, LineDiscount};
pub use condition::{DiscountCondition, MinQuantityCondition, ProductCodeCondition};
pub use discount::{Discount, FixedAmountDiscount, PercentageDiscount};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, MoneySum};
pub use resolver::{BestDiscountResolver, DiscountResolver};
pub use rules::{ConditionRule, DiscountRule, ResolutionStrategy, RuleBook};
pub use types::{CartItem, Percentage};
