//! # Discount Conditions
//!
//! Predicates that decide whether a cart line qualifies for a discount.
//!
//! ## Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Discount "200 EUR off BULK001 when buying 5+"                          │
//! │                                                                         │
//! │     ProductCodeCondition {BULK001}   AND   MinQuantityCondition(5)      │
//! │                                                                         │
//! │  ("BULK001", qty 10)  →  true  AND  true   →  eligible                 │
//! │  ("BULK001", qty 3)   →  true  AND  false  →  not eligible             │
//! │  ("OTHER",   qty 10)  →  false AND  true   →  not eligible             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Conditions only ever combine through AND (a discount's full condition
//! list). New kinds of condition implement [`DiscountCondition`].

use std::collections::BTreeSet;
use std::fmt;

use crate::types::CartItem;

// =============================================================================
// Condition Trait
// =============================================================================

/// A pure eligibility predicate over a single cart line.
pub trait DiscountCondition: fmt::Debug + Send + Sync {
    /// True when `item` satisfies this condition. Must not have side effects.
    fn is_eligible(&self, item: &CartItem) -> bool;

    /// Short human-readable description, e.g. `"quantity >= 5"`.
    fn describe(&self) -> String;
}

// =============================================================================
// Minimum Quantity
// =============================================================================

/// Eligible when the line quantity reaches a threshold (volume discounts).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinQuantityCondition {
    min_quantity: i64,
}

impl MinQuantityCondition {
    pub fn new(min_quantity: i64) -> Self {
        MinQuantityCondition { min_quantity }
    }
}

impl DiscountCondition for MinQuantityCondition {
    fn is_eligible(&self, item: &CartItem) -> bool {
        item.quantity() >= self.min_quantity
    }

    fn describe(&self) -> String {
        format!("quantity >= {}", self.min_quantity)
    }
}

// =============================================================================
// Product Code
// =============================================================================

/// Eligible when the line's product code is in a fixed set.
///
/// Matching is exact and case-sensitive. An empty set matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCodeCondition {
    codes: BTreeSet<String>,
}

impl ProductCodeCondition {
    /// ## Example
    /// ```rust
    /// use rebate_core::condition::ProductCodeCondition;
    ///
    /// let premium = ProductCodeCondition::new(["PREMIUM001", "PREMIUM002"]);
    /// assert!(premium.contains("PREMIUM001"));
    /// assert!(!premium.contains("premium001"));
    /// ```
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ProductCodeCondition {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }
}

impl DiscountCondition for ProductCodeCondition {
    fn is_eligible(&self, item: &CartItem) -> bool {
        self.contains(item.code())
    }

    fn describe(&self) -> String {
        let codes: Vec<&str> = self.codes.iter().map(String::as_str).collect();
        format!("code in {{{}}}", codes.join(", "))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    fn item(code: &str, quantity: i64) -> CartItem {
        CartItem::new(code, Money::new(100, "USD"), quantity).unwrap()
    }

    #[test]
    fn test_min_quantity_threshold() {
        let condition = MinQuantityCondition::new(3);
        assert!(!condition.is_eligible(&item("ITEM001", 2)));
        assert!(condition.is_eligible(&item("ITEM001", 3)));
        assert!(condition.is_eligible(&item("ITEM001", 5)));
    }

    #[test]
    fn test_min_quantity_zero_always_eligible() {
        let condition = MinQuantityCondition::new(0);
        assert!(condition.is_eligible(&item("ITEM001", 0)));
    }

    #[test]
    fn test_product_code_match() {
        let condition = ProductCodeCondition::new(["ITEM001", "ITEM002"]);
        assert!(condition.is_eligible(&item("ITEM001", 1)));
        assert!(condition.is_eligible(&item("ITEM002", 1)));
        assert!(!condition.is_eligible(&item("ITEM003", 1)));
    }

    #[test]
    fn test_product_code_is_case_sensitive() {
        let condition = ProductCodeCondition::new(["ITEM001"]);
        assert!(!condition.is_eligible(&item("item001", 1)));
        assert!(!condition.is_eligible(&item("ITEM001 ", 1)));
    }

    #[test]
    fn test_empty_product_codes_never_eligible() {
        let condition = ProductCodeCondition::new(Vec::<String>::new());
        assert!(!condition.is_eligible(&item("ITEM001", 1)));
        assert!(!condition.is_eligible(&item("", 1)));
    }

    #[test]
    fn test_describe() {
        assert_eq!(MinQuantityCondition::new(10).describe(), "quantity >= 10");
        assert_eq!(
            ProductCodeCondition::new(["B", "A"]).describe(),
            "code in {A, B}"
        );
    }
}
