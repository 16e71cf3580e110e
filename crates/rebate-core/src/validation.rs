//! # Validation Module
//!
//! Input checks run while constructing value types and loading rule books.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Deserialization (serde)                                      │
//! │  ├── Shape and type checks                                             │
//! │  └── Percentage range (via TryFrom)                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Constructors (THIS MODULE)                                   │
//! │  ├── CartItem: quantity and unit price must not be negative            │
//! │  ├── Rule books: fixed discount amounts must not be negative           │
//! │  └── Config: currency codes, product codes                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Resolution                                                   │
//! │  └── Currency guard: mismatched discounts are absent, not errors       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rebate_core::validation::{validate_currency_code, validate_quantity};
//!
//! validate_currency_code("EUR").unwrap();
//! validate_quantity(5).unwrap();
//! assert!(validate_quantity(-1).is_err());
//! ```

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest product code accepted from rule books and cart files.
pub const MAX_PRODUCT_CODE_LEN: usize = 64;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product code used in carts and product-code conditions.
///
/// ## Rules
/// - Must not be empty or whitespace
/// - At most [`MAX_PRODUCT_CODE_LEN`] characters
///
/// Codes are matched exactly and case-sensitively, so no trimming or case
/// folding is applied to the stored value.
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product code".to_string(),
        });
    }

    if code.chars().count() > MAX_PRODUCT_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "product code".to_string(),
            max: MAX_PRODUCT_CODE_LEN,
        });
    }

    Ok(())
}

/// Validates a currency code.
///
/// ## Rules
/// - Exactly three ASCII uppercase letters (ISO 4217 shape: `EUR`, `USD`)
///
/// ## Example
/// ```rust
/// use rebate_core::validation::validate_currency_code;
///
/// assert!(validate_currency_code("USD").is_ok());
/// assert!(validate_currency_code("usd").is_err());
/// assert!(validate_currency_code("").is_err());
/// ```
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "currency".to_string(),
        });
    }

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency".to_string(),
            reason: format!("expected three uppercase letters, got '{code}'"),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart line quantity.
///
/// ## Rules
/// - Must not be negative. Zero is allowed: the line total is zero, so any
///   discount on it caps to zero.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "quantity".to_string(),
            value: qty,
        });
    }

    Ok(())
}

/// Validates a unit price in minor units.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free items)
pub fn validate_price(amount: i64) -> ValidationResult<()> {
    if amount < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "unit price".to_string(),
            value: amount,
        });
    }

    Ok(())
}

/// Validates a fixed discount amount in minor units.
///
/// ## Rules
/// - Must be non-negative (>= 0); a negative discount would raise the price
pub fn validate_discount_amount(amount: i64) -> ValidationResult<()> {
    if amount < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "discount amount".to_string(),
            value: amount,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
