//! # Error Types
//!
//! Domain-specific error types for rebate-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  rebate-core errors (this file)                                        │
//! │  ├── CoreError        - Domain errors (percentage, currency, variant)  │
//! │  └── ValidationError  - Construction-time input checks                 │
//! │                                                                         │
//! │  rebate-cli errors (separate crate)                                    │
//! │  └── CliError         - Config, file and output failures               │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → exit code              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT an Error
//! A discount authored in EUR evaluated against a USD cart line is simply
//! *absent* for that line. Only adding two `Money` values of different
//! currencies is a hard failure.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Every variant is a programming or configuration error. Nothing here is
/// transient, so callers never retry.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Percentage outside the inclusive `0..=100` range.
    #[error("Percentage must be between 0 and 100, got {value}")]
    InvalidPercentage { value: i64 },

    /// Two monetary values with different currencies were added together.
    ///
    /// ## When This Occurs
    /// ```text
    /// Cart: [ITEM001 in EUR, ITEM002 in USD]
    ///      │
    ///      ▼
    /// Line discounts: 10 EUR, 5 USD
    ///      │
    ///      ▼
    /// Sum → CurrencyMismatch { left: "EUR", right: "USD" }
    /// ```
    #[error("Cannot add money with different currencies: {left} and {right}")]
    CurrencyMismatch { left: String, right: String },

    /// An amount left the `i64` range of minor units.
    #[error("Amount overflow in {operation}: {left} {currency} and {right}")]
    Overflow {
        operation: &'static str,
        left: i64,
        right: i64,
        currency: String,
    },

    /// A variant was requested that has no implementation.
    ///
    /// Raised when a rule book names a strategy (or other pluggable piece)
    /// that this build does not know how to construct.
    #[error("No {kind} implementation for variant '{name}'")]
    UnimplementedVariant { kind: &'static str, name: String },

    /// A serialized rule book could not be parsed.
    #[error("Invalid rule book: {0}")]
    InvalidRuleBook(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors raised while constructing value types.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must not be negative.
    #[error("{field} must not be negative, got {value}")]
    MustNotBeNegative { field: String, value: i64 },

    /// Invalid format (e.g. a currency code that is not three letters).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
