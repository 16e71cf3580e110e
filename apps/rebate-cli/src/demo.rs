//! # Demonstration Scenarios
//!
//! Four canned carts that walk through the discount model, run by
//! `rebate demo`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Basic types         fixed, percentage, volume (quantity >= 10)      │
//! │  2. Product-specific    20% on premium codes vs 10% on everything       │
//! │  3. Combined conditions 200 EUR on BULK001 when quantity >= 5           │
//! │  4. Best selection      50 EUR vs 20% vs 30% across three price points  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each scenario reports every candidate amount per line next to the amount
//! the resolver actually picked.

use std::fmt;
use std::sync::Arc;

use rebate_core::{
    CartItem, Discount, DiscountCalculator, FixedAmountDiscount, MinQuantityCondition, Money,
    MoneySum, Percentage, PercentageDiscount, ProductCodeCondition,
};

use crate::error::CliResult;

// =============================================================================
// Scenario Definitions
// =============================================================================

/// A titled set of discounts and the cart they are applied to.
pub struct Scenario {
    pub title: &'static str,
    pub discounts: Vec<Arc<dyn Discount>>,
    pub cart: Vec<CartItem>,
}

fn eur(amount: i64) -> Money {
    Money::new(amount, "EUR")
}

fn basic_types() -> CliResult<Scenario> {
    Ok(Scenario {
        title: "Basic Discount Types",
        discounts: vec![
            Arc::new(FixedAmountDiscount::new(eur(100))),
            Arc::new(PercentageDiscount::new(Percentage::new(10)?)),
            Arc::new(
                FixedAmountDiscount::new(eur(100)).with_condition(MinQuantityCondition::new(10)),
            ),
        ],
        cart: vec![
            CartItem::new("ITEM001", eur(500), 1)?,
            CartItem::new("ITEM002", eur(200), 5)?,
            CartItem::new("ITEM003", eur(100), 15)?,
        ],
    })
}

fn product_specific() -> CliResult<Scenario> {
    Ok(Scenario {
        title: "Product-Specific Discounts",
        discounts: vec![
            Arc::new(
                PercentageDiscount::new(Percentage::new(20)?)
                    .with_condition(ProductCodeCondition::new(["PREMIUM001", "PREMIUM002"])),
            ),
            Arc::new(PercentageDiscount::new(Percentage::new(10)?)),
        ],
        cart: vec![
            CartItem::new("PREMIUM001", eur(100), 1)?,
            CartItem::new("PREMIUM002", eur(200), 1)?,
            CartItem::new("REGULAR001", eur(100), 1)?,
        ],
    })
}

fn combined_conditions() -> CliResult<Scenario> {
    Ok(Scenario {
        title: "Combined Conditions (Volume + Product-Specific)",
        discounts: vec![
            Arc::new(
                FixedAmountDiscount::new(eur(200))
                    .with_condition(ProductCodeCondition::new(["BULK001"]))
                    .with_condition(MinQuantityCondition::new(5)),
            ),
            Arc::new(PercentageDiscount::new(Percentage::new(10)?)),
        ],
        cart: vec![
            CartItem::new("BULK001", eur(100), 10)?,
            CartItem::new("BULK001", eur(100), 3)?,
            CartItem::new("OTHER001", eur(100), 10)?,
        ],
    })
}

fn best_selection() -> CliResult<Scenario> {
    Ok(Scenario {
        title: "Best Discount Selection",
        discounts: vec![
            Arc::new(FixedAmountDiscount::new(eur(50))),
            Arc::new(PercentageDiscount::new(Percentage::new(20)?)),
            Arc::new(PercentageDiscount::new(Percentage::new(30)?)),
        ],
        cart: vec![
            CartItem::new("ITEM001", eur(100), 1)?,
            CartItem::new("ITEM002", eur(300), 1)?,
            CartItem::new("ITEM003", eur(1000), 1)?,
        ],
    })
}

/// All scenarios in presentation order.
pub fn scenarios() -> CliResult<Vec<Scenario>> {
    Ok(vec![
        basic_types()?,
        product_specific()?,
        combined_conditions()?,
        best_selection()?,
    ])
}

// =============================================================================
// Reports
// =============================================================================

/// One cart line with every candidate amount and the resolved discount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineReport {
    pub code: String,
    pub quantity: i64,
    pub unit_price: Money,
    /// `None` where the discount is not eligible or in another currency.
    pub candidates: Vec<Option<Money>>,
    pub resolved: Money,
}

/// The evaluated outcome of one [`Scenario`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScenarioReport {
    pub title: &'static str,
    pub discounts: Vec<String>,
    pub lines: Vec<LineReport>,
    pub total: MoneySum,
}

impl Scenario {
    /// Resolves the cart and collects per-discount candidates for display.
    pub fn evaluate(self) -> CliResult<ScenarioReport> {
        let descriptions = self.discounts.iter().map(|d| d.describe()).collect();
        let calculator = DiscountCalculator::with_discounts(self.discounts.clone());
        let breakdown = calculator.calculate_breakdown(&self.cart)?;

        let lines = self
            .cart
            .iter()
            .zip(breakdown.lines)
            .map(|(item, line)| LineReport {
                code: item.code().to_string(),
                quantity: item.quantity(),
                unit_price: item.unit_price().clone(),
                candidates: self.discounts.iter().map(|d| d.calculate(item)).collect(),
                resolved: line.discount,
            })
            .collect();

        Ok(ScenarioReport {
            title: self.title,
            discounts: descriptions,
            lines,
            total: breakdown.total,
        })
    }
}

/// Evaluates every scenario.
pub fn run_demo() -> CliResult<Vec<ScenarioReport>> {
    scenarios()?.into_iter().map(Scenario::evaluate).collect()
}

impl fmt::Display for ScenarioReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "-".repeat(70))?;

        writeln!(f, "\nCart Items:")?;
        for line in &self.lines {
            writeln!(f, "  - {}: {}x {}", line.code, line.quantity, line.unit_price)?;
        }

        writeln!(f, "\nAvailable Discounts:")?;
        for (index, description) in self.discounts.iter().enumerate() {
            writeln!(f, "  {}. {}", index + 1, description)?;
        }

        writeln!(f, "\nDiscount Breakdown:")?;
        for line in &self.lines {
            let candidates: Vec<String> = line
                .candidates
                .iter()
                .map(|c| match c {
                    Some(amount) => amount.to_string(),
                    None => "-".to_string(),
                })
                .collect();
            writeln!(
                f,
                "  {} ({}x): [{}] -> {}",
                line.code,
                line.quantity,
                candidates.join(", "),
                line.resolved
            )?;
        }

        write!(f, "\nTotal Discount: {}", self.total)
    }
}
