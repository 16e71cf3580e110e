//! End-to-end cart scenarios through the public API.

use std::sync::Arc;

use rebate_core::{
    BestDiscountResolver, CartItem, CoreError, Discount, DiscountCalculator, DiscountResolver,
    FixedAmountDiscount, MinQuantityCondition, Money, MoneySum, Percentage, PercentageDiscount,
    ProductCodeCondition,
};

fn item(code: &str, amount: i64, currency: &str, quantity: i64) -> CartItem {
    CartItem::new(code, Money::new(amount, currency), quantity).unwrap()
}

fn pct(value: i64) -> Percentage {
    Percentage::new(value).unwrap()
}

fn fixed(amount: i64, currency: &str) -> FixedAmountDiscount {
    FixedAmountDiscount::new(Money::new(amount, currency))
}

// =============================================================================
// Literal scenarios
// =============================================================================

#[test]
fn fixed_amount_without_conditions() {
    let resolver = BestDiscountResolver::new(vec![Arc::new(fixed(100, "EUR"))]);
    let discount = resolver.calculate_discount(&item("X", 500, "EUR", 1));
    assert_eq!(discount, Money::new(100, "EUR"));
}

#[test]
fn percentage_truncates_toward_zero() {
    let discount = PercentageDiscount::new(pct(15));
    let amount = discount.calculate(&item("X", 99, "USD", 1)).unwrap();
    assert_eq!(amount.amount(), 14);
    assert_eq!(amount.currency(), "USD");
}

#[test]
fn fixed_amount_capped_at_line_total() {
    let resolver = BestDiscountResolver::new(vec![Arc::new(fixed(1000, "EUR"))]);
    let discount = resolver.calculate_discount(&item("X", 50, "EUR", 2));
    assert_eq!(discount, Money::new(100, "EUR"));
}

#[test]
fn equal_discounts_resolve_to_first() {
    let resolver = BestDiscountResolver::new(vec![
        Arc::new(fixed(20, "USD")),
        Arc::new(PercentageDiscount::new(pct(20))),
    ]);
    let line = item("X", 100, "USD", 1);

    assert_eq!(resolver.calculate_discount(&line), Money::new(20, "USD"));
    assert_eq!(resolver.best_match(&line).map(|(index, _)| index), Some(0));
}

#[test]
fn combined_conditions_require_all() {
    let discount = fixed(200, "EUR")
        .with_condition(ProductCodeCondition::new(["BULK001"]))
        .with_condition(MinQuantityCondition::new(5));

    assert!(discount.is_eligible(&item("BULK001", 100, "EUR", 10)));
    assert!(!discount.is_eligible(&item("BULK001", 100, "EUR", 3)));
    assert!(!discount.is_eligible(&item("OTHER", 100, "EUR", 10)));
}

#[test]
fn flat_percentage_over_cart() {
    let calculator =
        DiscountCalculator::with_discounts(vec![Arc::new(PercentageDiscount::new(pct(10)))]);
    let cart = vec![item("A", 100, "EUR", 1), item("B", 200, "EUR", 1)];

    let total = calculator.calculate_total_discount(&cart).unwrap();
    assert_eq!(total, MoneySum::Total(Money::new(30, "EUR")));
}

// =============================================================================
// Cart-level behavior
// =============================================================================

#[test]
fn fixed_discount_on_every_line() {
    let calculator = DiscountCalculator::with_discounts(vec![Arc::new(fixed(100, "EUR"))]);
    let cart = vec![item("ITEM001", 500, "EUR", 1), item("ITEM002", 300, "EUR", 2)];

    let total = calculator.calculate_total_discount(&cart).unwrap();
    assert_eq!(total, MoneySum::Total(Money::new(200, "EUR")));
}

#[test]
fn volume_discount_only_on_qualifying_lines() {
    let calculator = DiscountCalculator::with_discounts(vec![Arc::new(
        fixed(100, "EUR").with_condition(MinQuantityCondition::new(10)),
    )]);
    let cart = vec![item("ITEM001", 500, "EUR", 10), item("ITEM002", 300, "EUR", 5)];

    let total = calculator.calculate_total_discount(&cart).unwrap();
    assert_eq!(total.amount(), 100);
}

#[test]
fn product_specific_discount() {
    let calculator = DiscountCalculator::with_discounts(vec![Arc::new(
        fixed(50, "EUR").with_condition(ProductCodeCondition::new(["ITEM001", "ITEM002"])),
    )]);
    let cart = vec![
        item("ITEM001", 200, "EUR", 1),
        item("ITEM002", 200, "EUR", 1),
        item("ITEM003", 200, "EUR", 1),
    ];

    let total = calculator.calculate_total_discount(&cart).unwrap();
    assert_eq!(total, MoneySum::Total(Money::new(100, "EUR")));
}

#[test]
fn only_one_discount_per_line() {
    let calculator = DiscountCalculator::with_discounts(vec![
        Arc::new(fixed(10, "USD")),
        Arc::new(fixed(50, "USD")),
        Arc::new(fixed(100, "USD")),
    ]);

    let total = calculator
        .calculate_total_discount(&[item("ITEM001", 500, "USD", 1)])
        .unwrap();
    assert_eq!(total.amount(), 100);
}

#[test]
fn percentage_volume_discount_uses_unit_price() {
    let calculator = DiscountCalculator::with_discounts(vec![Arc::new(
        PercentageDiscount::new(pct(20)).with_condition(MinQuantityCondition::new(10)),
    )]);
    let cart = vec![item("ITEM001", 100, "USD", 10), item("ITEM002", 200, "USD", 5)];

    let total = calculator.calculate_total_discount(&cart).unwrap();
    assert_eq!(total, MoneySum::Total(Money::new(20, "USD")));
}

#[test]
fn best_discount_depends_on_price() {
    let calculator = DiscountCalculator::with_discounts(vec![
        Arc::new(fixed(50, "EUR")),
        Arc::new(PercentageDiscount::new(pct(20))),
        Arc::new(PercentageDiscount::new(pct(30))),
    ]);
    let cart = vec![
        item("ITEM001", 100, "EUR", 1),  // 50 fixed
        item("ITEM002", 300, "EUR", 1),  // 90 at 30%
        item("ITEM003", 1000, "EUR", 1), // 300 at 30%
    ];

    let breakdown = calculator.calculate_breakdown(&cart).unwrap();
    let amounts: Vec<i64> = breakdown.lines.iter().map(|l| l.discount.amount()).collect();
    assert_eq!(amounts, vec![50, 90, 300]);
    assert_eq!(breakdown.total.amount(), 440);
}

#[test]
fn foreign_currency_discount_is_skipped() {
    let calculator = DiscountCalculator::with_discounts(vec![
        Arc::new(fixed(100, "USD")),
        Arc::new(fixed(5, "EUR")),
    ]);

    let total = calculator
        .calculate_total_discount(&[item("ITEM001", 500, "EUR", 1)])
        .unwrap();
    assert_eq!(total, MoneySum::Total(Money::new(5, "EUR")));
}

#[test]
fn empty_cart_has_no_currency() {
    let calculator = DiscountCalculator::with_discounts(vec![Arc::new(fixed(100, "EUR"))]);

    let total = calculator.calculate_total_discount(&[]).unwrap();
    assert_eq!(total, MoneySum::Zero);
    assert_eq!(total.or_currency("EUR"), Money::zero("EUR"));
}

#[test]
fn no_eligible_discounts_total_zero_in_cart_currency() {
    let calculator = DiscountCalculator::with_discounts(vec![Arc::new(
        fixed(100, "EUR").with_condition(ProductCodeCondition::new(["NOPE"])),
    )]);
    let cart = vec![item("ITEM001", 200, "EUR", 1), item("ITEM002", 300, "EUR", 1)];

    let total = calculator.calculate_total_discount(&cart).unwrap();
    assert_eq!(total, MoneySum::Total(Money::zero("EUR")));
}

#[test]
fn mixed_currency_cart_is_an_error() {
    let calculator = DiscountCalculator::with_discounts(vec![
        Arc::new(fixed(10, "EUR")),
        Arc::new(fixed(10, "USD")),
    ]);
    let cart = vec![item("A", 100, "EUR", 1), item("B", 100, "USD", 1)];

    assert!(matches!(
        calculator.calculate_total_discount(&cart),
        Err(CoreError::CurrencyMismatch { .. })
    ));
}

#[test]
fn overflowing_line_total_is_rejected() {
    let result = CartItem::new("ITEM001", Money::new(i64::MAX / 2 + 1, "EUR"), 2);
    assert!(matches!(result, Err(CoreError::Overflow { .. })));
}

#[test]
fn overflowing_cart_total_is_an_error() {
    let calculator =
        DiscountCalculator::with_discounts(vec![Arc::new(PercentageDiscount::new(pct(100)))]);
    let cart = vec![
        item("A", i64::MAX, "EUR", 1),
        item("B", i64::MAX, "EUR", 1),
    ];

    assert!(matches!(
        calculator.calculate_total_discount(&cart),
        Err(CoreError::Overflow { operation: "addition", .. })
    ));
}

#[test]
fn invalid_percentage_cannot_be_built() {
    assert!(matches!(
        Percentage::new(101),
        Err(CoreError::InvalidPercentage { value: 101 })
    ));
}

#[test]
fn discounts_are_shareable_across_threads() {
    let discounts: Vec<Arc<dyn Discount>> = vec![Arc::new(PercentageDiscount::new(pct(10)))];
    let calculator = Arc::new(DiscountCalculator::with_discounts(discounts));

    let handles: Vec<_> = (1..=4)
        .map(|n| {
            let calculator = Arc::clone(&calculator);
            std::thread::spawn(move || {
                let cart = vec![item("A", 100 * n, "EUR", 1)];
                calculator.calculate_total_discount(&cart).unwrap().amount()
            })
        })
        .collect();

    let results: Vec<i64> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results, vec![10, 20, 30, 40]);
}
