use std::sync::Arc;

use proptest::prelude::*;
use rebate_core::{
    BestDiscountResolver, CartItem, Discount, DiscountResolver, FixedAmountDiscount,
    MinQuantityCondition, Money, Percentage, PercentageDiscount,
};

/// One generated discount: fixed or percentage, optionally gated on quantity,
/// occasionally in a foreign currency or with a negative fixed amount.
#[derive(Debug, Clone)]
enum Generated {
    Fixed { amount: i64, foreign: bool, min_qty: Option<i64> },
    Percent { value: i64, min_qty: Option<i64> },
}

impl Generated {
    fn build(&self) -> Arc<dyn Discount> {
        match self {
            Generated::Fixed { amount, foreign, min_qty } => {
                let currency = if *foreign { "USD" } else { "EUR" };
                let discount = FixedAmountDiscount::new(Money::new(*amount, currency));
                match min_qty {
                    Some(min) => Arc::new(discount.with_condition(MinQuantityCondition::new(*min))),
                    None => Arc::new(discount),
                }
            }
            Generated::Percent { value, min_qty } => {
                let discount = PercentageDiscount::new(Percentage::new(*value).unwrap());
                match min_qty {
                    Some(min) => Arc::new(discount.with_condition(MinQuantityCondition::new(*min))),
                    None => Arc::new(discount),
                }
            }
        }
    }
}

fn generated_discount() -> impl Strategy<Value = Generated> {
    prop_oneof![
        (-500i64..5_000, any::<bool>(), proptest::option::of(0i64..20)).prop_map(
            |(amount, foreign, min_qty)| Generated::Fixed { amount, foreign, min_qty }
        ),
        (0i64..=100, proptest::option::of(0i64..20))
            .prop_map(|(value, min_qty)| Generated::Percent { value, min_qty }),
    ]
}

proptest! {
    #[test]
    fn percentage_is_floor_of_unit_price(value in 0i64..=100, price in 0i64..10_000_000) {
        let item = CartItem::new("X", Money::new(price, "EUR"), 1).unwrap();
        let discount = PercentageDiscount::new(Percentage::new(value).unwrap());

        let amount = discount.calculate(&item).unwrap();
        prop_assert_eq!(amount.amount(), price * value / 100);
        prop_assert_eq!(amount.currency(), "EUR");
    }

    #[test]
    fn calculated_discount_is_never_negative(
        discount in generated_discount(),
        price in 0i64..2_000,
        quantity in 0i64..25,
    ) {
        let item = CartItem::new("X", Money::new(price, "EUR"), quantity).unwrap();
        if let Some(amount) = discount.build().calculate(&item) {
            prop_assert!(amount.amount() >= 0);
        }
    }

    #[test]
    fn resolved_discount_within_zero_and_line_total(
        discounts in proptest::collection::vec(generated_discount(), 0..8),
        price in 0i64..2_000,
        quantity in 0i64..25,
    ) {
        let item = CartItem::new("X", Money::new(price, "EUR"), quantity).unwrap();
        let resolver = BestDiscountResolver::new(discounts.iter().map(Generated::build).collect());

        let resolved = resolver.calculate_discount(&item);
        prop_assert!(resolved.amount() >= 0);
        prop_assert!(resolved.amount() <= item.total_price().amount());
        prop_assert_eq!(resolved.currency(), "EUR");
    }

    #[test]
    fn resolved_discount_is_capped_maximum(
        discounts in proptest::collection::vec(generated_discount(), 0..8),
        price in 0i64..2_000,
        quantity in 0i64..25,
    ) {
        let item = CartItem::new("X", Money::new(price, "EUR"), quantity).unwrap();
        let built: Vec<Arc<dyn Discount>> = discounts.iter().map(Generated::build).collect();

        let best = built
            .iter()
            .filter_map(|d| d.calculate(&item))
            .map(|m| m.amount())
            .max()
            .unwrap_or(0)
            .max(0);
        let expected = best.min(item.total_price().amount());

        let resolver = BestDiscountResolver::new(built.clone());
        prop_assert_eq!(resolver.calculate_discount(&item).amount(), expected);

        // The reported winner is the first discount reaching the maximum
        if let Some((index, amount)) = resolver.best_match(&item) {
            prop_assert_eq!(amount.amount(), best);
            let first = built
                .iter()
                .position(|d| d.calculate(&item).map(|m| m.amount()) == Some(best));
            prop_assert_eq!(Some(index), first);
        } else {
            prop_assert_eq!(best, 0);
        }
    }

    #[test]
    fn same_currency_addition_sums(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
        let total = Money::new(a, "EUR").checked_add(&Money::new(b, "EUR")).unwrap();
        prop_assert_eq!(total, Money::new(a + b, "EUR"));
    }

    #[test]
    fn cross_currency_addition_fails(a in any::<i32>(), b in any::<i32>()) {
        let result = Money::new(i64::from(a), "EUR").checked_add(&Money::new(i64::from(b), "USD"));
        prop_assert!(result.is_err());
    }
}
