//! Integration tests for the pricing rules: normalization, shipping and
//! tax thresholds, and coupon arithmetic against derived totals.

use rust_decimal::Decimal;
use testresult::TestResult;

use trolley::{
    cart::Cart,
    coupons::{self, CouponError, Discount},
    money::{RawPrice, normalize},
    products::ProductSnapshot,
    totals::{CartTotals, FLAT_SHIPPING_FEE, TAX_RATE_PERCENT},
};

fn cart_with_subtotal(subtotal: f64) -> Cart {
    let mut cart = Cart::new();
    cart.add(ProductSnapshot::new("p1", "Item", subtotal, "item.jpg"), 1);

    cart
}

#[test]
fn normalization_is_total_over_catalog_price_shapes() {
    assert_eq!(normalize(&RawPrice::from("Rs.13,500")), Decimal::from(13_500));
    assert_eq!(normalize(&RawPrice::from(9_750.0)), Decimal::from(9_750));
    assert_eq!(normalize(&RawPrice::from("free")), Decimal::ZERO);
}

#[test]
fn shipping_flips_across_the_threshold() {
    let below = CartTotals::of(&cart_with_subtotal(4_000.0));
    let above = CartTotals::of(&cart_with_subtotal(6_000.0));

    assert_eq!(below.shipping_cost, Decimal::from(FLAT_SHIPPING_FEE));
    assert!(!below.is_free_shipping);

    assert_eq!(above.shipping_cost, Decimal::ZERO);
    assert!(above.is_free_shipping);
}

#[test]
fn grand_total_composes_subtotal_shipping_and_tax() {
    let totals = CartTotals::of(&cart_with_subtotal(4_000.0));

    let expected_tax =
        Decimal::from(4_000) * Decimal::from(TAX_RATE_PERCENT) / Decimal::ONE_HUNDRED;

    assert_eq!(totals.tax, expected_tax);
    assert_eq!(
        totals.grand_total,
        totals.total_price + totals.shipping_cost + totals.tax
    );
}

#[test]
fn percentage_coupons_discount_the_subtotal() -> TestResult {
    let totals = CartTotals::of(&cart_with_subtotal(4_000.0));

    let discount = coupons::apply("SUMMER25", &totals)?;

    assert_eq!(discount.amount(), Decimal::from(1_000));
    assert_eq!(
        coupons::discounted_total(totals.grand_total, &discount),
        totals.grand_total - Decimal::from(1_000)
    );

    Ok(())
}

#[test]
fn freeship_waives_exactly_the_current_shipping() -> TestResult {
    let totals = CartTotals::of(&cart_with_subtotal(4_000.0));

    let discount = coupons::apply("FREESHIP", &totals)?;

    assert_eq!(discount, Discount::FreeShipping(Decimal::from(250)));
    assert_eq!(
        coupons::discounted_total(totals.grand_total, &discount),
        totals.total_price + totals.tax
    );

    Ok(())
}

#[test]
fn an_unknown_code_changes_nothing() {
    let totals = CartTotals::of(&cart_with_subtotal(4_000.0));
    let before = totals.grand_total;

    let result = coupons::apply("EXPIRED99", &totals);

    assert!(matches!(result, Err(CouponError::Unknown(_))), "must reject");
    assert_eq!(totals.grand_total, before);
}

#[test]
fn unparsable_prices_contribute_zero_to_the_subtotal() {
    let mut cart = Cart::new();
    cart.add(ProductSnapshot::new("p1", "Coat", "Rs.1,000", "coat.jpg"), 1);
    cart.add(ProductSnapshot::new("p2", "Gift", "free", "gift.jpg"), 3);

    let totals = CartTotals::of(&cart);

    assert_eq!(totals.total_price, Decimal::from(1_000));
    assert_eq!(totals.total_items, 4);
}
