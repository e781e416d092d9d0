//! Coupon resolution
//!
//! A static, case-insensitive table of coupon codes. Resolving a code
//! against the current totals yields a [`Discount`]; the discount is never
//! persisted and must be reapplied against the live aggregate each time.

use rust_decimal::Decimal;
use thiserror::Error;

use crate::totals::CartTotals;

/// Errors from coupon resolution.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CouponError {
    /// The code does not match any known coupon.
    #[error("invalid coupon code: {0}")]
    Unknown(String),
}

/// A resolved discount, computed against a specific set of totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discount {
    /// Percentage off the subtotal (rate as a fraction, amount in money).
    Percentage(Decimal, Decimal),

    /// The current shipping cost is waived (waived amount in money).
    FreeShipping(Decimal),
}

impl Discount {
    /// The amount this discount takes off the grand total.
    pub fn amount(&self) -> Decimal {
        match self {
            Discount::Percentage(_, amount) => *amount,
            Discount::FreeShipping(value) => *value,
        }
    }
}

/// Resolve a coupon code against the current totals.
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Errors
///
/// Returns [`CouponError::Unknown`] for an unrecognized code; the totals
/// are unaffected either way.
pub fn apply(code: &str, totals: &CartTotals) -> Result<Discount, CouponError> {
    let rate = match code.trim().to_ascii_uppercase().as_str() {
        "WELCOME10" => Decimal::new(10, 2),
        "FASHION20" => Decimal::new(20, 2),
        "SUMMER25" => Decimal::new(25, 2),
        "FREESHIP" => return Ok(Discount::FreeShipping(totals.shipping_cost)),
        _ => return Err(CouponError::Unknown(code.to_owned())),
    };

    Ok(Discount::Percentage(rate, totals.total_price * rate))
}

/// Grand total after a discount, floored at zero.
pub fn discounted_total(grand_total: Decimal, discount: &Discount) -> Decimal {
    (grand_total - discount.amount()).max(Decimal::ZERO)
}
