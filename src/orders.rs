//! Orders
//!
//! A completed checkout becomes an [`OrderRecord`] prepended to the order
//! history. Everything here is finalized in memory; there is no payment
//! processing or server-side validation behind it.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::cart::CartEntry;

/// Customer details captured by the checkout form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Full name.
    pub name: String,

    /// Email address.
    pub email: String,

    /// Phone number.
    pub phone: String,

    /// Street address.
    pub address: String,

    /// City.
    pub city: String,

    /// Postal code.
    pub zip_code: String,
}

/// A completed order as stored in the order history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    /// Unique order identifier.
    pub order_id: String,

    /// Who placed the order.
    pub customer: Customer,

    /// The line items as they stood at confirmation.
    pub items: Vec<CartEntry>,

    /// Subtotal before shipping, tax and discounts.
    pub subtotal: Decimal,

    /// Shipping charged.
    pub shipping: Decimal,

    /// Tax charged.
    pub tax: Decimal,

    /// Coupon discount applied, zero when none was active.
    pub discount: Decimal,

    /// Amount the customer pays.
    pub total: Decimal,

    /// When the order was confirmed.
    pub date: DateTime<Utc>,
}

/// Issues order ids: a fixed prefix plus a strictly increasing token.
///
/// The token is the confirmation wall-clock in milliseconds, bumped past
/// the previously issued token when two orders land in the same
/// millisecond.
#[derive(Debug, Default)]
pub struct OrderIdSequence {
    last_token: i64,
}

impl OrderIdSequence {
    const PREFIX: &'static str = "ORD";

    /// Create a fresh sequence.
    pub fn new() -> Self {
        OrderIdSequence::default()
    }

    /// The next unique order id.
    pub fn next_id(&mut self) -> String {
        let millis = Utc::now().timestamp_millis();
        self.last_token = millis.max(self.last_token.saturating_add(1));

        format!("{}-{}", OrderIdSequence::PREFIX, self.last_token)
    }
}
