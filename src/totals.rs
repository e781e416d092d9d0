//! Aggregate totals
//!
//! Derived figures over the current line items: unit counts, subtotal,
//! shipping, tax and grand total. [`CartTotals::of`] always recomputes from
//! scratch; [`TotalsCache`] memoizes on the cart's version counter so
//! repeated reads between mutations are free without risking drift.

use rust_decimal::Decimal;

use crate::{cart::Cart, money::normalize};

/// Subtotal above which shipping is free.
pub const FREE_SHIPPING_THRESHOLD: u32 = 5_000;

/// Flat shipping fee charged below the free-shipping threshold.
pub const FLAT_SHIPPING_FEE: u32 = 250;

/// Sales tax rate as a percentage of the subtotal.
pub const TAX_RATE_PERCENT: u32 = 16;

/// Derived totals for a cart. Never persisted; always recomputable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartTotals {
    /// Sum of every entry's quantity.
    pub total_items: u32,

    /// Sum of normalized price times quantity across entries.
    pub total_price: Decimal,

    /// Number of distinct entries.
    pub item_count: usize,

    /// Whether the subtotal clears [`FREE_SHIPPING_THRESHOLD`].
    pub is_free_shipping: bool,

    /// Zero once free shipping applies, [`FLAT_SHIPPING_FEE`] otherwise.
    pub shipping_cost: Decimal,

    /// [`TAX_RATE_PERCENT`] of the subtotal.
    pub tax: Decimal,

    /// Subtotal plus shipping plus tax.
    pub grand_total: Decimal,
}

impl CartTotals {
    /// Recompute every aggregate from the cart's current entries.
    pub fn of(cart: &Cart) -> Self {
        let total_items = cart.iter().map(|entry| entry.quantity).sum();
        let total_price = cart.iter().fold(Decimal::ZERO, |acc, entry| {
            acc + normalize(&entry.product.price) * Decimal::from(entry.quantity)
        });

        let is_free_shipping = total_price > Decimal::from(FREE_SHIPPING_THRESHOLD);
        let shipping_cost = if is_free_shipping {
            Decimal::ZERO
        } else {
            Decimal::from(FLAT_SHIPPING_FEE)
        };
        let tax = total_price * Decimal::from(TAX_RATE_PERCENT) / Decimal::ONE_HUNDRED;

        CartTotals {
            total_items,
            total_price,
            item_count: cart.len(),
            is_free_shipping,
            shipping_cost,
            tax,
            grand_total: total_price + shipping_cost + tax,
        }
    }

    /// Totals for an empty cart.
    pub fn empty() -> Self {
        CartTotals::of(&Cart::new())
    }
}

/// Memoized wrapper over [`CartTotals::of`], keyed on [`Cart::version`].
///
/// Purely an optimization: a cache hit returns exactly what a fresh
/// recomputation would. Must be paired with a single cart instance, whose
/// version counter never repeats a value for distinct states.
#[derive(Debug, Default)]
pub struct TotalsCache {
    cached: Option<(u64, CartTotals)>,
}

impl TotalsCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        TotalsCache::default()
    }

    /// Totals for the cart, recomputed only if it changed since the last call.
    pub fn totals(&mut self, cart: &Cart) -> CartTotals {
        if let Some((version, totals)) = self.cached {
            if version == cart.version() {
                return totals;
            }
        }

        let totals = CartTotals::of(cart);
        self.cached = Some((cart.version(), totals));

        totals
    }
}
