//! Trolley prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartEntry, CartEvent, MAX_QUANTITY},
    coupons::{CouponError, Discount, apply, discounted_total},
    money::{RawPrice, normalize},
    orders::{Customer, OrderIdSequence, OrderRecord},
    products::{ProductId, ProductSnapshot},
    session::{
        CheckoutError, LoadOutcome, MoveOutcome, SavedCartSnapshot, Session, UserRecord,
    },
    storage::{KeyValueStore, MemoryStore, keys},
    totals::{
        CartTotals, FLAT_SHIPPING_FEE, FREE_SHIPPING_THRESHOLD, TAX_RATE_PERCENT, TotalsCache,
    },
    wishlist::{Wishlist, WishlistEntry, WishlistEvent},
};
