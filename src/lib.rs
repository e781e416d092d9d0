//! Trolley
//!
//! Trolley is a storefront cart, wishlist and pricing engine: line items,
//! derived totals, coupons, order history and key-value persistence,
//! independent of any UI framework.

pub mod cart;
pub mod coupons;
pub mod money;
pub mod orders;
pub mod prelude;
pub mod products;
pub mod session;
pub mod storage;
pub mod totals;
pub mod wishlist;
