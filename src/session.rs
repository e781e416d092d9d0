//! Session facade
//!
//! [`Session`] is the explicitly owned state object the surrounding UI
//! threads through its component tree: it holds the live cart and wishlist,
//! mirrors their full state to the persistence collaborator after every
//! operation, and carries the cross-store moves, coupon tracking, saved-cart
//! snapshots and checkout that touch more than one store.
//!
//! Hydration is forgiving: an absent or malformed persisted document reads
//! as an empty store and is logged, never surfaced as an error.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    cart::{Cart, CartEntry, CartEvent},
    coupons::{self, CouponError, Discount},
    orders::{Customer, OrderIdSequence, OrderRecord},
    products::{ProductId, ProductSnapshot},
    storage::{KeyValueStore, keys},
    totals::{CartTotals, TotalsCache},
    wishlist::{Wishlist, WishlistEntry, WishlistEvent},
};

/// Point-in-time export of the cart, stored under its own key and
/// overwritten on each save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedCartSnapshot {
    /// The entries at the moment of saving.
    pub items: Vec<CartEntry>,

    /// When the snapshot was taken.
    pub saved_at: DateTime<Utc>,

    /// Total units across entries at the time.
    pub total_items: u32,

    /// Subtotal at the time.
    pub total_price: Decimal,
}

/// Mock signed-in user. Opaque to the engine: stored and returned as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Display name.
    pub name: String,

    /// Email address.
    pub email: String,

    /// Whether the user is signed in.
    pub is_logged_in: bool,

    /// Opaque session token.
    pub token: String,
}

/// Outcome of moving an item between the cart and the wishlist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    /// The item changed stores.
    Moved(ProductId),

    /// The destination already held the item. The removal from the source
    /// still happened; no duplicate entry was created.
    Duplicate(ProductId),

    /// The cart entry is already at [`crate::cart::MAX_QUANTITY`]; neither
    /// store changed.
    AtMaxQuantity(ProductId),

    /// The source does not hold the item; nothing changed.
    NotFound(ProductId),
}

/// Outcome of [`Session::load_saved_cart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The live cart was replaced wholesale with the snapshot's items.
    Loaded,

    /// No snapshot exists; the live cart is untouched.
    NothingSaved,
}

/// Errors from checkout.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Checkout requires at least one line item.
    #[error("cannot check out an empty cart")]
    EmptyCart,
}

/// A single shopper's session over a persistence collaborator.
#[derive(Debug)]
pub struct Session<S: KeyValueStore> {
    store: S,
    cart: Cart,
    wishlist: Wishlist,
    totals: TotalsCache,
    coupon: Option<String>,
    order_ids: OrderIdSequence,
}

impl<S: KeyValueStore> Session<S> {
    /// Open a session, hydrating the cart and wishlist from their keys.
    pub fn open(store: S) -> Self {
        let cart_entries: Vec<CartEntry> = read_json(&store, keys::CART).unwrap_or_default();
        let wishlist_entries: Vec<WishlistEntry> =
            read_json(&store, keys::WISHLIST).unwrap_or_default();

        debug!(
            cart = cart_entries.len(),
            wishlist = wishlist_entries.len(),
            "session hydrated"
        );

        Session {
            store,
            cart: Cart::with_entries(cart_entries),
            wishlist: Wishlist::with_entries(wishlist_entries),
            totals: TotalsCache::new(),
            coupon: None,
            order_ids: OrderIdSequence::new(),
        }
    }

    /// The live cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// The live wishlist.
    pub fn wishlist(&self) -> &Wishlist {
        &self.wishlist
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Tear the session down, handing the storage medium back.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Aggregate totals for the live cart.
    pub fn totals(&mut self) -> CartTotals {
        self.totals.totals(&self.cart)
    }

    /// Add a product to the cart and mirror the cart state.
    pub fn add_to_cart(&mut self, product: ProductSnapshot, quantity: u32) -> CartEvent {
        let event = self.cart.add(product, quantity);
        self.persist_cart();

        event
    }

    /// Remove a cart entry and mirror the cart state.
    pub fn remove_from_cart(&mut self, id: &ProductId) -> CartEvent {
        let event = self.cart.remove(id);
        self.persist_cart();

        event
    }

    /// Set a cart entry's quantity and mirror the cart state.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) -> CartEvent {
        let event = self.cart.update_quantity(id, quantity);
        self.persist_cart();

        event
    }

    /// Empty the cart and mirror the cart state.
    pub fn clear_cart(&mut self) -> CartEvent {
        let event = self.cart.clear();
        self.persist_cart();

        event
    }

    /// Move a cart entry to the wishlist, stripping its quantity.
    ///
    /// The cart removal happens even when the wishlist already holds the
    /// id; in that case no duplicate entry is created.
    pub fn move_to_wishlist(&mut self, id: &ProductId) -> MoveOutcome {
        let Some(entry) = self.cart.take(id) else {
            return MoveOutcome::NotFound(id.clone());
        };
        self.persist_cart();

        let outcome = match self.wishlist.add(entry.product) {
            WishlistEvent::Added(id) => MoveOutcome::Moved(id),
            _ => MoveOutcome::Duplicate(id.clone()),
        };
        self.persist_wishlist();

        outcome
    }

    /// Save a product to the wishlist and mirror the wishlist state.
    pub fn add_to_wishlist(&mut self, product: ProductSnapshot) -> WishlistEvent {
        let event = self.wishlist.add(product);
        self.persist_wishlist();

        event
    }

    /// Remove a wishlist entry and mirror the wishlist state.
    pub fn remove_from_wishlist(&mut self, id: &ProductId) -> WishlistEvent {
        let event = self.wishlist.remove(id);
        self.persist_wishlist();

        event
    }

    /// Move a wishlist entry back into the cart with quantity one.
    ///
    /// Quantity is not preserved across a round trip through the wishlist;
    /// re-entering the cart always starts at one unit. A cart entry already
    /// at the quantity cap rejects the move and the wishlist entry stays
    /// put.
    pub fn move_to_cart(&mut self, id: &ProductId) -> MoveOutcome {
        if !self.wishlist.contains(id) {
            return MoveOutcome::NotFound(id.clone());
        }

        if self.cart.at_capacity(id) {
            return MoveOutcome::AtMaxQuantity(id.clone());
        }

        let Some(entry) = self.wishlist.take(id) else {
            return MoveOutcome::NotFound(id.clone());
        };
        self.persist_wishlist();

        self.cart.add(entry.product, 1);
        self.persist_cart();

        MoveOutcome::Moved(id.clone())
    }

    /// Resolve a coupon code against the live totals and remember it.
    ///
    /// Only the code is remembered, never the computed amount: the discount
    /// is re-resolved against the live aggregate on every read, so cart
    /// mutations after application can never leave a stale figure.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::Unknown`] for an unrecognized code; any
    /// previously applied coupon stays in effect.
    pub fn apply_coupon(&mut self, code: &str) -> Result<Discount, CouponError> {
        let totals = self.totals();
        let discount = coupons::apply(code, &totals)?;
        self.coupon = Some(code.trim().to_ascii_uppercase());

        Ok(discount)
    }

    /// Forget the applied coupon.
    pub fn remove_coupon(&mut self) {
        self.coupon = None;
    }

    /// The applied coupon code, if any.
    pub fn applied_coupon(&self) -> Option<&str> {
        self.coupon.as_deref()
    }

    /// The discount for the applied coupon, resolved against live totals.
    pub fn active_discount(&mut self) -> Option<Discount> {
        let totals = self.totals();
        let code = self.coupon.as_deref()?;

        coupons::apply(code, &totals).ok()
    }

    /// Grand total minus any active discount, floored at zero.
    pub fn final_total(&mut self) -> Decimal {
        let totals = self.totals();

        match self.active_discount() {
            Some(discount) => coupons::discounted_total(totals.grand_total, &discount),
            None => totals.grand_total,
        }
    }

    /// Snapshot the cart under the saved-cart key, overwriting any prior
    /// snapshot, and return the snapshot.
    pub fn save_for_later(&mut self) -> SavedCartSnapshot {
        let totals = self.totals();
        let snapshot = SavedCartSnapshot {
            items: self.cart.entries().to_vec(),
            saved_at: Utc::now(),
            total_items: totals.total_items,
            total_price: totals.total_price,
        };

        write_json(&mut self.store, keys::SAVED_CART, &snapshot);

        snapshot
    }

    /// Replace the live cart with the saved snapshot's items, if one exists.
    pub fn load_saved_cart(&mut self) -> LoadOutcome {
        match read_json::<S, SavedCartSnapshot>(&self.store, keys::SAVED_CART) {
            Some(snapshot) => {
                self.cart.replace_entries(snapshot.items);
                self.persist_cart();

                LoadOutcome::Loaded
            }
            None => LoadOutcome::NothingSaved,
        }
    }

    /// Confirm the order: record it at the head of the order history, then
    /// clear the cart and the applied coupon.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::EmptyCart`] when there are no line items;
    /// nothing is written in that case.
    pub fn checkout(&mut self, customer: Customer) -> Result<OrderRecord, CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        let totals = self.totals();
        let discount = self.active_discount().map_or(Decimal::ZERO, |d| d.amount());

        let order = OrderRecord {
            order_id: self.order_ids.next_id(),
            customer,
            items: self.cart.entries().to_vec(),
            subtotal: totals.total_price,
            shipping: totals.shipping_cost,
            tax: totals.tax,
            discount,
            total: (totals.grand_total - discount).max(Decimal::ZERO),
            date: Utc::now(),
        };

        let mut history: Vec<OrderRecord> =
            read_json(&self.store, keys::ORDERS).unwrap_or_default();
        history.insert(0, order.clone());
        write_json(&mut self.store, keys::ORDERS, &history);

        self.cart.clear();
        self.coupon = None;
        self.persist_cart();

        Ok(order)
    }

    /// The order history, newest first.
    pub fn order_history(&self) -> Vec<OrderRecord> {
        read_json(&self.store, keys::ORDERS).unwrap_or_default()
    }

    /// The stored user record, if any.
    pub fn current_user(&self) -> Option<UserRecord> {
        read_json(&self.store, keys::USER)
    }

    /// Store the user record.
    pub fn save_user(&mut self, user: &UserRecord) {
        write_json(&mut self.store, keys::USER, user);
    }

    /// Delete the stored user record.
    pub fn sign_out(&mut self) {
        self.store.remove(keys::USER);
    }

    fn persist_cart(&mut self) {
        write_json(&mut self.store, keys::CART, self.cart.entries());
    }

    fn persist_wishlist(&mut self) {
        write_json(&mut self.store, keys::WISHLIST, self.wishlist.entries());
    }
}

/// Read and parse a JSON document. Absent or malformed data reads as
/// `None`; malformed data is logged and discarded.
fn read_json<S: KeyValueStore, T: DeserializeOwned>(store: &S, key: &str) -> Option<T> {
    let raw = store.get(key)?;

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(error) => {
            warn!(key, %error, "discarding malformed persisted state");
            None
        }
    }
}

/// Serialize and write a JSON document, best-effort.
fn write_json<S: KeyValueStore, T: Serialize + ?Sized>(store: &mut S, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, raw),
        Err(error) => warn!(key, %error, "state not serializable; key left untouched"),
    }
}
