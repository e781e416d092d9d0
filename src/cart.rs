//! Line-item store
//!
//! [`Cart`] owns the active line items: product snapshots with quantities,
//! keyed by product id with insertion order preserved for display. Every
//! transition is a pure state change that returns a [`CartEvent`] describing
//! what happened; deciding how (or whether) to notify the user about it is
//! the caller's concern.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::products::{ProductId, ProductSnapshot};

/// Upper bound on the quantity of a single line item.
pub const MAX_QUANTITY: u32 = 10;

/// A product held in the cart with a quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartEntry {
    /// Product data as captured when the item entered the cart.
    #[serde(flatten)]
    pub product: ProductSnapshot,

    /// Units of the product, always in `1..=MAX_QUANTITY`.
    pub quantity: u32,

    /// When the entry was first added.
    pub added_at: DateTime<Utc>,
}

/// Outcome of a cart transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    /// A new entry was inserted with the given quantity.
    Added(ProductId, u32),

    /// An existing entry's quantity rose to the given value.
    QuantityIncreased(ProductId, u32),

    /// An existing entry's quantity fell to the given value.
    QuantityDecreased(ProductId, u32),

    /// The requested quantity equals the entry's current quantity.
    QuantityUnchanged(ProductId),

    /// The entry was removed.
    Removed(ProductId),

    /// The transition would push the quantity past [`MAX_QUANTITY`]; the
    /// store is unchanged.
    MaxQuantityReached(ProductId),

    /// No entry with the id exists; the store is unchanged.
    NotFound(ProductId),

    /// All entries were removed.
    Cleared,

    /// The store was already empty.
    AlreadyEmpty,
}

/// The line-item store.
#[derive(Debug, Default)]
pub struct Cart {
    entries: Vec<CartEntry>,
    version: u64,
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Rebuild a cart from previously persisted entries.
    ///
    /// Entries are sanitized on the way in: duplicate ids keep the first
    /// occurrence and quantities are clamped into `1..=MAX_QUANTITY`.
    pub fn with_entries(entries: Vec<CartEntry>) -> Self {
        let mut cart = Cart::new();
        cart.replace_entries(entries);
        cart
    }

    /// Replace the whole entry list, applying the same sanitization as
    /// [`Cart::with_entries`].
    pub fn replace_entries(&mut self, entries: Vec<CartEntry>) {
        self.entries.clear();

        for mut entry in entries {
            if self.position(&entry.product.id).is_some() {
                continue;
            }

            entry.quantity = entry.quantity.clamp(1, MAX_QUANTITY);
            self.entries.push(entry);
        }

        self.version += 1;
    }

    /// Add the product, or increase the quantity of its existing entry.
    ///
    /// The cumulative quantity is capped at [`MAX_QUANTITY`]: a partial
    /// increase clamps to the cap, and an entry already at the cap is left
    /// unchanged with [`CartEvent::MaxQuantityReached`]. A `quantity` of
    /// zero is treated as one.
    pub fn add(&mut self, product: ProductSnapshot, quantity: u32) -> CartEvent {
        let quantity = quantity.max(1);

        if let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.product.id == product.id)
        {
            if entry.quantity >= MAX_QUANTITY {
                return CartEvent::MaxQuantityReached(product.id);
            }

            entry.quantity = entry.quantity.saturating_add(quantity).min(MAX_QUANTITY);
            let reached = entry.quantity;
            self.version += 1;

            return CartEvent::QuantityIncreased(product.id, reached);
        }

        let quantity = quantity.min(MAX_QUANTITY);
        let id = product.id.clone();

        self.entries.push(CartEntry {
            product,
            quantity,
            added_at: Utc::now(),
        });
        self.version += 1;

        CartEvent::Added(id, quantity)
    }

    /// Remove the entry with the given id. A missing id is a no-op.
    pub fn remove(&mut self, id: &ProductId) -> CartEvent {
        match self.take(id) {
            Some(entry) => CartEvent::Removed(entry.product.id),
            None => CartEvent::NotFound(id.clone()),
        }
    }

    /// Remove and return the entry with the given id.
    pub fn take(&mut self, id: &ProductId) -> Option<CartEntry> {
        let index = self.position(id)?;
        let entry = self.entries.remove(index);
        self.version += 1;

        Some(entry)
    }

    /// Set an entry's quantity.
    ///
    /// Below one removes the entry; above [`MAX_QUANTITY`] is rejected with
    /// the store unchanged. A missing id is a no-op.
    pub fn update_quantity(&mut self, id: &ProductId, quantity: u32) -> CartEvent {
        let Some(index) = self.position(id) else {
            return CartEvent::NotFound(id.clone());
        };

        if quantity < 1 {
            self.entries.remove(index);
            self.version += 1;
            return CartEvent::Removed(id.clone());
        }

        if quantity > MAX_QUANTITY {
            return CartEvent::MaxQuantityReached(id.clone());
        }

        let Some(entry) = self.entries.get_mut(index) else {
            return CartEvent::NotFound(id.clone());
        };

        let previous = entry.quantity;
        if quantity == previous {
            return CartEvent::QuantityUnchanged(id.clone());
        }

        entry.quantity = quantity;
        self.version += 1;

        if quantity > previous {
            CartEvent::QuantityIncreased(id.clone(), quantity)
        } else {
            CartEvent::QuantityDecreased(id.clone(), quantity)
        }
    }

    /// Remove every entry.
    pub fn clear(&mut self) -> CartEvent {
        if self.entries.is_empty() {
            return CartEvent::AlreadyEmpty;
        }

        self.entries.clear();
        self.version += 1;

        CartEvent::Cleared
    }

    /// Whether an entry with the given id exists.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.position(id).is_some()
    }

    /// Whether the entry with the given id is at [`MAX_QUANTITY`], so any
    /// further [`Cart::add`] for it would be rejected.
    pub fn at_capacity(&self, id: &ProductId) -> bool {
        self.get(id)
            .is_some_and(|entry| entry.quantity >= MAX_QUANTITY)
    }

    /// Get the entry with the given id.
    pub fn get(&self, id: &ProductId) -> Option<&CartEntry> {
        self.entries.iter().find(|entry| &entry.product.id == id)
    }

    /// The current entries, in insertion order.
    pub fn entries(&self) -> &[CartEntry] {
        &self.entries
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CartEntry> {
        self.entries.iter()
    }

    /// Number of distinct entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cart holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Monotonic counter bumped on every state-changing transition.
    ///
    /// Derived-state caches key on this to invalidate exactly when the
    /// entry list or a quantity changes.
    pub fn version(&self) -> u64 {
        self.version
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.entries.iter().position(|entry| &entry.product.id == id)
    }
}
