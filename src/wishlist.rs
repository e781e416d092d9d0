//! Wishlist store
//!
//! A parallel store of saved-for-later product snapshots. Entries carry no
//! quantity: re-entering the cart always starts at one unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::products::{ProductId, ProductSnapshot};

/// A product saved for later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistEntry {
    /// Product data as captured when the item was saved.
    #[serde(flatten)]
    pub product: ProductSnapshot,

    /// When the entry was saved.
    pub added_at: DateTime<Utc>,
}

/// Outcome of a wishlist transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WishlistEvent {
    /// The product was saved.
    Added(ProductId),

    /// The product was already saved; the store is unchanged.
    AlreadyPresent(ProductId),

    /// The entry was removed.
    Removed(ProductId),

    /// No entry with the id exists; the store is unchanged.
    NotFound(ProductId),
}

/// The wishlist store, keyed by product id, insertion order preserved.
#[derive(Debug, Default)]
pub struct Wishlist {
    entries: Vec<WishlistEntry>,
}

impl Wishlist {
    /// Create an empty wishlist.
    pub fn new() -> Self {
        Wishlist::default()
    }

    /// Rebuild a wishlist from previously persisted entries, keeping the
    /// first occurrence of each id.
    pub fn with_entries(entries: Vec<WishlistEntry>) -> Self {
        let mut wishlist = Wishlist::new();

        for entry in entries {
            if !wishlist.contains(&entry.product.id) {
                wishlist.entries.push(entry);
            }
        }

        wishlist
    }

    /// Save the product, skipping duplicates.
    pub fn add(&mut self, product: ProductSnapshot) -> WishlistEvent {
        if self.contains(&product.id) {
            return WishlistEvent::AlreadyPresent(product.id);
        }

        let id = product.id.clone();
        self.entries.push(WishlistEntry {
            product,
            added_at: Utc::now(),
        });

        WishlistEvent::Added(id)
    }

    /// Remove the entry with the given id. A missing id is a no-op.
    pub fn remove(&mut self, id: &ProductId) -> WishlistEvent {
        match self.take(id) {
            Some(entry) => WishlistEvent::Removed(entry.product.id),
            None => WishlistEvent::NotFound(id.clone()),
        }
    }

    /// Remove and return the entry with the given id.
    pub fn take(&mut self, id: &ProductId) -> Option<WishlistEntry> {
        let index = self
            .entries
            .iter()
            .position(|entry| &entry.product.id == id)?;

        Some(self.entries.remove(index))
    }

    /// Whether an entry with the given id exists.
    pub fn contains(&self, id: &ProductId) -> bool {
        self.entries.iter().any(|entry| &entry.product.id == id)
    }

    /// Get the entry with the given id.
    pub fn get(&self, id: &ProductId) -> Option<&WishlistEntry> {
        self.entries.iter().find(|entry| &entry.product.id == id)
    }

    /// The current entries, in insertion order.
    pub fn entries(&self) -> &[WishlistEntry] {
        &self.entries
    }

    /// Iterate over the entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &WishlistEntry> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the wishlist holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
