//! Key-value persistence seam
//!
//! The engine persists through a collaborator offering get/set/remove by
//! string key, one JSON document per key. [`MemoryStore`] is the bundled
//! implementation for tests and hosts without a browser-style backend;
//! embedders supply their own [`KeyValueStore`] over whatever medium they
//! have.

use rustc_hash::FxHashMap;

/// Persistence keys, one JSON document per key.
pub mod keys {
    /// Live cart entry list.
    pub const CART: &str = "fashionhub_cart";

    /// Wishlist entry list.
    pub const WISHLIST: &str = "fashionhub_wishlist";

    /// Saved-for-later cart snapshot.
    pub const SAVED_CART: &str = "fashionhub_saved_cart";

    /// Mock signed-in user record.
    pub const USER: &str = "fashionhub_user";

    /// Order history, newest first.
    pub const ORDERS: &str = "fashionhub_orders";
}

/// The storage collaborator.
///
/// Writes are best-effort and fire-and-forget: implementations must not
/// surface failures to the engine.
pub trait KeyValueStore {
    /// Read the value at `key`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write `value` at `key`, replacing any prior value.
    fn set(&mut self, key: &str, value: String);

    /// Delete the value at `key` if present.
    fn remove(&mut self, key: &str);
}

/// In-memory [`KeyValueStore`].
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: FxHashMap<String, String>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Number of keys held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_returns_the_value() {
        let mut store = MemoryStore::new();

        store.set("k", "v".to_owned());

        assert_eq!(store.get("k"), Some("v".to_owned()));
    }

    #[test]
    fn set_overwrites_the_prior_value() {
        let mut store = MemoryStore::new();

        store.set("k", "old".to_owned());
        store.set("k", "new".to_owned());

        assert_eq!(store.get("k"), Some("new".to_owned()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_deletes_the_key() {
        let mut store = MemoryStore::new();

        store.set("k", "v".to_owned());
        store.remove("k");

        assert_eq!(store.get("k"), None);
        assert!(store.is_empty());
    }

    #[test]
    fn missing_keys_read_as_none() {
        let store = MemoryStore::new();

        assert_eq!(store.get("missing"), None);
    }
}
