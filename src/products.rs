//! Products

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money::RawPrice;

/// Product identifier, the key for cart and wishlist entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(String);

impl ProductId {
    /// Create a product id.
    pub fn new(id: impl Into<String>) -> Self {
        ProductId(id.into())
    }

    /// The id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(id: &str) -> Self {
        ProductId::new(id)
    }
}

/// A copy of product data taken at the moment it enters a cart or wishlist.
///
/// Denormalized by design: later changes to the canonical catalog do not
/// reach entries that already hold a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    /// Product identifier.
    pub id: ProductId,

    /// Display name.
    pub name: String,

    /// Price as captured, numeric or formatted text.
    pub price: RawPrice,

    /// Reference to the product image.
    pub image_ref: String,

    /// Promotional discount percentage shown on the listing, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u8>,

    /// Category label, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl ProductSnapshot {
    /// Create a snapshot with the required fields only.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        price: impl Into<RawPrice>,
        image_ref: impl Into<String>,
    ) -> Self {
        ProductSnapshot {
            id: id.into(),
            name: name.into(),
            price: price.into(),
            image_ref: image_ref.into(),
            discount_percent: None,
            category: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn snapshot_round_trips_through_json() -> TestResult {
        let snapshot = ProductSnapshot {
            category: Some("winter".to_owned()),
            discount_percent: Some(15),
            ..ProductSnapshot::new("p1", "Wool Coat", "Rs.13,500", "coat.jpg")
        };

        let json = serde_json::to_string(&snapshot)?;
        let back: ProductSnapshot = serde_json::from_str(&json)?;

        assert_eq!(back, snapshot);

        Ok(())
    }

    #[test]
    fn optional_fields_default_when_absent() -> TestResult {
        let json = r#"{"id":"p2","name":"Scarf","price":950,"imageRef":"scarf.jpg"}"#;

        let snapshot: ProductSnapshot = serde_json::from_str(json)?;

        assert_eq!(snapshot.discount_percent, None);
        assert_eq!(snapshot.category, None);

        Ok(())
    }
}
