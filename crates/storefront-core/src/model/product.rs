use std::fmt;

use serde::{Deserialize, Serialize};

use storefront_api::ProductRecord;

/// Catalog-wide product identifier.
///
/// Unique within one fetch response; the sole key for lookups and for the
/// favorite set. The source contract uses a 32-bit integer.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u32> for ProductId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

/// One catalog item. Fully immutable once constructed; no relationships
/// between products.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    /// Non-negative decimal, rendered with a fixed `$` prefix.
    pub price: f64,
    /// Opaque text from the source system — displayed as-is, never parsed.
    pub rating: String,
    /// May be unreachable; rendering degrades to a placeholder.
    pub image_url: String,
    pub description: String,
}

impl Product {
    /// Price with the fixed currency prefix, e.g. `$9.99`.
    pub fn display_price(&self) -> String {
        format!("${:.2}", self.price)
    }
}

impl From<ProductRecord> for Product {
    fn from(rec: ProductRecord) -> Self {
        Self {
            id: ProductId(rec.id),
            name: rec.name,
            price: rec.price,
            rating: rec.rating,
            image_url: rec.image_url,
            description: rec.description,
        }
    }
}
