// ── Repository seam ──
//
// The controller never talks to the HTTP client directly: it is generic
// over `ProductSource`, and `ProductRepository` is the production
// implementation delegating to `storefront_api::CatalogClient`. Tests
// substitute a scripted source.

use storefront_api::CatalogClient;

use crate::error::CoreError;
use crate::model::Product;

/// A substitutable source of the full product catalog.
pub trait ProductSource: Send + Sync + 'static {
    /// Fetch the complete catalog, in server order.
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, CoreError>> + Send;
}

/// Production catalog source: pure delegation to the API client, no
/// transformation beyond wire-to-domain conversion, no caching.
pub struct ProductRepository {
    client: CatalogClient,
}

impl ProductRepository {
    pub fn new(client: CatalogClient) -> Self {
        Self { client }
    }
}

impl ProductSource for ProductRepository {
    async fn fetch_products(&self) -> Result<Vec<Product>, CoreError> {
        let records = self.client.fetch_products().await?;
        Ok(records.into_iter().map(Product::from).collect())
    }
}
