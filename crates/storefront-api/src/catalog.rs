// Catalog endpoint client
//
// Wraps `reqwest::Client` with the storefront-specific URL construction and
// strict body decoding. The endpoint is a single unauthenticated GET that
// returns the complete catalog as one JSON array; there is no pagination,
// no retry, and no envelope to unwrap.

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::Error;

/// Default catalog host.
pub const DEFAULT_BASE_URL: &str = "https://api.npoint.io/";

/// Default resource path under the base URL.
pub const DEFAULT_RESOURCE: &str = "866592d4df655060f42c";

/// One product as it appears on the wire.
///
/// Field presence is strict: a record missing any field, or carrying one we
/// don't know, fails the whole decode. The catalog schema is fixed; drift
/// should surface as an error rather than as silently dropped data.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ProductRecord {
    pub id: u32,
    pub name: String,
    pub price: f64,
    /// Opaque text in the source system ("4.7", free text) — never parsed.
    pub rating: String,
    pub image_url: String,
    pub description: String,
}

/// HTTP client for the catalog endpoint.
///
/// Holds a shared `reqwest::Client` built once at process start and injected
/// here, so every consumer goes through the same configured transport.
#[derive(Debug)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: Url,
    resource: String,
}

impl CatalogClient {
    /// Create a client against the given base URL and resource path with a
    /// pre-built `reqwest::Client`.
    pub fn new(http: reqwest::Client, base_url: Url, resource: impl Into<String>) -> Self {
        Self {
            http,
            base_url,
            resource: resource.into(),
        }
    }

    /// Create a client against the default public catalog endpoint.
    pub fn with_defaults(http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(DEFAULT_BASE_URL)?;
        Ok(Self::new(http, base_url, DEFAULT_RESOURCE))
    }

    /// The catalog base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full URL of the catalog resource.
    pub fn resource_url(&self) -> Result<Url, Error> {
        Ok(self.base_url.join(&self.resource)?)
    }

    /// Fetch the complete catalog.
    ///
    /// Exactly one GET. A non-success status or transport failure is a
    /// network error; a body that does not parse as an array of
    /// [`ProductRecord`] is a decode error carrying the raw body.
    pub async fn fetch_products(&self) -> Result<Vec<ProductRecord>, Error> {
        let url = self.resource_url()?;
        debug!("GET {url}");

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            return Err(Error::Status {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        serde_json::from_str::<Vec<ProductRecord>>(&body).map_err(|e| Error::Decode {
            message: e.to_string(),
            body,
        })
    }
}
