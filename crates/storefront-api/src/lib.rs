// storefront-api: Async Rust client for the storefront catalog endpoint

pub mod catalog;
pub mod error;
pub mod transport;

pub use catalog::{CatalogClient, ProductRecord, DEFAULT_BASE_URL, DEFAULT_RESOURCE};
pub use error::Error;
pub use transport::TransportConfig;
