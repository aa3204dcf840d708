// storefront-core: Reactive data layer between storefront-api and consumers.

pub mod connectivity;
pub mod controller;
pub mod error;
pub mod model;
pub mod repository;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use connectivity::{ConnectionState, ConnectivityMonitor, ConnectivityWatch};
pub use controller::{CatalogController, FetchState};
pub use error::{CoreError, FetchErrorKind};
pub use model::{Product, ProductId};
pub use repository::{ProductRepository, ProductSource};
pub use store::{FavoriteSet, ProductList};
