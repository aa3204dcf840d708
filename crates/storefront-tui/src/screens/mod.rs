//! Screen modules and the shared view context they render from.

mod detail;
mod offline;
mod products;
mod profile;

pub use detail::DetailScreen;
pub use offline::render_offline_overlay;
pub use products::ProductsScreen;
pub use profile::ProfileScreen;

use std::collections::BTreeSet;
use std::sync::Arc;

use storefront_core::{ConnectionState, FetchState, Product, ProductId};

/// Read-only snapshot of core state, assembled once per frame.
///
/// Screens never touch the controller directly; they render whatever the
/// state surface says right now.
pub struct ViewCtx {
    pub products: Arc<Vec<Arc<Product>>>,
    pub fetch_state: FetchState,
    pub favorites: Arc<BTreeSet<ProductId>>,
    pub connectivity: ConnectionState,
}
