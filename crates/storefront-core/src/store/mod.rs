// ── Reactive state storage ──
//
// Watch-backed containers for the two pieces of session state: the latest
// fetched product list and the favorite-id set. Snapshots are Arc-shared
// so reads are cheap; every real mutation is pushed to subscribers.

mod favorites;
mod products;

pub use favorites::FavoriteSet;
pub use products::ProductList;
