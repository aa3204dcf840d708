// ── Catalog controller ──
//
// Owns the product-list and loading state, orchestrates fetches through
// the repository seam, and exposes read state to presentation layers via
// watch channels. Favorite toggles are delegated to the FavoriteSet.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::error::FetchErrorKind;
use crate::model::{Product, ProductId};
use crate::repository::ProductSource;
use crate::store::{FavoriteSet, ProductList};

/// Fetch state observable by consumers.
///
/// `Failed` carries the error class so a presentation layer can render a
/// deliberate retry affordance instead of staring at an empty list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchState {
    /// No fetch has run yet (or none is in flight and none has settled).
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The most recent fetch succeeded; the list holds its result.
    Loaded,
    /// The most recent fetch failed; the list holds its prior value.
    Failed { kind: FetchErrorKind },
}

/// The main entry point for presentation consumers.
///
/// Cheaply cloneable via `Arc`; generic over the catalog source so tests
/// inject a scripted one. All exposed state lives behind watch channels:
/// the product list (server order preserved), the fetch state, and the
/// favorite set.
pub struct CatalogController<S: ProductSource> {
    inner: Arc<Inner<S>>,
}

impl<S: ProductSource> Clone for CatalogController<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<S> {
    source: S,
    products: ProductList,
    favorites: FavoriteSet,
    fetch_state: watch::Sender<FetchState>,
    request_token: AtomicU64,
}

impl<S: ProductSource> CatalogController<S> {
    pub fn new(source: S) -> Self {
        let (fetch_state, _) = watch::channel(FetchState::Idle);
        Self {
            inner: Arc::new(Inner {
                source,
                products: ProductList::new(),
                favorites: FavoriteSet::new(),
                fetch_state,
                request_token: AtomicU64::new(0),
            }),
        }
    }

    // ── Fetch orchestration ──────────────────────────────────────

    /// Fetch the catalog, returning the settled state.
    ///
    /// Single-flight: at most one fetch is in flight per controller. A
    /// caller that arrives while one is running attaches to it and returns
    /// its outcome instead of starting a second request. Failures are
    /// logged and absorbed here — the product list keeps its prior value
    /// and the outcome is reported through [`FetchState`].
    pub async fn fetch_products(&self) -> FetchState {
        // Subscribe before claiming so the settling transition can't be missed.
        let mut rx = self.inner.fetch_state.subscribe();

        let claimed = self.inner.fetch_state.send_if_modified(|state| {
            if *state == FetchState::Loading {
                false
            } else {
                *state = FetchState::Loading;
                true
            }
        });

        if claimed {
            let token = self.inner.request_token.fetch_add(1, Ordering::SeqCst) + 1;
            tokio::spawn(run_fetch(Arc::clone(&self.inner), token));
        }

        // Claimer and attachers alike wait for the in-flight request to settle.
        // The spawned task survives caller cancellation, so the state channel
        // always leaves Loading eventually.
        loop {
            let state = *rx.borrow_and_update();
            if state != FetchState::Loading {
                return state;
            }
            if rx.changed().await.is_err() {
                return FetchState::Idle;
            }
        }
    }

    /// Current fetch state.
    pub fn fetch_state(&self) -> FetchState {
        *self.inner.fetch_state.borrow()
    }

    /// `true` while a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.fetch_state() == FetchState::Loading
    }

    /// Subscribe to fetch state transitions.
    pub fn subscribe_fetch_state(&self) -> watch::Receiver<FetchState> {
        self.inner.fetch_state.subscribe()
    }

    // ── Product list (delegates to ProductList) ──────────────────

    /// Current product list, in server order.
    pub fn products(&self) -> Arc<Vec<Arc<Product>>> {
        self.inner.products.snapshot()
    }

    /// Linear lookup by id over the current list.
    pub fn product_by_id(&self, id: ProductId) -> Option<Arc<Product>> {
        self.inner.products.by_id(id)
    }

    /// Subscribe to product list replacements.
    pub fn subscribe_products(&self) -> watch::Receiver<Arc<Vec<Arc<Product>>>> {
        self.inner.products.subscribe()
    }

    // ── Favorites (delegates to FavoriteSet) ─────────────────────

    pub fn add_to_favorites(&self, id: ProductId) {
        self.inner.favorites.add(id);
    }

    pub fn remove_from_favorites(&self, id: ProductId) {
        self.inner.favorites.remove(id);
    }

    pub fn is_favorite(&self, id: ProductId) -> bool {
        self.inner.favorites.is_favorite(id)
    }

    pub fn favorites(&self) -> Arc<std::collections::BTreeSet<ProductId>> {
        self.inner.favorites.snapshot()
    }

    pub fn favorite_count(&self) -> usize {
        self.inner.favorites.count()
    }

    pub fn subscribe_favorites(
        &self,
    ) -> watch::Receiver<Arc<std::collections::BTreeSet<ProductId>>> {
        self.inner.favorites.subscribe()
    }
}

/// Run one fetch to completion and commit its outcome.
///
/// Runs as a spawned task so an in-flight fetch cannot be cancelled by the
/// caller going away. The token guards the commit: if a newer request has
/// started since this one, the completion is stale and must not overwrite
/// the exposed list or state.
async fn run_fetch<S: ProductSource>(inner: Arc<Inner<S>>, token: u64) {
    let result = inner.source.fetch_products().await;

    if inner.request_token.load(Ordering::SeqCst) != token {
        debug!(token, "discarding stale fetch completion");
        return;
    }

    match result {
        Ok(products) => {
            debug!(count = products.len(), "catalog fetch complete");
            inner.products.replace(products);
            let _ = inner.fetch_state.send(FetchState::Loaded);
        }
        Err(e) => {
            // The prior list stays visible; consumers learn about the
            // failure through the state channel, not through a panic or
            // an emptied list.
            warn!(error = %e, "catalog fetch failed");
            let _ = inner.fetch_state.send(FetchState::Failed {
                kind: e.fetch_kind(),
            });
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use super::*;
    use crate::error::CoreError;

    fn product(id: u32, name: &str) -> Product {
        Product {
            id: ProductId(id),
            name: name.into(),
            price: 9.99,
            rating: "4.5".into(),
            image_url: format!("http://x/{id}.png"),
            description: format!("d{id}"),
        }
    }

    /// Catalog source fed from a queue of canned outcomes, with an
    /// optional artificial latency and a call counter.
    struct ScriptedSource {
        calls: AtomicUsize,
        responses: Mutex<VecDeque<Result<Vec<Product>, CoreError>>>,
        delay: Duration,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<Vec<Product>, CoreError>>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                responses: Mutex::new(responses.into()),
                delay: Duration::ZERO,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl ProductSource for Arc<ScriptedSource> {
        async fn fetch_products(&self) -> Result<Vec<Product>, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Ok(Vec::new()))
        }
    }

    fn network_err() -> CoreError {
        CoreError::Network {
            message: "connection refused".into(),
        }
    }

    fn decode_err() -> CoreError {
        CoreError::Decode {
            message: "invalid type: map, expected a sequence".into(),
        }
    }

    #[tokio::test]
    async fn successful_fetch_exposes_list_in_order() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(vec![
            product(3, "c"),
            product(1, "a"),
        ])]));
        let controller = CatalogController::new(Arc::clone(&source));

        assert_eq!(controller.fetch_state(), FetchState::Idle);
        let state = controller.fetch_products().await;

        assert_eq!(state, FetchState::Loaded);
        assert!(!controller.is_loading());
        let ids: Vec<u32> = controller.products().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[tokio::test]
    async fn single_product_scenario() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(vec![product(1, "A")])]));
        let controller = CatalogController::new(source);

        controller.fetch_products().await;

        let products = controller.products();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, ProductId(1));
        assert_eq!(products[0].display_price(), "$9.99");

        let found = controller.product_by_id(ProductId(1)).unwrap();
        assert_eq!(found.name, "A");
        assert!(controller.product_by_id(ProductId(2)).is_none());
    }

    #[tokio::test]
    async fn first_fetch_network_failure_leaves_list_empty() {
        let source = Arc::new(ScriptedSource::new(vec![Err(network_err())]));
        let controller = CatalogController::new(source);

        let state = controller.fetch_products().await;

        assert_eq!(
            state,
            FetchState::Failed {
                kind: FetchErrorKind::Network
            }
        );
        assert!(controller.products().is_empty());
        assert!(!controller.is_loading());
    }

    #[tokio::test]
    async fn failed_refetch_keeps_previous_list() {
        let source = Arc::new(ScriptedSource::new(vec![
            Ok(vec![product(1, "a"), product(2, "b")]),
            Err(decode_err()),
        ]));
        let controller = CatalogController::new(source);

        assert_eq!(controller.fetch_products().await, FetchState::Loaded);
        let state = controller.fetch_products().await;

        assert_eq!(
            state,
            FetchState::Failed {
                kind: FetchErrorKind::Decode
            }
        );
        assert_eq!(controller.products().len(), 2);
        assert_eq!(controller.product_by_id(ProductId(2)).unwrap().name, "b");
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_fetches_coalesce_into_one_request() {
        let source = Arc::new(
            ScriptedSource::new(vec![Ok(vec![product(1, "a")])])
                .with_delay(Duration::from_millis(100)),
        );
        let controller = CatalogController::new(Arc::clone(&source));

        let first = tokio::spawn({
            let c = controller.clone();
            async move { c.fetch_products().await }
        });
        let second = tokio::spawn({
            let c = controller.clone();
            async move { c.fetch_products().await }
        });

        assert_eq!(first.await.unwrap(), FetchState::Loaded);
        assert_eq!(second.await.unwrap(), FetchState::Loaded);
        assert_eq!(source.call_count(), 1);
        assert_eq!(controller.products().len(), 1);
    }

    #[tokio::test]
    async fn stale_completion_is_discarded() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(vec![product(7, "stale")])]));
        let controller = CatalogController::new(source);

        // A newer request (token 2) has started since token 1 was issued.
        controller.inner.request_token.store(2, Ordering::SeqCst);
        run_fetch(Arc::clone(&controller.inner), 1).await;

        assert!(controller.products().is_empty());
        assert_eq!(controller.fetch_state(), FetchState::Idle);
    }

    #[tokio::test]
    async fn sequential_fetches_each_hit_the_source() {
        let source = Arc::new(ScriptedSource::new(vec![
            Ok(vec![product(1, "a")]),
            Ok(vec![product(2, "b")]),
        ]));
        let controller = CatalogController::new(Arc::clone(&source));

        controller.fetch_products().await;
        controller.fetch_products().await;

        assert_eq!(source.call_count(), 2);
        let ids: Vec<u32> = controller.products().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn favorites_are_independent_of_fetch_outcome() {
        let source = Arc::new(ScriptedSource::new(vec![Err(network_err())]));
        let controller = CatalogController::new(source);

        // Id 42 is in no fetched list, and the fetch fails anyway.
        controller.add_to_favorites(ProductId(42));
        controller.fetch_products().await;

        assert!(controller.is_favorite(ProductId(42)));
        assert_eq!(controller.favorite_count(), 1);
        assert!(controller.favorites().contains(&ProductId(42)));
    }

    #[tokio::test]
    async fn favorite_delegation_round_trip() {
        let source = Arc::new(ScriptedSource::new(Vec::new()));
        let controller = CatalogController::new(source);

        controller.add_to_favorites(ProductId(5));
        assert!(controller.is_favorite(ProductId(5)));
        controller.remove_from_favorites(ProductId(5));
        assert!(!controller.is_favorite(ProductId(5)));
    }

    #[tokio::test]
    async fn fetch_state_transitions_reach_subscribers() {
        let source = Arc::new(ScriptedSource::new(vec![Ok(vec![product(1, "a")])]));
        let controller = CatalogController::new(source);
        let mut rx = controller.subscribe_fetch_state();

        controller.fetch_products().await;

        let mut seen = Vec::new();
        while rx.has_changed().unwrap() {
            seen.push(*rx.borrow_and_update());
            if seen.last() == Some(&FetchState::Loaded) {
                break;
            }
        }
        assert!(seen.contains(&FetchState::Loaded));
    }
}
