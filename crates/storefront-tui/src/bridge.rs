//! Background bridges between core state and the TUI action loop.
//!
//! The data bridge forwards every core-state change (products, fetch
//! state, favorites, connectivity) into the action channel so the next
//! frame reflects it. The connectivity driver is the platform side of the
//! reachability channel: a periodic lightweight probe of the catalog host
//! feeding the ConnectivityMonitor.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use storefront_core::{
    CatalogController, ConnectivityMonitor, FetchState, ProductRepository,
};

use crate::action::Action;

const PROBE_INTERVAL: Duration = Duration::from_secs(15);

/// Forward core state changes into the action loop.
///
/// Also owns the fetch-on-reconnect behavior: when connectivity comes up
/// and nothing has ever been loaded, a refresh is requested — the
/// single-flight controller makes duplicates harmless.
pub fn spawn_data_bridge(
    controller: CatalogController<ProductRepository>,
    monitor: Arc<ConnectivityMonitor>,
    action_tx: UnboundedSender<Action>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut products_rx = controller.subscribe_products();
        let mut fetch_rx = controller.subscribe_fetch_state();
        let mut favorites_rx = controller.subscribe_favorites();
        let mut connectivity = monitor.subscribe();

        loop {
            let action = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,

                changed = products_rx.changed() => {
                    if changed.is_err() { break; }
                    debug!(count = products_rx.borrow_and_update().len(), "product list replaced");
                    Action::StateChanged
                }

                changed = fetch_rx.changed() => {
                    if changed.is_err() { break; }
                    debug!(state = ?*fetch_rx.borrow_and_update(), "fetch state changed");
                    Action::StateChanged
                }

                changed = favorites_rx.changed() => {
                    if changed.is_err() { break; }
                    favorites_rx.borrow_and_update();
                    Action::StateChanged
                }

                state = connectivity.changed() => {
                    let Some(state) = state else { break };
                    info!(?state, "connectivity transition");
                    if state.is_available() && controller.fetch_state() == FetchState::Idle {
                        let _ = action_tx.send(Action::Refresh);
                    }
                    Action::StateChanged
                }
            };

            if action_tx.send(action).is_err() {
                break;
            }
        }
    })
}

/// Drive the ConnectivityMonitor from a periodic reachability probe.
///
/// A HEAD request against the catalog host stands in for the platform
/// connectivity callback a mobile runtime would provide.
pub fn spawn_connectivity_driver(
    http: reqwest::Client,
    probe_url: reqwest::Url,
    monitor: Arc<ConnectivityMonitor>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PROBE_INTERVAL);

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = interval.tick() => {
                    let reachable = http.head(probe_url.clone()).send().await.is_ok();
                    let next = if reachable {
                        storefront_core::ConnectionState::Available
                    } else {
                        storefront_core::ConnectionState::Unavailable
                    };
                    if monitor.set_state(next) {
                        debug!(?next, "reachability probe transition");
                    }
                }
            }
        }
    })
}
