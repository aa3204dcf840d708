// ── Connectivity observation ──
//
// Network reachability is owned by the platform, not the controller: some
// external driver feeds transitions into a ConnectivityMonitor, and
// presentation scopes hold a ConnectivityWatch for as long as they care.
// Dropping the watch is the unsubscribe — no dangling callbacks.

use tokio::sync::watch;

/// Network reachability, externally driven.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    Available,
    #[default]
    Unavailable,
}

impl ConnectionState {
    pub fn is_available(self) -> bool {
        self == Self::Available
    }
}

/// Owner side of the reachability channel.
///
/// The platform integration calls [`set_state`](Self::set_state) on every
/// transition; duplicate reports are absorbed without waking subscribers.
pub struct ConnectivityMonitor {
    state: watch::Sender<ConnectionState>,
}

impl ConnectivityMonitor {
    pub fn new(initial: ConnectionState) -> Self {
        let (state, _) = watch::channel(initial);
        Self { state }
    }

    /// Report the current reachability. Notifies only on a real transition.
    pub fn set_state(&self, next: ConnectionState) -> bool {
        self.state.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        })
    }

    pub fn current(&self) -> ConnectionState {
        *self.state.borrow()
    }

    /// Subscribe to reachability changes.
    ///
    /// The returned watch reports the current state immediately on its
    /// first poll, then once per transition. Dropping it unsubscribes.
    pub fn subscribe(&self) -> ConnectivityWatch {
        let mut rx = self.state.subscribe();
        // First `changed()` resolves right away with the state at
        // subscription time, mirroring a re-emitting subscription.
        rx.mark_changed();
        ConnectivityWatch { rx }
    }
}

impl Default for ConnectivityMonitor {
    fn default() -> Self {
        Self::new(ConnectionState::Unavailable)
    }
}

/// Scoped subscription to reachability transitions.
pub struct ConnectivityWatch {
    rx: watch::Receiver<ConnectionState>,
}

impl ConnectivityWatch {
    /// The latest reported state.
    pub fn current(&self) -> ConnectionState {
        *self.rx.borrow()
    }

    /// Wait for the next report, returning the new state.
    /// Returns `None` if the monitor has been dropped.
    pub async fn changed(&mut self) -> Option<ConnectionState> {
        self.rx.changed().await.ok()?;
        Some(*self.rx.borrow_and_update())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscription_reemits_current_state_immediately() {
        let monitor = ConnectivityMonitor::new(ConnectionState::Available);
        let mut watch = monitor.subscribe();

        // No transition has happened, yet the first wait resolves.
        let state = watch.changed().await.unwrap();
        assert_eq!(state, ConnectionState::Available);
    }

    #[tokio::test]
    async fn transition_wakes_subscribers() {
        let monitor = ConnectivityMonitor::new(ConnectionState::Available);
        let mut watch = monitor.subscribe();
        watch.changed().await.unwrap(); // consume the initial emission

        assert!(monitor.set_state(ConnectionState::Unavailable));
        let state = watch.changed().await.unwrap();
        assert_eq!(state, ConnectionState::Unavailable);
        assert!(!state.is_available());
    }

    #[tokio::test]
    async fn duplicate_report_does_not_notify() {
        let monitor = ConnectivityMonitor::new(ConnectionState::Available);
        let mut watch = monitor.subscribe();
        watch.changed().await.unwrap();

        assert!(!monitor.set_state(ConnectionState::Available));
        assert_eq!(watch.current(), ConnectionState::Available);
    }

    #[tokio::test]
    async fn dropped_monitor_ends_subscription() {
        let monitor = ConnectivityMonitor::new(ConnectionState::Available);
        let mut watch = monitor.subscribe();
        watch.changed().await.unwrap();

        drop(monitor);
        assert!(watch.changed().await.is_none());
    }

    #[test]
    fn dropping_watch_releases_the_subscription() {
        let monitor = ConnectivityMonitor::default();
        let watch = monitor.subscribe();
        drop(watch);
        // Monitor keeps working with zero subscribers.
        assert!(monitor.set_state(ConnectionState::Available));
        assert_eq!(monitor.current(), ConnectionState::Available);
    }
}
