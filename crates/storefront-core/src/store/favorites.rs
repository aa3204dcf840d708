use std::collections::BTreeSet;
use std::sync::Arc;

use tokio::sync::watch;

use crate::model::ProductId;

/// In-memory set of favorited product ids.
///
/// Created empty, mutated only through [`add`](Self::add) and
/// [`remove`](Self::remove), never persisted — the set dies with the
/// session. Both mutations are idempotent and notify subscribers only when
/// membership actually changed, so a duplicate add is invisible downstream.
///
/// Membership is independent of the product list: favoriting an id that is
/// not in the current catalog is still recorded.
pub struct FavoriteSet {
    members: watch::Sender<Arc<BTreeSet<ProductId>>>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        let (members, _) = watch::channel(Arc::new(BTreeSet::new()));
        Self { members }
    }

    /// Membership test, no side effect.
    pub fn is_favorite(&self, id: ProductId) -> bool {
        self.members.borrow().contains(&id)
    }

    /// Idempotent insert. Returns `true` if the set changed.
    pub fn add(&self, id: ProductId) -> bool {
        self.members.send_if_modified(|set| {
            if set.contains(&id) {
                false
            } else {
                Arc::make_mut(set).insert(id);
                true
            }
        })
    }

    /// Idempotent delete. Returns `true` if the set changed.
    pub fn remove(&self, id: ProductId) -> bool {
        self.members
            .send_if_modified(|set| Arc::make_mut(set).remove(&id))
    }

    /// Current membership, for display (e.g. a badge count).
    pub fn snapshot(&self) -> Arc<BTreeSet<ProductId>> {
        self.members.borrow().clone()
    }

    pub fn count(&self) -> usize {
        self.members.borrow().len()
    }

    /// Subscribe to membership changes via a `watch::Receiver`.
    pub fn subscribe(&self) -> watch::Receiver<Arc<BTreeSet<ProductId>>> {
        self.members.subscribe()
    }
}

impl Default for FavoriteSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn add_then_is_favorite() {
        let favorites = FavoriteSet::new();
        assert!(!favorites.is_favorite(ProductId(5)));

        assert!(favorites.add(ProductId(5)));
        assert!(favorites.is_favorite(ProductId(5)));
    }

    #[test]
    fn add_is_idempotent() {
        let favorites = FavoriteSet::new();
        assert!(favorites.add(ProductId(5)));
        assert!(!favorites.add(ProductId(5)));
        assert_eq!(favorites.count(), 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let favorites = FavoriteSet::new();
        favorites.add(ProductId(5));

        assert!(favorites.remove(ProductId(5)));
        assert!(!favorites.remove(ProductId(5)));
        assert!(!favorites.is_favorite(ProductId(5)));
    }

    #[test]
    fn duplicate_add_does_not_notify() {
        let favorites = FavoriteSet::new();
        favorites.add(ProductId(5));

        let mut rx = favorites.subscribe();
        favorites.add(ProductId(5));
        assert!(!rx.has_changed().unwrap());

        favorites.add(ProductId(6));
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 2);
    }

    #[test]
    fn add_add_remove_scenario() {
        let favorites = FavoriteSet::new();
        favorites.add(ProductId(5));
        favorites.add(ProductId(5));
        favorites.remove(ProductId(5));

        assert!(!favorites.is_favorite(ProductId(5)));
        assert_eq!(favorites.snapshot().len(), 0);
    }

    #[test]
    fn snapshot_is_sorted_membership() {
        let favorites = FavoriteSet::new();
        favorites.add(ProductId(9));
        favorites.add(ProductId(2));

        let ids: Vec<u32> = favorites.snapshot().iter().map(|id| id.0).collect();
        assert_eq!(ids, vec![2, 9]);
    }
}
