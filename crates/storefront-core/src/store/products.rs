use std::sync::Arc;

use tokio::sync::watch;

use crate::model::{Product, ProductId};

/// The latest fetched catalog, in server order.
///
/// Holds one `Arc`-shared snapshot behind a `watch` channel: a successful
/// fetch replaces the whole snapshot and notifies subscribers; a failed
/// fetch leaves it untouched. No client-side sort or filter — the order the
/// server returned is the order consumers see.
pub struct ProductList {
    snapshot: watch::Sender<Arc<Vec<Arc<Product>>>>,
}

impl ProductList {
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));
        Self { snapshot }
    }

    /// Replace the entire list with a fresh fetch result.
    pub fn replace(&self, products: Vec<Product>) {
        let values: Vec<Arc<Product>> = products.into_iter().map(Arc::new).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
    }

    /// Get the current snapshot (cheap `Arc` clone).
    pub fn snapshot(&self) -> Arc<Vec<Arc<Product>>> {
        self.snapshot.borrow().clone()
    }

    /// Linear lookup by id over the current snapshot.
    ///
    /// Absent when the list is empty or the id is not present. Ids are
    /// unique within a fetch response, so the first match is the match.
    pub fn by_id(&self, id: ProductId) -> Option<Arc<Product>> {
        self.snapshot
            .borrow()
            .iter()
            .find(|p| p.id == id)
            .map(Arc::clone)
    }

    /// Subscribe to snapshot changes via a `watch::Receiver`.
    pub fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<Product>>>> {
        self.snapshot.subscribe()
    }

    pub fn len(&self) -> usize {
        self.snapshot.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot.borrow().is_empty()
    }
}

impl Default for ProductList {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: u32, name: &str) -> Product {
        Product {
            id: ProductId(id),
            name: name.into(),
            price: 1.0,
            rating: "4.0".into(),
            image_url: format!("http://x/{id}.png"),
            description: String::new(),
        }
    }

    #[test]
    fn replace_preserves_order() {
        let list = ProductList::new();
        list.replace(vec![product(3, "c"), product(1, "a"), product(2, "b")]);

        let ids: Vec<u32> = list.snapshot().iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[test]
    fn by_id_finds_unique_match() {
        let list = ProductList::new();
        list.replace(vec![product(1, "a"), product(2, "b")]);

        assert_eq!(list.by_id(ProductId(2)).unwrap().name, "b");
        assert!(list.by_id(ProductId(9)).is_none());
    }

    #[test]
    fn by_id_on_empty_list_is_none() {
        let list = ProductList::new();
        assert!(list.by_id(ProductId(1)).is_none());
    }

    #[test]
    fn replace_notifies_subscribers() {
        let list = ProductList::new();
        let mut rx = list.subscribe();
        assert!(!rx.has_changed().unwrap());

        list.replace(vec![product(1, "a")]);
        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().len(), 1);
    }

    #[test]
    fn replace_with_empty_clears() {
        let list = ProductList::new();
        list.replace(vec![product(1, "a")]);
        list.replace(Vec::new());
        assert!(list.is_empty());
    }
}
