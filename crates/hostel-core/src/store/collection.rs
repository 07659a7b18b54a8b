// ── Reactive entity collection ──
//
// Concurrent keyed storage with a `watch`-published snapshot. Snapshots
// keep the order in which the backend listed the entities.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;
use tokio::sync::watch;

use crate::model::{Bed, Booking, ContactMessage, Customer, Notification, Payment, Room};

/// Entities that can be stored in an [`EntityCollection`].
pub trait Keyed: Clone + Send + Sync + 'static {
    /// Stable identifier, unique within the collection.
    fn key(&self) -> String;
}

impl Keyed for Booking {
    fn key(&self) -> String {
        self.booking_id.to_string()
    }
}

impl Keyed for Customer {
    fn key(&self) -> String {
        // Customers created client-side have no id until the server assigns one.
        self.customer_id
            .clone()
            .unwrap_or_else(|| format!("email:{}", self.email))
    }
}

impl Keyed for Room {
    fn key(&self) -> String {
        self.room_id.clone()
    }
}

impl Keyed for Bed {
    fn key(&self) -> String {
        self.bed_id
            .clone()
            .unwrap_or_else(|| format!("bed:{}", self.bed_number))
    }
}

impl Keyed for Payment {
    fn key(&self) -> String {
        self.payment_id.clone()
    }
}

impl Keyed for Notification {
    fn key(&self) -> String {
        self.id.to_string()
    }
}

impl Keyed for ContactMessage {
    fn key(&self) -> String {
        self.id.to_string()
    }
}

struct Slot<T> {
    position: u64,
    entity: Arc<T>,
}

/// A concurrent, reactive collection for a single entity type.
///
/// Every mutation rebuilds the snapshot that subscribers receive and bumps
/// a version counter.
pub(crate) struct EntityCollection<T: Keyed> {
    by_key: DashMap<String, Slot<T>>,
    next_position: AtomicU64,
    version: watch::Sender<u64>,
    snapshot: watch::Sender<Arc<Vec<Arc<T>>>>,
}

impl<T: Keyed> EntityCollection<T> {
    pub(crate) fn new() -> Self {
        let (version, _) = watch::channel(0u64);
        let (snapshot, _) = watch::channel(Arc::new(Vec::new()));

        Self {
            by_key: DashMap::new(),
            next_position: AtomicU64::new(0),
            version,
            snapshot,
        }
    }

    /// Insert or update an entity. Updates keep their position; new keys
    /// go to the end. Returns `true` if the key was new.
    pub(crate) fn upsert(&self, entity: T) -> bool {
        let is_new = self.upsert_quiet(entity);
        self.publish();
        is_new
    }

    /// Remove an entity by key. Returns the removed entity if it existed.
    pub(crate) fn remove(&self, key: &str) -> Option<Arc<T>> {
        let removed = self.by_key.remove(key).map(|(_, slot)| slot.entity);
        if removed.is_some() {
            self.publish();
        }
        removed
    }

    /// Apply `f` to a copy of the entity under `key` and store the result.
    /// Returns `false` if the key is absent.
    pub(crate) fn modify(&self, key: &str, f: impl FnOnce(&mut T)) -> bool {
        let updated = match self.by_key.get_mut(key) {
            Some(mut slot) => {
                let mut entity = T::clone(&slot.entity);
                f(&mut entity);
                slot.entity = Arc::new(entity);
                true
            }
            None => false,
        };
        if updated {
            self.publish();
        }
        updated
    }

    /// Replace the contents with `items`, in the given order.
    ///
    /// Incoming entities are upserted first and missing keys pruned after,
    /// so subscribers never observe a transient empty collection.
    pub(crate) fn replace_all(&self, items: Vec<T>) {
        let base = self.next_position.fetch_add(
            u64::try_from(items.len()).unwrap_or(u64::MAX),
            Ordering::Relaxed,
        );
        let mut incoming = std::collections::HashSet::with_capacity(items.len());
        for (offset, entity) in (0u64..).zip(items) {
            let key = entity.key();
            self.by_key.insert(
                key.clone(),
                Slot {
                    position: base + offset,
                    entity: Arc::new(entity),
                },
            );
            incoming.insert(key);
        }
        self.by_key.retain(|key, _| incoming.contains(key));
        self.publish();
    }

    pub(crate) fn get(&self, key: &str) -> Option<Arc<T>> {
        self.by_key.get(key).map(|slot| Arc::clone(&slot.entity))
    }

    /// Current snapshot (cheap `Arc` clone).
    pub(crate) fn snapshot(&self) -> Arc<Vec<Arc<T>>> {
        self.snapshot.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Arc<Vec<Arc<T>>>> {
        self.snapshot.subscribe()
    }

    pub(crate) fn version(&self) -> u64 {
        *self.version.borrow()
    }

    pub(crate) fn clear(&self) {
        self.by_key.clear();
        self.publish();
    }

    pub(crate) fn len(&self) -> usize {
        self.by_key.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn upsert_quiet(&self, entity: T) -> bool {
        let key = entity.key();
        let entity = Arc::new(entity);
        if let Some(mut slot) = self.by_key.get_mut(&key) {
            slot.entity = entity;
            return false;
        }
        let position = self.next_position.fetch_add(1, Ordering::Relaxed);
        self.by_key.insert(key, Slot { position, entity });
        true
    }

    /// Rebuild the ordered snapshot, broadcast it, and bump the version.
    fn publish(&self) {
        let mut slots: Vec<(u64, Arc<T>)> = self
            .by_key
            .iter()
            .map(|r| (r.position, Arc::clone(&r.entity)))
            .collect();
        slots.sort_by_key(|(position, _)| *position);
        let values = slots.into_iter().map(|(_, entity)| entity).collect();
        // `send_modify` updates unconditionally, even with zero receivers.
        self.snapshot.send_modify(|snap| *snap = Arc::new(values));
        self.version.send_modify(|v| *v += 1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Item(&'static str, u32);

    impl Keyed for Item {
        fn key(&self) -> String {
            self.0.to_owned()
        }
    }

    fn values(col: &EntityCollection<Item>) -> Vec<u32> {
        col.snapshot().iter().map(|i| i.1).collect()
    }

    #[test]
    fn upsert_reports_new_keys() {
        let col = EntityCollection::new();
        assert!(col.upsert(Item("a", 1)));
        assert!(!col.upsert(Item("a", 2)));
        assert_eq!(col.len(), 1);
        assert_eq!(col.get("a").unwrap().1, 2);
    }

    #[test]
    fn updates_keep_their_position() {
        let col = EntityCollection::new();
        col.upsert(Item("a", 1));
        col.upsert(Item("b", 2));
        col.upsert(Item("a", 3));
        assert_eq!(values(&col), vec![3, 2]);
    }

    #[test]
    fn replace_all_follows_incoming_order_and_prunes() {
        let col = EntityCollection::new();
        col.upsert(Item("a", 1));
        col.upsert(Item("b", 2));

        col.replace_all(vec![Item("c", 30), Item("b", 20)]);
        assert_eq!(values(&col), vec![30, 20]);
        assert!(col.get("a").is_none());
    }

    #[test]
    fn modify_and_remove_publish() {
        let col = EntityCollection::new();
        col.upsert(Item("a", 1));
        let before = col.version();

        assert!(col.modify("a", |i| i.1 = 9));
        assert!(!col.modify("zz", |i| i.1 = 0));
        assert_eq!(values(&col), vec![9]);
        assert!(col.version() > before);

        assert_eq!(col.remove("a").unwrap().1, 9);
        assert!(col.is_empty());
        assert!(col.snapshot().is_empty());
    }

    #[tokio::test]
    async fn subscribers_see_changes() {
        let col = EntityCollection::new();
        let mut rx = col.subscribe();
        col.upsert(Item("a", 1));
        rx.changed().await.unwrap();
        assert_eq!(rx.borrow().len(), 1);

        col.clear();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_empty());
    }
}
