// ── Central reactive data store ──
//
// Thread-safe storage for every admin dashboard entity. Mutations are
// broadcast to subscribers via `watch` channels.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;

use super::Collection;
use super::collection::EntityCollection;
use crate::model::{Bed, Booking, ContactMessage, Customer, Notification, Payment, Room};
use crate::stream::EntityStream;

/// Reactive store for the admin dashboard.
///
/// Reads are wait-free snapshot clones; writes go through per-shard locks
/// inside `DashMap`. Each collection also records when it was last
/// fetched from the backend.
pub struct DataStore {
    pub(crate) bookings: EntityCollection<Booking>,
    pub(crate) customers: EntityCollection<Customer>,
    pub(crate) rooms: EntityCollection<Room>,
    pub(crate) beds: EntityCollection<Bed>,
    pub(crate) payments: EntityCollection<Payment>,
    pub(crate) notifications: EntityCollection<Notification>,
    pub(crate) messages: EntityCollection<ContactMessage>,
    pub(crate) refreshed: watch::Sender<BTreeMap<Collection, DateTime<Utc>>>,
}

impl DataStore {
    pub fn new() -> Self {
        let (refreshed, _) = watch::channel(BTreeMap::new());

        Self {
            bookings: EntityCollection::new(),
            customers: EntityCollection::new(),
            rooms: EntityCollection::new(),
            beds: EntityCollection::new(),
            payments: EntityCollection::new(),
            notifications: EntityCollection::new(),
            messages: EntityCollection::new(),
            refreshed,
        }
    }

    // ── Snapshot accessors ───────────────────────────────────────────

    pub fn bookings_snapshot(&self) -> Arc<Vec<Arc<Booking>>> {
        self.bookings.snapshot()
    }

    pub fn customers_snapshot(&self) -> Arc<Vec<Arc<Customer>>> {
        self.customers.snapshot()
    }

    pub fn rooms_snapshot(&self) -> Arc<Vec<Arc<Room>>> {
        self.rooms.snapshot()
    }

    pub fn beds_snapshot(&self) -> Arc<Vec<Arc<Bed>>> {
        self.beds.snapshot()
    }

    pub fn payments_snapshot(&self) -> Arc<Vec<Arc<Payment>>> {
        self.payments.snapshot()
    }

    pub fn notifications_snapshot(&self) -> Arc<Vec<Arc<Notification>>> {
        self.notifications.snapshot()
    }

    pub fn messages_snapshot(&self) -> Arc<Vec<Arc<ContactMessage>>> {
        self.messages.snapshot()
    }

    // ── Single-entity lookups ────────────────────────────────────────

    pub fn booking(&self, booking_id: i64) -> Option<Arc<Booking>> {
        self.bookings.get(&booking_id.to_string())
    }

    pub fn customer(&self, customer_id: &str) -> Option<Arc<Customer>> {
        self.customers.get(customer_id)
    }

    pub fn room(&self, room_id: &str) -> Option<Arc<Room>> {
        self.rooms.get(room_id)
    }

    pub fn notification(&self, id: i64) -> Option<Arc<Notification>> {
        self.notifications.get(&id.to_string())
    }

    pub fn message(&self, id: i64) -> Option<Arc<ContactMessage>> {
        self.messages.get(&id.to_string())
    }

    // ── Counts ───────────────────────────────────────────────────────

    pub fn len(&self, collection: Collection) -> usize {
        match collection {
            Collection::Bookings => self.bookings.len(),
            Collection::Customers => self.customers.len(),
            Collection::Rooms => self.rooms.len(),
            Collection::Beds => self.beds.len(),
            Collection::Payments => self.payments.len(),
            Collection::Notifications => self.notifications.len(),
            Collection::Messages => self.messages.len(),
        }
    }

    pub fn unread_notification_count(&self) -> usize {
        self.notifications
            .snapshot()
            .iter()
            .filter(|n| !n.is_read)
            .count()
    }

    pub fn unread_message_count(&self) -> usize {
        self.messages
            .snapshot()
            .iter()
            .filter(|m| !m.is_read)
            .count()
    }

    /// Monotonic change counter of a collection, for cheap "did anything
    /// change" checks.
    pub fn version(&self, collection: Collection) -> u64 {
        match collection {
            Collection::Bookings => self.bookings.version(),
            Collection::Customers => self.customers.version(),
            Collection::Rooms => self.rooms.version(),
            Collection::Beds => self.beds.version(),
            Collection::Payments => self.payments.version(),
            Collection::Notifications => self.notifications.version(),
            Collection::Messages => self.messages.version(),
        }
    }

    // ── Subscriptions ────────────────────────────────────────────────

    pub fn subscribe_bookings(&self) -> EntityStream<Booking> {
        EntityStream::new(self.bookings.subscribe())
    }

    pub fn subscribe_customers(&self) -> EntityStream<Customer> {
        EntityStream::new(self.customers.subscribe())
    }

    pub fn subscribe_rooms(&self) -> EntityStream<Room> {
        EntityStream::new(self.rooms.subscribe())
    }

    pub fn subscribe_beds(&self) -> EntityStream<Bed> {
        EntityStream::new(self.beds.subscribe())
    }

    pub fn subscribe_payments(&self) -> EntityStream<Payment> {
        EntityStream::new(self.payments.subscribe())
    }

    pub fn subscribe_notifications(&self) -> EntityStream<Notification> {
        EntityStream::new(self.notifications.subscribe())
    }

    pub fn subscribe_messages(&self) -> EntityStream<ContactMessage> {
        EntityStream::new(self.messages.subscribe())
    }

    // ── Metadata ─────────────────────────────────────────────────────

    pub fn last_refresh(&self, collection: Collection) -> Option<DateTime<Utc>> {
        self.refreshed.borrow().get(&collection).copied()
    }

    /// How long ago `collection` was fetched, or `None` if never.
    pub fn data_age(&self, collection: Collection) -> Option<chrono::Duration> {
        self.last_refresh(collection).map(|t| Utc::now() - t)
    }

    pub fn subscribe_refreshed(&self) -> watch::Receiver<BTreeMap<Collection, DateTime<Utc>>> {
        self.refreshed.subscribe()
    }

    /// Forget everything, e.g. after logout.
    pub fn clear(&self) {
        self.bookings.clear();
        self.customers.clear();
        self.rooms.clear();
        self.beds.clear();
        self.payments.clear();
        self.notifications.clear();
        self.messages.clear();
        self.refreshed.send_replace(BTreeMap::new());
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new()
    }
}
