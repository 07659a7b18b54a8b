// ── Collection refresh ──
//
// Fetches one admin collection from the backend and applies it to the
// DataStore. Each collection refreshes on its own, so a mutation only
// re-fetches what it touched.

use chrono::Utc;
use hostel_api::HostelClient;
use tracing::debug;

use super::{Collection, DataStore};
use crate::model::{Bed, Booking, ContactMessage, Customer, Notification, Payment, Room};

/// A freshly fetched collection, ready to apply.
pub(crate) enum Fetched {
    Bookings(Vec<Booking>),
    Customers(Vec<Customer>),
    Rooms(Vec<Room>),
    Beds(Vec<Bed>),
    Payments(Vec<Payment>),
    Notifications(Vec<Notification>),
    Messages(Vec<ContactMessage>),
}

impl Fetched {
    pub(crate) fn collection(&self) -> Collection {
        match self {
            Self::Bookings(_) => Collection::Bookings,
            Self::Customers(_) => Collection::Customers,
            Self::Rooms(_) => Collection::Rooms,
            Self::Beds(_) => Collection::Beds,
            Self::Payments(_) => Collection::Payments,
            Self::Notifications(_) => Collection::Notifications,
            Self::Messages(_) => Collection::Messages,
        }
    }
}

/// Fetch the full contents of `collection`.
pub(crate) async fn fetch(
    client: &HostelClient,
    collection: Collection,
) -> Result<Fetched, hostel_api::Error> {
    Ok(match collection {
        Collection::Bookings => Fetched::Bookings(client.list_bookings().await?),
        Collection::Customers => Fetched::Customers(client.list_customers().await?),
        Collection::Rooms => Fetched::Rooms(client.list_rooms().await?),
        Collection::Beds => Fetched::Beds(client.list_beds().await?),
        Collection::Payments => Fetched::Payments(client.list_payments().await?),
        Collection::Notifications => Fetched::Notifications(client.list_notifications().await?),
        Collection::Messages => Fetched::Messages(client.list_contact_messages().await?),
    })
}

impl DataStore {
    /// Replace a collection with freshly fetched contents and stamp the
    /// refresh time.
    pub(crate) fn apply(&self, fetched: Fetched) {
        let collection = fetched.collection();
        match fetched {
            Fetched::Bookings(items) => self.bookings.replace_all(items),
            Fetched::Customers(items) => self.customers.replace_all(items),
            Fetched::Rooms(items) => self.rooms.replace_all(items),
            Fetched::Beds(items) => self.beds.replace_all(items),
            Fetched::Payments(items) => self.payments.replace_all(items),
            Fetched::Notifications(items) => self.notifications.replace_all(items),
            Fetched::Messages(items) => self.messages.replace_all(items),
        }
        self.refreshed.send_modify(|stamps| {
            stamps.insert(collection, Utc::now());
        });
        debug!(%collection, count = self.len(collection), "collection refreshed");
    }

    // ── Local updates ────────────────────────────────────────────────

    pub(crate) fn remove_booking(&self, booking_id: i64) -> bool {
        self.bookings.remove(&booking_id.to_string()).is_some()
    }

    pub(crate) fn remove_customer(&self, customer_id: &str) -> bool {
        self.customers.remove(customer_id).is_some()
    }

    pub(crate) fn remove_room(&self, room_id: &str) -> bool {
        self.rooms.remove(room_id).is_some()
    }

    pub(crate) fn remove_bed(&self, bed_id: &str) -> bool {
        self.beds.remove(bed_id).is_some()
    }

    pub(crate) fn remove_notification(&self, id: i64) -> bool {
        self.notifications.remove(&id.to_string()).is_some()
    }

    pub(crate) fn mark_notification_read(&self, id: i64) -> bool {
        self.notifications
            .modify(&id.to_string(), |n| n.is_read = true)
    }

    pub(crate) fn mark_message_read(&self, id: i64) -> bool {
        self.messages.modify(&id.to_string(), |m| m.is_read = true)
    }

    pub(crate) fn upsert_booking(&self, booking: Booking) {
        self.bookings.upsert(booking);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn booking(id: i64) -> Booking {
        Booking {
            booking_id: id,
            customer_full_name: format!("Guest {id}"),
            customer_email: None,
            room_number: Some("RN1".into()),
            bed_number: None,
            booking_status: None,
            check_in_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            created_at: None,
            total_price: 100.0,
        }
    }

    #[test]
    fn apply_stamps_refresh_time() {
        let store = DataStore::new();
        assert!(store.last_refresh(Collection::Bookings).is_none());

        store.apply(Fetched::Bookings(vec![booking(1), booking(2)]));
        assert_eq!(store.bookings_snapshot().len(), 2);
        assert!(store.last_refresh(Collection::Bookings).is_some());
        assert!(store.last_refresh(Collection::Rooms).is_none());
    }

    #[test]
    fn local_removal_and_read_marks() {
        let store = DataStore::new();
        store.apply(Fetched::Bookings(vec![booking(1), booking(2)]));
        assert!(store.remove_booking(1));
        assert!(!store.remove_booking(1));
        assert!(store.booking(2).is_some());

        store.apply(Fetched::Notifications(vec![Notification {
            id: 5,
            title: "New booking".into(),
            message: "RN1".into(),
            is_read: false,
            created_at: None,
            customer_full_name: None,
            room_number: None,
            bed_number: None,
            check_in_date: None,
            check_out_date: None,
            total_price: None,
        }]));
        assert_eq!(store.unread_notification_count(), 1);
        assert!(store.mark_notification_read(5));
        assert_eq!(store.unread_notification_count(), 0);
    }
}
