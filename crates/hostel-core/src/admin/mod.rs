// ── Admin console ──
//
// Dashboard operations over the reactive DataStore. Reads either come
// from store snapshots or go straight to the backend for filtered
// queries; writes go through `execute`, which follows every successful
// mutation with a re-fetch of just the affected collections.

mod command;

use std::sync::Arc;

use chrono::NaiveDate;
use futures_util::future::join_all;
use hostel_api::HostelClient;
use tracing::{debug, info, warn};

pub use command::{AdminCommand, CommandResult};

use crate::error::CoreError;
use crate::model::{
    Bed, Booking, BookingStatus, ContactMessage, Customer, Notification, Payment, PaymentType,
    Room, StatusCounts,
};
use crate::store::{Collection, DataStore, fetch};

/// Treat a 404 from a search endpoint as "no matches".
fn empty_if_not_found<T>(result: Result<Vec<T>, CoreError>) -> Result<Vec<T>, CoreError> {
    match result {
        Err(e) if e.is_not_found() => Ok(Vec::new()),
        other => other,
    }
}

/// Treat a 404 from a single-entity endpoint as "nothing there".
fn none_if_not_found<T>(result: Result<T, CoreError>) -> Result<Option<T>, CoreError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

/// Admin dashboard facade. Cheap to clone.
#[derive(Clone)]
pub struct AdminConsole {
    client: HostelClient,
    store: Arc<DataStore>,
}

impl AdminConsole {
    pub fn new(client: HostelClient, store: Arc<DataStore>) -> Self {
        Self { client, store }
    }

    pub fn store(&self) -> &Arc<DataStore> {
        &self.store
    }

    // ── Refresh ──────────────────────────────────────────────────────

    /// Re-fetch one collection and publish it.
    pub async fn refresh(&self, collection: Collection) -> Result<(), CoreError> {
        let fetched = fetch(&self.client, collection).await?;
        self.store.apply(fetched);
        Ok(())
    }

    /// Re-fetch every collection concurrently. Collections that load are
    /// applied even when others fail; the first failure is returned.
    pub async fn refresh_all(&self) -> Result<(), CoreError> {
        use strum::IntoEnumIterator;

        let results = join_all(Collection::iter().map(|c| async move { (c, self.refresh(c).await) }))
            .await;

        let mut first_error = None;
        for (collection, result) in results {
            if let Err(e) = result {
                warn!(%collection, error = %e, "refresh failed");
                first_error.get_or_insert(e);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    // ── Mutations ────────────────────────────────────────────────────

    /// Run a mutation, update the store locally where the outcome is
    /// known, then re-fetch the affected collections.
    ///
    /// A failed re-fetch after a successful mutation is logged, not
    /// returned: the mutation itself has already happened.
    pub async fn execute(&self, command: AdminCommand) -> Result<CommandResult, CoreError> {
        let affects = command.affects();
        let label = command.describe();
        debug!(command = %label, "executing admin command");

        let result = self.dispatch(command).await?;
        info!(command = %label, "admin command applied");

        for &collection in affects {
            if let Err(e) = self.refresh(collection).await {
                warn!(%collection, error = %e, "refresh after command failed");
            }
        }
        Ok(result)
    }

    async fn dispatch(&self, command: AdminCommand) -> Result<CommandResult, CoreError> {
        let client = &self.client;
        let store = &self.store;
        match command {
            AdminCommand::CreateBooking(request) => {
                let booking = client.create_booking(&request).await?;
                store.upsert_booking(booking.clone());
                return Ok(CommandResult::Booking(booking));
            }
            AdminCommand::UpdateBooking(booking) => {
                client
                    .update_booking(&booking)
                    .await
                    .map_err(|e| CoreError::from(e).not_found_as("booking", booking.booking_id))?;
                store.upsert_booking(booking);
            }
            AdminCommand::CancelBooking { booking_id } => {
                client
                    .cancel_booking(booking_id)
                    .await
                    .map_err(|e| CoreError::from(e).not_found_as("booking", booking_id))?;
            }
            AdminCommand::DeleteBooking { booking_id } => {
                client
                    .delete_booking(booking_id)
                    .await
                    .map_err(|e| CoreError::from(e).not_found_as("booking", booking_id))?;
                store.remove_booking(booking_id);
            }
            AdminCommand::CreateCustomer(customer) => client.create_customer(&customer).await?,
            AdminCommand::UpdateCustomer(customer) => client.update_customer(&customer).await?,
            AdminCommand::DeleteCustomer { customer_id } => {
                client
                    .delete_customer(&customer_id)
                    .await
                    .map_err(|e| CoreError::from(e).not_found_as("customer", &customer_id))?;
                store.remove_customer(&customer_id);
            }
            AdminCommand::CreateRoom(request) => client.create_room(&request).await?,
            AdminCommand::UpdateRoom(request) => {
                client
                    .update_room(&request)
                    .await
                    .map_err(|e| CoreError::from(e).not_found_as("room", &request.room_id))?;
            }
            AdminCommand::DeleteRoom { room_id } => {
                client
                    .delete_room(&room_id)
                    .await
                    .map_err(|e| CoreError::from(e).not_found_as("room", &room_id))?;
                store.remove_room(&room_id);
            }
            AdminCommand::AddBed {
                room_id,
                bed_number,
            } => {
                client
                    .add_bed(&room_id, &bed_number)
                    .await
                    .map_err(|e| CoreError::from(e).not_found_as("room", &room_id))?;
            }
            AdminCommand::DeleteBed { bed_id } => {
                client
                    .delete_bed(&bed_id)
                    .await
                    .map_err(|e| CoreError::from(e).not_found_as("bed", &bed_id))?;
                store.remove_bed(&bed_id);
            }
            AdminCommand::MarkNotificationRead { id } => {
                client
                    .mark_notification_read(id)
                    .await
                    .map_err(|e| CoreError::from(e).not_found_as("notification", id))?;
                store.mark_notification_read(id);
            }
            AdminCommand::DeleteNotification { id } => {
                client
                    .delete_notification(id)
                    .await
                    .map_err(|e| CoreError::from(e).not_found_as("notification", id))?;
                store.remove_notification(id);
            }
            AdminCommand::MarkMessageRead { id } => {
                client
                    .mark_contact_message_read(id)
                    .await
                    .map_err(|e| CoreError::from(e).not_found_as("message", id))?;
                store.mark_message_read(id);
            }
        }
        Ok(CommandResult::Ok)
    }

    // ── Booking queries ──────────────────────────────────────────────

    pub async fn get_booking(&self, booking_id: i64) -> Result<Booking, CoreError> {
        self.client
            .get_booking(booking_id)
            .await
            .map_err(|e| CoreError::from(e).not_found_as("booking", booking_id))
    }

    pub async fn find_bookings_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> Result<Vec<Booking>, CoreError> {
        empty_if_not_found(
            self.client
                .find_bookings_by_name(first_name, last_name)
                .await
                .map_err(CoreError::from),
        )
    }

    /// Bookings whose check-in falls within `start..=end`.
    pub async fn find_bookings_by_check_in(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Booking>, CoreError> {
        if end < start {
            return Err(CoreError::ValidationFailed {
                message: format!("range end {end} is before start {start}"),
            });
        }
        empty_if_not_found(
            self.client
                .find_bookings_by_check_in(start, end)
                .await
                .map_err(CoreError::from),
        )
    }

    pub async fn find_bookings_by_status(
        &self,
        status: BookingStatus,
    ) -> Result<Vec<Booking>, CoreError> {
        empty_if_not_found(
            self.client
                .find_bookings_by_status(status)
                .await
                .map_err(CoreError::from),
        )
    }

    pub async fn booking_status_counts(&self) -> Result<StatusCounts, CoreError> {
        Ok(self.client.booking_status_counts().await?)
    }

    /// The most recently created booking, if any exist.
    pub async fn latest_booking(&self) -> Result<Option<Booking>, CoreError> {
        Ok(self.client.latest_booking().await?)
    }

    // ── Customer queries ─────────────────────────────────────────────

    pub async fn get_customer(&self, customer_id: &str) -> Result<Customer, CoreError> {
        self.client
            .get_customer(customer_id)
            .await
            .map_err(|e| CoreError::from(e).not_found_as("customer", customer_id))
    }

    pub async fn find_customer_by_email(&self, email: &str) -> Result<Option<Customer>, CoreError> {
        none_if_not_found(
            self.client
                .find_customer_by_email(email)
                .await
                .map_err(CoreError::from),
        )
    }

    // ── Room queries ─────────────────────────────────────────────────

    pub async fn get_room(&self, room_id: &str) -> Result<Room, CoreError> {
        self.client
            .get_room_with_beds(room_id)
            .await
            .map_err(|e| CoreError::from(e).not_found_as("room", room_id))
    }

    /// Beds in one room. An empty room and an unknown one both yield `[]`.
    pub async fn beds_in_room(&self, room_id: &str) -> Result<Vec<Bed>, CoreError> {
        Ok(self.client.list_beds_in_room(room_id).await?)
    }

    // ── Payment queries ──────────────────────────────────────────────

    pub async fn payment_for_booking(&self, booking_id: i64) -> Result<Option<Payment>, CoreError> {
        none_if_not_found(
            self.client
                .payment_for_booking(booking_id)
                .await
                .map_err(CoreError::from),
        )
    }

    pub async fn payments_by_type(
        &self,
        payment_type: PaymentType,
    ) -> Result<Vec<Payment>, CoreError> {
        empty_if_not_found(
            self.client
                .payments_by_type(payment_type)
                .await
                .map_err(CoreError::from),
        )
    }

    // ── Inbox queries ────────────────────────────────────────────────

    pub async fn unread_notifications(&self) -> Result<Vec<Notification>, CoreError> {
        Ok(self.client.list_unread_notifications().await?)
    }

    pub async fn unread_messages(&self) -> Result<Vec<ContactMessage>, CoreError> {
        Ok(self.client.list_unread_contact_messages().await?)
    }
}
