// ── Admin commands ──
//
// Every dashboard mutation is a variant of `AdminCommand`. The console
// executes it against the backend, then re-fetches only the collections
// the command can have changed.

use hostel_api::{CreateBookingRequest, CreateRoomRequest, UpdateRoomRequest};

use crate::model::{Booking, Customer};
use crate::store::Collection;

/// All write operations available from the admin dashboard.
#[derive(Debug, Clone)]
pub enum AdminCommand {
    // ── Bookings ─────────────────────────────────────────────────────
    CreateBooking(CreateBookingRequest),
    /// Full replacement; the backend expects the whole object.
    UpdateBooking(Booking),
    CancelBooking {
        booking_id: i64,
    },
    DeleteBooking {
        booking_id: i64,
    },

    // ── Customers ────────────────────────────────────────────────────
    CreateCustomer(Customer),
    UpdateCustomer(Customer),
    DeleteCustomer {
        customer_id: String,
    },

    // ── Rooms & beds ─────────────────────────────────────────────────
    CreateRoom(CreateRoomRequest),
    UpdateRoom(UpdateRoomRequest),
    DeleteRoom {
        room_id: String,
    },
    AddBed {
        room_id: String,
        bed_number: String,
    },
    DeleteBed {
        bed_id: String,
    },

    // ── Inbox ────────────────────────────────────────────────────────
    MarkNotificationRead {
        id: i64,
    },
    DeleteNotification {
        id: i64,
    },
    MarkMessageRead {
        id: i64,
    },
}

impl AdminCommand {
    /// Collections whose contents may change when this command succeeds.
    pub fn affects(&self) -> &'static [Collection] {
        match self {
            // New and cancelled bookings also produce notifications and
            // payments server-side.
            Self::CreateBooking(_) | Self::CancelBooking { .. } => &[
                Collection::Bookings,
                Collection::Payments,
                Collection::Notifications,
            ],
            Self::UpdateBooking(_) => &[Collection::Bookings],
            Self::DeleteBooking { .. } => &[Collection::Bookings, Collection::Payments],
            Self::CreateCustomer(_) | Self::UpdateCustomer(_) | Self::DeleteCustomer { .. } => {
                &[Collection::Customers]
            }
            Self::CreateRoom(_) | Self::DeleteRoom { .. } => &[Collection::Rooms, Collection::Beds],
            Self::UpdateRoom(_) => &[Collection::Rooms],
            Self::AddBed { .. } | Self::DeleteBed { .. } => &[Collection::Beds, Collection::Rooms],
            Self::MarkNotificationRead { .. } | Self::DeleteNotification { .. } => {
                &[Collection::Notifications]
            }
            Self::MarkMessageRead { .. } => &[Collection::Messages],
        }
    }

    /// Whether the command irreversibly removes data.
    pub fn is_destructive(&self) -> bool {
        matches!(
            self,
            Self::DeleteBooking { .. }
                | Self::CancelBooking { .. }
                | Self::DeleteCustomer { .. }
                | Self::DeleteRoom { .. }
                | Self::DeleteBed { .. }
                | Self::DeleteNotification { .. }
        )
    }

    /// Short human-readable description for logs and confirmations.
    pub fn describe(&self) -> String {
        match self {
            Self::CreateBooking(req) => format!(
                "create booking for {} {} in {}",
                req.customer_first_name, req.customer_last_name, req.room_number
            ),
            Self::UpdateBooking(b) => format!("update booking {}", b.booking_id),
            Self::CancelBooking { booking_id } => format!("cancel booking {booking_id}"),
            Self::DeleteBooking { booking_id } => format!("delete booking {booking_id}"),
            Self::CreateCustomer(c) => format!("create customer {}", c.full_name()),
            Self::UpdateCustomer(c) => format!(
                "update customer {}",
                c.customer_id.as_deref().unwrap_or(&c.email)
            ),
            Self::DeleteCustomer { customer_id } => format!("delete customer {customer_id}"),
            Self::CreateRoom(r) => format!("create room {}", r.room_id),
            Self::UpdateRoom(r) => format!("update room {}", r.room_id),
            Self::DeleteRoom { room_id } => format!("delete room {room_id}"),
            Self::AddBed {
                room_id,
                bed_number,
            } => format!("add bed {bed_number} to room {room_id}"),
            Self::DeleteBed { bed_id } => format!("delete bed {bed_id}"),
            Self::MarkNotificationRead { id } => format!("mark notification {id} read"),
            Self::DeleteNotification { id } => format!("delete notification {id}"),
            Self::MarkMessageRead { id } => format!("mark message {id} read"),
        }
    }
}

/// Outcome of a successful [`AdminCommand`].
#[derive(Debug, Clone)]
pub enum CommandResult {
    Ok,
    Booking(Booking),
}
