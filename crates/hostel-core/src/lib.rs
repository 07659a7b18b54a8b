//! Booking pipeline and reactive admin data layer between `hostel-api`
//! and the front ends (CLI / TUI).
//!
//! - **[`Hostel`]**: facade owning the HTTP client, the booking session,
//!   the notification outbox and the admin store. [`Hostel::start()`]
//!   spawns background notification delivery.
//!
//! - **[`BookingSession`]**: the public booking form. Holds the
//!   [`BookingDraft`], sequence-stamped [`Availability`], and the last
//!   confirmation on `watch` channels; [`submit()`](BookingSession::submit)
//!   is guarded against double submission.
//!
//! - **[`PricingTable`] / [`nights()`]**: pure price derivation for a draft.
//!
//! - **[`NotificationOutbox`]**: durable, retrying queue for the SMS sent
//!   to the front desk after each booking.
//!
//! - **[`AdminConsole`] / [`DataStore`]**: dashboard reads from reactive
//!   snapshots ([`EntityStream`]) and mutations via [`AdminCommand`], each
//!   followed by a targeted re-fetch of the affected [`Collection`]s.

pub mod admin;
pub mod booking;
pub mod config;
pub mod error;
mod hostel;
pub mod model;
pub mod outbox;
pub mod pricing;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use admin::{AdminCommand, AdminConsole, CommandResult};
pub use booking::{
    Availability, BookingDraft, BookingSession, CardDetails, DraftField, FetchOutcome,
    RoomSelection,
};
pub use config::BackendConfig;
pub use error::CoreError;
pub use hostel::Hostel;
pub use outbox::{FlushReport, NotificationOutbox, OutboxEntry};
pub use pricing::{PriceQuote, PricingTable, nights};
pub use store::{Collection, DataStore};
pub use stream::EntityStream;

pub use model::{
    Bed, Booking, BookingConfirmation, BookingStatus, ContactMessage, ContactRequest,
    CreateBookingRequest, CreateRoomRequest, Customer, Notification, Payment, PaymentMethod,
    PaymentType, Room, RoomCategory, SearchCriteria, StatusCounts, UpdateRoomRequest,
};
