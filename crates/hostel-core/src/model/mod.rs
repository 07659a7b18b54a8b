// ── Domain model ──
//
// Reference data and value types for the public booking flow. Admin
// entities come straight from `hostel_api` and are re-exported here.

mod payment;
mod room;
mod search;

pub use payment::PaymentMethod;
pub use room::RoomCategory;
pub use search::SearchCriteria;

pub use hostel_api::{
    Bed, Booking, BookingStatus, ContactMessage, ContactRequest, CreateBookingRequest,
    CreateRoomRequest, Customer, Notification, Payment, PaymentType, Room, StatusCounts,
    UpdateRoomRequest,
};

/// Server-issued receipt for a successful public booking.
pub type BookingConfirmation = hostel_api::UserBooking;
