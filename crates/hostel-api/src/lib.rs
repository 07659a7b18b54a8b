// hostel-api: Async Rust client for the hostel booking REST API

mod admin;
mod auth;
pub mod client;
mod contact;
pub mod error;
pub mod models;
mod public;
pub mod transport;

pub use client::HostelClient;
pub use error::Error;
pub use models::{
    AdminLoginResponse, Bed, Booking, BookingStatus, ContactMessage, ContactRequest,
    CreateBookingRequest, CreateRoomRequest, Customer, Notification, Payment, PaymentType, Room,
    StatusCounts, UpdateRoomRequest, UserBooking,
};
pub use transport::TransportConfig;
