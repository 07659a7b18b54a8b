// Wire types for the hostel REST API.
//
// The backend speaks camelCase JSON with ISO dates (`YYYY-MM-DD`) and
// local date-times. Money travels as plain JSON numbers. Optional fields
// default so that partially populated rows still deserialize.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ── Public booking flow ─────────────────────────────────────────────

/// Body of `POST /api/user/bookings/createBooking` and the admin
/// `createBooking` endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub customer_first_name: String,
    pub customer_last_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub customer_date_of_birth: NaiveDate,
    /// Room category code (`RN1`, `RN2`, ...) or a concrete room number.
    pub room_number: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    pub total_price: f64,
}

/// Receipt returned by the public booking endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserBooking {
    pub booking_id: i64,
    #[serde(default)]
    pub customer_full_name: String,
    #[serde(default)]
    pub room_number: String,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub payment_id: Option<String>,
}

/// Name/email/message triple shared by the contact form and SMS dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

// ── Authentication ──────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub(crate) struct AdminLoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

/// Response of `POST /api/admin/login`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminLoginResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub admin_id: Option<i64>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

// ── Bookings ────────────────────────────────────────────────────────

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum BookingStatus {
    Booked,
    Cancelled,
    Completed,
}

/// A booking as listed in the admin dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: i64,
    #[serde(default)]
    pub customer_full_name: String,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub bed_number: Option<String>,
    #[serde(default)]
    pub booking_status: Option<BookingStatus>,
    pub check_in_date: NaiveDate,
    pub check_out_date: NaiveDate,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub total_price: f64,
}

/// Status label to booking count, e.g. `{"Booked": 4, "Cancelled": 1}`.
pub type StatusCounts = BTreeMap<String, u64>;

// ── Customers ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub customer_id: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default)]
    pub registered_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub bed_number: Option<String>,
}

impl Customer {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_owned()
    }
}

// ── Rooms & beds ────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bed {
    #[serde(default)]
    pub bed_id: Option<String>,
    pub bed_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub room_id: String,
    pub room_number: String,
    #[serde(default)]
    pub floor: Option<i32>,
    #[serde(default)]
    pub capacity: Option<i32>,
    #[serde(default)]
    pub beds: Vec<Bed>,
}

/// Body of `POST manageRoom/createRoomWithBeds`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoomRequest {
    pub room_id: String,
    pub room_number: String,
    pub capacity: i32,
    pub floor: i32,
    pub bed_count: i32,
}

/// Body of `PUT manageRoom/updateRoom?room_id=`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRoomRequest {
    pub room_id: String,
    pub room_number: String,
    pub floor: i32,
    pub capacity: i32,
}

// ── Payments ────────────────────────────────────────────────────────

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum PaymentType {
    CreditCard,
    Cash,
    Paypal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub payment_id: String,
    #[serde(default)]
    pub booking_id: Option<i64>,
    #[serde(default)]
    pub payment_type: Option<PaymentType>,
    #[serde(default)]
    pub payment_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub amount: f64,
}

// ── Notifications & contact messages ────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, alias = "read")]
    pub is_read: bool,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub customer_full_name: Option<String>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub bed_number: Option<String>,
    #[serde(default)]
    pub check_in_date: Option<NaiveDate>,
    #[serde(default)]
    pub check_out_date: Option<NaiveDate>,
    #[serde(default)]
    pub total_price: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, alias = "read")]
    pub is_read: bool,
    #[serde(default)]
    pub sent_at: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn create_booking_request_uses_camel_case_dates() {
        let req = CreateBookingRequest {
            customer_first_name: "Ada".into(),
            customer_last_name: "Lovelace".into(),
            customer_email: "ada@example.com".into(),
            customer_phone: "123".into(),
            customer_date_of_birth: NaiveDate::from_ymd_opt(1990, 12, 10).unwrap(),
            room_number: "RN1".into(),
            check_in_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            total_price: 100.0,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["customerFirstName"], "Ada");
        assert_eq!(json["checkInDate"], "2024-06-01");
        assert_eq!(json["customerDateOfBirth"], "1990-12-10");
        assert_eq!(json["totalPrice"], 100.0);
    }

    #[test]
    fn contact_message_accepts_either_read_key() {
        let a: ContactMessage =
            serde_json::from_str(r#"{"id":1,"name":"a","email":"e","message":"m","read":true}"#)
                .unwrap();
        let b: ContactMessage = serde_json::from_str(
            r#"{"id":2,"name":"a","email":"e","message":"m","isRead":true,"sentAt":"2024-05-01T09:30:00"}"#,
        )
        .unwrap();
        assert!(a.is_read);
        assert!(b.is_read);
        assert!(b.sent_at.is_some());
    }

    #[test]
    fn payment_type_wire_names() {
        let t: PaymentType = serde_json::from_str("\"CREDIT_CARD\"").unwrap();
        assert_eq!(t, PaymentType::CreditCard);
        assert_eq!(PaymentType::Paypal.to_string(), "PAYPAL");
        assert_eq!("cash".parse::<PaymentType>().unwrap(), PaymentType::Cash);
    }

    #[test]
    fn booking_tolerates_sparse_rows() {
        let b: Booking = serde_json::from_str(
            r#"{"bookingId":7,"checkInDate":"2024-06-01","checkOutDate":"2024-06-03"}"#,
        )
        .unwrap();
        assert_eq!(b.booking_id, 7);
        assert!(b.booking_status.is_none());
        assert!(b.total_price.abs() < f64::EPSILON);
    }
}
