#![allow(clippy::unwrap_used)]
// Integration tests for `HostelClient` using wiremock.

use chrono::NaiveDate;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hostel_api::{
    BookingStatus, ContactRequest, CreateBookingRequest, Error, HostelClient, PaymentType,
    UpdateRoomRequest,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, HostelClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/", server.uri())).unwrap();
    let client = HostelClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn dashboard(suffix: &str) -> String {
    format!("/api/admin/dashboard/{suffix}")
}

// ── Public booking ──────────────────────────────────────────────────

#[tokio::test]
async fn test_available_rooms_sends_query() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/user/rooms/available"))
        .and(query_param("checkIn", "2024-06-01"))
        .and(query_param("checkOut", "2024-06-03"))
        .and(query_param("guests", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["RN1", "RN3"])))
        .expect(1)
        .mount(&server)
        .await;

    let rooms = client
        .available_rooms(date(2024, 6, 1), date(2024, 6, 3), 2)
        .await
        .unwrap();

    assert_eq!(rooms, vec!["RN1".to_owned(), "RN3".to_owned()]);
}

#[tokio::test]
async fn test_available_rooms_non_array_is_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/user/rooms/available"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "rooms": ["RN1"] })))
        .mount(&server)
        .await;

    let rooms = client
        .available_rooms(date(2024, 6, 1), date(2024, 6, 3), 2)
        .await
        .unwrap();

    assert!(rooms.is_empty());
}

#[tokio::test]
async fn test_available_rooms_server_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/user/rooms/available"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&server)
        .await;

    let result = client
        .available_rooms(date(2024, 6, 1), date(2024, 6, 3), 2)
        .await;

    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "database down");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_create_user_booking() {
    let (server, client) = setup().await;

    let request = CreateBookingRequest {
        customer_first_name: "Ada".into(),
        customer_last_name: "Lovelace".into(),
        customer_email: "ada@example.com".into(),
        customer_phone: "+44 20 0000".into(),
        customer_date_of_birth: date(1990, 12, 10),
        room_number: "RN1".into(),
        check_in_date: date(2024, 6, 1),
        check_out_date: date(2024, 6, 3),
        total_price: 100.0,
    };

    Mock::given(method("POST"))
        .and(path("/api/user/bookings/createBooking"))
        .and(body_json(json!({
            "customerFirstName": "Ada",
            "customerLastName": "Lovelace",
            "customerEmail": "ada@example.com",
            "customerPhone": "+44 20 0000",
            "customerDateOfBirth": "1990-12-10",
            "roomNumber": "RN1",
            "checkInDate": "2024-06-01",
            "checkOutDate": "2024-06-03",
            "totalPrice": 100.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bookingId": 42,
            "customerFullName": "Ada Lovelace",
            "roomNumber": "R101",
            "checkInDate": "2024-06-01",
            "checkOutDate": "2024-06-03",
            "totalPrice": 100.00,
            "paymentId": "PAY-9"
        })))
        .mount(&server)
        .await;

    let receipt = client.create_user_booking(&request).await.unwrap();

    assert_eq!(receipt.booking_id, 42);
    assert_eq!(receipt.room_number, "R101");
    assert_eq!(receipt.payment_id.as_deref(), Some("PAY-9"));
}

#[tokio::test]
async fn test_create_user_booking_rejection_text() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/user/bookings/createBooking"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("No available beds for the selected dates"),
        )
        .mount(&server)
        .await;

    let request = CreateBookingRequest {
        customer_first_name: "A".into(),
        customer_last_name: "B".into(),
        customer_email: "a@b.c".into(),
        customer_phone: "1".into(),
        customer_date_of_birth: date(2000, 1, 1),
        room_number: "RN2".into(),
        check_in_date: date(2024, 6, 1),
        check_out_date: date(2024, 6, 2),
        total_price: 20.0,
    };

    let err = client.create_user_booking(&request).await.unwrap_err();
    assert_eq!(
        err.server_message(),
        Some("No available beds for the selected dates")
    );
    assert!(!err.is_transient());
}

// ── Contact ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_send_sms_and_email() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/contact/send-sms"))
        .and(body_json(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "message": "hello"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_string("SMS sent"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/api/contact/send-email"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let req = ContactRequest {
        name: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
        message: "hello".into(),
    };
    client.send_sms(&req).await.unwrap();
    client.send_contact_email(&req).await.unwrap();
}

#[tokio::test]
async fn test_contact_messages_and_mark_read() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/contact/unread"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 3, "name": "Bo", "email": "bo@x.io", "message": "Late check-in?", "read": false }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/contact/mark-as-read/3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let unread = client.list_unread_contact_messages().await.unwrap();
    assert_eq!(unread.len(), 1);
    assert!(!unread[0].is_read);

    client.mark_contact_message_read(3).await.unwrap();
}

// ── Authentication ──────────────────────────────────────────────────

#[tokio::test]
async fn test_admin_login_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/login"))
        .and(body_json(json!({ "username": "admin", "password": "s3cret" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "adminId": 1,
            "message": "Login successful"
        })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "s3cret".to_string().into();
    let resp = client.admin_login("admin", &secret).await.unwrap();
    assert_eq!(resp.admin_id, Some(1));
}

#[tokio::test]
async fn test_admin_login_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Invalid credentials"
        })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "nope".to_string().into();
    let result = client.admin_login("admin", &secret).await;

    assert!(
        matches!(result, Err(Error::Authentication { ref message }) if message.contains("Invalid credentials")),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_admin_login_success_false() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/admin/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "nope".to_string().into();
    let result = client.admin_login("admin", &secret).await;
    assert!(matches!(result, Err(Error::Authentication { .. })));
}

// ── Bookings ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_and_filter_bookings() {
    let (server, client) = setup().await;

    let row = json!({
        "bookingId": 5,
        "customerFullName": "Ada Lovelace",
        "customerEmail": "ada@example.com",
        "roomNumber": "R101",
        "bedNumber": "B1",
        "bookingStatus": "Booked",
        "checkInDate": "2024-06-01",
        "checkOutDate": "2024-06-03",
        "createdAt": "2024-05-20T12:00:00",
        "totalPrice": 100.0
    });

    Mock::given(method("GET"))
        .and(path(dashboard("manageBooking/getAllBookings")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([row.clone()])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(dashboard("manageBooking/findByStatus")))
        .and(query_param("status", "Cancelled"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let all = client.list_bookings().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].booking_status, Some(BookingStatus::Booked));
    assert_eq!(all[0].bed_number.as_deref(), Some("B1"));

    let cancelled = client
        .find_bookings_by_status(BookingStatus::Cancelled)
        .await
        .unwrap();
    assert!(cancelled.is_empty());
}

#[tokio::test]
async fn test_find_by_name_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(dashboard("manageBooking/findByName")))
        .and(query_param("firstName", "No"))
        .and(query_param("lastName", "Body"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = client.find_bookings_by_name("No", "Body").await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_latest_booking_no_content_is_none() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(dashboard("manageBooking/latest")))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.latest_booking().await.unwrap().is_none());
}

#[tokio::test]
async fn test_latest_booking_returns_row() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(dashboard("manageBooking/latest")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bookingId": 9,
            "roomNumber": "R101",
            "bookingStatus": "Booked",
            "checkInDate": "2024-06-01",
            "checkOutDate": "2024-06-03"
        })))
        .mount(&server)
        .await;

    let latest = client.latest_booking().await.unwrap().unwrap();
    assert_eq!(latest.booking_id, 9);
}

#[tokio::test]
async fn test_empty_bed_listings_are_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(dashboard("manageBed/getAllBeds")))
        .respond_with(ResponseTemplate::new(404).set_body_string("Beds not found"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(dashboard("manageBed/getBedsByRoomId")))
        .and(query_param("room_id", "R7"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string("No beds found for the given room ID."),
        )
        .expect(1)
        .mount(&server)
        .await;

    assert!(client.list_beds().await.unwrap().is_empty());
    assert!(client.list_beds_in_room("R7").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_bed_listing_server_error_propagates() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(dashboard("manageBed/getAllBeds")))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client.list_beds().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_booking_mutations() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path(dashboard("manageBooking/cancelBooking")))
        .and(query_param("bookingId", "5"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("DELETE"))
        .and(path(dashboard("manageBooking/deleteBooking/5")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(dashboard("manageBooking/statusCounts")))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "Booked": 3, "Cancelled": 1 })),
        )
        .mount(&server)
        .await;

    client.cancel_booking(5).await.unwrap();
    client.delete_booking(5).await.unwrap();
    let counts = client.booking_status_counts().await.unwrap();
    assert_eq!(counts.get("Booked"), Some(&3));
}

// ── Rooms, beds, payments, notifications ────────────────────────────

#[tokio::test]
async fn test_rooms_and_beds() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(dashboard("manageRoom/getAllRooms")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "roomId": "RN1",
            "roomNumber": "101",
            "floor": 1,
            "capacity": 2,
            "beds": [{ "bedId": "B1", "bedNumber": "1" }, { "bedId": "B2", "bedNumber": "2" }]
        }])))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path(dashboard("manageRoom/updateRoom")))
        .and(query_param("room_id", "RN1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path(dashboard("manageBed/addBed")))
        .and(query_param("room_id", "RN1"))
        .and(body_json(json!({ "bedNumber": "3" })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let rooms = client.list_rooms().await.unwrap();
    assert_eq!(rooms[0].beds.len(), 2);

    client
        .update_room(&UpdateRoomRequest {
            room_id: "RN1".into(),
            room_number: "101".into(),
            floor: 1,
            capacity: 3,
        })
        .await
        .unwrap();
    client.add_bed("RN1", "3").await.unwrap();
}

#[tokio::test]
async fn test_payments_by_type() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(dashboard("managePayment/byType")))
        .and(query_param("paymentType", "CREDIT_CARD"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "paymentId": "PAY-1",
            "bookingId": 5,
            "paymentType": "CREDIT_CARD",
            "paymentDate": "2024-05-20T12:00:00",
            "amount": 100.0
        }])))
        .mount(&server)
        .await;

    let payments = client
        .payments_by_type(PaymentType::CreditCard)
        .await
        .unwrap();
    assert_eq!(payments[0].payment_id, "PAY-1");
    assert_eq!(payments[0].payment_type, Some(PaymentType::CreditCard));
}

#[tokio::test]
async fn test_notifications() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(dashboard("manageNotifications")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": 9,
            "title": "New booking",
            "message": "Ada booked R101",
            "isRead": false,
            "createdAt": "2024-05-20T12:00:00"
        }])))
        .mount(&server)
        .await;

    Mock::given(method("PATCH"))
        .and(path(dashboard("manageNotifications/9/markAsRead")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let list = client.list_notifications().await.unwrap();
    assert_eq!(list[0].title, "New booking");
    client.mark_notification_read(9).await.unwrap();
}

#[tokio::test]
async fn test_malformed_body_reports_preview() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path(dashboard("managePayment/allSorted")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.list_payments().await.unwrap_err();
    match err {
        Error::Deserialization { message, body } => {
            assert!(message.contains("body preview"));
            assert_eq!(body, "<html>oops</html>");
        }
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}
