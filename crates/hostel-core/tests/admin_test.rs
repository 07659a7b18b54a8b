#![allow(clippy::unwrap_used)]
// Admin console: session gate, refresh, and targeted re-fetch after mutations.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hostel_core::{AdminCommand, BackendConfig, BookingStatus, Collection, CoreError, Hostel};

fn dashboard(suffix: &str) -> String {
    format!("/api/admin/dashboard/{suffix}")
}

fn booking(id: i64, name: &str) -> serde_json::Value {
    json!({
        "bookingId": id,
        "customerFullName": name,
        "roomNumber": "RN1",
        "bedNumber": "B1",
        "bookingStatus": "Booked",
        "checkInDate": "2024-06-01",
        "checkOutDate": "2024-06-03",
        "totalPrice": 100.0
    })
}

fn notification(id: i64, read: bool) -> serde_json::Value {
    json!({
        "id": id,
        "title": "New booking",
        "message": "Room RN1",
        "read": read
    })
}

async fn setup(admin_id: Option<i64>) -> (MockServer, Hostel) {
    let server = MockServer::start().await;
    let mut config = BackendConfig::new(Url::parse(&server.uri()).unwrap());
    config.admin_id = admin_id;
    let hostel = Hostel::new(config).unwrap();
    (server, hostel)
}

#[tokio::test]
async fn admin_requires_session() {
    let (_server, hostel) = setup(None).await;
    assert!(matches!(hostel.admin(), Err(CoreError::NotLoggedIn)));
}

#[tokio::test]
async fn login_stores_admin_id_and_logout_clears_it() {
    let (server, hostel) = setup(None).await;
    Mock::given(method("POST"))
        .and(path("/api/admin/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "adminId": 7,
            "message": "Login successful"
        })))
        .mount(&server)
        .await;

    let id = hostel
        .login("admin", &SecretString::from("hunter2"))
        .await
        .unwrap();
    assert_eq!(id, 7);
    assert_eq!(hostel.admin_id(), Some(7));
    assert!(hostel.admin().is_ok());

    hostel.logout();
    assert_eq!(hostel.admin_id(), None);
}

#[tokio::test]
async fn bad_credentials_fail_authentication() {
    let (server, hostel) = setup(None).await;
    Mock::given(method("POST"))
        .and(path("/api/admin/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "message": "Invalid credentials"
        })))
        .mount(&server)
        .await;

    let err = hostel
        .login("admin", &SecretString::from("wrong"))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::AuthenticationFailed { .. }));
    assert_eq!(hostel.admin_id(), None);
}

#[tokio::test]
async fn refresh_populates_store() {
    let (server, hostel) = setup(Some(1)).await;
    Mock::given(method("GET"))
        .and(path(dashboard("manageBooking/getAllBookings")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([booking(2, "Grace Hopper"), booking(1, "Ada Lovelace")])),
        )
        .mount(&server)
        .await;

    let admin = hostel.admin().unwrap();
    admin.refresh(Collection::Bookings).await.unwrap();

    let names: Vec<String> = hostel
        .store()
        .bookings_snapshot()
        .iter()
        .map(|b| b.customer_full_name.clone())
        .collect();
    assert_eq!(names, vec!["Grace Hopper", "Ada Lovelace"]);
    assert!(hostel.store().last_refresh(Collection::Bookings).is_some());
    assert!(hostel.store().last_refresh(Collection::Customers).is_none());
}

#[tokio::test]
async fn delete_refetches_only_affected_collections() {
    let (server, hostel) = setup(Some(1)).await;
    Mock::given(method("GET"))
        .and(path(dashboard("manageBooking/getAllBookings")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([booking(2, "Grace Hopper")])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(dashboard("managePayment/allSorted")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(dashboard("manageCustomer/findAll")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(dashboard("manageBooking/deleteBooking/1")))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let admin = hostel.admin().unwrap();
    admin
        .execute(AdminCommand::DeleteBooking { booking_id: 1 })
        .await
        .unwrap();

    let snapshot = hostel.store().bookings_snapshot();
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].booking_id, 2);
}

#[tokio::test]
async fn mark_read_survives_failed_refresh() {
    let (server, hostel) = setup(Some(1)).await;
    Mock::given(method("GET"))
        .and(path(dashboard("manageNotifications")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([notification(5, false)])))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("PATCH"))
        .and(path(dashboard("manageNotifications/5/markAsRead")))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let admin = hostel.admin().unwrap();
    admin.refresh(Collection::Notifications).await.unwrap();
    assert_eq!(hostel.store().unread_notification_count(), 1);

    // The follow-up refresh hits no mock and fails; the command still succeeds.
    admin
        .execute(AdminCommand::MarkNotificationRead { id: 5 })
        .await
        .unwrap();
    assert_eq!(hostel.store().unread_notification_count(), 0);
}

#[tokio::test]
async fn unknown_booking_is_not_found() {
    let (server, hostel) = setup(Some(1)).await;
    Mock::given(method("GET"))
        .and(path(dashboard("manageBooking/getDetails")))
        .and(query_param("bookingId", "99"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = hostel.admin().unwrap().get_booking(99).await.unwrap_err();
    match err {
        CoreError::NotFound {
            entity_type,
            identifier,
        } => {
            assert_eq!(entity_type, "booking");
            assert_eq!(identifier, "99");
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn empty_search_results_are_not_errors() {
    let (server, hostel) = setup(Some(1)).await;
    Mock::given(method("GET"))
        .and(path(dashboard("manageBooking/findByStatus")))
        .and(query_param("status", "Cancelled"))
        .respond_with(ResponseTemplate::new(404).set_body_string("No bookings found"))
        .mount(&server)
        .await;

    let found = hostel
        .admin()
        .unwrap()
        .find_bookings_by_status(BookingStatus::Cancelled)
        .await
        .unwrap();
    assert!(found.is_empty());
}

#[tokio::test]
async fn deleting_last_room_clears_beds() {
    let (server, hostel) = setup(Some(1)).await;
    Mock::given(method("GET"))
        .and(path(dashboard("manageBed/getAllBeds")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!([{ "bedId": "B1", "bedNumber": "1" }])),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(dashboard("manageBed/getAllBeds")))
        .respond_with(ResponseTemplate::new(404).set_body_string("Beds not found"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(dashboard("manageRoom/getAllRooms")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(dashboard("manageRoom/deleteRoom")))
        .and(query_param("room_id", "R1"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let admin = hostel.admin().unwrap();
    admin.refresh(Collection::Beds).await.unwrap();
    assert_eq!(hostel.store().beds_snapshot().len(), 1);

    admin
        .execute(AdminCommand::DeleteRoom {
            room_id: "R1".into(),
        })
        .await
        .unwrap();

    assert!(hostel.store().beds_snapshot().is_empty());
    admin.refresh(Collection::Beds).await.unwrap();
}

#[tokio::test]
async fn room_without_beds_lists_none() {
    let (server, hostel) = setup(Some(1)).await;
    Mock::given(method("GET"))
        .and(path(dashboard("manageBed/getBedsByRoomId")))
        .and(query_param("room_id", "R2"))
        .respond_with(
            ResponseTemplate::new(404).set_body_string("No beds found for the given room ID."),
        )
        .mount(&server)
        .await;

    let beds = hostel.admin().unwrap().beds_in_room("R2").await.unwrap();
    assert!(beds.is_empty());
}

#[tokio::test]
async fn latest_booking_on_empty_hostel_is_none() {
    let (server, hostel) = setup(Some(1)).await;
    Mock::given(method("GET"))
        .and(path(dashboard("manageBooking/latest")))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let latest = hostel.admin().unwrap().latest_booking().await.unwrap();
    assert!(latest.is_none());
}
