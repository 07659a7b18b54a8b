#![allow(clippy::unwrap_used)]
// Booking pipeline tests against a wiremock backend.

use std::time::Duration;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use hostel_core::{
    Availability, BackendConfig, BookingDraft, BookingSession, CoreError, DraftField,
    FetchOutcome, Hostel, RoomCategory, SearchCriteria,
};

// ── Helpers ─────────────────────────────────────────────────────────

const AVAILABLE: &str = "/api/user/rooms/available";
const CREATE: &str = "/api/user/bookings/createBooking";
const SMS: &str = "/api/contact/send-sms";

async fn setup() -> (MockServer, Hostel) {
    let server = MockServer::start().await;
    let config = BackendConfig::new(Url::parse(&server.uri()).unwrap());
    let hostel = Hostel::new(config).unwrap();
    (server, hostel)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn june_stay(guests: u32) -> SearchCriteria {
    SearchCriteria::new(date(2024, 6, 1), date(2024, 6, 3), guests)
}

async fn mock_available(server: &MockServer, check_in: &str, rooms: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(AVAILABLE))
        .and(query_param("checkIn", check_in))
        .respond_with(ResponseTemplate::new(200).set_body_json(rooms))
        .mount(server)
        .await;
}

fn fill_guest(session: &BookingSession) {
    for (field, value) in [
        (DraftField::FirstName, "Ada"),
        (DraftField::LastName, "Lovelace"),
        (DraftField::DateOfBirth, "1990-12-10"),
        (DraftField::Email, "ada@example.com"),
        (DraftField::Phone, "+44 20 0000"),
        (DraftField::Cardholder, "A LOVELACE"),
        (DraftField::CardNumber, "4111111111111111"),
        (DraftField::Expiry, "12/27"),
        (DraftField::Cvv, "123"),
    ] {
        session.apply_input(field, value).unwrap();
    }
}

fn confirmation_body() -> serde_json::Value {
    json!({
        "bookingId": 42,
        "customerFullName": "Ada Lovelace",
        "roomNumber": "RN1",
        "checkInDate": "2024-06-01",
        "checkOutDate": "2024-06-03",
        "totalPrice": 100.0,
        "paymentId": "PAY-42"
    })
}

// ── Availability ────────────────────────────────────────────────────

#[tokio::test]
async fn incomplete_criteria_issue_no_request() {
    let (server, hostel) = setup().await;
    let session = hostel.booking();

    mock_available(&server, "2024-06-01", json!(["RN2"])).await;
    session.mount(Some(june_stay(2))).await;
    let before = session.availability();
    assert_eq!(before, Availability::Loaded(vec![RoomCategory::FourBed]));

    let zero_guests = june_stay(0);
    assert_eq!(session.apply_search(zero_guests).await, FetchOutcome::Skipped);

    let no_checkout = SearchCriteria {
        check_out: None,
        ..june_stay(2)
    };
    assert_eq!(session.apply_search(no_checkout).await, FetchOutcome::Skipped);

    assert_eq!(session.availability(), before);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn identical_criteria_are_not_requeried() {
    let (server, hostel) = setup().await;
    let session = hostel.booking();
    mock_available(&server, "2024-06-01", json!(["RN1"])).await;

    assert!(matches!(
        session.apply_search(june_stay(2)).await,
        FetchOutcome::Applied(_)
    ));
    assert_eq!(session.apply_search(june_stay(2)).await, FetchOutcome::Unchanged);
    assert_eq!(server.received_requests().await.unwrap().len(), 1);
}

#[tokio::test]
async fn failed_query_is_distinct_from_no_rooms() {
    let (server, hostel) = setup().await;
    let session = hostel.booking();

    Mock::given(method("GET"))
        .and(path(AVAILABLE))
        .and(query_param("checkIn", "2024-06-01"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database down"))
        .mount(&server)
        .await;
    mock_available(&server, "2024-07-01", json!([])).await;

    session.apply_search(june_stay(2)).await;
    assert!(session.availability().is_failed());

    session
        .apply_search(SearchCriteria::new(date(2024, 7, 1), date(2024, 7, 3), 2))
        .await;
    assert_eq!(session.availability(), Availability::Loaded(Vec::new()));
    assert_eq!(session.draft().room_category(), None);
}

#[tokio::test]
async fn stale_response_is_discarded() {
    let (server, hostel) = setup().await;
    let session = hostel.booking();

    Mock::given(method("GET"))
        .and(path(AVAILABLE))
        .and(query_param("checkIn", "2024-06-01"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!(["RN1"]))
                .set_delay(Duration::from_millis(300)),
        )
        .mount(&server)
        .await;
    mock_available(&server, "2024-07-01", json!(["RN3"])).await;

    let slow = june_stay(2);
    let fast = SearchCriteria::new(date(2024, 7, 1), date(2024, 7, 3), 2);
    let (first, second) = tokio::join!(session.apply_search(slow), session.apply_search(fast));

    assert_eq!(first, FetchOutcome::Stale);
    assert!(matches!(second, FetchOutcome::Applied(_)));
    assert_eq!(
        session.availability(),
        Availability::Loaded(vec![RoomCategory::SixBed])
    );
    assert_eq!(session.draft().room_category(), Some(RoomCategory::SixBed));
}

#[tokio::test]
async fn room_selection_wins_over_auto_select() {
    let (server, hostel) = setup().await;
    let session = hostel.booking();
    mock_available(&server, "2024-06-01", json!(["RN1", "RN2"])).await;

    hostel.selection().offer(RoomCategory::SixBed);
    session.mount(Some(june_stay(2))).await;

    assert_eq!(session.draft().room_category(), Some(RoomCategory::SixBed));
    assert_eq!(hostel.selection().peek(), None);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn concurrent_edits_are_not_lost() {
    let (_server, hostel) = setup().await;

    let tasks: Vec<_> = [DraftField::FirstName, DraftField::LastName]
        .into_iter()
        .map(|field| {
            let hostel = hostel.clone();
            tokio::spawn(async move {
                for i in 0..200 {
                    hostel.booking().apply_input(field, &format!("N{i}")).unwrap();
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();
    for task in tasks {
        task.await.unwrap();
    }

    let draft = hostel.booking().draft();
    assert_eq!(draft.first_name(), "N199");
    assert_eq!(draft.last_name(), "N199");
}

#[tokio::test]
async fn edited_dates_survive_new_criteria() {
    let (server, hostel) = setup().await;
    let session = hostel.booking();
    mock_available(&server, "2024-06-01", json!(["RN1"])).await;
    mock_available(&server, "2024-07-01", json!(["RN1"])).await;

    session.mount(Some(june_stay(2))).await;
    session.apply_input(DraftField::CheckOut, "2024-06-05").unwrap();

    session
        .apply_search(SearchCriteria::new(date(2024, 7, 1), date(2024, 7, 3), 3))
        .await;

    let draft = session.draft();
    assert_eq!(draft.check_in(), "2024-07-01");
    assert_eq!(draft.check_out(), "2024-06-05");
    assert_eq!(draft.guests(), 3);
}

// ── Submission ──────────────────────────────────────────────────────

#[tokio::test]
async fn end_to_end_booking_prices_and_resets() {
    let (server, hostel) = setup().await;
    let session = hostel.booking();
    mock_available(&server, "2024-06-01", json!(["RN1", "RN3"])).await;

    Mock::given(method("POST"))
        .and(path(CREATE))
        .and(body_partial_json(json!({
            "roomNumber": "RN1",
            "checkInDate": "2024-06-01",
            "checkOutDate": "2024-06-03",
            "customerDateOfBirth": "1990-12-10",
            "totalPrice": 100.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(confirmation_body()))
        .expect(1)
        .mount(&server)
        .await;

    session.mount(Some(june_stay(2))).await;
    assert_eq!(session.draft().room_category(), Some(RoomCategory::TwoBed));
    assert_eq!(session.quote().total, 100);

    fill_guest(session);
    let confirmation = session.submit().await.unwrap();

    assert_eq!(confirmation.booking_id, 42);
    assert_eq!(confirmation.customer_full_name, "Ada Lovelace");
    assert_eq!(confirmation.payment_id.as_deref(), Some("PAY-42"));
    assert_eq!(session.confirmation(), Some(confirmation));
    assert_eq!(session.draft(), BookingDraft::default());
    assert!(!session.is_submitting());
}

#[tokio::test]
async fn rejected_submission_keeps_draft() {
    let (server, hostel) = setup().await;
    let session = hostel.booking();
    mock_available(&server, "2024-06-01", json!(["RN1"])).await;

    Mock::given(method("POST"))
        .and(path(CREATE))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(json!({ "message": "No beds left in RN1" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SMS))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    session.mount(Some(june_stay(2))).await;
    fill_guest(session);
    let before = session.draft();

    let err = session.submit().await.unwrap_err();
    assert!(matches!(err, CoreError::Rejected { status: 409, .. }));
    assert_eq!(err.to_string(), "No beds left in RN1");
    assert_eq!(session.draft(), before);
    assert_eq!(session.confirmation(), None);
    assert!(hostel.outbox().is_empty().await);
}

#[tokio::test]
async fn incomplete_draft_never_reaches_backend() {
    let (server, hostel) = setup().await;
    let session = hostel.booking();

    Mock::given(method("POST"))
        .and(path(CREATE))
        .respond_with(ResponseTemplate::new(200).set_body_json(confirmation_body()))
        .expect(0)
        .mount(&server)
        .await;

    let err = session.submit().await.unwrap_err();
    assert!(matches!(err, CoreError::ValidationFailed { .. }));
}

#[tokio::test]
async fn concurrent_submit_is_rejected() {
    let (server, hostel) = setup().await;
    let session = hostel.booking();
    mock_available(&server, "2024-06-01", json!(["RN1"])).await;

    Mock::given(method("POST"))
        .and(path(CREATE))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(confirmation_body())
                .set_delay(Duration::from_millis(200)),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SMS))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    session.mount(Some(june_stay(2))).await;
    fill_guest(session);

    let (first, second) = tokio::join!(session.submit(), session.submit());
    assert!(first.is_ok());
    assert!(matches!(second, Err(CoreError::SubmissionInFlight)));
}

#[tokio::test]
async fn booking_queues_front_desk_notification() {
    let (server, hostel) = setup().await;
    let session = hostel.booking();
    mock_available(&server, "2024-06-01", json!(["RN1"])).await;

    Mock::given(method("POST"))
        .and(path(CREATE))
        .respond_with(ResponseTemplate::new(200).set_body_json(confirmation_body()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SMS))
        .and(body_partial_json(json!({
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "message": "New Booking:\nRoom: RN1\nGuests: 2\nCheck-in: 2024-06-01\nCheck-out: 2024-06-03\nTotal: €100"
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    session.mount(Some(june_stay(2))).await;
    fill_guest(session);
    session.submit().await.unwrap();

    let pending = hostel.outbox().pending().await;
    assert_eq!(pending.len(), 1);

    let report = hostel.outbox().flush().await.unwrap();
    assert_eq!(report.delivered, 1);
    assert!(hostel.outbox().is_empty().await);
}

#[tokio::test]
async fn notification_failure_does_not_affect_confirmation() {
    let (server, hostel) = setup().await;
    let session = hostel.booking();
    mock_available(&server, "2024-06-01", json!(["RN1"])).await;

    Mock::given(method("POST"))
        .and(path(CREATE))
        .respond_with(ResponseTemplate::new(200).set_body_json(confirmation_body()))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(SMS))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    session.mount(Some(june_stay(2))).await;
    fill_guest(session);
    let confirmation = session.submit().await.unwrap();

    let report = hostel.outbox().flush().await.unwrap();
    assert_eq!(report.failed, 1);
    assert_eq!(session.confirmation(), Some(confirmation));

    let pending = hostel.outbox().pending().await;
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].attempts, 1);
    assert!(pending[0].last_error.is_some());
}
