//! Integration tests for the `hostel` CLI binary.
//!
//! Parsing, help, completions and exit codes run without a backend. The
//! booking and admin flows run against a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `hostel` binary with env isolation.
///
/// Config, session, and outbox all live under `home`, and every
/// `HOSTEL_*` variable the binary reads is cleared.
fn hostel_cmd(home: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("hostel");
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("HOSTEL_CONFIG", home.join("config.toml"))
        .env("HOSTEL_DATA_DIR", home.join("data"))
        .env("NO_COLOR", "1")
        .env_remove("HOSTEL_PROFILE")
        .env_remove("HOSTEL_API_URL")
        .env_remove("HOSTEL_OUTPUT")
        .env_remove("HOSTEL_INSECURE")
        .env_remove("HOSTEL_TIMEOUT")
        .env_remove("HOSTEL_USERNAME")
        .env_remove("HOSTEL_PASSWORD")
        .env_remove("HOSTEL_CARD_NUMBER")
        .env_remove("HOSTEL_CARD_CVV")
        .env_remove("RUST_LOG");
    cmd
}

/// Same as [`hostel_cmd`] but pointed at a mock backend.
fn backend_cmd(home: &Path, server: &MockServer) -> assert_cmd::Command {
    let mut cmd = hostel_cmd(home);
    cmd.env("HOSTEL_API_URL", server.uri());
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

async fn mount_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/admin/login"))
        .and(body_partial_json(json!({ "username": "admin" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "adminId": 7,
            "message": "Login successful"
        })))
        .mount(server)
        .await;
}

fn login(home: &Path, server: &MockServer) {
    backend_cmd(home, server)
        .env("HOSTEL_PASSWORD", "s3cret")
        .args(["login", "--username", "admin"])
        .assert()
        .success();
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_usage() {
    let home = TempDir::new().unwrap();
    let output = hostel_cmd(home.path()).output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    assert!(combined_output(&output).contains("Usage"));
}

#[test]
fn test_help_lists_commands() {
    let home = TempDir::new().unwrap();
    hostel_cmd(home.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("rooms")
                .and(predicate::str::contains("book"))
                .and(predicate::str::contains("bookings"))
                .and(predicate::str::contains("outbox")),
        );
}

#[test]
fn test_version() {
    let home = TempDir::new().unwrap();
    hostel_cmd(home.path())
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("hostel "));
}

#[test]
fn test_invalid_subcommand() {
    let home = TempDir::new().unwrap();
    hostel_cmd(home.path())
        .arg("checkout")
        .assert()
        .failure()
        .code(2);
}

#[test]
fn test_invalid_output_format() {
    let home = TempDir::new().unwrap();
    hostel_cmd(home.path())
        .args(["-o", "xml", "rooms", "list"])
        .assert()
        .failure()
        .code(2);
}

// ── Completions ─────────────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let home = TempDir::new().unwrap();
    hostel_cmd(home.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_hostel"));
}

#[test]
fn test_completions_zsh() {
    let home = TempDir::new().unwrap();
    hostel_cmd(home.path())
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef hostel"));
}

// ── Catalogue (no backend) ──────────────────────────────────────────

#[test]
fn test_rooms_list_plain_shows_every_category() {
    let home = TempDir::new().unwrap();
    hostel_cmd(home.path())
        .args(["-o", "plain", "rooms", "list"])
        .assert()
        .success()
        .stdout("RN1\nRN2\nRN3\n");
}

#[test]
fn test_rooms_list_json_carries_default_rates() {
    let home = TempDir::new().unwrap();
    let output = hostel_cmd(home.path())
        .args(["-o", "json", "rooms", "list"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let rooms: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rates: Vec<u64> = rooms
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["nightlyRate"].as_u64().unwrap())
        .collect();
    assert_eq!(rates, vec![25, 20, 15]);
}

#[test]
fn test_bad_date_is_a_validation_error() {
    let home = TempDir::new().unwrap();
    hostel_cmd(home.path())
        .args(["rooms", "available", "--check-in", "tomorrow", "--check-out", "2024-06-03"])
        .assert()
        .failure()
        .code(6);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_show_without_file() {
    let home = TempDir::new().unwrap();
    hostel_cmd(home.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[defaults]"));
}

#[test]
fn test_config_set_then_profiles() {
    let home = TempDir::new().unwrap();
    hostel_cmd(home.path())
        .args(["config", "set", "api_url", "https://hostel.example.com/"])
        .assert()
        .success();
    hostel_cmd(home.path())
        .args(["config", "set", "price.RN2", "22"])
        .assert()
        .success();

    hostel_cmd(home.path())
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout("default *\n");

    let saved = std::fs::read_to_string(home.path().join("config.toml")).unwrap();
    assert!(saved.contains("https://hostel.example.com"));
    assert!(saved.contains("RN2 = 22"));
}

#[test]
fn test_config_set_unknown_key() {
    let home = TempDir::new().unwrap();
    hostel_cmd(home.path())
        .args(["config", "set", "colour", "blue"])
        .assert()
        .failure()
        .code(6);
}

#[test]
fn test_unknown_profile() {
    let home = TempDir::new().unwrap();
    hostel_cmd(home.path())
        .args(["-p", "staging", "bookings", "list"])
        .assert()
        .failure()
        .code(7);
}

// ── Session gating ──────────────────────────────────────────────────

#[test]
fn test_whoami_without_session() {
    let home = TempDir::new().unwrap();
    hostel_cmd(home.path())
        .arg("whoami")
        .assert()
        .failure()
        .code(4);
}

#[test]
fn test_admin_command_without_session() {
    let home = TempDir::new().unwrap();
    hostel_cmd(home.path())
        .args(["bookings", "list"])
        .assert()
        .failure()
        .code(4)
        .stderr(predicate::str::contains("hostel login"));
}

// ── Against a backend ───────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_rooms_available() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/rooms/available"))
        .and(query_param("checkIn", "2024-06-01"))
        .and(query_param("checkOut", "2024-06-03"))
        .and(query_param("guests", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["RN2", "RN3"])))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    backend_cmd(home.path(), &server)
        .args([
            "-o", "plain", "rooms", "available", "--check-in", "2024-06-01", "--check-out",
            "2024-06-03", "--guests", "2",
        ])
        .assert()
        .success()
        .stdout("RN2\nRN3\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rooms_available_failure_is_not_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/rooms/available"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let output = backend_cmd(home.path(), &server)
        .args(["rooms", "available", "--check-in", "2024-06-01", "--check-out", "2024-06-03"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(combined_output(&output).contains("could not check availability"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_book_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/rooms/available"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["RN1", "RN2"])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/user/bookings/createBooking"))
        .and(body_partial_json(json!({
            "customerFirstName": "Ada",
            "customerLastName": "Lovelace",
            "roomNumber": "RN2",
            "checkInDate": "2024-06-01",
            "checkOutDate": "2024-06-03"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "bookingId": 42,
            "customerFullName": "Ada Lovelace",
            "roomNumber": "R201",
            "checkInDate": "2024-06-01",
            "checkOutDate": "2024-06-03",
            "totalPrice": 40.0,
            "paymentId": "PAY-9"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/contact/send-sms"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    backend_cmd(home.path(), &server)
        .env("HOSTEL_CARD_NUMBER", "4242424242424242")
        .env("HOSTEL_CARD_CVV", "123")
        .args([
            "-o", "plain", "book", "--room", "RN2", "--check-in", "2024-06-01", "--check-out",
            "2024-06-03", "--first-name", "Ada", "--last-name", "Lovelace", "--dob", "1990-12-10",
            "--email", "ada@example.com", "--phone", "+44 20 0000", "--expiry", "12/27",
        ])
        .assert()
        .success()
        .stdout("42\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_book_rejection_shows_backend_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/rooms/available"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!(["RN1"])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/user/bookings/createBooking"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("No available beds for the selected dates"),
        )
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let output = backend_cmd(home.path(), &server)
        .args([
            "book", "--check-in", "2024-06-01", "--check-out", "2024-06-03", "--first-name",
            "Ada", "--last-name", "Lovelace", "--dob", "1990-12-10", "--email",
            "ada@example.com", "--phone", "+44 20 0000", "--card-number", "4242424242424242",
            "--expiry", "12/27", "--cvv", "123",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("No available beds for the selected dates"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_book_with_no_rooms_left() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/user/rooms/available"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/user/bookings/createBooking"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    let output = backend_cmd(home.path(), &server)
        .args([
            "book", "--check-in", "2024-06-01", "--check-out", "2024-06-03", "--first-name",
            "Ada", "--last-name", "Lovelace", "--dob", "1990-12-10", "--email",
            "ada@example.com", "--phone", "+44 20 0000", "--card-number", "4242424242424242",
            "--expiry", "12/27", "--cvv", "123",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("No rooms available"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_whoami_logout() {
    let server = MockServer::start().await;
    mount_login(&server).await;

    let home = TempDir::new().unwrap();
    login(home.path(), &server);

    hostel_cmd(home.path())
        .arg("whoami")
        .assert()
        .success()
        .stdout(predicate::str::contains("admin"));

    hostel_cmd(home.path()).arg("logout").assert().success();

    hostel_cmd(home.path())
        .arg("whoami")
        .assert()
        .failure()
        .code(4);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_login_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/admin/login"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "success": false,
            "message": "Invalid credentials"
        })))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    backend_cmd(home.path(), &server)
        .env("HOSTEL_PASSWORD", "wrong")
        .args(["login", "--username", "admin"])
        .assert()
        .failure()
        .code(4);

    assert!(!home.path().join("data").join("session.toml").exists());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_bookings_list_after_login() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("GET"))
        .and(path("/api/admin/dashboard/manageBooking/getAllBookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
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
        }])))
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    login(home.path(), &server);

    backend_cmd(home.path(), &server)
        .args(["-o", "plain", "bookings", "list"])
        .assert()
        .success()
        .stdout("5\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_destructive_command_needs_yes_when_piped() {
    let server = MockServer::start().await;
    mount_login(&server).await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let home = TempDir::new().unwrap();
    login(home.path(), &server);

    backend_cmd(home.path(), &server)
        .args(["bookings", "delete", "5"])
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("--yes"));
}
