// ── Core error types ──
//
// User-facing errors from hostel-core. Consumers never see HTTP status
// codes or JSON parse failures directly. The `From<hostel_api::Error>`
// impl translates transport-layer errors into domain variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot reach backend at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Backend request timed out")]
    Timeout,

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Not logged in as an administrator")]
    NotLoggedIn,

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Entity not found: {entity_type} with id {identifier}")]
    NotFound {
        entity_type: String,
        identifier: String,
    },

    // ── Booking errors ───────────────────────────────────────────────
    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("A booking submission is already in progress")]
    SubmissionInFlight,

    // ── Server errors ────────────────────────────────────────────────
    /// The backend refused the request; `message` is its own wording.
    #[error("{message}")]
    Rejected { message: String, status: u16 },

    #[error("API error: {message}")]
    Api {
        message: String,
        status: Option<u16>,
    },

    // ── Outbox errors ────────────────────────────────────────────────
    #[error("Notification outbox error: {message}")]
    Outbox { message: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Re-label a generic not-found error with the entity that was requested.
    pub(crate) fn not_found_as(self, entity_type: &str, identifier: impl ToString) -> Self {
        match self {
            Self::NotFound { .. } => Self::NotFound {
                entity_type: entity_type.to_owned(),
                identifier: identifier.to_string(),
            },
            other => other,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<hostel_api::Error> for CoreError {
    fn from(err: hostel_api::Error) -> Self {
        match err {
            hostel_api::Error::Authentication { message } => {
                CoreError::AuthenticationFailed { message }
            }
            hostel_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            hostel_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            hostel_api::Error::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            hostel_api::Error::Api {
                status: 404,
                message,
            } => CoreError::NotFound {
                entity_type: "resource".into(),
                identifier: message,
            },
            hostel_api::Error::Api { status, message } => CoreError::Rejected { message, status },
            hostel_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_relabelled() {
        let err = CoreError::from(hostel_api::Error::Api {
            status: 404,
            message: "404 Not Found".into(),
        })
        .not_found_as("booking", 7);

        match err {
            CoreError::NotFound {
                entity_type,
                identifier,
            } => {
                assert_eq!(entity_type, "booking");
                assert_eq!(identifier, "7");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn rejection_keeps_server_text() {
        let err = CoreError::from(hostel_api::Error::Api {
            status: 409,
            message: "Room is full".into(),
        });
        assert_eq!(err.to_string(), "Room is full");
    }
}
