//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors
//! with actionable help text and stable exit codes.

use miette::Diagnostic;
use thiserror::Error;

use hostel_config::ConfigError;
use hostel_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONNECTION: i32 = 3;
    pub const AUTH: i32 = 4;
    pub const NOT_FOUND: i32 = 5;
    pub const VALIDATION: i32 = 6;
    pub const CONFIG: i32 = 7;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to backend at {url}")]
    #[diagnostic(
        code(hostel::connection_failed),
        help(
            "Check that the booking backend is running and reachable.\n\
             Reason: {reason}\n\
             Override the URL with --api-url or: hostel config set api_url <url>"
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Request timed out")]
    #[diagnostic(
        code(hostel::timeout),
        help("Increase the timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(hostel::auth_failed),
        help("Verify your administrator username and password, then run: hostel login")
    )]
    AuthFailed { message: String },

    #[error("Not logged in as an administrator (profile '{profile}')")]
    #[diagnostic(
        code(hostel::not_logged_in),
        help("Run: hostel login --profile {profile}")
    )]
    NotLoggedIn { profile: String },

    #[error("No credentials configured for profile '{profile}'")]
    #[diagnostic(
        code(hostel::no_credentials),
        help(
            "Store a password with: hostel config set-password\n\
             Or set the HOSTEL_PASSWORD environment variable."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(hostel::not_found),
        help("Run: hostel {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── Backend ──────────────────────────────────────────────────────
    /// The backend's own wording, shown as-is.
    #[error("{message}")]
    #[diagnostic(code(hostel::rejected))]
    Rejected { message: String, status: u16 },

    #[error("API error: {message}")]
    #[diagnostic(code(hostel::api_error))]
    ApiError { message: String },

    #[error("Notification outbox: {message}")]
    #[diagnostic(
        code(hostel::outbox),
        help("Inspect pending notifications with: hostel outbox list")
    )]
    Outbox { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(hostel::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(hostel::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: hostel config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("Configuration error: {message}")]
    #[diagnostic(
        code(hostel::config),
        help("Check the configuration file with: hostel config show")
    )]
    Config { message: String },

    // ── Interactive ──────────────────────────────────────────────────
    #[error("Destructive operation '{action}' requires confirmation")]
    #[diagnostic(
        code(hostel::confirmation_required),
        help("Use --yes (-y) to skip confirmation in non-interactive contexts.")
    )]
    NonInteractiveRequiresYes { action: String },

    // ── IO ───────────────────────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(hostel::io))]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } | Self::Timeout => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NotLoggedIn { .. } | Self::NoCredentials { .. } => {
                exit_code::AUTH
            }
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::VALIDATION,
            Self::ProfileNotFound { .. } | Self::Config { .. } => exit_code::CONFIG,
            Self::NonInteractiveRequiresYes { .. } => exit_code::USAGE,
            Self::Rejected { .. } | Self::ApiError { .. } | Self::Outbox { .. } | Self::Io(_) => {
                exit_code::GENERAL
            }
        }
    }

    /// Attach the active profile name to a session error.
    pub fn for_profile(self, profile: &str) -> Self {
        match self {
            Self::NotLoggedIn { .. } => Self::NotLoggedIn {
                profile: profile.into(),
            },
            other => other,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

fn list_command_for(entity_type: &str) -> String {
    match entity_type {
        "booking" => "bookings list".into(),
        "customer" => "customers list".into(),
        "room" => "admin-rooms list".into(),
        "bed" => "beds list".into(),
        "payment" => "payments list".into(),
        "notification" => "notifications list".into(),
        "message" => "messages list".into(),
        other => format!("{other}s list"),
    }
}

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout => Self::Timeout,
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::NotLoggedIn => Self::NotLoggedIn {
                profile: "default".into(),
            },
            CoreError::NotFound {
                entity_type,
                identifier,
            } => Self::NotFound {
                list_command: list_command_for(&entity_type),
                resource_type: entity_type,
                identifier,
            },
            CoreError::ValidationFailed { message } => Self::Validation {
                field: "input".into(),
                reason: message,
            },
            CoreError::Rejected { message, status } => Self::Rejected { message, status },
            CoreError::Outbox { message } => Self::Outbox { message },
            CoreError::Config { message } => Self::Config { message },
            CoreError::SubmissionInFlight => Self::ApiError {
                message: "a booking submission is already in progress".into(),
            },
            CoreError::Api { message, .. } | CoreError::Internal(message) => {
                Self::ApiError { message }
            }
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::UnknownProfile { name } => Self::ProfileNotFound {
                name,
                available: "(see: hostel config profiles)".into(),
            },
            ConfigError::Io(e) => Self::Io(e),
            other => Self::Config {
                message: other.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejected_booking_shows_server_text_verbatim() {
        let err = CliError::from(CoreError::Rejected {
            message: "No beds left in RN1".into(),
            status: 409,
        });
        assert_eq!(err.to_string(), "No beds left in RN1");
        assert_eq!(err.exit_code(), exit_code::GENERAL);
    }

    #[test]
    fn exit_codes_follow_error_class() {
        let not_found = CliError::from(CoreError::NotFound {
            entity_type: "booking".into(),
            identifier: "9".into(),
        });
        assert_eq!(not_found.exit_code(), exit_code::NOT_FOUND);
        assert!(matches!(
            not_found,
            CliError::NotFound { ref list_command, .. } if list_command == "bookings list"
        ));

        let session = CliError::from(CoreError::NotLoggedIn).for_profile("staging");
        assert_eq!(session.exit_code(), exit_code::AUTH);
        assert!(session.to_string().contains("staging"));

        let config = CliError::from(ConfigError::UnknownProfile {
            name: "nope".into(),
        });
        assert_eq!(config.exit_code(), exit_code::CONFIG);
        assert_eq!(
            CliError::from(CoreError::ValidationFailed {
                message: "missing".into()
            })
            .exit_code(),
            exit_code::VALIDATION
        );
    }
}
