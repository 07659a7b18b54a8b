// ── Runtime backend configuration ──
//
// Describes how to reach the booking backend and how the booking
// pipeline behaves. Never touches disk: the CLI/TUI builds a
// `BackendConfig` from its own config layer and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use hostel_api::TransportConfig;
use url::Url;

use crate::outbox::DEFAULT_MAX_ATTEMPTS;
use crate::pricing::PricingTable;

/// Configuration for one backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Backend base URL (e.g., `http://localhost:8080`).
    pub url: Url,
    pub timeout: Duration,
    /// Skip TLS certificate verification.
    pub accept_invalid_certs: bool,
    pub pricing: PricingTable,
    /// File backing the notification outbox. `None` keeps it in memory.
    pub outbox_path: Option<PathBuf>,
    pub outbox_max_attempts: u32,
    /// How often the outbox worker retries pending notifications.
    pub outbox_retry_interval: Duration,
    /// Stored administrator session, if any.
    pub admin_id: Option<i64>,
}

impl BackendConfig {
    pub fn new(url: Url) -> Self {
        Self {
            url,
            timeout: Duration::from_secs(30),
            accept_invalid_certs: false,
            pricing: PricingTable::default(),
            outbox_path: None,
            outbox_max_attempts: DEFAULT_MAX_ATTEMPTS,
            outbox_retry_interval: Duration::from_secs(60),
            admin_id: None,
        }
    }

    pub(crate) fn transport(&self) -> TransportConfig {
        TransportConfig {
            timeout: self.timeout,
            accept_invalid_certs: self.accept_invalid_certs,
        }
    }
}
