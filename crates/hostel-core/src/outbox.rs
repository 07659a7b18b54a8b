// ── Notification outbox ──
//
// Post-booking notifications are queued here instead of being sent inline.
// Delivery is retried independently of the booking request, and pending
// entries can be persisted to a JSON file so they survive restarts.

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use hostel_api::{ContactRequest, CreateBookingRequest, HostelClient};
use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::CoreError;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// A queued notification awaiting delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutboxEntry {
    pub id: Uuid,
    pub request: ContactRequest,
    pub attempts: u32,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub last_attempt_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub last_error: Option<String>,
}

impl OutboxEntry {
    fn new(request: ContactRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
            attempts: 0,
            created_at: Utc::now(),
            last_attempt_at: None,
            last_error: None,
        }
    }
}

/// Tally of a single flush pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct FlushReport {
    pub delivered: usize,
    /// Failed this pass but kept for another attempt.
    pub failed: usize,
    /// Failed for the last permitted time and removed.
    pub dropped: usize,
}

/// Durable queue of SMS notifications.
pub struct NotificationOutbox {
    client: HostelClient,
    pending: Mutex<VecDeque<OutboxEntry>>,
    /// Serializes flush passes so an entry is never sent twice concurrently.
    flushing: Mutex<()>,
    path: Option<PathBuf>,
    max_attempts: u32,
    notify: Notify,
}

impl NotificationOutbox {
    /// Outbox that lives only as long as the process.
    pub fn in_memory(client: HostelClient, max_attempts: u32) -> Self {
        Self {
            client,
            pending: Mutex::new(VecDeque::new()),
            flushing: Mutex::new(()),
            path: None,
            max_attempts: max_attempts.max(1),
            notify: Notify::new(),
        }
    }

    /// Outbox backed by `path`. Entries already in the file are loaded.
    pub fn open(
        client: HostelClient,
        path: impl Into<PathBuf>,
        max_attempts: u32,
    ) -> Result<Self, CoreError> {
        let path = path.into();
        let entries = load_entries(&path)?;
        if !entries.is_empty() {
            info!(count = entries.len(), path = %path.display(), "loaded pending notifications");
        }
        let mut outbox = Self::in_memory(client, max_attempts);
        outbox.pending = Mutex::new(entries);
        outbox.path = Some(path);
        Ok(outbox)
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Queue a notification and wake the worker.
    pub async fn enqueue(&self, request: ContactRequest) -> Result<Uuid, CoreError> {
        let entry = OutboxEntry::new(request);
        let id = entry.id;
        {
            let mut pending = self.pending.lock().await;
            pending.push_back(entry);
            self.persist(&pending)?;
        }
        debug!(%id, "notification queued");
        self.notify.notify_one();
        Ok(id)
    }

    /// Snapshot of queued entries, oldest first.
    pub async fn pending(&self) -> Vec<OutboxEntry> {
        self.pending.lock().await.iter().cloned().collect()
    }

    pub async fn len(&self) -> usize {
        self.pending.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.pending.lock().await.is_empty()
    }

    /// Attempt delivery of every queued entry once.
    ///
    /// Delivered entries are removed. Failed entries stay queued until they
    /// reach the attempt limit, after which they are dropped with a warning.
    /// Entries enqueued while the pass is running wait for the next one.
    pub async fn flush(&self) -> Result<FlushReport, CoreError> {
        let _pass = self.flushing.lock().await;
        let batch = self.pending().await;
        let mut report = FlushReport::default();
        if batch.is_empty() {
            return Ok(report);
        }

        let mut outcomes = Vec::with_capacity(batch.len());
        for entry in &batch {
            let result = self.client.send_sms(&entry.request).await;
            outcomes.push((entry.id, result.err().map(|e| e.to_string())));
        }

        let mut pending = self.pending.lock().await;
        let now = Utc::now();
        for (id, error) in outcomes {
            let Some(pos) = pending.iter().position(|e| e.id == id) else {
                continue;
            };
            match error {
                None => {
                    pending.remove(pos);
                    report.delivered += 1;
                    debug!(%id, "notification delivered");
                }
                Some(message) => {
                    let give_up = pending.get_mut(pos).is_some_and(|entry| {
                        entry.attempts += 1;
                        entry.last_attempt_at = Some(now);
                        entry.last_error = Some(message.clone());
                        entry.attempts >= self.max_attempts
                    });
                    if give_up {
                        pending.remove(pos);
                        report.dropped += 1;
                        warn!(%id, error = %message, "dropping notification after final attempt");
                    } else {
                        report.failed += 1;
                        debug!(%id, error = %message, "notification delivery failed, will retry");
                    }
                }
            }
        }
        self.persist(&pending)?;
        Ok(report)
    }

    /// Deliver in the background: immediately after each enqueue, and on
    /// `retry_every` while anything is still pending. Runs until `cancel`
    /// fires.
    pub fn spawn_worker(
        self: Arc<Self>,
        retry_every: Duration,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(retry_every);
            interval.tick().await;

            loop {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    () = self.notify.notified() => self.flush_logged().await,
                    _ = interval.tick() => {
                        if !self.is_empty().await {
                            self.flush_logged().await;
                        }
                    }
                }
            }
            debug!("outbox worker stopped");
        })
    }

    async fn flush_logged(&self) {
        match self.flush().await {
            Ok(report) if report != FlushReport::default() => {
                debug!(?report, "outbox flush");
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "outbox flush failed"),
        }
    }

    fn persist(&self, entries: &VecDeque<OutboxEntry>) -> Result<(), CoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| outbox_io("create", parent, &e))?;
        }
        let json = serde_json::to_vec_pretty(entries).map_err(|e| CoreError::Outbox {
            message: format!("cannot encode outbox: {e}"),
        })?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| outbox_io("write", &tmp, &e))?;
        std::fs::rename(&tmp, path).map_err(|e| outbox_io("replace", path, &e))?;
        Ok(())
    }
}

fn load_entries(path: &Path) -> Result<VecDeque<OutboxEntry>, CoreError> {
    if !path.exists() {
        return Ok(VecDeque::new());
    }
    let raw = std::fs::read(path).map_err(|e| outbox_io("read", path, &e))?;
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(VecDeque::new());
    }
    serde_json::from_slice(&raw).map_err(|e| CoreError::Outbox {
        message: format!("cannot parse {}: {e}", path.display()),
    })
}

fn outbox_io(action: &str, path: &Path, err: &std::io::Error) -> CoreError {
    CoreError::Outbox {
        message: format!("cannot {action} {}: {err}", path.display()),
    }
}

/// The SMS sent to the front desk after a booking is created.
pub fn booking_notification(request: &CreateBookingRequest, guests: u32) -> ContactRequest {
    ContactRequest {
        name: format!(
            "{} {}",
            request.customer_first_name, request.customer_last_name
        ),
        email: request.customer_email.clone(),
        message: format!(
            "New Booking:\nRoom: {}\nGuests: {guests}\nCheck-in: {}\nCheck-out: {}\nTotal: €{}",
            request.room_number, request.check_in_date, request.check_out_date, request.total_price,
        ),
    }
}
