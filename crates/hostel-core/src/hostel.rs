// ── Hostel facade ──
//
// Single entry point for front ends. Owns the HTTP client, the booking
// session, the notification outbox, the admin data store, and the
// background tasks that deliver notifications.

use std::sync::Arc;

use hostel_api::{ContactRequest, HostelClient};
use secrecy::SecretString;
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::admin::AdminConsole;
use crate::booking::{BookingSession, RoomSelection};
use crate::config::BackendConfig;
use crate::error::CoreError;
use crate::outbox::NotificationOutbox;
use crate::store::DataStore;

/// Cheaply cloneable handle to everything a front end needs.
#[derive(Clone)]
pub struct Hostel {
    inner: Arc<HostelInner>,
}

struct HostelInner {
    config: BackendConfig,
    client: HostelClient,
    store: Arc<DataStore>,
    booking: BookingSession,
    outbox: Arc<NotificationOutbox>,
    admin_id: watch::Sender<Option<i64>>,
    cancel: CancellationToken,
    task_handles: Mutex<Vec<JoinHandle<()>>>,
}

impl Hostel {
    /// Build the client and open the outbox. Does not touch the network
    /// and spawns nothing; call [`start()`](Self::start) for background
    /// delivery.
    pub fn new(config: BackendConfig) -> Result<Self, CoreError> {
        let client = HostelClient::new(config.url.as_str(), &config.transport())?;

        let outbox = match &config.outbox_path {
            Some(path) => NotificationOutbox::open(client.clone(), path, config.outbox_max_attempts)?,
            None => NotificationOutbox::in_memory(client.clone(), config.outbox_max_attempts),
        };
        let outbox = Arc::new(outbox);

        let booking = BookingSession::new(
            client.clone(),
            config.pricing.clone(),
            RoomSelection::new(),
            Arc::clone(&outbox),
        );
        let (admin_id, _) = watch::channel(config.admin_id);

        Ok(Self {
            inner: Arc::new(HostelInner {
                config,
                client,
                store: Arc::new(DataStore::new()),
                booking,
                outbox,
                admin_id,
                cancel: CancellationToken::new(),
                task_handles: Mutex::new(Vec::new()),
            }),
        })
    }

    pub fn config(&self) -> &BackendConfig {
        &self.inner.config
    }

    pub fn client(&self) -> &HostelClient {
        &self.inner.client
    }

    pub fn store(&self) -> &Arc<DataStore> {
        &self.inner.store
    }

    pub fn booking(&self) -> &BookingSession {
        &self.inner.booking
    }

    pub fn selection(&self) -> &RoomSelection {
        self.inner.booking.selection()
    }

    pub fn outbox(&self) -> &Arc<NotificationOutbox> {
        &self.inner.outbox
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Spawn the outbox delivery worker.
    pub async fn start(&self) {
        let mut handles = self.inner.task_handles.lock().await;
        if !handles.is_empty() {
            return;
        }
        handles.push(Arc::clone(&self.inner.outbox).spawn_worker(
            self.inner.config.outbox_retry_interval,
            self.inner.cancel.clone(),
        ));
        debug!("background tasks started");
    }

    /// Stop background tasks and wait for them to finish.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        let mut handles = self.inner.task_handles.lock().await;
        for handle in handles.drain(..) {
            let _ = handle.await;
        }
        debug!("background tasks stopped");
    }

    // ── Admin session ────────────────────────────────────────────────

    /// Log in as an administrator and remember the returned id.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<i64, CoreError> {
        let response = self.inner.client.admin_login(username, password).await?;
        let admin_id = response
            .admin_id
            .ok_or_else(|| CoreError::AuthenticationFailed {
                message: "backend did not return an admin id".into(),
            })?;
        self.inner.admin_id.send_replace(Some(admin_id));
        info!(admin_id, "administrator logged in");
        Ok(admin_id)
    }

    /// Forget the administrator session and any admin data already loaded.
    pub fn logout(&self) {
        self.inner.admin_id.send_replace(None);
        self.inner.store.clear();
        info!("administrator logged out");
    }

    pub fn admin_id(&self) -> Option<i64> {
        *self.inner.admin_id.borrow()
    }

    pub fn subscribe_admin(&self) -> watch::Receiver<Option<i64>> {
        self.inner.admin_id.subscribe()
    }

    /// Admin dashboard access. Fails with [`CoreError::NotLoggedIn`]
    /// without a stored session.
    pub fn admin(&self) -> Result<AdminConsole, CoreError> {
        if self.admin_id().is_none() {
            return Err(CoreError::NotLoggedIn);
        }
        Ok(AdminConsole::new(
            self.inner.client.clone(),
            Arc::clone(&self.inner.store),
        ))
    }

    // ── Contact ──────────────────────────────────────────────────────

    /// Send the public contact form by email.
    pub async fn send_contact(&self, request: &ContactRequest) -> Result<(), CoreError> {
        let missing: Vec<&str> = [
            ("name", &request.name),
            ("email", &request.email),
            ("message", &request.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect();
        if !missing.is_empty() {
            return Err(CoreError::ValidationFailed {
                message: format!("missing: {}", missing.join(", ")),
            });
        }
        self.inner.client.send_contact_email(request).await?;
        info!("contact message sent");
        Ok(())
    }
}
