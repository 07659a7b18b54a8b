//! Data bridge: forwards [`Hostel`] watch channels and store streams to
//! the TUI as [`Action`]s.
//!
//! Runs as a background task for the lifetime of the app. Owns the
//! background delivery worker (started on entry, shut down on exit) and
//! keeps admin data fresh while an administrator is logged in.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use hostel_core::{FetchOutcome, Hostel};

use crate::action::{Action, Toast};

const OUTBOX_POLL: Duration = Duration::from_secs(2);
const ADMIN_REFRESH: Duration = Duration::from_secs(60);

/// Re-fetch every admin collection in the background. A failure becomes
/// a warning toast; the previous data stays on screen.
pub fn spawn_admin_refresh(hostel: &Hostel, action_tx: &mpsc::UnboundedSender<Action>) {
    let console = match hostel.admin() {
        Ok(console) => console,
        Err(e) => {
            debug!(error = %e, "skipping admin refresh");
            return;
        }
    };
    let tx = action_tx.clone();
    tokio::spawn(async move {
        if let Err(e) = console.refresh_all().await {
            warn!(error = %e, "admin refresh failed");
            let _ = tx.send(Action::Notify(Toast::warning(format!("Refresh failed: {e}"))));
        }
    });
}

/// Forward every booking and admin change until `cancel` fires.
pub async fn spawn_data_bridge(
    hostel: Hostel,
    action_tx: mpsc::UnboundedSender<Action>,
    cancel: CancellationToken,
) {
    hostel.start().await;

    let booking = hostel.booking();
    let mut draft = booking.subscribe_draft();
    let mut availability = booking.subscribe_availability();
    let mut confirmation = booking.subscribe_confirmation();
    let mut admin = hostel.subscribe_admin();

    let store = hostel.store();
    let mut bookings = store.subscribe_bookings();
    let mut customers = store.subscribe_customers();
    let mut rooms = store.subscribe_rooms();
    let mut beds = store.subscribe_beds();
    let mut payments = store.subscribe_payments();
    let mut notifications = store.subscribe_notifications();
    let mut messages = store.subscribe_messages();

    // Initial snapshots so screens have state before the first change.
    let _ = action_tx.send(Action::DraftUpdated(Box::new(
        draft.borrow_and_update().clone(),
    )));
    let _ = action_tx.send(Action::AvailabilityUpdated(
        availability.borrow_and_update().clone(),
    ));
    let _ = action_tx.send(Action::ConfirmationUpdated(
        confirmation.borrow_and_update().clone(),
    ));
    let admin_id = *admin.borrow_and_update();
    let _ = action_tx.send(Action::AdminChanged(admin_id));
    let _ = action_tx.send(Action::BookingsUpdated(bookings.current().clone()));
    let _ = action_tx.send(Action::CustomersUpdated(customers.current().clone()));
    let _ = action_tx.send(Action::RoomsUpdated(rooms.current().clone()));
    let _ = action_tx.send(Action::BedsUpdated(beds.current().clone()));
    let _ = action_tx.send(Action::PaymentsUpdated(payments.current().clone()));
    let _ = action_tx.send(Action::NotificationsUpdated(
        notifications.current().clone(),
    ));
    let _ = action_tx.send(Action::MessagesUpdated(messages.current().clone()));

    if admin_id.is_some() {
        spawn_admin_refresh(&hostel, &action_tx);
    }

    let mount = booking.clone();
    tokio::spawn(async move {
        if let FetchOutcome::Applied(result) = mount.mount(None).await {
            debug!(?result, "initial availability");
        }
    });

    let mut outbox_poll = tokio::time::interval(OUTBOX_POLL);
    outbox_poll.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let mut admin_refresh = tokio::time::interval_at(Instant::now() + ADMIN_REFRESH, ADMIN_REFRESH);
    admin_refresh.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut last_pending = None;

    loop {
        tokio::select! {
            biased;

            () = cancel.cancelled() => break,

            Ok(()) = draft.changed() => {
                let snapshot = draft.borrow_and_update().clone();
                let _ = action_tx.send(Action::DraftUpdated(Box::new(snapshot)));
            }
            Ok(()) = availability.changed() => {
                let snapshot = availability.borrow_and_update().clone();
                let _ = action_tx.send(Action::AvailabilityUpdated(snapshot));
            }
            Ok(()) = confirmation.changed() => {
                let snapshot = confirmation.borrow_and_update().clone();
                let _ = action_tx.send(Action::ConfirmationUpdated(snapshot));
            }
            Ok(()) = admin.changed() => {
                let admin_id = *admin.borrow_and_update();
                info!(?admin_id, "admin session changed");
                let _ = action_tx.send(Action::AdminChanged(admin_id));
                if admin_id.is_some() {
                    spawn_admin_refresh(&hostel, &action_tx);
                }
            }

            Some(b) = bookings.changed() => {
                let _ = action_tx.send(Action::BookingsUpdated(b));
            }
            Some(c) = customers.changed() => {
                let _ = action_tx.send(Action::CustomersUpdated(c));
            }
            Some(r) = rooms.changed() => {
                let _ = action_tx.send(Action::RoomsUpdated(r));
            }
            Some(b) = beds.changed() => {
                let _ = action_tx.send(Action::BedsUpdated(b));
            }
            Some(p) = payments.changed() => {
                let _ = action_tx.send(Action::PaymentsUpdated(p));
            }
            Some(n) = notifications.changed() => {
                let _ = action_tx.send(Action::NotificationsUpdated(n));
            }
            Some(m) = messages.changed() => {
                let _ = action_tx.send(Action::MessagesUpdated(m));
            }

            _ = outbox_poll.tick() => {
                let pending = hostel.outbox().len().await;
                if last_pending != Some(pending) {
                    last_pending = Some(pending);
                    let _ = action_tx.send(Action::OutboxPending(pending));
                }
            }
            _ = admin_refresh.tick(), if hostel.admin_id().is_some() => {
                debug!("periodic admin refresh");
                spawn_admin_refresh(&hostel, &action_tx);
            }
        }
    }

    hostel.shutdown().await;
    debug!("data bridge stopped");
}
