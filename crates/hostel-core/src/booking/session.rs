// ── Booking session ──
//
// Ties the draft, availability, and confirmation together for one booking
// form. Every piece of state lives in a `watch` channel so front ends can
// subscribe and re-render on change. Cheap to clone.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use hostel_api::HostelClient;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use super::availability::{Availability, AvailabilityTracker, FetchOutcome};
use super::draft::{BookingDraft, DraftField};
use super::selection::RoomSelection;
use crate::error::CoreError;
use crate::model::{BookingConfirmation, SearchCriteria};
use crate::outbox::{NotificationOutbox, booking_notification};
use crate::pricing::{PriceQuote, PricingTable};

/// Controller for a single booking form.
#[derive(Clone)]
pub struct BookingSession {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    client: HostelClient,
    pricing: PricingTable,
    criteria: watch::Sender<SearchCriteria>,
    draft: watch::Sender<BookingDraft>,
    availability: AvailabilityTracker,
    confirmation: watch::Sender<Option<BookingConfirmation>>,
    submitting: AtomicBool,
    selection: RoomSelection,
    outbox: Arc<NotificationOutbox>,
}

/// Clears the in-flight flag when a submission ends, however it ends.
struct SubmitGuard<'a>(&'a AtomicBool);

impl<'a> SubmitGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, CoreError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CoreError::SubmissionInFlight)?;
        Ok(Self(flag))
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl BookingSession {
    pub fn new(
        client: HostelClient,
        pricing: PricingTable,
        selection: RoomSelection,
        outbox: Arc<NotificationOutbox>,
    ) -> Self {
        let (criteria, _) = watch::channel(SearchCriteria::default());
        let (draft, _) = watch::channel(BookingDraft::default());
        let (confirmation, _) = watch::channel(None);

        Self {
            inner: Arc::new(SessionInner {
                client,
                pricing,
                criteria,
                draft,
                availability: AvailabilityTracker::new(),
                confirmation,
                submitting: AtomicBool::new(false),
                selection,
                outbox,
            }),
        }
    }

    pub fn pricing(&self) -> &PricingTable {
        &self.inner.pricing
    }

    pub fn selection(&self) -> &RoomSelection {
        &self.inner.selection
    }

    pub fn outbox(&self) -> &Arc<NotificationOutbox> {
        &self.inner.outbox
    }

    // ── Search criteria ──────────────────────────────────────────────

    /// Initialise the form: adopt `criteria` if given, seed the draft,
    /// consume any pending room selection, and query availability.
    pub async fn mount(&self, criteria: Option<SearchCriteria>) -> FetchOutcome {
        if let Some(criteria) = criteria {
            self.inner.criteria.send_replace(criteria);
        }
        self.sync_from_criteria().await
    }

    /// React to new search criteria. Identical criteria are a no-op.
    pub async fn apply_search(&self, criteria: SearchCriteria) -> FetchOutcome {
        let changed = self.inner.criteria.send_if_modified(|current| {
            if *current == criteria {
                false
            } else {
                *current = criteria;
                true
            }
        });
        if !changed {
            return FetchOutcome::Unchanged;
        }
        self.sync_from_criteria().await
    }

    pub fn criteria(&self) -> SearchCriteria {
        *self.inner.criteria.borrow()
    }

    async fn sync_from_criteria(&self) -> FetchOutcome {
        let criteria = self.criteria();
        let selected = self.inner.selection.take();
        self.inner.draft.send_modify(|draft| {
            draft.seed_from(&criteria);
            if let Some(category) = selected {
                debug!(%category, "applying room selection");
                draft.set_room_category(Some(category));
            }
        });
        self.fetch_availability(criteria).await
    }

    /// Query availability for `criteria`.
    ///
    /// Incomplete criteria issue no request and leave prior results alone.
    /// When rooms come back and no category is chosen yet, the first one
    /// is selected.
    pub async fn fetch_availability(&self, criteria: SearchCriteria) -> FetchOutcome {
        let (Some(check_in), Some(check_out)) = (criteria.check_in, criteria.check_out) else {
            return FetchOutcome::Skipped;
        };
        if criteria.guests == 0 {
            return FetchOutcome::Skipped;
        }

        let ticket = self.inner.availability.begin();
        let result = self
            .inner
            .client
            .available_rooms(check_in, check_out, criteria.guests)
            .await;
        let outcome = self.inner.availability.resolve(ticket, result);

        if let FetchOutcome::Applied(Availability::Loaded(rooms)) = &outcome {
            if let Some(first) = rooms.first().copied() {
                self.inner.draft.send_if_modified(|draft| {
                    if draft.room_category().is_some() {
                        return false;
                    }
                    draft.set_room_category(Some(first));
                    true
                });
            }
        }
        outcome
    }

    pub fn availability(&self) -> Availability {
        self.inner.availability.current()
    }

    pub fn subscribe_availability(&self) -> watch::Receiver<Availability> {
        self.inner.availability.subscribe()
    }

    // ── Draft ────────────────────────────────────────────────────────

    pub fn draft(&self) -> BookingDraft {
        self.inner.draft.borrow().clone()
    }

    pub fn subscribe_draft(&self) -> watch::Receiver<BookingDraft> {
        self.inner.draft.subscribe()
    }

    /// Mutate the draft in place. Subscribers are notified only when the
    /// draft actually changed.
    /// Runs under the channel's write lock, so concurrent edits from
    /// availability fetches are never overwritten.
    pub fn edit<R>(&self, f: impl FnOnce(&mut BookingDraft) -> R) -> R {
        let mut out = None;
        self.inner.draft.send_if_modified(|draft| {
            let before = draft.clone();
            out = Some(f(draft));
            *draft != before
        });
        match out {
            Some(out) => out,
            None => unreachable!(),
        }
    }

    /// Apply raw form input to a field.
    pub fn apply_input(&self, field: DraftField, value: &str) -> Result<(), CoreError> {
        self.edit(|draft| draft.apply_input(field, value))
    }

    /// Consume a pending room selection outside of mount.
    pub fn take_selection(&self) -> bool {
        let Some(category) = self.inner.selection.take() else {
            return false;
        };
        self.edit(|draft| draft.set_room_category(Some(category)));
        true
    }

    /// Price of the current draft, computed fresh.
    pub fn quote(&self) -> PriceQuote {
        self.inner.draft.borrow().quote(&self.inner.pricing)
    }

    // ── Submission ───────────────────────────────────────────────────

    pub fn is_submitting(&self) -> bool {
        self.inner.submitting.load(Ordering::Acquire)
    }

    pub fn confirmation(&self) -> Option<BookingConfirmation> {
        self.inner.confirmation.borrow().clone()
    }

    pub fn subscribe_confirmation(&self) -> watch::Receiver<Option<BookingConfirmation>> {
        self.inner.confirmation.subscribe()
    }

    pub fn dismiss_confirmation(&self) {
        self.inner.confirmation.send_replace(None);
    }

    /// Submit the current draft.
    ///
    /// On success the confirmation is published, the draft is reset, and
    /// the front-desk notification is queued; queueing failures are only
    /// logged. On any failure the draft is left exactly as it was.
    pub async fn submit(&self) -> Result<BookingConfirmation, CoreError> {
        let _guard = SubmitGuard::acquire(&self.inner.submitting)?;

        let draft = self.draft();
        let quote = draft.quote(&self.inner.pricing);
        let request = draft.to_request(quote.total)?;

        let confirmation = match self.inner.client.create_user_booking(&request).await {
            Ok(confirmation) => confirmation,
            Err(e) => {
                warn!(error = %e, "booking submission failed");
                return Err(e.into());
            }
        };

        info!(
            booking_id = confirmation.booking_id,
            room = %confirmation.room_number,
            "booking created"
        );
        self.inner
            .confirmation
            .send_replace(Some(confirmation.clone()));
        self.inner.draft.send_replace(BookingDraft::default());

        let notification = booking_notification(&request, draft.guests());
        if let Err(e) = self.inner.outbox.enqueue(notification).await {
            warn!(error = %e, "could not queue booking notification");
        }

        Ok(confirmation)
    }
}
