// ── Availability tracking ──
//
// Each query takes a ticket from a monotonically increasing counter.
// A response is applied only if its ticket is still the latest issued,
// so a slow superseded query can never overwrite fresher results.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::model::RoomCategory;

/// Result of the most recent availability query.
///
/// `Loaded(vec![])` means the backend confirmed there are no free rooms;
/// `Failed` means the check itself could not be completed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Availability {
    /// No complete search has been issued yet.
    #[default]
    Idle,
    Loading,
    Loaded(Vec<RoomCategory>),
    Failed(String),
}

impl Availability {
    /// Bookable categories, empty unless loaded.
    pub fn rooms(&self) -> &[RoomCategory] {
        match self {
            Self::Loaded(rooms) => rooms,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// What happened to a requested availability refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Criteria incomplete; no request issued, state untouched.
    Skipped,
    /// Criteria identical to the current ones; nothing to do.
    Unchanged,
    /// A newer query was issued before this one resolved; response dropped.
    Stale,
    /// The response was applied and is now the published state.
    Applied(Availability),
}

/// Sequence-stamped availability state shared with subscribers.
pub(crate) struct AvailabilityTracker {
    state: watch::Sender<Availability>,
    issued: AtomicU64,
}

impl AvailabilityTracker {
    pub(crate) fn new() -> Self {
        let (state, _) = watch::channel(Availability::Idle);
        Self {
            state,
            issued: AtomicU64::new(0),
        }
    }

    pub(crate) fn current(&self) -> Availability {
        self.state.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<Availability> {
        self.state.subscribe()
    }

    /// Issue a new ticket and publish the loading state.
    pub(crate) fn begin(&self) -> u64 {
        let ticket = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_replace(Availability::Loading);
        ticket
    }

    /// Apply a query result if `ticket` is still the latest issued.
    pub(crate) fn resolve<E: std::fmt::Display>(
        &self,
        ticket: u64,
        result: Result<Vec<String>, E>,
    ) -> FetchOutcome {
        let latest = self.issued.load(Ordering::SeqCst);
        if ticket != latest {
            debug!(ticket, latest, "discarding stale availability response");
            return FetchOutcome::Stale;
        }

        let next = match result {
            Ok(codes) => Availability::Loaded(parse_categories(&codes)),
            Err(e) => {
                warn!(error = %e, "availability query failed");
                Availability::Failed(e.to_string())
            }
        };
        self.state.send_replace(next.clone());
        FetchOutcome::Applied(next)
    }
}

/// Map wire codes to categories, keeping server order and skipping
/// anything outside the catalogue.
fn parse_categories(codes: &[String]) -> Vec<RoomCategory> {
    let mut rooms = Vec::with_capacity(codes.len());
    for code in codes {
        match RoomCategory::from_code(code) {
            Some(category) if !rooms.contains(&category) => rooms.push(category),
            Some(_) => {}
            None => warn!(code = %code, "ignoring unknown room category in availability"),
        }
    }
    rooms
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codes(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn starts_idle() {
        let tracker = AvailabilityTracker::new();
        assert_eq!(tracker.current(), Availability::Idle);
        assert!(tracker.current().rooms().is_empty());
    }

    #[test]
    fn latest_ticket_is_applied() {
        let tracker = AvailabilityTracker::new();
        let ticket = tracker.begin();
        assert!(tracker.current().is_loading());

        let outcome = tracker.resolve::<String>(ticket, Ok(codes(&["RN1", "RN3"])));
        let expected = Availability::Loaded(vec![RoomCategory::TwoBed, RoomCategory::SixBed]);
        assert_eq!(outcome, FetchOutcome::Applied(expected.clone()));
        assert_eq!(tracker.current(), expected);
    }

    #[test]
    fn superseded_ticket_is_discarded() {
        let tracker = AvailabilityTracker::new();
        let first = tracker.begin();
        let second = tracker.begin();

        let applied = tracker.resolve::<String>(second, Ok(codes(&["RN2"])));
        assert!(matches!(applied, FetchOutcome::Applied(_)));

        let stale = tracker.resolve::<String>(first, Ok(codes(&["RN1"])));
        assert_eq!(stale, FetchOutcome::Stale);
        assert_eq!(
            tracker.current(),
            Availability::Loaded(vec![RoomCategory::FourBed])
        );
    }

    #[test]
    fn failure_is_distinct_from_empty() {
        let tracker = AvailabilityTracker::new();
        let ticket = tracker.begin();
        tracker.resolve(ticket, Err::<Vec<String>, _>("connection refused"));
        let state = tracker.current();
        assert!(state.is_failed());
        assert!(state.rooms().is_empty());

        let ticket = tracker.begin();
        tracker.resolve::<String>(ticket, Ok(Vec::new()));
        assert_eq!(tracker.current(), Availability::Loaded(Vec::new()));
    }

    #[test]
    fn unknown_and_duplicate_codes_are_skipped() {
        let parsed = parse_categories(&codes(&["RN9", "rn2", "RN2", "RN1"]));
        assert_eq!(parsed, vec![RoomCategory::FourBed, RoomCategory::TwoBed]);
    }
}
