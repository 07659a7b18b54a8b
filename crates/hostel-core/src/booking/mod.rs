// ── Public booking flow ──
//
// Draft state, availability sequencing, the room hand-off from the
// showcase, and the session that drives submission.

mod availability;
mod draft;
mod selection;
mod session;

pub use availability::{Availability, FetchOutcome};
pub use draft::{BookingDraft, CardDetails, DraftField};
pub use selection::RoomSelection;
pub use session::BookingSession;
