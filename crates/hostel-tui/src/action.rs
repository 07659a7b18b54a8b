//! All possible UI actions. Actions are the sole mechanism for state mutation.

use std::sync::Arc;

use secrecy::SecretString;

use hostel_core::{
    AdminCommand, Availability, Bed, Booking, BookingConfirmation, BookingDraft, Collection,
    ContactMessage, Customer, DraftField, Notification, Payment, Room, RoomCategory,
    SearchCriteria,
};

use crate::screen::ScreenId;

/// Toast severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A transient message in the corner of the screen.
#[derive(Debug, Clone)]
pub struct Toast {
    pub message: String,
    pub level: ToastLevel,
}

impl Toast {
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: ToastLevel::Success,
        }
    }

    pub fn error(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: ToastLevel::Error,
        }
    }

    pub fn warning(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: ToastLevel::Warning,
        }
    }

    pub fn info(msg: impl Into<String>) -> Self {
        Self {
            message: msg.into(),
            level: ToastLevel::Info,
        }
    }
}

/// Every state transition in the TUI is expressed as an Action.
#[derive(Debug, Clone)]
pub enum Action {
    // ── Lifecycle ──────────────────────────────────────────────────
    Quit,
    Tick,
    Render,
    Resize(u16, u16),

    // ── Navigation ────────────────────────────────────────────────
    SwitchScreen(ScreenId),
    GoBack,
    ToggleHelp,

    // ── Admin session ─────────────────────────────────────────────
    AdminChanged(Option<i64>),
    OpenLogin,
    CloseLogin,
    LoginSubmit {
        username: String,
        password: Arc<SecretString>,
    },
    LoginFailed(String),
    Logout,

    // ── Booking pipeline (from hostel-core watch channels) ────────
    DraftUpdated(Box<BookingDraft>),
    AvailabilityUpdated(Availability),
    ConfirmationUpdated(Option<BookingConfirmation>),
    OutboxPending(usize),

    // ── Booking requests ──────────────────────────────────────────
    /// Offer a category to the booking form and open it.
    SelectRoom(RoomCategory),
    Search(SearchCriteria),
    EditDraft(DraftField, String),
    SubmitBooking,
    SubmitFinished(Result<(), String>),
    DismissConfirmation,

    // ── Admin data (from the store) ───────────────────────────────
    BookingsUpdated(Arc<Vec<Arc<Booking>>>),
    CustomersUpdated(Arc<Vec<Arc<Customer>>>),
    RoomsUpdated(Arc<Vec<Arc<Room>>>),
    BedsUpdated(Arc<Vec<Arc<Bed>>>),
    PaymentsUpdated(Arc<Vec<Arc<Payment>>>),
    NotificationsUpdated(Arc<Vec<Arc<Notification>>>),
    MessagesUpdated(Arc<Vec<Arc<ContactMessage>>>),

    // ── Admin requests ────────────────────────────────────────────
    Refresh(Option<Collection>),
    /// Destructive commands go through the confirm dialog first.
    RequestCommand(AdminCommand),
    ConfirmYes,
    ConfirmNo,

    // ── Toasts ────────────────────────────────────────────────────
    Notify(Toast),
}
