//! Screen implementations. Each screen is a top-level Component.

pub mod book;
pub mod bookings;
pub mod inbox;
pub mod rooms;

use hostel_core::PricingTable;

use crate::component::Component;
use crate::screen::ScreenId;

/// Create screen components for the tab bar.
pub fn create_screens(pricing: &PricingTable) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Rooms,
            Box::new(rooms::RoomsScreen::new(pricing.clone())),
        ),
        (
            ScreenId::Book,
            Box::new(book::BookScreen::new(pricing.clone())),
        ),
        (
            ScreenId::Bookings,
            Box::new(bookings::BookingsScreen::new()),
        ),
        (ScreenId::Inbox, Box::new(inbox::InboxScreen::new())),
    ]
}
