//! Screen identifiers and tab order.

use std::fmt;

/// Primary screens, navigable by number keys 1-4 and Tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScreenId {
    #[default]
    Rooms, // 1
    Book,     // 2
    Bookings, // 3
    Inbox,    // 4
}

impl ScreenId {
    /// All screens in tab-bar order.
    pub const ALL: [ScreenId; 4] = [Self::Rooms, Self::Book, Self::Bookings, Self::Inbox];

    pub fn number(self) -> u8 {
        match self {
            Self::Rooms => 1,
            Self::Book => 2,
            Self::Bookings => 3,
            Self::Inbox => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.number() == n)
    }

    /// Next screen in tab order (wraps around).
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Previous screen in tab order (wraps around).
    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Rooms => "Rooms",
            Self::Book => "Book",
            Self::Bookings => "Front Desk",
            Self::Inbox => "Inbox",
        }
    }

    /// Screens that show backend data only to a logged-in administrator.
    pub fn requires_admin(self) -> bool {
        matches!(self, Self::Bookings | Self::Inbox)
    }
}

impl fmt::Display for ScreenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn number_keys_round_trip() {
        for id in ScreenId::ALL {
            assert_eq!(ScreenId::from_number(id.number()), Some(id));
        }
        assert_eq!(ScreenId::from_number(0), None);
        assert_eq!(ScreenId::from_number(5), None);
    }

    #[test]
    fn tab_order_wraps() {
        assert_eq!(ScreenId::Inbox.next(), ScreenId::Rooms);
        assert_eq!(ScreenId::Rooms.prev(), ScreenId::Inbox);
        assert!(ScreenId::Bookings.requires_admin());
        assert!(!ScreenId::Book.requires_admin());
    }
}
