use std::sync::Arc;

use tokio::sync::watch;

use crate::model::RoomCategory;

/// One-shot hand-off of a room chosen on a browsing surface.
///
/// The showcase calls [`offer`](Self::offer); the booking form
/// [`take`](Self::take)s it once and the slot is left empty. Clones share
/// the same slot.
#[derive(Debug, Clone)]
pub struct RoomSelection {
    slot: Arc<watch::Sender<Option<RoomCategory>>>,
}

impl Default for RoomSelection {
    fn default() -> Self {
        Self::new()
    }
}

impl RoomSelection {
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self {
            slot: Arc::new(slot),
        }
    }

    /// Replace any pending selection.
    pub fn offer(&self, category: RoomCategory) {
        self.slot.send_replace(Some(category));
    }

    /// Consume the pending selection, if any.
    pub fn take(&self) -> Option<RoomCategory> {
        self.slot.send_replace(None)
    }

    pub fn peek(&self) -> Option<RoomCategory> {
        *self.slot.borrow()
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<RoomCategory>> {
        self.slot.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_is_consumed_once() {
        let selection = RoomSelection::new();
        let shared = selection.clone();
        shared.offer(RoomCategory::FourBed);

        assert_eq!(selection.peek(), Some(RoomCategory::FourBed));
        assert_eq!(selection.take(), Some(RoomCategory::FourBed));
        assert_eq!(selection.take(), None);
        assert_eq!(shared.peek(), None);
    }
}
