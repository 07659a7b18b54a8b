// ── Reactive data store ──
//
// Admin dashboard entities with push-based change notification.

mod collection;
mod data_store;
mod refresh;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

pub use collection::Keyed;
pub use data_store::DataStore;
pub(crate) use refresh::fetch;

/// Independently refreshable admin data sets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum Collection {
    Bookings,
    Customers,
    Rooms,
    Beds,
    Payments,
    Notifications,
    Messages,
}
