use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Dates and party size entered in the search widget.
///
/// Compared field by field: re-applying identical criteria is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
    pub guests: u32,
}

impl SearchCriteria {
    pub fn new(check_in: NaiveDate, check_out: NaiveDate, guests: u32) -> Self {
        Self {
            check_in: Some(check_in),
            check_out: Some(check_out),
            guests,
        }
    }

    /// Both dates set and at least one guest. Incomplete criteria never
    /// reach the network.
    pub fn is_complete(&self) -> bool {
        self.check_in.is_some() && self.check_out.is_some() && self.guests >= 1
    }
}
