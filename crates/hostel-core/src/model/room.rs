use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Bookable room type. The wire identifier is the upper-case code.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum RoomCategory {
    #[serde(rename = "RN1")]
    #[strum(serialize = "RN1")]
    TwoBed,
    #[serde(rename = "RN2")]
    #[strum(serialize = "RN2")]
    FourBed,
    #[serde(rename = "RN3")]
    #[strum(serialize = "RN3")]
    SixBed,
}

impl RoomCategory {
    /// Wire identifier (`RN1`, `RN2`, `RN3`).
    pub fn code(self) -> &'static str {
        match self {
            Self::TwoBed => "RN1",
            Self::FourBed => "RN2",
            Self::SixBed => "RN3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TwoBed => "2-Bed Room",
            Self::FourBed => "4-Bed Room",
            Self::SixBed => "6-Bed Room",
        }
    }

    pub fn beds(self) -> u32 {
        match self {
            Self::TwoBed => 2,
            Self::FourBed => 4,
            Self::SixBed => 6,
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::TwoBed => {
                "Perfect for solo travelers or couples. Offers privacy, comfort, and modern design as well as a private bathroom."
            }
            Self::FourBed => {
                "Ideal for backpackers or small groups. Each bed has individual lockers and lights. Shared bathrooms and a common room for meeting other travellers."
            }
            Self::SixBed => {
                "Great for large groups or budget travelers. Spacious and clean with a cozy vibe. Bathrooms and toilets are shared."
            }
        }
    }

    /// Parse a wire identifier, returning `None` for codes outside the catalogue.
    pub fn from_code(code: &str) -> Option<Self> {
        code.trim().parse().ok()
    }

    /// The full catalogue in display order.
    pub fn all() -> impl Iterator<Item = Self> {
        Self::iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_strum_and_serde() {
        for category in RoomCategory::all() {
            assert_eq!(category.to_string(), category.code());
            assert_eq!(RoomCategory::from_code(category.code()), Some(category));
            let json = serde_json::to_string(&category).unwrap_or_default();
            assert_eq!(json, format!("\"{}\"", category.code()));
        }
    }

    #[test]
    fn unknown_code_is_none() {
        assert_eq!(RoomCategory::from_code("RN9"), None);
        assert_eq!(RoomCategory::from_code(""), None);
        assert_eq!(RoomCategory::from_code(" rn2 "), Some(RoomCategory::FourBed));
    }
}
