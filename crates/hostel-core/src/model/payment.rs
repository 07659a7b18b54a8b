use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// How the guest intends to pay. Only card payments are wired up; the
/// wallet options stay visible but cannot be selected.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PaymentMethod {
    #[default]
    #[strum(to_string = "card", serialize = "credit")]
    Card,
    Paypal,
    #[strum(serialize = "applepay")]
    ApplePay,
    #[strum(serialize = "googlepay")]
    GooglePay,
}

impl PaymentMethod {
    pub fn is_enabled(self) -> bool {
        matches!(self, Self::Card)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Card => "Credit/Debit Card",
            Self::Paypal => "PayPal",
            Self::ApplePay => "Apple Pay",
            Self::GooglePay => "Google Pay",
        }
    }
}
