// ── Booking draft ──
//
// In-progress form state. Text fields hold exactly what the guest typed;
// parsing happens only when a creation request is built. Dates and party
// size remember whether the guest edited them so that new search criteria
// can fill them in without clobbering the edit.

use std::fmt;

use hostel_api::CreateBookingRequest;
use strum::{Display, EnumIter};

use crate::error::CoreError;
use crate::model::{PaymentMethod, RoomCategory, SearchCriteria};
use crate::pricing::{PriceQuote, PricingTable, parse_stay_date};

const CARD_NUMBER_MAX: usize = 16;
const EXPIRY_MAX: usize = 5;
const CVV_MAX: usize = 4;

/// Addressable draft attributes, for text-driven forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum DraftField {
    #[strum(to_string = "room")]
    Room,
    #[strum(to_string = "check-in")]
    CheckIn,
    #[strum(to_string = "check-out")]
    CheckOut,
    #[strum(to_string = "guests")]
    Guests,
    #[strum(to_string = "first name")]
    FirstName,
    #[strum(to_string = "last name")]
    LastName,
    #[strum(to_string = "date of birth")]
    DateOfBirth,
    #[strum(to_string = "email")]
    Email,
    #[strum(to_string = "phone")]
    Phone,
    #[strum(to_string = "payment method")]
    PaymentMethod,
    #[strum(to_string = "cardholder")]
    Cardholder,
    #[strum(to_string = "card number")]
    CardNumber,
    #[strum(to_string = "expiry")]
    Expiry,
    #[strum(to_string = "CVV")]
    Cvv,
}

/// Which criteria-seeded fields the guest has edited by hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct Touched {
    check_in: bool,
    check_out: bool,
    guests: bool,
}

/// Card fields. Never sent to the backend and never logged.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct CardDetails {
    pub cardholder: String,
    pub number: String,
    pub expiry: String,
    pub cvv: String,
}

impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("cardholder", &self.cardholder)
            .field("number", &"<redacted>")
            .field("expiry", &"<redacted>")
            .field("cvv", &"<redacted>")
            .finish()
    }
}

/// Editable booking form state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    room_category: Option<RoomCategory>,
    check_in: String,
    check_out: String,
    guests: u32,
    first_name: String,
    last_name: String,
    date_of_birth: String,
    email: String,
    phone: String,
    payment_method: PaymentMethod,
    card: CardDetails,
    touched: Touched,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            room_category: None,
            check_in: String::new(),
            check_out: String::new(),
            guests: 1,
            first_name: String::new(),
            last_name: String::new(),
            date_of_birth: String::new(),
            email: String::new(),
            phone: String::new(),
            payment_method: PaymentMethod::Card,
            card: CardDetails::default(),
            touched: Touched::default(),
        }
    }
}

fn truncated(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

impl BookingDraft {
    // ── Accessors ────────────────────────────────────────────────────

    pub fn room_category(&self) -> Option<RoomCategory> {
        self.room_category
    }

    pub fn check_in(&self) -> &str {
        &self.check_in
    }

    pub fn check_out(&self) -> &str {
        &self.check_out
    }

    pub fn guests(&self) -> u32 {
        self.guests
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn date_of_birth(&self) -> &str {
        &self.date_of_birth
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn card(&self) -> &CardDetails {
        &self.card
    }

    /// Current text of a field, as a form would display it.
    /// Card number and CVV are masked.
    pub fn display_value(&self, field: DraftField) -> String {
        match field {
            DraftField::Room => self
                .room_category
                .map(|c| c.code().to_owned())
                .unwrap_or_default(),
            DraftField::CheckIn => self.check_in.clone(),
            DraftField::CheckOut => self.check_out.clone(),
            DraftField::Guests => self.guests.to_string(),
            DraftField::FirstName => self.first_name.clone(),
            DraftField::LastName => self.last_name.clone(),
            DraftField::DateOfBirth => self.date_of_birth.clone(),
            DraftField::Email => self.email.clone(),
            DraftField::Phone => self.phone.clone(),
            DraftField::PaymentMethod => self.payment_method.to_string(),
            DraftField::Cardholder => self.card.cardholder.clone(),
            DraftField::CardNumber => "•".repeat(self.card.number.chars().count()),
            DraftField::Expiry => self.card.expiry.clone(),
            DraftField::Cvv => "•".repeat(self.card.cvv.chars().count()),
        }
    }

    // ── Setters ──────────────────────────────────────────────────────

    pub fn set_room_category(&mut self, category: Option<RoomCategory>) {
        self.room_category = category;
    }

    pub fn set_check_in(&mut self, value: &str) {
        value.clone_into(&mut self.check_in);
        self.touched.check_in = true;
    }

    pub fn set_check_out(&mut self, value: &str) {
        value.clone_into(&mut self.check_out);
        self.touched.check_out = true;
    }

    pub fn set_guests(&mut self, guests: u32) {
        self.guests = guests;
        self.touched.guests = true;
    }

    pub fn set_first_name(&mut self, value: &str) {
        value.clone_into(&mut self.first_name);
    }

    pub fn set_last_name(&mut self, value: &str) {
        value.clone_into(&mut self.last_name);
    }

    pub fn set_date_of_birth(&mut self, value: &str) {
        value.clone_into(&mut self.date_of_birth);
    }

    pub fn set_email(&mut self, value: &str) {
        value.clone_into(&mut self.email);
    }

    pub fn set_phone(&mut self, value: &str) {
        value.clone_into(&mut self.phone);
    }

    /// Select a payment method. Disabled methods are rejected and the
    /// current selection is kept.
    pub fn set_payment_method(&mut self, method: PaymentMethod) -> Result<(), CoreError> {
        if !method.is_enabled() {
            return Err(CoreError::ValidationFailed {
                message: format!(
                    "{} is not available yet; only card payments are accepted",
                    method.label()
                ),
            });
        }
        self.payment_method = method;
        Ok(())
    }

    pub fn set_cardholder(&mut self, value: &str) {
        value.clone_into(&mut self.card.cardholder);
    }

    pub fn set_card_number(&mut self, value: &str) {
        self.card.number = truncated(value, CARD_NUMBER_MAX);
    }

    pub fn set_expiry(&mut self, value: &str) {
        self.card.expiry = truncated(value, EXPIRY_MAX);
    }

    pub fn set_cvv(&mut self, value: &str) {
        self.card.cvv = truncated(value, CVV_MAX);
    }

    /// Apply raw form input to a field.
    ///
    /// Room and payment method accept their wire codes (`RN1`, `card`);
    /// an empty room clears the selection. Guests must be a whole number.
    pub fn apply_input(&mut self, field: DraftField, value: &str) -> Result<(), CoreError> {
        match field {
            DraftField::Room => {
                let value = value.trim();
                if value.is_empty() {
                    self.set_room_category(None);
                } else {
                    let category = RoomCategory::from_code(value).ok_or_else(|| {
                        CoreError::ValidationFailed {
                            message: format!("unknown room type '{value}'"),
                        }
                    })?;
                    self.set_room_category(Some(category));
                }
            }
            DraftField::CheckIn => self.set_check_in(value),
            DraftField::CheckOut => self.set_check_out(value),
            DraftField::Guests => {
                let guests = value.trim().parse::<u32>().map_err(|_| {
                    CoreError::ValidationFailed {
                        message: format!("guests must be a whole number, got '{value}'"),
                    }
                })?;
                self.set_guests(guests);
            }
            DraftField::FirstName => self.set_first_name(value),
            DraftField::LastName => self.set_last_name(value),
            DraftField::DateOfBirth => self.set_date_of_birth(value),
            DraftField::Email => self.set_email(value),
            DraftField::Phone => self.set_phone(value),
            DraftField::PaymentMethod => {
                let method = value.trim().parse::<PaymentMethod>().map_err(|_| {
                    CoreError::ValidationFailed {
                        message: format!("unknown payment method '{value}'"),
                    }
                })?;
                self.set_payment_method(method)?;
            }
            DraftField::Cardholder => self.set_cardholder(value),
            DraftField::CardNumber => self.set_card_number(value),
            DraftField::Expiry => self.set_expiry(value),
            DraftField::Cvv => self.set_cvv(value),
        }
        Ok(())
    }

    // ── Seeding ──────────────────────────────────────────────────────

    /// Copy search criteria into the stay fields the guest has not edited.
    /// A guest count below one seeds as one.
    pub fn seed_from(&mut self, criteria: &SearchCriteria) {
        if !self.touched.check_in {
            self.check_in = criteria.check_in.map(|d| d.to_string()).unwrap_or_default();
        }
        if !self.touched.check_out {
            self.check_out = criteria
                .check_out
                .map(|d| d.to_string())
                .unwrap_or_default();
        }
        if !self.touched.guests {
            self.guests = criteria.guests.max(1);
        }
    }

    // ── Derived state ────────────────────────────────────────────────

    pub fn quote(&self, pricing: &PricingTable) -> PriceQuote {
        pricing.quote(
            self.room_category,
            &self.check_in,
            &self.check_out,
            self.guests,
        )
    }

    /// Fields a form marks as required that are still blank or unusable.
    pub fn missing_fields(&self) -> Vec<DraftField> {
        let mut missing = Vec::new();
        if self.room_category.is_none() {
            missing.push(DraftField::Room);
        }
        if parse_stay_date(&self.check_in).is_none() {
            missing.push(DraftField::CheckIn);
        }
        if parse_stay_date(&self.check_out).is_none() {
            missing.push(DraftField::CheckOut);
        }
        if self.guests == 0 {
            missing.push(DraftField::Guests);
        }
        let text_fields = [
            (DraftField::FirstName, &self.first_name),
            (DraftField::LastName, &self.last_name),
        ];
        missing.extend(
            text_fields
                .into_iter()
                .filter(|(_, value)| value.trim().is_empty())
                .map(|(field, _)| field),
        );
        if parse_stay_date(&self.date_of_birth).is_none() {
            missing.push(DraftField::DateOfBirth);
        }
        let text_fields = [
            (DraftField::Email, &self.email),
            (DraftField::Phone, &self.phone),
            (DraftField::Cardholder, &self.card.cardholder),
            (DraftField::CardNumber, &self.card.number),
            (DraftField::Expiry, &self.card.expiry),
            (DraftField::Cvv, &self.card.cvv),
        ];
        missing.extend(
            text_fields
                .into_iter()
                .filter(|(_, value)| value.trim().is_empty())
                .map(|(field, _)| field),
        );
        missing
    }

    /// Build the creation payload. Only required-field presence is checked;
    /// the stay may still price at zero.
    pub fn to_request(&self, total: u32) -> Result<CreateBookingRequest, CoreError> {
        let missing = self.missing_fields();
        if !missing.is_empty() {
            let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
            return Err(CoreError::ValidationFailed {
                message: format!("missing or invalid: {}", names.join(", ")),
            });
        }

        let (Some(category), Some(check_in), Some(check_out), Some(date_of_birth)) = (
            self.room_category,
            parse_stay_date(&self.check_in),
            parse_stay_date(&self.check_out),
            parse_stay_date(&self.date_of_birth),
        ) else {
            return Err(CoreError::Internal(
                "draft passed validation with unparseable fields".into(),
            ));
        };

        Ok(CreateBookingRequest {
            customer_first_name: self.first_name.trim().to_owned(),
            customer_last_name: self.last_name.trim().to_owned(),
            customer_email: self.email.trim().to_owned(),
            customer_phone: self.phone.trim().to_owned(),
            customer_date_of_birth: date_of_birth,
            room_number: category.code().to_owned(),
            check_in_date: check_in,
            check_out_date: check_out,
            total_price: f64::from(total),
        })
    }
}
