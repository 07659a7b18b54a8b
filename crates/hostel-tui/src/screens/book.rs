//! Book screen: search criteria, guest details and card payment in one
//! form, with live availability and price.
//!
//! Navigation mode moves between fields with j/k and cycles selectors
//! with h/l. Enter starts editing a text field; while editing, every
//! keystroke is pushed to the shared draft and global shortcuts are
//! suspended. Committing a stay field re-runs the availability search.

use std::collections::HashMap;

use chrono::NaiveDate;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};
use strum::IntoEnumIterator;
use throbber_widgets_tui::{Throbber, ThrobberState};
use tui_input::Input;

use hostel_core::{
    Availability, BookingConfirmation, BookingDraft, DraftField, PaymentMethod, PricingTable,
    SearchCriteria,
};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::form_field::{self, FIELD_HEIGHT};

const STAY: [DraftField; 4] = [
    DraftField::CheckIn,
    DraftField::CheckOut,
    DraftField::Guests,
    DraftField::Room,
];
const GUEST: [DraftField; 5] = [
    DraftField::FirstName,
    DraftField::LastName,
    DraftField::DateOfBirth,
    DraftField::Email,
    DraftField::Phone,
];
const PAYMENT: [DraftField; 5] = [
    DraftField::PaymentMethod,
    DraftField::Cardholder,
    DraftField::CardNumber,
    DraftField::Expiry,
    DraftField::Cvv,
];

/// Focus order: stay, then guest, then payment.
fn form_order() -> impl Iterator<Item = DraftField> {
    STAY.into_iter().chain(GUEST).chain(PAYMENT)
}

fn is_selector(field: DraftField) -> bool {
    matches!(field, DraftField::Room | DraftField::PaymentMethod)
}

fn is_stay_field(field: DraftField) -> bool {
    STAY.contains(&field)
}

fn is_masked(field: DraftField) -> bool {
    matches!(field, DraftField::CardNumber | DraftField::Cvv)
}

fn label(field: DraftField) -> &'static str {
    match field {
        DraftField::Room => "Room",
        DraftField::CheckIn => "Check-in (YYYY-MM-DD)",
        DraftField::CheckOut => "Check-out (YYYY-MM-DD)",
        DraftField::Guests => "Guests",
        DraftField::FirstName => "First name",
        DraftField::LastName => "Last name",
        DraftField::DateOfBirth => "Date of birth (YYYY-MM-DD)",
        DraftField::Email => "Email",
        DraftField::Phone => "Phone",
        DraftField::PaymentMethod => "Payment method",
        DraftField::Cardholder => "Cardholder",
        DraftField::CardNumber => "Card number",
        DraftField::Expiry => "Expiry (MM/YY)",
        DraftField::Cvv => "CVV",
    }
}

/// Unmasked text for a field; the form shows its own masking.
fn raw_value(draft: &BookingDraft, field: DraftField) -> String {
    match field {
        DraftField::CardNumber => draft.card().number.clone(),
        DraftField::Cvv => draft.card().cvv.clone(),
        other => draft.display_value(other),
    }
}

fn step(field: DraftField, forward: bool) -> DraftField {
    let order: Vec<DraftField> = form_order().collect();
    let idx = order.iter().position(|&f| f == field).unwrap_or(0);
    let next = if forward {
        (idx + 1).min(order.len() - 1)
    } else {
        idx.saturating_sub(1)
    };
    order[next]
}

/// Search criteria from the stay inputs. Blank or malformed dates leave
/// that side unset so the search is skipped rather than sent.
pub fn criteria_from_inputs(check_in: &str, check_out: &str, guests: &str) -> SearchCriteria {
    let date = |raw: &str| NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok();
    SearchCriteria {
        check_in: date(check_in),
        check_out: date(check_out),
        guests: guests.trim().parse().unwrap_or(0),
    }
}

pub struct BookScreen {
    focused: bool,
    pricing: PricingTable,
    draft: BookingDraft,
    availability: Availability,
    confirmation: Option<BookingConfirmation>,
    inputs: HashMap<DraftField, Input>,
    active: DraftField,
    editing: bool,
    /// Highlighted payment method, which may be one that cannot be chosen.
    payment_cursor: PaymentMethod,
    submitting: bool,
    throbber_state: ThrobberState,
}

impl BookScreen {
    pub fn new(pricing: PricingTable) -> Self {
        let inputs = form_order()
            .filter(|f| !is_selector(*f))
            .map(|f| (f, Input::default()))
            .collect();
        let mut screen = Self {
            focused: false,
            pricing,
            draft: BookingDraft::default(),
            availability: Availability::Idle,
            confirmation: None,
            inputs,
            active: DraftField::CheckIn,
            editing: false,
            payment_cursor: PaymentMethod::Card,
            submitting: false,
            throbber_state: ThrobberState::default(),
        };
        screen.sync_inputs();
        screen
    }

    fn value(&self, field: DraftField) -> &str {
        self.inputs.get(&field).map_or("", Input::value)
    }

    /// Copy draft values into every input not currently being typed in.
    fn sync_inputs(&mut self) {
        let skip = self.editing.then_some(self.active);
        for (field, input) in &mut self.inputs {
            if Some(*field) == skip {
                continue;
            }
            let value = raw_value(&self.draft, *field);
            if input.value() != value {
                *input = Input::new(value);
            }
        }
    }

    fn criteria(&self) -> SearchCriteria {
        criteria_from_inputs(
            self.value(DraftField::CheckIn),
            self.value(DraftField::CheckOut),
            self.value(DraftField::Guests),
        )
    }

    fn search_if_stay(&self, field: DraftField) -> Option<Action> {
        is_stay_field(field).then(|| Action::Search(self.criteria()))
    }

    /// Leave `field` and move focus; editing continues on text fields.
    fn commit_and_move(&mut self, forward: bool) -> Option<Action> {
        let left = self.active;
        self.active = step(left, forward);
        self.editing = !is_selector(self.active);
        self.sync_inputs();
        self.search_if_stay(left)
    }

    fn cycle_room(&self, forward: bool) -> Option<Action> {
        let rooms = self.availability.rooms();
        if rooms.is_empty() {
            return None;
        }
        let current = self
            .draft
            .room_category()
            .and_then(|c| rooms.iter().position(|&r| r == c));
        let next = match (current, forward) {
            (None, _) => 0,
            (Some(i), true) => (i + 1) % rooms.len(),
            (Some(i), false) => (i + rooms.len() - 1) % rooms.len(),
        };
        Some(Action::EditDraft(
            DraftField::Room,
            rooms[next].code().to_owned(),
        ))
    }

    fn cycle_payment(&mut self, forward: bool) -> Option<Action> {
        let methods: Vec<PaymentMethod> = PaymentMethod::iter().collect();
        let idx = methods
            .iter()
            .position(|&m| m == self.payment_cursor)
            .unwrap_or(0);
        let next = if forward {
            (idx + 1) % methods.len()
        } else {
            (idx + methods.len() - 1) % methods.len()
        };
        self.payment_cursor = methods[next];
        self.payment_cursor.is_enabled().then(|| {
            Action::EditDraft(DraftField::PaymentMethod, self.payment_cursor.to_string())
        })
    }

    fn cycle_selector(&mut self, forward: bool) -> Option<Action> {
        match self.active {
            DraftField::Room => self.cycle_room(forward),
            DraftField::PaymentMethod => self.cycle_payment(forward),
            _ => None,
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Esc => {
                self.editing = false;
                self.search_if_stay(self.active)
            }
            KeyCode::Enter | KeyCode::Tab | KeyCode::Down => self.commit_and_move(true),
            KeyCode::BackTab | KeyCode::Up => self.commit_and_move(false),
            _ => {
                let field = self.active;
                let input = self.inputs.get_mut(&field)?;
                if !form_field::edit(input, key) {
                    return None;
                }
                let value = input.value().to_owned();
                // Half-typed guest counts stay local until they parse.
                if field == DraftField::Guests && value.trim().parse::<u32>().is_err() {
                    return None;
                }
                Some(Action::EditDraft(field, value))
            }
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_availability(&self, frame: &mut Frame, area: Rect) {
        let line = match &self.availability {
            Availability::Idle => Line::from(Span::styled(
                " Enter dates and guests to check availability",
                theme::key_hint(),
            )),
            Availability::Loading => {
                let throbber = Throbber::default()
                    .label(" Checking availability…")
                    .style(Style::default().fg(theme::NEON_CYAN))
                    .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
                frame.render_stateful_widget(throbber, area, &mut self.throbber_state.clone());
                return;
            }
            Availability::Loaded(rooms) if rooms.is_empty() => Line::from(Span::styled(
                " No rooms available for these dates",
                Style::default().fg(theme::ERROR_RED),
            )),
            Availability::Loaded(rooms) => {
                let codes: Vec<&str> = rooms.iter().map(|r| r.code()).collect();
                Line::from(vec![
                    Span::styled(" Available: ", theme::key_hint()),
                    Span::styled(
                        codes.join(" · "),
                        Style::default().fg(theme::SUCCESS_GREEN),
                    ),
                ])
            }
            Availability::Failed(reason) => Line::from(Span::styled(
                format!(" Couldn't check availability: {reason}"),
                Style::default().fg(theme::ELECTRIC_YELLOW),
            )),
        };
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_field(&self, frame: &mut Frame, area: Rect, field: DraftField) {
        let active = self.focused && self.active == field;
        match field {
            DraftField::Room => {
                let value = match self.draft.room_category() {
                    Some(c) => Span::styled(
                        format!("{} {}", c.code(), c.label()),
                        Style::default().fg(theme::NEON_CYAN),
                    ),
                    None => Span::styled("none available", theme::key_hint()),
                };
                form_field::render_selector(frame, area, label(field), value, active);
            }
            DraftField::PaymentMethod => {
                let method = self.payment_cursor;
                let value = if method.is_enabled() {
                    Span::styled(method.label(), Style::default().fg(theme::NEON_CYAN))
                } else {
                    Span::styled(format!("{} (unavailable)", method.label()), theme::disabled())
                };
                form_field::render_selector(frame, area, label(field), value, active);
            }
            _ => {
                if let Some(input) = self.inputs.get(&field) {
                    form_field::render_input(
                        frame,
                        area,
                        label(field),
                        input,
                        active && self.editing,
                        is_masked(field),
                    );
                }
            }
        }
    }

    fn render_column(&self, frame: &mut Frame, area: Rect, title: &str, fields: &[DraftField]) {
        let mut constraints = vec![Constraint::Length(1)];
        constraints.extend(fields.iter().map(|_| Constraint::Length(FIELD_HEIGHT)));
        let rows = Layout::vertical(constraints).split(area);

        frame.render_widget(
            Paragraph::new(Span::styled(format!(" {title}"), theme::title_style())),
            rows[0],
        );
        for (field, row) in fields.iter().zip(rows.iter().skip(1)) {
            self.render_field(frame, *row, *field);
        }
    }

    fn render_summary(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(theme::border_default());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let quote = self.draft.quote(&self.pricing);
        let mut lines = vec![match quote.summary() {
            Some(summary) => Line::from(vec![
                Span::styled(" Total  ", theme::key_hint()),
                Span::styled(summary, theme::price()),
            ]),
            None => Line::from(Span::styled(
                " Total appears once room, dates and guests are set",
                theme::key_hint(),
            )),
        }];

        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            let names: Vec<String> = missing.iter().map(ToString::to_string).collect();
            lines.push(Line::from(vec![
                Span::styled(" Still needed  ", theme::key_hint()),
                Span::styled(names.join(", "), Style::default().fg(theme::CORAL)),
            ]));
        }

        let text_area = if self.submitting {
            let parts = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner);
            let throbber = Throbber::default()
                .label(" Submitting booking…")
                .style(Style::default().fg(theme::NEON_CYAN))
                .throbber_style(Style::default().fg(theme::ELECTRIC_PURPLE));
            frame.render_stateful_widget(throbber, parts[1], &mut self.throbber_state.clone());
            parts[0]
        } else {
            inner
        };
        frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), text_area);
    }

    fn render_confirmation(frame: &mut Frame, area: Rect, confirmation: &BookingConfirmation) {
        let [panel] = Layout::horizontal([Constraint::Length(56)])
            .flex(Flex::Center)
            .areas(area);
        let [panel] = Layout::vertical([Constraint::Length(12)])
            .flex(Flex::Center)
            .areas(panel);

        frame.render_widget(Clear, panel);
        let block = Block::default()
            .title(" Booking confirmed ")
            .title_style(
                Style::default()
                    .fg(theme::SUCCESS_GREEN)
                    .add_modifier(Modifier::BOLD),
            )
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::SUCCESS_GREEN))
            .style(Style::default().bg(theme::BG_DARK));

        let row = |name: &'static str, value: String| {
            Line::from(vec![
                Span::styled(format!("  {name:<12}"), theme::key_hint()),
                Span::styled(value, Style::default().fg(theme::NEON_CYAN)),
            ])
        };
        let lines = vec![
            Line::from(""),
            row("Booking", format!("#{}", confirmation.booking_id)),
            row("Guest", confirmation.customer_full_name.clone()),
            row("Room", confirmation.room_number.clone()),
            row(
                "Stay",
                format!(
                    "{} → {}",
                    confirmation.check_in_date, confirmation.check_out_date
                ),
            ),
            row("Total", format!("€{:.2}", confirmation.total_price)),
            row(
                "Payment",
                confirmation
                    .payment_id
                    .clone()
                    .unwrap_or_else(|| "─".into()),
            ),
            Line::from(""),
            Line::from(vec![
                Span::styled("  Enter ", theme::key_hint_key()),
                Span::styled("book another", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).block(block), panel);
    }
}

impl Component for BookScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.confirmation.is_some() {
            return Ok(matches!(key.code, KeyCode::Enter | KeyCode::Esc)
                .then_some(Action::DismissConfirmation));
        }

        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.editing = false;
            return Ok(Some(Action::SubmitBooking));
        }

        if self.editing {
            return Ok(self.handle_editing_key(key));
        }

        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.active = step(self.active, true);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.active = step(self.active, false);
                None
            }
            KeyCode::Char('h') | KeyCode::Left => self.cycle_selector(false),
            KeyCode::Char('l') | KeyCode::Right | KeyCode::Char(' ') => self.cycle_selector(true),
            KeyCode::Enter | KeyCode::Char('i') if !is_selector(self.active) => {
                self.editing = true;
                None
            }
            KeyCode::Char('s') => Some(Action::SubmitBooking),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::DraftUpdated(draft) => {
                self.draft = (**draft).clone();
                if self.draft.payment_method().is_enabled() {
                    self.payment_cursor = self.draft.payment_method();
                }
                self.sync_inputs();
            }
            Action::AvailabilityUpdated(availability) => {
                self.availability = availability.clone();
            }
            Action::ConfirmationUpdated(confirmation) => {
                self.confirmation.clone_from(confirmation);
                if self.confirmation.is_some() {
                    self.active = DraftField::CheckIn;
                    self.editing = false;
                }
            }
            Action::SubmitBooking => self.submitting = true,
            Action::SubmitFinished(_) => self.submitting = false,
            Action::SelectRoom(_) => {
                self.active = DraftField::CheckIn;
                self.editing = false;
            }
            Action::Tick => {
                if self.submitting || self.availability.is_loading() {
                    self.throbber_state.calc_next();
                }
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Book a Room ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(if self.focused {
                theme::border_focused()
            } else {
                theme::border_default()
            });
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1 + FIELD_HEIGHT * 5),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

        self.render_availability(frame, layout[0]);

        let columns = Layout::horizontal([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .spacing(1)
        .split(layout[1]);
        self.render_column(frame, columns[0], "Stay", &STAY);
        self.render_column(frame, columns[1], "Guest", &GUEST);
        self.render_column(frame, columns[2], "Payment", &PAYMENT);

        self.render_summary(frame, layout[2]);

        let hints = if self.editing {
            Line::from(vec![
                Span::styled(" Enter/Tab ", theme::key_hint_key()),
                Span::styled("next  ", theme::key_hint()),
                Span::styled("Esc ", theme::key_hint_key()),
                Span::styled("done  ", theme::key_hint()),
                Span::styled("Ctrl+S ", theme::key_hint_key()),
                Span::styled("submit", theme::key_hint()),
            ])
        } else {
            Line::from(vec![
                Span::styled(" j/k ", theme::key_hint_key()),
                Span::styled("field  ", theme::key_hint()),
                Span::styled("Enter ", theme::key_hint_key()),
                Span::styled("edit  ", theme::key_hint()),
                Span::styled("h/l ", theme::key_hint_key()),
                Span::styled("choose  ", theme::key_hint()),
                Span::styled("s ", theme::key_hint_key()),
                Span::styled("submit", theme::key_hint()),
            ])
        };
        frame.render_widget(Paragraph::new(hints), layout[3]);

        if let Some(confirmation) = &self.confirmation {
            Self::render_confirmation(frame, inner, confirmation);
        }
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.editing = false;
        }
    }

    fn captures_input(&self) -> bool {
        self.editing
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use hostel_core::RoomCategory;
    use pretty_assertions::assert_eq;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn press(screen: &mut BookScreen, code: KeyCode) -> Option<Action> {
        screen.handle_key_event(key(code)).unwrap()
    }

    fn type_text(screen: &mut BookScreen, text: &str) -> Option<Action> {
        text.chars()
            .map(|c| press(screen, KeyCode::Char(c)))
            .last()
            .flatten()
    }

    #[test]
    fn incomplete_stay_inputs_give_incomplete_criteria() {
        let criteria = criteria_from_inputs("2025-07-01", "07/03", "2");
        assert_eq!(criteria.check_out, None);
        assert!(!criteria.is_complete());

        let criteria = criteria_from_inputs(" 2025-07-01", "2025-07-03 ", "2");
        assert!(criteria.is_complete());
        assert_eq!(criteria.guests, 2);
    }

    #[test]
    fn typing_pushes_each_keystroke_to_the_draft() {
        let mut screen = BookScreen::new(PricingTable::default());
        press(&mut screen, KeyCode::Enter);
        assert!(screen.captures_input());

        let action = type_text(&mut screen, "2025-07-01");
        assert!(matches!(
            action,
            Some(Action::EditDraft(DraftField::CheckIn, ref v)) if v == "2025-07-01"
        ));
    }

    #[test]
    fn committing_a_stay_field_searches_and_moves_on() {
        let mut screen = BookScreen::new(PricingTable::default());
        press(&mut screen, KeyCode::Enter);
        type_text(&mut screen, "2025-07-01");

        let action = press(&mut screen, KeyCode::Enter);
        assert!(matches!(action, Some(Action::Search(_))));
        assert_eq!(screen.active, DraftField::CheckOut);
        assert!(screen.editing);
    }

    #[test]
    fn half_typed_guest_count_stays_local() {
        let mut screen = BookScreen::new(PricingTable::default());
        screen.active = DraftField::Guests;
        press(&mut screen, KeyCode::Enter);
        assert!(press(&mut screen, KeyCode::Backspace).is_none());
        assert_eq!(screen.value(DraftField::Guests), "");
    }

    #[test]
    fn disabled_payment_methods_are_shown_but_not_applied() {
        let mut screen = BookScreen::new(PricingTable::default());
        screen.active = DraftField::PaymentMethod;
        assert!(press(&mut screen, KeyCode::Char('l')).is_none());
        assert_ne!(screen.payment_cursor, PaymentMethod::Card);
    }

    #[test]
    fn room_selector_cycles_available_rooms_only() {
        let mut screen = BookScreen::new(PricingTable::default());
        screen
            .update(&Action::AvailabilityUpdated(Availability::Loaded(vec![
                RoomCategory::FourBed,
                RoomCategory::SixBed,
            ])))
            .unwrap();
        screen.active = DraftField::Room;
        let action = press(&mut screen, KeyCode::Right);
        assert!(matches!(
            action,
            Some(Action::EditDraft(DraftField::Room, ref code)) if code == "RN2"
        ));
    }

    #[test]
    fn draft_updates_do_not_clobber_the_field_being_typed() {
        let mut screen = BookScreen::new(PricingTable::default());
        press(&mut screen, KeyCode::Enter);
        type_text(&mut screen, "2025-07");

        let mut draft = BookingDraft::default();
        draft.set_check_in("2030-01-01");
        draft.set_first_name("Ada");
        screen
            .update(&Action::DraftUpdated(Box::new(draft)))
            .unwrap();

        assert_eq!(screen.value(DraftField::CheckIn), "2025-07");
        assert_eq!(screen.value(DraftField::FirstName), "Ada");
    }

    #[test]
    fn confirmation_swallows_keys_until_dismissed() {
        let mut screen = BookScreen::new(PricingTable::default());
        let confirmation = BookingConfirmation {
            booking_id: 42,
            customer_full_name: "Ada Lovelace".into(),
            room_number: "RN2".into(),
            check_in_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2025, 7, 3).unwrap(),
            total_price: 80.0,
            payment_id: None,
        };
        screen
            .update(&Action::ConfirmationUpdated(Some(confirmation)))
            .unwrap();

        assert!(press(&mut screen, KeyCode::Char('s')).is_none());
        assert!(matches!(
            press(&mut screen, KeyCode::Enter),
            Some(Action::DismissConfirmation)
        ));
    }
}
