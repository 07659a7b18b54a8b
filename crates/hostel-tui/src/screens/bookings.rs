//! Front desk screen: bookings, customers, rooms and payments tables for
//! a logged-in administrator.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState};

use hostel_core::{AdminCommand, Booking, BookingStatus, Collection, Customer, Payment, Room};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::sub_tabs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Tab {
    #[default]
    Bookings,
    Customers,
    Rooms,
    Payments,
}

impl Tab {
    const ALL: [Tab; 4] = [Self::Bookings, Self::Customers, Self::Rooms, Self::Payments];

    fn index(self) -> usize {
        Self::ALL.iter().position(|&t| t == self).unwrap_or(0)
    }

    fn label(self) -> &'static str {
        match self {
            Self::Bookings => "Bookings",
            Self::Customers => "Customers",
            Self::Rooms => "Rooms",
            Self::Payments => "Payments",
        }
    }

    fn collection(self) -> Collection {
        match self {
            Self::Bookings => Collection::Bookings,
            Self::Customers => Collection::Customers,
            Self::Rooms => Collection::Rooms,
            Self::Payments => Collection::Payments,
        }
    }

    fn shift(self, forward: bool) -> Self {
        let len = Self::ALL.len();
        let idx = self.index();
        let next = if forward {
            (idx + 1) % len
        } else {
            (idx + len - 1) % len
        };
        Self::ALL[next]
    }
}

/// Booking status filter, cycled with `f`.
fn next_filter(current: Option<BookingStatus>) -> Option<BookingStatus> {
    match current {
        None => Some(BookingStatus::Booked),
        Some(BookingStatus::Booked) => Some(BookingStatus::Cancelled),
        Some(BookingStatus::Cancelled) => Some(BookingStatus::Completed),
        Some(BookingStatus::Completed) => None,
    }
}

fn dash(value: Option<&str>) -> String {
    value.filter(|s| !s.is_empty()).unwrap_or("─").to_owned()
}

pub struct BookingsScreen {
    focused: bool,
    admin_id: Option<i64>,
    tab: Tab,
    bookings: Arc<Vec<Arc<Booking>>>,
    customers: Arc<Vec<Arc<Customer>>>,
    rooms: Arc<Vec<Arc<Room>>>,
    payments: Arc<Vec<Arc<Payment>>>,
    status_filter: Option<BookingStatus>,
    table_state: TableState,
    last_update: Option<DateTime<Utc>>,
}

impl BookingsScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            admin_id: None,
            tab: Tab::default(),
            bookings: Arc::new(Vec::new()),
            customers: Arc::new(Vec::new()),
            rooms: Arc::new(Vec::new()),
            payments: Arc::new(Vec::new()),
            status_filter: None,
            table_state: TableState::default().with_selected(Some(0)),
            last_update: None,
        }
    }

    fn visible_bookings(&self) -> Vec<&Arc<Booking>> {
        self.bookings
            .iter()
            .filter(|b| self.status_filter.is_none() || b.booking_status == self.status_filter)
            .collect()
    }

    fn row_count(&self) -> usize {
        match self.tab {
            Tab::Bookings => self.visible_bookings().len(),
            Tab::Customers => self.customers.len(),
            Tab::Rooms => self.rooms.len(),
            Tab::Payments => self.payments.len(),
        }
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.row_count();
        if len == 0 {
            self.table_state.select(Some(0));
            return;
        }
        let next = self
            .selected_index()
            .saturating_add_signed(delta)
            .min(len - 1);
        self.table_state.select(Some(next));
    }

    fn clamp_selection(&mut self) {
        self.move_selection(0);
    }

    fn switch_tab(&mut self, forward: bool) {
        self.tab = self.tab.shift(forward);
        self.table_state.select(Some(0));
    }

    fn selected_booking(&self) -> Option<Arc<Booking>> {
        self.visible_bookings()
            .get(self.selected_index())
            .copied()
            .cloned()
    }

    /// Command for `c` (cancel) on the current row.
    fn cancel_command(&self) -> Option<AdminCommand> {
        if self.tab != Tab::Bookings {
            return None;
        }
        let booking = self.selected_booking()?;
        (booking.booking_status != Some(BookingStatus::Cancelled)).then_some(
            AdminCommand::CancelBooking {
                booking_id: booking.booking_id,
            },
        )
    }

    /// Command for `d` (delete) on the current row.
    fn delete_command(&self) -> Option<AdminCommand> {
        let idx = self.selected_index();
        match self.tab {
            Tab::Bookings => self
                .selected_booking()
                .map(|b| AdminCommand::DeleteBooking {
                    booking_id: b.booking_id,
                }),
            Tab::Customers => self
                .customers
                .get(idx)
                .and_then(|c| c.customer_id.clone())
                .map(|customer_id| AdminCommand::DeleteCustomer { customer_id }),
            Tab::Rooms => self.rooms.get(idx).map(|r| AdminCommand::DeleteRoom {
                room_id: r.room_id.clone(),
            }),
            Tab::Payments => None,
        }
    }

    fn touch(&mut self) {
        self.last_update = Some(Utc::now());
        self.clamp_selection();
    }

    // ── Rendering ────────────────────────────────────────────────────

    fn render_logged_out(frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                "  The front desk is for administrators.",
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  L ", theme::key_hint_key()),
                Span::styled("log in", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }

    fn table<'a>(header: &[&'a str], rows: Vec<Row<'a>>, widths: &[Constraint]) -> Table<'a> {
        let header = Row::new(
            header
                .iter()
                .map(|h| Cell::from(*h).style(theme::table_header())),
        );
        Table::new(rows, widths.to_vec())
            .header(header)
            .row_highlight_style(theme::table_selected())
    }

    fn prefix(&self, i: usize) -> &'static str {
        if i == self.selected_index() { "▸" } else { " " }
    }

    fn bookings_table(&self) -> Table<'static> {
        let rows = self
            .visible_bookings()
            .into_iter()
            .enumerate()
            .map(|(i, b)| {
                let status = b
                    .booking_status
                    .map_or_else(|| "─".to_owned(), |s| s.to_string());
                Row::new(vec![
                    Cell::from(format!("{}{}", self.prefix(i), b.booking_id)),
                    Cell::from(b.customer_full_name.clone()),
                    Cell::from(dash(b.room_number.as_deref())),
                    Cell::from(dash(b.bed_number.as_deref())),
                    Cell::from(b.check_in_date.to_string()),
                    Cell::from(b.check_out_date.to_string()),
                    Cell::from(status)
                        .style(Style::default().fg(theme::status_color(b.booking_status))),
                    Cell::from(format!("€{:.2}", b.total_price)).style(theme::price()),
                ])
                .style(theme::table_row())
            })
            .collect();
        Self::table(
            &["ID", "Guest", "Room", "Bed", "Check-in", "Check-out", "Status", "Total"],
            rows,
            &[
                Constraint::Length(7),
                Constraint::Min(16),
                Constraint::Length(6),
                Constraint::Length(5),
                Constraint::Length(11),
                Constraint::Length(11),
                Constraint::Length(10),
                Constraint::Length(10),
            ],
        )
    }

    fn customers_table(&self) -> Table<'static> {
        let rows = self
            .customers
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Row::new(vec![
                    Cell::from(format!(
                        "{}{}",
                        self.prefix(i),
                        dash(c.customer_id.as_deref())
                    )),
                    Cell::from(c.full_name()),
                    Cell::from(c.email.clone()),
                    Cell::from(dash(c.phone.as_deref())),
                    Cell::from(c.date_of_birth.map_or_else(|| "─".into(), |d| d.to_string())),
                    Cell::from(dash(c.room_number.as_deref())),
                ])
                .style(theme::table_row())
            })
            .collect();
        Self::table(
            &["ID", "Name", "Email", "Phone", "Born", "Room"],
            rows,
            &[
                Constraint::Length(10),
                Constraint::Min(16),
                Constraint::Min(20),
                Constraint::Length(14),
                Constraint::Length(11),
                Constraint::Length(6),
            ],
        )
    }

    fn rooms_table(&self) -> Table<'static> {
        let rows = self
            .rooms
            .iter()
            .enumerate()
            .map(|(i, r)| {
                let beds: Vec<&str> = r.beds.iter().map(|b| b.bed_number.as_str()).collect();
                Row::new(vec![
                    Cell::from(format!("{}{}", self.prefix(i), r.room_id)),
                    Cell::from(r.room_number.clone()),
                    Cell::from(r.floor.map_or_else(|| "─".into(), |f| f.to_string())),
                    Cell::from(r.capacity.map_or_else(|| "─".into(), |c| c.to_string())),
                    Cell::from(beds.join(", ")),
                ])
                .style(theme::table_row())
            })
            .collect();
        Self::table(
            &["ID", "Number", "Floor", "Capacity", "Beds"],
            rows,
            &[
                Constraint::Length(10),
                Constraint::Length(8),
                Constraint::Length(6),
                Constraint::Length(9),
                Constraint::Min(10),
            ],
        )
    }

    fn payments_table(&self) -> Table<'static> {
        let rows = self
            .payments
            .iter()
            .enumerate()
            .map(|(i, p)| {
                Row::new(vec![
                    Cell::from(format!("{}{}", self.prefix(i), p.payment_id)),
                    Cell::from(p.booking_id.map_or_else(|| "─".into(), |id| id.to_string())),
                    Cell::from(p.payment_type.map_or_else(|| "─".into(), |t| t.to_string())),
                    Cell::from(
                        p.payment_date
                            .map_or_else(|| "─".into(), |d| d.format("%Y-%m-%d %H:%M").to_string()),
                    ),
                    Cell::from(format!("€{:.2}", p.amount)).style(theme::price()),
                ])
                .style(theme::table_row())
            })
            .collect();
        Self::table(
            &["Payment", "Booking", "Type", "Date", "Amount"],
            rows,
            &[
                Constraint::Min(12),
                Constraint::Length(8),
                Constraint::Length(12),
                Constraint::Length(17),
                Constraint::Length(10),
            ],
        )
    }

    fn title(&self) -> String {
        let age = self.last_update.map(|at| {
            let secs = Utc::now().signed_duration_since(at).num_seconds().max(0);
            let secs = u64::try_from(secs).unwrap_or(0);
            humantime::format_duration(Duration::from_secs(secs)).to_string()
        });
        match age {
            Some(age) => format!(" Front Desk · updated {age} ago "),
            None => " Front Desk ".into(),
        }
    }
}

impl Component for BookingsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if self.admin_id.is_none() {
            return Ok(None);
        }

        let action = match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.move_selection(1);
                None
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.move_selection(-1);
                None
            }
            KeyCode::Char('g') => {
                self.table_state.select(Some(0));
                None
            }
            KeyCode::Char('G') => {
                self.move_selection(isize::MAX);
                None
            }
            KeyCode::Char('l' | ']') | KeyCode::Right => {
                self.switch_tab(true);
                None
            }
            KeyCode::Char('h' | '[') | KeyCode::Left => {
                self.switch_tab(false);
                None
            }
            KeyCode::Char('f') if self.tab == Tab::Bookings => {
                self.status_filter = next_filter(self.status_filter);
                self.table_state.select(Some(0));
                None
            }
            KeyCode::Char('r') => Some(Action::Refresh(Some(self.tab.collection()))),
            KeyCode::Char('R') => Some(Action::Refresh(None)),
            KeyCode::Char('c') => self.cancel_command().map(Action::RequestCommand),
            KeyCode::Char('d') => self.delete_command().map(Action::RequestCommand),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::AdminChanged(admin_id) => {
                self.admin_id = *admin_id;
                if admin_id.is_none() {
                    self.last_update = None;
                }
            }
            Action::BookingsUpdated(bookings) => {
                self.bookings = Arc::clone(bookings);
                self.touch();
            }
            Action::CustomersUpdated(customers) => {
                self.customers = Arc::clone(customers);
                self.touch();
            }
            Action::RoomsUpdated(rooms) => {
                self.rooms = Arc::clone(rooms);
                self.touch();
            }
            Action::PaymentsUpdated(payments) => {
                self.payments = Arc::clone(payments);
                self.touch();
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(self.title())
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

        if self.admin_id.is_none() {
            Self::render_logged_out(frame, inner);
            return;
        }

        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

        let labels: Vec<(&str, Option<usize>)> = Tab::ALL
            .iter()
            .map(|t| {
                let count = match t {
                    Tab::Bookings => self.bookings.len(),
                    Tab::Customers => self.customers.len(),
                    Tab::Rooms => self.rooms.len(),
                    Tab::Payments => self.payments.len(),
                };
                (t.label(), Some(count))
            })
            .collect();
        let mut tabs = sub_tabs::render_sub_tabs(&labels, self.tab.index());
        if self.tab == Tab::Bookings {
            let filter = self
                .status_filter
                .map_or_else(|| "all".to_owned(), |s| s.to_string());
            tabs.spans.push(Span::styled(
                format!("   status: {filter}"),
                theme::key_hint(),
            ));
        }
        frame.render_widget(Paragraph::new(tabs), layout[0]);

        let table = match self.tab {
            Tab::Bookings => self.bookings_table(),
            Tab::Customers => self.customers_table(),
            Tab::Rooms => self.rooms_table(),
            Tab::Payments => self.payments_table(),
        };
        let mut state = self.table_state.clone();
        frame.render_stateful_widget(table, layout[1], &mut state);

        let mut hints = vec![
            Span::styled(" h/l ", theme::key_hint_key()),
            Span::styled("table  ", theme::key_hint()),
            Span::styled("r ", theme::key_hint_key()),
            Span::styled("refresh  ", theme::key_hint()),
        ];
        if self.tab == Tab::Bookings {
            hints.extend([
                Span::styled("f ", theme::key_hint_key()),
                Span::styled("filter  ", theme::key_hint()),
                Span::styled("c ", theme::key_hint_key()),
                Span::styled("cancel  ", theme::key_hint()),
            ]);
        }
        if self.tab != Tab::Payments {
            hints.extend([
                Span::styled("d ", theme::key_hint_key()),
                Span::styled("delete", theme::key_hint()),
            ]);
        }
        frame.render_widget(Paragraph::new(Line::from(hints)), layout[2]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use chrono::NaiveDate;
    use crossterm::event::KeyModifiers;

    use super::*;

    fn booking(id: i64, status: BookingStatus) -> Arc<Booking> {
        Arc::new(Booking {
            booking_id: id,
            customer_full_name: format!("Guest {id}"),
            customer_email: None,
            room_number: Some("RN2".into()),
            bed_number: None,
            booking_status: Some(status),
            check_in_date: NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            check_out_date: NaiveDate::from_ymd_opt(2025, 7, 3).unwrap(),
            created_at: None,
            total_price: 80.0,
        })
    }

    fn logged_in_with_bookings() -> BookingsScreen {
        let mut screen = BookingsScreen::new();
        screen.update(&Action::AdminChanged(Some(7))).unwrap();
        screen
            .update(&Action::BookingsUpdated(Arc::new(vec![
                booking(1, BookingStatus::Booked),
                booking(2, BookingStatus::Cancelled),
                booking(3, BookingStatus::Booked),
            ])))
            .unwrap();
        screen
    }

    fn press(screen: &mut BookingsScreen, c: char) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn keys_are_ignored_when_logged_out() {
        let mut screen = BookingsScreen::new();
        assert!(press(&mut screen, 'r').is_none());
    }

    #[test]
    fn delete_targets_the_selected_booking() {
        let mut screen = logged_in_with_bookings();
        press(&mut screen, 'j');
        let action = press(&mut screen, 'd');
        assert!(matches!(
            action,
            Some(Action::RequestCommand(AdminCommand::DeleteBooking { booking_id: 2 }))
        ));
    }

    #[test]
    fn cancelled_bookings_cannot_be_cancelled_again() {
        let mut screen = logged_in_with_bookings();
        press(&mut screen, 'j');
        assert!(press(&mut screen, 'c').is_none());
    }

    #[test]
    fn status_filter_narrows_rows_and_actions() {
        let mut screen = logged_in_with_bookings();
        press(&mut screen, 'f');
        assert_eq!(screen.visible_bookings().len(), 2);
        press(&mut screen, 'j');
        let action = press(&mut screen, 'c');
        assert!(matches!(
            action,
            Some(Action::RequestCommand(AdminCommand::CancelBooking { booking_id: 3 }))
        ));
    }

    #[test]
    fn refresh_targets_the_visible_table() {
        let mut screen = logged_in_with_bookings();
        press(&mut screen, ']');
        assert!(matches!(
            press(&mut screen, 'r'),
            Some(Action::Refresh(Some(Collection::Customers)))
        ));
        assert!(press(&mut screen, 'c').is_none());
    }
}
