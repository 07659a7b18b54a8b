//! Rooms screen: the public catalogue of room categories with nightly
//! rates. Enter hands the highlighted category to the booking form.

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};

use hostel_core::{Availability, PricingTable, RoomCategory};

use crate::action::Action;
use crate::component::Component;
use crate::theme;

pub struct RoomsScreen {
    focused: bool,
    categories: Vec<RoomCategory>,
    pricing: PricingTable,
    availability: Availability,
    table_state: TableState,
}

impl RoomsScreen {
    pub fn new(pricing: PricingTable) -> Self {
        Self {
            focused: false,
            categories: RoomCategory::all().collect(),
            pricing,
            availability: Availability::Idle,
            table_state: TableState::default().with_selected(Some(0)),
        }
    }

    fn selected(&self) -> Option<RoomCategory> {
        self.table_state
            .selected()
            .and_then(|i| self.categories.get(i).copied())
    }

    fn move_selection(&mut self, down: bool) {
        let len = self.categories.len();
        if len == 0 {
            return;
        }
        let current = self.table_state.selected().unwrap_or(0);
        let next = if down {
            (current + 1).min(len - 1)
        } else {
            current.saturating_sub(1)
        };
        self.table_state.select(Some(next));
    }

    /// Availability cell for a category under the last search.
    fn availability_label(&self, category: RoomCategory) -> (&'static str, Style) {
        match &self.availability {
            Availability::Loaded(rooms) if rooms.contains(&category) => {
                ("free", Style::default().fg(theme::SUCCESS_GREEN))
            }
            Availability::Loaded(_) => ("full", Style::default().fg(theme::ERROR_RED)),
            Availability::Loading => ("…", Style::default().fg(theme::ELECTRIC_YELLOW)),
            Availability::Idle | Availability::Failed(_) => ("─", theme::key_hint()),
        }
    }
}

impl Component for RoomsScreen {
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(true),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(false),
            KeyCode::Enter | KeyCode::Char('b') => {
                return Ok(self.selected().map(Action::SelectRoom));
            }
            _ => {}
        }
        Ok(None)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        if let Action::AvailabilityUpdated(availability) = action {
            self.availability = availability.clone();
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Rooms ")
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
            Constraint::Length(u16::try_from(self.categories.len()).unwrap_or(3) + 2),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(inner);

        let header = Row::new(
            ["", "Code", "Room", "Beds", "Per night", "Status"]
                .map(|h| Cell::from(h).style(theme::table_header())),
        );

        let selected = self.table_state.selected();
        let rows: Vec<Row> = self
            .categories
            .iter()
            .enumerate()
            .map(|(i, &category)| {
                let prefix = if selected == Some(i) { "▸" } else { " " };
                let rate = self
                    .pricing
                    .rate(category)
                    .map_or_else(|| "─".into(), |r| format!("€{r}"));
                let (status, status_style) = self.availability_label(category);
                Row::new(vec![
                    Cell::from(prefix),
                    Cell::from(category.code()).style(Style::default().fg(theme::LIGHT_BLUE)),
                    Cell::from(category.label()),
                    Cell::from(category.beds().to_string()),
                    Cell::from(rate).style(theme::price()),
                    Cell::from(status).style(status_style),
                ])
                .style(theme::table_row())
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(1),
                Constraint::Length(5),
                Constraint::Min(16),
                Constraint::Length(5),
                Constraint::Length(10),
                Constraint::Length(7),
            ],
        )
        .header(header)
        .row_highlight_style(theme::table_selected());

        let mut state = self.table_state.clone();
        frame.render_stateful_widget(table, layout[0], &mut state);

        if let Some(category) = self.selected() {
            let detail = Block::default()
                .title(format!(" {} ", category.label()))
                .title_style(theme::title_style())
                .borders(Borders::TOP)
                .border_style(theme::border_default());
            let text = vec![
                Line::from(Span::styled(
                    category.description(),
                    Style::default().fg(theme::DIM_WHITE),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("Sleeps ", theme::key_hint()),
                    Span::styled(
                        category.beds().to_string(),
                        Style::default()
                            .fg(theme::NEON_CYAN)
                            .add_modifier(Modifier::BOLD),
                    ),
                ]),
            ];
            frame.render_widget(
                Paragraph::new(text).block(detail).wrap(Wrap { trim: true }),
                layout[1],
            );
        }

        let hints = Line::from(vec![
            Span::styled(" j/k ", theme::key_hint_key()),
            Span::styled("select  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("book this room", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), layout[2]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn press(screen: &mut RoomsScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .ok()
            .flatten()
    }

    #[test]
    fn enter_selects_highlighted_category() {
        let mut screen = RoomsScreen::new(PricingTable::default());
        press(&mut screen, KeyCode::Down);
        let action = press(&mut screen, KeyCode::Enter);
        assert!(matches!(action, Some(Action::SelectRoom(RoomCategory::FourBed))));
    }

    #[test]
    fn selection_stops_at_last_row() {
        let mut screen = RoomsScreen::new(PricingTable::default());
        for _ in 0..10 {
            press(&mut screen, KeyCode::Char('j'));
        }
        assert_eq!(screen.selected(), Some(RoomCategory::SixBed));
    }
}
