//! Inbox screen: booking notifications and contact-form messages.

use std::sync::Arc;

use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};

use hostel_core::{AdminCommand, Collection, ContactMessage, Notification};

use crate::action::Action;
use crate::component::Component;
use crate::theme;
use crate::widgets::sub_tabs;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Folder {
    #[default]
    Notifications,
    Messages,
}

impl Folder {
    fn toggle(self) -> Self {
        match self {
            Self::Notifications => Self::Messages,
            Self::Messages => Self::Notifications,
        }
    }

    fn collection(self) -> Collection {
        match self {
            Self::Notifications => Collection::Notifications,
            Self::Messages => Collection::Messages,
        }
    }
}

/// One inbox row, borrowed from whichever folder is open.
enum Entry<'a> {
    Notification(&'a Notification),
    Message(&'a ContactMessage),
}

impl Entry<'_> {
    fn is_read(&self) -> bool {
        match self {
            Self::Notification(n) => n.is_read,
            Self::Message(m) => m.is_read,
        }
    }

    fn mark_read(&self) -> Option<AdminCommand> {
        if self.is_read() {
            return None;
        }
        Some(match self {
            Self::Notification(n) => AdminCommand::MarkNotificationRead { id: n.id },
            Self::Message(m) => AdminCommand::MarkMessageRead { id: m.id },
        })
    }
}

pub struct InboxScreen {
    focused: bool,
    admin_id: Option<i64>,
    folder: Folder,
    notifications: Arc<Vec<Arc<Notification>>>,
    messages: Arc<Vec<Arc<ContactMessage>>>,
    unread_only: bool,
    table_state: TableState,
}

impl InboxScreen {
    pub fn new() -> Self {
        Self {
            focused: false,
            admin_id: None,
            folder: Folder::default(),
            notifications: Arc::new(Vec::new()),
            messages: Arc::new(Vec::new()),
            unread_only: false,
            table_state: TableState::default().with_selected(Some(0)),
        }
    }

    fn entries(&self) -> Vec<Entry<'_>> {
        let entries: Vec<Entry<'_>> = match self.folder {
            Folder::Notifications => self
                .notifications
                .iter()
                .map(|n| Entry::Notification(n))
                .collect(),
            Folder::Messages => self.messages.iter().map(|m| Entry::Message(m)).collect(),
        };
        entries
            .into_iter()
            .filter(|e| !self.unread_only || !e.is_read())
            .collect()
    }

    fn selected_index(&self) -> usize {
        self.table_state.selected().unwrap_or(0)
    }

    fn selected(&self) -> Option<Entry<'_>> {
        self.entries().into_iter().nth(self.selected_index())
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.entries().len();
        let next = if len == 0 {
            0
        } else {
            self.selected_index()
                .saturating_add_signed(delta)
                .min(len - 1)
        };
        self.table_state.select(Some(next));
    }

    fn unread_counts(&self) -> (usize, usize) {
        (
            self.notifications.iter().filter(|n| !n.is_read).count(),
            self.messages.iter().filter(|m| !m.is_read).count(),
        )
    }

    fn render_table(&self, frame: &mut Frame, area: Rect) {
        let selected = self.selected_index();
        let (header, widths) = match self.folder {
            Folder::Notifications => (
                ["", "Title", "Guest", "Room", "Received"],
                [
                    Constraint::Length(2),
                    Constraint::Min(18),
                    Constraint::Min(14),
                    Constraint::Length(6),
                    Constraint::Length(17),
                ],
            ),
            Folder::Messages => (
                ["", "From", "Email", "Message", "Sent"],
                [
                    Constraint::Length(2),
                    Constraint::Min(14),
                    Constraint::Min(18),
                    Constraint::Min(20),
                    Constraint::Length(17),
                ],
            ),
        };

        let rows: Vec<Row> = self
            .entries()
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let prefix = if i == selected { "▸" } else { " " };
                let marker = if entry.is_read() { " " } else { "●" };
                let when = |ts: Option<chrono::NaiveDateTime>| {
                    ts.map_or_else(|| "─".into(), |t| t.format("%Y-%m-%d %H:%M").to_string())
                };
                let cells = match entry {
                    Entry::Notification(n) => vec![
                        format!("{prefix}{marker}"),
                        n.title.clone(),
                        n.customer_full_name.clone().unwrap_or_default(),
                        n.room_number.clone().unwrap_or_default(),
                        when(n.created_at),
                    ],
                    Entry::Message(m) => vec![
                        format!("{prefix}{marker}"),
                        m.name.clone(),
                        m.email.clone(),
                        m.message.lines().next().unwrap_or_default().to_owned(),
                        when(m.sent_at),
                    ],
                };
                Row::new(cells).style(theme::inbox_row(entry.is_read()))
            })
            .collect();

        let table = Table::new(rows, widths)
            .header(Row::new(
                header.map(|h| Cell::from(h).style(theme::table_header())),
            ))
            .row_highlight_style(theme::table_selected());
        let mut state = self.table_state.clone();
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn render_detail(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::TOP)
            .border_style(theme::border_default());
        let label = |s: &'static str| Span::styled(format!("{s:<10}"), theme::key_hint());
        let value = |s: String| Span::styled(s, Style::default().fg(theme::NEON_CYAN));

        let lines = match self.selected() {
            Some(Entry::Notification(n)) => {
                let mut lines = vec![
                    Line::from(Span::styled(n.title.clone(), theme::title_style())),
                    Line::from(n.message.clone()),
                    Line::from(""),
                ];
                if let (Some(check_in), Some(check_out)) = (n.check_in_date, n.check_out_date) {
                    lines.push(Line::from(vec![
                        label("Stay"),
                        value(format!("{check_in} → {check_out}")),
                    ]));
                }
                if let Some(total) = n.total_price {
                    lines.push(Line::from(vec![
                        label("Total"),
                        Span::styled(format!("€{total:.2}"), theme::price()),
                    ]));
                }
                if let Some(bed) = &n.bed_number {
                    lines.push(Line::from(vec![label("Bed"), value(bed.clone())]));
                }
                lines
            }
            Some(Entry::Message(m)) => vec![
                Line::from(vec![
                    label("From"),
                    value(format!("{} <{}>", m.name, m.email)),
                ]),
                Line::from(""),
                Line::from(m.message.clone()),
            ],
            None => vec![Line::from(Span::styled(
                "Nothing here.",
                theme::key_hint(),
            ))],
        };
        frame.render_widget(
            Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
            area,
        );
    }
}

impl Component for InboxScreen {
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
            KeyCode::Char('h' | 'l' | '[' | ']') | KeyCode::Left | KeyCode::Right => {
                self.folder = self.folder.toggle();
                self.table_state.select(Some(0));
                None
            }
            KeyCode::Char('u') => {
                self.unread_only = !self.unread_only;
                self.table_state.select(Some(0));
                None
            }
            KeyCode::Enter | KeyCode::Char('m') => self
                .selected()
                .and_then(|e| e.mark_read())
                .map(Action::RequestCommand),
            KeyCode::Char('d') => match self.selected() {
                Some(Entry::Notification(n)) => Some(Action::RequestCommand(
                    AdminCommand::DeleteNotification { id: n.id },
                )),
                _ => None,
            },
            KeyCode::Char('r') => Some(Action::Refresh(Some(self.folder.collection()))),
            _ => None,
        };
        Ok(action)
    }

    fn update(&mut self, action: &Action) -> Result<Option<Action>> {
        match action {
            Action::AdminChanged(admin_id) => self.admin_id = *admin_id,
            Action::NotificationsUpdated(notifications) => {
                self.notifications = Arc::clone(notifications);
                self.move_selection(0);
            }
            Action::MessagesUpdated(messages) => {
                self.messages = Arc::clone(messages);
                self.move_selection(0);
            }
            _ => {}
        }
        Ok(None)
    }

    fn render(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .title(" Inbox ")
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
            let lines = vec![
                Line::from(""),
                Line::from(Span::styled(
                    "  Log in to read notifications and guest messages.",
                    Style::default().fg(theme::DIM_WHITE),
                )),
                Line::from(""),
                Line::from(vec![
                    Span::styled("  L ", theme::key_hint_key()),
                    Span::styled("log in", theme::key_hint()),
                ]),
            ];
            frame.render_widget(Paragraph::new(lines), inner);
            return;
        }

        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Percentage(55),
            Constraint::Min(4),
            Constraint::Length(1),
        ])
        .split(inner);

        let (unread_notifications, unread_messages) = self.unread_counts();
        let active = match self.folder {
            Folder::Notifications => 0,
            Folder::Messages => 1,
        };
        let mut tabs = sub_tabs::render_sub_tabs(
            &[
                ("Notifications", Some(unread_notifications)),
                ("Messages", Some(unread_messages)),
            ],
            active,
        );
        if self.unread_only {
            tabs.spans
                .push(Span::styled("   unread only", theme::key_hint()));
        }
        frame.render_widget(Paragraph::new(tabs), layout[0]);

        self.render_table(frame, layout[1]);
        self.render_detail(frame, layout[2]);

        let mut hints = vec![
            Span::styled(" h/l ", theme::key_hint_key()),
            Span::styled("folder  ", theme::key_hint()),
            Span::styled("Enter ", theme::key_hint_key()),
            Span::styled("mark read  ", theme::key_hint()),
            Span::styled("u ", theme::key_hint_key()),
            Span::styled("unread only  ", theme::key_hint()),
        ];
        if self.folder == Folder::Notifications {
            hints.extend([
                Span::styled("d ", theme::key_hint_key()),
                Span::styled("delete", theme::key_hint()),
            ]);
        }
        frame.render_widget(Paragraph::new(Line::from(hints)), layout[3]);
    }

    fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use crossterm::event::KeyModifiers;

    use super::*;

    fn notification(id: i64, is_read: bool) -> Arc<Notification> {
        Arc::new(Notification {
            id,
            title: format!("Booking #{id}"),
            message: "New booking".into(),
            is_read,
            created_at: None,
            customer_full_name: Some("Ada Lovelace".into()),
            room_number: Some("RN1".into()),
            bed_number: None,
            check_in_date: None,
            check_out_date: None,
            total_price: None,
        })
    }

    fn message(id: i64) -> Arc<ContactMessage> {
        Arc::new(ContactMessage {
            id,
            name: "Grace".into(),
            email: "grace@example.com".into(),
            message: "Is breakfast included?".into(),
            is_read: false,
            sent_at: None,
        })
    }

    fn screen() -> InboxScreen {
        let mut screen = InboxScreen::new();
        screen.update(&Action::AdminChanged(Some(1))).unwrap();
        screen
            .update(&Action::NotificationsUpdated(Arc::new(vec![
                notification(1, true),
                notification(2, false),
            ])))
            .unwrap();
        screen
            .update(&Action::MessagesUpdated(Arc::new(vec![message(9)])))
            .unwrap();
        screen
    }

    fn press(screen: &mut InboxScreen, code: KeyCode) -> Option<Action> {
        screen
            .handle_key_event(KeyEvent::new(code, KeyModifiers::NONE))
            .unwrap()
    }

    #[test]
    fn read_entries_are_not_marked_again() {
        let mut screen = screen();
        assert!(press(&mut screen, KeyCode::Enter).is_none());
        press(&mut screen, KeyCode::Char('j'));
        assert!(matches!(
            press(&mut screen, KeyCode::Enter),
            Some(Action::RequestCommand(AdminCommand::MarkNotificationRead { id: 2 }))
        ));
    }

    #[test]
    fn unread_filter_hides_read_entries() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Char('u'));
        assert_eq!(screen.entries().len(), 1);
        assert!(matches!(
            press(&mut screen, KeyCode::Char('d')),
            Some(Action::RequestCommand(AdminCommand::DeleteNotification { id: 2 }))
        ));
    }

    #[test]
    fn messages_folder_marks_messages_and_cannot_delete() {
        let mut screen = screen();
        press(&mut screen, KeyCode::Char('l'));
        assert!(press(&mut screen, KeyCode::Char('d')).is_none());
        assert!(matches!(
            press(&mut screen, KeyCode::Char('m')),
            Some(Action::RequestCommand(AdminCommand::MarkMessageRead { id: 9 }))
        ));
        assert_eq!(screen.unread_counts(), (1, 1));
    }
}
