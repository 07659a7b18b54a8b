//! Administrator login dialog, drawn over the active screen.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use secrecy::SecretString;
use tui_input::Input;

use crate::action::Action;
use crate::theme;
use crate::widgets::form_field::{self, FIELD_HEIGHT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Username,
    Password,
}

pub struct LoginDialog {
    username: Input,
    password: Input,
    focus: Focus,
    error: Option<String>,
    busy: bool,
}

impl LoginDialog {
    /// Open the dialog, focusing the password when a username is known.
    pub fn new(username: Option<String>) -> Self {
        let focus = if username.is_some() {
            Focus::Password
        } else {
            Focus::Username
        };
        Self {
            username: Input::new(username.unwrap_or_default()),
            password: Input::default(),
            focus,
            error: None,
            busy: false,
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.busy {
            return None;
        }
        match key.code {
            KeyCode::Esc => Some(Action::CloseLogin),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    Focus::Username => Focus::Password,
                    Focus::Password => Focus::Username,
                };
                None
            }
            KeyCode::Enter if self.focus == Focus::Username => {
                self.focus = Focus::Password;
                None
            }
            KeyCode::Enter => self.submit(),
            _ => {
                let input = match self.focus {
                    Focus::Username => &mut self.username,
                    Focus::Password => &mut self.password,
                };
                form_field::edit(input, key);
                None
            }
        }
    }

    fn submit(&mut self) -> Option<Action> {
        let username = self.username.value().trim().to_owned();
        if username.is_empty() || self.password.value().is_empty() {
            self.error = Some("Username and password are required".into());
            return None;
        }
        self.busy = true;
        self.error = None;
        Some(Action::LoginSubmit {
            username,
            password: Arc::new(SecretString::from(self.password.value().to_owned())),
        })
    }

    /// Show a rejected login and let the user retry.
    pub fn fail(&mut self, message: String) {
        self.busy = false;
        self.error = Some(message);
        self.password.reset();
        self.focus = Focus::Password;
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let [panel] = Layout::horizontal([Constraint::Length(48)])
            .flex(Flex::Center)
            .areas(area);
        let [panel] = Layout::vertical([Constraint::Length(FIELD_HEIGHT * 2 + 5)])
            .flex(Flex::Center)
            .areas(panel);

        frame.render_widget(Clear, panel);
        let block = Block::default()
            .title(" Administrator login ")
            .title_style(theme::title_style())
            .title_alignment(Alignment::Center)
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));
        let inner = block.inner(panel);
        frame.render_widget(block, panel);

        let rows = Layout::vertical([
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(FIELD_HEIGHT),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

        form_field::render_input(
            frame,
            rows[0],
            "Username",
            &self.username,
            !self.busy && self.focus == Focus::Username,
            false,
        );
        form_field::render_input(
            frame,
            rows[1],
            "Password",
            &self.password,
            !self.busy && self.focus == Focus::Password,
            true,
        );

        let status = match (&self.error, self.busy) {
            (_, true) => Span::styled(" Logging in…", Style::default().fg(theme::NEON_CYAN)),
            (Some(error), false) => {
                Span::styled(format!(" {error}"), Style::default().fg(theme::ERROR_RED))
            }
            (None, false) => Span::raw(""),
        };
        frame.render_widget(Paragraph::new(Line::from(status)), rows[2]);

        let hints = Line::from(vec![
            Span::styled(" Enter ", theme::key_hint_key()),
            Span::styled("log in  ", theme::key_hint()),
            Span::styled("Tab ", theme::key_hint_key()),
            Span::styled("switch  ", theme::key_hint()),
            Span::styled("Esc ", theme::key_hint_key()),
            Span::styled("cancel", theme::key_hint()),
        ]);
        frame.render_widget(Paragraph::new(hints), rows[3]);
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;
    use secrecy::ExposeSecret;

    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn known_username_focuses_password_and_submits() {
        let mut dialog = LoginDialog::new(Some("admin".into()));
        for c in "s3cret".chars() {
            dialog.handle_key(key(KeyCode::Char(c)));
        }
        let Some(Action::LoginSubmit { username, password }) = dialog.handle_key(key(KeyCode::Enter))
        else {
            panic!("expected a login submission");
        };
        assert_eq!(username, "admin");
        assert_eq!(password.expose_secret(), "s3cret");
        assert!(dialog.handle_key(key(KeyCode::Esc)).is_none());
    }

    #[test]
    fn empty_password_is_not_submitted() {
        let mut dialog = LoginDialog::new(Some("admin".into()));
        assert!(dialog.handle_key(key(KeyCode::Enter)).is_none());
        assert!(dialog.error.is_some());
    }

    #[test]
    fn failure_clears_password_for_retry() {
        let mut dialog = LoginDialog::new(None);
        for c in "admin".chars() {
            dialog.handle_key(key(KeyCode::Char(c)));
        }
        dialog.handle_key(key(KeyCode::Enter));
        dialog.handle_key(key(KeyCode::Char('x')));
        assert!(dialog.handle_key(key(KeyCode::Enter)).is_some());

        dialog.fail("invalid credentials".into());
        assert_eq!(dialog.password.value(), "");
        assert!(matches!(
            dialog.handle_key(key(KeyCode::Esc)),
            Some(Action::CloseLogin)
        ));
    }
}
