//! Application core: event loop, screen management, action dispatch.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use color_eyre::eyre::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Tabs},
};
use secrecy::SecretString;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use hostel_config::AdminSession;
use hostel_core::{AdminCommand, Collection, CoreError, Hostel};

use crate::action::{Action, Toast, ToastLevel};
use crate::component::Component;
use crate::event::{Event, EventReader};
use crate::login::LoginDialog;
use crate::screen::ScreenId;
use crate::screens::create_screens;
use crate::theme;
use crate::tui::Tui;

const TOAST_TTL: Duration = Duration::from_secs(3);

/// Top-level application state and event loop.
pub struct App {
    active_screen: ScreenId,
    /// Previous screen for GoBack.
    previous_screen: Option<ScreenId>,
    screens: HashMap<ScreenId, Box<dyn Component>>,
    running: bool,
    help_visible: bool,
    terminal_size: (u16, u16),
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
    hostel: Hostel,
    /// Config profile; the admin session is persisted under this name.
    profile_name: String,
    /// Username offered when the login dialog opens.
    default_username: Option<String>,
    admin_id: Option<i64>,
    login: Option<LoginDialog>,
    /// Notifications waiting in the delivery queue.
    outbox_pending: usize,
    data_cancel: CancellationToken,
    /// Destructive command awaiting y/n.
    pending_confirm: Option<AdminCommand>,
    toast: Option<(Toast, Instant)>,
}

impl App {
    pub fn new(hostel: Hostel, profile_name: String, default_username: Option<String>) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let screens = create_screens(hostel.booking().pricing())
            .into_iter()
            .collect();
        let admin_id = hostel.admin_id();

        Self {
            active_screen: ScreenId::default(),
            previous_screen: None,
            screens,
            running: true,
            help_visible: false,
            terminal_size: (0, 0),
            action_tx,
            action_rx,
            hostel,
            profile_name,
            default_username,
            admin_id,
            login: None,
            outbox_pending: 0,
            data_cancel: CancellationToken::new(),
            pending_confirm: None,
            toast: None,
        }
    }

    fn init_screens(&mut self) -> Result<()> {
        for screen in self.screens.values_mut() {
            screen.init(self.action_tx.clone())?;
        }
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            screen.set_focused(true);
        }
        Ok(())
    }

    /// Run the main event loop until the user quits.
    pub async fn run(&mut self) -> Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;
        self.terminal_size = tui.size().unwrap_or((80, 24));
        self.init_screens()?;

        let bridge = {
            let hostel = self.hostel.clone();
            let cancel = self.data_cancel.clone();
            let tx = self.action_tx.clone();
            tokio::spawn(async move {
                crate::data_bridge::spawn_data_bridge(hostel, tx, cancel).await;
            })
        };

        let mut events = EventReader::new(
            Duration::from_millis(250), // 4 Hz tick
            Duration::from_millis(33),  // ~30 FPS render
        );

        info!(profile = %self.profile_name, "TUI event loop started");

        while self.running {
            let Some(event) = events.next().await else {
                break;
            };

            match event {
                Event::Key(key) => {
                    if let Some(action) = self.handle_key_event(key)? {
                        self.action_tx.send(action)?;
                    }
                }
                Event::Resize(w, h) => self.action_tx.send(Action::Resize(w, h))?,
                Event::Tick => self.action_tx.send(Action::Tick)?,
                Event::Render => self.action_tx.send(Action::Render)?,
            }

            while let Ok(action) = self.action_rx.try_recv() {
                self.process_action(&action)?;

                if let Action::Render = action {
                    tui.draw(|frame| self.render(frame))?;
                }
            }
        }

        // Let the bridge stop the delivery worker before the terminal goes.
        self.data_cancel.cancel();
        events.stop();
        if let Err(e) = bridge.await {
            warn!(error = %e, "data bridge task failed");
        }
        tui.exit();
        info!("TUI event loop ended");
        Ok(())
    }

    /// Map a key event to an action. Overlays claim keys first, then
    /// global shortcuts, then the active screen.
    fn handle_key_event(&mut self, key: KeyEvent) -> Result<Option<Action>> {
        if key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c') {
            return Ok(Some(Action::Quit));
        }

        if self.pending_confirm.is_some() {
            return Ok(match key.code {
                KeyCode::Char('y' | 'Y') => Some(Action::ConfirmYes),
                KeyCode::Char('n' | 'N') | KeyCode::Esc => Some(Action::ConfirmNo),
                _ => None,
            });
        }

        if let Some(login) = self.login.as_mut() {
            return Ok(login.handle_key(key));
        }

        if self.help_visible {
            return Ok(match key.code {
                KeyCode::Esc | KeyCode::Char('?') => Some(Action::ToggleHelp),
                _ => None,
            });
        }

        let Some(screen) = self.screens.get_mut(&self.active_screen) else {
            return Ok(None);
        };

        // A screen editing text gets every key.
        if screen.captures_input() {
            return screen.handle_key_event(key);
        }

        match (key.modifiers, key.code) {
            (KeyModifiers::NONE, KeyCode::Char('q')) => return Ok(Some(Action::Quit)),
            (KeyModifiers::NONE, KeyCode::Char('?')) => return Ok(Some(Action::ToggleHelp)),
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('L')) => {
                return Ok(Some(Action::OpenLogin));
            }
            (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char('O')) => {
                return Ok(Some(Action::Logout));
            }
            (KeyModifiers::NONE, KeyCode::Char(c @ '1'..='9')) => {
                let n = u8::try_from(c).map_or(0, |b| b - b'0');
                if let Some(target) = ScreenId::from_number(n) {
                    return Ok(Some(Action::SwitchScreen(target)));
                }
            }
            (KeyModifiers::NONE, KeyCode::Tab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.next())));
            }
            (KeyModifiers::SHIFT, KeyCode::BackTab) => {
                return Ok(Some(Action::SwitchScreen(self.active_screen.prev())));
            }
            (KeyModifiers::NONE, KeyCode::Esc) => {
                // Screens may close their own panels first.
                return Ok(screen.handle_key_event(key)?.or(Some(Action::GoBack)));
            }
            _ => {}
        }

        screen.handle_key_event(key)
    }

    fn broadcast(&mut self, action: &Action) -> Result<()> {
        for screen in self.screens.values_mut() {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn forward_to_active(&mut self, action: &Action) -> Result<()> {
        if let Some(screen) = self.screens.get_mut(&self.active_screen) {
            if let Some(follow_up) = screen.update(action)? {
                self.action_tx.send(follow_up)?;
            }
        }
        Ok(())
    }

    fn notify(&self, toast: Toast) {
        let _ = self.action_tx.send(Action::Notify(toast));
    }

    #[allow(clippy::too_many_lines)]
    fn process_action(&mut self, action: &Action) -> Result<()> {
        match action {
            Action::Quit => self.running = false,

            Action::Resize(w, h) => self.terminal_size = (*w, *h),

            Action::SwitchScreen(target) => {
                if *target != self.active_screen {
                    debug!("switching screen: {} → {}", self.active_screen, target);
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(false);
                    }
                    self.previous_screen = Some(self.active_screen);
                    self.active_screen = *target;
                    if let Some(screen) = self.screens.get_mut(&self.active_screen) {
                        screen.set_focused(true);
                    }
                }
            }
            Action::GoBack => {
                if let Some(prev) = self.previous_screen.take() {
                    self.action_tx.send(Action::SwitchScreen(prev))?;
                }
            }
            Action::ToggleHelp => self.help_visible = !self.help_visible,

            Action::Render => {}

            Action::Tick => {
                if let Some((_, shown)) = &self.toast {
                    if shown.elapsed() > TOAST_TTL {
                        self.toast = None;
                    }
                }
                self.broadcast(action)?;
            }

            // ── Admin session ─────────────────────────────────────────
            Action::AdminChanged(admin_id) => {
                self.admin_id = *admin_id;
                self.broadcast(action)?;
            }
            Action::OpenLogin => {
                if let Some(id) = self.admin_id {
                    self.notify(Toast::info(format!("Already logged in as admin #{id}")));
                } else {
                    self.login = Some(LoginDialog::new(self.default_username.clone()));
                }
            }
            Action::CloseLogin => self.login = None,
            Action::LoginSubmit { username, password } => {
                self.submit_login(username.clone(), Arc::clone(password));
            }
            Action::LoginFailed(message) => {
                if let Some(login) = self.login.as_mut() {
                    login.fail(message.clone());
                }
            }
            Action::Logout => self.logout(),

            // ── Booking pipeline ──────────────────────────────────────
            Action::OutboxPending(n) => self.outbox_pending = *n,

            Action::SelectRoom(category) => {
                self.hostel.selection().offer(*category);
                self.hostel.booking().take_selection();
                self.action_tx.send(Action::SwitchScreen(ScreenId::Book))?;
                self.broadcast(action)?;
            }
            Action::Search(criteria) => {
                let booking = self.hostel.booking().clone();
                let criteria = *criteria;
                tokio::spawn(async move {
                    let outcome = booking.apply_search(criteria).await;
                    debug!(?outcome, "availability search");
                });
            }
            Action::EditDraft(field, value) => {
                if let Err(e) = self.hostel.booking().apply_input(*field, value) {
                    self.notify(Toast::warning(e.to_string()));
                }
            }
            Action::SubmitBooking => {
                if !self.hostel.booking().is_submitting() {
                    self.submit_booking();
                    self.forward_to_active(action)?;
                }
            }
            Action::DismissConfirmation => self.hostel.booking().dismiss_confirmation(),

            Action::DraftUpdated(_)
            | Action::AvailabilityUpdated(_)
            | Action::ConfirmationUpdated(_)
            | Action::SubmitFinished(_)
            | Action::BookingsUpdated(_)
            | Action::CustomersUpdated(_)
            | Action::RoomsUpdated(_)
            | Action::BedsUpdated(_)
            | Action::PaymentsUpdated(_)
            | Action::NotificationsUpdated(_)
            | Action::MessagesUpdated(_) => self.broadcast(action)?,

            // ── Admin commands ────────────────────────────────────────
            Action::Refresh(collection) => self.refresh(*collection),
            Action::RequestCommand(command) => {
                if command.is_destructive() {
                    self.pending_confirm = Some(command.clone());
                } else {
                    self.execute_command(command.clone());
                }
            }
            Action::ConfirmYes => {
                if let Some(command) = self.pending_confirm.take() {
                    self.execute_command(command);
                }
            }
            Action::ConfirmNo => self.pending_confirm = None,

            Action::Notify(toast) => self.toast = Some((toast.clone(), Instant::now())),
        }

        Ok(())
    }

    // ── Async operations ──────────────────────────────────────────

    fn submit_login(&self, username: String, password: Arc<SecretString>) {
        let hostel = self.hostel.clone();
        let profile = self.profile_name.clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match hostel.login(&username, &password).await {
                Ok(admin_id) => {
                    let session = AdminSession {
                        admin_id,
                        username: username.clone(),
                        logged_in_at: Utc::now(),
                    };
                    if let Err(e) = hostel_config::save_session(&profile, &session) {
                        warn!(error = %e, "could not persist admin session");
                    }
                    let _ = tx.send(Action::CloseLogin);
                    let _ = tx.send(Action::Notify(Toast::success(format!(
                        "Logged in as {username}"
                    ))));
                }
                Err(e) => {
                    warn!(error = %e, "login failed");
                    let _ = tx.send(Action::LoginFailed(e.to_string()));
                }
            }
        });
    }

    fn logout(&mut self) {
        if self.admin_id.is_none() {
            self.notify(Toast::info("Not logged in"));
            return;
        }
        self.hostel.logout();
        if let Err(e) = hostel_config::clear_session(&self.profile_name) {
            warn!(error = %e, "could not clear admin session");
        }
        self.pending_confirm = None;
        self.notify(Toast::success("Logged out"));
    }

    fn submit_booking(&self) {
        let booking = self.hostel.booking().clone();
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match booking.submit().await {
                Ok(confirmation) => {
                    let _ = tx.send(Action::SubmitFinished(Ok(())));
                    let _ = tx.send(Action::Notify(Toast::success(format!(
                        "Booking #{} confirmed",
                        confirmation.booking_id
                    ))));
                }
                Err(e) => {
                    for action in submit_failed(&e) {
                        let _ = tx.send(action);
                    }
                }
            }
        });
    }

    fn refresh(&self, collection: Option<Collection>) {
        let console = match self.hostel.admin() {
            Ok(console) => console,
            Err(e) => {
                self.notify(Toast::warning(e.to_string()));
                return;
            }
        };
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let result = match collection {
                Some(collection) => console.refresh(collection).await,
                None => console.refresh_all().await,
            };
            if let Err(e) = result {
                warn!(error = %e, "refresh failed");
                let _ = tx.send(Action::Notify(Toast::error(format!("Refresh failed: {e}"))));
            }
        });
    }

    /// Spawn a command execution task. Sends a toast on completion.
    fn execute_command(&self, command: AdminCommand) {
        let console = match self.hostel.admin() {
            Ok(console) => console,
            Err(e) => {
                self.notify(Toast::error(e.to_string()));
                return;
            }
        };
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            let description = command.describe();
            match console.execute(command).await {
                Ok(_) => {
                    let _ = tx.send(Action::Notify(Toast::success(format!(
                        "Done: {description}"
                    ))));
                }
                Err(e) => {
                    warn!(error = %e, %description, "command failed");
                    let _ = tx.send(Action::Notify(Toast::error(format!("{e}"))));
                }
            }
        });
    }

    // ── Rendering ─────────────────────────────────────────────────

    fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        let layout = Layout::vertical([
            Constraint::Min(1),    // Screen content
            Constraint::Length(1), // Tab bar
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        if let Some(screen) = self.screens.get(&self.active_screen) {
            screen.render(frame, layout[0]);
        }
        self.render_tab_bar(frame, layout[1]);
        self.render_status_bar(frame, layout[2]);

        // Overlays, last drawn is topmost.
        if let Some(login) = &self.login {
            login.render(frame, layout[0]);
        }
        if let Some((toast, _)) = &self.toast {
            Self::render_toast(frame, area, toast);
        }
        if let Some(command) = &self.pending_confirm {
            Self::render_confirm_dialog(frame, area, command);
        }
        if self.help_visible {
            Self::render_help_overlay(frame, area);
        }
    }

    fn render_tab_bar(&self, frame: &mut Frame, area: Rect) {
        let titles: Vec<Line> = ScreenId::ALL
            .iter()
            .map(|&id| {
                let style = if id == self.active_screen {
                    theme::tab_active()
                } else if id.requires_admin() && self.admin_id.is_none() {
                    theme::key_hint()
                } else {
                    theme::tab_inactive()
                };
                Line::from(Span::styled(
                    format!(" {} {} ", id.number(), id.label()),
                    style,
                ))
            })
            .collect();

        let tabs = Tabs::new(titles)
            .divider(Span::styled(" ", theme::key_hint()))
            .select(
                ScreenId::ALL
                    .iter()
                    .position(|&s| s == self.active_screen)
                    .unwrap_or(0),
            );

        frame.render_widget(tabs, area);
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let session = match self.admin_id {
            Some(id) => Span::styled(
                format!("● admin #{id}"),
                Style::default().fg(theme::SUCCESS_GREEN),
            ),
            None => Span::styled("○ guest", Style::default().fg(theme::DIM_WHITE)),
        };
        let mut spans = vec![
            Span::raw(" "),
            session,
            Span::styled(format!(" ({})", self.profile_name), theme::key_hint()),
        ];
        if self.outbox_pending > 0 {
            spans.push(Span::styled(
                format!("  ⇡ {} SMS pending", self.outbox_pending),
                Style::default().fg(theme::ELECTRIC_YELLOW),
            ));
        }
        let session_hint = if self.admin_id.is_some() {
            "O logout"
        } else {
            "L login"
        };
        spans.push(Span::styled(
            format!(" │ {session_hint}  ? help  q quit"),
            theme::key_hint(),
        ));

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }

    fn render_help_overlay(frame: &mut Frame, area: Rect) {
        let help_width = 60u16.min(area.width.saturating_sub(4));
        let help_height = 22u16.min(area.height.saturating_sub(4));

        let x = (area.width.saturating_sub(help_width)) / 2;
        let y = (area.height.saturating_sub(help_height)) / 2;
        let help_area = Rect::new(area.x + x, area.y + y, help_width, help_height);

        frame.render_widget(Clear, help_area);
        let block = Block::default()
            .title(" Keyboard Shortcuts ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(theme::border_focused())
            .style(Style::default().bg(theme::BG_DARK));

        let inner = block.inner(help_area);
        frame.render_widget(block, help_area);

        let heading = |text: &'static str| {
            Line::from(Span::styled(text, Style::default().fg(theme::NEON_CYAN)))
        };
        let entry = |keys: &'static str, what: &'static str| {
            Line::from(vec![
                Span::styled(format!("  {keys:<10}"), theme::key_hint_key()),
                Span::styled(what, theme::key_hint()),
            ])
        };

        let help_text = vec![
            Line::from(""),
            heading("  Navigation"),
            entry("1-4", "Jump to screen"),
            entry("Tab", "Next screen"),
            entry("j/k ↑/↓", "Move up/down"),
            entry("h/l", "Switch table / cycle choice"),
            entry("Esc", "Back / close"),
            Line::from(""),
            heading("  Booking"),
            entry("Enter", "Edit field / book room"),
            entry("Ctrl+S", "Submit booking"),
            Line::from(""),
            heading("  Front desk"),
            entry("r / R", "Refresh table / all"),
            entry("c d", "Cancel / delete"),
            entry("f u", "Status filter / unread only"),
            Line::from(""),
            heading("  Global"),
            entry("L O", "Log in / log out"),
            entry("? q", "This help / quit"),
            Line::from(""),
            Line::from(Span::styled(
                "                         Esc or ? to close",
                theme::key_hint(),
            )),
        ];

        frame.render_widget(Paragraph::new(help_text), inner);
    }

    fn render_confirm_dialog(frame: &mut Frame, area: Rect, command: &AdminCommand) {
        let width = 50u16.min(area.width.saturating_sub(4));
        let height = 5u16;

        let x = (area.width.saturating_sub(width)) / 2;
        let y = (area.height.saturating_sub(height)) / 2;
        let dialog_area = Rect::new(area.x + x, area.y + y, width, height);

        frame.render_widget(Clear, dialog_area);
        let block = Block::default()
            .title(" Confirm ")
            .title_style(theme::title_style())
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(theme::ELECTRIC_YELLOW))
            .style(Style::default().bg(theme::BG_DARK));

        let inner = block.inner(dialog_area);
        frame.render_widget(block, dialog_area);

        let text = vec![
            Line::from(Span::styled(
                format!("  {}?", capitalize(&command.describe())),
                Style::default().fg(theme::DIM_WHITE),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("  y ", theme::key_hint_key()),
                Span::styled("confirm    ", theme::key_hint()),
                Span::styled("n ", theme::key_hint_key()),
                Span::styled("cancel", theme::key_hint()),
            ]),
        ];
        frame.render_widget(Paragraph::new(text), inner);
    }

    /// Toast in the bottom-right corner, above the status bar.
    fn render_toast(frame: &mut Frame, area: Rect, toast: &Toast) {
        let msg_len = u16::try_from(toast.message.chars().count()).unwrap_or(u16::MAX);
        let width = msg_len
            .saturating_add(6)
            .clamp(20, 60)
            .min(area.width);
        let height = 3u16;

        let x = area.width.saturating_sub(width + 1);
        let y = area.height.saturating_sub(height + 2);
        let toast_area = Rect::new(area.x + x, area.y + y, width, height);

        let (border_color, icon) = match toast.level {
            ToastLevel::Success => (theme::SUCCESS_GREEN, "✓"),
            ToastLevel::Error => (theme::ERROR_RED, "✗"),
            ToastLevel::Warning => (theme::ELECTRIC_YELLOW, "!"),
            ToastLevel::Info => (theme::NEON_CYAN, "·"),
        };

        frame.render_widget(Clear, toast_area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .style(Style::default().bg(theme::BG_DARK));

        let inner = block.inner(toast_area);
        frame.render_widget(block, toast_area);

        let line = Line::from(vec![
            Span::styled(format!(" {icon} "), Style::default().fg(border_color)),
            Span::styled(toast.message.as_str(), Style::default().fg(theme::DIM_WHITE)),
        ]);
        frame.render_widget(Paragraph::new(line), inner);
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Actions for a failed submit. A duplicate submit yields nothing: the
/// one already running still owns the spinner.
fn submit_failed(err: &CoreError) -> Vec<Action> {
    if matches!(err, CoreError::SubmissionInFlight) {
        debug!("ignoring submit while another is in flight");
        return Vec::new();
    }
    let message = err.to_string();
    vec![
        Action::SubmitFinished(Err(message.clone())),
        Action::Notify(Toast::error(message)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirm_prompt_is_sentence_cased() {
        let cmd = AdminCommand::DeleteBooking { booking_id: 5 };
        assert_eq!(capitalize(&cmd.describe()), "Delete booking 5");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn duplicate_submit_leaves_spinner_alone() {
        assert!(submit_failed(&CoreError::SubmissionInFlight).is_empty());

        let actions = submit_failed(&CoreError::ValidationFailed {
            message: "email is required".into(),
        });
        assert!(matches!(
            actions.as_slice(),
            [Action::SubmitFinished(Err(_)), Action::Notify(_)]
        ));
    }
}
