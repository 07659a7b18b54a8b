//! Labeled text inputs and inline selectors for forms.
//!
//! Text editing state lives in [`tui_input::Input`]; these helpers only
//! translate keys and draw.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use tui_input::{Input, InputRequest};

use crate::theme;

/// Rows taken by one field: label line plus a three-row box.
pub const FIELD_HEIGHT: u16 = 4;

/// Map an editing key to an input request. Keys that do not edit text
/// (Tab, Enter, Esc, arrows up/down) return `None` so the form can use them.
pub fn input_request(key: KeyEvent) -> Option<InputRequest> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('u') if ctrl => Some(InputRequest::DeleteLine),
        KeyCode::Char('w') if ctrl => Some(InputRequest::DeletePrevWord),
        KeyCode::Char('a') if ctrl => Some(InputRequest::GoToStart),
        KeyCode::Char('e') if ctrl => Some(InputRequest::GoToEnd),
        KeyCode::Char(_) if ctrl => None,
        KeyCode::Char(c) => Some(InputRequest::InsertChar(c)),
        KeyCode::Backspace => Some(InputRequest::DeletePrevChar),
        KeyCode::Delete => Some(InputRequest::DeleteNextChar),
        KeyCode::Left => Some(InputRequest::GoToPrevChar),
        KeyCode::Right => Some(InputRequest::GoToNextChar),
        KeyCode::Home => Some(InputRequest::GoToStart),
        KeyCode::End => Some(InputRequest::GoToEnd),
        _ => None,
    }
}

/// Feed a key to `input`. Returns true when the value changed.
pub fn edit(input: &mut Input, key: KeyEvent) -> bool {
    let Some(request) = input_request(key) else {
        return false;
    };
    input
        .handle(request)
        .is_some_and(|changed| changed.value)
}

fn box_block(active: bool) -> Block<'static> {
    let border = if active {
        theme::border_focused()
    } else {
        theme::border_default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(border)
}

fn split_field(area: Rect) -> Option<(Rect, Rect)> {
    if area.height < 3 {
        return None;
    }
    let label = Rect::new(area.x, area.y, area.width, 1);
    let boxed = Rect::new(area.x, area.y + 1, area.width, 3.min(area.height - 1));
    Some((label, boxed))
}

/// Draw a labeled input. The terminal cursor is placed in the active field.
/// Masked fields show one bullet per character.
pub fn render_input(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    input: &Input,
    active: bool,
    masked: bool,
) {
    let Some((label_area, box_area)) = split_field(area) else {
        return;
    };
    frame.render_widget(
        Paragraph::new(Span::styled(label.to_owned(), theme::field_label(active))),
        label_area,
    );

    let block = box_block(active);
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let width = usize::from(inner.width.max(1));
    let scroll = input.visual_scroll(width.saturating_sub(1));
    let shown = if masked {
        "\u{2022}".repeat(input.value().chars().count())
    } else {
        input.value().to_owned()
    };
    let offset = u16::try_from(scroll).unwrap_or(u16::MAX);
    frame.render_widget(
        Paragraph::new(shown)
            .style(Style::default().fg(theme::NEON_CYAN))
            .scroll((0, offset)),
        inner,
    );

    if active {
        let col = input.visual_cursor().saturating_sub(scroll);
        let col = u16::try_from(col).unwrap_or(inner.width);
        frame.set_cursor_position(Position::new(inner.x + col.min(inner.width), inner.y));
    }
}

/// Draw a labeled `◂ value ▸` selector cycled with left/right.
pub fn render_selector(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: Span<'static>,
    active: bool,
) {
    let Some((label_area, box_area)) = split_field(area) else {
        return;
    };
    frame.render_widget(
        Paragraph::new(Span::styled(label.to_owned(), theme::field_label(active))),
        label_area,
    );

    let block = box_block(active);
    let inner = block.inner(box_area);
    frame.render_widget(block, box_area);

    let arrow = if active {
        Style::default().fg(theme::ELECTRIC_PURPLE)
    } else {
        Style::default().fg(theme::BORDER_GRAY)
    };
    let value = if active {
        value.patch_style(Style::default().add_modifier(Modifier::BOLD))
    } else {
        value
    };
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(" \u{25C2} ", arrow),
            value,
            Span::styled(" \u{25B8}", arrow),
        ])),
        inner,
    );
}
