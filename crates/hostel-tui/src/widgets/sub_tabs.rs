//! Horizontal sub-tab bar used inside a screen (front-desk tables,
//! inbox folders).

use ratatui::style::Modifier;
use ratatui::text::{Line, Span};

use crate::theme;

/// One line of tab labels with the active one bracketed and highlighted.
/// A label may carry a count badge, rendered as `Label (n)`.
pub fn render_sub_tabs(labels: &[(&str, Option<usize>)], active_index: usize) -> Line<'static> {
    let mut spans = Vec::with_capacity(labels.len() * 2);

    for (i, (label, badge)) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  ", theme::key_hint()));
        }

        let text = match badge {
            Some(n) if *n > 0 => format!("{label} ({n})"),
            _ => (*label).to_owned(),
        };

        if i == active_index {
            spans.push(Span::styled(
                format!("[{text}]"),
                theme::tab_active().add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(text, theme::tab_inactive()));
        }
    }

    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn active_tab_is_bracketed_and_badges_hide_at_zero() {
        let line = render_sub_tabs(&[("Notifications", Some(3)), ("Messages", Some(0))], 0);
        assert_eq!(plain(&line), "[Notifications (3)]  Messages");
    }
}
