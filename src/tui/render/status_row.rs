use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::{App, Mode};
use crate::tui::keymap::BINDINGS;
use crate::util::unicode;

/// Render the status row (bottom of screen): a transient message, or key
/// hints for the current mode, with an "unsaved" marker on the right.
pub fn render_status_row(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;

    let mut spans: Vec<Span> = Vec::new();
    if let Some(ref message) = app.status_message {
        let color = if app.status_is_error {
            app.theme.red
        } else {
            app.theme.text
        };
        spans.push(Span::styled(
            format!(" {}", message),
            Style::default().fg(color).bg(bg),
        ));
    } else if app.show_key_hints {
        let key_style = Style::default().fg(app.theme.highlight).bg(bg);
        let desc_style = Style::default().fg(app.theme.dim).bg(bg);
        for (key, label) in hints(app.mode) {
            spans.push(Span::styled(format!(" {}", key), key_style));
            spans.push(Span::styled(format!(" {} ", label), desc_style));
        }
    }

    if app.store.is_unsaved() {
        let marker = "\u{25CF} unsaved ";
        let content_width: usize = spans
            .iter()
            .map(|s| unicode::display_width(&s.content))
            .sum();
        let marker_width = unicode::display_width(marker);
        if content_width + marker_width < width {
            let padding = width - content_width - marker_width;
            spans.push(Span::styled(" ".repeat(padding), Style::default().bg(bg)));
        }
        spans.push(Span::styled(marker, Style::default().fg(app.theme.red).bg(bg)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

/// (key, label) pairs to show for a mode
fn hints(mode: Mode) -> Vec<(&'static str, &'static str)> {
    match mode {
        Mode::Navigate => BINDINGS
            .iter()
            .filter(|b| b.hint)
            .map(|b| (b.keys, b.label))
            .collect(),
        Mode::AddTask => vec![("enter", "Add"), ("esc", "Done")],
        Mode::NewTab => vec![("enter", "Create"), ("esc", "Cancel")],
        Mode::Help => vec![("esc", "Close")],
    }
}
