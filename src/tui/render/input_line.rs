use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::app::{App, Mode};

const PLACEHOLDER: &str = "Enter a new todo item...";

/// Spans for an edit buffer with a block cursor at the edit position
pub(super) fn edit_spans(app: &App) -> Vec<Span<'static>> {
    let bg = app.theme.background;
    let text_style = Style::default().fg(app.theme.text_bright).bg(bg);
    let cursor = app.edit_cursor.min(app.edit_buffer.len());
    let (before, after) = app.edit_buffer.split_at(cursor);
    vec![
        Span::styled(before.to_string(), text_style),
        Span::styled("\u{258C}", Style::default().fg(app.theme.highlight).bg(bg)),
        Span::styled(after.to_string(), text_style),
    ]
}

/// Render the task input: a bordered box, or a bare line in compact mode
pub fn render_input_line(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let editing = app.mode == Mode::AddTask;

    let mut spans = vec![Span::styled(" ", Style::default().bg(bg))];
    if editing {
        spans.extend(edit_spans(app));
    } else {
        spans.push(Span::styled(
            PLACEHOLDER,
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }
    let line = Line::from(spans);

    let mut paragraph = Paragraph::new(line).style(Style::default().bg(bg));
    if !app.compact {
        let border_color = if editing {
            app.theme.selection_border
        } else {
            app.theme.dim
        };
        paragraph = paragraph.block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border_color).bg(bg)),
        );
    }
    frame.render_widget(paragraph, area);
}
