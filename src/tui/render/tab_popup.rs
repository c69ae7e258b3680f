use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use super::input_line::edit_spans;
use crate::tui::app::App;

/// Render the "Create New Tab" popup over the main screen
pub fn render_tab_popup(frame: &mut Frame, app: &App, area: Rect) {
    let bg = app.theme.background;
    let dim = app.theme.dim;

    // Sizing: 50% width, min 30, max 50
    let target_w = (area.width as f32 * 0.5) as u16;
    let inner_w = target_w.clamp(30, 50).min(area.width.saturating_sub(2));
    let popup_w = inner_w + 2;
    let popup_h = 6.min(area.height);

    let mut lines: Vec<Line> = Vec::new();
    lines.push(Line::from(""));

    let mut input = vec![Span::styled(" ", Style::default().bg(bg))];
    input.extend(edit_spans(app));
    lines.push(Line::from(input));
    lines.push(Line::from(""));

    let hint = "Enter create  Esc cancel";
    let pad = (inner_w as usize).saturating_sub(hint.chars().count()) / 2;
    lines.push(Line::from(vec![
        Span::styled(" ".repeat(pad), Style::default().bg(bg)),
        Span::styled(hint, Style::default().fg(dim).bg(bg)),
    ]));

    let x = area.x + area.width.saturating_sub(popup_w) / 2;
    let y = area.y + area.height.saturating_sub(popup_h) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let title_style = Style::default()
        .fg(app.theme.highlight)
        .bg(bg)
        .add_modifier(Modifier::BOLD);
    let block = Block::default()
        .title(Span::styled(" Create New Tab ", title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(app.theme.selection_border).bg(bg))
        .style(Style::default().bg(bg));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(Style::default().bg(bg));
    frame.render_widget(paragraph, popup_area);
}
