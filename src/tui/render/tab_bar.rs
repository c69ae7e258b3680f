use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::tui::app::App;
use crate::util::unicode;

/// Render the tab bar: one tab per list, with a separator line below
pub fn render_tab_bar(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // tabs
            Constraint::Length(1), // separator
        ])
        .split(area);

    let sep_cols = render_tabs(frame, app, chunks[0]);
    render_separator(frame, app, chunks[1], &sep_cols);
}

/// Render tabs and return the column positions of each separator character.
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) -> Vec<usize> {
    let bg = app.theme.background;
    let bg_style = Style::default().bg(bg);
    let sep = Span::styled("\u{2502}", Style::default().fg(app.theme.dim).bg(bg));

    let mut spans: Vec<Span> = Vec::new();
    let mut sep_cols: Vec<usize> = Vec::new();

    // Leading icon
    spans.push(Span::styled(" ", bg_style));
    spans.push(Span::styled(
        "\u{25B6}",
        Style::default().fg(app.theme.purple).bg(bg),
    ));
    spans.push(Span::styled(" ", bg_style));

    let state = app.store.snapshot();
    if state.tabs.is_empty() {
        spans.push(Span::styled(
            " no tabs ",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
    }

    let active = state.active_tab_id.as_deref();
    let labels: Vec<(String, usize)> = state
        .tabs
        .iter()
        .map(|tab| {
            let name = unicode::truncate_to_width(&tab.name, MAX_NAME_WIDTH);
            (name, tab.counts().0)
        })
        .collect();
    let widths: Vec<usize> = labels.iter().map(|(n, p)| tab_width(n, *p)).collect();
    let active_idx = state.active_index().unwrap_or(0);
    let avail = (area.width as usize).saturating_sub(spans_width(&spans));
    let first = first_visible(&widths, active_idx, avail);

    for (tab, (name, pending)) in state.tabs.iter().zip(&labels).skip(first) {
        let is_current = active == Some(tab.id.as_str());
        let style = tab_style(app, is_current);
        spans.push(Span::styled(format!(" {} ", name), style));
        if *pending > 0 {
            let count_bg = if is_current { app.theme.selection_bg } else { bg };
            spans.push(Span::styled(
                format!("{} ", pending),
                Style::default().fg(app.theme.dim).bg(count_bg),
            ));
        }
        sep_cols.push(spans_width(&spans));
        spans.push(sep.clone());
    }

    let line = Line::from(spans);
    let tabs = Paragraph::new(line).style(bg_style);
    frame.render_widget(tabs, area);
    sep_cols
}

fn render_separator(frame: &mut Frame, app: &App, area: Rect, sep_cols: &[usize]) {
    let width = area.width as usize;
    let line: String = (0..width)
        .map(|col| {
            if sep_cols.contains(&col) {
                '\u{2534}'
            } else {
                '\u{2500}'
            }
        })
        .collect();
    let sep_widget =
        Paragraph::new(line).style(Style::default().fg(app.theme.dim).bg(app.theme.background));
    frame.render_widget(sep_widget, area);
}

/// Longest tab name shown before truncating with `…`
const MAX_NAME_WIDTH: usize = 24;

/// Cells one tab takes: padded name, pending count, separator
fn tab_width(name: &str, pending: usize) -> usize {
    let count = if pending > 0 {
        pending.to_string().len() + 1
    } else {
        0
    };
    unicode::display_width(name) + 2 + count + 1
}

/// Index of the first tab to draw so the active one ends inside `avail`
fn first_visible(widths: &[usize], active: usize, avail: usize) -> usize {
    let mut first = 0;
    let end = active.min(widths.len().saturating_sub(1));
    while first < end && widths[first..=end].iter().sum::<usize>() > avail {
        first += 1;
    }
    first
}

/// Style for a tab: highlighted if current, normal otherwise
fn tab_style(app: &App, is_current: bool) -> Style {
    if is_current {
        Style::default()
            .fg(app.theme.text_bright)
            .bg(app.theme.selection_bg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.text).bg(app.theme.background)
    }
}

fn spans_width(spans: &[Span]) -> usize {
    spans
        .iter()
        .map(|s| unicode::display_width(&s.content))
        .sum()
}
