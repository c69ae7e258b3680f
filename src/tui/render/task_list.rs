use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::model::Task;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Render the focused tab's tasks: pending under "To-Do", done under
/// "Completed". Compact mode drops the headers and spacing.
pub fn render_task_list(frame: &mut Frame, app: &mut App, area: Rect) {
    let bg = app.theme.background;
    let width = area.width as usize;
    let height = area.height as usize;

    let Some(tab) = app.active_tab() else {
        let hint = Line::from(Span::styled(
            " No tabs. Press t to create one.",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        frame.render_widget(Paragraph::new(hint).style(Style::default().bg(bg)), area);
        return;
    };

    if tab.tasks.is_empty() {
        let hint = Line::from(Span::styled(
            " Nothing here yet. Press a to add a task.",
            Style::default().fg(app.theme.dim).bg(bg),
        ));
        frame.render_widget(Paragraph::new(hint).style(Style::default().bg(bg)), area);
        return;
    }

    // Cursor is only drawn while navigating the list
    let show_cursor = app.mode == Mode::Navigate;
    let (pending_count, done_count) = tab.counts();
    let mut lines: Vec<Line> = Vec::new();
    let mut cursor_row = 0;

    for (i, task) in tab.display_order().into_iter().enumerate() {
        if !app.compact {
            if i == 0 {
                lines.push(section_header(app, "To-Do", pending_count, false));
            }
            if i == pending_count {
                if pending_count > 0 {
                    lines.push(Line::from(""));
                }
                lines.push(section_header(app, "Completed", done_count, true));
            }
        }
        let selected = show_cursor && i == app.task_cursor;
        if selected {
            cursor_row = lines.len();
        }
        lines.push(task_line(app, task, selected, width));
    }

    // Keep the cursor row on screen
    if cursor_row < app.task_scroll {
        app.task_scroll = cursor_row;
    } else if height > 0 && cursor_row >= app.task_scroll + height {
        app.task_scroll = cursor_row + 1 - height;
    }
    app.task_scroll = app.task_scroll.min(lines.len().saturating_sub(1));

    let visible: Vec<Line> = lines.into_iter().skip(app.task_scroll).collect();
    let paragraph = Paragraph::new(visible).style(Style::default().bg(bg));
    frame.render_widget(paragraph, area);
}

fn section_header(app: &App, label: &str, count: usize, done: bool) -> Line<'static> {
    let color = if done { app.theme.green } else { app.theme.purple };
    Line::from(vec![
        Span::styled(
            format!(" {}", label),
            Style::default()
                .fg(color)
                .bg(app.theme.background)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" ({})", count),
            Style::default().fg(app.theme.dim).bg(app.theme.background),
        ),
    ])
}

fn task_line(app: &App, task: &Task, selected: bool, width: usize) -> Line<'static> {
    let bg = if selected {
        app.theme.selection_bg
    } else {
        app.theme.background
    };
    let border = if selected { "\u{258C}" } else { " " };
    let checkbox = format!(" {} ", task.checkbox());

    let prefix_width = 1 + unicode::display_width(&checkbox);
    let title = unicode::truncate_to_width(&task.title, width.saturating_sub(prefix_width + 1));

    let mut title_style = Style::default().fg(app.theme.text).bg(bg);
    let mut check_style = Style::default().fg(app.theme.text).bg(bg);
    if task.done {
        title_style = title_style
            .fg(app.theme.dim)
            .add_modifier(Modifier::CROSSED_OUT);
        check_style = check_style.fg(app.theme.green);
    }
    if selected {
        title_style = title_style.fg(app.theme.text_bright);
    }

    let mut spans = vec![
        Span::styled(
            border,
            Style::default().fg(app.theme.selection_border).bg(bg),
        ),
        Span::styled(checkbox, check_style),
        Span::styled(title.clone(), title_style),
    ];

    // Selected row is filled to the full width
    if selected {
        let used = prefix_width + unicode::display_width(&title);
        if used < width {
            spans.push(Span::styled(" ".repeat(width - used), Style::default().bg(bg)));
        }
    }
    Line::from(spans)
}
