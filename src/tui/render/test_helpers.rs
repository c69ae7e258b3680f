use std::path::Path;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;
use tempfile::TempDir;

use crate::model::{Tab, Task, TodoState, UiConfig};
use crate::ops::store::Store;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Tab fixtures: (name, [(title, done)])
pub type TabSpec<'a> = (&'a str, &'a [(&'a str, bool)]);

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Build a state with tabs `tab-1..` and tasks `T-001..`, first tab active.
pub fn state_with(tabs: &[TabSpec]) -> TodoState {
    let tabs: Vec<Tab> = tabs
        .iter()
        .enumerate()
        .map(|(i, (name, tasks))| {
            let mut tab = Tab::new(format!("tab-{}", i + 1), name.to_string());
            for (j, (title, done)) in tasks.iter().enumerate() {
                let mut task = Task::new(format!("T-{:03}", j + 1), title.to_string());
                task.done = *done;
                tab.tasks.push(task);
            }
            tab
        })
        .collect();
    let active_tab_id = tabs.first().map(|t| t.id.clone());
    TodoState {
        tabs,
        active_tab_id,
    }
}

/// A store that never touches the disk unless mutated
pub fn store_with(tabs: &[TabSpec]) -> Store {
    Store::with_state(
        Path::new("/nonexistent-terminal-todo/data.json"),
        state_with(tabs),
    )
}

pub fn app_with(tabs: &[TabSpec]) -> App {
    App::new(store_with(tabs), &UiConfig::default(), None)
}

/// An app whose store writes through to `data.json` inside `dir`
pub fn app_in(dir: &TempDir, tabs: &[TabSpec]) -> App {
    let mut store = Store::with_state(&dir.path().join("data.json"), state_with(tabs));
    store.save().unwrap();
    App::new(store, &UiConfig::default(), None)
}
