use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::state::{UiState, write_ui_state};
use crate::model::{Tab, Task, ThemeKind, UiConfig};
use crate::ops::store::{ErrorKind, Store, StoreError};

use super::input;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a new task title in the input line
    AddTask,
    /// Typing a name in the new-tab popup
    NewTab,
    Help,
}

/// Main application state
pub struct App {
    pub store: Store,
    pub mode: Mode,
    pub should_quit: bool,
    pub theme_kind: ThemeKind,
    pub theme: Theme,
    pub compact: bool,
    pub show_key_hints: bool,
    color_overrides: HashMap<String, String>,
    /// Index into the active tab's display order
    pub task_cursor: usize,
    /// First visible row of the task list
    pub task_scroll: usize,
    /// Text being typed in AddTask / NewTab mode
    pub edit_buffer: String,
    /// Byte offset of the edit cursor
    pub edit_cursor: usize,
    /// Transient message for the status row
    pub status_message: Option<String>,
    pub status_is_error: bool,
    /// Where theme/compact toggles are remembered (None in tests)
    pub state_path: Option<PathBuf>,
}

impl App {
    /// Build the app around an owned store. Saved toggles win over config.
    pub fn new(store: Store, ui: &UiConfig, saved: Option<UiState>) -> Self {
        let theme_kind = saved.map_or(ui.theme, |s| s.theme);
        let compact = saved.map_or(ui.compact, |s| s.compact);

        App {
            store,
            mode: Mode::Navigate,
            should_quit: false,
            theme_kind,
            theme: Theme::from_config(theme_kind, &ui.colors),
            compact,
            show_key_hints: ui.show_key_hints,
            color_overrides: ui.colors.clone(),
            task_cursor: 0,
            task_scroll: 0,
            edit_buffer: String::new(),
            edit_cursor: 0,
            status_message: None,
            status_is_error: false,
            state_path: None,
        }
    }

    /// The focused tab
    pub fn active_tab(&self) -> Option<&Tab> {
        self.store.snapshot().active_tab()
    }

    /// Tasks of the focused tab in display order (pending, then completed)
    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.active_tab()
            .map(|tab| tab.display_order())
            .unwrap_or_default()
    }

    /// Ids of the focused tab and the task under the cursor
    pub fn cursor_task(&self) -> Option<(String, String)> {
        let tab = self.active_tab()?;
        let task = tab.display_order().get(self.task_cursor).copied()?;
        Some((tab.id.clone(), task.id.clone()))
    }

    /// Keep the cursor inside the visible list
    pub fn clamp_cursor(&mut self) {
        let count = self.visible_tasks().len();
        self.task_cursor = self.task_cursor.min(count.saturating_sub(1));
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = false;
    }

    /// Show a store error in the status row. Save failures say plainly that
    /// the change only lives in memory.
    pub fn report_error(&mut self, err: &StoreError) {
        let message = match err.kind() {
            ErrorKind::IoFailure => format!("not saved, changes may be lost on restart: {}", err),
            _ => err.to_string(),
        };
        log::warn!("{}", message);
        self.status_message = Some(message);
        self.status_is_error = true;
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
        self.status_is_error = false;
    }

    pub fn toggle_theme(&mut self) {
        self.theme_kind = self.theme_kind.toggled();
        self.theme = Theme::from_config(self.theme_kind, &self.color_overrides);
        self.save_ui_state();
    }

    pub fn toggle_compact(&mut self) {
        self.compact = !self.compact;
        self.save_ui_state();
    }

    /// Start typing into the edit buffer
    pub fn begin_edit(&mut self, mode: Mode) {
        self.edit_buffer.clear();
        self.edit_cursor = 0;
        self.mode = mode;
    }

    /// Leave AddTask/NewTab mode, discarding the buffer
    pub fn end_edit(&mut self) {
        self.edit_buffer.clear();
        self.edit_cursor = 0;
        self.mode = Mode::Navigate;
    }

    pub fn ui_state(&self) -> UiState {
        UiState {
            theme: self.theme_kind,
            compact: self.compact,
        }
    }

    /// Remember the toggles for next launch
    pub fn save_ui_state(&self) {
        if let Some(path) = &self.state_path
            && let Err(e) = write_ui_state(path, &self.ui_state())
        {
            log::warn!("could not write {}: {}", path.display(), e);
        }
    }
}

/// Run the TUI application
pub fn run(
    store: Store,
    ui: &UiConfig,
    saved: Option<UiState>,
    state_path: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(store, ui, saved);
    app.state_path = Some(state_path);
    log::info!("starting TUI with data file {}", app.store.path().display());

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);
    let flushed = flush_on_exit(&mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result?;
    flushed?;
    log::info!("bye");
    Ok(())
}

/// Persist the UI toggles and retry a data write that failed earlier. Runs
/// whether or not the event loop ended with an error.
fn flush_on_exit(app: &mut App) -> Result<(), StoreError> {
    app.save_ui_state();
    if app.store.is_unsaved() {
        log::info!("retrying unsaved changes before exit");
        app.store.save()?;
    }
    Ok(())
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            input::handle_key(app, key);
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}
