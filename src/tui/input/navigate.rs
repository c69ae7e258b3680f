use crossterm::event::{KeyCode, KeyEvent};

use crate::tui::app::{App, Mode};
use crate::tui::keymap::{self, Command};

pub(super) fn handle_navigate(app: &mut App, key: KeyEvent) {
    // Transient messages last until the next key
    app.clear_status();

    if let Some(command) = keymap::command_for(key) {
        execute(app, command);
    }
}

pub(super) fn handle_help(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('?') | KeyCode::Esc | KeyCode::Char('q') => app.mode = Mode::Navigate,
        _ => {
            if keymap::command_for(key) == Some(Command::Quit) {
                app.should_quit = true;
            }
        }
    }
}

/// Run one command against the app and its store
pub fn execute(app: &mut App, command: Command) {
    match command {
        Command::AddTask => {
            if app.active_tab().is_some() {
                app.begin_edit(Mode::AddTask);
            } else {
                app.status_message = Some("no tabs yet, press t to create one".into());
                app.status_is_error = true;
            }
        }
        Command::NewTab => app.begin_edit(Mode::NewTab),
        Command::RemoveTab => remove_active_tab(app),
        Command::DeleteTask => delete_cursor_task(app),
        Command::ToggleTask => toggle_cursor_task(app),
        Command::PrevTab => cycle_tab(app, -1),
        Command::NextTab => cycle_tab(app, 1),
        Command::CursorUp => {
            app.task_cursor = app.task_cursor.saturating_sub(1);
        }
        Command::CursorDown => {
            app.task_cursor = app.task_cursor.saturating_add(1);
            app.clamp_cursor();
        }
        Command::ToggleTheme => app.toggle_theme(),
        Command::ToggleCompact => app.toggle_compact(),
        Command::Help => app.mode = Mode::Help,
        Command::Dismiss => {
            app.clear_status();
            app.mode = Mode::Navigate;
        }
        Command::Quit => app.should_quit = true,
    }
}

fn remove_active_tab(app: &mut App) {
    let (tab_id, name) = match app.active_tab() {
        Some(tab) => (tab.id.clone(), tab.name.clone()),
        None => return,
    };
    match app.store.remove_tab(&tab_id) {
        Ok(()) => app.set_status(format!("removed tab \"{}\"", name)),
        Err(e) => app.report_error(&e),
    }
    app.task_cursor = 0;
    app.task_scroll = 0;
}

fn delete_cursor_task(app: &mut App) {
    let Some((tab_id, task_id)) = app.cursor_task() else {
        return;
    };
    if let Err(e) = app.store.remove_task(&tab_id, &task_id) {
        app.report_error(&e);
    }
    app.clamp_cursor();
}

fn toggle_cursor_task(app: &mut App) {
    let Some((tab_id, task_id)) = app.cursor_task() else {
        return;
    };
    if let Err(e) = app.store.toggle_task(&tab_id, &task_id) {
        app.report_error(&e);
    }
    app.clamp_cursor();
}

/// Focus the tab `delta` places away, wrapping at both ends
fn cycle_tab(app: &mut App, delta: isize) {
    let state = app.store.snapshot();
    let count = state.tabs.len();
    if count < 2 {
        return;
    }
    let current = state.active_index().unwrap_or(0) as isize;
    let next = (current + delta).rem_euclid(count as isize) as usize;
    let next_id = state.tabs[next].id.clone();

    if let Err(e) = app.store.set_active_tab(&next_id) {
        app.report_error(&e);
    }
    app.task_cursor = 0;
    app.task_scroll = 0;
}
