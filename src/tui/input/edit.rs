use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::ops::store::ErrorKind;
use crate::tui::app::{App, Mode};
use crate::util::unicode;

/// Line editing for the task input and the new-tab popup
pub(super) fn handle_edit(app: &mut App, key: KeyEvent) {
    match (key.modifiers, key.code) {
        (_, KeyCode::Esc) => app.end_edit(),
        (_, KeyCode::Enter) => submit(app),

        (m, KeyCode::Backspace)
            if m.contains(KeyModifiers::ALT) || m.contains(KeyModifiers::CONTROL) =>
        {
            delete_word(app);
        }
        (m, KeyCode::Char('w')) if m.contains(KeyModifiers::CONTROL) => delete_word(app),
        (m, KeyCode::Char('u')) if m.contains(KeyModifiers::CONTROL) => {
            app.edit_buffer.drain(..app.edit_cursor);
            app.edit_cursor = 0;
        }
        (_, KeyCode::Backspace) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor)
            {
                app.edit_buffer.drain(prev..app.edit_cursor);
                app.edit_cursor = prev;
            }
        }
        (_, KeyCode::Delete) => {
            if let Some(next) = unicode::next_grapheme_boundary(&app.edit_buffer, app.edit_cursor)
            {
                app.edit_buffer.drain(app.edit_cursor..next);
            }
        }
        (_, KeyCode::Left) => {
            if let Some(prev) = unicode::prev_grapheme_boundary(&app.edit_buffer, app.edit_cursor)
            {
                app.edit_cursor = prev;
            }
        }
        (_, KeyCode::Right) => {
            if let Some(next) = unicode::next_grapheme_boundary(&app.edit_buffer, app.edit_cursor)
            {
                app.edit_cursor = next;
            }
        }
        (_, KeyCode::Home) => app.edit_cursor = 0,
        (m, KeyCode::Char('a')) if m.contains(KeyModifiers::CONTROL) => app.edit_cursor = 0,
        (_, KeyCode::End) => app.edit_cursor = app.edit_buffer.len(),
        (m, KeyCode::Char('e')) if m.contains(KeyModifiers::CONTROL) => {
            app.edit_cursor = app.edit_buffer.len();
        }
        (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
            app.edit_buffer.insert(app.edit_cursor, c);
            app.edit_cursor += c.len_utf8();
        }
        _ => {}
    }
}

fn delete_word(app: &mut App) {
    let start = unicode::word_start_before(&app.edit_buffer, app.edit_cursor);
    app.edit_buffer.drain(start..app.edit_cursor);
    app.edit_cursor = start;
}

fn submit(app: &mut App) {
    match app.mode {
        Mode::AddTask => submit_task(app),
        Mode::NewTab => submit_tab(app),
        _ => app.end_edit(),
    }
}

/// Add the typed task and stay in the input for the next one
fn submit_task(app: &mut App) {
    let Some(tab_id) = app.active_tab().map(|t| t.id.clone()) else {
        app.end_edit();
        return;
    };
    let title = app.edit_buffer.clone();
    match app.store.add_task(&tab_id, &title) {
        Ok(_) => {
            app.edit_buffer.clear();
            app.edit_cursor = 0;
            app.clear_status();
        }
        // Blank title: keep the input open so the user can type one
        Err(e) if e.kind() == ErrorKind::InvalidInput => app.report_error(&e),
        Err(e) => {
            // Applied in memory, so don't offer it for re-entry
            app.edit_buffer.clear();
            app.edit_cursor = 0;
            app.report_error(&e);
        }
    }
}

fn submit_tab(app: &mut App) {
    let name = app.edit_buffer.clone();
    app.end_edit();
    match app.store.add_tab(&name) {
        Ok(_) => app.clear_status(),
        Err(e) => app.report_error(&e),
    }
    app.task_cursor = 0;
    app.task_scroll = 0;
}
