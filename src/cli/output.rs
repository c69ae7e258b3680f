use serde::Serialize;

use crate::model::{Tab, Task};

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct TaskJson {
    pub id: String,
    pub title: String,
    pub done: bool,
}

#[derive(Serialize)]
pub struct TabJson {
    pub id: String,
    pub name: String,
    pub active: bool,
    pub pending: usize,
    pub done: usize,
}

#[derive(Serialize)]
pub struct TaskListJson {
    pub tab: String,
    pub tasks: Vec<TaskJson>,
}

// ---------------------------------------------------------------------------
// Conversions
// ---------------------------------------------------------------------------

pub fn task_to_json(task: &Task) -> TaskJson {
    TaskJson {
        id: task.id.clone(),
        title: task.title.clone(),
        done: task.done,
    }
}

pub fn tab_to_json(tab: &Tab, active: bool) -> TabJson {
    let (pending, done) = tab.counts();
    TabJson {
        id: tab.id.clone(),
        name: tab.name.clone(),
        active,
        pending,
        done,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// `* tab-1  Today  (2 pending, 1 done)`, with `*` on the focused tab
pub fn format_tab_line(tab: &Tab, active: bool) -> String {
    let (pending, done) = tab.counts();
    let marker = if active { '*' } else { ' ' };
    format!(
        "{} {}  {}  ({} pending, {} done)",
        marker, tab.id, tab.name, pending, done
    )
}

/// `T-001 [ ] Buy milk`
pub fn format_task_line(task: &Task) -> String {
    format!("{} {} {}", task.id, task.checkbox(), task.title)
}
