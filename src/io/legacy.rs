//! Older data file layouts, converted to [`TodoState`] on load.
//!
//! Two shapes predate per-task ids:
//!
//! ```json
//! {"tabs": [{"name": "Today", "tasks": {"not_completed": ["a"], "completed": ["b"]}}]}
//! {"tab_names": {"t1": "Today"}, "tasks_by_tab": {"t1": {"not_completed": [], "completed": []}}}
//! ```
//!
//! Tasks are plain titles, split into pending and completed lists. Anything
//! else is not recognised here and stays a decode error for the caller.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::model::{Tab, Task, TodoState};
use crate::ops::ids;

#[derive(Deserialize)]
struct TabList {
    tabs: Vec<NamedTab>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct NamedTab {
    name: String,
    tasks: TaskLists,
}

#[derive(Deserialize)]
struct TabMaps {
    /// Tab key to display name, in tab order
    tab_names: IndexMap<String, String>,
    tasks_by_tab: HashMap<String, TaskLists>,
}

#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TaskLists {
    #[serde(default)]
    not_completed: Vec<String>,
    #[serde(default)]
    completed: Vec<String>,
}

/// Convert an older layout, or `None` if `text` is not one.
pub fn migrate(text: &str) -> Option<TodoState> {
    let tabs: Vec<(String, TaskLists)> = if let Ok(list) = serde_json::from_str::<TabList>(text) {
        list.tabs.into_iter().map(|t| (t.name, t.tasks)).collect()
    } else if let Ok(mut maps) = serde_json::from_str::<TabMaps>(text) {
        maps.tab_names
            .into_iter()
            .map(|(key, name)| {
                let tasks = maps.tasks_by_tab.remove(&key).unwrap_or_default();
                (name, tasks)
            })
            .collect()
    } else {
        return None;
    };

    let mut state = TodoState::empty();
    for (name, lists) in tabs {
        let name = match name.trim() {
            "" => ids::default_tab_name(&state),
            trimmed => trimmed.to_string(),
        };
        let mut tab = Tab::new(ids::next_tab_id(&state), name);
        let pending = lists.not_completed.into_iter().map(|title| (title, false));
        let completed = lists.completed.into_iter().map(|title| (title, true));
        for (title, done) in pending.chain(completed) {
            let title = title.trim();
            if title.is_empty() {
                log::warn!("dropping blank task in tab {:?}", tab.name);
                continue;
            }
            let mut task = Task::new(ids::next_task_id(&tab), title.to_string());
            task.done = done;
            tab.tasks.push(task);
        }
        state.tabs.push(tab);
    }
    state.repair_active();
    Some(state)
}
