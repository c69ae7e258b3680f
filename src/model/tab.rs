use serde::{Deserialize, Serialize};

use super::task::Task;

/// A named list of tasks, shown as one entry in the tab bar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tab {
    /// Identifier like `tab-3`, unique within the store
    pub id: String,
    /// Display label
    pub name: String,
    /// Tasks in insertion (display) order
    pub tasks: Vec<Task>,
}

impl Tab {
    pub fn new(id: String, name: String) -> Self {
        Tab {
            id,
            name,
            tasks: Vec::new(),
        }
    }

    pub fn find_task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    pub fn find_task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }

    /// Tasks still to do, in insertion order
    pub fn pending(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| !t.done)
    }

    /// Completed tasks, in insertion order
    pub fn completed(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(|t| t.done)
    }

    /// Display order used by the task list: pending first, then completed.
    pub fn display_order(&self) -> Vec<&Task> {
        self.pending().chain(self.completed()).collect()
    }

    /// Count of (pending, completed) tasks
    pub fn counts(&self) -> (usize, usize) {
        let done = self.tasks.iter().filter(|t| t.done).count();
        (self.tasks.len() - done, done)
    }
}
