use serde::{Deserialize, Serialize};

/// A single todo item inside a tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Identifier like `T-004`, unique within the owning tab
    pub id: String,
    /// Display text (never empty)
    pub title: String,
    /// Completion flag
    pub done: bool,
}

impl Task {
    /// Create a new, not-yet-done task
    pub fn new(id: String, title: String) -> Self {
        Task {
            id,
            title,
            done: false,
        }
    }

    /// Flip the completion flag
    pub fn toggle(&mut self) {
        self.done = !self.done;
    }

    /// The marker shown in list output
    pub fn checkbox(&self) -> &'static str {
        if self.done { "[x]" } else { "[ ]" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_task_is_not_done() {
        let task = Task::new("T-001".into(), "Buy milk".into());
        assert!(!task.done);
        assert_eq!(task.checkbox(), "[ ]");
    }

    #[test]
    fn toggle_flips_back_and_forth() {
        let mut task = Task::new("T-001".into(), "Buy milk".into());
        task.toggle();
        assert!(task.done);
        assert_eq!(task.checkbox(), "[x]");
        task.toggle();
        assert!(!task.done);
    }
}
