use serde::{Deserialize, Serialize};

use super::tab::Tab;

/// Name of the tab created when there is no data file yet
pub const BOOTSTRAP_TAB_NAME: &str = "Today";

/// Id of the tab created when there is no data file yet
pub const BOOTSTRAP_TAB_ID: &str = "tab-1";

/// The whole persisted todo list: every tab plus the focused one.
///
/// This is a structural mirror of `data.json`. Invariants (unique ids,
/// `active_tab_id` resolving when `tabs` is non-empty) are enforced by the
/// codec on load and by the store on mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoState {
    pub tabs: Vec<Tab>,
    /// Focused tab; `None` only when `tabs` is empty
    #[serde(default)]
    pub active_tab_id: Option<String>,
}

impl TodoState {
    /// A state with no tabs at all
    pub fn empty() -> Self {
        TodoState {
            tabs: Vec::new(),
            active_tab_id: None,
        }
    }

    /// The first-run state: one empty "Today" tab, focused.
    pub fn bootstrap() -> Self {
        TodoState {
            tabs: vec![Tab::new(
                BOOTSTRAP_TAB_ID.to_string(),
                BOOTSTRAP_TAB_NAME.to_string(),
            )],
            active_tab_id: Some(BOOTSTRAP_TAB_ID.to_string()),
        }
    }

    pub fn tab_index(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    pub fn find_tab(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    pub fn find_tab_mut(&mut self, tab_id: &str) -> Option<&mut Tab> {
        self.tabs.iter_mut().find(|t| t.id == tab_id)
    }

    /// The focused tab, if any
    pub fn active_tab(&self) -> Option<&Tab> {
        self.active_tab_id.as_deref().and_then(|id| self.find_tab(id))
    }

    /// Index of the focused tab in the tab bar
    pub fn active_index(&self) -> Option<usize> {
        self.active_tab_id.as_deref().and_then(|id| self.tab_index(id))
    }

    /// Point `active_tab_id` at the first tab when it is missing or dangling.
    /// Returns true if the pointer changed.
    pub fn repair_active(&mut self) -> bool {
        if self.active_tab().is_some() {
            return false;
        }
        let repaired = self.tabs.first().map(|t| t.id.clone());
        let changed = repaired != self.active_tab_id;
        self.active_tab_id = repaired;
        changed
    }
}

impl Default for TodoState {
    fn default() -> Self {
        TodoState::bootstrap()
    }
}
