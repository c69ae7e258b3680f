use std::collections::BTreeSet;

use crate::model::{Tab, TodoState};

/// Prefix of generated task ids (`T-001`)
pub const TASK_PREFIX: &str = "T";

/// Prefix of generated tab ids (`tab-1`)
pub const TAB_PREFIX: &str = "tab";

/// Numeric suffix of an id shaped like `<prefix>-<n>`
fn id_number(id: &str, prefix: &str) -> Option<usize> {
    id.strip_prefix(prefix)?.strip_prefix('-')?.parse().ok()
}

/// One past the highest number in use, or the lowest unused number when the
/// highest is already `usize::MAX`.
fn next_free(used: impl Iterator<Item = usize>) -> usize {
    let used: BTreeSet<usize> = used.collect();
    if let Some(next) = used.last().map_or(Some(1), |max| max.checked_add(1)) {
        return next;
    }
    let mut n = 1;
    while used.contains(&n) {
        n += 1;
    }
    n
}

/// Next free tab id: one past the highest `tab-N` in use.
pub fn next_tab_id(state: &TodoState) -> String {
    let n = next_free(
        state
            .tabs
            .iter()
            .filter_map(|t| id_number(&t.id, TAB_PREFIX)),
    );
    format!("{}-{}", TAB_PREFIX, n)
}

/// Next free task id within a tab: one past the highest `T-NNN` in use.
pub fn next_task_id(tab: &Tab) -> String {
    let n = next_free(
        tab.tasks
            .iter()
            .filter_map(|t| id_number(&t.id, TASK_PREFIX)),
    );
    format!("{}-{:03}", TASK_PREFIX, n)
}

/// Name given to a tab created without one: `Tab N` for the N-th tab.
pub fn default_tab_name(state: &TodoState) -> String {
    format!("Tab {}", state.tabs.len() + 1)
}
