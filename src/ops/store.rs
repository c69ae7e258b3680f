//! The owned, write-through todo store.
//!
//! Every mutating method validates its arguments, applies the change in
//! memory, then writes the whole state to disk before returning. A failed
//! write is reported as an error but the in-memory change is kept and the
//! store stays marked unsaved, so the next mutation (or an explicit
//! [`Store::save`]) retries it.

use std::path::{Path, PathBuf};

use crate::io::codec::{self, CodecError};
use crate::io::recovery;
use crate::model::{Tab, Task, TodoState};
use crate::ops::ids;

/// Coarse error categories, as surfaced to the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A tab or task id that does not exist
    NotFound,
    /// Blank title
    InvalidInput,
    /// The data file could not be decoded
    CorruptData,
    /// Reading or writing the data file failed
    IoFailure,
}

/// Error type for store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("tab not found: {0}")]
    TabNotFound(String),
    #[error("task {task} not found in tab {tab}")]
    TaskNotFound { tab: String, task: String },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("could not back up {path}: {source}")]
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::TabNotFound(_) | StoreError::TaskNotFound { .. } => ErrorKind::NotFound,
            StoreError::InvalidInput(_) => ErrorKind::InvalidInput,
            StoreError::Codec(CodecError::Corrupt { .. }) => ErrorKind::CorruptData,
            StoreError::Codec(_) | StoreError::Backup { .. } => ErrorKind::IoFailure,
        }
    }
}

/// The todo list plus the file it lives in.
#[derive(Debug)]
pub struct Store {
    path: PathBuf,
    state: TodoState,
    unsaved: bool,
}

impl Store {
    /// Load the store from `path`. A missing file starts a fresh list; a
    /// corrupt one is an error.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let state = codec::load(path)?;
        Ok(Store::with_state(path, state))
    }

    /// Like [`Store::open`], but a corrupt file is moved aside (see
    /// [`recovery::backup_corrupt`]) and replaced by a fresh list. Returns the
    /// backup location when that happened.
    pub fn open_or_reset(path: &Path) -> Result<(Self, Option<PathBuf>), StoreError> {
        match codec::load(path) {
            Ok(state) => Ok((Store::with_state(path, state), None)),
            Err(CodecError::Corrupt { source, .. }) => {
                log::warn!("{} is corrupt ({}), resetting", path.display(), source);
                let backup =
                    recovery::backup_corrupt(path).map_err(|e| StoreError::Backup {
                        path: path.to_path_buf(),
                        source: e,
                    })?;
                let mut store = Store::with_state(path, TodoState::bootstrap());
                store.save()?;
                Ok((store, Some(backup)))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Wrap an in-memory state without touching the disk
    pub fn with_state(path: &Path, state: TodoState) -> Self {
        Store {
            path: path.to_path_buf(),
            state,
            unsaved: false,
        }
    }

    /// Path of the backing data file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read-only view of the current state
    pub fn snapshot(&self) -> &TodoState {
        &self.state
    }

    /// True when the last write failed and memory is ahead of the file
    pub fn is_unsaved(&self) -> bool {
        self.unsaved
    }

    /// Write the current state to disk
    pub fn save(&mut self) -> Result<(), StoreError> {
        self.unsaved = true;
        if let Err(e) = codec::save(&self.path, &self.state) {
            log::error!("save failed: {}", e);
            return Err(e.into());
        }
        self.unsaved = false;
        Ok(())
    }

    /// Find a tab by id, or failing that by exact name
    pub fn resolve_tab(&self, key: &str) -> Option<&Tab> {
        self.state
            .find_tab(key)
            .or_else(|| self.state.tabs.iter().find(|t| t.name == key))
    }

    // -----------------------------------------------------------------------
    // Tabs
    // -----------------------------------------------------------------------

    /// Append a new empty tab and focus it. A blank `name` gets a default.
    pub fn add_tab(&mut self, name: &str) -> Result<String, StoreError> {
        let name = match name.trim() {
            "" => ids::default_tab_name(&self.state),
            trimmed => trimmed.to_string(),
        };
        let id = ids::next_tab_id(&self.state);
        log::debug!("add tab {} {:?}", id, name);
        self.state.tabs.push(Tab::new(id.clone(), name));
        self.state.active_tab_id = Some(id.clone());
        self.save()?;
        Ok(id)
    }

    /// Delete a tab and all of its tasks.
    ///
    /// If it was focused, focus moves to the tab that slides into its
    /// position (the old next neighbour), else to the new last tab, else to
    /// nothing when no tabs remain.
    pub fn remove_tab(&mut self, tab_id: &str) -> Result<(), StoreError> {
        let idx = self
            .state
            .tab_index(tab_id)
            .ok_or_else(|| StoreError::TabNotFound(tab_id.to_string()))?;

        let removed = self.state.tabs.remove(idx);
        log::debug!(
            "remove tab {} {:?} with {} task(s)",
            removed.id,
            removed.name,
            removed.tasks.len()
        );

        if self.state.active_tab_id.as_deref() == Some(tab_id) {
            self.state.active_tab_id = self
                .state
                .tabs
                .get(idx)
                .or_else(|| self.state.tabs.last())
                .map(|t| t.id.clone());
        }
        self.save()
    }

    /// Focus a tab
    pub fn set_active_tab(&mut self, tab_id: &str) -> Result<(), StoreError> {
        if self.state.find_tab(tab_id).is_none() {
            return Err(StoreError::TabNotFound(tab_id.to_string()));
        }
        if self.state.active_tab_id.as_deref() == Some(tab_id) {
            return Ok(());
        }
        log::debug!("focus tab {}", tab_id);
        self.state.active_tab_id = Some(tab_id.to_string());
        self.save()
    }

    // -----------------------------------------------------------------------
    // Tasks
    // -----------------------------------------------------------------------

    /// Append a not-done task to a tab. The title is trimmed and must not be
    /// empty.
    pub fn add_task(&mut self, tab_id: &str, title: &str) -> Result<String, StoreError> {
        let tab = self
            .state
            .find_tab_mut(tab_id)
            .ok_or_else(|| StoreError::TabNotFound(tab_id.to_string()))?;

        let title = title.trim();
        if title.is_empty() {
            return Err(StoreError::InvalidInput("task title is empty".into()));
        }

        let id = ids::next_task_id(tab);
        log::debug!("add task {}/{} {:?}", tab_id, id, title);
        tab.tasks.push(Task::new(id.clone(), title.to_string()));
        self.save()?;
        Ok(id)
    }

    /// Delete a task from a tab
    pub fn remove_task(&mut self, tab_id: &str, task_id: &str) -> Result<(), StoreError> {
        let tab = self
            .state
            .find_tab_mut(tab_id)
            .ok_or_else(|| StoreError::TabNotFound(tab_id.to_string()))?;
        let idx = tab
            .tasks
            .iter()
            .position(|t| t.id == task_id)
            .ok_or_else(|| task_not_found(tab_id, task_id))?;

        log::debug!("remove task {}/{}", tab_id, task_id);
        tab.tasks.remove(idx);
        self.save()
    }

    /// Flip a task's completion flag. Returns the new value.
    pub fn toggle_task(&mut self, tab_id: &str, task_id: &str) -> Result<bool, StoreError> {
        let tab = self
            .state
            .find_tab_mut(tab_id)
            .ok_or_else(|| StoreError::TabNotFound(tab_id.to_string()))?;
        let task = tab
            .find_task_mut(task_id)
            .ok_or_else(|| task_not_found(tab_id, task_id))?;

        task.toggle();
        let done = task.done;
        log::debug!("toggle task {}/{} -> done={}", tab_id, task_id, done);
        self.save()?;
        Ok(done)
    }
}

fn task_not_found(tab_id: &str, task_id: &str) -> StoreError {
    StoreError::TaskNotFound {
        tab: tab_id.to_string(),
        task: task_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    fn open_fresh(dir: &TempDir) -> Store {
        Store::open(&dir.path().join("data.json")).unwrap()
    }

    fn empty_store(dir: &TempDir) -> Store {
        Store::with_state(&dir.path().join("data.json"), TodoState::empty())
    }

    #[test]
    fn fresh_store_has_one_tab() {
        let dir = TempDir::new().unwrap();
        let store = open_fresh(&dir);
        assert_eq!(store.snapshot().tabs.len(), 1);
        assert!(store.snapshot().active_tab().is_some());
        assert!(!store.is_unsaved());
    }

    #[test]
    fn add_tab_focuses_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut store = open_fresh(&dir);
        let id = store.add_tab("  Work ").unwrap();

        assert_eq!(store.snapshot().active_tab_id.as_deref(), Some(id.as_str()));
        assert_eq!(store.snapshot().tabs.last().unwrap().name, "Work");

        let reloaded = Store::open(store.path()).unwrap();
        assert_eq!(reloaded.snapshot(), store.snapshot());
    }

    #[test]
    fn add_tab_with_blank_name_gets_default() {
        let dir = TempDir::new().unwrap();
        let mut store = open_fresh(&dir);
        let id = store.add_tab("   ").unwrap();
        let tab = store.snapshot().find_tab(&id).unwrap();
        assert_eq!(tab.name, "Tab 2");
        assert_eq!(id, "tab-2");
    }

    #[test]
    fn add_task_appends_undone() {
        let dir = TempDir::new().unwrap();
        let mut store = open_fresh(&dir);
        let tab = store.snapshot().tabs[0].id.clone();
        let first = store.add_task(&tab, "Buy milk").unwrap();
        let second = store.add_task(&tab, " Call mom ").unwrap();

        assert_eq!(first, "T-001");
        assert_eq!(second, "T-002");
        let titles: Vec<&str> = store.snapshot().tabs[0]
            .tasks
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Buy milk", "Call mom"]);
        assert!(store.snapshot().tabs[0].tasks.iter().all(|t| !t.done));
    }

    #[test]
    fn whitespace_title_is_invalid_and_changes_nothing() {
        let dir = TempDir::new().unwrap();
        let mut store = open_fresh(&dir);
        let tab = store.snapshot().tabs[0].id.clone();
        store.add_task(&tab, "keep").unwrap();
        let before = store.snapshot().clone();

        for title in ["", "   ", "\t\n"] {
            let err = store.add_task(&tab, title).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidInput);
        }
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn add_task_to_unknown_tab_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = open_fresh(&dir);
        let err = store.add_task("tab-99", "x").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn toggle_task_flips_done() {
        let dir = TempDir::new().unwrap();
        let mut store = open_fresh(&dir);
        let tab = store.snapshot().tabs[0].id.clone();
        let task = store.add_task(&tab, "x").unwrap();

        assert!(store.toggle_task(&tab, &task).unwrap());
        assert!(store.snapshot().tabs[0].tasks[0].done);
        assert!(!store.toggle_task(&tab, &task).unwrap());
        assert!(!store.snapshot().tabs[0].tasks[0].done);
    }

    #[test]
    fn remove_task_deletes_only_that_task() {
        let dir = TempDir::new().unwrap();
        let mut store = open_fresh(&dir);
        let tab = store.snapshot().tabs[0].id.clone();
        let a = store.add_task(&tab, "a").unwrap();
        store.add_task(&tab, "b").unwrap();

        store.remove_task(&tab, &a).unwrap();
        let titles: Vec<&str> = store.snapshot().tabs[0]
            .tasks
            .iter()
            .map(|t| t.title.as_str())
            .collect();
        assert_eq!(titles, vec!["b"]);

        let err = store.remove_task(&tab, &a).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn task_id_from_another_tab_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let a = store.add_tab("A").unwrap();
        let b = store.add_tab("B").unwrap();
        store.add_task(&a, "only in A").unwrap();
        let task_in_a = store.snapshot().find_tab(&a).unwrap().tasks[0].id.clone();
        let before = store.snapshot().clone();

        let err = store.remove_task(&b, &task_in_a).unwrap_err();
        assert!(matches!(err, StoreError::TaskNotFound { .. }));
        let err = store.toggle_task(&b, &task_in_a).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(store.snapshot(), &before);
    }

    #[test]
    fn removing_active_tab_focuses_next() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let a = store.add_tab("A").unwrap();
        let b = store.add_tab("B").unwrap();
        store.set_active_tab(&a).unwrap();

        store.remove_tab(&a).unwrap();
        assert_eq!(store.snapshot().active_tab_id.as_deref(), Some(b.as_str()));
    }

    #[test]
    fn removing_last_active_tab_focuses_previous() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let a = store.add_tab("A").unwrap();
        let b = store.add_tab("B").unwrap();
        let c = store.add_tab("C").unwrap();
        assert_eq!(store.snapshot().active_tab_id.as_deref(), Some(c.as_str()));

        store.remove_tab(&c).unwrap();
        assert_eq!(store.snapshot().active_tab_id.as_deref(), Some(b.as_str()));
        store.remove_tab(&a).unwrap();
        assert_eq!(store.snapshot().active_tab_id.as_deref(), Some(b.as_str()));
    }

    #[test]
    fn removing_inactive_tab_keeps_focus() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let a = store.add_tab("A").unwrap();
        let b = store.add_tab("B").unwrap();
        store.remove_tab(&a).unwrap();
        assert_eq!(store.snapshot().active_tab_id.as_deref(), Some(b.as_str()));
    }

    #[test]
    fn removing_every_tab_leaves_valid_empty_state() {
        let dir = TempDir::new().unwrap();
        let mut store = open_fresh(&dir);
        let only = store.snapshot().tabs[0].id.clone();
        store.remove_tab(&only).unwrap();

        assert!(store.snapshot().tabs.is_empty());
        assert!(store.snapshot().active_tab_id.is_none());
        assert_eq!(
            store.add_task(&only, "x").unwrap_err().kind(),
            ErrorKind::NotFound
        );

        // Survives a reload as an empty list, not a re-bootstrap
        let reloaded = Store::open(store.path()).unwrap();
        assert!(reloaded.snapshot().tabs.is_empty());

        // And recovers by adding a tab
        let id = store.add_tab("").unwrap();
        assert_eq!(id, "tab-1");
        assert_eq!(store.snapshot().active_tab_id.as_deref(), Some("tab-1"));
    }

    #[test]
    fn remove_unknown_tab_is_not_found() {
        let dir = TempDir::new().unwrap();
        let mut store = open_fresh(&dir);
        let err = store.remove_tab("nope").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(store.snapshot().tabs.len(), 1);
    }

    #[test]
    fn set_active_tab_validates_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let a = store.add_tab("A").unwrap();
        store.add_tab("B").unwrap();

        assert_eq!(
            store.set_active_tab("missing").unwrap_err().kind(),
            ErrorKind::NotFound
        );
        store.set_active_tab(&a).unwrap();
        let reloaded = Store::open(store.path()).unwrap();
        assert_eq!(reloaded.snapshot().active_tab_id.as_deref(), Some(a.as_str()));
    }

    #[test]
    fn resolve_tab_by_id_or_name() {
        let dir = TempDir::new().unwrap();
        let mut store = empty_store(&dir);
        let work = store.add_tab("Work").unwrap();
        assert_eq!(store.resolve_tab(&work).unwrap().name, "Work");
        assert_eq!(store.resolve_tab("Work").unwrap().id, work);
        assert!(store.resolve_tab("Play").is_none());
    }

    #[test]
    fn open_corrupt_file_fails_with_corrupt_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, r#"{"tabs":[{"id":"tab-1","name":"x"}]}"#).unwrap();
        let err = Store::open(&path).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CorruptData);
        // Untouched
        assert!(fs::read_to_string(&path).unwrap().contains("\"x\""));
    }

    #[test]
    fn open_or_reset_backs_up_corrupt_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        fs::write(&path, "garbage").unwrap();

        let (store, backup) = Store::open_or_reset(&path).unwrap();
        let backup = backup.expect("corrupt file should be backed up");
        assert_eq!(fs::read_to_string(&backup).unwrap(), "garbage");
        assert_eq!(store.snapshot(), &TodoState::bootstrap());
        assert_eq!(Store::open(&path).unwrap().snapshot(), &TodoState::bootstrap());
    }

    #[test]
    fn open_or_reset_leaves_good_file_alone() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let mut store = Store::open(&path).unwrap();
        store.add_tab("Work").unwrap();

        let (reopened, backup) = Store::open_or_reset(&path).unwrap();
        assert!(backup.is_none());
        assert_eq!(reopened.snapshot(), store.snapshot());
    }

    #[cfg(unix)]
    #[test]
    fn failed_write_keeps_mutation_and_reports_io_failure() {
        let dir = TempDir::new().unwrap();
        // A regular file where the data directory should be makes every write fail
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let mut store = Store::with_state(&blocker.join("data.json"), TodoState::bootstrap());

        let err = store.add_tab("Work").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::IoFailure);
        assert!(store.is_unsaved());
        assert_eq!(store.snapshot().tabs.len(), 2);
        assert_eq!(store.snapshot().active_tab().unwrap().name, "Work");

        // Once the directory can be created, the next mutation writes both changes
        fs::remove_file(&blocker).unwrap();
        let work = store.snapshot().active_tab_id.clone().unwrap();
        store.add_task(&work, "Ship it").unwrap();
        assert!(!store.is_unsaved());

        let reloaded = Store::open(store.path()).unwrap();
        let tab = reloaded.resolve_tab("Work").unwrap();
        assert_eq!(tab.tasks.len(), 1);
        assert_eq!(tab.tasks[0].title, "Ship it");
        assert_eq!(reloaded.snapshot(), store.snapshot());
    }

    #[test]
    fn overflowing_ids_in_loaded_file_do_not_collide() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.json");
        let max = usize::MAX;
        fs::write(
            &path,
            format!(
                r#"{{"tabs":[{{"id":"tab-{max}","name":"A","tasks":[{{"id":"T-{max}","title":"x","done":false}}]}}]}}"#
            ),
        )
        .unwrap();
        let mut store = Store::open(&path).unwrap();

        assert_eq!(store.add_tab("B").unwrap(), "tab-1");
        let a = format!("tab-{}", max);
        assert_eq!(store.add_task(&a, "y").unwrap(), "T-001");
        assert_eq!(Store::open(&path).unwrap().snapshot(), store.snapshot());
    }
}
