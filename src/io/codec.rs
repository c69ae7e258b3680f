//! On-disk format of the todo list.
//!
//! The file is pretty-printed JSON mirroring [`TodoState`]. Reads validate the
//! schema and the id invariants; anything that doesn't match is reported as
//! corrupt rather than patched up, except for `active_tab_id`, which falls
//! back to the first tab. Files in an older layout are converted by
//! [`legacy::migrate`].

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::io::legacy;
use crate::io::recovery::atomic_write;
use crate::model::{Tab, TodoState};

/// Error type for reading and writing the data file
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("{path} is not a valid todo file: {source}")]
    Corrupt {
        path: PathBuf,
        source: SchemaError,
    },
    #[error("could not read {path}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("could not encode todo list: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Why a file's content was rejected
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error("tab with an empty id")]
    EmptyTabId,
    #[error("duplicate tab id {0:?}")]
    DuplicateTabId(String),
    #[error("task with an empty id in tab {0:?}")]
    EmptyTaskId(String),
    #[error("duplicate task id {task:?} in tab {tab:?}")]
    DuplicateTaskId { tab: String, task: String },
    #[error("task {task:?} in tab {tab:?} has an empty title")]
    EmptyTitle { tab: String, task: String },
}

/// Top-level shape accepted on read. `active_tab_id` is taken as a raw value
/// so a wrong type degrades to the first-tab fallback instead of failing.
#[derive(Deserialize)]
struct RawState {
    tabs: Vec<Tab>,
    #[serde(default)]
    active_tab_id: serde_json::Value,
}

/// Load the todo list from `path`.
///
/// A missing file is a first run and yields [`TodoState::bootstrap`]. A file
/// that exists but does not decode fails with [`CodecError::Corrupt`]; what to
/// do about it is the caller's decision.
pub fn load(path: &Path) -> Result<TodoState, CodecError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::info!("no data file at {}, starting fresh", path.display());
            return Ok(TodoState::bootstrap());
        }
        Err(e) => {
            return Err(CodecError::Read {
                path: path.to_path_buf(),
                source: e,
            });
        }
    };

    let state = decode(&text).map_err(|e| CodecError::Corrupt {
        path: path.to_path_buf(),
        source: e,
    })?;
    log::debug!(
        "loaded {} tab(s) from {}",
        state.tabs.len(),
        path.display()
    );
    Ok(state)
}

/// Write the full todo list to `path`, replacing the old file atomically.
pub fn save(path: &Path, state: &TodoState) -> Result<(), CodecError> {
    let content = encode(state)?;
    atomic_write(path, content.as_bytes()).map_err(|e| CodecError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Serialize a state to the on-disk text
pub fn encode(state: &TodoState) -> Result<String, serde_json::Error> {
    let mut out = serde_json::to_string_pretty(state)?;
    out.push('\n');
    Ok(out)
}

/// Parse and validate on-disk text
pub fn decode(text: &str) -> Result<TodoState, SchemaError> {
    let raw: RawState = match serde_json::from_str(text) {
        Ok(raw) => raw,
        Err(e) => {
            return match legacy::migrate(text) {
                Some(state) => {
                    log::warn!(
                        "migrated an older data file layout ({} tab(s)); it is rewritten on the next change",
                        state.tabs.len()
                    );
                    Ok(state)
                }
                None => Err(e.into()),
            };
        }
    };
    validate_tabs(&raw.tabs)?;

    let requested = raw.active_tab_id.as_str().map(String::from);
    let mut state = TodoState {
        tabs: raw.tabs,
        active_tab_id: requested.clone(),
    };
    if state.repair_active() && requested.is_some() {
        log::warn!(
            "active tab {:?} does not exist, focusing the first tab",
            requested.unwrap_or_default()
        );
    }
    Ok(state)
}

fn validate_tabs(tabs: &[Tab]) -> Result<(), SchemaError> {
    let mut tab_ids = HashSet::new();
    for tab in tabs {
        if tab.id.is_empty() {
            return Err(SchemaError::EmptyTabId);
        }
        if !tab_ids.insert(tab.id.as_str()) {
            return Err(SchemaError::DuplicateTabId(tab.id.clone()));
        }

        let mut task_ids = HashSet::new();
        for task in &tab.tasks {
            if task.id.is_empty() {
                return Err(SchemaError::EmptyTaskId(tab.id.clone()));
            }
            if !task_ids.insert(task.id.as_str()) {
                return Err(SchemaError::DuplicateTaskId {
                    tab: tab.id.clone(),
                    task: task.id.clone(),
                });
            }
            if task.title.trim().is_empty() {
                return Err(SchemaError::EmptyTitle {
                    tab: tab.id.clone(),
                    task: task.id.clone(),
                });
            }
        }
    }
    Ok(())
}
