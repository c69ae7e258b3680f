use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::io::recovery::atomic_write;
use crate::model::ThemeKind;

/// Persisted TUI preferences (written to state.json)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UiState {
    /// Last theme chosen with the toggle key
    #[serde(default)]
    pub theme: ThemeKind,
    /// Whether compact mode was on
    #[serde(default)]
    pub compact: bool,
}

/// Read state.json; missing or malformed files are ignored
pub fn read_ui_state(path: &Path) -> Option<UiState> {
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

/// Write state.json
pub fn write_ui_state(path: &Path, state: &UiState) -> Result<(), std::io::Error> {
    let content = serde_json::to_string_pretty(state)?;
    atomic_write(path, content.as_bytes())
}
