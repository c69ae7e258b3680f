use std::io;
use std::path::{Path, PathBuf};

/// Directory under `$HOME` holding every file the app writes
pub const APP_DIR_NAME: &str = ".terminal-todo";

/// Locations of the app's files, all rooted in one directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    dir: PathBuf,
}

impl AppPaths {
    /// Root everything in `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        AppPaths { dir: dir.into() }
    }

    /// `~/.terminal-todo`
    pub fn discover() -> io::Result<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no home directory"))?;
        Ok(AppPaths::new(home.join(APP_DIR_NAME)))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn data_file(&self) -> PathBuf {
        self.dir.join("data.json")
    }

    pub fn config_file(&self) -> PathBuf {
        self.dir.join("config.toml")
    }

    pub fn state_file(&self) -> PathBuf {
        self.dir.join("state.json")
    }

    pub fn log_file(&self) -> PathBuf {
        self.dir.join("todo.log")
    }
}
