use std::fs::{self, File};
use std::path::Path;

use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

/// Parse a config level name, falling back to `Info` for anything unknown
pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

/// Start logging to `path`. The TUI owns the terminal, so logs only go to
/// the file. Failure to open the file leaves logging disabled.
pub fn init(path: &Path, level: &str) {
    let level = parse_level(level);
    if level == LevelFilter::Off {
        return;
    }

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(log_file) = File::options().create(true).append(true).open(path) {
        let _ = WriteLogger::init(level, log_config, log_file);
    }
}
