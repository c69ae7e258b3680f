use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use tempfile::NamedTempFile;

/// Write `content` to `path` atomically using a temp file + rename.
///
/// The temp file lives in the target's directory so the final rename never
/// crosses a filesystem. Missing parent directories are created.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Path a corrupt file is moved to: `<name>.corrupt-<timestamp>` beside it.
pub fn backup_path(path: &Path) -> PathBuf {
    let stamp = Local::now().format("%Y%m%dT%H%M%S");
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "data.json".to_string());
    path.with_file_name(format!("{}.corrupt-{}", name, stamp))
}

/// Move an unreadable data file out of the way so a fresh one can be written.
/// Returns where the old content now lives.
pub fn backup_corrupt(path: &Path) -> io::Result<PathBuf> {
    let backup = backup_path(path);
    fs::rename(path, &backup)?;
    log::warn!(
        "moved unreadable data file {} to {}",
        path.display(),
        backup.display()
    );
    Ok(backup)
}
