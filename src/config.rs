//! Launcher configuration directory and persisted values.
//!
//! Configuration lives under `~/.twl` as plain text files, one value per
//! file. The only value today is the reminders tag consumed by the
//! "Add to Reminders" task action; absence of the file is a normal state.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Directory holding launcher configuration files.
pub fn launcher_dir() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".twl")
}

/// Path of the persisted reminders-tag value.
pub fn reminders_tag_file() -> PathBuf {
    launcher_dir().join("reminders_tag")
}

/// Read a persisted value: the first whitespace-delimited token of the
/// file's first line. Missing or empty files read as `None`.
pub fn load_value(path: &Path) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    let first_line = raw.lines().next()?;
    first_line.split_whitespace().next().map(|s| s.to_string())
}

/// Persist a value, creating the parent directory if needed.
pub fn save_value(path: &Path, value: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut f = fs::File::create(path)?;
    writeln!(f, "{}", value.trim())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_value(&dir.path().join("reminders_tag")), None);
    }

    #[test]
    fn test_save_then_load_first_token() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reminders_tag");
        save_value(&path, "remindme extra tokens ignored").unwrap();
        assert_eq!(load_value(&path), Some("remindme".to_string()));
    }

    #[test]
    fn test_empty_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reminders_tag");
        fs::write(&path, "\n").unwrap();
        assert_eq!(load_value(&path), None);
    }
}
