use dirs::home_dir;
use std::{env, fs, io, path::Path, path::PathBuf};

const DEFAULT_DIR_NAME: &str = ".loan_core";
const BOOK_DIR: &str = "books";
const BACKUP_DIR: &str = "backups";
const CONFIG_DIR: &str = "config";
const CONFIG_BACKUP_DIR: &str = "config_backups";
const STATE_FILE: &str = "state.json";
const CONFIG_FILE: &str = "config.json";

/// Returns the application-specific data directory, defaulting to `~/.loan_core`.
pub fn app_data_dir() -> PathBuf {
    if let Some(custom) = env::var_os("LOAN_CORE_HOME") {
        return PathBuf::from(custom);
    }
    home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DEFAULT_DIR_NAME)
}

/// Absolute path to the managed books directory under `base`.
pub fn books_dir_in(base: &Path) -> PathBuf {
    base.join(BOOK_DIR)
}

/// Base directory for backup snapshots under `base`.
pub fn backups_dir_in(base: &Path) -> PathBuf {
    base.join(BACKUP_DIR)
}

/// Directory holding the active configuration file.
pub fn config_dir_in(base: &Path) -> PathBuf {
    base.join(CONFIG_DIR)
}

/// Directory containing configuration backups.
pub fn config_backups_dir_in(base: &Path) -> PathBuf {
    base.join(CONFIG_BACKUP_DIR)
}

/// Path to the active configuration file.
pub fn config_file_in(base: &Path) -> PathBuf {
    config_dir_in(base).join(CONFIG_FILE)
}

/// Path to the shared state file (tracking the last opened book, etc.).
pub fn state_file_in(base: &Path) -> PathBuf {
    base.join(STATE_FILE)
}

/// Creates `dir` and any missing parents.
pub fn ensure_dir(dir: &Path) -> io::Result<()> {
    if dir.exists() {
        return Ok(());
    }
    fs::create_dir_all(dir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn managed_dirs_nest_under_base() {
        let base = PathBuf::from("/tmp/loan_core_base");
        assert_eq!(books_dir_in(&base), base.join("books"));
        assert_eq!(state_file_in(&base), base.join("state.json"));
        assert_eq!(config_file_in(&base), base.join("config/config.json"));
    }
}
