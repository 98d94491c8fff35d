use std::path::{Path, PathBuf};

use crate::domain::{LoanBook, CURRENT_SCHEMA_VERSION};
use crate::errors::LedgerError;
use crate::storage::{book_warnings, StorageBackend};

/// Metadata describing the outcome of a load operation.
#[derive(Debug, Clone)]
pub struct LoadMetadata {
    pub warnings: Vec<String>,
    pub name: Option<String>,
    pub schema_version: u8,
}

/// Facade that coordinates book state, persistence, and backups. The one
/// logical writer: load at start, save after every mutation.
pub struct BookManager {
    pub current: Option<LoanBook>,
    current_name: Option<String>,
    current_path: Option<PathBuf>,
    storage: Box<dyn StorageBackend>,
}

impl BookManager {
    pub fn new(storage: Box<dyn StorageBackend>) -> Self {
        Self {
            current: None,
            current_name: None,
            current_path: None,
            storage,
        }
    }

    pub fn storage(&self) -> &dyn StorageBackend {
        self.storage.as_ref()
    }

    pub fn load(&mut self, name: &str) -> Result<LoadMetadata, LedgerError> {
        let book = self.storage.load(name)?;
        self.ensure_schema_support(book.schema_version)?;
        let metadata = LoadMetadata {
            warnings: book_warnings(&book),
            name: Some(name.to_string()),
            schema_version: book.schema_version,
        };
        self.current = Some(book);
        self.current_name = Some(name.to_string());
        self.current_path = None;
        Ok(metadata)
    }

    pub fn load_from_path(&mut self, path: &Path) -> Result<LoadMetadata, LedgerError> {
        let book = self.storage.load_from_path(path)?;
        self.ensure_schema_support(book.schema_version)?;
        let metadata = LoadMetadata {
            warnings: book_warnings(&book),
            name: None,
            schema_version: book.schema_version,
        };
        self.current = Some(book);
        self.current_name = None;
        self.current_path = Some(path.to_path_buf());
        Ok(metadata)
    }

    /// Persists the current book as one whole-value snapshot.
    pub fn save(&mut self) -> Result<(), LedgerError> {
        let snapshot = self
            .current
            .clone()
            .ok_or_else(|| LedgerError::Storage("no book loaded".into()))?;
        if let Some(name) = self.current_name.clone() {
            self.storage.save(&snapshot, &name)?;
            Ok(())
        } else if let Some(path) = self.current_path.clone() {
            self.storage.save_to_path(&snapshot, &path)?;
            Ok(())
        } else {
            Err(LedgerError::Storage(
                "unable to determine save target for current book".into(),
            ))
        }
    }

    pub fn save_as(&mut self, name: &str) -> Result<(), LedgerError> {
        let snapshot = self
            .current
            .clone()
            .ok_or_else(|| LedgerError::Storage("no book loaded".into()))?;
        self.storage.save(&snapshot, name)?;
        self.current_name = Some(name.to_string());
        self.current_path = None;
        Ok(())
    }

    pub fn backup(&self, note: Option<&str>) -> Result<(), LedgerError> {
        let name = self
            .current_name
            .as_deref()
            .ok_or_else(|| LedgerError::Storage("current book is unnamed".into()))?;
        let book = self
            .current
            .as_ref()
            .ok_or_else(|| LedgerError::Storage("no book loaded".into()))?;
        self.storage.backup(book, name, note)
    }

    pub fn list_backups(&self, name: &str) -> Result<Vec<String>, LedgerError> {
        self.storage.list_backups(name)
    }

    pub fn restore_backup(&mut self, name: &str, backup_name: &str) -> Result<(), LedgerError> {
        let book = self.storage.restore(name, backup_name)?;
        self.ensure_schema_support(book.schema_version)?;
        self.current = Some(book);
        self.current_name = Some(name.to_string());
        self.current_path = None;
        Ok(())
    }

    pub fn last_opened(&self) -> Result<Option<String>, LedgerError> {
        self.storage.last_book()
    }

    pub fn record_last_opened(&self, name: Option<&str>) -> Result<(), LedgerError> {
        self.storage.record_last_book(name)
    }

    pub fn current_name(&self) -> Option<&str> {
        self.current_name.as_deref()
    }

    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    pub fn set_current(&mut self, book: LoanBook, path: Option<PathBuf>, name: Option<String>) {
        self.current = Some(book);
        self.current_path = path;
        self.current_name = name;
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.current_name = None;
        self.current_path = None;
    }

    fn ensure_schema_support(&self, schema_version: u8) -> Result<(), LedgerError> {
        if schema_version > CURRENT_SCHEMA_VERSION {
            return Err(LedgerError::Storage(format!(
                "book schema v{} is newer than supported v{}",
                schema_version, CURRENT_SCHEMA_VERSION
            )));
        }
        Ok(())
    }
}
