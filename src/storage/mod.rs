pub mod json_backend;

use std::path::Path;

use crate::{domain::LoanBook, errors::LedgerError};

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Abstraction over persistence backends capable of storing loan books.
/// Whole-value: every save rewrites the complete book in one snapshot.
pub trait StorageBackend: Send + Sync {
    fn save(&self, book: &LoanBook, name: &str) -> Result<()>;
    fn load(&self, name: &str) -> Result<LoanBook>;
    fn list_backups(&self, name: &str) -> Result<Vec<String>>;
    fn backup(&self, book: &LoanBook, name: &str, note: Option<&str>) -> Result<()>;
    fn restore(&self, name: &str, backup_name: &str) -> Result<LoanBook>;
    fn last_book(&self) -> Result<Option<String>>;
    fn record_last_book(&self, name: Option<&str>) -> Result<()>;

    /// Optional helpers for ad-hoc file operations. Default implementations
    /// forward to the JSON codec when not overridden.
    fn save_to_path(&self, book: &LoanBook, path: &Path) -> Result<()> {
        json_backend::save_book_to_path(book, path)
    }

    fn load_from_path(&self, path: &Path) -> Result<LoanBook> {
        json_backend::load_book_from_path(path)
    }
}

pub use json_backend::{book_warnings, JsonStorage};
