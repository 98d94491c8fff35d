//! Loan-book domain models: persistence-friendly contracts, transactions,
//! and the book that holds them.

pub mod book;
pub mod contract;
pub mod frequency;
pub mod transaction;

pub use book::{LoanBook, CURRENT_SCHEMA_VERSION};
pub use contract::{Contract, PaymentType};
pub use frequency::FrequencyRule;
pub use transaction::Transaction;
