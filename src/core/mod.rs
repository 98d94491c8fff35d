//! Boundary layer: the manager facade owning the current book and its
//! persistence, plus the validated service helpers the UI calls into.

pub mod manager;
pub mod services;

pub use manager::BookManager;
pub use services::{ContractService, PaymentService, TransactionService};
