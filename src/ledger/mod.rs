//! Ledger Engine: derives per-contract runtime state from the persisted
//! collections and applies payments against it. Everything here is pure;
//! persistence happens in the services/manager layers.

pub mod engine;
pub mod payment;
pub mod report;
pub mod sync;

pub use engine::{derive_all, derive_status, summarize, BookStats, ContractStatus};
pub use payment::{apply_payment, PaymentOutcome, PaymentRequest};
pub use report::{group_by_customer, CustomerGroup};
pub use sync::{sync_payment_fields, ContractField};
