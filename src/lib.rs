#![doc(test(attr(deny(warnings))))]

//! Loan Core offers the ledger, scheduling, and payment-application
//! primitives behind a personal loan-book: lender-side contracts, due-date
//! recurrence, overdue penalties, and a flat payment transaction log.

pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod schedule;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Loan Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
    }
}
