//! Helpers over the flat payment log.

use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::{LoanBook, Transaction};

pub struct TransactionService;

impl TransactionService {
    /// Removes the transaction identified by `id`, returning the removed
    /// record.
    ///
    /// Removal does NOT restore the contract's remaining principal or last
    /// paid date; the boundary layer warns the user and any repair is a
    /// manual edit of the contract.
    pub fn remove(book: &mut LoanBook, id: Uuid) -> ServiceResult<Transaction> {
        let removed = book
            .remove_transaction(id)
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))?;
        tracing::warn!(
            transaction = %removed.id,
            contract = %removed.contract_id,
            "transaction removed; contract balance and cycle left as-is"
        );
        Ok(removed)
    }

    /// Returns a snapshot of the book's transactions, newest first.
    pub fn list(book: &LoanBook) -> Vec<&Transaction> {
        book.transactions.iter().collect()
    }

    /// The transactions recorded against one contract, newest first.
    pub fn for_contract(book: &LoanBook, contract_id: Uuid) -> Vec<&Transaction> {
        book.transactions
            .iter()
            .filter(|txn| txn.contract_id == contract_id)
            .collect()
    }
}
