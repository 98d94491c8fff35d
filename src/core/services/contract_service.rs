//! Business logic helpers for managing loan contracts.

use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::{Contract, LoanBook};
use crate::ledger::sync::{sync_payment_fields, ContractField};

/// Provides validated CRUD helpers for the book's contracts.
pub struct ContractService;

impl ContractService {
    /// Adds a new contract and returns its identifier. A fresh contract
    /// starts with its full principal outstanding and no paid cycle.
    pub fn add(book: &mut LoanBook, mut contract: Contract) -> ServiceResult<Uuid> {
        contract.remaining_principal = Some(contract.loan_amount);
        contract.last_paid_date = None;
        let id = book.add_contract(contract);
        tracing::info!(contract = %id, "contract added");
        Ok(id)
    }

    /// Updates the contract identified by `id` via the provided mutator,
    /// then re-derives the linked payment fields for the edit.
    pub fn update<F>(
        book: &mut LoanBook,
        id: Uuid,
        changed: ContractField,
        mutator: F,
    ) -> ServiceResult<()>
    where
        F: FnOnce(&mut Contract),
    {
        let contract = book
            .contract_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Contract not found".into()))?;
        mutator(contract);
        sync_payment_fields(contract, changed);
        book.touch();
        Ok(())
    }

    /// Removes the contract, returning the removed instance. Transactions
    /// referencing it stay in the log (no cascade).
    pub fn remove(book: &mut LoanBook, id: Uuid) -> ServiceResult<Contract> {
        book.remove_contract(id)
            .ok_or_else(|| ServiceError::Invalid("Contract not found".into()))
    }

    /// Returns a snapshot of the book's contracts.
    pub fn list(book: &LoanBook) -> Vec<&Contract> {
        book.contracts.iter().collect()
    }
}
