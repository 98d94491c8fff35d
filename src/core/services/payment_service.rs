//! Records payments against a contract: derives the current snapshot,
//! applies the payment, and commits transaction + contract to the book as
//! one observable mutation.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::domain::LoanBook;
use crate::ledger::{apply_payment, derive_status, PaymentRequest};

pub struct PaymentService;

impl PaymentService {
    /// Applies `request` to the contract as of `today` and returns the new
    /// transaction's identifier. The book gains the transaction and the
    /// updated contract together; the caller persists the whole book
    /// afterwards, so no half-applied payment can ever be observed.
    pub fn record(
        book: &mut LoanBook,
        contract_id: Uuid,
        request: &PaymentRequest,
        today: NaiveDate,
    ) -> ServiceResult<Uuid> {
        let contract = book
            .contract(contract_id)
            .cloned()
            .ok_or_else(|| ServiceError::Invalid("Contract not found".into()))?;
        let snapshot = derive_status(&contract, &book.transactions, today);
        let outcome = apply_payment(&contract, &snapshot, request);

        let slot = book
            .contract_mut(contract_id)
            .ok_or_else(|| ServiceError::Invalid("Contract not found".into()))?;
        *slot = outcome.contract;
        let txn_id = book.add_transaction(outcome.transaction);
        tracing::info!(contract = %contract_id, transaction = %txn_id, amount = request.amount, "payment recorded");
        Ok(txn_id)
    }
}
