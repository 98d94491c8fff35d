//! Payment application: turns a payment request into an immutable
//! transaction record plus the contract's next state. Pure; the services
//! layer commits both to the book as one unit.

use chrono::NaiveDate;

use crate::domain::{Contract, PaymentType, Transaction};

use super::engine::ContractStatus;

/// A payment as submitted by the boundary layer.
///
/// Inputs are taken as-is: nothing rejects `amount < principal_reduction`
/// or negative figures, matching the long-standing behavior of the book.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    /// Total cash received.
    pub amount: f64,
    /// Portion explicitly applied to shrink the outstanding principal.
    pub principal_reduction: f64,
    /// Whether this payment satisfies the current cycle and advances the
    /// schedule. False records the cash without moving the due date.
    pub advance_cycle: bool,
    pub date: NaiveDate,
}

/// The two records a payment produces.
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    pub contract: Contract,
    pub transaction: Transaction,
}

/// Applies `request` against the contract using the derived `snapshot`
/// taken before any mutation.
///
/// When the cycle advances, `last_paid_date` becomes the due date that was
/// owed — never the payment's actual date — so early and late payments do
/// not drift the schedule. A principal reduction floors at zero, and Auto
/// contracts recompute their per-cycle amount from the new principal.
pub fn apply_payment(
    contract: &Contract,
    snapshot: &ContractStatus,
    request: &PaymentRequest,
) -> PaymentOutcome {
    let mut transaction = Transaction::new(
        contract.id,
        contract.name.clone(),
        request.amount,
        request.date,
    );
    transaction.principal_paid = request.principal_reduction;
    transaction.cycle_date_snapshot = snapshot.next_due_date;
    transaction.note = payment_note(request);

    let mut updated = contract.clone();
    if request.advance_cycle {
        if let Some(due) = snapshot.next_due_date {
            updated.last_paid_date = Some(due);
        }
    }
    if request.principal_reduction > 0.0 {
        let new_principal = (contract.current_principal() - request.principal_reduction).max(0.0);
        updated.remaining_principal = Some(new_principal);
        if updated.payment_type == PaymentType::Auto && updated.interest_rate > 0.0 {
            updated.payment_amount = (new_principal * updated.interest_rate / 100.0).round();
        }
    }

    PaymentOutcome {
        contract: updated,
        transaction,
    }
}

fn payment_note(request: &PaymentRequest) -> String {
    if request.advance_cycle {
        if request.principal_reduction > 0.0 {
            format!(
                "Scheduled payment + principal reduction of {}",
                request.principal_reduction
            )
        } else {
            "Scheduled payment".to_string()
        }
    } else {
        "Partial/extra payment".to_string()
    }
}
