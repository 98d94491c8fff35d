//! Creation/edit-time synchronization between `loan_amount`,
//! `interest_rate`, `payment_amount`, and `total_installments`. These rules
//! define what a consistent contract looks like whenever one of the linked
//! fields changes.

use crate::domain::{Contract, PaymentType};

/// The linked fields an edit can touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContractField {
    LoanAmount,
    InterestRate,
    PaymentAmount,
    PaymentType,
    TotalInstallments,
}

/// Re-derives the dependent fields after `changed` was edited.
///
/// Auto contracts recompute the per-cycle amount from principal and rate,
/// or back-solve the rate when the per-cycle amount itself was edited.
/// Installment contracts split the principal evenly. Fixed contracts never
/// change their per-cycle amount here.
pub fn sync_payment_fields(contract: &mut Contract, changed: ContractField) {
    match contract.payment_type {
        PaymentType::FixedInstallment => {
            let recompute = matches!(
                changed,
                ContractField::LoanAmount
                    | ContractField::TotalInstallments
                    | ContractField::PaymentType
            );
            if recompute && contract.loan_amount > 0.0 && contract.total_installments > 0 {
                contract.payment_amount =
                    (contract.loan_amount / contract.total_installments as f64).round();
            }
        }
        PaymentType::Auto => match changed {
            ContractField::LoanAmount | ContractField::InterestRate | ContractField::PaymentType => {
                if contract.loan_amount > 0.0 && contract.interest_rate > 0.0 {
                    contract.payment_amount =
                        (contract.loan_amount * contract.interest_rate / 100.0).round();
                }
            }
            ContractField::PaymentAmount => {
                if contract.loan_amount > 0.0 && contract.payment_amount > 0.0 {
                    let rate = contract.payment_amount / contract.loan_amount * 100.0;
                    contract.interest_rate = round2(rate);
                }
            }
            ContractField::TotalInstallments => {}
        },
        PaymentType::Fixed => {}
    }

    // Installment-only fields are meaningless anywhere else.
    if changed == ContractField::PaymentType
        && contract.payment_type != PaymentType::FixedInstallment
    {
        contract.net_received_amount = None;
        contract.total_installments = 0;
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
