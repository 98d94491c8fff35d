//! Derivation of per-contract runtime state from the persisted collections.
//! Stateless: identical inputs always produce identical output.

use chrono::NaiveDate;

use crate::domain::{Contract, PaymentType, Transaction};
use crate::schedule;

/// A contract enriched with everything the boundary layer renders: balance,
/// overdue standing, accrued penalty, and payoff status.
#[derive(Debug, Clone)]
pub struct ContractStatus {
    pub contract: Contract,
    pub next_due_date: Option<NaiveDate>,
    pub is_overdue: bool,
    pub days_overdue: i64,
    pub current_penalty: f64,
    /// What the customer actually walked away with.
    pub actual_disbursed: f64,
    /// Cumulative `amount` across the contract's transactions.
    pub total_paid: f64,
    pub is_fully_paid: bool,
    pub current_balance: f64,
}

/// The balance-based payoff predicate.
pub fn balance_cleared(current_balance: f64) -> bool {
    current_balance <= 0.0
}

/// The cumulative-payment payoff predicate; installment contracts only.
pub fn installments_met(contract: &Contract, total_paid: f64) -> bool {
    contract.payment_type == PaymentType::FixedInstallment && total_paid >= contract.loan_amount
}

/// Derives the runtime state of one contract as of `today`.
pub fn derive_status(
    contract: &Contract,
    transactions: &[Transaction],
    today: NaiveDate,
) -> ContractStatus {
    let total_paid: f64 = transactions
        .iter()
        .filter(|txn| txn.contract_id == contract.id)
        .map(|txn| txn.amount)
        .sum();
    let current_balance = contract.current_principal();

    // Two independent payoff conditions; either one settles the contract.
    let is_fully_paid =
        balance_cleared(current_balance) || installments_met(contract, total_paid);

    let next_due_date = if is_fully_paid {
        None
    } else {
        schedule::next_due_date(contract)
    };

    let mut is_overdue = false;
    let mut days_overdue = 0;
    let mut current_penalty = 0.0;
    if let Some(due) = next_due_date {
        if due < today {
            is_overdue = true;
            days_overdue = (today - due).num_days();
            current_penalty = days_overdue as f64 * contract.daily_penalty_amount;
        }
    }

    let actual_disbursed = match (contract.payment_type, contract.net_received_amount) {
        (PaymentType::FixedInstallment, Some(net)) => net,
        _ => contract.loan_amount - contract.service_fee,
    };

    ContractStatus {
        contract: contract.clone(),
        next_due_date,
        is_overdue,
        days_overdue,
        current_penalty,
        actual_disbursed,
        total_paid,
        is_fully_paid,
        current_balance,
    }
}

/// Derives every contract and sorts ascending by next due date, contracts
/// without one last. The sort is stable so equal keys keep their relative
/// order.
pub fn derive_all(
    contracts: &[Contract],
    transactions: &[Transaction],
    today: NaiveDate,
) -> Vec<ContractStatus> {
    let mut statuses: Vec<ContractStatus> = contracts
        .iter()
        .map(|contract| derive_status(contract, transactions, today))
        .collect();
    statuses.sort_by_key(|status| match status.next_due_date {
        Some(due) => (0, due),
        None => (1, NaiveDate::MAX),
    });
    statuses
}

/// Dashboard aggregates over the whole book.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookStats {
    pub total_loaned: f64,
    pub total_collected: f64,
    pub overdue_count: usize,
    pub total_penalty: f64,
}

pub fn summarize(
    contracts: &[Contract],
    transactions: &[Transaction],
    statuses: &[ContractStatus],
) -> BookStats {
    BookStats {
        total_loaned: contracts.iter().map(|c| c.loan_amount).sum(),
        total_collected: transactions.iter().map(|t| t.amount).sum(),
        overdue_count: statuses.iter().filter(|s| s.is_overdue).count(),
        total_penalty: statuses.iter().map(|s| s.current_penalty).sum(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FrequencyRule;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn interval_contract() -> Contract {
        Contract::new("Chen", 10_000.0, Some(date(2024, 1, 1)))
            .with_frequency(FrequencyRule::IntervalDays(10))
    }

    #[test]
    fn overdue_penalty_accrues_per_day() {
        let mut contract = interval_contract();
        contract.daily_penalty_amount = 50.0;
        // Due 2024-01-10; three days later.
        let status = derive_status(&contract, &[], date(2024, 1, 13));
        assert!(status.is_overdue);
        assert_eq!(status.days_overdue, 3);
        assert_eq!(status.current_penalty, 150.0);
    }

    #[test]
    fn not_overdue_on_the_due_date_itself() {
        let contract = interval_contract();
        let status = derive_status(&contract, &[], date(2024, 1, 10));
        assert!(!status.is_overdue);
        assert_eq!(status.current_penalty, 0.0);
    }

    #[test]
    fn zero_balance_settles_even_without_transactions() {
        let mut contract = interval_contract();
        contract.remaining_principal = Some(0.0);
        let status = derive_status(&contract, &[], date(2024, 6, 1));
        assert!(status.is_fully_paid);
        assert_eq!(status.next_due_date, None);
        assert!(!status.is_overdue);
    }

    #[test]
    fn installment_contract_settles_on_cumulative_payments() {
        let mut contract = interval_contract().with_payment_type(PaymentType::FixedInstallment);
        contract.total_installments = 3;
        let txns = vec![
            Transaction::new(contract.id, "Chen", 5_000.0, date(2024, 1, 10)),
            Transaction::new(contract.id, "Chen", 5_000.0, date(2024, 1, 20)),
        ];
        // Balance untouched, yet cumulative payments reach the principal.
        let status = derive_status(&contract, &txns, date(2024, 2, 1));
        assert!(status.is_fully_paid);
        assert_eq!(status.next_due_date, None);
        assert_eq!(status.total_paid, 10_000.0);
    }

    #[test]
    fn payoff_predicates_are_independent() {
        let fixed = interval_contract();
        assert!(!installments_met(&fixed, fixed.loan_amount));
        assert!(balance_cleared(0.0));
        assert!(balance_cleared(-1.0));
        assert!(!balance_cleared(0.01));
    }

    #[test]
    fn disbursed_amount_prefers_net_received_for_installments() {
        let mut contract = interval_contract().with_payment_type(PaymentType::FixedInstallment);
        contract.net_received_amount = Some(9_000.0);
        let status = derive_status(&contract, &[], date(2024, 1, 1));
        assert_eq!(status.actual_disbursed, 9_000.0);

        let mut plain = interval_contract();
        plain.service_fee = 500.0;
        let status = derive_status(&plain, &[], date(2024, 1, 1));
        assert_eq!(status.actual_disbursed, 9_500.0);
    }

    #[test]
    fn derive_all_sorts_missing_due_dates_last() {
        let due_later = {
            let mut c = interval_contract();
            c.last_paid_date = Some(date(2024, 2, 1));
            c.name = "later".into();
            c
        };
        let due_sooner = {
            let mut c = interval_contract();
            c.name = "sooner".into();
            c
        };
        let settled = {
            let mut c = interval_contract();
            c.remaining_principal = Some(0.0);
            c.name = "settled".into();
            c
        };
        let statuses = derive_all(&[due_later, settled, due_sooner], &[], date(2024, 1, 5));
        let names: Vec<&str> = statuses
            .iter()
            .map(|s| s.contract.name.as_str())
            .collect();
        assert_eq!(names, vec!["sooner", "later", "settled"]);
    }

    #[test]
    fn derivation_is_idempotent() {
        let mut contract = interval_contract();
        contract.daily_penalty_amount = 25.0;
        let txns = vec![Transaction::new(
            contract.id,
            "Chen",
            1_000.0,
            date(2024, 1, 10),
        )];
        let today = date(2024, 1, 15);
        let first = derive_status(&contract, &txns, today);
        let second = derive_status(&contract, &txns, today);
        assert_eq!(first.next_due_date, second.next_due_date);
        assert_eq!(first.current_penalty, second.current_penalty);
        assert_eq!(first.total_paid, second.total_paid);
        assert_eq!(first.is_fully_paid, second.is_fully_paid);
    }

    #[test]
    fn summarize_totals_the_book() {
        let mut overdue = interval_contract();
        overdue.daily_penalty_amount = 50.0;
        let clean = {
            let mut c = interval_contract();
            c.last_paid_date = Some(date(2024, 1, 12) + Duration::days(30));
            c
        };
        let contracts = vec![overdue.clone(), clean];
        let txns = vec![Transaction::new(
            overdue.id,
            "Chen",
            1_000.0,
            date(2024, 1, 10),
        )];
        let today = date(2024, 1, 12);
        let statuses = derive_all(&contracts, &txns, today);
        let stats = summarize(&contracts, &txns, &statuses);
        assert_eq!(stats.total_loaned, 20_000.0);
        assert_eq!(stats.total_collected, 1_000.0);
        assert_eq!(stats.overdue_count, 1);
        assert_eq!(stats.total_penalty, 100.0);
    }
}
