use chrono::NaiveDate;
use loan_core::core::{ContractService, PaymentService, TransactionService};
use loan_core::domain::{Contract, FrequencyRule, LoanBook, PaymentType};
use loan_core::ledger::{derive_status, ContractField, PaymentRequest};
use loan_core::storage::book_warnings;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_contract() -> Contract {
    let mut c = Contract::new("Chen", 10_000.0, Some(date(2024, 1, 1)))
        .with_frequency(FrequencyRule::IntervalDays(10));
    c.interest_rate = 10.0;
    c.payment_amount = 1_000.0;
    c
}

#[test]
fn loan_lifecycle_from_creation_to_payoff() {
    let mut book = LoanBook::new("Book");
    let id = ContractService::add(&mut book, new_contract()).unwrap();

    // Pay two cycles, then clear the remaining principal in one go.
    for (pay_date, due) in [(date(2024, 1, 10), date(2024, 1, 10)), (date(2024, 1, 19), date(2024, 1, 20))] {
        PaymentService::record(
            &mut book,
            id,
            &PaymentRequest {
                amount: 1_000.0,
                principal_reduction: 0.0,
                advance_cycle: true,
                date: pay_date,
            },
            pay_date,
        )
        .unwrap();
        assert_eq!(book.contract(id).unwrap().last_paid_date, Some(due));
    }

    PaymentService::record(
        &mut book,
        id,
        &PaymentRequest {
            amount: 11_000.0,
            principal_reduction: 10_000.0,
            advance_cycle: true,
            date: date(2024, 1, 25),
        },
        date(2024, 1, 25),
    )
    .unwrap();

    let contract = book.contract(id).unwrap().clone();
    assert_eq!(contract.remaining_principal, Some(0.0));
    let status = derive_status(&contract, &book.transactions, date(2024, 2, 15));
    assert!(status.is_fully_paid);
    assert_eq!(status.next_due_date, None);
    assert_eq!(status.total_paid, 13_000.0);
    assert_eq!(book.transaction_count(), 3);
}

#[test]
fn editing_linked_fields_keeps_the_contract_consistent() {
    let mut book = LoanBook::new("Book");
    let id = ContractService::add(&mut book, new_contract()).unwrap();

    ContractService::update(&mut book, id, ContractField::PaymentAmount, |c| {
        c.payment_amount = 1_500.0;
    })
    .unwrap();
    assert_eq!(book.contract(id).unwrap().interest_rate, 15.0);

    ContractService::update(&mut book, id, ContractField::PaymentType, |c| {
        c.payment_type = PaymentType::FixedInstallment;
        c.total_installments = 4;
    })
    .unwrap();
    assert_eq!(book.contract(id).unwrap().payment_amount, 2_500.0);
}

#[test]
fn deleting_a_transaction_leaves_balance_and_cycle_untouched() {
    let mut book = LoanBook::new("Book");
    let id = ContractService::add(&mut book, new_contract()).unwrap();
    let txn_id = PaymentService::record(
        &mut book,
        id,
        &PaymentRequest {
            amount: 1_000.0,
            principal_reduction: 300.0,
            advance_cycle: true,
            date: date(2024, 1, 10),
        },
        date(2024, 1, 10),
    )
    .unwrap();

    let before = book.contract(id).unwrap().clone();
    TransactionService::remove(&mut book, txn_id).unwrap();
    let after = book.contract(id).unwrap();
    assert_eq!(after.remaining_principal, before.remaining_principal);
    assert_eq!(after.last_paid_date, before.last_paid_date);
    assert_eq!(book.transaction_count(), 0);
}

#[test]
fn deleting_a_contract_orphans_its_transactions() {
    let mut book = LoanBook::new("Book");
    let id = ContractService::add(&mut book, new_contract()).unwrap();
    PaymentService::record(
        &mut book,
        id,
        &PaymentRequest {
            amount: 1_000.0,
            principal_reduction: 0.0,
            advance_cycle: true,
            date: date(2024, 1, 10),
        },
        date(2024, 1, 10),
    )
    .unwrap();

    ContractService::remove(&mut book, id).unwrap();
    assert_eq!(book.transaction_count(), 1);
    let warnings = book_warnings(&book);
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("unknown contract"));
}
