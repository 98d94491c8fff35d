use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::frequency::{self, FrequencyRule};

/// A single loan agreement with its own principal, rate, and recurrence rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contract {
    pub id: Uuid,
    /// Customer the loan was issued to.
    pub name: String,
    /// Original principal; fixed for the life of the contract.
    pub loan_amount: f64,
    /// Outstanding principal. Legacy records may lack the field, in which
    /// case readers fall back to `loan_amount`.
    #[serde(default)]
    pub remaining_principal: Option<f64>,
    #[serde(default)]
    pub loan_start_date: Option<NaiveDate>,
    /// Set to the satisfied due date by cycle-advancing payments.
    #[serde(default)]
    pub last_paid_date: Option<NaiveDate>,
    /// Per-cycle rate in percent; meaningful only for `PaymentType::Auto`.
    #[serde(default)]
    pub interest_rate: f64,
    /// Amount due per cycle; kept in sync with the rate fields by
    /// `ledger::sync` and by principal-reducing payments.
    #[serde(default)]
    pub payment_amount: f64,
    #[serde(default)]
    pub payment_type: PaymentType,
    #[serde(default, deserialize_with = "frequency::deserialize_lenient")]
    pub frequency: Option<FrequencyRule>,
    /// One-time fee deducted from the disbursed amount for non-installment types.
    #[serde(default)]
    pub service_fee: f64,
    /// Penalty charged per overdue day.
    #[serde(default)]
    pub daily_penalty_amount: f64,
    /// Cash actually handed over; installment contracts only.
    #[serde(default)]
    pub net_received_amount: Option<f64>,
    /// Number of installments; installment contracts only.
    #[serde(default)]
    pub total_installments: u32,
    pub created_at: DateTime<Utc>,
}

impl Contract {
    pub fn new(name: impl Into<String>, loan_amount: f64, start: Option<NaiveDate>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            loan_amount,
            remaining_principal: Some(loan_amount),
            loan_start_date: start,
            last_paid_date: None,
            interest_rate: 0.0,
            payment_amount: 0.0,
            payment_type: PaymentType::Auto,
            frequency: None,
            service_fee: 0.0,
            daily_penalty_amount: 0.0,
            net_received_amount: None,
            total_installments: 0,
            created_at: Utc::now(),
        }
    }

    pub fn with_frequency(mut self, frequency: FrequencyRule) -> Self {
        self.frequency = Some(frequency);
        self
    }

    pub fn with_payment_type(mut self, payment_type: PaymentType) -> Self {
        self.payment_type = payment_type;
        self
    }

    /// Outstanding principal, falling back to the original loan amount for
    /// records created before the field existed.
    pub fn current_principal(&self) -> f64 {
        self.remaining_principal.unwrap_or(self.loan_amount)
    }
}

/// Determines how `payment_amount` and `interest_rate` stay synchronized.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    /// Rate and per-cycle amount recompute from each other on edit.
    #[default]
    Auto,
    /// Per-cycle amount held constant under all edits.
    Fixed,
    /// Principal split across `total_installments` equal payments.
    FixedInstallment,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_contract_starts_with_full_principal_and_no_cycle() {
        let contract = Contract::new("Chen", 10_000.0, None);
        assert_eq!(contract.remaining_principal, Some(10_000.0));
        assert_eq!(contract.current_principal(), 10_000.0);
        assert!(contract.last_paid_date.is_none());
    }

    #[test]
    fn current_principal_falls_back_to_loan_amount() {
        let mut contract = Contract::new("Chen", 8_000.0, None);
        contract.remaining_principal = None;
        assert_eq!(contract.current_principal(), 8_000.0);
    }

    #[test]
    fn legacy_record_without_optional_fields_deserializes() {
        let json = r#"{
            "id": "c6e7e3a0-0000-0000-0000-000000000001",
            "name": "Lin",
            "loan_amount": 5000.0,
            "created_at": "2024-01-01T00:00:00Z"
        }"#;
        let contract: Contract = serde_json::from_str(json).unwrap();
        assert_eq!(contract.payment_type, PaymentType::Auto);
        assert!(contract.frequency.is_none());
        assert!(contract.remaining_principal.is_none());
        assert_eq!(contract.current_principal(), 5000.0);
    }
}
