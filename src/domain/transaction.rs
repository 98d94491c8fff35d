use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A recorded payment. Append-only: records are removed wholesale when
/// deleted, never rewritten, and removal does not undo their effect on the
/// contract's balance or cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    pub contract_id: Uuid,
    /// Denormalized customer name for listings and reports.
    pub customer_name: String,
    /// Total cash received.
    pub amount: f64,
    /// Portion applied to reduce the outstanding principal.
    #[serde(default)]
    pub principal_paid: f64,
    pub date: NaiveDate,
    #[serde(default)]
    pub note: String,
    /// The due date this payment was intended to satisfy, captured before
    /// the contract's cycle advanced.
    #[serde(default)]
    pub cycle_date_snapshot: Option<NaiveDate>,
}

impl Transaction {
    pub fn new(
        contract_id: Uuid,
        customer_name: impl Into<String>,
        amount: f64,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            contract_id,
            customer_name: customer_name.into(),
            amount,
            principal_paid: 0.0,
            date,
            note: String::new(),
            cycle_date_snapshot: None,
        }
    }
}
