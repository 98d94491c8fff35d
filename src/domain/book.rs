use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{contract::Contract, transaction::Transaction};

pub const CURRENT_SCHEMA_VERSION: u8 = 1;

/// The persisted unit: every contract and the flat payment log, loaded at
/// startup and rewritten in full on every mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanBook {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub contracts: Vec<Contract>,
    /// Newest-first by convention; new records are inserted at the front.
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "LoanBook::schema_version_default")]
    pub schema_version: u8,
}

impl LoanBook {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            contracts: Vec::new(),
            transactions: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_contract(&mut self, contract: Contract) -> Uuid {
        let id = contract.id;
        self.contracts.push(contract);
        self.touch();
        id
    }

    /// Inserts at the front so the log stays newest-first.
    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        self.transactions.insert(0, transaction);
        self.touch();
        id
    }

    pub fn contract(&self, id: Uuid) -> Option<&Contract> {
        self.contracts.iter().find(|contract| contract.id == id)
    }

    pub fn contract_mut(&mut self, id: Uuid) -> Option<&mut Contract> {
        self.contracts.iter_mut().find(|contract| contract.id == id)
    }

    /// Removes a contract without touching its transactions; orphaned
    /// records stay in the log and are surfaced as warnings on load.
    pub fn remove_contract(&mut self, id: Uuid) -> Option<Contract> {
        let index = self
            .contracts
            .iter()
            .position(|contract| contract.id == id)?;
        let removed = self.contracts.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        let removed = self.transactions.remove(index);
        self.touch();
        Some(removed)
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.len()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn transactions_stay_newest_first() {
        let mut book = LoanBook::new("Book");
        let contract = Contract::new("Wang", 1000.0, None);
        let contract_id = book.add_contract(contract);
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let first = book.add_transaction(Transaction::new(contract_id, "Wang", 100.0, date));
        let second = book.add_transaction(Transaction::new(contract_id, "Wang", 200.0, date));
        assert_eq!(book.transactions[0].id, second);
        assert_eq!(book.transactions[1].id, first);
    }

    #[test]
    fn removing_a_contract_leaves_its_transactions() {
        let mut book = LoanBook::new("Book");
        let contract_id = book.add_contract(Contract::new("Wang", 1000.0, None));
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        book.add_transaction(Transaction::new(contract_id, "Wang", 100.0, date));

        assert!(book.remove_contract(contract_id).is_some());
        assert_eq!(book.transaction_count(), 1);
        assert!(book.contract(contract_id).is_none());
    }
}
