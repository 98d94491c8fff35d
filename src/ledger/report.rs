//! Per-customer report grouping over derived contract statuses.

use super::engine::ContractStatus;

/// One customer's loans with their aggregate figures.
#[derive(Debug, Clone)]
pub struct CustomerGroup {
    pub name: String,
    pub loans: Vec<ContractStatus>,
    pub total_loaned: f64,
    pub total_paid: f64,
}

/// Groups statuses by customer name, preserving first-seen order.
pub fn group_by_customer(statuses: &[ContractStatus]) -> Vec<CustomerGroup> {
    let mut groups: Vec<CustomerGroup> = Vec::new();
    for status in statuses {
        let name = status.contract.name.as_str();
        let group = match groups.iter_mut().find(|group| group.name == name) {
            Some(existing) => existing,
            None => {
                groups.push(CustomerGroup {
                    name: name.to_string(),
                    loans: Vec::new(),
                    total_loaned: 0.0,
                    total_paid: 0.0,
                });
                groups.last_mut().expect("group just pushed")
            }
        };
        group.total_loaned += status.contract.loan_amount;
        group.total_paid += status.total_paid;
        group.loans.push(status.clone());
    }
    groups
}
