//! Derived views over the ledgers: sorted lists and totals.

use super::models::{Nature, Transaction};

/// The sum of the amounts in `transactions`, or zero if there are none.
pub fn total_amount(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .fold(0.0, |total, transaction| total + transaction.amount)
}

/// A copy of `transactions` ordered from newest to oldest.
///
/// Transactions with the same timestamp keep their relative order.
pub fn sorted_descending_by_time(transactions: &[Transaction]) -> Vec<Transaction> {
    let mut sorted = transactions.to_vec();
    sorted.sort_by(|a, b| b.time.cmp(&a.time));
    sorted
}

/// Both ledgers merged and ordered from newest to oldest.
///
/// On equal timestamps incomes come before outcomes.
pub fn combined_sorted(incomes: &[Transaction], outcomes: &[Transaction]) -> Vec<Transaction> {
    let combined: Vec<Transaction> = incomes.iter().chain(outcomes).cloned().collect();
    sorted_descending_by_time(&combined)
}

/// A read-only view of both ledgers and everything derived from them.
///
/// Snapshots are rebuilt after every change to a ledger and shared with the
/// views that render them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerSnapshot {
    /// The incomes ledger in insertion order.
    pub incomes: Vec<Transaction>,
    /// The outcomes ledger in insertion order.
    pub outcomes: Vec<Transaction>,
    /// The incomes ledger, newest first.
    pub sorted_incomes: Vec<Transaction>,
    /// The outcomes ledger, newest first.
    pub sorted_outcomes: Vec<Transaction>,
    /// Both ledgers, newest first.
    pub combined_sorted: Vec<Transaction>,
    /// The sum of all incomes.
    pub total_incomes: f64,
    /// The sum of all outcomes.
    pub total_outcomes: f64,
}

impl LedgerSnapshot {
    /// Derive the sorted lists and totals from the two ledgers.
    pub fn new(incomes: Vec<Transaction>, outcomes: Vec<Transaction>) -> Self {
        Self {
            sorted_incomes: sorted_descending_by_time(&incomes),
            sorted_outcomes: sorted_descending_by_time(&outcomes),
            combined_sorted: combined_sorted(&incomes, &outcomes),
            total_incomes: total_amount(&incomes),
            total_outcomes: total_amount(&outcomes),
            incomes,
            outcomes,
        }
    }

    /// A copy of this snapshot with the ledger `nature` replaced.
    pub fn with_ledger(&self, nature: Nature, transactions: Vec<Transaction>) -> Self {
        match nature {
            Nature::Incomes => Self::new(transactions, self.outcomes.clone()),
            Nature::Outcomes => Self::new(self.incomes.clone(), transactions),
        }
    }

    /// The ledger `nature` in insertion order.
    pub fn ledger(&self, nature: Nature) -> &[Transaction] {
        match nature {
            Nature::Incomes => &self.incomes,
            Nature::Outcomes => &self.outcomes,
        }
    }

    /// The ledger `nature`, newest first.
    pub fn sorted(&self, nature: Nature) -> &[Transaction] {
        match nature {
            Nature::Incomes => &self.sorted_incomes,
            Nature::Outcomes => &self.sorted_outcomes,
        }
    }

    /// The sum of the ledger `nature`.
    pub fn total(&self, nature: Nature) -> f64 {
        match nature {
            Nature::Incomes => self.total_incomes,
            Nature::Outcomes => self.total_outcomes,
        }
    }

    /// Total incomes minus total outcomes.
    pub fn net_balance(&self) -> f64 {
        self.total_incomes - self.total_outcomes
    }
}
