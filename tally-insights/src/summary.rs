//! Headline totals for one statement.

use tally_core::transaction::TransactionTable;

/// Income / expense / net metrics shown at the top of a report.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    /// Sum of all credits
    pub total_income: f64,
    /// Magnitude of all debits
    pub total_expenses: f64,
    /// Income minus expenses
    pub net: f64,
}

pub fn summarize(table: &TransactionTable) -> Summary {
    let total_income: f64 = table.credits().iter().map(|t| t.amount).sum();
    let total_debits: f64 = table.debits().iter().map(|t| t.amount).sum();
    Summary {
        total_income,
        total_expenses: total_debits.abs(),
        net: total_income + total_debits,
    }
}
