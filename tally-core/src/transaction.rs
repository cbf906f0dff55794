//! Transaction and table types shared by the loader, categorizer and views.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Category assigned to every transaction until a keyword matches.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Flow direction, derived from the sign of the amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "credit")]
    Credit,
    #[serde(rename = "debit")]
    Debit,
}

impl Direction {
    /// Credit for positive amounts; zero counts as Debit.
    pub fn from_amount(amount: f64) -> Self {
        if amount > 0.0 {
            Direction::Credit
        } else {
            Direction::Debit
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Credit => write!(f, "Credit"),
            Direction::Debit => write!(f, "Debit"),
        }
    }
}

/// One bank-statement line item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Calendar date of the transaction
    pub date: NaiveDate,
    /// Raw description as exported by the bank
    pub details: String,
    /// Signed amount; negative = outflow
    pub amount: f64,
    /// Derived from the amount sign
    pub direction: Direction,
    /// Assigned category name; always a key of the category store
    pub category: String,
}

impl Transaction {
    /// Create a transaction with the direction derived and no category yet.
    pub fn new(date: NaiveDate, details: impl Into<String>, amount: f64) -> Self {
        Self {
            date,
            details: details.into(),
            amount,
            direction: Direction::from_amount(amount),
            category: UNCATEGORIZED.to_string(),
        }
    }

    pub fn is_debit(&self) -> bool {
        self.direction == Direction::Debit
    }

    pub fn is_credit(&self) -> bool {
        self.direction == Direction::Credit
    }

    /// Magnitude regardless of direction
    pub fn abs_amount(&self) -> f64 {
        self.amount.abs()
    }
}

/// Ordered collection of transactions from one statement upload.
///
/// The table is the single source of truth: the debit/credit partitions are
/// derived views and edits flow back through `set_category`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionTable {
    rows: Vec<Transaction>,
}

impl TransactionTable {
    pub fn new(rows: Vec<Transaction>) -> Self {
        Self { rows }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transaction> {
        self.rows.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Transaction> {
        self.rows.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Transaction> {
        self.rows.get_mut(index)
    }

    /// Outflows, in table order.
    pub fn debits(&self) -> Vec<&Transaction> {
        self.rows.iter().filter(|t| t.is_debit()).collect()
    }

    /// Inflows, in table order.
    pub fn credits(&self) -> Vec<&Transaction> {
        self.rows.iter().filter(|t| t.is_credit()).collect()
    }

    /// Earliest and latest transaction dates, if the table is non-empty.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.rows.iter().map(|t| t.date).min()?;
        let max = self.rows.iter().map(|t| t.date).max()?;
        Some((min, max))
    }
}
