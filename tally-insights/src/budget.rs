//! Per-category budget limits and progress against actual spending.
//!
//! Limits live with the session, not on disk; only the category store
//! survives a restart.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use tally_core::transaction::TransactionTable;

/// Progress of one category against its limit.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetStatus {
    pub category: String,
    pub limit: f64,
    /// Magnitude of the category's summed amounts
    pub spent: f64,
    /// spent / limit clamped to [0, 1]; 0.0 when no limit is set
    pub progress: f64,
}

/// Category-name-keyed budget limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetBook {
    limits: BTreeMap<String, f64>,
}

impl BudgetBook {
    pub fn set_limit(&mut self, category: &str, limit: f64) {
        self.limits.insert(category.to_string(), limit);
    }

    pub fn limit(&self, category: &str) -> f64 {
        self.limits.get(category).copied().unwrap_or(0.0)
    }

    /// Budget progress for every category present in the table, in first
    /// appearance order. Categories without a limit report progress 0.0.
    pub fn statuses(&self, table: &TransactionTable) -> Vec<BudgetStatus> {
        let mut seen = Vec::new();
        for txn in table.iter() {
            if !seen.iter().any(|c| c == &txn.category) {
                seen.push(txn.category.clone());
            }
        }

        seen.into_iter()
            .map(|category| {
                let spent: f64 = table
                    .iter()
                    .filter(|t| t.category == category)
                    .map(|t| t.amount)
                    .sum::<f64>()
                    .abs();
                let limit = self.limit(&category);
                let progress = if limit > 0.0 {
                    (spent / limit).min(1.0)
                } else {
                    0.0
                };
                BudgetStatus {
                    category,
                    limit,
                    spent,
                    progress,
                }
            })
            .collect()
    }
}
