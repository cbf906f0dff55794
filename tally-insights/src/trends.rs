//! Monthly spending trends, overall and per category.

use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use tally_core::transaction::TransactionTable;

/// Net amount for one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    /// First day of the month
    pub month: NaiveDate,
    pub total: f64,
}

/// Summed amount for one (month, category) cell, in melted-row form ready
/// for a line-per-category chart.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryMonthly {
    pub month: NaiveDate,
    pub category: String,
    pub total: f64,
}

fn month_of(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap()
}

/// Net amount per calendar month, ascending.
pub fn monthly_totals(table: &TransactionTable) -> Vec<MonthlyTotal> {
    let mut months: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for txn in table.iter() {
        *months.entry(month_of(txn.date)).or_insert(0.0) += txn.amount;
    }
    months
        .into_iter()
        .map(|(month, total)| MonthlyTotal { month, total })
        .collect()
}

/// Summed amount per (month, category), months ascending, categories
/// alphabetical within a month. Cells with no transactions are absent.
pub fn category_trends(table: &TransactionTable) -> Vec<CategoryMonthly> {
    let mut cells: BTreeMap<(NaiveDate, String), f64> = BTreeMap::new();
    for txn in table.iter() {
        *cells
            .entry((month_of(txn.date), txn.category.clone()))
            .or_insert(0.0) += txn.amount;
    }
    cells
        .into_iter()
        .map(|((month, category), total)| CategoryMonthly {
            month,
            category,
            total,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::transaction::Transaction;

    fn txn(date: (i32, u32, u32), category: &str, amount: f64) -> Transaction {
        let mut t = Transaction::new(
            NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap(),
            "X",
            amount,
        );
        t.category = category.to_string();
        t
    }

    fn sample() -> TransactionTable {
        TransactionTable::new(vec![
            txn((2024, 1, 5), "Groceries", -40.0),
            txn((2024, 1, 20), "Groceries", -60.0),
            txn((2024, 1, 25), "Salary", 2000.0),
            txn((2024, 2, 3), "Groceries", -55.0),
            txn((2024, 2, 25), "Salary", 2000.0),
        ])
    }

    #[test]
    fn test_monthly_totals_grouped_and_sorted() {
        let totals = monthly_totals(&sample());
        assert_eq!(totals.len(), 2);
        assert_eq!(totals[0].month, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(totals[0].total, 1900.0);
        assert_eq!(totals[1].total, 1945.0);
    }

    #[test]
    fn test_category_trends_cells() {
        let cells = category_trends(&sample());
        let jan_groceries = cells
            .iter()
            .find(|c| c.month.month() == 1 && c.category == "Groceries")
            .unwrap();
        assert_eq!(jan_groceries.total, -100.0);

        let salary_months: Vec<u32> = cells
            .iter()
            .filter(|c| c.category == "Salary")
            .map(|c| c.month.month())
            .collect();
        assert_eq!(salary_months, vec![1, 2]);
    }

    #[test]
    fn test_empty_table_yields_no_rows() {
        assert!(monthly_totals(&TransactionTable::default()).is_empty());
        assert!(category_trends(&TransactionTable::default()).is_empty());
    }
}
