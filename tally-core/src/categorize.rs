//! Keyword-driven category assignment.

use crate::normalize::normalize;
use crate::store::CategoryStore;
use crate::transaction::{TransactionTable, UNCATEGORIZED};

/// Assign a category to every transaction in the table.
///
/// Matching is a case-insensitive substring test of each keyword against the
/// normalized details. The first category in store order with a matching
/// keyword wins; later categories are not consulted for that row, and rows
/// with no match stay "Uncategorized". Categories without keywords
/// (including "Uncategorized" itself) never auto-assign.
///
/// Returns a new table rather than mutating in place.
pub fn categorize(table: &TransactionTable, store: &CategoryStore) -> TransactionTable {
    let rows = table
        .iter()
        .map(|txn| {
            let mut txn = txn.clone();
            txn.category = match_category(&txn.details, store)
                .unwrap_or(UNCATEGORIZED)
                .to_string();
            txn
        })
        .collect();
    TransactionTable::new(rows)
}

/// First category in store order whose keyword list hits `details`.
pub fn match_category<'a>(details: &str, store: &'a CategoryStore) -> Option<&'a str> {
    let cleaned = normalize(details);
    for category in store.iter() {
        if category.name == UNCATEGORIZED || category.keywords.is_empty() {
            continue;
        }
        if category
            .keywords
            .iter()
            .any(|keyword| cleaned.contains(keyword.to_uppercase().as_str()))
        {
            return Some(category.name.as_str());
        }
    }
    None
}
