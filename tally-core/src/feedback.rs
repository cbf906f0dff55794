//! User-correction feedback: manual reassignments teach the store.

use crate::error::StoreResult;
use crate::store::CategoryStore;
use crate::transaction::Transaction;

/// Apply a manual category edit to one transaction.
///
/// When the edit actually changes the category, the row is reassigned and
/// the transaction's normalized details are appended to the new category's
/// keyword list, so identical descriptions auto-assign on the next upload.
/// Re-applying the current category is a no-op.
///
/// Returns whether a keyword was learned from this edit.
pub fn apply_edit(
    txn: &mut Transaction,
    new_category: &str,
    store: &mut CategoryStore,
) -> StoreResult<bool> {
    if txn.category == new_category {
        return Ok(false);
    }
    // Learn first: an unknown category must leave the row untouched so its
    // category always names a store entry.
    let learned = store.add_keyword(new_category, &txn.details)?;
    txn.category = new_category.to_string();
    Ok(learned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categorize::match_category;
    use crate::error::StoreError;
    use chrono::NaiveDate;

    fn fixture() -> (tempfile::TempDir, CategoryStore, Transaction) {
        let dir = tempfile::tempdir().unwrap();
        let store = CategoryStore::load(dir.path().join("categories.json")).unwrap();
        let txn = Transaction::new(
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            "HOMEBASE LTD 0042 CLP",
            -54.20,
        );
        (dir, store, txn)
    }

    #[test]
    fn test_edit_reassigns_and_learns_keyword() {
        let (_dir, mut store, mut txn) = fixture();
        let learned = apply_edit(&mut txn, "Shopping", &mut store).unwrap();
        assert!(learned);
        assert_eq!(txn.category, "Shopping");

        let shopping = store.iter().find(|c| c.name == "Shopping").unwrap();
        assert!(shopping.keywords.contains(&"HOMEBASE LTD 0042".to_string()));

        // The same description now auto-assigns.
        assert_eq!(
            match_category("HOMEBASE LTD 0042 CLP", &store),
            Some("Shopping")
        );
    }

    #[test]
    fn test_same_category_is_noop() {
        let (_dir, mut store, mut txn) = fixture();
        txn.category = "Shopping".to_string();
        let learned = apply_edit(&mut txn, "Shopping", &mut store).unwrap();
        assert!(!learned);
        let shopping = store.iter().find(|c| c.name == "Shopping").unwrap();
        assert!(!shopping.keywords.iter().any(|k| k.contains("HOMEBASE")));
    }

    #[test]
    fn test_unknown_category_surfaces_store_error() {
        let (_dir, mut store, mut txn) = fixture();
        let err = apply_edit(&mut txn, "Does Not Exist", &mut store).unwrap_err();
        assert!(matches!(err, StoreError::UnknownCategory(_)));
        // The row still points at a real store entry.
        assert_eq!(txn.category, crate::transaction::UNCATEGORIZED);
    }

    #[test]
    fn test_duplicate_keyword_not_added_twice() {
        let (_dir, mut store, mut txn) = fixture();
        apply_edit(&mut txn, "Shopping", &mut store).unwrap();
        txn.category = "Groceries".to_string();
        let learned = apply_edit(&mut txn, "Shopping", &mut store).unwrap();
        assert!(!learned);
        let shopping = store.iter().find(|c| c.name == "Shopping").unwrap();
        assert_eq!(
            shopping
                .keywords
                .iter()
                .filter(|k| *k == "HOMEBASE LTD 0042")
                .count(),
            1
        );
    }
}
