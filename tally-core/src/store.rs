//! Editable category-to-keywords mapping, persisted as a single JSON file.
//!
//! The store is tiny (a handful of categories, a few dozen keywords), so
//! every mutation rewrites the whole document. Categories keep their
//! insertion order, which is also the categorizer's match priority.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{StoreError, StoreResult};
use crate::normalize::normalize;
use crate::transaction::UNCATEGORIZED;

/// A spending category and the keywords that select it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    /// Normalized, upper-case, deduplicated
    pub keywords: Vec<String>,
}

impl Category {
    pub fn new(name: impl Into<String>, keywords: &[&str]) -> Self {
        Self {
            name: name.into(),
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
        }
    }
}

/// Ordered category mapping backed by a JSON file.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryStore {
    categories: Vec<Category>,
    path: PathBuf,
}

impl CategoryStore {
    /// Build a store over `path` with an explicit category list, without
    /// touching the filesystem until the first mutation.
    pub fn new(path: impl Into<PathBuf>, categories: Vec<Category>) -> Self {
        Self {
            categories,
            path: path.into(),
        }
    }

    /// Read the store from `path`, or seed the built-in defaults when the
    /// file does not exist yet.
    pub fn load(path: impl Into<PathBuf>) -> StoreResult<Self> {
        let path = path.into();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no category file, using defaults");
            return Ok(Self {
                categories: default_categories(),
                path,
            });
        }
        let raw = fs::read_to_string(&path)?;
        let categories: Vec<Category> = serde_json::from_str(&raw)?;
        Ok(Self { categories, path })
    }

    /// Rewrite the backing file with the full current mapping.
    ///
    /// Writes to a sibling temp file and renames over the target so a crash
    /// mid-write never leaves a half-document behind.
    pub fn save(&self) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(&self.categories)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        tracing::debug!(path = %self.path.display(), "category store saved");
        Ok(())
    }

    /// Category names in match-priority order.
    pub fn names(&self) -> Vec<&str> {
        self.categories.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    /// Insert an empty category and persist. Returns false (and leaves the
    /// store untouched) when the name is already present.
    pub fn add_category(&mut self, name: &str) -> StoreResult<bool> {
        if self.contains(name) {
            return Ok(false);
        }
        self.categories.push(Category {
            name: name.to_string(),
            keywords: Vec::new(),
        });
        self.save()?;
        tracing::info!(category = name, "category added");
        Ok(true)
    }

    /// Normalize `raw_text` into a keyword and append it to `category`,
    /// persisting on success.
    ///
    /// Returns `Ok(false)` when the keyword is empty or already present;
    /// `Err(StoreError::UnknownCategory)` when the category does not exist.
    pub fn add_keyword(&mut self, category: &str, raw_text: &str) -> StoreResult<bool> {
        let keyword = normalize(raw_text).trim().to_uppercase();

        let entry = self
            .categories
            .iter_mut()
            .find(|c| c.name == category)
            .ok_or_else(|| StoreError::UnknownCategory(category.to_string()))?;

        if keyword.is_empty() || entry.keywords.contains(&keyword) {
            return Ok(false);
        }

        entry.keywords.push(keyword.clone());
        self.save()?;
        tracing::info!(category, keyword = %keyword, "keyword added");
        Ok(true)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Default UK categories seeded with representative merchant keywords.
///
/// "Uncategorized" comes first and carries no keywords; it is the fallback,
/// never a match target.
pub fn default_categories() -> Vec<Category> {
    vec![
        Category::new(UNCATEGORIZED, &[]),
        Category::new(
            "Groceries",
            &[
                "COOP", "TESCO", "SAINSBURY", "ALDI", "LIDL", "ASDA", "MORRISONS", "WAITROSE",
            ],
        ),
        Category::new(
            "Dining & Pubs",
            &["COSTA", "STARBUCKS", "CAFE", "RESTAURANT", "PUB", "BAR"],
        ),
        Category::new(
            "Transport",
            &["TRANSPORT", "TAXI", "UBER", "TRAIN", "BUS", "FUEL", "PARKING"],
        ),
        Category::new("Shopping", &["AMAZON", "NEXT", "MARKS", "SPENCER", "BOOTS"]),
        Category::new(
            "Bills & Utilities",
            &[
                "ELECTRIC",
                "GAS",
                "WATER",
                "COUNCIL TAX",
                "TV LICENSE",
                "INTERNET",
                "PHONE",
            ],
        ),
        Category::new(
            "Entertainment",
            &["CINEMA", "NETFLIX", "SPOTIFY", "STEAM"],
        ),
        Category::new("Health", &["NHS", "PHARMACY", "DENTAL", "OPTICAL"]),
        Category::new("Rent & Housing", &["RENT", "MORTGAGE", "INSURANCE"]),
        Category::new("Transfers", &["REVOLUT", "TRANSFER", "SAVINGS"]),
        Category::new("Direct Debits", &["DIRECT DEBIT"]),
        Category::new("Salary", &["SALARY"]),
        Category::new("Bonus", &["BONUS"]),
        Category::new("Interest", &["INTEREST"]),
        Category::new("Refunds", &["REFUND", "REBATE"]),
        Category::new("Other Income", &[]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, CategoryStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = CategoryStore::load(dir.path().join("categories.json")).unwrap();
        (dir, store)
    }

    #[test]
    fn test_defaults_when_file_absent() {
        let (_dir, store) = temp_store();
        assert!(store.contains(UNCATEGORIZED));
        assert!(store.contains("Groceries"));
        assert_eq!(store.names()[0], UNCATEGORIZED);
    }

    #[test]
    fn test_save_load_round_trip() {
        let (dir, mut store) = temp_store();
        store.add_category("Holidays").unwrap();
        store.add_keyword("Holidays", "easyjet flight").unwrap();

        let reloaded = CategoryStore::load(dir.path().join("categories.json")).unwrap();
        assert_eq!(reloaded.names(), store.names());
        let holidays = reloaded.iter().find(|c| c.name == "Holidays").unwrap();
        assert_eq!(holidays.keywords, vec!["EASYJET FLIGHT"]);
    }

    #[test]
    fn test_add_category_duplicate_is_noop() {
        let (_dir, mut store) = temp_store();
        assert!(store.add_category("Holidays").unwrap());
        assert!(!store.add_category("Holidays").unwrap());
        let count = store.iter().filter(|c| c.name == "Holidays").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_add_keyword_normalizes_input() {
        let (_dir, mut store) = temp_store();
        assert!(store.add_keyword("Shopping", "  argos store 42 clp  ").unwrap());
        let shopping = store.iter().find(|c| c.name == "Shopping").unwrap();
        assert!(shopping.keywords.contains(&"ARGOS STORE 42".to_string()));
    }

    #[test]
    fn test_add_keyword_idempotent() {
        let (_dir, mut store) = temp_store();
        assert!(store.add_keyword("Shopping", "ARGOS").unwrap());
        assert!(!store.add_keyword("Shopping", "argos").unwrap());
        let shopping = store.iter().find(|c| c.name == "Shopping").unwrap();
        assert_eq!(
            shopping.keywords.iter().filter(|k| *k == "ARGOS").count(),
            1
        );
    }

    #[test]
    fn test_add_keyword_empty_rejected() {
        let (_dir, mut store) = temp_store();
        assert!(!store.add_keyword("Shopping", "   ").unwrap());
    }

    #[test]
    fn test_add_keyword_unknown_category_errors() {
        let (_dir, mut store) = temp_store();
        let err = store.add_keyword("Nonsense", "TESCO").unwrap_err();
        assert!(matches!(err, StoreError::UnknownCategory(name) if name == "Nonsense"));
    }

    #[test]
    fn test_mutations_persist_immediately() {
        let (dir, mut store) = temp_store();
        store.add_keyword("Groceries", "ICELAND").unwrap();
        // A fresh load (as after a crash) must already see the keyword.
        let reloaded = CategoryStore::load(dir.path().join("categories.json")).unwrap();
        let groceries = reloaded.iter().find(|c| c.name == "Groceries").unwrap();
        assert!(groceries.keywords.contains(&"ICELAND".to_string()));
    }
}
