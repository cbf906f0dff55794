//! One user session: the category store, the current statement and the
//! budget book, with every interaction funneled through a single owner.
//!
//! The session is UI-agnostic — the interactive loop in `repl.rs` is one
//! consumer; the one-shot subcommands drive the same methods.

use anyhow::{Context, Result, bail};

use tally_core::categorize::categorize;
use tally_core::feedback::apply_edit;
use tally_core::store::CategoryStore;
use tally_core::transaction::TransactionTable;
use tally_ingest::{LoadError, load_statement};
use tally_insights::budget::BudgetBook;

pub struct Session {
    store: CategoryStore,
    table: Option<TransactionTable>,
    budgets: BudgetBook,
}

impl Session {
    pub fn open(store: CategoryStore) -> Self {
        Self {
            store,
            table: None,
            budgets: BudgetBook::default(),
        }
    }

    pub fn store(&self) -> &CategoryStore {
        &self.store
    }

    pub fn table(&self) -> Option<&TransactionTable> {
        self.table.as_ref()
    }

    pub fn budgets(&self) -> &BudgetBook {
        &self.budgets
    }

    /// Parse and categorize a statement, replacing the current table.
    ///
    /// On failure the previous table (if any) stays in place.
    pub fn load_statement(&mut self, bytes: &[u8]) -> Result<usize, LoadError> {
        let table = load_statement(bytes, &self.store)?;
        let count = table.len();
        self.table = Some(table);
        tracing::info!(count, "session table replaced");
        Ok(count)
    }

    /// Manually reassign one row's category, teaching the store a keyword.
    /// Returns whether a keyword was learned.
    pub fn edit_category(&mut self, index: usize, new_category: &str) -> Result<bool> {
        let table = self.table.as_mut().context("no statement loaded")?;
        let txn = table
            .get_mut(index)
            .with_context(|| format!("no transaction #{index}"))?;
        Ok(apply_edit(txn, new_category, &mut self.store)?)
    }

    /// Add an empty category to the store. False when it already exists.
    pub fn add_category(&mut self, name: &str) -> Result<bool> {
        Ok(self.store.add_category(name)?)
    }

    /// Teach the store a keyword directly, without touching the table.
    pub fn add_keyword(&mut self, category: &str, keyword: &str) -> Result<bool> {
        Ok(self.store.add_keyword(category, keyword)?)
    }

    /// Re-run the categorizer over the current table with the store as it
    /// stands now. No-op without a table.
    pub fn recategorize(&mut self) {
        if let Some(table) = &self.table {
            self.table = Some(categorize(table, &self.store));
        }
    }

    /// Set a budget limit for an existing category.
    pub fn set_budget(&mut self, category: &str, limit: f64) -> Result<()> {
        if !self.store.contains(category) {
            bail!("unknown category: {category}");
        }
        self.budgets.set_limit(category, limit);
        Ok(())
    }
}
