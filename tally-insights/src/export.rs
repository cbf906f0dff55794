//! Monthly snapshot export of a categorized table.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use tally_core::transaction::TransactionTable;

/// Write the table to `<dir>/YYYY_MM.csv`, named from the latest
/// transaction date. Creates `dir` as needed and returns the written path.
pub fn save_monthly_snapshot(table: &TransactionTable, dir: &Path) -> Result<PathBuf> {
    let (_, latest) = table
        .date_range()
        .context("cannot snapshot an empty table")?;

    fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    let path = dir.join(format!("{}.csv", latest.format("%Y_%m")));

    let mut wtr = csv::Writer::from_path(&path)
        .with_context(|| format!("write {}", path.display()))?;
    wtr.write_record(["Date", "Details", "Amount", "Direction", "Category"])?;
    for txn in table.iter() {
        wtr.write_record([
            txn.date.format("%d/%m/%Y").to_string(),
            txn.details.clone(),
            format!("{:.2}", txn.amount),
            txn.direction.to_string(),
            txn.category.clone(),
        ])?;
    }
    wtr.flush()?;

    Ok(path)
}
