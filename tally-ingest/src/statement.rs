//! CSV statement loader.
//!
//! Accepts the common export shape {Date, Details, Amount, ...} and the
//! Barclays shape {Date, Amount, Memo, Subcategory, ...}, which is projected
//! down to {Date, Amount, Memo→Details}. Dates are DD/MM/YYYY; the amount
//! sign carries the direction.

use chrono::NaiveDate;
use thiserror::Error;

use tally_core::categorize::categorize;
use tally_core::store::CategoryStore;
use tally_core::transaction::{Transaction, TransactionTable};

const DATE_FORMAT: &str = "%d/%m/%Y";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("missing required columns: {0}")]
    MissingColumns(String),

    #[error("row {row}: unparseable date {value:?} (expected DD/MM/YYYY)")]
    InvalidDate { row: usize, value: String },

    #[error("row {row}: unparseable amount {value:?}")]
    InvalidAmount { row: usize, value: String },
}

/// Column layout resolved from the header row.
struct Layout {
    date: usize,
    details: usize,
    amount: usize,
}

fn resolve_layout(headers: &csv::StringRecord) -> Result<Layout, LoadError> {
    let find = |name: &str| headers.iter().position(|h| h == name);

    // Barclays exports carry Memo/Subcategory; Memo holds the description.
    let barclays = find("Subcategory").is_some() && find("Memo").is_some();
    let details_column = if barclays { "Memo" } else { "Details" };

    let date = find("Date");
    let details = find(details_column);
    let amount = find("Amount");

    if let (Some(date), Some(details), Some(amount)) = (date, details, amount) {
        return Ok(Layout {
            date,
            details,
            amount,
        });
    }

    let mut missing = Vec::new();
    if date.is_none() {
        missing.push("Date");
    }
    if details.is_none() {
        missing.push("Details");
    }
    if amount.is_none() {
        missing.push("Amount");
    }
    Err(LoadError::MissingColumns(missing.join(", ")))
}

/// Parse raw statement bytes into a categorized transaction table.
///
/// Leading/trailing whitespace around headers and field values is
/// insignificant. Any parse failure aborts the load; no partial table is
/// returned.
pub fn load_statement(bytes: &[u8], store: &CategoryStore) -> Result<TransactionTable, LoadError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let layout = resolve_layout(rdr.headers()?)?;

    let mut rows = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;
        let row = i + 1;

        let date_raw = record.get(layout.date).unwrap_or("");
        let date = NaiveDate::parse_from_str(date_raw, DATE_FORMAT).map_err(|_| {
            LoadError::InvalidDate {
                row,
                value: date_raw.to_string(),
            }
        })?;

        let amount_raw = record.get(layout.amount).unwrap_or("");
        let amount: f64 = amount_raw.parse().map_err(|_| LoadError::InvalidAmount {
            row,
            value: amount_raw.to_string(),
        })?;

        let details = record.get(layout.details).unwrap_or("").to_string();
        rows.push(Transaction::new(date, details, amount));
    }

    let table = TransactionTable::new(rows);
    tracing::info!(rows = table.len(), "statement loaded");
    Ok(categorize(&table, store))
}
