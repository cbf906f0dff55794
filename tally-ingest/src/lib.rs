//! tally-ingest: bank statement CSV ingestion and format normalization.

pub mod statement;

pub use statement::{LoadError, load_statement};
