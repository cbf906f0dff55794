//! tally-core: transaction model, description normalizer, category store,
//! categorizer and feedback loop for the tally statement analyzer.

pub mod categorize;
pub mod error;
pub mod feedback;
pub mod normalize;
pub mod store;
pub mod transaction;

pub use categorize::{categorize, match_category};
pub use error::{StoreError, StoreResult};
pub use feedback::apply_edit;
pub use normalize::normalize;
pub use store::{Category, CategoryStore, default_categories};
pub use transaction::{Direction, Transaction, TransactionTable, UNCATEGORIZED};
