//! Core data models
//!
//! Categories, monthly entries and spend events as stored, plus the derived
//! summary and state views the controller hands to its front end.

pub mod category;
pub mod entry;
pub mod icon;
pub mod ids;
pub mod money;
pub mod month;
pub mod summary;
pub mod transaction;

pub use category::{BudgetCategory, CategoryPatch, DefaultCategory, NewCategory};
pub use entry::{BudgetEntry, EntryKey};
pub use icon::IconKey;
pub use ids::{CategoryId, TransactionId};
pub use money::Money;
pub use month::BudgetMonth;
pub use summary::{BudgetState, BudgetSummary, CategoryLine};
pub use transaction::BudgetTransaction;
