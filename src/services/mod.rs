//! Service layer for the budget engine
//!
//! Sits between the store and the front end: period parsing, the pure state
//! derivation, copy-forward, and the controller that ties them together.

pub mod controller;
pub mod copy_forward;
pub mod derive;
pub mod period;

pub use controller::BudgetController;
pub use copy_forward::{CopyForwardResolver, CopyOutcome};
pub use derive::derive_budget_state;
pub use period::{parse_or_current, parse_period, parse_period_from};
