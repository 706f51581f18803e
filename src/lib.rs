//! Budget Engine - monthly budget allocation with cash-flow aggregation
//!
//! This library keeps a per-category, per-month budget: what was allocated,
//! what has been spent, and how much is left to allocate once recurring
//! income, fixed expenses, debt payments and savings goals are counted.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (categories, entries, spend events, months)
//! - `storage`: Async store contract and JSON file storage
//! - `signals`: Recurring obligations, debts and savings goals
//! - `services`: State derivation, copy-forward and the period controller
//! - `cli` / `display`: Command-line front end
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use budget_engine::config::Settings;
//! use budget_engine::services::BudgetController;
//! use budget_engine::signals::StaticSignals;
//! use budget_engine::storage::JsonStore;
//!
//! let controller = BudgetController::new(
//!     Arc::new(JsonStore::in_memory()),
//!     Arc::new(StaticSignals::empty()),
//!     &Settings::default(),
//! );
//! controller.load().await?;
//! println!("{}", controller.state().left_to_allocate);
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod services;
pub mod signals;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
