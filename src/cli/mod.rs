//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the budget controller.

pub mod budget;
pub mod category;

use std::sync::Arc;

pub use budget::{handle_budget_command, BudgetCommands};
pub use category::{handle_category_command, CategoryCommands};

use crate::config::{BudgetPaths, Settings};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetMonth, Money};
use crate::services::BudgetController;
use crate::signals::JsonSignalSource;
use crate::storage::{open_store, JsonStore};

/// The controller as wired up for the command line
pub type AppController = BudgetController<JsonStore, JsonSignalSource>;

/// Shared handles for one CLI invocation
pub struct App {
    pub paths: BudgetPaths,
    pub settings: Settings,
    store: Arc<JsonStore>,
    signals: Arc<JsonSignalSource>,
}

impl App {
    /// Open the store and signal source under `paths`
    pub async fn open(paths: BudgetPaths, settings: Settings) -> BudgetResult<Self> {
        let store = open_store(&paths).await?;
        let signals = JsonSignalSource::new(paths.signals_file());
        Ok(Self {
            paths,
            settings,
            store: Arc::new(store),
            signals: Arc::new(signals),
        })
    }

    /// A controller whose active month is `month`
    pub fn controller_at(&self, month: BudgetMonth) -> AppController {
        BudgetController::starting_at(
            Arc::clone(&self.store),
            Arc::clone(&self.signals),
            &self.settings,
            month,
        )
    }

    pub fn format_money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.settings.currency_symbol)
    }
}

/// Parse an amount argument such as "500", "12.50" or "-45"
pub(crate) fn parse_amount(s: &str) -> BudgetResult<Money> {
    Money::parse(s).map_err(|e| BudgetError::Validation(e.to_string()))
}
