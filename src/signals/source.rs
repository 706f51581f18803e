//! # Signal sources
//!
//! Where the recurring, debt and goal snapshots come from. A source that
//! fails is logged and read as an empty snapshot, so a missing sibling
//! subsystem never blocks a budget load.

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::BudgetResult;
use crate::storage::read_json;

use super::debt::{Debt, DebtSnapshot};
use super::goals::{GoalSnapshot, SavingsGoal};
use super::recurring::{RecurringItem, RecurringSnapshot};

/// Read-only access to the snapshots of sibling subsystems
#[async_trait]
pub trait SignalSource: Send + Sync {
    async fn recurring(&self) -> BudgetResult<RecurringSnapshot>;

    async fn debts(&self) -> BudgetResult<DebtSnapshot>;

    async fn goals(&self) -> BudgetResult<GoalSnapshot>;
}

/// One consistent set of external snapshots
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Signals {
    pub recurring: RecurringSnapshot,
    pub debt: DebtSnapshot,
    pub goals: GoalSnapshot,
}

/// Fetch all three snapshots, substituting an empty one for each failure
pub async fn fetch_signals<G>(source: &G) -> Signals
where
    G: SignalSource + ?Sized,
{
    let (recurring, debt, goals) =
        tokio::join!(source.recurring(), source.debts(), source.goals());

    Signals {
        recurring: recurring.unwrap_or_else(|e| {
            warn!(error = %e, "Recurring obligations unavailable");
            RecurringSnapshot::default()
        }),
        debt: debt.unwrap_or_else(|e| {
            warn!(error = %e, "Debt tracker unavailable");
            DebtSnapshot::default()
        }),
        goals: goals.unwrap_or_else(|e| {
            warn!(error = %e, "Savings goals unavailable");
            GoalSnapshot::default()
        }),
    }
}

/// A source that always returns the same snapshots
#[derive(Debug, Clone, Default)]
pub struct StaticSignals {
    signals: Signals,
}

impl StaticSignals {
    pub fn new(recurring: RecurringSnapshot, debt: DebtSnapshot, goals: GoalSnapshot) -> Self {
        Self {
            signals: Signals {
                recurring,
                debt,
                goals,
            },
        }
    }

    /// No income, obligations, debts or goals
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SignalSource for StaticSignals {
    async fn recurring(&self) -> BudgetResult<RecurringSnapshot> {
        Ok(self.signals.recurring.clone())
    }

    async fn debts(&self) -> BudgetResult<DebtSnapshot> {
        Ok(self.signals.debt)
    }

    async fn goals(&self) -> BudgetResult<GoalSnapshot> {
        Ok(self.signals.goals)
    }
}

/// On-disk layout of `signals.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SignalsFile {
    /// Absent means the recurring subsystem has nothing to project
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring: Option<Vec<RecurringItem>>,
    #[serde(default)]
    pub debts: Vec<Debt>,
    #[serde(default)]
    pub goals: Vec<SavingsGoal>,
}

/// Reads snapshots from `signals.json` on every call
///
/// A missing file reads as empty.
pub struct JsonSignalSource {
    path: PathBuf,
    as_of: Option<NaiveDate>,
}

impl JsonSignalSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            as_of: None,
        }
    }

    /// Evaluate which recurring items are active on a fixed date instead of today
    pub fn as_of(mut self, date: NaiveDate) -> Self {
        self.as_of = Some(date);
        self
    }

    async fn load(&self) -> BudgetResult<SignalsFile> {
        read_json(&self.path).await
    }
}

#[async_trait]
impl SignalSource for JsonSignalSource {
    async fn recurring(&self) -> BudgetResult<RecurringSnapshot> {
        let file = self.load().await?;
        Ok(match file.recurring {
            Some(items) => {
                let as_of = self.as_of.unwrap_or_else(|| Local::now().date_naive());
                RecurringSnapshot::from_items(items, as_of)
            }
            None => RecurringSnapshot::default(),
        })
    }

    async fn debts(&self) -> BudgetResult<DebtSnapshot> {
        let file = self.load().await?;
        Ok(DebtSnapshot::from_debts(&file.debts))
    }

    async fn goals(&self) -> BudgetResult<GoalSnapshot> {
        let file = self.load().await?;
        Ok(GoalSnapshot::from_goals(&file.goals))
    }
}
