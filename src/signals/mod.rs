//! External cash-flow signals
//!
//! Snapshots from the recurring-obligations, debt and savings-goal
//! subsystems that feed the derived budget state.

pub mod debt;
pub mod goals;
pub mod recurring;
pub mod source;

pub use debt::{Debt, DebtSnapshot};
pub use goals::{GoalSnapshot, SavingsGoal};
pub use recurring::{
    Frequency, MonthProjector, OccurrenceProjector, RecurringItem, RecurringKind,
    RecurringSnapshot,
};
pub use source::{fetch_signals, JsonSignalSource, SignalSource, Signals, SignalsFile, StaticSignals};
