//! Budget spend events
//!
//! A transaction only ever adds to a category's spent total. Amounts are
//! stored as magnitudes; there is no update or delete path.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{CategoryId, TransactionId};
use super::money::Money;
use super::month::BudgetMonth;

/// A single spend event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetTransaction {
    pub id: TransactionId,
    pub category_id: CategoryId,
    /// Always non-negative
    pub amount: Money,
    pub date: NaiveDate,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl BudgetTransaction {
    /// Record a spend event; the sign of `amount` is discarded
    pub fn new(
        category_id: CategoryId,
        amount: Money,
        date: NaiveDate,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            category_id,
            amount: amount.abs(),
            date,
            description: description.into(),
            created_at: Utc::now(),
        }
    }

    /// The month this spend folds into
    pub fn month(&self) -> BudgetMonth {
        BudgetMonth::from_date(self.date)
    }
}
