//! Budget entry model
//!
//! One entry per (category, month): how much was allocated and how much has
//! been spent so far.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Money;
use super::month::BudgetMonth;

/// Composite key for budget entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntryKey {
    pub category_id: CategoryId,
    pub month: BudgetMonth,
}

impl EntryKey {
    pub fn new(category_id: CategoryId, month: BudgetMonth) -> Self {
        Self { category_id, month }
    }
}

impl fmt::Display for EntryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.category_id, self.month)
    }
}

/// Allocation and accumulated spend for a category in a month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetEntry {
    pub category_id: CategoryId,
    pub month: BudgetMonth,
    pub allocated: Money,
    #[serde(default)]
    pub spent: Money,
}

impl BudgetEntry {
    pub fn new(category_id: CategoryId, month: BudgetMonth, allocated: Money, spent: Money) -> Self {
        Self {
            category_id,
            month,
            allocated,
            spent,
        }
    }

    /// An entry with nothing allocated or spent yet
    pub fn empty(category_id: CategoryId, month: BudgetMonth) -> Self {
        Self::new(category_id, month, Money::zero(), Money::zero())
    }

    pub fn key(&self) -> EntryKey {
        EntryKey::new(self.category_id, self.month)
    }

    pub fn remaining(&self) -> Money {
        self.allocated - self.spent
    }

    /// The same allocation in another month with spend reset
    pub fn carried_into(&self, month: BudgetMonth, spent: Money) -> Self {
        Self::new(self.category_id, month, self.allocated, spent)
    }

    pub fn validate(&self) -> Result<(), EntryValidationError> {
        if self.allocated.is_negative() {
            return Err(EntryValidationError::NegativeAllocation);
        }
        if self.spent.is_negative() {
            return Err(EntryValidationError::NegativeSpent);
        }
        Ok(())
    }
}

/// Validation errors for budget entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    NegativeAllocation,
    NegativeSpent,
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAllocation => write!(f, "Allocated amount cannot be negative"),
            Self::NegativeSpent => write!(f, "Spent amount cannot be negative"),
        }
    }
}

impl std::error::Error for EntryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn jan() -> BudgetMonth {
        BudgetMonth::new(2025, 1).unwrap()
    }

    #[test]
    fn test_remaining() {
        let entry = BudgetEntry::new(
            CategoryId::new(1),
            jan(),
            Money::from_units(500),
            Money::from_units(120),
        );
        assert_eq!(entry.remaining(), Money::from_units(380));
    }

    #[test]
    fn test_carried_into_keeps_allocation() {
        let entry = BudgetEntry::new(
            CategoryId::new(1),
            jan(),
            Money::from_units(500),
            Money::from_units(499),
        );
        let carried = entry.carried_into(jan().next(), Money::zero());

        assert_eq!(carried.month, jan().next());
        assert_eq!(carried.allocated, Money::from_units(500));
        assert_eq!(carried.spent, Money::zero());
        assert_eq!(carried.key(), EntryKey::new(CategoryId::new(1), jan().next()));
    }

    #[test]
    fn test_validation() {
        let mut entry = BudgetEntry::empty(CategoryId::new(1), jan());
        assert!(entry.validate().is_ok());

        entry.allocated = Money::from_cents(-1);
        assert_eq!(entry.validate(), Err(EntryValidationError::NegativeAllocation));
    }

    #[test]
    fn test_key_display() {
        let key = EntryKey::new(CategoryId::new(4), jan());
        assert_eq!(key.to_string(), "4:2025-01");
    }
}
