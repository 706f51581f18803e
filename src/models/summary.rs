//! Derived monthly budget views
//!
//! Neither type is persisted. A `BudgetSummary` is rebuilt from the store on
//! every load; a `BudgetState` adds the cross-subsystem cash-flow figures on
//! top of it.

use serde::{Deserialize, Serialize};

use super::category::BudgetCategory;
use super::entry::BudgetEntry;
use super::icon::IconKey;
use super::ids::CategoryId;
use super::money::Money;
use super::month::BudgetMonth;

/// One category's row in a monthly summary
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLine {
    pub id: CategoryId,
    pub name: String,
    pub icon: IconKey,
    pub color: String,
    pub allocated: Money,
    pub spent: Money,
}

impl CategoryLine {
    /// Join a category with its entry for the month, if any
    pub fn from_parts(category: &BudgetCategory, entry: Option<&BudgetEntry>) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
            icon: category.icon,
            color: category.color.clone(),
            allocated: entry.map(|e| e.allocated).unwrap_or_default(),
            spent: entry.map(|e| e.spent).unwrap_or_default(),
        }
    }

    pub fn remaining(&self) -> Money {
        self.allocated - self.spent
    }

    pub fn is_overspent(&self) -> bool {
        self.spent > self.allocated
    }
}

/// Per-category allocation and spend for one month
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub month: BudgetMonth,
    pub categories: Vec<CategoryLine>,
    pub total_allocated: Money,
    pub total_spent: Money,
    pub remaining_budget: Money,
}

impl BudgetSummary {
    /// Build a summary; the totals are always the sums over `categories`
    pub fn from_lines(month: BudgetMonth, categories: Vec<CategoryLine>) -> Self {
        let total_allocated: Money = categories.iter().map(|c| c.allocated).sum();
        let total_spent: Money = categories.iter().map(|c| c.spent).sum();
        Self {
            month,
            categories,
            total_allocated,
            total_spent,
            remaining_budget: total_allocated - total_spent,
        }
    }

    /// Build a summary from the category list and that month's entries
    pub fn from_store_rows(
        month: BudgetMonth,
        categories: &[BudgetCategory],
        entries: &[BudgetEntry],
    ) -> Self {
        let lines = categories
            .iter()
            .map(|category| {
                let entry = entries
                    .iter()
                    .find(|e| e.category_id == category.id && e.month == month);
                CategoryLine::from_parts(category, entry)
            })
            .collect();
        Self::from_lines(month, lines)
    }

    pub fn empty(month: BudgetMonth) -> Self {
        Self::from_lines(month, Vec::new())
    }

    pub fn line(&self, id: CategoryId) -> Option<&CategoryLine> {
        self.categories.iter().find(|c| c.id == id)
    }
}

/// Everything the dashboard needs to decide how much is left to allocate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetState {
    #[serde(flatten)]
    pub summary: BudgetSummary,
    pub monthly_income: Money,
    pub fixed_expenses: Money,
    pub total_debt_payments: Money,
    pub total_goal_contributions: Money,
    pub left_to_allocate: Money,
}

impl BudgetState {
    /// A zeroed state for a month with nothing loaded yet
    pub fn empty(month: BudgetMonth) -> Self {
        Self {
            summary: BudgetSummary::empty(month),
            monthly_income: Money::zero(),
            fixed_expenses: Money::zero(),
            total_debt_payments: Money::zero(),
            total_goal_contributions: Money::zero(),
            left_to_allocate: Money::zero(),
        }
    }

    pub fn month(&self) -> BudgetMonth {
        self.summary.month
    }

    pub fn categories(&self) -> &[CategoryLine] {
        &self.summary.categories
    }

    pub fn total_allocated(&self) -> Money {
        self.summary.total_allocated
    }

    pub fn total_spent(&self) -> Money {
        self.summary.total_spent
    }

    pub fn remaining_budget(&self) -> Money {
        self.summary.remaining_budget
    }

    /// Everything already committed for the month
    pub fn committed(&self) -> Money {
        self.summary.total_allocated
            + self.fixed_expenses
            + self.total_debt_payments
            + self.total_goal_contributions
    }
}
