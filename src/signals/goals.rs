//! Savings goal snapshot

use serde::{Deserialize, Serialize};

use crate::models::Money;

/// A savings goal with a planned monthly contribution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingsGoal {
    pub name: String,
    pub target_amount: Money,
    #[serde(default)]
    pub saved_amount: Money,
    pub monthly_contribution: Money,
}

impl SavingsGoal {
    pub fn new(name: impl Into<String>, target_amount: Money, monthly_contribution: Money) -> Self {
        Self {
            name: name.into(),
            target_amount,
            saved_amount: Money::zero(),
            monthly_contribution,
        }
    }

    pub fn with_saved(mut self, saved_amount: Money) -> Self {
        self.saved_amount = saved_amount;
        self
    }

    pub fn is_reached(&self) -> bool {
        self.saved_amount >= self.target_amount
    }

    /// Percentage of the target saved so far, capped at 100
    pub fn progress_percent(&self) -> u8 {
        if !self.target_amount.is_positive() {
            return 100;
        }
        let pct = self.saved_amount.cents().max(0) * 100 / self.target_amount.cents();
        pct.min(100) as u8
    }
}

/// The goals tracker's view of monthly contributions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSnapshot {
    pub total_monthly_contribution: Money,
}

impl GoalSnapshot {
    pub fn new(total_monthly_contribution: Money) -> Self {
        Self {
            total_monthly_contribution,
        }
    }

    /// Contributions summed over goals not yet reached
    pub fn from_goals(goals: &[SavingsGoal]) -> Self {
        Self {
            total_monthly_contribution: goals
                .iter()
                .filter(|g| !g.is_reached())
                .map(|g| g.monthly_contribution.abs())
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reached_goals_excluded() {
        let goals = vec![
            SavingsGoal::new("Vacation", Money::from_units(3000), Money::from_units(200)),
            SavingsGoal::new("Laptop", Money::from_units(1500), Money::from_units(100))
                .with_saved(Money::from_units(1500)),
            SavingsGoal::new("Emergency", Money::from_units(10000), Money::from_units(150))
                .with_saved(Money::from_units(2500)),
        ];

        let snapshot = GoalSnapshot::from_goals(&goals);
        assert_eq!(snapshot.total_monthly_contribution, Money::from_units(350));
        assert_eq!(goals[2].progress_percent(), 25);
        assert_eq!(goals[1].progress_percent(), 100);
    }
}
