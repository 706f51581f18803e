//! Debt tracker snapshot

use serde::{Deserialize, Serialize};

use crate::models::Money;

/// A tracked debt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Debt {
    pub name: String,
    pub balance: Money,
    pub min_payment: Money,
}

impl Debt {
    pub fn new(name: impl Into<String>, balance: Money, min_payment: Money) -> Self {
        Self {
            name: name.into(),
            balance,
            min_payment,
        }
    }

    pub fn is_paid_off(&self) -> bool {
        !self.balance.is_positive()
    }
}

/// The debt tracker's view of monthly obligations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtSnapshot {
    pub total_min_payment: Money,
}

impl DebtSnapshot {
    pub fn new(total_min_payment: Money) -> Self {
        Self { total_min_payment }
    }

    /// Minimum payments summed over debts that still carry a balance
    pub fn from_debts(debts: &[Debt]) -> Self {
        Self {
            total_min_payment: debts
                .iter()
                .filter(|d| !d.is_paid_off())
                .map(|d| d.min_payment.abs())
                .sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paid_off_debts_excluded() {
        let debts = vec![
            Debt::new("Card", Money::from_units(2000), Money::from_units(60)),
            Debt::new("Car", Money::from_units(8000), Money::from_units(190)),
            Debt::new("Old loan", Money::zero(), Money::from_units(100)),
        ];
        let snapshot = DebtSnapshot::from_debts(&debts);
        assert_eq!(snapshot.total_min_payment, Money::from_units(250));
    }

    #[test]
    fn test_no_debts() {
        assert_eq!(DebtSnapshot::from_debts(&[]), DebtSnapshot::default());
    }
}
