//! Budget state derivation
//!
//! Merges a month's summary with the external signals into the figures the
//! dashboard shows. Pure: the same inputs always give the same state, and no
//! failure escapes.

use tracing::warn;

use crate::error::BudgetResult;
use crate::models::{BudgetMonth, BudgetState, BudgetSummary, Money};
use crate::signals::{MonthProjector, RecurringItem, Signals};

/// Combine a summary with signal snapshots into a [`BudgetState`]
///
/// - Income and fixed expenses prefer the month-specific projection over the
///   recurring items, falling back to the period-general figures when there
///   are no items or the projection fails.
/// - The fixed expense fallback excludes the debt-labelled share, which is
///   counted under debt payments instead.
/// - Debt payments prefer the debt tracker's minimum payment total when it is
///   positive.
pub fn derive_budget_state(
    summary: BudgetSummary,
    signals: &Signals,
    projector: &dyn MonthProjector,
) -> BudgetState {
    let month = summary.month;
    let recurring = &signals.recurring;
    let items = recurring.projectable_items();

    let monthly_income = projected_or(
        items,
        |items| projector.month_income(month, items),
        recurring.monthly_income,
        "income",
        month,
    );

    let fixed_expenses = projected_or(
        items,
        |items| projector.month_expenses(month, items),
        (recurring.monthly_expenses - recurring.monthly_debt).abs(),
        "expenses",
        month,
    );

    let total_debt_payments = if signals.debt.total_min_payment.is_positive() {
        signals.debt.total_min_payment
    } else {
        recurring.monthly_debt
    };

    let total_goal_contributions = signals.goals.total_monthly_contribution;

    let mut state = BudgetState {
        summary,
        monthly_income,
        fixed_expenses,
        total_debt_payments,
        total_goal_contributions,
        left_to_allocate: Money::zero(),
    };
    state.left_to_allocate = state.monthly_income - state.committed();
    state
}

fn projected_or<F>(
    items: Option<&[RecurringItem]>,
    project: F,
    fallback: Money,
    metric: &'static str,
    month: BudgetMonth,
) -> Money
where
    F: FnOnce(&[RecurringItem]) -> BudgetResult<Money>,
{
    let Some(items) = items else {
        return fallback;
    };

    match project(items) {
        Ok(amount) => amount,
        Err(e) => {
            warn!(%month, metric, error = %e, "Month projection failed, using recurring average");
            fallback
        }
    }
}
