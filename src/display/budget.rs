//! Budget overview formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{BudgetState, CategoryLine, Money};

#[derive(Tabled)]
struct OverviewRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Allocated")]
    allocated: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
}

impl OverviewRow {
    fn new(line: &CategoryLine, symbol: &str) -> Self {
        let marker = if line.is_overspent() { " !" } else { "" };
        Self {
            name: line.name.clone(),
            allocated: line.allocated.format_with_symbol(symbol),
            spent: line.spent.format_with_symbol(symbol),
            remaining: format!("{}{}", line.remaining().format_with_symbol(symbol), marker),
        }
    }
}

/// Format the full budget state for one month
pub fn format_overview(state: &BudgetState, symbol: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Budget Overview: {}\n", state.month().label()));

    if state.categories().is_empty() {
        output.push_str("\nNo categories yet.\n");
    } else {
        let mut table = Table::new(state.categories().iter().map(|l| OverviewRow::new(l, symbol)));
        table.with(Style::rounded());
        output.push_str(&format!("{}\n", table));
    }

    let row = |label: &str, amount: Money| format!("  {:<20}{:>14}\n", label, amount.format_with_symbol(symbol));

    output.push('\n');
    output.push_str(&row("Total allocated", state.total_allocated()));
    output.push_str(&row("Total spent", state.total_spent()));
    output.push_str(&row("Remaining", state.remaining_budget()));
    output.push('\n');
    output.push_str(&row("Monthly income", state.monthly_income));
    output.push_str(&row("Fixed expenses", state.fixed_expenses));
    output.push_str(&row("Debt payments", state.total_debt_payments));
    output.push_str(&row("Goal contributions", state.total_goal_contributions));
    output.push_str(&row("Left to allocate", state.left_to_allocate));

    if state.left_to_allocate.is_negative() {
        output.push_str("\nOver-committed: more is planned than comes in this month.\n");
    }

    output
}
