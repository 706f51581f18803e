//! Budget CLI commands
//!
//! Implements CLI commands for month navigation, allocation, spending and
//! the budget overview.

use clap::Subcommand;

use crate::display::format_overview;
use crate::error::BudgetResult;
use crate::models::CategoryId;
use crate::services::parse_or_current;

use super::category::find_category;
use super::{parse_amount, App, AppController};

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Show the budget overview for a month
    Overview {
        /// Budget month (e.g., "March 2025", "2025-03", "current", "last")
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Show the month after --period (or after the current month)
    Next {
        /// Month to move forward from
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Show the month before --period (or before the current month)
    Prev {
        /// Month to move back from
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Set how much is allocated to a category
    Allocate {
        /// Category name or ID
        category: String,
        /// Amount (e.g., "500" or "500.00")
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// Budget month
        #[arg(short, long)]
        period: Option<String>,
    },

    /// Record spending against a category
    Spend {
        /// Category name or ID
        category: String,
        /// Amount spent; the sign is ignored
        #[arg(allow_hyphen_values = true)]
        amount: String,
        /// What the money was spent on
        #[arg(short, long)]
        description: Option<String>,
        /// Budget month
        #[arg(short, long)]
        period: Option<String>,
    },
}

/// Handle a budget command
pub async fn handle_budget_command(app: &App, cmd: BudgetCommands) -> BudgetResult<()> {
    match cmd {
        BudgetCommands::Overview { period } => {
            let controller = app.controller_at(parse_or_current(period.as_deref())?);
            // A failed load still leaves something worth showing
            let _ = controller.load().await;
            print_overview(app, &controller);
        }

        BudgetCommands::Next { period } => {
            let controller = app.controller_at(parse_or_current(period.as_deref())?);
            let _ = controller.load().await;
            let _ = controller.next_month().await;
            print_overview(app, &controller);
        }

        BudgetCommands::Prev { period } => {
            let controller = app.controller_at(parse_or_current(period.as_deref())?);
            let _ = controller.load().await;
            let _ = controller.prev_month().await;
            print_overview(app, &controller);
        }

        BudgetCommands::Allocate {
            category,
            amount,
            period,
        } => {
            let amount = parse_amount(&amount)?;
            let controller = app.controller_at(parse_or_current(period.as_deref())?);
            controller.load().await?;

            let target = find_category(&controller.budget_categories(), &category)?;
            controller.set_allocation(target.id, amount).await?;

            println!(
                "Allocated {} to {} for {}",
                app.format_money(amount),
                target.name,
                controller.active_period()
            );
            print_remaining(app, &controller, target.id);
        }

        BudgetCommands::Spend {
            category,
            amount,
            description,
            period,
        } => {
            let amount = parse_amount(&amount)?;
            let controller = app.controller_at(parse_or_current(period.as_deref())?);
            controller.load().await?;

            let target = find_category(&controller.budget_categories(), &category)?;
            controller
                .add_transaction(target.id, amount, description.as_deref().unwrap_or_default())
                .await?;

            println!(
                "Recorded {} spent on {} for {}",
                app.format_money(amount.abs()),
                target.name,
                controller.active_period()
            );
            print_remaining(app, &controller, target.id);
        }
    }

    Ok(())
}

fn print_overview(app: &App, controller: &AppController) {
    if let Some(error) = controller.error() {
        eprintln!("Warning: {}", error);
    }
    print!(
        "{}",
        format_overview(&controller.state(), &app.settings.currency_symbol)
    );
}

fn print_remaining(app: &App, controller: &AppController, id: CategoryId) {
    let state = controller.state();
    if let Some(line) = state.summary.line(id) {
        println!(
            "  Allocated {} / Spent {} / Remaining {}",
            app.format_money(line.allocated),
            app.format_money(line.spent),
            app.format_money(line.remaining())
        );
    }
}
