//! Category CLI commands
//!
//! Implements CLI commands for listing and managing budget categories.

use clap::Subcommand;

use crate::display::category::{format_category_details, format_category_list};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetCategory, BudgetMonth, CategoryId, CategoryPatch, IconKey, NewCategory};

use super::App;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories
    List,

    /// Create a new category
    Add {
        /// Category name
        name: String,
        /// Icon key (e.g. "shopping-cart", "home", "car")
        #[arg(short, long)]
        icon: Option<String>,
        /// Color as #RRGGBB
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Edit a category
    Edit {
        /// Category name or ID
        category: String,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        /// New icon key
        #[arg(short, long)]
        icon: Option<String>,
        /// New color as #RRGGBB
        #[arg(short, long)]
        color: Option<String>,
    },

    /// Delete a category and all of its budget history
    Delete {
        /// Category name or ID
        category: String,
    },
}

/// Handle a category command
pub async fn handle_category_command(app: &App, cmd: CategoryCommands) -> BudgetResult<()> {
    let controller = app.controller_at(BudgetMonth::current());
    controller.load().await?;

    match cmd {
        CategoryCommands::List => {
            print!("{}", format_category_list(&controller.budget_categories()));
        }

        CategoryCommands::Add { name, icon, color } => {
            let mut data = NewCategory::new(name);
            if let Some(icon) = icon {
                data = data.with_icon(parse_icon(&icon)?);
            }
            if let Some(color) = color {
                data = data.with_color(color);
            }

            let category = controller.add_category(data).await?;
            println!("Created category:");
            print!("{}", format_category_details(&category));
        }

        CategoryCommands::Edit {
            category,
            name,
            icon,
            color,
        } => {
            let target = find_category(&controller.budget_categories(), &category)?;
            let patch = CategoryPatch {
                name,
                icon: icon.as_deref().map(parse_icon).transpose()?,
                color,
            };
            if patch.is_empty() {
                println!("Nothing to change. Use --name, --icon or --color.");
                return Ok(());
            }

            controller.update_category(target.id, patch).await?;
            let updated = find_category(&controller.budget_categories(), &target.id.to_string())?;
            println!("Updated category:");
            print!("{}", format_category_details(&updated));
        }

        CategoryCommands::Delete { category } => {
            let target = find_category(&controller.budget_categories(), &category)?;
            controller.delete_category(target.id).await?;
            println!("Deleted category '{}'", target.name);
        }
    }

    Ok(())
}

/// Find a category by name (case-insensitive) or by ID
pub(crate) fn find_category(categories: &[BudgetCategory], query: &str) -> BudgetResult<BudgetCategory> {
    let query = query.trim();

    if let Some(category) = categories.iter().find(|c| c.name.eq_ignore_ascii_case(query)) {
        return Ok(category.clone());
    }

    query
        .parse::<CategoryId>()
        .ok()
        .and_then(|id| categories.iter().find(|c| c.id == id))
        .cloned()
        .ok_or_else(|| BudgetError::category_not_found(query))
}

/// Parse an icon argument, rejecting keys that aren't known
fn parse_icon(key: &str) -> BudgetResult<IconKey> {
    let icon = IconKey::from_key(key);
    let normalized = key.trim().to_lowercase().replace(['_', ' '], "-");
    if icon.key() != normalized {
        return Err(BudgetError::Validation(format!(
            "Unknown icon '{}'. Available: {}",
            key,
            IconKey::all()
                .iter()
                .map(|i| i.key())
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }
    Ok(icon)
}
