//! Category display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::BudgetCategory;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Icon")]
    icon: String,
    #[tabled(rename = "Color")]
    color: String,
}

impl From<&BudgetCategory> for CategoryRow {
    fn from(category: &BudgetCategory) -> Self {
        Self {
            id: category.id.to_string(),
            name: category.name.clone(),
            icon: category.icon.to_string(),
            color: category.color.clone(),
        }
    }
}

/// Format categories as a table
pub fn format_category_list(categories: &[BudgetCategory]) -> String {
    if categories.is_empty() {
        return "No categories found.\n\nRun 'budget overview' to create the default categories."
            .to_string();
    }

    let mut table = Table::new(categories.iter().map(CategoryRow::from));
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format category details
pub fn format_category_details(category: &BudgetCategory) -> String {
    let mut output = String::new();

    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("  ID:    {}\n", category.id));
    output.push_str(&format!("  Icon:  {}\n", category.icon));
    output.push_str(&format!("  Color: {}\n", category.color));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, IconKey, NewCategory};

    #[test]
    fn test_format_empty_list() {
        let output = format_category_list(&[]);
        assert!(output.contains("No categories found"));
    }

    #[test]
    fn test_format_category_list() {
        let categories = vec![
            NewCategory::new("Groceries")
                .with_icon(IconKey::ShoppingCart)
                .into_category(CategoryId::new(1)),
            NewCategory::new("Rent")
                .with_icon(IconKey::Home)
                .into_category(CategoryId::new(2)),
        ];

        let output = format_category_list(&categories);
        assert!(output.contains("Groceries"));
        assert!(output.contains("shopping-cart"));
        assert!(output.contains("Rent"));
    }

    #[test]
    fn test_format_category_details() {
        let category = NewCategory::new("Gym")
            .with_icon(IconKey::Dumbbell)
            .with_color("#22c55e")
            .into_category(CategoryId::new(9));

        let output = format_category_details(&category);
        assert!(output.contains("Category: Gym"));
        assert!(output.contains("dumbbell"));
        assert!(output.contains("#22c55e"));
    }
}
