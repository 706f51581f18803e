//! Display formatting for terminal output
//!
//! Renders the budget state and categories as tables for the CLI.

pub mod budget;
pub mod category;

pub use budget::format_overview;
pub use category::{format_category_details, format_category_list};
