//! Storage layer for the budget engine
//!
//! Provides the async store contract, a JSON file implementation with atomic
//! writes, and first-run seeding of default categories.

pub mod file_io;
pub mod json;
pub mod seed;
pub mod traits;

pub use file_io::{read_json, write_json_atomic};
pub use json::JsonStore;
pub use seed::ensure_categories;
pub use traits::BudgetStore;

use crate::config::paths::BudgetPaths;
use crate::error::BudgetError;

/// Open the JSON store under the configured data directory
pub async fn open_store(paths: &BudgetPaths) -> Result<JsonStore, BudgetError> {
    paths.ensure_directories()?;
    JsonStore::open(paths.budget_file()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_open_store_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());

        let store = open_store(&paths).await.unwrap();

        assert!(paths.data_dir().exists());
        assert_eq!(store.path(), Some(paths.budget_file().as_path()));
        assert!(store.categories().await.unwrap().is_empty());
    }
}
