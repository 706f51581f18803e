//! # Store contract
//!
//! The persistence operations the engine consumes. Every call may suspend,
//! so the controller never holds its own locks across one.

use async_trait::async_trait;

use crate::error::BudgetResult;
use crate::models::{
    BudgetCategory, BudgetEntry, BudgetMonth, BudgetSummary, BudgetTransaction, CategoryId,
    CategoryPatch, NewCategory,
};

/// Categories, monthly entries and spend events
#[async_trait]
pub trait BudgetStore: Send + Sync {
    /// All categories, ordered by id
    async fn categories(&self) -> BudgetResult<Vec<BudgetCategory>>;

    /// Create the default category set when no categories exist.
    /// Calling it again once categories exist does nothing.
    async fn initialize_default_categories(&self) -> BudgetResult<()>;

    async fn create_category(&self, data: NewCategory) -> BudgetResult<BudgetCategory>;

    async fn update_category(&self, id: CategoryId, patch: CategoryPatch) -> BudgetResult<()>;

    /// Remove a category together with its entries and spend events
    async fn delete_category(&self, id: CategoryId) -> BudgetResult<()>;

    async fn entries_for_month(&self, month: BudgetMonth) -> BudgetResult<Vec<BudgetEntry>>;

    /// Duplicate every entry of `source` into `target`.
    ///
    /// Allocations carry over; spend is recomputed from the spend events
    /// already recorded in `target`. Does nothing when `target` already has
    /// entries. Returns the number of entries created.
    async fn copy_entries(&self, target: BudgetMonth, source: BudgetMonth) -> BudgetResult<usize>;

    /// Insert or replace the entry for `(entry.category_id, entry.month)`
    async fn save_entry(&self, entry: BudgetEntry) -> BudgetResult<()>;

    /// Append a spend event and fold it into its month's entry
    async fn add_transaction(&self, transaction: BudgetTransaction) -> BudgetResult<()>;

    async fn transactions_for_month(
        &self,
        month: BudgetMonth,
    ) -> BudgetResult<Vec<BudgetTransaction>>;

    /// Every category joined with its entry for `month`
    async fn monthly_summary(&self, month: BudgetMonth) -> BudgetResult<BudgetSummary> {
        let categories = self.categories().await?;
        let entries = self.entries_for_month(month).await?;
        Ok(BudgetSummary::from_store_rows(month, &categories, &entries))
    }
}
