//! Copy-forward of monthly allocations
//!
//! A month that has no entries yet inherits the allocations of the month the
//! user navigated from. When that month is empty too, the nearest earlier
//! populated month is used instead. Spend is never carried.

use tracing::{debug, info, warn};

use crate::error::BudgetResult;
use crate::models::BudgetMonth;
use crate::storage::BudgetStore;

/// What a copy-forward attempt did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CopyOutcome {
    /// Target and source are the same month
    SameMonth,
    /// The target month already has entries
    AlreadyPopulated,
    /// Entries were copied from `from`
    Copied { from: BudgetMonth, entries: usize },
    /// No populated month was found to copy from
    NothingToCopy,
    /// The store failed; the target month is left as it was
    Failed,
}

impl CopyOutcome {
    pub fn copied(&self) -> usize {
        match self {
            Self::Copied { entries, .. } => *entries,
            _ => 0,
        }
    }
}

/// Decides which month, if any, seeds an empty target month
#[derive(Debug, Clone, Copy)]
pub struct CopyForwardResolver {
    lookback: u32,
}

impl Default for CopyForwardResolver {
    fn default() -> Self {
        Self::new(12)
    }
}

impl CopyForwardResolver {
    /// `lookback` bounds how many months before the target are searched
    /// when the source month has no entries
    pub fn new(lookback: u32) -> Self {
        Self { lookback }
    }

    /// Seed `target` from `source` (or an earlier month) if `target` is empty
    ///
    /// Never fails: store errors are logged and reported as
    /// [`CopyOutcome::Failed`].
    pub async fn resolve<S>(&self, store: &S, target: BudgetMonth, source: BudgetMonth) -> CopyOutcome
    where
        S: BudgetStore + ?Sized,
    {
        if target == source {
            return CopyOutcome::SameMonth;
        }

        match self.try_resolve(store, target, source).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(%target, %source, error = %e, "Copy-forward failed");
                CopyOutcome::Failed
            }
        }
    }

    async fn try_resolve<S>(
        &self,
        store: &S,
        target: BudgetMonth,
        source: BudgetMonth,
    ) -> BudgetResult<CopyOutcome>
    where
        S: BudgetStore + ?Sized,
    {
        if !store.entries_for_month(target).await?.is_empty() {
            debug!(%target, "Target month already has entries");
            return Ok(CopyOutcome::AlreadyPopulated);
        }

        for candidate in self.candidates(target, source) {
            if store.entries_for_month(candidate).await?.is_empty() {
                continue;
            }

            let entries = store.copy_entries(target, candidate).await?;
            info!(%target, from = %candidate, entries, "Copied budget entries forward");
            return Ok(CopyOutcome::Copied {
                from: candidate,
                entries,
            });
        }

        debug!(%target, %source, "No populated month to copy from");
        Ok(CopyOutcome::NothingToCopy)
    }

    /// The source month first, then each month before the target
    fn candidates(&self, target: BudgetMonth, source: BudgetMonth) -> Vec<BudgetMonth> {
        let mut months = vec![source];
        let mut month = target;
        for _ in 0..self.lookback {
            month = month.prev();
            if month != source {
                months.push(month);
            }
        }
        months
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BudgetError;
    use crate::models::{
        BudgetCategory, BudgetEntry, BudgetTransaction, CategoryId, CategoryPatch, Money,
        NewCategory,
    };
    use crate::storage::JsonStore;
    use async_trait::async_trait;

    /// Reads pass through; copying always fails
    struct CopyRefusingStore(JsonStore);

    #[async_trait]
    impl BudgetStore for CopyRefusingStore {
        async fn categories(&self) -> BudgetResult<Vec<BudgetCategory>> {
            self.0.categories().await
        }

        async fn initialize_default_categories(&self) -> BudgetResult<()> {
            self.0.initialize_default_categories().await
        }

        async fn create_category(&self, data: NewCategory) -> BudgetResult<BudgetCategory> {
            self.0.create_category(data).await
        }

        async fn update_category(&self, id: CategoryId, patch: CategoryPatch) -> BudgetResult<()> {
            self.0.update_category(id, patch).await
        }

        async fn delete_category(&self, id: CategoryId) -> BudgetResult<()> {
            self.0.delete_category(id).await
        }

        async fn entries_for_month(&self, month: BudgetMonth) -> BudgetResult<Vec<BudgetEntry>> {
            self.0.entries_for_month(month).await
        }

        async fn copy_entries(&self, _: BudgetMonth, _: BudgetMonth) -> BudgetResult<usize> {
            Err(BudgetError::Storage("read-only volume".into()))
        }

        async fn save_entry(&self, entry: BudgetEntry) -> BudgetResult<()> {
            self.0.save_entry(entry).await
        }

        async fn add_transaction(&self, transaction: BudgetTransaction) -> BudgetResult<()> {
            self.0.add_transaction(transaction).await
        }

        async fn transactions_for_month(
            &self,
            month: BudgetMonth,
        ) -> BudgetResult<Vec<BudgetTransaction>> {
            self.0.transactions_for_month(month).await
        }
    }

    fn month(y: i32, m: u32) -> BudgetMonth {
        BudgetMonth::new(y, m).unwrap()
    }

    async fn store_with_allocation(at: BudgetMonth, units: i64) -> JsonStore {
        let store = JsonStore::in_memory();
        let cat = store.create_category(NewCategory::new("Groceries")).await.unwrap();
        store
            .save_entry(BudgetEntry::new(cat.id, at, Money::from_units(units), Money::from_units(40)))
            .await
            .unwrap();
        store
    }

    #[tokio::test]
    async fn test_copies_from_source() {
        let store = store_with_allocation(month(2025, 1), 500).await;
        let resolver = CopyForwardResolver::default();

        let outcome = resolver.resolve(&store, month(2025, 2), month(2025, 1)).await;
        assert_eq!(
            outcome,
            CopyOutcome::Copied {
                from: month(2025, 1),
                entries: 1
            }
        );

        let entries = store.entries_for_month(month(2025, 2)).await.unwrap();
        assert_eq!(entries[0].allocated, Money::from_units(500));
        assert!(entries[0].spent.is_zero());
    }

    #[tokio::test]
    async fn test_second_resolve_is_noop() {
        let store = store_with_allocation(month(2025, 1), 500).await;
        let resolver = CopyForwardResolver::default();

        resolver.resolve(&store, month(2025, 2), month(2025, 1)).await;
        let outcome = resolver.resolve(&store, month(2025, 2), month(2025, 1)).await;

        assert_eq!(outcome, CopyOutcome::AlreadyPopulated);
        assert_eq!(store.entries_for_month(month(2025, 2)).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_same_month() {
        let store = JsonStore::in_memory();
        let outcome = CopyForwardResolver::default()
            .resolve(&store, month(2025, 1), month(2025, 1))
            .await;
        assert_eq!(outcome, CopyOutcome::SameMonth);
    }

    #[tokio::test]
    async fn test_walks_back_past_empty_source() {
        let store = store_with_allocation(month(2024, 11), 300).await;
        let resolver = CopyForwardResolver::new(6);

        // Jumped from an empty December straight to February
        let outcome = resolver.resolve(&store, month(2025, 2), month(2024, 12)).await;
        assert_eq!(outcome.copied(), 1);
        assert_eq!(
            outcome,
            CopyOutcome::Copied {
                from: month(2024, 11),
                entries: 1
            }
        );
    }

    #[tokio::test]
    async fn test_lookback_limit() {
        let store = store_with_allocation(month(2024, 1), 300).await;
        let resolver = CopyForwardResolver::new(3);

        let outcome = resolver.resolve(&store, month(2025, 2), month(2025, 1)).await;
        assert_eq!(outcome, CopyOutcome::NothingToCopy);
        assert!(store.entries_for_month(month(2025, 2)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_copies_backward_navigation() {
        let store = store_with_allocation(month(2025, 3), 250).await;

        let outcome = CopyForwardResolver::default()
            .resolve(&store, month(2025, 2), month(2025, 3))
            .await;
        assert_eq!(outcome.copied(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_is_reported_not_raised() {
        let store = CopyRefusingStore(store_with_allocation(month(2025, 1), 500).await);

        let outcome = CopyForwardResolver::default()
            .resolve(&store, month(2025, 2), month(2025, 1))
            .await;

        assert_eq!(outcome, CopyOutcome::Failed);
        assert_eq!(outcome.copied(), 0);
        assert!(store.entries_for_month(month(2025, 2)).await.unwrap().is_empty());
    }
}
