//! JSON file store
//!
//! Keeps the whole budget in memory behind an async lock and rewrites
//! `budget.json` after every mutation. Mutations run against a copy of the
//! state, which only replaces the live state once the file write succeeded.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    BudgetCategory, BudgetEntry, BudgetMonth, BudgetTransaction, CategoryId, CategoryPatch,
    DefaultCategory, EntryKey, Money, NewCategory,
};

use super::file_io::{read_json, write_json_atomic};
use super::traits::BudgetStore;

/// On-disk layout of `budget.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreData {
    #[serde(default)]
    next_category_id: i64,
    #[serde(default)]
    categories: Vec<BudgetCategory>,
    #[serde(default)]
    entries: Vec<BudgetEntry>,
    #[serde(default)]
    transactions: Vec<BudgetTransaction>,
}

#[derive(Debug, Clone, Default)]
struct StoreState {
    next_id: i64,
    categories: BTreeMap<CategoryId, BudgetCategory>,
    entries: BTreeMap<EntryKey, BudgetEntry>,
    transactions: Vec<BudgetTransaction>,
}

impl StoreState {
    fn from_data(data: StoreData) -> Self {
        let categories: BTreeMap<_, _> = data.categories.into_iter().map(|c| (c.id, c)).collect();
        let max_id = categories.keys().map(|id| id.get()).max().unwrap_or(0);
        let entries = data.entries.into_iter().map(|e| (e.key(), e)).collect();

        Self {
            next_id: data.next_category_id.max(max_id + 1).max(1),
            categories,
            entries,
            transactions: data.transactions,
        }
    }

    fn to_data(&self) -> StoreData {
        StoreData {
            next_category_id: self.next_id,
            categories: self.categories.values().cloned().collect(),
            entries: self.entries.values().cloned().collect(),
            transactions: self.transactions.clone(),
        }
    }

    fn allocate_id(&mut self) -> CategoryId {
        let id = CategoryId::new(self.next_id.max(1));
        self.next_id = id.get() + 1;
        id
    }

    fn name_taken(&self, name: &str, except: Option<CategoryId>) -> bool {
        let name = name.trim();
        self.categories
            .values()
            .any(|c| Some(c.id) != except && c.name.eq_ignore_ascii_case(name))
    }

    fn insert_category(&mut self, data: NewCategory) -> BudgetResult<BudgetCategory> {
        data.validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        if self.name_taken(&data.name, None) {
            return Err(BudgetError::Duplicate {
                entity_type: "Category",
                identifier: data.name.trim().to_string(),
            });
        }

        let category = data.into_category(self.allocate_id());
        self.categories.insert(category.id, category.clone());
        Ok(category)
    }

    fn require_category(&self, id: CategoryId) -> BudgetResult<()> {
        if self.categories.contains_key(&id) {
            Ok(())
        } else {
            Err(BudgetError::category_not_found(id.to_string()))
        }
    }

    fn month_has_entries(&self, month: BudgetMonth) -> bool {
        self.entries.keys().any(|k| k.month == month)
    }

    fn spent_in(&self, category_id: CategoryId, month: BudgetMonth) -> Money {
        self.transactions
            .iter()
            .filter(|t| t.category_id == category_id && t.month() == month)
            .map(|t| t.amount)
            .sum()
    }
}

/// A [`BudgetStore`] backed by a single JSON file, or by nothing at all
pub struct JsonStore {
    path: Option<PathBuf>,
    state: RwLock<StoreState>,
}

impl JsonStore {
    /// A store that never touches the disk
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: RwLock::new(StoreState {
                next_id: 1,
                ..StoreState::default()
            }),
        }
    }

    /// Open the store at `path`, starting empty if the file doesn't exist yet
    pub async fn open(path: impl Into<PathBuf>) -> BudgetResult<Self> {
        let path = path.into();
        let data: StoreData = read_json(&path).await?;
        let state = StoreState::from_data(data);

        debug!(
            path = %path.display(),
            categories = state.categories.len(),
            entries = state.entries.len(),
            "Opened budget store"
        );

        Ok(Self {
            path: Some(path),
            state: RwLock::new(state),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run `f` against a copy of the state; persist and commit only on success
    async fn mutate<R, F>(&self, f: F) -> BudgetResult<R>
    where
        F: FnOnce(&mut StoreState) -> BudgetResult<R>,
    {
        let mut guard = self.state.write().await;
        let mut next = guard.clone();
        let result = f(&mut next)?;

        if let Some(path) = &self.path {
            write_json_atomic(path, &next.to_data()).await?;
        }

        *guard = next;
        Ok(result)
    }
}

#[async_trait]
impl BudgetStore for JsonStore {
    async fn categories(&self) -> BudgetResult<Vec<BudgetCategory>> {
        let state = self.state.read().await;
        Ok(state.categories.values().cloned().collect())
    }

    async fn initialize_default_categories(&self) -> BudgetResult<()> {
        let created = self
            .mutate(|state| {
                if !state.categories.is_empty() {
                    return Ok(0);
                }
                for default in DefaultCategory::all() {
                    state.insert_category(default.to_new_category())?;
                }
                Ok(DefaultCategory::all().len())
            })
            .await?;

        if created > 0 {
            info!(count = created, "Created default categories");
        }
        Ok(())
    }

    async fn create_category(&self, data: NewCategory) -> BudgetResult<BudgetCategory> {
        let category = self.mutate(|state| state.insert_category(data)).await?;
        debug!(id = %category.id, name = %category.name, "Created category");
        Ok(category)
    }

    async fn update_category(&self, id: CategoryId, patch: CategoryPatch) -> BudgetResult<()> {
        self.mutate(|state| {
            if let Some(name) = &patch.name {
                if state.name_taken(name, Some(id)) {
                    return Err(BudgetError::Duplicate {
                        entity_type: "Category",
                        identifier: name.trim().to_string(),
                    });
                }
            }

            let category = state
                .categories
                .get_mut(&id)
                .ok_or_else(|| BudgetError::category_not_found(id.to_string()))?;
            category.apply(&patch);
            category
                .validate()
                .map_err(|e| BudgetError::Validation(e.to_string()))
        })
        .await
    }

    async fn delete_category(&self, id: CategoryId) -> BudgetResult<()> {
        self.mutate(|state| {
            state
                .categories
                .remove(&id)
                .ok_or_else(|| BudgetError::category_not_found(id.to_string()))?;
            state.entries.retain(|key, _| key.category_id != id);
            state.transactions.retain(|t| t.category_id != id);
            Ok(())
        })
        .await?;

        debug!(id = %id, "Deleted category");
        Ok(())
    }

    async fn entries_for_month(&self, month: BudgetMonth) -> BudgetResult<Vec<BudgetEntry>> {
        let state = self.state.read().await;
        Ok(state
            .entries
            .values()
            .filter(|e| e.month == month)
            .cloned()
            .collect())
    }

    async fn copy_entries(&self, target: BudgetMonth, source: BudgetMonth) -> BudgetResult<usize> {
        if target == source {
            return Ok(0);
        }

        self.mutate(|state| {
            if state.month_has_entries(target) {
                return Ok(0);
            }

            let copies: Vec<BudgetEntry> = state
                .entries
                .values()
                .filter(|e| e.month == source)
                .map(|e| e.carried_into(target, state.spent_in(e.category_id, target)))
                .collect();

            let count = copies.len();
            for entry in copies {
                state.entries.insert(entry.key(), entry);
            }
            Ok(count)
        })
        .await
    }

    async fn save_entry(&self, entry: BudgetEntry) -> BudgetResult<()> {
        entry
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        self.mutate(|state| {
            state.require_category(entry.category_id)?;
            state.entries.insert(entry.key(), entry);
            Ok(())
        })
        .await
    }

    async fn add_transaction(&self, transaction: BudgetTransaction) -> BudgetResult<()> {
        self.mutate(|state| {
            state.require_category(transaction.category_id)?;

            let key = EntryKey::new(transaction.category_id, transaction.month());
            let entry = state
                .entries
                .entry(key)
                .or_insert_with(|| BudgetEntry::empty(key.category_id, key.month));
            entry.spent += transaction.amount;

            state.transactions.push(transaction);
            Ok(())
        })
        .await
    }

    async fn transactions_for_month(
        &self,
        month: BudgetMonth,
    ) -> BudgetResult<Vec<BudgetTransaction>> {
        let state = self.state.read().await;
        Ok(state
            .transactions
            .iter()
            .filter(|t| t.month() == month)
            .cloned()
            .collect())
    }
}
