//! Budget period controller
//!
//! Owns the active month and the derived [`BudgetState`] for it. Every month
//! change and every mutation ends in a full reload from the store:
//!
//! 1. seed default categories if there are none
//! 2. copy allocations forward into an empty month
//! 3. read the month's summary
//! 4. merge it with the external signals
//!
//! Loads may overlap when the month changes quickly. Each load carries a
//! sequence number and only the most recently started one may commit.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Local;
use tracing::{debug, error, info, warn};

use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    BudgetCategory, BudgetEntry, BudgetMonth, BudgetState, BudgetSummary, BudgetTransaction,
    CategoryId, CategoryPatch, DefaultCategory, Money, NewCategory,
};
use crate::signals::{fetch_signals, MonthProjector, OccurrenceProjector, SignalSource, Signals};
use crate::storage::{ensure_categories, BudgetStore};

use super::copy_forward::CopyForwardResolver;
use super::derive::derive_budget_state;
use super::period::parse_period_from;

/// Everything a front end reads from the controller
#[derive(Debug, Clone)]
struct ControllerView {
    active_month: BudgetMonth,
    /// Month of the last committed load; the copy-forward source for the next one
    committed_month: Option<BudgetMonth>,
    state: BudgetState,
    categories: Vec<BudgetCategory>,
    error: Option<String>,
    in_flight: usize,
}

struct Loaded {
    state: BudgetState,
    categories: Vec<BudgetCategory>,
}

enum LoadOutcome {
    Ready(Loaded),
    /// Seeding failed; the defaults are shown with the error
    Fallback(Loaded, BudgetError),
    Failed(BudgetError),
}

/// Keeps `is_loading` true for as long as it lives
struct InFlight<'a> {
    view: &'a Mutex<ControllerView>,
}

impl<'a> InFlight<'a> {
    fn start(view: &'a Mutex<ControllerView>) -> Self {
        lock(view).in_flight += 1;
        Self { view }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        let mut view = lock(self.view);
        view.in_flight = view.in_flight.saturating_sub(1);
    }
}

fn lock(view: &Mutex<ControllerView>) -> MutexGuard<'_, ControllerView> {
    view.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Single source of truth for the active month and its budget state
pub struct BudgetController<S, G> {
    store: Arc<S>,
    signals: Arc<G>,
    projector: Arc<dyn MonthProjector>,
    resolver: CopyForwardResolver,
    seed_defaults: bool,
    sequence: AtomicU64,
    view: Mutex<ControllerView>,
}

impl<S, G> BudgetController<S, G>
where
    S: BudgetStore,
    G: SignalSource,
{
    /// Create a controller on the current calendar month. Nothing is loaded
    /// until [`load`](Self::load) or a navigation call.
    pub fn new(store: Arc<S>, signals: Arc<G>, settings: &Settings) -> Self {
        Self::starting_at(store, signals, settings, BudgetMonth::current())
    }

    pub fn starting_at(
        store: Arc<S>,
        signals: Arc<G>,
        settings: &Settings,
        month: BudgetMonth,
    ) -> Self {
        Self {
            store,
            signals,
            projector: Arc::new(OccurrenceProjector),
            resolver: CopyForwardResolver::new(settings.copy_forward_lookback),
            seed_defaults: settings.seed_default_categories,
            sequence: AtomicU64::new(0),
            view: Mutex::new(ControllerView {
                active_month: month,
                committed_month: None,
                state: BudgetState::empty(month),
                categories: Vec::new(),
                error: None,
                in_flight: 0,
            }),
        }
    }

    /// Replace the month-specific income/expense calculation
    pub fn with_projector(mut self, projector: Arc<dyn MonthProjector>) -> Self {
        self.projector = projector;
        self
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    // Reads

    /// The active month as a display label, e.g. "March 2025"
    pub fn active_period(&self) -> String {
        lock(&self.view).active_month.label()
    }

    pub fn active_month(&self) -> BudgetMonth {
        lock(&self.view).active_month
    }

    pub fn budget_categories(&self) -> Vec<BudgetCategory> {
        lock(&self.view).categories.clone()
    }

    /// The last committed state
    pub fn state(&self) -> BudgetState {
        lock(&self.view).state.clone()
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.view).in_flight > 0
    }

    pub fn error(&self) -> Option<String> {
        lock(&self.view).error.clone()
    }

    // Navigation

    /// Switch to the month named by `label`
    ///
    /// "next" and "last" step from the active month, like
    /// [`next_month`](Self::next_month) and [`prev_month`](Self::prev_month).
    /// Returns `false` and leaves the active month alone when the label
    /// doesn't parse. Load failures after a successful switch are reported
    /// through [`error`](Self::error).
    pub async fn set_active_period(&self, label: &str) -> bool {
        let month = match parse_period_from(label, self.active_month()) {
            Ok(month) => month,
            Err(e) => {
                warn!(label, error = %e, "Ignoring unparseable period");
                return false;
            }
        };

        if let Err(e) = self.set_active_month(month).await {
            debug!(%month, error = %e, "Load after period change failed");
        }
        true
    }

    pub async fn set_active_month(&self, month: BudgetMonth) -> BudgetResult<()> {
        lock(&self.view).active_month = month;
        self.load().await
    }

    pub async fn next_month(&self) -> BudgetResult<()> {
        let month = self.active_month().next();
        self.set_active_month(month).await
    }

    pub async fn prev_month(&self) -> BudgetResult<()> {
        let month = self.active_month().prev();
        self.set_active_month(month).await
    }

    // Loading

    /// Load the active month from the store and signals
    pub async fn load(&self) -> BudgetResult<()> {
        let _in_flight = InFlight::start(&self.view);
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst) + 1;
        let (target, source) = {
            let view = lock(&self.view);
            (view.active_month, view.committed_month)
        };

        debug!(seq, %target, "Loading budget month");
        let outcome = self.compute(target, source).await;
        self.commit(seq, target, outcome)
    }

    /// Same as [`load`](Self::load); used after mutations
    pub async fn reload(&self) -> BudgetResult<()> {
        self.load().await
    }

    async fn compute(&self, target: BudgetMonth, source: Option<BudgetMonth>) -> LoadOutcome {
        let categories = match ensure_categories(self.store.as_ref(), self.seed_defaults).await {
            Ok(categories) => categories,
            Err(e @ BudgetError::Seeding(_)) => {
                error!(%target, error = %e, "Category seeding failed, showing defaults");
                let fallback = DefaultCategory::fallback_set();
                let summary = BudgetSummary::from_store_rows(target, &fallback, &[]);
                let state = self.derive(summary).await;
                return LoadOutcome::Fallback(
                    Loaded {
                        state,
                        categories: fallback,
                    },
                    e,
                );
            }
            Err(e) => return LoadOutcome::Failed(e),
        };

        if let Some(source) = source {
            if source != target {
                self.resolver
                    .resolve(self.store.as_ref(), target, source)
                    .await;
            }
        }

        let summary = match self.store.monthly_summary(target).await {
            Ok(summary) => summary,
            Err(e) => return LoadOutcome::Failed(e),
        };

        let state = self.derive(summary).await;
        LoadOutcome::Ready(Loaded { state, categories })
    }

    async fn derive(&self, summary: BudgetSummary) -> BudgetState {
        let signals: Signals = fetch_signals(self.signals.as_ref()).await;
        derive_budget_state(summary, &signals, self.projector.as_ref())
    }

    fn commit(&self, seq: u64, target: BudgetMonth, outcome: LoadOutcome) -> BudgetResult<()> {
        let mut view = lock(&self.view);

        let latest = self.sequence.load(Ordering::SeqCst);
        if seq != latest {
            debug!(seq, latest, %target, "Discarding stale load");
            return Ok(());
        }

        match outcome {
            LoadOutcome::Ready(loaded) => {
                view.state = loaded.state;
                view.categories = loaded.categories;
                view.committed_month = Some(target);
                view.error = None;
                Ok(())
            }
            LoadOutcome::Fallback(loaded, e) => {
                view.state = loaded.state;
                view.categories = loaded.categories;
                view.committed_month = Some(target);
                view.error = Some(e.to_string());
                Err(e)
            }
            LoadOutcome::Failed(e) => {
                error!(%target, error = %e, "Failed to load budget month");
                view.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    // Mutations

    /// Record a failed mutation; the committed state is left as it was
    fn fail(&self, action: &'static str, e: BudgetError) -> BudgetError {
        error!(action, error = %e, "Budget mutation failed");
        lock(&self.view).error = Some(e.to_string());
        e
    }

    /// Reload after a successful write. A failed reload is already recorded in
    /// `error`, and doesn't undo the write.
    async fn refresh(&self) {
        if let Err(e) = self.load().await {
            debug!(error = %e, "Reload after mutation failed");
        }
    }

    pub async fn add_category(&self, data: NewCategory) -> BudgetResult<BudgetCategory> {
        let _in_flight = InFlight::start(&self.view);
        let category = self
            .store
            .create_category(data)
            .await
            .map_err(|e| self.fail("add_category", e))?;

        info!(id = %category.id, name = %category.name, "Added category");
        self.refresh().await;
        Ok(category)
    }

    pub async fn update_category(&self, id: CategoryId, patch: CategoryPatch) -> BudgetResult<()> {
        let _in_flight = InFlight::start(&self.view);
        self.store
            .update_category(id, patch)
            .await
            .map_err(|e| self.fail("update_category", e))?;

        self.refresh().await;
        Ok(())
    }

    pub async fn delete_category(&self, id: CategoryId) -> BudgetResult<()> {
        let _in_flight = InFlight::start(&self.view);
        self.store
            .delete_category(id)
            .await
            .map_err(|e| self.fail("delete_category", e))?;

        info!(id = %id, "Deleted category");
        self.refresh().await;
        Ok(())
    }

    /// Set a category's allocation for the active month, keeping its spend
    pub async fn set_allocation(&self, id: CategoryId, amount: Money) -> BudgetResult<()> {
        let _in_flight = InFlight::start(&self.view);
        let (month, known_spent) = {
            let view = lock(&self.view);
            let spent = (view.state.month() == view.active_month).then(|| {
                view.state
                    .summary
                    .line(id)
                    .map(|line| line.spent)
                    .unwrap_or_default()
            });
            (view.active_month, spent)
        };

        // Only reached while the committed state still belongs to another month
        let spent = match known_spent {
            Some(spent) => spent,
            None => self
                .store
                .entries_for_month(month)
                .await
                .map_err(|e| self.fail("set_allocation", e))?
                .into_iter()
                .find(|e| e.category_id == id)
                .map(|e| e.spent)
                .unwrap_or_default(),
        };

        self.store
            .save_entry(BudgetEntry::new(id, month, amount, spent))
            .await
            .map_err(|e| self.fail("set_allocation", e))?;

        debug!(category = %id, %month, allocated = %amount, "Set allocation");
        self.refresh().await;
        Ok(())
    }

    /// Record spending against a category in the active month
    ///
    /// The sign of `amount` is ignored. The spend is dated today when today
    /// falls in the active month, otherwise on the month's first day.
    pub async fn add_transaction(
        &self,
        id: CategoryId,
        amount: Money,
        description: &str,
    ) -> BudgetResult<()> {
        let _in_flight = InFlight::start(&self.view);
        let month = self.active_month();
        let today = Local::now().date_naive();
        let date = if month.contains(today) {
            today
        } else {
            month.first_day()
        };

        let transaction = BudgetTransaction::new(id, amount, date, description);
        self.store
            .add_transaction(transaction)
            .await
            .map_err(|e| self.fail("add_transaction", e))?;

        debug!(category = %id, spent = %amount.abs(), %date, "Recorded spending");
        self.refresh().await;
        Ok(())
    }
}
