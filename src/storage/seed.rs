//! First-run category seeding
//!
//! A budget with no categories gets the default set before its first load.

use tracing::{info, warn};

use crate::error::{BudgetError, BudgetResult};
use crate::models::BudgetCategory;

use super::traits::BudgetStore;

/// Return the store's categories, seeding the defaults first if there are none
///
/// A failure to list categories in the first place is returned as-is. Anything
/// that goes wrong after seeding started is a [`BudgetError::Seeding`], as is
/// a store that is still empty afterwards.
pub async fn ensure_categories<S>(store: &S, seed_defaults: bool) -> BudgetResult<Vec<BudgetCategory>>
where
    S: BudgetStore + ?Sized,
{
    let categories = store.categories().await?;
    if !categories.is_empty() || !seed_defaults {
        return Ok(categories);
    }

    info!("No categories found, creating defaults");
    store.initialize_default_categories().await.map_err(|e| {
        warn!(error = %e, "Default category creation failed");
        BudgetError::Seeding(e.to_string())
    })?;

    let categories = store
        .categories()
        .await
        .map_err(|e| BudgetError::Seeding(e.to_string()))?;

    if categories.is_empty() {
        return Err(BudgetError::Seeding("no categories after seeding".into()));
    }
    Ok(categories)
}
