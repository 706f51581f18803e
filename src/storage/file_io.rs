//! Async file I/O with atomic writes
//!
//! Writes go to a sibling temp file that is synced and then renamed over the
//! target, so a crash leaves either the old file or the new one.

use std::io::ErrorKind;
use std::path::Path;

use serde::{de::DeserializeOwned, Serialize};
use tokio::io::AsyncWriteExt;

use crate::error::BudgetError;

/// Read JSON from a file, returning a default value if the file doesn't exist
pub async fn read_json<T, P>(path: P) -> Result<T, BudgetError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(T::default()),
        Err(e) => {
            return Err(BudgetError::Storage(format!(
                "Failed to open {}: {}",
                path.display(),
                e
            )))
        }
    };

    serde_json::from_slice(&bytes)
        .map_err(|e| BudgetError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Write JSON to a file atomically (write to temp, sync, then rename)
pub async fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), BudgetError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await.map_err(|e| {
            BudgetError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    let bytes = serde_json::to_vec_pretty(data)
        .map_err(|e| BudgetError::Storage(format!("Failed to serialize data: {}", e)))?;

    let temp_path = path.with_extension("json.tmp");
    if let Err(e) = write_and_sync(&temp_path, &bytes).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(e);
    }

    if let Err(e) = tokio::fs::rename(&temp_path, path).await {
        let _ = tokio::fs::remove_file(&temp_path).await;
        return Err(BudgetError::Storage(format!(
            "Failed to rename temp file: {}",
            e
        )));
    }

    Ok(())
}

async fn write_and_sync(path: &Path, bytes: &[u8]) -> Result<(), BudgetError> {
    let mut file = tokio::fs::File::create(path)
        .await
        .map_err(|e| BudgetError::Storage(format!("Failed to create temp file: {}", e)))?;

    file.write_all(bytes)
        .await
        .map_err(|e| BudgetError::Storage(format!("Failed to write data: {}", e)))?;

    file.sync_all()
        .await
        .map_err(|e| BudgetError::Storage(format!("Failed to sync data: {}", e)))
}
