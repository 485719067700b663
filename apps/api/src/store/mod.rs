//! Persistence Store: one named slot holding the serialized portfolio record.
//!
//! Backends only move raw text in and out of the slot. Parsing and schema
//! migration live in this module so every backend behaves the same.

pub mod file;
#[cfg(test)]
pub mod memory;
pub mod redis_store;
pub mod versioning;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::models::portfolio::{PortfolioRecord, CURRENT_SCHEMA_VERSION};

/// A single key-value slot that survives restarts.
///
/// Carried in `AppState` as `Arc<dyn PortfolioStore>`.
#[async_trait]
pub trait PortfolioStore: Send + Sync {
    /// Returns the stored text exactly as it was written, or `None` if the slot is empty.
    async fn read_raw(&self) -> Result<Option<String>, AppError>;

    /// Replaces the slot content.
    async fn write_raw(&self, raw: &str) -> Result<(), AppError>;

    /// Human-readable backend description for start-up logging.
    fn describe(&self) -> String;
}

/// Loads and migrates the stored record.
///
/// A slot that does not parse as a record is treated as empty (logged) so the
/// builder is shown again instead of the page failing to load.
pub async fn load_record(store: &dyn PortfolioStore) -> Result<Option<PortfolioRecord>, AppError> {
    let Some(raw) = store.read_raw().await? else {
        return Ok(None);
    };

    let record: PortfolioRecord = match serde_json::from_str(&raw) {
        Ok(record) => record,
        Err(e) => {
            warn!("Stored portfolio record is unreadable, ignoring it: {e}");
            return Ok(None);
        }
    };

    versioning::migrate(record).map(Some)
}

/// Overwrites the slot with the record, stamped with the current schema version.
pub async fn save_record(
    store: &dyn PortfolioStore,
    record: &PortfolioRecord,
) -> Result<PortfolioRecord, AppError> {
    let mut stamped = record.clone();
    stamped.schema_version = CURRENT_SCHEMA_VERSION;

    let raw = serde_json::to_string(&stamped)
        .map_err(|e| AppError::Storage(format!("serialize record: {e}")))?;
    store.write_raw(&raw).await?;

    info!(
        "Saved portfolio for '{}' ({} skills, {} projects)",
        stamped.name,
        stamped.skills.len(),
        stamped.projects.len()
    );
    Ok(stamped)
}
