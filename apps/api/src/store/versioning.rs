use tracing::info;

use crate::errors::AppError;
use crate::models::portfolio::{PortfolioRecord, CURRENT_SCHEMA_VERSION, MAX_PROJECTS};

/// Brings a stored record up to `CURRENT_SCHEMA_VERSION`.
///
/// Version 0 is the unversioned blob written before the field existed. Its
/// collections were never checked on write, so the record invariants are
/// re-applied here.
pub fn migrate(mut record: PortfolioRecord) -> Result<PortfolioRecord, AppError> {
    if record.schema_version > CURRENT_SCHEMA_VERSION {
        return Err(AppError::Storage(format!(
            "stored record has schema version {}, newest supported is {}",
            record.schema_version, CURRENT_SCHEMA_VERSION
        )));
    }

    if record.schema_version == 0 {
        upgrade_v0(&mut record);
        record.schema_version = 1;
        info!("Migrated stored portfolio record from schema v0 to v1");
    }

    Ok(record)
}

fn upgrade_v0(record: &mut PortfolioRecord) {
    let mut seen = std::collections::HashSet::new();
    record.skills.retain(|skill| seen.insert(skill.clone()));

    record.projects.retain(|p| !p.title.trim().is_empty());
    record.projects.truncate(MAX_PROJECTS);
}
