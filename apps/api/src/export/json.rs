use bytes::Bytes;
use tracing::info;

use crate::errors::AppError;
use crate::export::ExportFile;
use crate::store::PortfolioStore;

pub const JSON_FILENAME: &str = "portfolio-data.json";
pub const NO_DATA_MESSAGE: &str = "No portfolio data found!";

/// Returns the stored text byte-for-byte, without parsing it.
pub async fn export_json(store: &dyn PortfolioStore) -> Result<ExportFile, AppError> {
    let raw = store
        .read_raw()
        .await?
        .ok_or_else(|| AppError::NotFound(NO_DATA_MESSAGE.to_string()))?;

    info!("Exporting raw portfolio data ({} bytes)", raw.len());
    Ok(ExportFile {
        filename: JSON_FILENAME.to_string(),
        content_type: "application/json",
        bytes: Bytes::from(raw),
    })
}
