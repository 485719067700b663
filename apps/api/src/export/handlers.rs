use axum::extract::State;

use crate::errors::AppError;
use crate::export::{json::export_json, pdf::export_pdf, ExportFile};
use crate::state::AppState;

/// GET /api/v1/export/json
pub async fn handle_export_json(State(state): State<AppState>) -> Result<ExportFile, AppError> {
    export_json(state.store.as_ref()).await
}

/// GET /api/v1/export/pdf
pub async fn handle_export_pdf(State(state): State<AppState>) -> Result<ExportFile, AppError> {
    export_pdf(state.store.as_ref()).await
}
