use axum::{extract::State, http::StatusCode, response::Html, Json};
use serde::{Deserialize, Serialize};

use crate::builder::form::PortfolioForm;
use crate::builder::service;
use crate::builder::session::SessionSnapshot;
use crate::builder::wizard::StepChange;
use crate::errors::AppError;
use crate::models::portfolio::PortfolioRecord;
use crate::render::lock_page;
use crate::render::page::render_html;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ToggleSkillRequest {
    pub skill: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToggleSkillResponse {
    pub skill: String,
    pub selected: bool,
    pub selected_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    pub data_url: String,
}

/// GET /
pub async fn handle_page(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = service::load_page(&state).await?;
    let page = lock_page(state.renderer.page()).clone();
    Ok(Html(render_html(&page, &snapshot)?))
}

/// GET /api/v1/builder
pub async fn handle_get_builder(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(state.session.lock().await.snapshot())
}

/// POST /api/v1/builder/next
pub async fn handle_next_step(
    State(state): State<AppState>,
    Json(form): Json<PortfolioForm>,
) -> Result<Json<StepChange>, AppError> {
    let change = state.session.lock().await.next_step(&form)?;
    Ok(Json(change))
}

/// POST /api/v1/builder/prev
pub async fn handle_prev_step(State(state): State<AppState>) -> Json<StepChange> {
    Json(state.session.lock().await.previous_step())
}

/// POST /api/v1/builder/edit
pub async fn handle_open_editor(State(state): State<AppState>) -> Json<SessionSnapshot> {
    Json(service::open_editor(&state).await)
}

/// POST /api/v1/builder/skills/toggle
pub async fn handle_toggle_skill(
    State(state): State<AppState>,
    Json(req): Json<ToggleSkillRequest>,
) -> Result<Json<ToggleSkillResponse>, AppError> {
    let mut session = state.session.lock().await;
    let selected = session.toggle_skill(&req.skill)?;
    Ok(Json(ToggleSkillResponse {
        skill: req.skill,
        selected,
        selected_skills: session.snapshot().selected_skills,
    }))
}

/// POST /api/v1/builder/image
pub async fn handle_set_image(
    State(state): State<AppState>,
    Json(req): Json<ImageRequest>,
) -> Result<Json<SessionSnapshot>, AppError> {
    let mut session = state.session.lock().await;
    session.set_image(&req.data_url)?;
    Ok(Json(session.snapshot()))
}

/// POST /api/v1/portfolio
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(form): Json<PortfolioForm>,
) -> Result<(StatusCode, Json<PortfolioRecord>), AppError> {
    let saved = service::submit(&state, &form).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}

/// GET /api/v1/portfolio
pub async fn handle_get_portfolio(
    State(state): State<AppState>,
) -> Result<Json<PortfolioRecord>, AppError> {
    Ok(Json(service::stored_record(&state).await?))
}
