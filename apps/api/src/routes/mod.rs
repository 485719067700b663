pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::builder::handlers as builder;
use crate::chat::handlers as chat;
use crate::contact;
use crate::export::handlers as export;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/", get(builder::handle_page))
        // Builder
        .route("/api/v1/builder", get(builder::handle_get_builder))
        .route("/api/v1/builder/next", post(builder::handle_next_step))
        .route("/api/v1/builder/prev", post(builder::handle_prev_step))
        .route("/api/v1/builder/edit", post(builder::handle_open_editor))
        .route(
            "/api/v1/builder/skills/toggle",
            post(builder::handle_toggle_skill),
        )
        .route("/api/v1/builder/image", post(builder::handle_set_image))
        .route(
            "/api/v1/portfolio",
            get(builder::handle_get_portfolio).post(builder::handle_submit),
        )
        // Export
        .route("/api/v1/export/json", get(export::handle_export_json))
        .route("/api/v1/export/pdf", get(export::handle_export_pdf))
        // Widgets
        .route("/api/v1/chat", post(chat::handle_chat))
        .route("/api/v1/contact", post(contact::handle_contact))
        .with_state(state)
}
