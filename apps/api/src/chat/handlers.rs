use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::chat::TRANSIENT_FAILURE_REPLY;
use crate::errors::AppError;
use crate::models::portfolio::PortfolioRecord;
use crate::state::AppState;
use crate::store::load_record;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    /// Whether the visitor has the read-aloud toggle on.
    #[serde(default)]
    pub speak: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatReply {
    pub reply: String,
    /// True when the client should read the reply aloud.
    pub speak: bool,
}

/// POST /api/v1/chat
///
/// Answers about the last rendered record, falling back to the stored one.
/// Responder failures become a fixed apology reply, never an error response.
pub async fn handle_chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatReply>, AppError> {
    let message = req.message.trim();
    if message.is_empty() {
        return Err(AppError::Validation("Message is empty".to_string()));
    }

    let record = match state.chat_context.get() {
        Some(record) => record,
        None => load_record(state.store.as_ref()).await?.unwrap_or_default(),
    };

    tokio::time::sleep(state.config.chat_delay).await;

    let reply = match state.responder.respond(message, &record).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Chat responder failed: {e}");
            TRANSIENT_FAILURE_REPLY.to_string()
        }
    };

    Ok(Json(ChatReply {
        reply,
        speak: req.speak && state.speech.voice_output,
    }))
}
