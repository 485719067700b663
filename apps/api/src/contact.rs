//! Contact form: validation, simulated send latency and the self-clearing notice.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::render::lock_page;
use crate::render::slots::{SlotName, SlotSink};
use crate::schedule::TimerKey;
use crate::state::AppState;

pub const SENT_NOTICE: &str = "Message sent successfully! I'll get back to you soon.";

#[derive(Debug, Default, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ContactResponse {
    pub notice: String,
}

impl ContactRequest {
    fn validate(&self) -> Result<(), AppError> {
        let missing: Vec<&str> = [
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(format!(
                "Required fields are empty: {}",
                missing.join(", ")
            )))
        }
    }
}

/// POST /api/v1/contact
///
/// Nothing is delivered anywhere: after the configured delay the notice slot
/// shows the confirmation, and a tracked timer clears it again. A new
/// submission replaces a pending clear.
pub async fn handle_contact(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> Result<Json<ContactResponse>, AppError> {
    req.validate()?;
    tokio::time::sleep(state.config.contact_delay).await;

    let page = state.renderer.page().clone();
    lock_page(&page).set_text(SlotName::ContactNotice, SENT_NOTICE);
    state
        .timers
        .schedule(TimerKey::ContactNotice, state.config.notice_clear, move || {
            lock_page(&page).set_text(SlotName::ContactNotice, "");
        });

    info!("Contact message received from {}", req.email.trim());
    Ok(Json(ContactResponse {
        notice: SENT_NOTICE.to_string(),
    }))
}
