//! Builder flows that span the session, the store and the renderer.
//!
//! Each flow takes the session lock first and keeps it until the session is
//! consistent again, so concurrent requests see either the old or the new state.

use tracing::{debug, info};

use crate::builder::form::PortfolioForm;
use crate::builder::session::SessionSnapshot;
use crate::errors::AppError;
use crate::models::portfolio::PortfolioRecord;
use crate::schedule::TimerKey;
use crate::state::AppState;
use crate::store::{load_record, save_record};

/// Page load: a stored record is rendered and hides the builder; no record shows it.
///
/// The session is seeded from the store on the first load only. Later loads keep
/// the overlay state and the pending skill picks of the running session.
pub async fn load_page(state: &AppState) -> Result<SessionSnapshot, AppError> {
    let mut session = state.session.lock().await;
    match load_record(state.store.as_ref()).await? {
        Some(record) => {
            if session.restore(&record) {
                state.timers.cancel(TimerKey::OverlayFade);
                debug!("Builder session seeded from the stored portfolio");
            }
            state.renderer.render(&record);
        }
        None => {
            debug!("No stored portfolio, showing the builder");
            session.require_builder();
        }
    }
    Ok(session.snapshot())
}

/// Validates, persists, renders, then fades the overlay out.
///
/// The store is written before anything is rendered; a failed write leaves both
/// the page and the session untouched.
pub async fn submit(state: &AppState, form: &PortfolioForm) -> Result<PortfolioRecord, AppError> {
    let mut session = state.session.lock().await;
    let record = session.prepare_submission(form)?;
    let saved = save_record(state.store.as_ref(), &record).await?;

    state.renderer.render(&saved);
    session.begin_fade_out();
    drop(session);

    schedule_overlay_hide(state);
    info!("Portfolio generated for '{}'", saved.name);
    Ok(saved)
}

fn schedule_overlay_hide(state: &AppState) {
    let session = state.session.clone();
    let fade = state.config.overlay_fade;
    state.timers.spawn(TimerKey::OverlayFade, async move {
        tokio::time::sleep(fade).await;
        if session.lock().await.finish_fade_out() {
            debug!("Builder overlay hidden");
        }
    });
}

/// Reopens the builder at its first page. A pending fade-out is cancelled.
pub async fn open_editor(state: &AppState) -> SessionSnapshot {
    let mut session = state.session.lock().await;
    state.timers.cancel(TimerKey::OverlayFade);
    session.open_editor();
    session.snapshot()
}

pub async fn stored_record(state: &AppState) -> Result<PortfolioRecord, AppError> {
    load_record(state.store.as_ref())
        .await?
        .ok_or_else(|| AppError::NotFound("No portfolio has been generated yet".to_string()))
}
