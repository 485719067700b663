mod builder;
mod chat;
mod config;
mod contact;
mod errors;
mod export;
mod layout;
mod models;
mod render;
mod routes;
mod schedule;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chat::KeywordResponder;
use crate::config::Config;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::file::FileStore;
use crate::store::redis_store::RedisStore;
use crate::store::PortfolioStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed values)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Folio v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the portfolio store (Redis when configured, file otherwise)
    let store = build_store(&config)?;
    info!("Portfolio store: {}", store.describe());

    // Initialize chat responder (KeywordResponder by default)
    let responder = Arc::new(KeywordResponder::default());

    let state = AppState::new(config.clone(), store, responder);
    info!(
        "Speech capabilities: input={} output={}",
        state.speech.voice_input, state.speech.voice_output
    );

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_store(config: &Config) -> Result<Arc<dyn PortfolioStore>> {
    match &config.redis_url {
        Some(url) => {
            let store = RedisStore::open(url, &config.store_key)
                .with_context(|| format!("open redis store at {url}"))?;
            Ok(Arc::new(store))
        }
        None => Ok(Arc::new(FileStore::new(&config.store_dir, &config.store_key))),
    }
}
