use std::sync::{Arc, Mutex};

use tokio::sync::Mutex as AsyncMutex;

use crate::builder::session::BuilderSession;
use crate::chat::{ChatContext, Responder, SpeechCapabilities};
use crate::config::Config;
use crate::render::slots::PageDocument;
use crate::render::typing::TypingDriver;
use crate::render::{lock_page, Renderer};
use crate::schedule::TimerRegistry;
use crate::store::PortfolioStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn PortfolioStore>,
    /// Builder state. Held across the store write on submit so two submissions never interleave.
    pub session: Arc<AsyncMutex<BuilderSession>>,
    /// Owns the shared page document the `/` handler emits.
    pub renderer: Renderer,
    pub timers: Arc<TimerRegistry>,
    /// Pluggable chat backend. Default: KeywordResponder.
    pub responder: Arc<dyn Responder>,
    pub chat_context: ChatContext,
    pub speech: SpeechCapabilities,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn PortfolioStore>, responder: Arc<dyn Responder>) -> Self {
        let speech = SpeechCapabilities {
            voice_input: config.speech_input,
            voice_output: config.speech_output,
        };

        let page = Arc::new(Mutex::new(PageDocument::default()));
        speech.apply(&mut *lock_page(&page));

        let timers = Arc::new(TimerRegistry::default());
        let chat_context = ChatContext::default();
        let typing = TypingDriver::new(page.clone(), timers.clone());
        let renderer = Renderer::new(page, typing, chat_context.clone());

        AppState {
            config,
            store,
            session: Arc::new(AsyncMutex::new(BuilderSession::default())),
            renderer,
            timers,
            responder,
            chat_context,
            speech,
        }
    }
}
