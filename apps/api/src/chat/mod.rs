// Chat widget backend: keyword responder, its portfolio context, the simulated
// response latency and the speech capability flags.

pub mod handlers;
pub mod responder;

use std::sync::{Arc, RwLock};

use crate::models::portfolio::PortfolioRecord;
use crate::render::slots::{SlotName, SlotSink};

pub use responder::{KeywordResponder, Responder};

/// Reply shown when the responder fails.
pub const TRANSIENT_FAILURE_REPLY: &str = "Sorry, I'm having trouble connecting right now.";

/// The record the chat answers about: whatever was rendered last.
#[derive(Clone, Default)]
pub struct ChatContext(Arc<RwLock<Option<PortfolioRecord>>>);

impl ChatContext {
    pub fn set(&self, record: PortfolioRecord) {
        *self.0.write().unwrap_or_else(|e| e.into_inner()) = Some(record);
    }

    pub fn get(&self) -> Option<PortfolioRecord> {
        self.0.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

/// Voice features of the chat widget, resolved once at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeechCapabilities {
    pub voice_input: bool,
    pub voice_output: bool,
}

impl SpeechCapabilities {
    /// Hides the controls for missing capabilities instead of failing when they are used.
    pub fn apply(&self, sink: &mut impl SlotSink) {
        sink.set_visible(SlotName::VoiceButton, self.voice_input);
        sink.set_visible(SlotName::TtsToggle, self.voice_output);
    }
}
