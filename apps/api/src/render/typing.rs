//! Rotating-word typing display.
//!
//! `TypingEffect` is the pure state machine (one frame per step, each with the
//! delay before the next). `TypingDriver` runs it as a cancellable background
//! task writing into the `typing-text` slot.

use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::render::slots::{lock_page, SharedPage, SlotName, SlotSink};
use crate::schedule::{TimerKey, TimerRegistry};

/// Words shown when the record has no roles.
pub const FALLBACK_WORDS: [&str; 4] = ["Experiences.", "Solutions.", "Interfaces.", "Innovations."];

pub const TYPE_DELAY: Duration = Duration::from_millis(150);
pub const DELETE_DELAY: Duration = Duration::from_millis(50);
pub const HOLD_DELAY: Duration = Duration::from_millis(2000);
pub const NEXT_WORD_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypingFrame {
    pub text: String,
    pub delay: Duration,
}

#[derive(Debug, Clone)]
pub struct TypingEffect {
    words: Vec<Vec<char>>,
    word_index: usize,
    char_index: usize,
    deleting: bool,
}

/// The word list for a record's roles: the roles themselves, or the fallback list.
pub fn words_for(roles: &[String]) -> Vec<String> {
    if roles.is_empty() {
        FALLBACK_WORDS.iter().map(|w| w.to_string()).collect()
    } else {
        roles.to_vec()
    }
}

impl TypingEffect {
    pub fn new(roles: &[String]) -> Self {
        TypingEffect {
            words: words_for(roles)
                .iter()
                .map(|w| w.chars().collect())
                .collect(),
            word_index: 0,
            char_index: 0,
            deleting: false,
        }
    }

    pub fn words(&self) -> Vec<String> {
        self.words.iter().map(|w| w.iter().collect()).collect()
    }

    /// Advances one character (typing or deleting) and returns the visible text.
    pub fn step(&mut self) -> TypingFrame {
        let word_len = self.words.get(self.word_index).map_or(0, Vec::len);

        if self.deleting {
            self.char_index = self.char_index.saturating_sub(1);
        } else {
            self.char_index = (self.char_index + 1).min(word_len);
        }

        let text: String = self
            .words
            .get(self.word_index)
            .map(|w| w.iter().take(self.char_index).collect())
            .unwrap_or_default();

        let delay = if !self.deleting && self.char_index == word_len {
            self.deleting = true;
            HOLD_DELAY
        } else if self.deleting && self.char_index == 0 {
            self.deleting = false;
            self.word_index = (self.word_index + 1) % self.words.len().max(1);
            NEXT_WORD_DELAY
        } else if self.deleting {
            DELETE_DELAY
        } else {
            TYPE_DELAY
        };

        TypingFrame { text, delay }
    }
}

/// Runs the typing animation for the shared page. Restarting cancels the running loop first.
#[derive(Clone)]
pub struct TypingDriver {
    page: SharedPage,
    timers: Arc<TimerRegistry>,
}

impl TypingDriver {
    pub fn new(page: SharedPage, timers: Arc<TimerRegistry>) -> Self {
        TypingDriver { page, timers }
    }

    pub fn restart(&self, roles: &[String]) {
        let mut effect = TypingEffect::new(roles);
        debug!("Typing display cycling {:?}", effect.words());
        lock_page(&self.page).set_text(SlotName::TypingText, "");

        let page = self.page.clone();
        self.timers.spawn(TimerKey::Typing, async move {
            loop {
                let frame = effect.step();
                lock_page(&page).set_text(SlotName::TypingText, &frame.text);
                tokio::time::sleep(frame.delay).await;
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::slots::PageDocument;
    use std::sync::Mutex;

    fn roles(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_empty_roles_use_fallback() {
        assert_eq!(TypingEffect::new(&[]).words(), FALLBACK_WORDS.to_vec());
        assert_eq!(words_for(&roles(&["Engineer"])), vec!["Engineer"]);
    }

    #[test]
    fn test_full_cycle_of_one_word() {
        let mut effect = TypingEffect::new(&roles(&["Go", "Rust"]));
        let frames: Vec<TypingFrame> = (0..5).map(|_| effect.step()).collect();

        assert_eq!(frames[0], TypingFrame { text: "G".into(), delay: TYPE_DELAY });
        assert_eq!(frames[1], TypingFrame { text: "Go".into(), delay: HOLD_DELAY });
        assert_eq!(frames[2], TypingFrame { text: "G".into(), delay: DELETE_DELAY });
        assert_eq!(frames[3], TypingFrame { text: "".into(), delay: NEXT_WORD_DELAY });
        assert_eq!(frames[4].text, "R", "moves on to the next word");
    }

    #[test]
    fn test_wraps_to_first_word() {
        let mut effect = TypingEffect::new(&roles(&["A"]));
        // "A" (hold), "" (next word) then back to "A"
        assert_eq!(effect.step().text, "A");
        assert_eq!(effect.step().text, "");
        assert_eq!(effect.step().text, "A");
    }

    #[test]
    fn test_multibyte_characters() {
        let mut effect = TypingEffect::new(&roles(&["Développeur"]));
        let text = (0..2).map(|_| effect.step().text).last().unwrap();
        assert_eq!(text, "Dé");
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_replaces_running_animation() {
        let page: SharedPage = Arc::new(Mutex::new(PageDocument::default()));
        let timers = Arc::new(TimerRegistry::default());
        let driver = TypingDriver::new(page.clone(), timers.clone());

        driver.restart(&roles(&["Alpha"]));
        tokio::time::sleep(Duration::from_millis(320)).await;
        assert_eq!(lock_page(&page).slot(SlotName::TypingText).text, "Alp");

        driver.restart(&roles(&["Zed"]));
        tokio::time::sleep(Duration::from_millis(1)).await;
        assert_eq!(lock_page(&page).slot(SlotName::TypingText).text, "Z");

        tokio::time::sleep(Duration::from_millis(320)).await;
        assert_eq!(lock_page(&page).slot(SlotName::TypingText).text, "Zed");
        assert!(timers.is_pending(TimerKey::Typing));
    }
}
