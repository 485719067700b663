//! Slot registry: the whole contract between the rendering pipeline and the page template.
//!
//! Each `SlotName` maps to exactly one capability. The pipeline writes through
//! the `SlotSink` trait and never looks slots up by string, so a different
//! target (a test double, another template) can be injected.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use serde::Serialize;
use tracing::warn;

// ────────────────────────────────────────────────────────────────────────────
// Slot names and capabilities
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SlotName {
    LogoName,
    HeroName,
    Bio,
    Problem,
    SolutionName,
    SolutionDesc,
    SkillsGrid,
    ProjectsGrid,
    ProfileImage,
    FooterLinkedin,
    FooterGithub,
    FooterTwitter,
    TypingText,
    ContactNotice,
    VoiceButton,
    TtsToggle,
}

/// What a slot accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotCapability {
    /// Plain text content.
    Text,
    /// A list of generated items, rebuilt wholesale.
    List,
    /// An anchor: `href` attribute plus visibility.
    Link,
    /// An image: `src` / `alt` attributes plus visibility.
    Image,
    /// A control whose only state is visibility.
    Control,
}

impl SlotName {
    pub const ALL: [SlotName; 16] = [
        SlotName::LogoName,
        SlotName::HeroName,
        SlotName::Bio,
        SlotName::Problem,
        SlotName::SolutionName,
        SlotName::SolutionDesc,
        SlotName::SkillsGrid,
        SlotName::ProjectsGrid,
        SlotName::ProfileImage,
        SlotName::FooterLinkedin,
        SlotName::FooterGithub,
        SlotName::FooterTwitter,
        SlotName::TypingText,
        SlotName::ContactNotice,
        SlotName::VoiceButton,
        SlotName::TtsToggle,
    ];

    /// Element id of the slot in the page template.
    pub fn id(self) -> &'static str {
        match self {
            SlotName::LogoName => "dynamic-logo-name",
            SlotName::HeroName => "dynamic-hero-name",
            SlotName::Bio => "dynamic-bio",
            SlotName::Problem => "dynamic-problem",
            SlotName::SolutionName => "dynamic-solution-name",
            SlotName::SolutionDesc => "dynamic-solution-desc",
            SlotName::SkillsGrid => "dynamic-skills-grid",
            SlotName::ProjectsGrid => "dynamic-projects-grid",
            SlotName::ProfileImage => "dynamic-profile-image",
            SlotName::FooterLinkedin => "footer-linkedin",
            SlotName::FooterGithub => "footer-github",
            SlotName::FooterTwitter => "footer-twitter",
            SlotName::TypingText => "typing-text",
            SlotName::ContactNotice => "msg",
            SlotName::VoiceButton => "voice-btn",
            SlotName::TtsToggle => "tts-toggle",
        }
    }

    pub fn capability(self) -> SlotCapability {
        match self {
            SlotName::LogoName
            | SlotName::HeroName
            | SlotName::Bio
            | SlotName::Problem
            | SlotName::SolutionName
            | SlotName::SolutionDesc
            | SlotName::TypingText
            | SlotName::ContactNotice => SlotCapability::Text,
            SlotName::SkillsGrid | SlotName::ProjectsGrid => SlotCapability::List,
            SlotName::FooterLinkedin | SlotName::FooterGithub | SlotName::FooterTwitter => {
                SlotCapability::Link
            }
            SlotName::ProfileImage => SlotCapability::Image,
            SlotName::VoiceButton | SlotName::TtsToggle => SlotCapability::Control,
        }
    }
}

/// A generated child of a list slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SlotItem {
    SkillTag {
        name: String,
    },
    ProjectCard {
        title: String,
        desc: String,
        tech: Vec<String>,
    },
}

/// Page-wide CSS custom properties the theme writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ThemeVar {
    Primary,
    PrimaryDark,
}

impl ThemeVar {
    pub fn css_name(self) -> &'static str {
        match self {
            ThemeVar::Primary => "--primary",
            ThemeVar::PrimaryDark => "--primary-dark",
        }
    }
}

pub const DEFAULT_PRIMARY: &str = "#38bdf8";
pub const DEFAULT_PRIMARY_DARK: &str = "#0ea5e9";

// ────────────────────────────────────────────────────────────────────────────
// Sink trait
// ────────────────────────────────────────────────────────────────────────────

/// Write capabilities the rendering pipeline needs from its target.
pub trait SlotSink {
    fn set_text(&mut self, slot: SlotName, text: &str);
    fn set_visible(&mut self, slot: SlotName, visible: bool);
    fn set_attribute(&mut self, slot: SlotName, name: &'static str, value: &str);
    fn clear_items(&mut self, slot: SlotName);
    fn append_item(&mut self, slot: SlotName, item: SlotItem);
    fn set_theme(&mut self, var: ThemeVar, value: &str);
}

// ────────────────────────────────────────────────────────────────────────────
// In-process page model
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotState {
    pub text: String,
    pub visible: bool,
    pub attributes: BTreeMap<&'static str, String>,
    pub items: Vec<SlotItem>,
}

impl Default for SlotState {
    fn default() -> Self {
        SlotState {
            text: String::new(),
            visible: true,
            attributes: BTreeMap::new(),
            items: Vec::new(),
        }
    }
}

/// The current state of every slot plus the theme, as the template will show it.
#[derive(Debug, Clone, PartialEq)]
pub struct PageDocument {
    slots: BTreeMap<SlotName, SlotState>,
    theme: BTreeMap<ThemeVar, String>,
}

impl Default for PageDocument {
    fn default() -> Self {
        PageDocument {
            slots: SlotName::ALL
                .iter()
                .map(|&name| (name, SlotState::default()))
                .collect(),
            theme: BTreeMap::from([
                (ThemeVar::Primary, DEFAULT_PRIMARY.to_string()),
                (ThemeVar::PrimaryDark, DEFAULT_PRIMARY_DARK.to_string()),
            ]),
        }
    }
}

impl PageDocument {
    #[cfg(test)]
    pub fn slot(&self, name: SlotName) -> &SlotState {
        // Every name is inserted in `default()` and never removed.
        &self.slots[&name]
    }

    #[cfg(test)]
    pub fn theme(&self, var: ThemeVar) -> &str {
        self.theme.get(&var).map(String::as_str).unwrap_or_default()
    }

    /// Slots keyed by element id, for the template context.
    pub fn slots_by_id(&self) -> BTreeMap<&'static str, &SlotState> {
        self.slots.iter().map(|(name, state)| (name.id(), state)).collect()
    }

    /// Theme keyed by CSS custom property name.
    pub fn theme_by_css_name(&self) -> BTreeMap<&'static str, &str> {
        self.theme
            .iter()
            .map(|(var, value)| (var.css_name(), value.as_str()))
            .collect()
    }

    fn slot_for(&mut self, name: SlotName, allowed: &[SlotCapability], op: &str) -> Option<&mut SlotState> {
        if !allowed.contains(&name.capability()) {
            warn!(
                "Ignoring {op} on slot '{}' ({:?} slot)",
                name.id(),
                name.capability()
            );
            return None;
        }
        self.slots.get_mut(&name)
    }
}

impl SlotSink for PageDocument {
    fn set_text(&mut self, slot: SlotName, text: &str) {
        if let Some(state) = self.slot_for(slot, &[SlotCapability::Text], "set_text") {
            state.text = text.to_string();
        }
    }

    fn set_visible(&mut self, slot: SlotName, visible: bool) {
        if let Some(state) = self.slots.get_mut(&slot) {
            state.visible = visible;
        }
    }

    fn set_attribute(&mut self, slot: SlotName, name: &'static str, value: &str) {
        let allowed = [SlotCapability::Link, SlotCapability::Image];
        if let Some(state) = self.slot_for(slot, &allowed, "set_attribute") {
            state.attributes.insert(name, value.to_string());
        }
    }

    fn clear_items(&mut self, slot: SlotName) {
        if let Some(state) = self.slot_for(slot, &[SlotCapability::List], "clear_items") {
            state.items.clear();
        }
    }

    fn append_item(&mut self, slot: SlotName, item: SlotItem) {
        if let Some(state) = self.slot_for(slot, &[SlotCapability::List], "append_item") {
            state.items.push(item);
        }
    }

    fn set_theme(&mut self, var: ThemeVar, value: &str) {
        self.theme.insert(var, value.to_string());
    }
}

/// The page shared between request handlers and background animation tasks.
pub type SharedPage = Arc<Mutex<PageDocument>>;

/// Locks the shared page. Never hold the guard across an `.await`.
pub fn lock_page(page: &SharedPage) -> MutexGuard<'_, PageDocument> {
    page.lock().unwrap_or_else(|e| e.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_slot_has_unique_id() {
        let mut ids: Vec<&str> = SlotName::ALL.iter().map(|s| s.id()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), SlotName::ALL.len());
    }

    #[test]
    fn test_new_page_has_all_slots_visible_and_default_theme() {
        let page = PageDocument::default();
        for name in SlotName::ALL {
            assert!(page.slot(name).visible);
        }
        assert_eq!(page.theme(ThemeVar::Primary), DEFAULT_PRIMARY);
        assert_eq!(page.theme(ThemeVar::PrimaryDark), DEFAULT_PRIMARY_DARK);
    }

    #[test]
    fn test_text_write_to_list_slot_is_ignored() {
        let mut page = PageDocument::default();
        page.set_text(SlotName::SkillsGrid, "<b>nope</b>");
        assert_eq!(page.slot(SlotName::SkillsGrid).text, "");
    }

    #[test]
    fn test_attribute_write_to_text_slot_is_ignored() {
        let mut page = PageDocument::default();
        page.set_attribute(SlotName::Bio, "href", "https://example.com");
        assert!(page.slot(SlotName::Bio).attributes.is_empty());

        page.set_attribute(SlotName::FooterGithub, "href", "https://github.com/ada");
        assert_eq!(
            page.slot(SlotName::FooterGithub).attributes.get("href").map(String::as_str),
            Some("https://github.com/ada")
        );
    }

    #[test]
    fn test_list_items_clear_and_append() {
        let mut page = PageDocument::default();
        page.append_item(SlotName::SkillsGrid, SlotItem::SkillTag { name: "Go".into() });
        page.append_item(SlotName::SkillsGrid, SlotItem::SkillTag { name: "Rust".into() });
        assert_eq!(page.slot(SlotName::SkillsGrid).items.len(), 2);
        page.clear_items(SlotName::SkillsGrid);
        assert!(page.slot(SlotName::SkillsGrid).items.is_empty());
    }

    #[test]
    fn test_item_serializes_with_kind_tag() {
        let json = serde_json::to_value(SlotItem::SkillTag { name: "Go".into() }).unwrap();
        assert_eq!(json["kind"], "skill_tag");
        assert_eq!(json["name"], "Go");
    }
}
