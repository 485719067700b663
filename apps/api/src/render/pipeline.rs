//! Rendering Pipeline: maps a `PortfolioRecord` onto the page slots.
//!
//! `render_slots` is the deterministic part: every slot it owns is fully
//! overwritten on each call, so rendering the same record twice leaves the page
//! unchanged and lists never accumulate entries. `Renderer` adds the side
//! effects around it (typing restart, chat context).

use tracing::debug;

use crate::chat::ChatContext;
use crate::models::portfolio::{PortfolioRecord, SocialNetwork};
use crate::render::slots::{lock_page, SharedPage, SlotItem, SlotName, SlotSink};
use crate::render::theme::apply_theme;
use crate::render::typing::TypingDriver;

/// Writes every record-owned slot. Text is assigned as plain text only.
pub fn render_slots(record: &PortfolioRecord, sink: &mut impl SlotSink) {
    sink.set_text(SlotName::LogoName, &record.name);
    sink.set_text(SlotName::HeroName, &format!("{}'s", record.name));
    sink.set_text(SlotName::Bio, record.bio.as_deref().unwrap_or_default());
    sink.set_text(SlotName::Problem, record.problem.as_deref().unwrap_or_default());
    sink.set_text(
        SlotName::SolutionName,
        record.solution_name.as_deref().unwrap_or_default(),
    );
    sink.set_text(
        SlotName::SolutionDesc,
        record.solution.as_deref().unwrap_or_default(),
    );

    sink.clear_items(SlotName::SkillsGrid);
    for skill in &record.skills {
        sink.append_item(SlotName::SkillsGrid, SlotItem::SkillTag { name: skill.clone() });
    }

    match record.profile_image.as_deref().filter(|src| !src.is_empty()) {
        Some(src) => {
            sink.set_attribute(SlotName::ProfileImage, "src", src);
            sink.set_attribute(SlotName::ProfileImage, "alt", "Profile");
            sink.set_visible(SlotName::ProfileImage, true);
        }
        None => {
            sink.set_attribute(SlotName::ProfileImage, "src", "");
            sink.set_visible(SlotName::ProfileImage, false);
        }
    }

    for network in SocialNetwork::ALL {
        let slot = social_slot(network);
        match record.social_url(network) {
            Some(url) => {
                sink.set_attribute(slot, "href", url);
                sink.set_visible(slot, true);
            }
            None => {
                sink.set_attribute(slot, "href", "#");
                sink.set_visible(slot, false);
            }
        }
    }

    sink.clear_items(SlotName::ProjectsGrid);
    for project in &record.projects {
        sink.append_item(
            SlotName::ProjectsGrid,
            SlotItem::ProjectCard {
                title: project.title.clone(),
                desc: project.desc.clone(),
                tech: project.tech.clone(),
            },
        );
    }

    apply_theme(record.primary_color.as_deref(), sink);
}

fn social_slot(network: SocialNetwork) -> SlotName {
    match network {
        SocialNetwork::LinkedIn => SlotName::FooterLinkedin,
        SocialNetwork::GitHub => SlotName::FooterGithub,
        SocialNetwork::Twitter => SlotName::FooterTwitter,
    }
}

/// Renders records into the shared page and keeps its collaborators in step.
#[derive(Clone)]
pub struct Renderer {
    page: SharedPage,
    typing: TypingDriver,
    context: ChatContext,
}

impl Renderer {
    pub fn new(page: SharedPage, typing: TypingDriver, context: ChatContext) -> Self {
        Renderer {
            page,
            typing,
            context,
        }
    }

    pub fn page(&self) -> &SharedPage {
        &self.page
    }

    /// Overwrites the page, restarts the typing display and publishes the chat context.
    pub fn render(&self, record: &PortfolioRecord) {
        render_slots(record, &mut *lock_page(&self.page));
        self.typing.restart(&record.roles);
        self.context.set(record.clone());
        debug!("Rendered portfolio for '{}'", record.name);
    }
}
