//! Builder Session: every piece of mutable builder state as fields of one object.

use serde::Serialize;

use crate::builder::form::{capture, PortfolioForm};
use crate::builder::image::ProfileImage;
use crate::builder::skills::{CategoryView, SkillSelection};
use crate::builder::wizard::{StepChange, StepSpec, Wizard, STEPS};
use crate::errors::AppError;
use crate::models::portfolio::PortfolioRecord;

/// Visibility of the builder overlay that gates the rendered portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlayState {
    Visible,
    /// Submitted; hidden once the fade-out timer fires.
    FadingOut,
    Hidden,
}

#[derive(Debug, Clone)]
pub struct BuilderSession {
    wizard: Wizard,
    skills: SkillSelection,
    image: Option<ProfileImage>,
    overlay: OverlayState,
    /// Set once the session holds the stored record's state, by restore or by submit.
    seeded: bool,
}

impl Default for BuilderSession {
    fn default() -> Self {
        BuilderSession {
            wizard: Wizard::default(),
            skills: SkillSelection::default(),
            image: None,
            overlay: OverlayState::Visible,
            seeded: false,
        }
    }
}

/// Serializable view of the session for the builder UI.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub current_step: usize,
    pub steps: &'static [StepSpec],
    pub catalog: Vec<CategoryView>,
    pub selected_skills: Vec<String>,
    pub has_profile_image: bool,
    pub overlay: OverlayState,
}

impl BuilderSession {
    /// Seeds the session from a stored record: its skills and image are kept for the
    /// next edit and the overlay is hidden because there is something to show.
    ///
    /// Only the first call has an effect, so later page loads keep an open editor
    /// and unsubmitted picks. Returns whether the session was seeded.
    pub fn restore(&mut self, record: &PortfolioRecord) -> bool {
        if self.seeded {
            return false;
        }
        self.seeded = true;
        self.skills = SkillSelection::from_saved(&record.skills);
        if let Some(image) = record.profile_image.clone().filter(|i| !i.is_empty()) {
            self.image = Some(ProfileImage::from_saved(image));
        }
        self.overlay = OverlayState::Hidden;
        true
    }

    /// No stored record: the builder must be shown.
    pub fn require_builder(&mut self) {
        self.overlay = OverlayState::Visible;
    }

    pub fn toggle_skill(&mut self, skill: &str) -> Result<bool, AppError> {
        self.skills.toggle(skill)
    }

    /// Replaces the pending image. The previous one is kept until this is called.
    pub fn set_image(&mut self, data_url: &str) -> Result<(), AppError> {
        self.image = Some(ProfileImage::parse(data_url)?);
        Ok(())
    }

    pub fn next_step(&mut self, form: &PortfolioForm) -> Result<StepChange, AppError> {
        self.wizard.next(form)
    }

    pub fn previous_step(&mut self) -> StepChange {
        self.wizard.previous()
    }

    /// The "edit profile" action: back to the first page with the overlay shown.
    pub fn open_editor(&mut self) {
        self.wizard.reset();
        self.overlay = OverlayState::Visible;
    }

    /// Validates the current page and builds the record to persist.
    pub fn prepare_submission(&self, form: &PortfolioForm) -> Result<PortfolioRecord, AppError> {
        self.wizard.validate_current(form)?;
        Ok(capture(form, &self.skills, self.image.as_ref()))
    }

    pub fn begin_fade_out(&mut self) {
        self.seeded = true;
        self.overlay = OverlayState::FadingOut;
    }

    /// Completes a fade-out. A session that was reopened in the meantime stays visible.
    pub fn finish_fade_out(&mut self) -> bool {
        if self.overlay == OverlayState::FadingOut {
            self.overlay = OverlayState::Hidden;
            true
        } else {
            false
        }
    }

    pub fn overlay(&self) -> OverlayState {
        self.overlay
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            current_step: self.wizard.current(),
            steps: STEPS,
            catalog: self.skills.catalog_view(),
            selected_skills: self.skills.to_vec(),
            has_profile_image: self.image.is_some(),
            overlay: self.overlay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG: &str = "data:image/png;base64,iVBORw0KGgo=";

    fn named_form() -> PortfolioForm {
        PortfolioForm {
            name: Some("Ada".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_session_shows_builder() {
        let session = BuilderSession::default();
        let snapshot = session.snapshot();
        assert_eq!(snapshot.overlay, OverlayState::Visible);
        assert_eq!(snapshot.current_step, 0);
        assert_eq!(snapshot.steps.len(), STEPS.len());
        assert!(!snapshot.has_profile_image);
    }

    #[test]
    fn test_restore_carries_skills_and_image() {
        let record = PortfolioRecord {
            name: "Ada".to_string(),
            skills: vec!["Go".to_string(), "Git".to_string()],
            profile_image: Some(PNG.to_string()),
            ..Default::default()
        };
        let mut session = BuilderSession::default();
        assert!(session.restore(&record));

        assert_eq!(session.overlay(), OverlayState::Hidden);
        let resubmitted = session.prepare_submission(&named_form()).unwrap();
        assert_eq!(resubmitted.skills, vec!["Go", "Git"]);
        assert_eq!(resubmitted.profile_image.as_deref(), Some(PNG));
    }

    #[test]
    fn test_image_survives_until_replaced() {
        let mut session = BuilderSession::default();
        session.set_image(PNG).unwrap();
        assert!(session.set_image("not an image").is_err());

        let record = session.prepare_submission(&named_form()).unwrap();
        assert_eq!(record.profile_image.as_deref(), Some(PNG));
    }

    #[test]
    fn test_submission_validates_current_page() {
        let session = BuilderSession::default();
        assert!(session.prepare_submission(&PortfolioForm::default()).is_err());
    }

    #[test]
    fn test_fade_out_is_cancelled_by_editor() {
        let mut session = BuilderSession::default();
        session.begin_fade_out();
        session.open_editor();
        assert!(!session.finish_fade_out());
        assert_eq!(session.overlay(), OverlayState::Visible);

        session.begin_fade_out();
        assert!(session.finish_fade_out());
        assert_eq!(session.overlay(), OverlayState::Hidden);
    }

    #[test]
    fn test_open_editor_resets_step() {
        let mut session = BuilderSession::default();
        session.next_step(&named_form()).unwrap();
        session.next_step(&named_form()).unwrap();
        session.open_editor();
        assert_eq!(session.snapshot().current_step, 0);
        assert_eq!(session.previous_step().to, 0);
    }

    #[test]
    fn test_restore_happens_once() {
        let record = PortfolioRecord {
            name: "Ada".to_string(),
            skills: vec!["Go".to_string()],
            ..Default::default()
        };
        let mut session = BuilderSession::default();
        assert!(session.restore(&record));

        session.open_editor();
        session.toggle_skill("Docker").unwrap();
        assert!(!session.restore(&record));

        let snapshot = session.snapshot();
        assert_eq!(snapshot.overlay, OverlayState::Visible);
        assert_eq!(snapshot.selected_skills, vec!["Go", "Docker"]);
    }

    #[test]
    fn test_submitted_session_is_not_restored() {
        let mut session = BuilderSession::default();
        session.toggle_skill("Go").unwrap();
        session.begin_fade_out();
        assert!(session.finish_fade_out());

        assert!(!session.restore(&PortfolioRecord::default()));
        assert_eq!(session.snapshot().selected_skills, vec!["Go"]);
    }
}
