//! Form Capture & Normalization: raw builder fields → `PortfolioRecord`.

use serde::{Deserialize, Serialize};

use crate::builder::image::ProfileImage;
use crate::builder::skills::SkillSelection;
use crate::models::portfolio::{PortfolioRecord, Project, CURRENT_SCHEMA_VERSION};

/// Name used when the form is submitted without one.
pub const PLACEHOLDER_NAME: &str = "Your Name";

/// Raw values of the builder form, exactly as the browser posts them.
///
/// Every field is optional; blank strings are treated the same as missing ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PortfolioForm {
    pub name: Option<String>,
    pub roles: Option<String>,
    pub bio: Option<String>,
    #[serde(rename = "primaryColor")]
    pub primary_color: Option<String>,
    pub problem: Option<String>,
    #[serde(rename = "solutionName")]
    pub solution_name: Option<String>,
    pub solution: Option<String>,
    pub p1_title: Option<String>,
    pub p1_desc: Option<String>,
    pub p1_tech: Option<String>,
    pub p2_title: Option<String>,
    pub p2_desc: Option<String>,
    pub p2_tech: Option<String>,
    pub p3_title: Option<String>,
    pub p3_desc: Option<String>,
    pub p3_tech: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub github: Option<String>,
}

/// Addressable form fields, used by step validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum FormField {
    Name,
    Roles,
    Bio,
    PrimaryColor,
    Problem,
    SolutionName,
    Solution,
    #[serde(rename = "p1_title")]
    P1Title,
    #[serde(rename = "p2_title")]
    P2Title,
    #[serde(rename = "p3_title")]
    P3Title,
    Linkedin,
    Twitter,
    Github,
}

impl FormField {
    /// The field's form key, as posted by the page.
    pub fn key(self) -> &'static str {
        match self {
            FormField::Name => "name",
            FormField::Roles => "roles",
            FormField::Bio => "bio",
            FormField::PrimaryColor => "primaryColor",
            FormField::Problem => "problem",
            FormField::SolutionName => "solutionName",
            FormField::Solution => "solution",
            FormField::P1Title => "p1_title",
            FormField::P2Title => "p2_title",
            FormField::P3Title => "p3_title",
            FormField::Linkedin => "linkedin",
            FormField::Twitter => "twitter",
            FormField::Github => "github",
        }
    }
}

impl PortfolioForm {
    pub fn value(&self, field: FormField) -> Option<&str> {
        let raw = match field {
            FormField::Name => &self.name,
            FormField::Roles => &self.roles,
            FormField::Bio => &self.bio,
            FormField::PrimaryColor => &self.primary_color,
            FormField::Problem => &self.problem,
            FormField::SolutionName => &self.solution_name,
            FormField::Solution => &self.solution,
            FormField::P1Title => &self.p1_title,
            FormField::P2Title => &self.p2_title,
            FormField::P3Title => &self.p3_title,
            FormField::Linkedin => &self.linkedin,
            FormField::Twitter => &self.twitter,
            FormField::Github => &self.github,
        };
        raw.as_deref()
    }

    /// True when the field holds something other than whitespace.
    pub fn is_filled(&self, field: FormField) -> bool {
        self.value(field).is_some_and(|v| !v.trim().is_empty())
    }

    fn project_slots(&self) -> [(&Option<String>, &Option<String>, &Option<String>); 3] {
        [
            (&self.p1_title, &self.p1_desc, &self.p1_tech),
            (&self.p2_title, &self.p2_desc, &self.p2_tech),
            (&self.p3_title, &self.p3_desc, &self.p3_tech),
        ]
    }
}

/// Splits a comma-delimited field: pieces trimmed, empty pieces dropped, order kept.
///
/// `"Go, Rust , , C++"` → `["Go", "Rust", "C++"]`.
pub fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(str::to_string)
        .collect()
}

fn optional_text(raw: &Option<String>) -> Option<String> {
    raw.as_ref().filter(|v| !v.trim().is_empty()).cloned()
}

fn optional_trimmed(raw: &Option<String>) -> Option<String> {
    raw.as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Builds the record to persist from the form, the current skill selection and the
/// image chosen in this session (or carried over from the previous save).
pub fn capture(
    form: &PortfolioForm,
    skills: &SkillSelection,
    image: Option<&ProfileImage>,
) -> PortfolioRecord {
    let projects = form
        .project_slots()
        .into_iter()
        .filter_map(|(title, desc, tech)| {
            let title = optional_trimmed(title)?;
            Some(Project {
                title,
                desc: desc.clone().unwrap_or_default(),
                tech: tech.as_deref().map(split_list).unwrap_or_default(),
            })
        })
        .collect();

    PortfolioRecord {
        schema_version: CURRENT_SCHEMA_VERSION,
        name: optional_trimmed(&form.name).unwrap_or_else(|| PLACEHOLDER_NAME.to_string()),
        profile_image: image.map(|i| i.as_data_url().to_string()),
        bio: optional_text(&form.bio),
        problem: optional_text(&form.problem),
        solution_name: optional_text(&form.solution_name),
        solution: optional_text(&form.solution),
        roles: form.roles.as_deref().map(split_list).unwrap_or_default(),
        skills: skills.to_vec(),
        projects,
        primary_color: optional_trimmed(&form.primary_color),
        linkedin: optional_trimmed(&form.linkedin),
        twitter: optional_trimmed(&form.twitter),
        github: optional_trimmed(&form.github),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::portfolio::MAX_PROJECTS;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_split_list_trims_and_drops_empties() {
        assert_eq!(split_list("Go, Rust , , C++"), vec!["Go", "Rust", "C++"]);
        assert_eq!(split_list(""), Vec::<String>::new());
        assert_eq!(split_list(" , ,"), Vec::<String>::new());
        assert_eq!(split_list("Go,Go"), vec!["Go", "Go"], "no de-duplication");
    }

    #[test]
    fn test_projects_without_title_are_dropped() {
        let form = PortfolioForm {
            name: some("Ada"),
            p1_title: some("  "),
            p1_desc: some("ignored"),
            p2_title: some(" Engine "),
            p2_tech: some("Rust, , Tokio"),
            p3_title: None,
            p3_desc: some("also ignored"),
            ..Default::default()
        };
        let record = capture(&form, &SkillSelection::default(), None);
        assert_eq!(record.projects.len(), 1);
        assert_eq!(record.projects[0].title, "Engine");
        assert_eq!(record.projects[0].desc, "");
        assert_eq!(record.projects[0].tech, vec!["Rust", "Tokio"]);
    }

    #[test]
    fn test_project_count_never_exceeds_max() {
        let form = PortfolioForm {
            p1_title: some("A"),
            p2_title: some("B"),
            p3_title: some("C"),
            ..Default::default()
        };
        let record = capture(&form, &SkillSelection::default(), None);
        assert_eq!(record.projects.len(), MAX_PROJECTS);
        assert!(record.projects.iter().all(|p| !p.title.trim().is_empty()));
    }

    #[test]
    fn test_missing_fields_become_none() {
        let form = PortfolioForm {
            bio: some("   "),
            linkedin: some(""),
            ..Default::default()
        };
        let record = capture(&form, &SkillSelection::default(), None);
        assert_eq!(record.name, PLACEHOLDER_NAME);
        assert_eq!(record.bio, None);
        assert_eq!(record.linkedin, None);
        assert!(record.roles.is_empty());
        assert!(record.projects.is_empty());
        assert_eq!(record.profile_image, None);
    }

    #[test]
    fn test_capture_carries_skills_roles_and_image() {
        let mut skills = SkillSelection::default();
        skills.toggle("Rust").unwrap_err(); // not in the catalog
        skills.toggle("Go").unwrap();
        skills.toggle("Docker").unwrap();
        let image = ProfileImage::parse("data:image/png;base64,iVBORw0KGgo=").unwrap();

        let form = PortfolioForm {
            name: some(" Ada "),
            roles: some("Engineer, Writer,"),
            bio: some("Line one\nLine two"),
            ..Default::default()
        };
        let record = capture(&form, &skills, Some(&image));
        assert_eq!(record.name, "Ada");
        assert_eq!(record.roles, vec!["Engineer", "Writer"]);
        assert_eq!(record.skills, vec!["Go", "Docker"]);
        assert_eq!(record.bio.as_deref(), Some("Line one\nLine two"));
        assert_eq!(
            record.profile_image.as_deref(),
            Some("data:image/png;base64,iVBORw0KGgo=")
        );
    }

    #[test]
    fn test_form_deserializes_page_field_names() {
        let form: PortfolioForm = serde_json::from_str(
            r##"{"name":"Ada","solutionName":"Engine","primaryColor":"#ff0000","p2_title":"X"}"##,
        )
        .unwrap();
        assert!(form.is_filled(FormField::Name));
        assert_eq!(form.value(FormField::SolutionName), Some("Engine"));
        assert_eq!(form.value(FormField::PrimaryColor), Some("#ff0000"));
        assert!(form.is_filled(FormField::P2Title));
        assert!(!form.is_filled(FormField::P1Title));
    }
}
