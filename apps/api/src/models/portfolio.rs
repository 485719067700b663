use serde::{Deserialize, Serialize};

/// Schema version written with every saved record.
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// Maximum number of projects a record carries (the form has three project slots).
pub const MAX_PROJECTS: usize = 3;

/// The single persisted entity: everything the builder collected about one person.
///
/// Field names serialize in camelCase so the stored blob stays readable by the
/// page scripts and matches what the raw JSON export hands back to the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioRecord {
    #[serde(default)]
    pub schema_version: u32,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub problem: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub twitter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub desc: String,
    #[serde(default)]
    pub tech: Vec<String>,
}

/// A social profile link shown in the page footer and the document header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SocialNetwork {
    LinkedIn,
    GitHub,
    Twitter,
}

impl SocialNetwork {
    /// Header order used by the document export.
    pub const ALL: [SocialNetwork; 3] = [
        SocialNetwork::LinkedIn,
        SocialNetwork::GitHub,
        SocialNetwork::Twitter,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SocialNetwork::LinkedIn => "LinkedIn",
            SocialNetwork::GitHub => "GitHub",
            SocialNetwork::Twitter => "Twitter",
        }
    }
}

impl PortfolioRecord {
    /// Returns the URL for a social network. Blank values and anything that is not
    /// an `http(s)` link count as absent.
    pub fn social_url(&self, network: SocialNetwork) -> Option<&str> {
        let url = match network {
            SocialNetwork::LinkedIn => self.linkedin.as_deref(),
            SocialNetwork::GitHub => self.github.as_deref(),
            SocialNetwork::Twitter => self.twitter.as_deref(),
        };
        url.map(str::trim).filter(|u| is_web_url(u))
    }

    pub fn project_titles(&self) -> Vec<&str> {
        self.projects.iter().map(|p| p.title.as_str()).collect()
    }
}

fn is_web_url(url: &str) -> bool {
    let lowered = url.to_ascii_lowercase();
    ["http://", "https://"]
        .iter()
        .any(|scheme| lowered.len() > scheme.len() && lowered.starts_with(scheme))
}
