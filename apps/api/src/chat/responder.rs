//! Chat Responder: pluggable, trait-based replies about the current portfolio.
//!
//! Default: `KeywordResponder` (ordered keyword rules, first match wins, no
//! network). `AppState` holds an `Arc<dyn Responder>` so a different backend
//! can be swapped in without touching the handler.

use async_trait::async_trait;
use tracing::debug;

use crate::errors::AppError;
use crate::models::portfolio::PortfolioRecord;

/// Used in replies when the record has no name.
pub const FALLBACK_NAME: &str = "the portfolio owner";

#[async_trait]
pub trait Responder: Send + Sync {
    /// Classifies `message` and produces the reply text.
    async fn respond(&self, message: &str, record: &PortfolioRecord) -> Result<String, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordResponder
// ────────────────────────────────────────────────────────────────────────────

/// One (predicate, reply builder) pair.
pub struct Rule {
    pub name: &'static str,
    /// Any of these, as a case-insensitive substring of the message.
    pub keywords: &'static [&'static str],
    /// Extra condition on the record. A message claimed by a rule whose condition
    /// fails gets the fallback reply; later rules are not consulted.
    pub applies: fn(&PortfolioRecord) -> bool,
    pub reply: fn(&str, &PortfolioRecord) -> String,
}

impl Rule {
    fn claims(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|k| lowered.contains(k))
    }
}

pub struct KeywordResponder {
    rules: Vec<Rule>,
}

impl Default for KeywordResponder {
    fn default() -> Self {
        KeywordResponder {
            rules: default_rules(),
        }
    }
}

impl KeywordResponder {
    /// Name of the rule that answers, `None` for the fallback reply.
    pub fn classify(&self, message: &str, record: &PortfolioRecord) -> Option<&'static str> {
        self.select(message, record).map(|rule| rule.name)
    }

    pub fn reply(&self, message: &str, record: &PortfolioRecord) -> String {
        let name = display_name(record);
        match self.select(message, record) {
            Some(rule) => (rule.reply)(name, record),
            None => fallback_reply(name),
        }
    }

    /// First rule whose keywords appear in the message, if its condition holds.
    fn select(&self, message: &str, record: &PortfolioRecord) -> Option<&Rule> {
        let lowered = message.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.claims(&lowered))
            .filter(|rule| (rule.applies)(record))
    }
}

#[async_trait]
impl Responder for KeywordResponder {
    async fn respond(&self, message: &str, record: &PortfolioRecord) -> Result<String, AppError> {
        debug!(
            "Chat message matched rule '{}'",
            self.classify(message, record).unwrap_or("fallback")
        );
        Ok(self.reply(message, record))
    }
}

fn display_name(record: &PortfolioRecord) -> &str {
    let name = record.name.trim();
    if name.is_empty() {
        FALLBACK_NAME
    } else {
        name
    }
}

fn always(_: &PortfolioRecord) -> bool {
    true
}

fn default_rules() -> Vec<Rule> {
    vec![
        Rule {
            name: "identity",
            keywords: &["name", "who are you"],
            applies: always,
            reply: |name, _| {
                format!(
                    "This is {name}'s Professional Portfolio Generator context! I'm the AI assistant here to support you."
                )
            },
        },
        Rule {
            name: "projects",
            keywords: &["project", "work"],
            applies: |record| !record.projects.is_empty(),
            reply: |name, record| {
                format!(
                    "You can explore {name}'s key projects like {}. Each one represents a unique challenge solved!",
                    record.project_titles().join(", ")
                )
            },
        },
        Rule {
            name: "skills",
            keywords: &["skill", "tech"],
            applies: always,
            reply: |name, record| {
                let list = if !record.skills.is_empty() {
                    record.skills.join(", ")
                } else if !record.roles.is_empty() {
                    record.roles.join(", ")
                } else {
                    "web development and design".to_string()
                };
                format!("{name} is proficient in technologies like {list}.")
            },
        },
        Rule {
            name: "greeting",
            keywords: &["hello", "hi"],
            applies: always,
            reply: |name, _| {
                format!(
                    "Hello! I'm {name}'s AI assistant. I can tell you about their projects, skills, or professional bio. What would you like to know?"
                )
            },
        },
        Rule {
            name: "contact",
            keywords: &["contact", "reach"],
            applies: always,
            reply: |name, _| {
                format!("You can reach out to {name} via the contact form at the bottom of the page!")
            },
        },
    ]
}

fn fallback_reply(name: &str) -> String {
    format!(
        "I'm here to help you learn more about {name}. You can ask me about their projects, expertise, or the Professional Portfolio Generator itself. What can I help you find?"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::portfolio::Project;

    fn record_with_projects(titles: &[&str]) -> PortfolioRecord {
        PortfolioRecord {
            name: "Ada".to_string(),
            projects: titles
                .iter()
                .map(|t| Project {
                    title: t.to_string(),
                    ..Default::default()
                })
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_project_question_lists_titles() {
        let responder = KeywordResponder::default();
        let record = record_with_projects(&["Engine", "Note G"]);
        let reply = responder.reply("Show me your PROJECTS", &record);
        assert!(reply.contains("Engine, Note G"), "{reply}");
        assert!(reply.contains("Ada's"));
    }

    #[test]
    fn test_project_question_without_projects_falls_back() {
        let responder = KeywordResponder::default();
        let record = record_with_projects(&[]);
        assert_eq!(responder.classify("Any projects?", &record), None);
        assert_eq!(responder.reply("Any projects?", &record), fallback_reply("Ada"));
    }

    #[test]
    fn test_project_question_without_projects_skips_later_rules() {
        let responder = KeywordResponder::default();
        let record = record_with_projects(&[]);
        // "this" contains "hi" and "tech" is a skills keyword.
        for message in ["Tell me about this project", "What tech projects?", "Show your work, hi"] {
            assert_eq!(responder.classify(message, &record), None, "{message}");
            assert_eq!(responder.reply(message, &record), fallback_reply("Ada"));
        }

        let with_projects = record_with_projects(&["Engine"]);
        assert_eq!(
            responder.classify("What tech projects?", &with_projects),
            Some("projects")
        );
    }

    #[test]
    fn test_first_match_wins() {
        let responder = KeywordResponder::default();
        let record = record_with_projects(&["Engine"]);
        // Mentions both "name" and "project": the identity rule comes first.
        assert_eq!(
            responder.classify("What is the name of your project?", &record),
            Some("identity")
        );
    }

    #[test]
    fn test_skills_prefer_skills_then_roles() {
        let responder = KeywordResponder::default();
        let mut record = record_with_projects(&[]);
        record.roles = vec!["Engineer".to_string()];
        assert!(responder.reply("tech stack?", &record).contains("Engineer"));

        record.skills = vec!["Go".to_string(), "Rust".to_string()];
        assert!(responder.reply("tech stack?", &record).contains("Go, Rust"));

        let empty = PortfolioRecord::default();
        assert!(responder
            .reply("skills?", &empty)
            .contains("web development and design"));
    }

    #[test]
    fn test_empty_record_uses_fallback_name() {
        let responder = KeywordResponder::default();
        let reply = responder.reply("hello", &PortfolioRecord::default());
        assert!(reply.contains(FALLBACK_NAME));
        assert_eq!(responder.classify("hello", &PortfolioRecord::default()), Some("greeting"));
    }

    #[test]
    fn test_contact_and_fallback() {
        let responder = KeywordResponder::default();
        let record = record_with_projects(&[]);
        assert_eq!(responder.classify("how can I reach you", &record), Some("contact"));
        assert_eq!(responder.classify("tell me a joke", &record), None);
    }

    #[tokio::test]
    async fn test_trait_object_responds() {
        let responder: Box<dyn Responder> = Box::new(KeywordResponder::default());
        let reply = responder
            .respond("who are you", &record_with_projects(&[]))
            .await
            .unwrap();
        assert!(reply.starts_with("This is Ada's"));
    }
}
