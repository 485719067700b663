//! Step navigation over the builder's ordered form pages.
//!
//! The index is always within `[0, STEPS.len() - 1]`: `next` past the last page
//! and `previous` before the first are no-ops rather than out-of-range moves.

use serde::Serialize;

use crate::builder::form::{FormField, PortfolioForm};
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct StepSpec {
    pub id: &'static str,
    pub title: &'static str,
    pub fields: &'static [FormField],
    pub required: &'static [FormField],
}

pub static STEPS: &[StepSpec] = &[
    StepSpec {
        id: "identity",
        title: "Who are you?",
        fields: &[FormField::Name, FormField::Roles, FormField::Bio, FormField::PrimaryColor],
        required: &[FormField::Name],
    },
    StepSpec {
        id: "skills",
        title: "Pick your skills",
        fields: &[],
        required: &[],
    },
    StepSpec {
        id: "impact",
        title: "Impact & innovation",
        fields: &[FormField::Problem, FormField::SolutionName, FormField::Solution],
        required: &[],
    },
    StepSpec {
        id: "projects",
        title: "Featured projects",
        fields: &[FormField::P1Title, FormField::P2Title, FormField::P3Title],
        required: &[],
    },
    StepSpec {
        id: "socials",
        title: "Where can people find you?",
        fields: &[FormField::Linkedin, FormField::Twitter, FormField::Github],
        required: &[],
    },
];

/// The two pages whose visibility flips on a move. `from == to` when the move was clamped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StepChange {
    pub from: usize,
    pub to: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Wizard {
    current: usize,
}

impl Wizard {
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn last_index() -> usize {
        STEPS.len() - 1
    }

    pub fn current_step(&self) -> &'static StepSpec {
        &STEPS[self.current]
    }

    /// Required fields of the current page that are empty after trimming.
    pub fn missing_fields(&self, form: &PortfolioForm) -> Vec<FormField> {
        self.current_step()
            .required
            .iter()
            .copied()
            .filter(|&field| !form.is_filled(field))
            .collect()
    }

    /// Fails with the missing field keys when the current page is incomplete.
    pub fn validate_current(&self, form: &PortfolioForm) -> Result<(), AppError> {
        let missing = self.missing_fields(form);
        if missing.is_empty() {
            return Ok(());
        }
        let keys: Vec<&str> = missing.iter().map(|f| f.key()).collect();
        Err(AppError::Validation(format!(
            "Required fields are empty: {}",
            keys.join(", ")
        )))
    }

    pub fn next(&mut self, form: &PortfolioForm) -> Result<StepChange, AppError> {
        self.validate_current(form)?;
        let from = self.current;
        self.current = (self.current + 1).min(Self::last_index());
        Ok(StepChange {
            from,
            to: self.current,
        })
    }

    pub fn previous(&mut self) -> StepChange {
        let from = self.current;
        self.current = self.current.saturating_sub(1);
        StepChange {
            from,
            to: self.current,
        }
    }

    pub fn reset(&mut self) {
        self.current = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_form() -> PortfolioForm {
        PortfolioForm {
            name: Some("Ada".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_next_requires_name_on_first_page() {
        let mut wizard = Wizard::default();
        let blank = PortfolioForm {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        let err = wizard.next(&blank).unwrap_err();
        assert!(err.to_string().contains("name"));
        assert_eq!(wizard.current(), 0);

        assert_eq!(wizard.next(&named_form()).unwrap(), StepChange { from: 0, to: 1 });
    }

    #[test]
    fn test_next_is_clamped_at_last_page() {
        let mut wizard = Wizard::default();
        for _ in 0..(STEPS.len() + 3) {
            wizard.next(&named_form()).unwrap();
        }
        assert_eq!(wizard.current(), Wizard::last_index());
        let change = wizard.next(&named_form()).unwrap();
        assert_eq!(change.from, change.to);
    }

    #[test]
    fn test_previous_is_clamped_at_first_page() {
        let mut wizard = Wizard::default();
        assert_eq!(wizard.previous(), StepChange { from: 0, to: 0 });

        wizard.next(&named_form()).unwrap();
        wizard.next(&named_form()).unwrap();
        assert_eq!(wizard.previous(), StepChange { from: 2, to: 1 });
        assert_eq!(wizard.current(), 1);
    }

    #[test]
    fn test_previous_does_not_validate() {
        let mut wizard = Wizard::default();
        wizard.next(&named_form()).unwrap();
        // Going back never looks at the form.
        wizard.previous();
        assert_eq!(wizard.current(), 0);
    }

    #[test]
    fn test_reset_returns_to_first_page() {
        let mut wizard = Wizard::default();
        wizard.next(&named_form()).unwrap();
        wizard.next(&named_form()).unwrap();
        wizard.reset();
        assert_eq!(wizard.current(), 0);
        assert_eq!(wizard.current_step().id, "identity");
    }
}
