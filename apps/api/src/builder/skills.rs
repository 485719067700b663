use serde::Serialize;

use crate::errors::AppError;
use crate::models::skills::{is_catalog_skill, SKILL_CATALOG};

/// The builder's selected skills, in the order they were picked. Never holds duplicates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillSelection {
    selected: Vec<String>,
}

/// One catalog category with per-skill selection flags, for the builder UI.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryView {
    pub name: &'static str,
    pub skills: Vec<SkillChip>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SkillChip {
    pub name: &'static str,
    pub selected: bool,
}

impl SkillSelection {
    /// Restores a selection from a saved record, dropping repeats.
    pub fn from_saved(skills: &[String]) -> Self {
        let mut selection = SkillSelection::default();
        for skill in skills {
            if !selection.contains(skill) {
                selection.selected.push(skill.clone());
            }
        }
        selection
    }

    /// Flips one catalog skill. Returns whether it is selected afterwards.
    pub fn toggle(&mut self, skill: &str) -> Result<bool, AppError> {
        if !is_catalog_skill(skill) {
            return Err(AppError::Validation(format!("Unknown skill '{skill}'")));
        }
        if let Some(pos) = self.selected.iter().position(|s| s == skill) {
            self.selected.remove(pos);
            Ok(false)
        } else {
            self.selected.push(skill.to_string());
            Ok(true)
        }
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.selected.iter().any(|s| s == skill)
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.selected.clone()
    }

    pub fn catalog_view(&self) -> Vec<CategoryView> {
        SKILL_CATALOG
            .iter()
            .map(|category| CategoryView {
                name: category.name,
                skills: category
                    .skills
                    .iter()
                    .map(|&name| SkillChip {
                        name,
                        selected: self.contains(name),
                    })
                    .collect(),
            })
            .collect()
    }
}
