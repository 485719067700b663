use serde::Serialize;

/// A named group of selectable skills shown in the builder.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct SkillCategory {
    pub name: &'static str,
    pub skills: &'static [&'static str],
}

/// The fixed catalog the skill selector offers, in display order.
pub static SKILL_CATALOG: &[SkillCategory] = &[
    SkillCategory {
        name: "Languages",
        skills: &["JavaScript", "Python", "Java", "C++", "TypeScript", "Go"],
    },
    SkillCategory {
        name: "Frontend",
        skills: &["React", "Vue", "Next.js", "Tailwind CSS", "Sass", "Redux"],
    },
    SkillCategory {
        name: "Backend",
        skills: &["Node.js", "Express", "Django", "FastAPI", "Postgres", "MongoDB"],
    },
    SkillCategory {
        name: "Tools",
        skills: &["Docker", "Git", "AWS", "Figma", "Firebase", "Linux"],
    },
];

/// Returns true if the skill appears in any catalog category (exact match).
pub fn is_catalog_skill(skill: &str) -> bool {
    SKILL_CATALOG
        .iter()
        .any(|category| category.skills.contains(&skill))
}
