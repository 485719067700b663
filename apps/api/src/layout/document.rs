//! Document Layout: positions the record's text on fixed-size A4 pages.
//!
//! # Page model
//! All coordinates are millimetres from the top-left corner. A single vertical
//! cursor walks down the page; every wrapped body line advances it by
//! `LINE_HEIGHT_MM`, and each block adds a fixed spacing after its last line.
//! Before any line is placed, a cursor past `PAGE_BREAK_Y_MM` starts a new page
//! with the cursor at `CONTINUATION_Y_MM`, so text never runs off the bottom.
//!
//! The result is a plain list of positioned items; turning it into bytes is
//! the PDF writer's job.

use crate::layout::font_metrics::{get_metrics, FontStyle};
use crate::models::portfolio::{PortfolioRecord, SocialNetwork};
use crate::render::theme::Rgb;

// ────────────────────────────────────────────────────────────────────────────
// Geometry
// ────────────────────────────────────────────────────────────────────────────

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 20.0;
pub const CONTENT_WIDTH_MM: f32 = PAGE_WIDTH_MM - 2.0 * MARGIN_MM;
pub const START_Y_MM: f32 = 25.0;
pub const CONTINUATION_Y_MM: f32 = 20.0;
pub const PAGE_BREAK_Y_MM: f32 = 270.0;
pub const FOOTER_Y_MM: f32 = 285.0;
pub const LINE_HEIGHT_MM: f32 = 6.0;
pub const RULE_WIDTH_MM: f32 = 0.5;

const BODY_SIZE_PT: f32 = 11.0;
const BLACK: Rgb = Rgb::new(0, 0, 0);
const LINK_COLOR: Rgb = Rgb::new(56, 189, 248);
const FOOTER_GRAY: Rgb = Rgb::new(100, 100, 100);

pub const ROLES_SEPARATOR: &str = " | ";
pub const SOCIALS_SEPARATOR: &str = "  |  ";
pub const ROLES_FALLBACK: &str = "Professional";
pub const SOLUTION_FALLBACK: &str = "The Project";

// ────────────────────────────────────────────────────────────────────────────
// Layout types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font: FontStyle,
    pub size_pt: f32,
    pub color: Rgb,
}

impl TextStyle {
    const fn new(font: FontStyle, size_pt: f32) -> Self {
        TextStyle {
            font,
            size_pt,
            color: BLACK,
        }
    }

    const fn colored(self, color: Rgb) -> Self {
        TextStyle { color, ..self }
    }
}

const NAME: TextStyle = TextStyle::new(FontStyle::Bold, 26.0);
const ROLES: TextStyle = TextStyle::new(FontStyle::Italic, 12.0);
const SOCIALS: TextStyle = TextStyle::new(FontStyle::Regular, 10.0).colored(LINK_COLOR);
const SECTION: TextStyle = TextStyle::new(FontStyle::Bold, 14.0);
const BODY: TextStyle = TextStyle::new(FontStyle::Regular, BODY_SIZE_PT);
const BODY_BOLD: TextStyle = TextStyle::new(FontStyle::Bold, BODY_SIZE_PT);
const PROJECT_TITLE: TextStyle = TextStyle::new(FontStyle::Bold, 12.0);
const PROJECT_TECH: TextStyle = TextStyle::new(FontStyle::Italic, 10.0);
const FOOTER: TextStyle = TextStyle::new(FontStyle::Italic, 9.0).colored(FOOTER_GRAY);

#[derive(Debug, Clone, PartialEq)]
pub enum LayoutItem {
    /// One line of text with its baseline at `y`.
    Text {
        x: f32,
        y: f32,
        style: TextStyle,
        text: String,
    },
    /// Horizontal rule across the content width.
    Rule { x1: f32, x2: f32, y: f32, width: f32 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayoutPage {
    pub items: Vec<LayoutItem>,
}

impl LayoutPage {
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().filter_map(|item| match item {
            LayoutItem::Text { text, .. } => Some(text.as_str()),
            LayoutItem::Rule { .. } => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayout {
    pub pages: Vec<LayoutPage>,
}

/// Summary counts, logged by the export handler.
#[derive(Debug, Clone, Copy)]
pub struct LayoutStats {
    pub pages: usize,
    pub lines: usize,
}

impl DocumentLayout {
    pub fn stats(&self) -> LayoutStats {
        LayoutStats {
            pages: self.pages.len(),
            lines: self.pages.iter().map(|p| p.texts().count()).sum(),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Cursor
// ────────────────────────────────────────────────────────────────────────────

struct Cursor {
    pages: Vec<LayoutPage>,
    y: f32,
}

impl Cursor {
    fn new() -> Self {
        Cursor {
            pages: vec![LayoutPage::default()],
            y: START_Y_MM,
        }
    }

    fn break_if_needed(&mut self) {
        if self.y > PAGE_BREAK_Y_MM {
            self.pages.push(LayoutPage::default());
            self.y = CONTINUATION_Y_MM;
        }
    }

    fn push(&mut self, item: LayoutItem) {
        if let Some(page) = self.pages.last_mut() {
            page.items.push(item);
        }
    }

    /// Places one unwrapped line at the cursor without advancing it.
    fn line(&mut self, text: &str, style: TextStyle) {
        self.break_if_needed();
        let y = self.y;
        self.push(LayoutItem::Text {
            x: MARGIN_MM,
            y,
            style,
            text: text.to_string(),
        });
    }

    fn advance(&mut self, mm: f32) {
        self.y += mm;
    }

    /// Wraps `text` to the content width and places each line.
    ///
    /// Empty text still occupies one line height.
    fn paragraph(&mut self, text: &str, style: TextStyle, spacing_after: f32) {
        let lines = get_metrics(style.font).wrap(text, style.size_pt, CONTENT_WIDTH_MM);
        if lines.is_empty() {
            self.advance(LINE_HEIGHT_MM);
        }
        for line in &lines {
            self.line(line, style);
            self.advance(LINE_HEIGHT_MM);
        }
        self.advance(spacing_after);
    }

    fn section_header(&mut self, title: &str) {
        self.advance(10.0);
        self.line(&title.to_uppercase(), SECTION);
        self.advance(2.0);
        let y = self.y;
        self.push(LayoutItem::Rule {
            x1: MARGIN_MM,
            x2: PAGE_WIDTH_MM - MARGIN_MM,
            y,
            width: RULE_WIDTH_MM,
        });
        self.advance(7.0);
    }

    /// The footer goes on the last page at a fixed position, independent of the cursor.
    fn finish(mut self, footer: &str) -> DocumentLayout {
        self.push(LayoutItem::Text {
            x: MARGIN_MM,
            y: FOOTER_Y_MM,
            style: FOOTER,
            text: footer.to_string(),
        });
        DocumentLayout { pages: self.pages }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Record → layout
// ────────────────────────────────────────────────────────────────────────────

/// Lays out the résumé for `record`. `date` is printed in the footer as given.
///
/// Every section is emitted in a fixed order; absent fields leave their section empty.
pub fn layout_record(record: &PortfolioRecord, date: &str) -> DocumentLayout {
    let mut cursor = Cursor::new();

    // Header
    cursor.line(record.name.trim(), NAME);
    cursor.advance(10.0);

    let roles = if record.roles.is_empty() {
        ROLES_FALLBACK.to_string()
    } else {
        record.roles.join(ROLES_SEPARATOR)
    };
    cursor.line(&roles, ROLES);
    cursor.advance(6.0);

    let socials: Vec<String> = SocialNetwork::ALL
        .iter()
        .filter_map(|&network| {
            record
                .social_url(network)
                .map(|url| format!("{}: {url}", network.label()))
        })
        .collect();
    if !socials.is_empty() {
        cursor.line(&socials.join(SOCIALS_SEPARATOR), SOCIALS);
        cursor.advance(4.0);
    }

    cursor.section_header("Professional Summary");
    cursor.paragraph(text_or_empty(&record.bio), BODY, 5.0);

    cursor.section_header("Technical Skills");
    cursor.paragraph(&record.skills.join(", "), BODY, 5.0);

    cursor.section_header("Impact & Innovation");
    cursor.line("Problem Addressed:", BODY_BOLD);
    cursor.advance(6.0);
    cursor.paragraph(text_or_empty(&record.problem), BODY, 4.0);
    let solution_name = record
        .solution_name
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(SOLUTION_FALLBACK);
    cursor.line(&format!("Solution: {solution_name}"), BODY_BOLD);
    cursor.advance(6.0);
    cursor.paragraph(text_or_empty(&record.solution), BODY, 5.0);

    cursor.section_header("Featured Projects");
    for project in &record.projects {
        cursor.line(&project.title, PROJECT_TITLE);
        cursor.advance(6.0);
        if !project.tech.is_empty() {
            cursor.line(&format!("Technologies: {}", project.tech.join(", ")), PROJECT_TECH);
            cursor.advance(5.0);
        }
        cursor.paragraph(&project.desc, BODY, 8.0);
    }

    cursor.finish(&format!("Generated via Portfolio Builder | {date}"))
}

fn text_or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or_default()
}

/// `"Ada  King Lovelace"` → `"Ada-King-Lovelace-Resume.pdf"`.
pub fn document_filename(name: &str) -> String {
    let stem: Vec<&str> = name.split_whitespace().collect();
    format!("{}-Resume.pdf", stem.join("-"))
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
