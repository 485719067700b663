//! PDF writer: turns a `DocumentLayout` into a PDF 1.5 file with `lopdf`.
//!
//! Text uses the three standard Times Type 1 fonts with WinAnsiEncoding, so no
//! font data is embedded. Characters outside Latin-1 are written as `?`.

use bytes::Bytes;
use chrono::Local;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream, StringFormat};
use tracing::info;

use crate::errors::AppError;
use crate::export::json::NO_DATA_MESSAGE;
use crate::export::ExportFile;
use crate::layout::document::{PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use crate::layout::font_metrics::{FontStyle, MM_PER_PT};
use crate::layout::{document_filename, layout_record, DocumentLayout, LayoutItem};
use crate::render::theme::Rgb;
use crate::store::{load_record, PortfolioStore};

/// Lays out and writes the résumé for the stored record.
///
/// Fails with `NotFound` before anything is generated when there is no record
/// or the record has no name.
pub async fn export_pdf(store: &dyn PortfolioStore) -> Result<ExportFile, AppError> {
    let record = load_record(store)
        .await?
        .filter(|r| !r.name.trim().is_empty())
        .ok_or_else(|| {
            AppError::NotFound(format!(
                "{NO_DATA_MESSAGE} Please generate your portfolio first."
            ))
        })?;

    let date = Local::now().format("%-m/%-d/%Y").to_string();
    let layout = layout_record(&record, &date);
    let stats = layout.stats();

    let bytes = tokio::task::spawn_blocking(move || write_pdf(&layout))
        .await
        .map_err(|e| AppError::Export(format!("pdf task: {e}")))??;

    info!(
        "Generated resume for '{}': {} pages, {} lines, {} bytes",
        record.name,
        stats.pages,
        stats.lines,
        bytes.len()
    );
    Ok(ExportFile {
        filename: document_filename(&record.name),
        content_type: "application/pdf",
        bytes: Bytes::from(bytes),
    })
}

/// Encodes the layout. Every page shares one resource dictionary with the three fonts.
pub fn write_pdf(layout: &DocumentLayout) -> Result<Vec<u8>, AppError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for style in FontStyle::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => style.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(style.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! { "Font" => fonts });

    let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for page in &layout.pages {
        let content = Content {
            operations: page_operations(&page.items),
        };
        let encoded = content
            .encode()
            .map_err(|e| AppError::Export(format!("encode page content: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id: ObjectId = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(page_count),
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Real(mm_to_pt(PAGE_WIDTH_MM)),
                Object::Real(mm_to_pt(PAGE_HEIGHT_MM)),
            ],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| AppError::Export(format!("write pdf: {e}")))?;
    Ok(buf)
}

// ────────────────────────────────────────────────────────────────────────────
// Content stream helpers
// ────────────────────────────────────────────────────────────────────────────

fn page_operations(items: &[LayoutItem]) -> Vec<Operation> {
    let mut ops = Vec::new();
    for item in items {
        match item {
            LayoutItem::Text { x, y, style, text } => {
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![style.font.resource_name().into(), Object::Real(style.size_pt)],
                ));
                ops.push(Operation::new("rg", color_operands(style.color)));
                ops.push(Operation::new(
                    "Td",
                    vec![Object::Real(mm_to_pt(*x)), Object::Real(flip_y(*y))],
                ));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::String(win_ansi(text), StringFormat::Literal)],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            LayoutItem::Rule { x1, x2, y, width } => {
                ops.push(Operation::new("w", vec![Object::Real(mm_to_pt(*width))]));
                ops.push(Operation::new("RG", color_operands(Rgb::new(0, 0, 0))));
                ops.push(Operation::new(
                    "m",
                    vec![Object::Real(mm_to_pt(*x1)), Object::Real(flip_y(*y))],
                ));
                ops.push(Operation::new(
                    "l",
                    vec![Object::Real(mm_to_pt(*x2)), Object::Real(flip_y(*y))],
                ));
                ops.push(Operation::new("S", vec![]));
            }
        }
    }
    ops
}

fn mm_to_pt(mm: f32) -> f32 {
    mm / MM_PER_PT
}

/// Layout y runs down from the top edge; PDF y runs up from the bottom edge.
fn flip_y(y_mm: f32) -> f32 {
    mm_to_pt(PAGE_HEIGHT_MM - y_mm)
}

fn color_operands(color: Rgb) -> Vec<Object> {
    [color.r, color.g, color.b]
        .into_iter()
        .map(|c| Object::Real(f32::from(c) / 255.0))
        .collect()
}

fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::portfolio::{PortfolioRecord, Project};
    use crate::store::memory::MemoryStore;
    use crate::store::save_record;

    fn page_strings(doc: &Document) -> Vec<Vec<String>> {
        doc.get_pages()
            .values()
            .map(|&page_id| {
                let raw = doc.get_page_content(page_id).unwrap();
                Content::decode(&raw)
                    .unwrap()
                    .operations
                    .into_iter()
                    .filter(|op| op.operator == "Tj")
                    .filter_map(|op| match op.operands.first() {
                        Some(Object::String(bytes, _)) => {
                            Some(bytes.iter().map(|&b| char::from(b)).collect())
                        }
                        _ => None,
                    })
                    .collect()
            })
            .collect()
    }

    fn long_record() -> PortfolioRecord {
        let para = "Led the migration of a monolith into independently deployable services, \
                    cutting release time from weeks to hours across twelve teams. "
            .repeat(6);
        let project = |title: &str| Project {
            title: title.to_string(),
            desc: para.clone(),
            tech: vec!["Rust".to_string()],
        };
        PortfolioRecord {
            name: "Ada Lovelace".to_string(),
            bio: Some(para.clone()),
            problem: Some(para.clone()),
            solution: Some(para.clone()),
            projects: vec![project("One"), project("Two"), project("Three")],
            ..Default::default()
        }
    }

    #[test]
    fn test_written_pdf_has_text_and_pages() {
        let layout = layout_record(&long_record(), "1/2/2026");
        let bytes = write_pdf(&layout).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), layout.pages.len());
        assert!(layout.pages.len() >= 2);

        let pages = page_strings(&doc);
        assert_eq!(pages[0][0], "Ada Lovelace");
        assert!(pages
            .last()
            .unwrap()
            .contains(&"Generated via Portfolio Builder | 1/2/2026".to_string()));
    }

    #[test]
    fn test_non_latin_text_is_replaced() {
        assert_eq!(win_ansi("Zoë 李"), b"Zo\xeb ?".to_vec());
    }

    #[test]
    fn test_coordinates_flip_to_pdf_space() {
        assert!((flip_y(PAGE_HEIGHT_MM) - 0.0).abs() < 1e-3);
        assert!((mm_to_pt(25.4) - 72.0).abs() < 1e-3);
    }

    #[tokio::test]
    async fn test_export_without_record_is_not_found() {
        let err = export_pdf(&MemoryStore::default()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_export_with_blank_name_is_not_found() {
        let store = MemoryStore::default();
        save_record(&store, &PortfolioRecord::default()).await.unwrap();
        assert!(matches!(
            export_pdf(&store).await.unwrap_err(),
            AppError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn test_export_names_file_after_person() {
        let store = MemoryStore::default();
        save_record(&store, &long_record()).await.unwrap();
        let file = export_pdf(&store).await.unwrap();
        assert_eq!(file.filename, "Ada-Lovelace-Resume.pdf");
        assert_eq!(file.content_type, "application/pdf");
        assert!(file.bytes.starts_with(b"%PDF"));
    }
}
