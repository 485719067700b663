// Document layout: Times metric tables, greedy line wrapping and A4 pagination
// of the portfolio record. Pure functions; the PDF writer lives in `export`.

pub mod document;
pub mod font_metrics;

pub use document::{document_filename, layout_record, DocumentLayout, LayoutItem};
