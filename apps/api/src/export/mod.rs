//! Export Pipeline: downloadable files built from the stored record.
//!
//! Both exports read the store directly, so they reflect what was saved even
//! before the page has been rendered in this process.

pub mod handlers;
pub mod json;
pub mod pdf;

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;

/// A finished file, sent as an attachment.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub filename: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

impl ExportFile {
    /// The filename as it can travel in a header: quotes and non-ASCII become `_`.
    fn header_filename(&self) -> String {
        self.filename
            .chars()
            .map(|c| {
                let keep = c == ' ' || (c.is_ascii_graphic() && c != '"' && c != '\\');
                if keep {
                    c
                } else {
                    '_'
                }
            })
            .collect()
    }
}

impl IntoResponse for ExportFile {
    fn into_response(self) -> Response {
        let disposition = format!("attachment; filename=\"{}\"", self.header_filename());
        (
            [
                (header::CONTENT_TYPE, self.content_type.to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            self.bytes,
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_attachment_headers() {
        let file = ExportFile {
            filename: "Zoë \"Z\"-Resume.pdf".to_string(),
            content_type: "application/pdf",
            bytes: Bytes::from_static(b"%PDF"),
        };
        let response = file.into_response();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"Zo_ _Z_-Resume.pdf\""
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"%PDF");
    }
}
