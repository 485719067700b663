use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::errors::AppError;

/// A profile picture carried as a `data:image/...;base64,...` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileImage(String);

impl ProfileImage {
    /// Accepts a data URL whose media type is an image and whose payload decodes.
    pub fn parse(data_url: &str) -> Result<Self, AppError> {
        let data_url = data_url.trim();
        let rest = data_url
            .strip_prefix("data:")
            .ok_or_else(|| invalid("expected a data: URL"))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| invalid("missing payload separator"))?;
        let media_type = header
            .strip_suffix(";base64")
            .ok_or_else(|| invalid("payload must be base64-encoded"))?;
        if !media_type.starts_with("image/") {
            return Err(invalid(&format!("unsupported media type '{media_type}'")));
        }

        let bytes = STANDARD
            .decode(payload)
            .map_err(|e| invalid(&format!("payload is not valid base64: {e}")))?;
        if bytes.is_empty() {
            return Err(invalid("image is empty"));
        }

        Ok(ProfileImage(data_url.to_string()))
    }

    /// Wraps a URL read back from a saved record; it was validated when first chosen.
    pub fn from_saved(data_url: String) -> Self {
        ProfileImage(data_url)
    }

    pub fn as_data_url(&self) -> &str {
        &self.0
    }
}

fn invalid(reason: &str) -> AppError {
    AppError::Validation(format!("Invalid profile image: {reason}"))
}
