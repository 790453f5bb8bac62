use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::ContentError;

/// A decoded `data:image/...;base64,...` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// Everything before the comma, e.g. `data:image/png;base64`.
    pub format: String,
    pub data: Vec<u8>,
}

/// Splits a data URL into its format header and decoded bytes.
pub fn parse_data_url(value: &str) -> Result<DataUrl, ContentError> {
    let (format, payload) = value
        .trim()
        .split_once(',')
        .ok_or_else(|| ContentError::InvalidImage("expected a data URL".to_string()))?;

    if mime_type(format).is_none() {
        return Err(ContentError::InvalidImage(format!(
            "unsupported data URL header '{format}'"
        )));
    }

    let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(ContentError::EmptyField("image"));
    }
    let data = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| ContentError::InvalidImage(e.to_string()))?;

    Ok(DataUrl {
        format: format.to_string(),
        data,
    })
}

/// Extracts the MIME type from a data URL header.
///
/// `data:image/jpeg;base64` yields `image/jpeg`.
pub fn mime_type(image_format: &str) -> Option<&str> {
    let mime = image_format.strip_prefix("data:")?.strip_suffix(";base64")?;
    let subtype = mime.strip_prefix("image/")?;
    (!subtype.is_empty() && !subtype.contains([';', ',', '/'])).then_some(mime)
}
