use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

const DELIMITER: &str = ";base64,";

/// Longest extension accepted from a mime prefix, in bytes
pub const MAX_EXTENSION_LEN: usize = 32;

#[derive(Debug, Error, PartialEq)]
pub enum DataUriError {
    #[error("missing ';base64,' delimiter")]
    MissingDelimiter,

    #[error("cannot derive a file extension from '{0}'")]
    MissingExtension(String),

    #[error("extension '{0}' is longer than {max} bytes", max = MAX_EXTENSION_LEN)]
    ExtensionTooLong(String),

    #[error("payload is not valid base64: {0}")]
    InvalidBase64(String),
}

/// A decoded `<mime>;base64,<payload>` string
#[derive(Debug, Clone, PartialEq)]
pub struct DataUri {
    /// Everything before the delimiter, e.g. `data:image/png`
    pub mime: String,
    /// Text after the last `/` of the mime prefix
    pub extension: String,
    pub bytes: Vec<u8>,
}

impl DataUri {
    pub fn parse(input: &str) -> Result<Self, DataUriError> {
        let (mime, payload) = input
            .split_once(DELIMITER)
            .ok_or(DataUriError::MissingDelimiter)?;

        let extension = mime.rsplit('/').next().unwrap_or_default().trim();
        if extension.is_empty() {
            return Err(DataUriError::MissingExtension(mime.to_string()));
        }
        if extension.len() > MAX_EXTENSION_LEN {
            return Err(DataUriError::ExtensionTooLong(extension.to_string()));
        }

        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| DataUriError::InvalidBase64(e.to_string()))?;

        Ok(Self {
            mime: mime.to_string(),
            extension: extension.to_string(),
            bytes,
        })
    }
}
