//! Image ingestion from base64 data URIs
//!
//! A data URI looks like `data:image/png;base64,iVBORw0KGgo...`. It is
//! parsed and fully decoded before anything reaches an [`ImageStore`], so a
//! malformed payload never leaves a partial file behind.

mod data_uri;
mod store;

pub use data_uri::{DataUri, DataUriError, MAX_EXTENSION_LEN};
pub use store::{FsImageStore, ImageStore, InMemoryImageStore, StoredImage};

use crate::core::error::{InputError, RareResult};
use uuid::Uuid;

impl From<DataUriError> for crate::core::RareError {
    fn from(err: DataUriError) -> Self {
        InputError::InvalidDataUri {
            message: err.to_string(),
        }
        .into()
    }
}

/// Longest file name most filesystems accept, in bytes
pub const MAX_FILE_NAME_LEN: usize = 255;

/// Bytes taken by `-{uuid}.` around the title and extension
const NAME_OVERHEAD: usize = 1 + 36 + 1;

/// Build the stored file name `{title}-{uuid}.{extension}`
///
/// Path separators in the title are replaced so the name stays inside the
/// media root. The title is cut at a char boundary so the whole name fits in
/// [`MAX_FILE_NAME_LEN`] bytes.
pub fn image_file_name(title: &str, extension: &str) -> String {
    let budget = MAX_FILE_NAME_LEN.saturating_sub(NAME_OVERHEAD + extension.len());
    let mut safe_title = String::with_capacity(budget.min(title.len()));
    for c in title.chars() {
        if safe_title.len() + c.len_utf8() > budget {
            break;
        }
        safe_title.push(if matches!(c, '/' | '\\') { '-' } else { c });
    }
    format!("{}-{}.{}", safe_title, Uuid::new_v4(), extension)
}

/// Decode a data URI and persist it under a generated name
pub async fn ingest_image(
    store: &dyn ImageStore,
    title: &str,
    data_uri: &str,
) -> RareResult<StoredImage> {
    let parsed = DataUri::parse(data_uri)?;
    let name = image_file_name(title, &parsed.extension);
    let stored = store.store(&name, parsed.bytes).await?;
    tracing::debug!(name = %stored.name, mime = %parsed.mime, "stored image");
    Ok(stored)
}
