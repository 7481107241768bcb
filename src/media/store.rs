use crate::core::error::{RareError, RareResult, StorageError};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::path::PathBuf;
use std::sync::{Arc, RwLock};

/// An image persisted by an [`ImageStore`]
#[derive(Debug, Clone, PartialEq)]
pub struct StoredImage {
    /// File name inside the media root
    pub name: String,
    /// Public URL stored on the post
    pub url: String,
}

/// Destination for decoded image bytes
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn store(&self, name: &str, bytes: Vec<u8>) -> RareResult<StoredImage>;
}

fn join_url(prefix: &str, name: &str) -> String {
    format!("{}{}", prefix, name)
}

/// Writes images as files under a media root directory
#[derive(Debug, Clone)]
pub struct FsImageStore {
    root: PathBuf,
    url_prefix: String,
}

impl FsImageStore {
    pub fn new(root: impl Into<PathBuf>, url_prefix: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            url_prefix: url_prefix.into(),
        }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }
}

#[async_trait]
impl ImageStore for FsImageStore {
    async fn store(&self, name: &str, bytes: Vec<u8>) -> RareResult<StoredImage> {
        let media_write = |e: std::io::Error| -> RareError {
            StorageError::MediaWrite {
                name: name.to_string(),
                message: e.to_string(),
            }
            .into()
        };

        tokio::fs::create_dir_all(&self.root).await.map_err(media_write)?;
        let path = self.root.join(name);
        tokio::fs::write(&path, &bytes).await.map_err(media_write)?;

        tracing::info!(path = %path.display(), size = bytes.len(), "wrote image");
        Ok(StoredImage {
            name: name.to_string(),
            url: join_url(&self.url_prefix, name),
        })
    }
}

/// Keeps images in memory, for tests
#[derive(Debug, Clone, Default)]
pub struct InMemoryImageStore {
    url_prefix: String,
    images: Arc<RwLock<IndexMap<String, Vec<u8>>>>,
}

impl InMemoryImageStore {
    pub fn new(url_prefix: impl Into<String>) -> Self {
        Self {
            url_prefix: url_prefix.into(),
            images: Arc::new(RwLock::new(IndexMap::new())),
        }
    }

    pub fn get(&self, name: &str) -> Option<Vec<u8>> {
        self.images.read().ok()?.get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.images
            .read()
            .map(|images| images.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.names().is_empty()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn store(&self, name: &str, bytes: Vec<u8>) -> RareResult<StoredImage> {
        let mut images = self.images.write().map_err(|e| StorageError::LockPoisoned {
            message: e.to_string(),
        })?;
        images.insert(name.to_string(), bytes);
        Ok(StoredImage {
            name: name.to_string(),
            url: join_url(&self.url_prefix, name),
        })
    }
}
