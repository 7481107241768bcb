//! Posts: creation with image ingestion, tag reconciliation, moderation

pub mod handlers;
pub mod service;

pub use service::PostService;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A tag reference in a request body: either a bare id or `{"id": ...}`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TagRef {
    Id(Uuid),
    Object { id: Uuid },
}

impl TagRef {
    pub fn id(&self) -> Uuid {
        match self {
            TagRef::Id(id) | TagRef::Object { id } => *id,
        }
    }
}

impl From<Uuid> for TagRef {
    fn from(id: Uuid) -> Self {
        TagRef::Id(id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub publication_date: NaiveDate,
    /// Base64 data URI; the post has no image when omitted
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub approved: bool,
    pub category_id: Uuid,
    #[serde(default)]
    pub tags: Vec<TagRef>,
}

/// Full replacement of a post's editable fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePostRequest {
    pub title: String,
    pub content: String,
    pub category_id: Uuid,
    #[serde(default)]
    pub tags: Vec<TagRef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovePostRequest {
    pub approved: bool,
}
