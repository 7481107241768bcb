//! Link records for many-to-many relations

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Link type joining a post to one of its tags
pub const POST_TAG: &str = "post_tag";

/// A directed link between two entities
///
/// Links know nothing about the entity types they connect; the `link_type`
/// string scopes them (e.g., [`POST_TAG`]).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkEntity {
    /// Unique identifier for this link
    pub id: Uuid,

    /// The type of relationship
    pub link_type: String,

    /// The owning side of the relationship (e.g., the post)
    pub source_id: Uuid,

    /// The referenced side of the relationship (e.g., the tag)
    pub target_id: Uuid,

    /// When this link was created
    pub created_at: DateTime<Utc>,
}

impl LinkEntity {
    /// Create a new link
    pub fn new(link_type: impl Into<String>, source_id: Uuid, target_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            link_type: link_type.into(),
            source_id,
            target_id,
            created_at: Utc::now(),
        }
    }

    /// Check whether this link touches the given entity on either side
    pub fn involves(&self, entity_id: &Uuid) -> bool {
        &self.source_id == entity_id || &self.target_id == entity_id
    }
}
