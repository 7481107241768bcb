//! Stored records: users, authors, categories, tags, posts and comments
//!
//! Relations are kept as foreign-key ids. The post/tag many-to-many
//! relation lives in the link service under [`POST_TAG`](crate::core::link::POST_TAG).

#[macro_use]
pub mod macros;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Identity record of a person using the site
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct User {
    pub id: Uuid,
    #[validate(length(min = 1, max = 150))]
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    #[validate(email)]
    pub email: String,
    /// Grants the `staff` role
    pub is_staff: bool,
}

impl User {
    pub fn new(
        username: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            username: username.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            email: email.into(),
            is_staff: false,
        }
    }
}

impl_entity!(User, "user", "users", [username, email, is_staff]);

/// Profile extension of a [`User`], at most one per user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Author {
    pub id: Uuid,
    pub user_id: Uuid,
    pub bio: Option<String>,
    #[validate(url)]
    pub profile_image_url: Option<String>,
    pub created_on: NaiveDate,
    pub active: bool,
}

impl Author {
    pub fn new(user_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            bio: None,
            profile_image_url: None,
            created_on: Utc::now().date_naive(),
            active: true,
        }
    }
}

impl_entity!(Author, "author", "authors", [user_id, active]);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Category {
    pub id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl_entity!(Category, "category", "categories", [name]);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Tag {
    pub id: Uuid,
    #[validate(length(min = 1, max = 100))]
    pub label: String,
}

impl Tag {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            label: label.into(),
        }
    }
}

impl_entity!(Tag, "tag", "tags", [label]);

/// A blog post owned by the user who created it
///
/// Tags are not stored here; see [`POST_TAG`](crate::core::link::POST_TAG).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub category_id: Uuid,
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
    pub publication_date: NaiveDate,
    /// Public URL of the stored header image
    pub image_url: Option<String>,
    /// Moderation flag, independent of ownership
    pub approved: bool,
}

impl_entity!(Post, "post", "posts", [user_id, category_id, approved]);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    #[validate(length(min = 1))]
    pub content: String,
    pub created_on: NaiveDate,
}

impl Comment {
    pub fn new(post_id: Uuid, user_id: Uuid, content: impl Into<String>, created_on: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id,
            user_id,
            content: content.into(),
            created_on,
        }
    }
}

impl_entity!(Comment, "comment", "comments", [post_id, user_id]);
