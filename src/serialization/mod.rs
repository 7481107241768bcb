//! Response payloads for posts and comments
//!
//! Ownership flags are computed from an explicit `requester` rather than
//! from ambient request state, so the same post serializes differently per
//! caller. Graph depth is fixed by the payload types themselves: a post
//! embeds its comments and their users, a standalone comment embeds its post
//! as reference ids only.

use crate::core::link::POST_TAG;
use crate::core::{DataService, LinkService, RareResult};
use crate::entities::{Author, Category, Comment, Post, Tag, User};
use crate::storage::EntityStore;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryPayload {
    pub id: Uuid,
    pub name: String,
}

impl From<&Category> for CategoryPayload {
    fn from(category: &Category) -> Self {
        Self {
            id: category.id,
            name: category.name.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagPayload {
    pub id: Uuid,
    pub label: String,
}

impl From<&Tag> for TagPayload {
    fn from(tag: &Tag) -> Self {
        Self {
            id: tag.id,
            label: tag.label.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorPayload {
    pub id: Uuid,
    pub profile_image_url: Option<String>,
    pub created_on: NaiveDate,
    pub active: bool,
    pub bio: Option<String>,
}

impl From<&Author> for AuthorPayload {
    fn from(author: &Author) -> Self {
        Self {
            id: author.id,
            profile_image_url: author.profile_image_url.clone(),
            created_on: author.created_on,
            active: author.active,
            bio: author.bio.clone(),
        }
    }
}

/// A user with its author profile; `author` is `null` when there is none
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPayload {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub id: Uuid,
    pub author: Option<AuthorPayload>,
}

impl UserPayload {
    pub fn new(user: &User, author: Option<&Author>) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            id: user.id,
            author: author.map(AuthorPayload::from),
        }
    }
}

/// A comment as embedded in a [`PostPayload`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestedCommentPayload {
    pub content: String,
    pub user: UserPayload,
    pub created_on: NaiveDate,
    #[serde(rename = "isAuthor")]
    pub is_author: bool,
    pub id: Uuid,
}

impl NestedCommentPayload {
    pub fn new(comment: &Comment, user: UserPayload, requester: Option<Uuid>) -> Self {
        Self {
            content: comment.content.clone(),
            user,
            created_on: comment.created_on,
            is_author: is_owner(requester, comment.user_id),
            id: comment.id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostPayload {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub publication_date: NaiveDate,
    pub image_url: Option<String>,
    pub approved: bool,
    pub category: CategoryPayload,
    pub tags: Vec<TagPayload>,
    pub user: UserPayload,
    pub comments: Vec<NestedCommentPayload>,
    pub is_post_author: bool,
}

/// Related records a [`PostPayload`] is assembled from
pub struct PostParts {
    pub category: CategoryPayload,
    pub tags: Vec<TagPayload>,
    pub user: UserPayload,
    pub comments: Vec<NestedCommentPayload>,
}

impl PostPayload {
    pub fn new(post: &Post, parts: PostParts, requester: Option<Uuid>) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            publication_date: post.publication_date,
            image_url: post.image_url.clone(),
            approved: post.approved,
            category: parts.category,
            tags: parts.tags,
            user: parts.user,
            comments: parts.comments,
            is_post_author: is_owner(requester, post.user_id),
        }
    }
}

/// A post reduced to scalar fields and reference ids
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub publication_date: NaiveDate,
    pub image_url: Option<String>,
    pub approved: bool,
    pub category: Uuid,
    pub user: Uuid,
    pub tags: Vec<Uuid>,
}

impl PostSummary {
    pub fn new(post: &Post, tags: Vec<Uuid>) -> Self {
        Self {
            id: post.id,
            title: post.title.clone(),
            content: post.content.clone(),
            publication_date: post.publication_date,
            image_url: post.image_url.clone(),
            approved: post.approved,
            category: post.category_id,
            user: post.user_id,
            tags,
        }
    }
}

/// A comment served as its own resource
///
/// Carries no user projection and no ownership flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentPayload {
    pub id: Uuid,
    pub content: String,
    pub created_on: NaiveDate,
    pub post: PostSummary,
}

impl CommentPayload {
    pub fn new(comment: &Comment, post: PostSummary) -> Self {
        Self {
            id: comment.id,
            content: comment.content.clone(),
            created_on: comment.created_on,
            post,
        }
    }
}

/// Anonymous requesters never own anything
pub fn is_owner(requester: Option<Uuid>, owner: Uuid) -> bool {
    requester == Some(owner)
}

// =============================================================================
// Loaders
// =============================================================================

/// Load a user and its author profile
pub async fn load_user(store: &EntityStore, user_id: Uuid) -> RareResult<UserPayload> {
    let user = store.users.get(&user_id).await?;
    let author = store.author_of(&user).await?;
    Ok(UserPayload::new(&user, author.as_ref()))
}

/// Tag ids linked to a post, in link creation order
pub async fn tag_ids(store: &EntityStore, post_id: Uuid) -> RareResult<Vec<Uuid>> {
    let links = store.links.find_by_source(&post_id, POST_TAG).await?;
    Ok(links.into_iter().map(|link| link.target_id).collect())
}

async fn load_tags(store: &EntityStore, post_id: Uuid) -> RareResult<Vec<TagPayload>> {
    let mut tags = Vec::new();
    for id in tag_ids(store, post_id).await? {
        match store.tags.find(&id).await? {
            Some(tag) => tags.push(TagPayload::from(&tag)),
            None => tracing::warn!(%post_id, tag_id = %id, "post links to a missing tag"),
        }
    }
    Ok(tags)
}

/// Serialize a post with its category, tags, owner and comments
pub async fn load_post(
    store: &EntityStore,
    post: &Post,
    requester: Option<Uuid>,
) -> RareResult<PostPayload> {
    let category = store.categories.get(&post.category_id).await?;
    let tags = load_tags(store, post.id).await?;
    let user = load_user(store, post.user_id).await?;

    let mut comments = Vec::new();
    for comment in store
        .comments
        .list(&crate::core::Filter::new().eq("post_id", post.id))
        .await?
    {
        let commenter = load_user(store, comment.user_id).await?;
        comments.push(NestedCommentPayload::new(&comment, commenter, requester));
    }

    let parts = PostParts {
        category: CategoryPayload::from(&category),
        tags,
        user,
        comments,
    };
    Ok(PostPayload::new(post, parts, requester))
}

/// Serialize a list of posts for the same requester
pub async fn load_posts(
    store: &EntityStore,
    posts: &[Post],
    requester: Option<Uuid>,
) -> RareResult<Vec<PostPayload>> {
    let mut payloads = Vec::with_capacity(posts.len());
    for post in posts {
        payloads.push(load_post(store, post, requester).await?);
    }
    Ok(payloads)
}

/// Serialize a standalone comment with its post as reference ids
pub async fn load_comment(store: &EntityStore, comment: &Comment) -> RareResult<CommentPayload> {
    let post = store.posts.get(&comment.post_id).await?;
    let tags = tag_ids(store, post.id).await?;
    Ok(CommentPayload::new(comment, PostSummary::new(&post, tags)))
}
