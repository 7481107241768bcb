use super::{ApprovePostRequest, CreatePostRequest, TagRef, UpdatePostRequest};
use crate::config::PolicyConfig;
use crate::core::link::POST_TAG;
use crate::core::{AuthContext, DataService, Filter, LinkEntity, LinkService, RareResult};
use crate::entities::Post;
use crate::media::{ImageStore, ingest_image};
use crate::serialization::{self, PostPayload};
use crate::storage::EntityStore;
use indexmap::IndexSet;
use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

/// Post operations
///
/// Mutations hold the store's write gate across their read-then-write
/// sequence, so two concurrent updates of the same post cannot interleave.
pub struct PostService {
    store: EntityStore,
    images: Arc<dyn ImageStore>,
    policies: PolicyConfig,
}

impl PostService {
    pub fn new(store: EntityStore, images: Arc<dyn ImageStore>, policies: PolicyConfig) -> Self {
        Self {
            store,
            images,
            policies,
        }
    }

    pub async fn create(&self, auth: &AuthContext, req: CreatePostRequest) -> RareResult<PostPayload> {
        let user = self.store.resolve_user(auth).await?;
        let category = self.store.categories.get(&req.category_id).await?;
        let tag_ids = self.resolve_tags(&req.tags).await?;

        let mut post = Post {
            id: Uuid::new_v4(),
            user_id: user.id,
            category_id: category.id,
            title: req.title,
            content: req.content,
            publication_date: req.publication_date,
            image_url: None,
            approved: req.approved,
        };
        // fail on bad fields before an image lands on disk
        post.validate()?;

        if let Some(data_uri) = &req.image_url {
            let stored = ingest_image(self.images.as_ref(), &post.title, data_uri).await?;
            post.image_url = Some(stored.url);
        }

        let post = {
            let _gate = self.store.write_gate.lock().await;
            let post = self.store.posts.save(post).await?;
            self.replace_tags(post.id, &tag_ids).await?;
            post
        };

        tracing::info!(post_id = %post.id, user_id = %user.id, tags = tag_ids.len(), "created post");
        serialization::load_post(&self.store, &post, Some(user.id)).await
    }

    pub async fn retrieve(&self, auth: &AuthContext, id: Uuid) -> RareResult<PostPayload> {
        let post = self.store.posts.get(&id).await?;
        serialization::load_post(&self.store, &post, auth.user_id()).await
    }

    /// Replace title, content, category and the whole tag set
    pub async fn update(&self, auth: &AuthContext, id: Uuid, req: UpdatePostRequest) -> RareResult<()> {
        self.store.resolve_user(auth).await?;
        let _gate = self.store.write_gate.lock().await;

        let mut post = self.store.posts.get(&id).await?;
        self.policies
            .update_post
            .enforce(auth, Some(post.user_id), "update this post")?;

        let category = self.store.categories.get(&req.category_id).await?;
        let tag_ids = self.resolve_tags(&req.tags).await?;

        post.category_id = category.id;
        post.title = req.title;
        post.content = req.content;
        let post = self.store.posts.save(post).await?;
        self.replace_tags(post.id, &tag_ids).await?;

        tracing::info!(post_id = %post.id, tags = tag_ids.len(), "updated post");
        Ok(())
    }

    /// Delete a post together with its comments and tag links
    pub async fn delete(&self, auth: &AuthContext, id: Uuid) -> RareResult<()> {
        self.store.resolve_user(auth).await?;
        let _gate = self.store.write_gate.lock().await;

        let post = self.store.posts.get(&id).await?;
        self.policies
            .delete_post
            .enforce(auth, Some(post.user_id), "delete this post")?;

        let comments = self
            .store
            .comments
            .list(&Filter::new().eq("post_id", post.id))
            .await?;
        for comment in &comments {
            self.store.comments.delete(&comment.id).await?;
        }
        self.store.links.delete_by_entity(&post.id).await?;
        self.store.posts.delete(&post.id).await?;

        tracing::info!(post_id = %post.id, comments = comments.len(), "deleted post");
        Ok(())
    }

    pub async fn list(&self, auth: &AuthContext) -> RareResult<Vec<PostPayload>> {
        let posts = self.store.posts.list(&Filter::new()).await?;
        serialization::load_posts(&self.store, &posts, auth.user_id()).await
    }

    /// Posts owned by the requesting user
    pub async fn list_mine(&self, auth: &AuthContext) -> RareResult<Vec<PostPayload>> {
        let user = self.store.resolve_user(auth).await?;
        let posts = self
            .store
            .posts
            .list(&Filter::new().eq("user_id", user.id))
            .await?;
        serialization::load_posts(&self.store, &posts, Some(user.id)).await
    }

    pub async fn approve(
        &self,
        auth: &AuthContext,
        id: Uuid,
        req: ApprovePostRequest,
    ) -> RareResult<PostPayload> {
        let user = self.store.resolve_user(auth).await?;
        let post = {
            let _gate = self.store.write_gate.lock().await;
            let mut post = self.store.posts.get(&id).await?;
            self.policies
                .approve_post
                .enforce(auth, Some(post.user_id), "approve posts")?;

            post.approved = req.approved;
            self.store.posts.save(post).await?
        };

        tracing::info!(post_id = %post.id, approved = post.approved, moderator = %user.id, "moderated post");
        serialization::load_post(&self.store, &post, Some(user.id)).await
    }

    /// Dedupe tag references and check that every tag exists
    async fn resolve_tags(&self, refs: &[TagRef]) -> RareResult<IndexSet<Uuid>> {
        let ids: IndexSet<Uuid> = refs.iter().map(TagRef::id).collect();
        for id in &ids {
            self.store.tags.get(id).await?;
        }
        Ok(ids)
    }

    /// Make the post's tag links equal `tag_ids`
    ///
    /// Links already present are kept, so reassigning the same set is a no-op.
    async fn replace_tags(&self, post_id: Uuid, tag_ids: &IndexSet<Uuid>) -> RareResult<()> {
        let existing = self.store.links.find_by_source(&post_id, POST_TAG).await?;
        let mut linked = IndexSet::new();
        for link in existing {
            if tag_ids.contains(&link.target_id) && linked.insert(link.target_id) {
                continue;
            }
            self.store.links.delete(&link.id).await?;
        }
        for tag_id in tag_ids {
            if !linked.contains(tag_id) {
                self.store
                    .links
                    .create(LinkEntity::new(POST_TAG, post_id, *tag_id))
                    .await?;
            }
        }
        Ok(())
    }
}
