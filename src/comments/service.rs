use super::{CreateCommentRequest, UpdateCommentRequest};
use crate::config::PolicyConfig;
use crate::core::{AuthContext, DataService, Filter, RareResult};
use crate::entities::Comment;
use crate::serialization::{self, CommentPayload};
use crate::storage::EntityStore;
use chrono::Utc;
use uuid::Uuid;

pub struct CommentService {
    store: EntityStore,
    policies: PolicyConfig,
}

impl CommentService {
    pub fn new(store: EntityStore, policies: PolicyConfig) -> Self {
        Self {
            store,
            policies,
        }
    }

    pub async fn create(&self, auth: &AuthContext, req: CreateCommentRequest) -> RareResult<CommentPayload> {
        let user = self.store.resolve_user(auth).await?;
        let created_on = req.created_on.unwrap_or_else(|| Utc::now().date_naive());

        // the post must still exist when the comment is saved
        let (post, comment) = {
            let _gate = self.store.write_gate.lock().await;
            let post = self.store.posts.get(&req.post_id).await?;
            let comment = self
                .store
                .comments
                .save(Comment::new(post.id, user.id, req.content, created_on))
                .await?;
            (post, comment)
        };

        tracing::info!(comment_id = %comment.id, post_id = %post.id, user_id = %user.id, "created comment");
        serialization::load_comment(&self.store, &comment).await
    }

    pub async fn retrieve(&self, id: Uuid) -> RareResult<CommentPayload> {
        let comment = self.store.comments.get(&id).await?;
        serialization::load_comment(&self.store, &comment).await
    }

    /// Replace the comment text; nothing else is editable
    pub async fn update(&self, auth: &AuthContext, id: Uuid, req: UpdateCommentRequest) -> RareResult<()> {
        self.store.resolve_user(auth).await?;
        let _gate = self.store.write_gate.lock().await;

        let mut comment = self.store.comments.get(&id).await?;
        self.policies
            .update_comment
            .enforce(auth, Some(comment.user_id), "update this comment")?;

        comment.content = req.content;
        self.store.comments.save(comment).await?;
        tracing::debug!(comment_id = %id, "updated comment");
        Ok(())
    }

    pub async fn delete(&self, auth: &AuthContext, id: Uuid) -> RareResult<()> {
        self.store.resolve_user(auth).await?;
        let _gate = self.store.write_gate.lock().await;

        let comment = self.store.comments.get(&id).await?;
        self.policies
            .delete_comment
            .enforce(auth, Some(comment.user_id), "delete this comment")?;

        self.store.comments.delete(&comment.id).await?;
        tracing::info!(comment_id = %id, "deleted comment");
        Ok(())
    }

    pub async fn list(&self) -> RareResult<Vec<CommentPayload>> {
        let comments = self.store.comments.list(&Filter::new()).await?;
        let mut payloads = Vec::with_capacity(comments.len());
        for comment in &comments {
            payloads.push(serialization::load_comment(&self.store, comment).await?);
        }
        Ok(payloads)
    }
}
