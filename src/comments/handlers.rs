//! HTTP handlers for comments

use super::{CreateCommentRequest, UpdateCommentRequest};
use crate::serialization::CommentPayload;
use crate::server::AppState;
use crate::server::extractors::{Auth, EntityId, JsonBody};
use crate::server::responses::{ApiError, Operation, OperationResult};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

pub async fn list_comments(State(state): State<AppState>) -> Result<Json<Vec<CommentPayload>>, ApiError> {
    let comments = state.comments.list().await.during(Operation::ListComments)?;
    Ok(Json(comments))
}

pub async fn create_comment(
    State(state): State<AppState>,
    Auth(auth): Auth,
    JsonBody(req): JsonBody<CreateCommentRequest>,
) -> Result<Json<CommentPayload>, ApiError> {
    let comment = state
        .comments
        .create(&auth, req)
        .await
        .during(Operation::CreateComment)?;
    Ok(Json(comment))
}

pub async fn get_comment(
    State(state): State<AppState>,
    EntityId(id): EntityId,
) -> Result<Json<CommentPayload>, ApiError> {
    let comment = state.comments.retrieve(id).await.during(Operation::RetrieveComment)?;
    Ok(Json(comment))
}

pub async fn update_comment(
    State(state): State<AppState>,
    Auth(auth): Auth,
    EntityId(id): EntityId,
    JsonBody(req): JsonBody<UpdateCommentRequest>,
) -> Result<StatusCode, ApiError> {
    state
        .comments
        .update(&auth, id, req)
        .await
        .during(Operation::UpdateComment)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_comment(
    State(state): State<AppState>,
    Auth(auth): Auth,
    EntityId(id): EntityId,
) -> Result<StatusCode, ApiError> {
    state.comments.delete(&auth, id).await.during(Operation::DeleteComment)?;
    Ok(StatusCode::NO_CONTENT)
}
