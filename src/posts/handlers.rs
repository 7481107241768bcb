//! HTTP handlers for posts

use super::{ApprovePostRequest, CreatePostRequest, UpdatePostRequest};
use crate::serialization::PostPayload;
use crate::server::AppState;
use crate::server::extractors::{Auth, EntityId, JsonBody};
use crate::server::responses::{ApiError, Operation, OperationResult};
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

pub async fn list_posts(
    State(state): State<AppState>,
    Auth(auth): Auth,
) -> Result<Json<Vec<PostPayload>>, ApiError> {
    let posts = state.posts.list(&auth).await.during(Operation::ListPosts)?;
    Ok(Json(posts))
}

pub async fn list_my_posts(
    State(state): State<AppState>,
    Auth(auth): Auth,
) -> Result<Json<Vec<PostPayload>>, ApiError> {
    let posts = state.posts.list_mine(&auth).await.during(Operation::ListMyPosts)?;
    Ok(Json(posts))
}

pub async fn create_post(
    State(state): State<AppState>,
    Auth(auth): Auth,
    JsonBody(req): JsonBody<CreatePostRequest>,
) -> Result<Json<PostPayload>, ApiError> {
    let post = state.posts.create(&auth, req).await.during(Operation::CreatePost)?;
    Ok(Json(post))
}

pub async fn get_post(
    State(state): State<AppState>,
    Auth(auth): Auth,
    EntityId(id): EntityId,
) -> Result<Json<PostPayload>, ApiError> {
    let post = state.posts.retrieve(&auth, id).await.during(Operation::RetrievePost)?;
    Ok(Json(post))
}

pub async fn update_post(
    State(state): State<AppState>,
    Auth(auth): Auth,
    EntityId(id): EntityId,
    JsonBody(req): JsonBody<UpdatePostRequest>,
) -> Result<StatusCode, ApiError> {
    state.posts.update(&auth, id, req).await.during(Operation::UpdatePost)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_post(
    State(state): State<AppState>,
    Auth(auth): Auth,
    EntityId(id): EntityId,
) -> Result<StatusCode, ApiError> {
    state.posts.delete(&auth, id).await.during(Operation::DeletePost)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn approve_post(
    State(state): State<AppState>,
    Auth(auth): Auth,
    EntityId(id): EntityId,
    JsonBody(req): JsonBody<ApprovePostRequest>,
) -> Result<Json<PostPayload>, ApiError> {
    let post = state
        .posts
        .approve(&auth, id, req)
        .await
        .during(Operation::ApprovePost)?;
    Ok(Json(post))
}
