//! HTTP handlers for categories and tags

use super::{CreateCategoryRequest, CreateTagRequest};
use crate::serialization::{CategoryPayload, TagPayload};
use crate::server::AppState;
use crate::server::extractors::{Auth, JsonBody};
use crate::server::responses::{ApiError, Operation, OperationResult};
use axum::Json;
use axum::extract::State;

pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryPayload>>, ApiError> {
    let categories = state
        .catalog
        .list_categories()
        .await
        .during(Operation::ListCategories)?;
    Ok(Json(categories))
}

pub async fn create_category(
    State(state): State<AppState>,
    Auth(auth): Auth,
    JsonBody(req): JsonBody<CreateCategoryRequest>,
) -> Result<Json<CategoryPayload>, ApiError> {
    let category = state
        .catalog
        .create_category(&auth, req)
        .await
        .during(Operation::CreateCategory)?;
    Ok(Json(category))
}

pub async fn list_tags(State(state): State<AppState>) -> Result<Json<Vec<TagPayload>>, ApiError> {
    let tags = state.catalog.list_tags().await.during(Operation::ListTags)?;
    Ok(Json(tags))
}

pub async fn create_tag(
    State(state): State<AppState>,
    Auth(auth): Auth,
    JsonBody(req): JsonBody<CreateTagRequest>,
) -> Result<Json<TagPayload>, ApiError> {
    let tag = state
        .catalog
        .create_tag(&auth, req)
        .await
        .during(Operation::CreateTag)?;
    Ok(Json(tag))
}
