//! Request extractors shared by all handlers

use super::AppState;
use super::responses::ApiError;
use crate::core::AuthContext;
use crate::core::error::{InputError, RareError};
use axum::Json;
use axum::extract::{FromRequest, FromRequestParts, Path, Request};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use uuid::Uuid;

/// The caller's auth context, resolved from the `Authorization` header
///
/// Missing header means anonymous; an unknown token rejects the request.
pub struct Auth(pub AuthContext);

impl FromRequestParts<AppState> for Auth {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let context = state.auth.extract_context(&parts.headers).await?;
        Ok(Auth(context))
    }
}

/// A UUID taken from the `{id}` path segment
pub struct EntityId(pub Uuid);

impl<S> FromRequestParts<S> for EntityId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| invalid_id(e.body_text()))?;
        let id = Uuid::parse_str(&raw).map_err(|_| invalid_id(raw))?;
        Ok(EntityId(id))
    }
}

fn invalid_id(value: String) -> ApiError {
    RareError::from(InputError::InvalidId { value }).into()
}

/// JSON body whose parse failures come back as `INVALID_BODY`
pub struct JsonBody<T>(pub T);

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|e| {
            ApiError::from(RareError::from(InputError::InvalidBody {
                message: e.body_text(),
            }))
        })?;
        Ok(JsonBody(value))
    }
}
