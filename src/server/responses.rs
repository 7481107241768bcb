//! Error-to-status mapping for every HTTP operation
//!
//! Each operation lists which error kinds it turns into client errors;
//! everything else becomes a 500.

use crate::core::RareError;
use crate::core::error::AuthError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Operations exposed over HTTP
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    CreatePost,
    RetrievePost,
    UpdatePost,
    DeletePost,
    ListPosts,
    ListMyPosts,
    ApprovePost,
    CreateComment,
    RetrieveComment,
    UpdateComment,
    DeleteComment,
    ListComments,
    ListCategories,
    CreateCategory,
    ListTags,
    CreateTag,
}

/// Coarse classification of a [`RareError`] used by the status table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Invalid,
    Unauthenticated,
    Forbidden,
    Other,
}

impl ErrorKind {
    pub fn of(error: &RareError) -> Self {
        match error {
            RareError::Entity(_) => ErrorKind::NotFound,
            RareError::Validation(_) | RareError::Input(_) => ErrorKind::Invalid,
            RareError::Auth(AuthError::Unauthenticated { .. }) => ErrorKind::Unauthenticated,
            RareError::Auth(AuthError::Forbidden { .. }) => ErrorKind::Forbidden,
            RareError::Storage(_) | RareError::Config(_) | RareError::Internal(_) => ErrorKind::Other,
        }
    }
}

impl Operation {
    pub fn status_for(self, error: &RareError) -> StatusCode {
        use ErrorKind::*;
        use Operation::*;

        match (self, ErrorKind::of(error)) {
            (_, Unauthenticated) => StatusCode::UNAUTHORIZED,
            (_, Forbidden) => StatusCode::FORBIDDEN,

            (CreatePost, NotFound) => StatusCode::NOT_FOUND,
            (CreatePost, Invalid) => StatusCode::BAD_REQUEST,

            (RetrievePost, NotFound) => StatusCode::NOT_FOUND,

            (UpdatePost, NotFound) => StatusCode::NOT_FOUND,
            (UpdatePost, Invalid) => StatusCode::BAD_REQUEST,

            (DeletePost, NotFound) => StatusCode::NOT_FOUND,

            // the body is a bare flag; parse failures are rejected by `JsonBody`
            (ApprovePost, NotFound) => StatusCode::NOT_FOUND,

            (CreateComment, NotFound) => StatusCode::NOT_FOUND,
            (CreateComment, Invalid) => StatusCode::BAD_REQUEST,

            (RetrieveComment, NotFound) => StatusCode::NOT_FOUND,

            (UpdateComment, NotFound) => StatusCode::NOT_FOUND,
            (UpdateComment, Invalid) => StatusCode::BAD_REQUEST,

            (DeleteComment, NotFound) => StatusCode::NOT_FOUND,

            (CreateCategory, Invalid) => StatusCode::BAD_REQUEST,
            (CreateTag, Invalid) => StatusCode::BAD_REQUEST,

            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// An error on its way to becoming an HTTP response
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub error: RareError,
}

impl ApiError {
    pub fn new(operation: Operation, error: RareError) -> Self {
        Self {
            status: operation.status_for(&error),
            error,
        }
    }
}

/// Errors raised outside an operation (extractors) keep their default status
impl From<RareError> for ApiError {
    fn from(error: RareError) -> Self {
        Self {
            status: error.status_code(),
            error,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, "request failed: {}", self.error);
        } else {
            tracing::debug!(status = %self.status, "request rejected: {}", self.error);
        }
        (self.status, Json(self.error.to_response())).into_response()
    }
}

/// Attach an [`Operation`] to a service result
pub trait OperationResult<T> {
    fn during(self, operation: Operation) -> Result<T, ApiError>;
}

impl<T> OperationResult<T> for Result<T, RareError> {
    fn during(self, operation: Operation) -> Result<T, ApiError> {
        self.map_err(|error| ApiError::new(operation, error))
    }
}
