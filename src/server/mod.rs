//! HTTP surface: shared state, extractors, error mapping and routes

pub mod builder;
pub mod extractors;
pub mod responses;
pub mod router;

pub use builder::ServerBuilder;
pub use responses::{ApiError, Operation};

use crate::catalog::CatalogService;
use crate::comments::CommentService;
use crate::core::AuthProvider;
use crate::posts::PostService;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
    pub comments: Arc<CommentService>,
    pub catalog: Arc<CatalogService>,
    pub auth: Arc<dyn AuthProvider>,
}
