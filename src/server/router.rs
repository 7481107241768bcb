//! Route table

use super::AppState;
use crate::catalog::handlers as catalog;
use crate::comments::handlers as comments;
use crate::posts::handlers as posts;
use axum::http::StatusCode;
use axum::{
    Router,
    routing::{get, put},
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build every route of the API
///
/// - GET/POST /posts, GET /posts/myposts
/// - GET/PUT/DELETE /posts/{id}, PUT /posts/{id}/approve
/// - GET/POST /comments, GET/PUT/DELETE /comments/{id}
/// - GET/POST /categories, GET/POST /tags
/// - GET /health
pub fn build_routes(state: AppState) -> Router {
    Router::new()
        .route("/posts", get(posts::list_posts).post(posts::create_post))
        .route("/posts/myposts", get(posts::list_my_posts))
        .route(
            "/posts/{id}",
            get(posts::get_post)
                .put(posts::update_post)
                .delete(posts::delete_post),
        )
        .route("/posts/{id}/approve", put(posts::approve_post))
        .route(
            "/comments",
            get(comments::list_comments).post(comments::create_comment),
        )
        .route(
            "/comments/{id}",
            get(comments::get_comment)
                .put(comments::update_comment)
                .delete(comments::delete_comment),
        )
        .route(
            "/categories",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route("/tags", get(catalog::list_tags).post(catalog::create_tag))
        .route("/health", get(health))
        .with_state(state)
}

/// Wrap a router with request tracing and permissive CORS
pub fn with_layers(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
    )
}

async fn health() -> StatusCode {
    StatusCode::OK
}
