//! ServerBuilder for fluent API to build the HTTP router

use super::AppState;
use super::router::{build_routes, with_layers};
use crate::catalog::CatalogService;
use crate::comments::CommentService;
use crate::config::{PolicyConfig, RareConfig};
use crate::core::AuthProvider;
use crate::media::{FsImageStore, ImageStore};
use crate::posts::PostService;
use crate::storage::EntityStore;
use anyhow::Result;
use axum::Router;
use std::sync::Arc;

/// Builder wiring the store, image backend and auth provider into a router
///
/// # Example
///
/// ```ignore
/// let store = EntityStore::in_memory();
/// let auth = TokenAuthProvider::new(store.users.clone());
///
/// let app = ServerBuilder::new()
///     .with_store(store)
///     .with_auth_provider(auth)
///     .with_config(&config)
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<EntityStore>,
    images: Option<Arc<dyn ImageStore>>,
    auth: Option<Arc<dyn AuthProvider>>,
    policies: PolicyConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self {
            store: None,
            images: None,
            auth: None,
            policies: PolicyConfig::default(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the entity store (defaults to an empty in-memory store)
    pub fn with_store(mut self, store: EntityStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the image backend (required unless `with_config` is used)
    pub fn with_image_store(mut self, images: impl ImageStore + 'static) -> Self {
        self.images = Some(Arc::new(images));
        self
    }

    /// Set the auth provider (required)
    pub fn with_auth_provider(mut self, auth: impl AuthProvider + 'static) -> Self {
        self.auth = Some(Arc::new(auth));
        self
    }

    pub fn with_policies(mut self, policies: PolicyConfig) -> Self {
        self.policies = policies;
        self
    }

    /// Take policies and a filesystem image store from the configuration
    pub fn with_config(mut self, config: &RareConfig) -> Self {
        self.policies = config.policies.clone();
        self.images = Some(Arc::new(FsImageStore::new(
            config.media.root.clone(),
            config.media.url_prefix.clone(),
        )));
        self
    }

    /// Merge extra routes into the final router
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the shared handler state
    pub fn build_state(self) -> Result<AppState> {
        let store = self.store.unwrap_or_default();
        let images = self.images.ok_or_else(|| {
            anyhow::anyhow!("ImageStore is required. Call .with_image_store() or .with_config()")
        })?;
        let auth = self
            .auth
            .ok_or_else(|| anyhow::anyhow!("AuthProvider is required. Call .with_auth_provider()"))?;

        Ok(AppState {
            posts: Arc::new(PostService::new(store.clone(), images, self.policies.clone())),
            comments: Arc::new(CommentService::new(store.clone(), self.policies.clone())),
            catalog: Arc::new(CatalogService::new(store, self.policies.manage_catalog)),
            auth,
        })
    }

    /// Build the final router with tracing and CORS layers
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let mut router = build_routes(self.build_state()?);
        for routes in custom_routes {
            router = router.merge(routes);
        }
        Ok(with_layers(router))
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
