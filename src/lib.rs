//! # rare-rs
//!
//! Blog backend serving posts, comments, categories and tags over HTTP.
//!
//! ## Features
//!
//! - **Repository traits**: one `DataService` per entity plus a `LinkService`
//!   for the post/tag relation, with in-memory implementations
//! - **Per-request ownership**: payloads carry `is_post_author` / `isAuthor`
//!   computed from the caller, never from ambient state
//! - **Image ingestion**: base64 data URIs decoded and stored before a post
//!   is saved
//! - **Configurable policies**: who may update, delete or approve records
//! - **Typed errors**: every operation maps errors to statuses explicitly
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rare::prelude::*;
//!
//! let config = RareConfig::from_yaml_file("rare.yaml")?.with_env_overrides();
//! let store = EntityStore::in_memory();
//! let auth = TokenAuthProvider::new(store.users.clone());
//! seed(&store, &auth, &config.seed).await?;
//!
//! let app = ServerBuilder::new()
//!     .with_store(store)
//!     .with_auth_provider(auth)
//!     .with_config(&config)
//!     .build()?;
//! ```

pub mod catalog;
pub mod comments;
pub mod config;
pub mod core;
pub mod entities;
pub mod media;
pub mod posts;
pub mod serialization;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        auth::{AuthContext, AuthPolicy, AuthProvider, TokenAuthProvider},
        entity::Entity,
        error::{RareError, RareResult},
        field::FieldValue,
        link::LinkEntity,
        query::Filter,
        service::{DataService, LinkService},
    };

    // === Macros ===
    pub use crate::impl_entity;

    // === Entities ===
    pub use crate::entities::{Author, Category, Comment, Post, Tag, User};

    // === Services ===
    pub use crate::catalog::CatalogService;
    pub use crate::comments::{CommentService, CreateCommentRequest, UpdateCommentRequest};
    pub use crate::posts::{
        ApprovePostRequest, CreatePostRequest, PostService, TagRef, UpdatePostRequest,
    };

    // === Payloads ===
    pub use crate::serialization::{CommentPayload, PostPayload, PostSummary, UserPayload};

    // === Media ===
    pub use crate::media::{FsImageStore, ImageStore, InMemoryImageStore};

    // === Storage ===
    pub use crate::storage::{EntityStore, InMemoryDataService, InMemoryLinkService, seed};

    // === Config ===
    pub use crate::config::{PolicyConfig, RareConfig};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
    pub use serde::{Deserialize, Serialize};
    pub use uuid::Uuid;

    // === Axum ===
    pub use axum::Router;
}
