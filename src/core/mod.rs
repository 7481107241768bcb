//! Core module containing fundamental traits and types for the crate

pub mod auth;
pub mod entity;
pub mod error;
pub mod field;
pub mod link;
pub mod query;
pub mod service;

pub use auth::{AuthContext, AuthPolicy, AuthProvider, TokenAuthProvider};
pub use entity::Entity;
pub use error::{RareError, RareResult};
pub use field::FieldValue;
pub use link::LinkEntity;
pub use query::Filter;
pub use service::{DataService, LinkService};
