//! Typed error handling for rare-rs
//!
//! Errors are grouped by category so callers can match on the exact failure
//! instead of inspecting strings.
//!
//! # Error Categories
//!
//! - [`EntityError`]: a referenced record does not exist
//! - [`ValidationError`]: a field constraint failed when saving
//! - [`InputError`]: the request carried malformed data (data URI, body, id)
//! - [`AuthError`]: no resolvable user, or the user may not act on a record
//! - [`StorageError`]: the store or the media backend failed
//! - [`ConfigError`]: configuration could not be loaded
//!
//! # Example
//!
//! ```rust,ignore
//! match service.retrieve_post(&auth, id).await {
//!     Ok(post) => println!("{}", post.title),
//!     Err(RareError::Entity(EntityError::NotFound { id, .. })) => {
//!         println!("post {} not found", id);
//!     }
//!     Err(e) => eprintln!("other error: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// The main error type for rare-rs
#[derive(Debug)]
pub enum RareError {
    /// Referenced entity is absent
    Entity(EntityError),

    /// Constraint violation raised while saving
    Validation(ValidationError),

    /// Malformed request data
    Input(InputError),

    /// Authentication and authorization failures
    Auth(AuthError),

    /// Storage backend errors
    Storage(StorageError),

    /// Configuration errors
    Config(ConfigError),

    /// Internal errors (should not happen in normal operation)
    Internal(String),
}

impl fmt::Display for RareError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RareError::Entity(e) => write!(f, "{}", e),
            RareError::Validation(e) => write!(f, "{}", e),
            RareError::Input(e) => write!(f, "{}", e),
            RareError::Auth(e) => write!(f, "{}", e),
            RareError::Storage(e) => write!(f, "{}", e),
            RareError::Config(e) => write!(f, "{}", e),
            RareError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for RareError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RareError::Entity(e) => Some(e),
            RareError::Validation(e) => Some(e),
            RareError::Input(e) => Some(e),
            RareError::Auth(e) => Some(e),
            RareError::Storage(e) => Some(e),
            RareError::Config(e) => Some(e),
            RareError::Internal(_) => None,
        }
    }
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl RareError {
    /// Shorthand for a missing record of the given type
    pub fn not_found(entity_type: &str, id: Uuid) -> Self {
        RareError::Entity(EntityError::NotFound {
            entity_type: entity_type.to_string(),
            id,
        })
    }

    /// Default HTTP status code for this error
    ///
    /// The HTTP layer narrows this per operation, see
    /// `server::responses::Operation::status_for`.
    pub fn status_code(&self) -> StatusCode {
        match self {
            RareError::Entity(e) => e.status_code(),
            RareError::Validation(_) => StatusCode::BAD_REQUEST,
            RareError::Input(_) => StatusCode::BAD_REQUEST,
            RareError::Auth(e) => e.status_code(),
            RareError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RareError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RareError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            RareError::Entity(e) => e.error_code(),
            RareError::Validation(_) => "VALIDATION_ERROR",
            RareError::Input(e) => e.error_code(),
            RareError::Auth(e) => e.error_code(),
            RareError::Storage(_) => "STORAGE_ERROR",
            RareError::Config(_) => "CONFIG_ERROR",
            RareError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            RareError::Entity(EntityError::NotFound { entity_type, id }) => {
                Some(serde_json::json!({
                    "entity_type": entity_type,
                    "id": id.to_string()
                }))
            }
            RareError::Validation(ValidationError::FieldErrors(errors)) => {
                Some(serde_json::json!({ "fields": errors }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for RareError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Entity Errors
// =============================================================================

/// Errors related to entity lookups
#[derive(Debug)]
pub enum EntityError {
    /// Entity was not found
    NotFound { entity_type: String, id: Uuid },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::NotFound { entity_type, id } => {
                write!(f, "{} with id '{}' not found", entity_type, id)
            }
        }
    }
}

impl std::error::Error for EntityError {}

impl EntityError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            EntityError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            EntityError::NotFound { .. } => "ENTITY_NOT_FOUND",
        }
    }
}

impl From<EntityError> for RareError {
    fn from(err: EntityError) -> Self {
        RareError::Entity(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// Constraint violations raised while saving
#[derive(Debug)]
pub enum ValidationError {
    /// Every failed field constraint, sorted by field name
    FieldErrors(Vec<FieldValidationError>),
}

/// A single field validation error
#[derive(Debug, Clone, Serialize)]
pub struct FieldValidationError {
    pub field: String,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::FieldErrors(errors) => {
                let msgs: Vec<String> = errors
                    .iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect();
                write!(f, "Validation errors: {}", msgs.join(", "))
            }
        }
    }
}

impl std::error::Error for ValidationError {}

impl From<ValidationError> for RareError {
    fn from(err: ValidationError) -> Self {
        RareError::Validation(err)
    }
}

impl From<validator::ValidationErrors> for ValidationError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldValidationError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldValidationError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        // HashMap iteration order is unstable
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        ValidationError::FieldErrors(fields)
    }
}

impl From<validator::ValidationErrors> for RareError {
    fn from(errors: validator::ValidationErrors) -> Self {
        RareError::Validation(errors.into())
    }
}

// =============================================================================
// Input Errors
// =============================================================================

/// Malformed request data
#[derive(Debug)]
pub enum InputError {
    /// Image payload is not a `<mime>;base64,<data>` string
    InvalidDataUri { message: String },

    /// Request body could not be parsed
    InvalidBody { message: String },

    /// Path identifier is not a UUID
    InvalidId { value: String },
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputError::InvalidDataUri { message } => {
                write!(f, "Invalid image data URI: {}", message)
            }
            InputError::InvalidBody { message } => {
                write!(f, "Invalid request body: {}", message)
            }
            InputError::InvalidId { value } => {
                write!(f, "Invalid id format: '{}'", value)
            }
        }
    }
}

impl std::error::Error for InputError {}

impl InputError {
    pub fn error_code(&self) -> &'static str {
        match self {
            InputError::InvalidDataUri { .. } => "INVALID_DATA_URI",
            InputError::InvalidBody { .. } => "INVALID_BODY",
            InputError::InvalidId { .. } => "INVALID_ID",
        }
    }
}

impl From<InputError> for RareError {
    fn from(err: InputError) -> Self {
        RareError::Input(err)
    }
}

// =============================================================================
// Auth Errors
// =============================================================================

/// Authentication and authorization failures
#[derive(Debug)]
pub enum AuthError {
    /// No user could be resolved from the request
    Unauthenticated { message: String },

    /// The user may not perform this operation
    Forbidden { message: String },
}

impl fmt::Display for AuthError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthError::Unauthenticated { message } => write!(f, "Unauthenticated: {}", message),
            AuthError::Forbidden { message } => write!(f, "Forbidden: {}", message),
        }
    }
}

impl std::error::Error for AuthError {}

impl AuthError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            AuthError::Forbidden { .. } => StatusCode::FORBIDDEN,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            AuthError::Unauthenticated { .. } => "UNAUTHENTICATED",
            AuthError::Forbidden { .. } => "FORBIDDEN",
        }
    }
}

impl From<AuthError> for RareError {
    fn from(err: AuthError) -> Self {
        RareError::Auth(err)
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors raised by stores and the media backend
#[derive(Debug)]
pub enum StorageError {
    /// A lock guarding in-memory data was poisoned
    LockPoisoned { message: String },

    /// Writing a media file failed
    MediaWrite { name: String, message: String },

    /// Any other backend failure
    OperationFailed { operation: String, message: String },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::LockPoisoned { message } => {
                write!(f, "Failed to acquire store lock: {}", message)
            }
            StorageError::MediaWrite { name, message } => {
                write!(f, "Failed to write media file '{}': {}", name, message)
            }
            StorageError::OperationFailed { operation, message } => {
                write!(f, "Storage {} failed: {}", operation, message)
            }
        }
    }
}

impl std::error::Error for StorageError {}

impl From<StorageError> for RareError {
    fn from(err: StorageError) -> Self {
        RareError::Storage(err)
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration
#[derive(Debug)]
pub enum ConfigError {
    /// Failed to parse configuration
    ParseError {
        file: Option<String>,
        message: String,
    },

    /// Invalid value in configuration
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    /// IO error while reading configuration
    IoError { message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ParseError { file, message } => {
                if let Some(file) = file {
                    write!(f, "Failed to parse config file '{}': {}", file, message)
                } else {
                    write!(f, "Failed to parse config: {}", message)
                }
            }
            ConfigError::InvalidValue {
                field,
                value,
                message,
            } => {
                write!(
                    f,
                    "Invalid value '{}' for field '{}': {}",
                    value, field, message
                )
            }
            ConfigError::IoError { message } => {
                write!(f, "IO error: {}", message)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for RareError {
    fn from(err: ConfigError) -> Self {
        RareError::Config(err)
    }
}

// =============================================================================
// Conversions from external errors
// =============================================================================

impl From<serde_yaml::Error> for RareError {
    fn from(err: serde_yaml::Error) -> Self {
        RareError::Config(ConfigError::ParseError {
            file: None,
            message: err.to_string(),
        })
    }
}

impl From<std::io::Error> for RareError {
    fn from(err: std::io::Error) -> Self {
        RareError::Config(ConfigError::IoError {
            message: err.to_string(),
        })
    }
}

/// A specialized Result type for rare-rs operations
pub type RareResult<T> = Result<T, RareError>;
