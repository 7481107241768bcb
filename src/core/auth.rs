//! Authorization system for rare-rs
//!
//! Provides context-based authorization:
//! - Bearer tokens resolve to a user context
//! - Policies decide per operation whether the user may act on a record,
//!   based on ownership and roles

use crate::core::error::{AuthError, ConfigError, RareError, RareResult};
use crate::core::service::DataService;
use crate::entities::User;
use async_trait::async_trait;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// Role granted to users flagged `is_staff`
pub const STAFF_ROLE: &str = "staff";

/// Authorization context extracted from a request
#[derive(Debug, Clone, PartialEq)]
pub enum AuthContext {
    /// Authenticated user
    User { user_id: Uuid, roles: Vec<String> },

    /// No authentication (public access)
    Anonymous,
}

impl AuthContext {
    /// Build the context for a stored user
    pub fn for_user(user: &User) -> Self {
        let roles = if user.is_staff {
            vec![STAFF_ROLE.to_string()]
        } else {
            Vec::new()
        };
        AuthContext::User {
            user_id: user.id,
            roles,
        }
    }

    /// Get user_id if available
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            AuthContext::User { user_id, .. } => Some(*user_id),
            AuthContext::Anonymous => None,
        }
    }

    /// Get user_id or fail with `Unauthenticated`
    pub fn require_user(&self) -> RareResult<Uuid> {
        self.user_id().ok_or_else(|| {
            AuthError::Unauthenticated {
                message: "authentication credentials were not provided".to_string(),
            }
            .into()
        })
    }

    /// Check if the context carries a role
    pub fn has_role(&self, role: &str) -> bool {
        match self {
            AuthContext::User { roles, .. } => roles.iter().any(|r| r == role),
            AuthContext::Anonymous => false,
        }
    }
}

/// Authorization policy for an operation
#[derive(Debug, Clone, PartialEq)]
pub enum AuthPolicy {
    /// Public access (no auth required)
    Public,

    /// Any authenticated user
    Authenticated,

    /// Owner of the resource only
    Owner,

    /// User must have one of these roles
    HasRole(Vec<String>),

    /// Combination of policies (OR)
    Or(Vec<AuthPolicy>),
}

impl AuthPolicy {
    /// Check if auth context satisfies this policy
    ///
    /// `owner` is the user owning the record being acted on, when there is one.
    pub fn check(&self, context: &AuthContext, owner: Option<Uuid>) -> bool {
        match self {
            AuthPolicy::Public => true,

            AuthPolicy::Authenticated => !matches!(context, AuthContext::Anonymous),

            AuthPolicy::Owner => match (context.user_id(), owner) {
                (Some(user_id), Some(owner)) => user_id == owner,
                _ => false,
            },

            AuthPolicy::HasRole(required_roles) => {
                required_roles.iter().any(|r| context.has_role(r))
            }

            AuthPolicy::Or(policies) => policies.iter().any(|p| p.check(context, owner)),
        }
    }

    /// Check the policy and turn a refusal into a typed error
    ///
    /// Anonymous callers get `Unauthenticated`, known users `Forbidden`.
    pub fn enforce(&self, context: &AuthContext, owner: Option<Uuid>, action: &str) -> RareResult<()> {
        if self.check(context, owner) {
            return Ok(());
        }
        let err = match context {
            AuthContext::Anonymous => AuthError::Unauthenticated {
                message: format!("authentication required to {}", action),
            },
            AuthContext::User { .. } => AuthError::Forbidden {
                message: format!("not allowed to {}", action),
            },
        };
        Err(err.into())
    }
}

impl FromStr for AuthPolicy {
    type Err = ConfigError;

    /// Parse policy from string (for YAML config)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let policy = match s {
            "public" => AuthPolicy::Public,
            "authenticated" => AuthPolicy::Authenticated,
            "owner" => AuthPolicy::Owner,
            s => {
                if let Some(role) = s.strip_prefix("owner_or_role:") {
                    AuthPolicy::Or(vec![
                        AuthPolicy::Owner,
                        AuthPolicy::HasRole(vec![role.to_string()]),
                    ])
                } else if let Some(role) = s.strip_prefix("role:") {
                    AuthPolicy::HasRole(vec![role.to_string()])
                } else {
                    return Err(ConfigError::InvalidValue {
                        field: "policy".to_string(),
                        value: s.to_string(),
                        message: "expected public, authenticated, owner, role:<name> or owner_or_role:<name>".to_string(),
                    });
                }
            }
        };
        Ok(policy)
    }
}

impl fmt::Display for AuthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthPolicy::Public => write!(f, "public"),
            AuthPolicy::Authenticated => write!(f, "authenticated"),
            AuthPolicy::Owner => write!(f, "owner"),
            AuthPolicy::HasRole(roles) => write!(f, "role:{}", roles.join(",")),
            AuthPolicy::Or(policies) => match policies.as_slice() {
                [AuthPolicy::Owner, AuthPolicy::HasRole(roles)] => {
                    write!(f, "owner_or_role:{}", roles.join(","))
                }
                _ => write!(f, "or({} policies)", policies.len()),
            },
        }
    }
}

impl Serialize for AuthPolicy {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AuthPolicy {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Trait for auth providers
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Resolve a bearer token to an auth context
    ///
    /// Unknown tokens fail with `Unauthenticated`.
    async fn authenticate(&self, token: &str) -> RareResult<AuthContext>;

    /// Extract auth context from request headers
    ///
    /// A request without an `Authorization` header is anonymous.
    async fn extract_context(&self, headers: &HeaderMap) -> RareResult<AuthContext> {
        let Some(value) = headers.get(AUTHORIZATION) else {
            return Ok(AuthContext::Anonymous);
        };
        let value = value.to_str().map_err(|_| unauthenticated("malformed authorization header"))?;
        let token = value
            .strip_prefix("Token ")
            .or_else(|| value.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| unauthenticated("expected 'Token <key>' or 'Bearer <key>'"))?;
        self.authenticate(token).await
    }
}

fn unauthenticated(message: &str) -> RareError {
    AuthError::Unauthenticated {
        message: message.to_string(),
    }
    .into()
}

/// Auth provider backed by a static token table
///
/// Tokens are registered up front (from the `seed` config section or by
/// tests); issuing them is left to an external login flow. Each lookup
/// re-reads the user so deleted users stop authenticating.
#[derive(Clone)]
pub struct TokenAuthProvider {
    tokens: Arc<RwLock<HashMap<String, Uuid>>>,
    users: Arc<dyn DataService<User>>,
}

impl TokenAuthProvider {
    pub fn new(users: Arc<dyn DataService<User>>) -> Self {
        Self {
            tokens: Arc::new(RwLock::new(HashMap::new())),
            users,
        }
    }

    /// Bind a token to a user
    pub fn register(&self, token: impl Into<String>, user_id: Uuid) -> RareResult<()> {
        let mut tokens = self.tokens.write().map_err(|e| {
            RareError::Internal(format!("Failed to acquire token lock: {}", e))
        })?;
        tokens.insert(token.into(), user_id);
        Ok(())
    }
}

#[async_trait]
impl AuthProvider for TokenAuthProvider {
    async fn authenticate(&self, token: &str) -> RareResult<AuthContext> {
        let user_id = {
            let tokens = self.tokens.read().map_err(|e| {
                RareError::Internal(format!("Failed to acquire token lock: {}", e))
            })?;
            tokens.get(token).copied()
        };
        let user_id = user_id.ok_or_else(|| unauthenticated("invalid token"))?;

        match self.users.find(&user_id).await? {
            Some(user) => Ok(AuthContext::for_user(&user)),
            None => {
                tracing::warn!(%user_id, "token refers to a missing user");
                Err(unauthenticated("invalid token"))
            }
        }
    }
}
