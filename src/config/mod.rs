//! Configuration loading and management
//!
//! Every section has defaults, so an empty YAML document is a valid
//! configuration:
//!
//! ```yaml
//! server:
//!   addr: 0.0.0.0:8000
//! media:
//!   root: ./media
//!   url_prefix: /media/
//! policies:
//!   approve_post: role:staff
//!   update_post: owner_or_role:staff
//! seed:
//!   users:
//!     - username: admin
//!       email: admin@example.com
//!       is_staff: true
//!       token: admin-token
//!   categories: [News]
//!   tags: [rust]
//! ```

use crate::core::auth::AuthPolicy;
use crate::core::error::{ConfigError, RareResult};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable overriding `server.addr`
pub const ENV_SERVER_ADDR: &str = "RARE_SERVER_ADDR";

/// Environment variable overriding `media.root`
pub const ENV_MEDIA_ROOT: &str = "RARE_MEDIA_ROOT";

/// Complete application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RareConfig {
    pub server: ServerConfig,
    pub media: MediaConfig,
    pub policies: PolicyConfig,
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Listen address
    pub addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8000".to_string(),
        }
    }
}

/// Where ingested images are written and how they are addressed
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaConfig {
    /// Directory receiving image files
    pub root: PathBuf,

    /// Prefix joined with the file name to build `Post.image_url`
    pub url_prefix: String,
}

impl Default for MediaConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("media"),
            url_prefix: "/media/".to_string(),
        }
    }
}

/// Authorization policy per guarded operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub update_post: AuthPolicy,
    pub delete_post: AuthPolicy,
    pub approve_post: AuthPolicy,
    pub update_comment: AuthPolicy,
    pub delete_comment: AuthPolicy,
    /// Creating categories and tags
    pub manage_catalog: AuthPolicy,
}

fn owner_or_staff() -> AuthPolicy {
    AuthPolicy::Or(vec![
        AuthPolicy::Owner,
        AuthPolicy::HasRole(vec![crate::core::auth::STAFF_ROLE.to_string()]),
    ])
}

fn staff_only() -> AuthPolicy {
    AuthPolicy::HasRole(vec![crate::core::auth::STAFF_ROLE.to_string()])
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            update_post: owner_or_staff(),
            delete_post: owner_or_staff(),
            approve_post: staff_only(),
            update_comment: owner_or_staff(),
            delete_comment: owner_or_staff(),
            manage_catalog: staff_only(),
        }
    }
}

/// Records created at startup
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    pub users: Vec<SeedUser>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedUser {
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub bio: Option<String>,
    /// Bearer token bound to this user
    #[serde(default)]
    pub token: Option<String>,
}

impl RareConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &str) -> RareResult<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| {
            ConfigError::ParseError {
                file: Some(path.to_string()),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Load configuration from a YAML string
    pub fn from_yaml_str(yaml: &str) -> RareResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Apply `RARE_*` environment overrides
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(addr) = lookup(ENV_SERVER_ADDR) {
            self.server.addr = addr;
        }
        if let Some(root) = lookup(ENV_MEDIA_ROOT) {
            self.media.root = PathBuf::from(root);
        }
        self
    }
}
