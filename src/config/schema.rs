//! Configuration schema for bookshelf
//!
//! Configuration is stored at `~/.config/bookshelf/config.toml`

use serde::{Deserialize, Serialize};

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// General settings
    pub general: GeneralConfig,

    /// Remote book API settings
    pub api: ApiConfig,

    /// Login settings
    pub auth: AuthConfig,

    /// Navigation access rules
    pub routes: RoutesConfig,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Log format: "text" or "json"
    pub log_format: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_format: "text".to_string(),
        }
    }
}

/// Remote book API configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL of the books API (no trailing slash needed)
    pub base_url: String,

    /// Per-request timeout in seconds (0 = no timeout)
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000/api/books".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Placeholder credential pair accepted by the static authenticator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub username: String,
    pub password: String,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            password: "1234".to_string(),
        }
    }
}

/// Route guard configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoutesConfig {
    /// Path prefixes reachable without a session
    pub public_paths: Vec<String>,

    /// Where unauthenticated navigation is sent
    pub login_path: String,

    /// Where authenticated visits to the login path are sent
    pub home_path: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            public_paths: vec!["/login".to_string()],
            login_path: "/login".to_string(),
            home_path: "/".to_string(),
        }
    }
}
