//! Credential verification and token issuance

use crate::config::schema::AuthConfig;
use crate::error::BookshelfResult;
use base64::{engine::GeneralPurpose, Engine as _};

const BASE64_ENGINE: GeneralPurpose = base64::engine::general_purpose::STANDARD;

/// Verifies a username/password pair and issues a session token
pub trait Authenticator: Send + Sync {
    /// `Ok(Some(token))` on success, `Ok(None)` when the credentials are
    /// wrong, `Err` when verification itself could not be carried out.
    fn authenticate(&self, username: &str, password: &str) -> BookshelfResult<Option<String>>;
}

/// Accepts a single configured credential pair.
///
/// The token is `base64(username:password)`, which is reversible and only
/// stands in until the books API offers a login endpoint.
#[derive(Debug, Clone)]
pub struct StaticAuthenticator {
    username: String,
    password: String,
}

impl StaticAuthenticator {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(config.username.clone(), config.password.clone())
    }
}

impl Default for StaticAuthenticator {
    fn default() -> Self {
        Self::from_config(&AuthConfig::default())
    }
}

impl Authenticator for StaticAuthenticator {
    fn authenticate(&self, username: &str, password: &str) -> BookshelfResult<Option<String>> {
        if username != self.username || password != self.password {
            return Ok(None);
        }
        Ok(Some(encode_token(username, password)))
    }
}

/// Encode a credential pair the way the books API expects in `Basic` auth
pub fn encode_token(username: &str, password: &str) -> String {
    BASE64_ENGINE.encode(format!("{username}:{password}"))
}
