//! Authentication state

use serde::{Deserialize, Serialize};

/// Session status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Unauthenticated,
    Authenticated,
}

/// Session record
///
/// `authenticated` always equals "token is present and non-empty"; the only
/// way to change either is [`Session::set_token`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque credential token
    token: Option<String>,

    /// Derived from `token`
    authenticated: bool,

    /// Outcome of the last login attempt, for display
    pub status_message: Option<String>,
}

impl Session {
    /// Create an empty, unauthenticated session
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the token, normalizing an empty string to absent
    pub(crate) fn set_token(&mut self, token: Option<String>) {
        self.token = token.filter(|t| !t.is_empty());
        self.authenticated = self.token.is_some();
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn status(&self) -> SessionStatus {
        if self.authenticated {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Unauthenticated
        }
    }

    /// Value of the `Authorization` header for API calls
    ///
    /// An absent token still yields a header; the server decides whether
    /// to reject it.
    pub fn authorization(&self) -> String {
        format!("Basic {}", self.token.as_deref().unwrap_or_default())
    }
}
