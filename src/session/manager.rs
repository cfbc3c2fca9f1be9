//! Session lifecycle management

use crate::session::auth::Authenticator;
use crate::session::state::Session;
use crate::storage::{CredentialStore, AUTH_TOKEN_KEY};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

pub const LOGIN_PENDING: &str = "Signing in...";
pub const LOGIN_SUCCEEDED: &str = "Signed in successfully.";
pub const LOGIN_REJECTED: &str = "Invalid username or password.";
pub const LOGIN_FAILED: &str = "Sign-in failed.";

/// Owns the authentication state and keeps the persisted token in step.
///
/// Shared as `Arc<SessionManager>` with the library client and route guard,
/// which only read from it.
pub struct SessionManager {
    store: Arc<dyn CredentialStore>,
    authenticator: Box<dyn Authenticator>,
    session: RwLock<Session>,
}

impl SessionManager {
    /// Create an empty session manager over a store
    pub fn new(store: Arc<dyn CredentialStore>, authenticator: Box<dyn Authenticator>) -> Self {
        Self {
            store,
            authenticator,
            session: RwLock::new(Session::new()),
        }
    }

    /// Restore a persisted token, if any.
    ///
    /// A store read failure counts as "no token".
    pub fn load_credential(&self) {
        match self.store.get(AUTH_TOKEN_KEY) {
            Ok(Some(token)) if !token.is_empty() => {
                debug!("Restored persisted credential");
                self.set_credential(Some(token));
            }
            Ok(_) => debug!("No persisted credential"),
            Err(e) => warn!("Failed to read persisted credential: {}", e),
        }
    }

    /// Set the token and mirror it into the store.
    ///
    /// The store write is best-effort: a failure is logged and the
    /// in-memory session keeps the new value.
    pub fn set_credential(&self, token: Option<String>) {
        let token = token.filter(|t| !t.is_empty());

        let persisted = match &token {
            Some(t) => self.store.set(AUTH_TOKEN_KEY, t),
            None => self.store.delete(AUTH_TOKEN_KEY),
        };
        if let Err(e) = persisted {
            warn!("Failed to persist credential: {}", e);
        }

        self.session.write().set_token(token);
    }

    /// Attempt a login. Never fails; the outcome is the return value plus
    /// the session's status message.
    pub fn login(&self, username: &str, password: &str) -> bool {
        self.set_status(LOGIN_PENDING);

        match self.authenticator.authenticate(username, password) {
            Ok(Some(token)) => {
                self.set_credential(Some(token));
                self.set_status(LOGIN_SUCCEEDED);
                info!("Signed in as {}", username);
                true
            }
            Ok(None) => {
                self.set_status(LOGIN_REJECTED);
                info!("Rejected credentials for {}", username);
                false
            }
            Err(e) => {
                error!("Login error: {}", e);
                self.set_status(LOGIN_FAILED);
                false
            }
        }
    }

    /// Clear the in-memory and persisted token
    pub fn logout(&self) {
        self.set_credential(None);
        info!("Signed out");
    }

    /// Snapshot of the current session
    pub fn session(&self) -> Session {
        self.session.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().is_authenticated()
    }

    pub fn status_message(&self) -> Option<String> {
        self.session.read().status_message.clone()
    }

    /// `Authorization` header value for the current token
    pub fn authorization(&self) -> String {
        self.session.read().authorization()
    }

    fn set_status(&self, message: &str) {
        self.session.write().status_message = Some(message.to_string());
    }
}
