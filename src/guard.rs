//! Navigation access control
//!
//! Every command is a navigation to a route. Before it runs, the guard
//! decides whether to let it through or send the user elsewhere.

use crate::config::schema::RoutesConfig;
use crate::session::SessionManager;
use std::sync::Arc;
use tracing::debug;

/// Outcome of a navigation check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Allow,
    Redirect(String),
}

/// Which routes are public and where redirects go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePolicy {
    /// Prefixes reachable without a session
    pub public_paths: Vec<String>,
    pub login_path: String,
    pub home_path: String,
}

impl RoutePolicy {
    pub fn from_config(config: &RoutesConfig) -> Self {
        Self {
            public_paths: config.public_paths.clone(),
            login_path: config.login_path.clone(),
            home_path: config.home_path.clone(),
        }
    }

    pub fn is_public(&self, target: &str) -> bool {
        self.public_paths
            .iter()
            .any(|prefix| target.starts_with(prefix.as_str()))
    }
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self::from_config(&RoutesConfig::default())
    }
}

/// Decide a navigation from the target path and authentication state
pub fn decide(target: &str, authenticated: bool, policy: &RoutePolicy) -> Navigation {
    if !authenticated && !policy.is_public(target) {
        return Navigation::Redirect(policy.login_path.clone());
    }

    // Signed-in users have no business on the login page
    if authenticated && target == policy.login_path {
        return Navigation::Redirect(policy.home_path.clone());
    }

    Navigation::Allow
}

/// Route guard bound to the shared session
pub struct RouteGuard {
    session: Arc<SessionManager>,
    policy: RoutePolicy,
}

impl RouteGuard {
    pub fn new(session: Arc<SessionManager>, policy: RoutePolicy) -> Self {
        Self { session, policy }
    }

    /// Check a navigation against the current session
    pub fn check(&self, target: &str) -> Navigation {
        let navigation = decide(target, self.session.is_authenticated(), &self.policy);
        debug!("Navigation to {}: {:?}", target, navigation);
        navigation
    }

    pub fn policy(&self) -> &RoutePolicy {
        &self.policy
    }
}
