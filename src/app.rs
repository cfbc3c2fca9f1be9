//! Wiring of the session, library client and route guard

use crate::config::Config;
use crate::guard::{RouteGuard, RoutePolicy};
use crate::library::{LibraryClient, Transport};
use crate::session::{SessionManager, StaticAuthenticator};
use crate::storage::CredentialStore;
use std::sync::Arc;

/// The three core components, sharing one session
pub struct App {
    pub session: Arc<SessionManager>,
    pub library: LibraryClient,
    pub guard: RouteGuard,
}

impl App {
    /// Build the components and restore any persisted session
    pub fn new(
        config: &Config,
        store: Arc<dyn CredentialStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let session = Arc::new(SessionManager::new(
            store,
            Box::new(StaticAuthenticator::from_config(&config.auth)),
        ));
        session.load_credential();

        Self {
            library: LibraryClient::new(transport, session.clone(), config.api.base_url.as_str()),
            guard: RouteGuard::new(session.clone(), RoutePolicy::from_config(&config.routes)),
            session,
        }
    }
}
