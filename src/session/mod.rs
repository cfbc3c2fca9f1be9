//! Session management module

pub mod auth;
pub mod manager;
pub mod state;

pub use auth::{Authenticator, StaticAuthenticator};
pub use manager::SessionManager;
pub use state::{Session, SessionStatus};
