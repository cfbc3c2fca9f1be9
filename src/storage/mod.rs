//! Key-value storage for persisted credentials
//!
//! The session manager only sees the [`CredentialStore`] trait. `FileStore`
//! backs the CLI; `MemoryStore` serves tests and `--ephemeral` runs.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::BookshelfResult;

/// Key under which the session token is persisted
pub const AUTH_TOKEN_KEY: &str = "auth_token";

/// Synchronous string key-value store
pub trait CredentialStore: Send + Sync {
    /// Read a value, `None` if the key is absent
    fn get(&self, key: &str) -> BookshelfResult<Option<String>>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> BookshelfResult<()>;

    /// Remove a key. Removing an absent key is not an error.
    fn delete(&self, key: &str) -> BookshelfResult<()>;
}
