//! In-memory credential store

use super::CredentialStore;
use crate::error::BookshelfResult;
use parking_lot::Mutex;
use std::collections::HashMap;

/// Credential store that lives only as long as the process
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CredentialStore for MemoryStore {
    fn get(&self, key: &str) -> BookshelfResult<Option<String>> {
        Ok(self.entries.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> BookshelfResult<()> {
        self.entries
            .lock()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&self, key: &str) -> BookshelfResult<()> {
        self.entries.lock().remove(key);
        Ok(())
    }
}
