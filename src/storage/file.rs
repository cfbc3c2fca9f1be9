//! JSON file credential store

use super::CredentialStore;
use crate::error::{BookshelfError, BookshelfResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const STORE_FILE: &str = "credentials.json";

/// Credential store backed by a single JSON object on disk
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Open (creating the directory if needed) a store under `dir`.
    ///
    /// Only a directory created here is made private; an existing one
    /// keeps its mode.
    pub fn open(dir: &Path) -> BookshelfResult<Self> {
        let created = !dir.exists();
        fs::create_dir_all(dir).map_err(|e| {
            BookshelfError::io(format!("creating state directory {}", dir.display()), e)
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if created {
                let perms = fs::Permissions::from_mode(0o700);
                fs::set_permissions(dir, perms)
                    .map_err(|e| BookshelfError::io("setting state dir permissions", e))?;
            }
        }
        #[cfg(not(unix))]
        let _ = created;

        Ok(Self {
            path: dir.join(STORE_FILE),
        })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> BookshelfResult<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            BookshelfError::io(format!("reading store file {}", self.path.display()), e)
        })?;

        serde_json::from_str(&content).map_err(|e| {
            BookshelfError::Storage(format!("corrupt store file {}: {}", self.path.display(), e))
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> BookshelfResult<()> {
        let content = serde_json::to_string_pretty(entries)?;

        fs::write(&self.path, content).map_err(|e| {
            BookshelfError::io(format!("writing store file {}", self.path.display()), e)
        })?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let perms = fs::Permissions::from_mode(0o600);
            fs::set_permissions(&self.path, perms)
                .map_err(|e| BookshelfError::io("setting store file permissions", e))?;
        }

        Ok(())
    }
}

impl CredentialStore for FileStore {
    fn get(&self, key: &str) -> BookshelfResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> BookshelfResult<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)?;
        debug!("Stored {} in {}", key, self.path.display());
        Ok(())
    }

    fn delete(&self, key: &str) -> BookshelfResult<()> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_all(&entries)?;
        debug!("Removed {} from {}", key, self.path.display());
        Ok(())
    }
}
