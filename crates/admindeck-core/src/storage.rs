//! Key-value local storage backed by one file per key.
//!
//! This is the persistence layer for the session token, the serialized user
//! profile, and UI preferences. Reads and writes are synchronous and atomic
//! at the granularity of a single key (write-to-temp then rename).

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::debug;

/// Storage key for the opaque session token.
pub const TOKEN_KEY: &str = "token";

/// Storage key for the serialized user profile.
pub const USER_KEY: &str = "user";

/// Storage key for the sidebar collapse preference ("true"/"false").
pub const SIDEBAR_COLLAPSED_KEY: &str = "sidebar_collapsed";

/// String-keyed persistent storage rooted at a single directory.
/// Clone is cheap - only the root path is copied.
#[derive(Debug, Clone)]
pub struct Storage {
    dir: PathBuf,
}

impl Storage {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Read the value for a key. Missing or unreadable keys are `None`.
    pub fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.key_path(key)).ok()
    }

    /// Write the value for a key, creating the storage directory if needed.
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        std::fs::create_dir_all(&self.dir)
            .context("Failed to create storage directory")?;

        // Temp-then-rename so readers never observe a partial write
        let path = self.key_path(key);
        let tmp = self.dir.join(format!(".{}.tmp", key));
        std::fs::write(&tmp, value)
            .with_context(|| format!("Failed to write storage key '{}'", key))?;
        std::fs::rename(&tmp, &path)
            .with_context(|| format!("Failed to commit storage key '{}'", key))?;

        debug!(key, "Storage key written");
        Ok(())
    }

    /// Remove a key. Removing an absent key is a no-op.
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.key_path(key);
        if path.exists() {
            std::fs::remove_file(&path)
                .with_context(|| format!("Failed to remove storage key '{}'", key))?;
            debug!(key, "Storage key removed");
        }
        Ok(())
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.dir.join(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_storage() -> (tempfile::TempDir, Storage) {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let storage = Storage::new(dir.path().to_path_buf());
        (dir, storage)
    }

    #[test]
    fn test_get_missing_key() {
        let (_dir, storage) = temp_storage();
        assert_eq!(storage.get("nope"), None);
    }

    #[test]
    fn test_set_then_get() {
        let (_dir, storage) = temp_storage();
        storage.set(TOKEN_KEY, "abc123").unwrap();
        assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("abc123"));
    }

    #[test]
    fn test_set_overwrites() {
        let (_dir, storage) = temp_storage();
        storage.set(SIDEBAR_COLLAPSED_KEY, "true").unwrap();
        storage.set(SIDEBAR_COLLAPSED_KEY, "false").unwrap();
        assert_eq!(storage.get(SIDEBAR_COLLAPSED_KEY).as_deref(), Some("false"));
    }

    #[test]
    fn test_remove_is_idempotent() {
        let (_dir, storage) = temp_storage();
        storage.set(USER_KEY, "{}").unwrap();
        storage.remove(USER_KEY).unwrap();
        assert_eq!(storage.get(USER_KEY), None);
        // Second removal of an absent key still succeeds
        storage.remove(USER_KEY).unwrap();
    }

    #[test]
    fn test_keys_are_independent() {
        let (_dir, storage) = temp_storage();
        storage.set(TOKEN_KEY, "abc123").unwrap();
        storage.set(USER_KEY, r#"{"username":"alice"}"#).unwrap();
        storage.remove(TOKEN_KEY).unwrap();
        assert_eq!(storage.get(TOKEN_KEY), None);
        assert_eq!(storage.get(USER_KEY).as_deref(), Some(r#"{"username":"alice"}"#));
    }
}
