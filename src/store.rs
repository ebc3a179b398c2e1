//! Document storage.
//!
//! The reconciliation core never holds a long-lived reference to document
//! text; it takes a read-then-write snapshot per pass through the
//! [`DocumentStore`] trait. The vault-backed implementation resolves paths
//! under the vault root and replaces files atomically.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::lock::{write_atomic_str, FileLock, DEFAULT_LOCK_TIMEOUT_MS};

/// Read-then-write access to the documents of a vault.
pub trait DocumentStore: Send + Sync {
    /// Read the full text of a document.
    fn read(&self, path: &str) -> Result<String>;

    /// Replace the full text of a document in one write.
    fn replace(&self, path: &str, contents: &str) -> Result<()>;
}

/// Filesystem-backed store rooted at a vault directory.
#[derive(Debug, Clone)]
pub struct VaultStore {
    root: PathBuf,
}

impl VaultStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    fn lock_file(&self) -> PathBuf {
        self.root.join(".taskmark").join("lock")
    }
}

impl DocumentStore for VaultStore {
    fn read(&self, path: &str) -> Result<String> {
        let full = self.resolve(path);
        if !full.is_file() {
            return Err(Error::DocumentNotFound(path.to_string()));
        }
        Ok(fs::read_to_string(full)?)
    }

    fn replace(&self, path: &str, contents: &str) -> Result<()> {
        // One vault-level lock serializes writers across taskmark processes.
        let _lock = FileLock::acquire(self.lock_file(), DEFAULT_LOCK_TIMEOUT_MS)?;
        write_atomic_str(self.resolve(path), contents)
    }
}
