use std::fs;
use std::path::{Path, PathBuf};

use taskmark::index::VaultIndex;
use taskmark::store::VaultStore;
use tempfile::TempDir;

pub struct TestVault {
    dir: TempDir,
}

#[allow(dead_code)]
impl TestVault {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create tempdir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn write_doc(&self, rel_path: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dirs");
        }
        fs::write(&path, contents).expect("write document");
        path
    }

    pub fn read_doc(&self, rel_path: &str) -> String {
        fs::read_to_string(self.dir.path().join(rel_path)).expect("read document")
    }

    pub fn store(&self) -> VaultStore {
        VaultStore::new(self.dir.path())
    }

    pub fn index(&self) -> VaultIndex {
        VaultIndex::new(self.dir.path())
    }
}
