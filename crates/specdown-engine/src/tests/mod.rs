use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::store::MemoryStore;

/// Create a temporary directory to back a `DirStore`
pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().unwrap()
}

/// Create a file (and any parent directories) inside the test directory
pub fn create_test_file(dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let file_path = dir.path().join(relative);
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&file_path, content).unwrap();
    file_path
}

/// Build an in-memory store from `(path, content)` pairs
pub fn store(files: &[(&str, &str)]) -> MemoryStore {
    MemoryStore::from_files(files.iter().copied()).unwrap()
}
