//! Shared helpers for tests across the engine crate.

use std::path::PathBuf;
use tempfile::TempDir;

/// Create a temporary notebook directory for io tests.
pub fn create_test_notebook_dir() -> TempDir {
    TempDir::new().expect("failed to create temp dir")
}

/// Create a file (with any needed parent directories) inside a test notebook
/// directory.
pub fn create_test_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("failed to create parent dirs");
    }
    std::fs::write(&path, content).expect("failed to write test file");
    path
}
