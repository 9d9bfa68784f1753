//! Shared test utilities for binstage tests.
#![allow(dead_code)]

use binstage::Config;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test environment with a mock build tree and an empty destination.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Mock compiler output tree (source of binaries)
    pub build: PathBuf,
    /// Flat staging directory (destination)
    pub bin: PathBuf,
}

impl TestEnv {
    /// Create a new test environment with temporary directories.
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let build = temp_dir.path().join("target/debug");
        let bin = temp_dir.path().join("bin");

        fs::create_dir_all(&build).expect("Failed to create build dir");
        fs::create_dir_all(&bin).expect("Failed to create bin dir");

        Self {
            _temp_dir: temp_dir,
            build,
            bin,
        }
    }

    /// Config using the default allow-list over this environment.
    pub fn config(&self) -> Config {
        Config::new(&self.build, &self.bin, &["init", "hello_world", "sh"])
    }
}

/// Create a mock executable at `root/rel` with the given content.
pub fn create_mock_binary(root: &Path, rel: &str, content: &[u8]) -> PathBuf {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir for binary");
    }
    fs::write(&path, content).expect("Failed to create mock binary");

    let mut perms = fs::metadata(&path).expect("Failed to get metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).expect("Failed to set permissions");
    path
}

/// Sorted file names directly inside `dir`.
pub fn list_dir(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read dir")
        .map(|e| e.expect("Failed to read entry").file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

/// Assert that a file has exactly the expected bytes.
pub fn assert_file_bytes(path: &Path, expected: &[u8]) {
    let content = fs::read(path).unwrap_or_else(|e| panic!("Failed to read {}: {}", path.display(), e));
    assert_eq!(
        content,
        expected,
        "File {} has unexpected content",
        path.display()
    );
}

/// Assert that a file exists.
pub fn assert_file_exists(path: &Path) {
    assert!(
        path.exists(),
        "Expected file to exist: {}",
        path.display()
    );
}

/// Assert that a path does not exist.
pub fn assert_missing(path: &Path) {
    assert!(
        !path.exists(),
        "Expected path to be absent: {}",
        path.display()
    );
}
