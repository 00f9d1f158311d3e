// Shared helpers for integration tests.
//
// Provides a temporary-directory-backed application home so each test
// runs against an isolated configuration and managed directory, the way
// a real invocation would against ~/.slm.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]
#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use slm::paths;
use slm::repository::Repository;
use slm::store::Link;

/// An isolated application home backed by a [`tempfile::TempDir`].
///
/// The directory is automatically deleted when dropped.
pub struct IntegrationTestContext {
    /// Temporary directory serving as the application home.
    pub home: tempfile::TempDir,
}

impl IntegrationTestContext {
    /// Create a new context with an empty home directory.
    pub fn new() -> Self {
        let home = tempfile::tempdir().expect("create temp dir");
        Self { home }
    }

    /// Path of the home directory.
    pub fn home_path(&self) -> &Path {
        self.home.path()
    }

    /// Path of the managed directory under this home.
    pub fn managed_dir(&self) -> PathBuf {
        paths::managed_dir(self.home.path())
    }

    /// Open a repository over this home, as one CLI invocation would.
    pub fn open_repo(&self) -> Repository {
        Repository::open(self.home.path()).expect("open repository")
    }

    /// Create a real directory under `<home>/test/<name>` to serve as a
    /// symlink target, and return its path as a string.
    pub fn prepare_target_dir(&self, name: &str) -> String {
        let target = self.home.path().join("test").join(name);
        std::fs::create_dir_all(&target).expect("create target dir");
        target.display().to_string()
    }

    /// Declare `name` and add one tagged value pointing at `path`.
    pub fn add_value(&self, repo: &mut Repository, name: &str, tag: &str, path: &str) {
        if !repo.is_declared(name) {
            repo.add_declaration(name).expect("declare link");
        }
        repo.add_link_value(Link::new(name, tag, path))
            .expect("add link value");
    }

    /// Read the managed symlink for `name` and return its target.
    pub fn read_managed_link(&self, name: &str) -> std::io::Result<PathBuf> {
        std::fs::read_link(self.managed_dir().join(name))
    }
}
