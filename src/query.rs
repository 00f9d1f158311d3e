//! Query layer: report which managed symlinks currently exist.

use anyhow::{Context as _, Result};
use std::path::{Path, PathBuf};

/// A live entry in the managed directory: the declaration name and the
/// target its symlink currently points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsingLink {
    /// Declaration name (the link file's name).
    pub name: String,
    /// Current symlink target.
    pub path: PathBuf,
}

/// List the managed directory's entries that are readable symlinks.
///
/// Entries that fail to resolve as a symlink (regular files, broken
/// permissions) are logged at debug and skipped.  Order follows the
/// directory listing order.
///
/// # Errors
///
/// Returns an error if the managed directory itself cannot be read.
pub fn list_using(managed_dir: &Path) -> Result<Vec<UsingLink>> {
    tracing::debug!("searching {}", managed_dir.display());
    let entries = std::fs::read_dir(managed_dir)
        .with_context(|| format!("read managed dir: {}", managed_dir.display()))?;

    let mut result = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("read managed dir entry: {}", managed_dir.display()))?;
        let Ok(target) = std::fs::read_link(entry.path()) else {
            tracing::debug!("not a readable symlink, skipping {:?}", entry.file_name());
            continue;
        };
        result.push(UsingLink {
            name: entry.file_name().to_string_lossy().into_owned(),
            path: target,
        });
    }
    Ok(result)
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn missing_managed_dir_is_an_error() {
        let home = tempfile::tempdir().unwrap();
        assert!(list_using(&home.path().join("app")).is_err());
    }

    #[test]
    fn empty_managed_dir_lists_nothing() {
        let home = tempfile::tempdir().unwrap();
        let managed = home.path().join("app");
        std::fs::create_dir_all(&managed).unwrap();
        assert!(list_using(&managed).unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn lists_symlinks_with_their_targets() {
        let home = tempfile::tempdir().unwrap();
        let managed = home.path().join("app");
        std::fs::create_dir_all(&managed).unwrap();
        std::os::unix::fs::symlink("/opt/editor-1.0", managed.join("editor")).unwrap();

        let using = list_using(&managed).unwrap();
        assert_eq!(
            using,
            vec![UsingLink {
                name: "editor".to_string(),
                path: PathBuf::from("/opt/editor-1.0"),
            }]
        );
    }

    #[cfg(unix)]
    #[test]
    fn non_symlink_entries_are_skipped() {
        let home = tempfile::tempdir().unwrap();
        let managed = home.path().join("app");
        std::fs::create_dir_all(&managed).unwrap();
        std::fs::write(managed.join("regular.txt"), b"data").unwrap();
        std::os::unix::fs::symlink("/p/a", managed.join("a")).unwrap();

        let using = list_using(&managed).unwrap();
        assert_eq!(using.len(), 1);
        assert_eq!(using[0].name, "a");
    }

    #[cfg(unix)]
    #[test]
    fn broken_symlinks_are_still_reported() {
        let home = tempfile::tempdir().unwrap();
        let managed = home.path().join("app");
        std::fs::create_dir_all(&managed).unwrap();
        // read_link succeeds even when the target does not exist
        std::os::unix::fs::symlink("/does/not/exist", managed.join("dangling")).unwrap();

        let using = list_using(&managed).unwrap();
        assert_eq!(using.len(), 1);
        assert_eq!(using[0].path, PathBuf::from("/does/not/exist"));
    }
}
