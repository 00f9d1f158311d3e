//! Persisted configuration store.
//!
//! The whole configuration is one JSON document, read and written as a
//! unit.  A [`Store`] is an explicit handle owning the home directory
//! path and an in-memory snapshot; there is no process-global cache, so
//! every store (and therefore every test) is isolated.  Mutators in the
//! repository layer edit the snapshot and call [`Store::flush`] to
//! persist it — all-or-nothing, never a partial write.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::paths;

/// One concrete target for a declaration: a `(name, tag, path)` triple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Declaration name this value belongs to.
    #[serde(rename = "Name")]
    pub name: String,
    /// Variant identifier distinguishing values sharing a name.
    #[serde(rename = "Tag")]
    pub tag: String,
    /// Filesystem path the managed symlink will point at, stored verbatim.
    #[serde(rename = "Path")]
    pub path: String,
}

impl Link {
    /// Create a new link value.
    #[must_use]
    pub fn new(name: &str, tag: &str, path: &str) -> Self {
        Self {
            name: name.to_string(),
            tag: tag.to_string(),
            path: path.to_string(),
        }
    }
}

/// A directed propagation rule grouped under its source declaration name:
/// activating `(source, current_tag)` also activates
/// `(target_name, target_tag)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindItem {
    /// Source tag that triggers this bind when activated.
    #[serde(rename = "CurrentTag")]
    pub current_tag: String,
    /// Declaration name to activate downstream.
    #[serde(rename = "TargetName")]
    pub target_name: String,
    /// Tag to activate on the target declaration.
    #[serde(rename = "TargetTag")]
    pub target_tag: String,
}

/// Bind adjacency: source declaration name to its outgoing bind items.
pub type Binds = BTreeMap<String, Vec<BindItem>>;

/// The full persisted configuration.
///
/// `declared_names` is kept in first-seen order and, after every
/// mutation of `links`, equals the distinct names appearing in `links`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    /// Declared link names, first-seen order.
    #[serde(rename = "DeclaredLinkNames", default)]
    pub declared_names: Vec<String>,
    /// All tagged link values.
    #[serde(rename = "Links", default)]
    pub links: Vec<Link>,
    /// Bind adjacency keyed by source declaration name.
    #[serde(rename = "Binds", default)]
    pub binds: Binds,
}

/// Handle over the persisted configuration: home directory plus an
/// in-memory snapshot.
#[derive(Debug)]
pub struct Store {
    config_path: PathBuf,
    snapshot: Configuration,
}

impl Store {
    /// Open the store for `home`, loading the configuration snapshot.
    ///
    /// A missing or empty configuration file yields an empty
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if an existing file cannot be read or
    /// parsed.
    pub fn open(home: &Path) -> Result<Self, StorageError> {
        let config_path = paths::config_path(home);
        let snapshot = read_configuration(&config_path)?;
        Ok(Self {
            config_path,
            snapshot,
        })
    }

    /// The current in-memory snapshot.
    #[must_use]
    pub const fn config(&self) -> &Configuration {
        &self.snapshot
    }

    /// Mutable access to the snapshot.  Callers must [`flush`](Self::flush)
    /// afterwards to persist their edits.
    pub const fn config_mut(&mut self) -> &mut Configuration {
        &mut self.snapshot
    }

    /// Discard the snapshot and re-read it from disk.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file cannot be read or parsed.
    pub fn reload(&mut self) -> Result<(), StorageError> {
        self.snapshot = read_configuration(&self.config_path)?;
        Ok(())
    }

    /// Persist the whole snapshot back to disk.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if serialization or the write fails.
    pub fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                path: self.config_path.display().to_string(),
                source,
            })?;
        }
        let content =
            serde_json::to_vec(&self.snapshot).map_err(|source| StorageError::Serialize {
                path: self.config_path.display().to_string(),
                source,
            })?;
        write_with_mode(&self.config_path, &content).map_err(|source| StorageError::Write {
            path: self.config_path.display().to_string(),
            source,
        })
    }
}

/// Read `path` into a [`Configuration`].  Missing and zero-length files
/// both mean an empty configuration.
fn read_configuration(path: &Path) -> Result<Configuration, StorageError> {
    let content = match std::fs::read(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(Configuration::default());
        }
        Err(source) => {
            return Err(StorageError::Read {
                path: path.display().to_string(),
                source,
            });
        }
    };
    if content.is_empty() {
        return Ok(Configuration::default());
    }
    serde_json::from_slice(&content).map_err(|source| StorageError::Parse {
        path: path.display().to_string(),
        source,
    })
}

/// Write the file with mode `0o664` on Unix (owner/group rw, other r).
fn write_with_mode(path: &Path, content: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, content)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o664))?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn open_missing_file_yields_empty_configuration() {
        let home = tempfile::tempdir().unwrap();
        let store = Store::open(home.path()).unwrap();
        assert!(store.config().declared_names.is_empty());
        assert!(store.config().links.is_empty());
        assert!(store.config().binds.is_empty());
    }

    #[test]
    fn open_empty_file_yields_empty_configuration() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(paths::config_path(home.path()), b"").unwrap();
        let store = Store::open(home.path()).unwrap();
        assert_eq!(store.config(), &Configuration::default());
    }

    #[test]
    fn open_rejects_invalid_json() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(paths::config_path(home.path()), b"{not json").unwrap();
        let err = Store::open(home.path()).unwrap_err();
        assert!(matches!(err, StorageError::Parse { .. }));
    }

    #[test]
    fn flush_then_reopen_round_trips() {
        let home = tempfile::tempdir().unwrap();
        let mut store = Store::open(home.path()).unwrap();
        store.config_mut().declared_names.push("editor".to_string());
        store
            .config_mut()
            .links
            .push(Link::new("editor", "stable", "/opt/editor-1.0"));
        store.config_mut().binds.insert(
            "editor".to_string(),
            vec![BindItem {
                current_tag: "stable".to_string(),
                target_name: "plugin".to_string(),
                target_tag: "v1".to_string(),
            }],
        );
        store.flush().unwrap();

        let reopened = Store::open(home.path()).unwrap();
        assert_eq!(reopened.config(), store.config());
    }

    #[test]
    fn wire_format_uses_original_field_names() {
        let home = tempfile::tempdir().unwrap();
        let mut store = Store::open(home.path()).unwrap();
        store.config_mut().declared_names.push("jdk".to_string());
        store.config_mut().links.push(Link::new("jdk", "17", "/opt/jdk17"));
        store.flush().unwrap();

        let raw = std::fs::read_to_string(paths::config_path(home.path())).unwrap();
        assert!(raw.contains("\"DeclaredLinkNames\""));
        assert!(raw.contains("\"Links\""));
        assert!(raw.contains("\"Binds\""));
        assert!(raw.contains("\"Name\":\"jdk\""));
        assert!(raw.contains("\"Tag\":\"17\""));
        assert!(raw.contains("\"Path\":\"/opt/jdk17\""));
    }

    #[test]
    fn parses_externally_written_configuration() {
        let home = tempfile::tempdir().unwrap();
        let raw = r#"{
            "DeclaredLinkNames": ["node"],
            "Links": [{"Name": "node", "Tag": "lts", "Path": "/opt/node-22"}],
            "Binds": {"node": [{"CurrentTag": "lts", "TargetName": "npm", "TargetTag": "10"}]}
        }"#;
        std::fs::write(paths::config_path(home.path()), raw).unwrap();

        let store = Store::open(home.path()).unwrap();
        assert_eq!(store.config().declared_names, vec!["node".to_string()]);
        assert_eq!(store.config().links[0], Link::new("node", "lts", "/opt/node-22"));
        let binds = store.config().binds.get("node").unwrap();
        assert_eq!(binds[0].current_tag, "lts");
        assert_eq!(binds[0].target_name, "npm");
        assert_eq!(binds[0].target_tag, "10");
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let home = tempfile::tempdir().unwrap();
        std::fs::write(paths::config_path(home.path()), b"{}").unwrap();
        let store = Store::open(home.path()).unwrap();
        assert_eq!(store.config(), &Configuration::default());
    }

    #[test]
    fn reload_discards_in_memory_edits() {
        let home = tempfile::tempdir().unwrap();
        let mut store = Store::open(home.path()).unwrap();
        store.config_mut().declared_names.push("scratch".to_string());
        store.reload().unwrap();
        assert!(store.config().declared_names.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn flush_sets_config_file_mode() {
        use std::os::unix::fs::PermissionsExt as _;
        let home = tempfile::tempdir().unwrap();
        let store = Store::open(home.path()).unwrap();
        store.flush().unwrap();
        let mode = std::fs::metadata(paths::config_path(home.path()))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o664);
    }
}
