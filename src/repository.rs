//! CRUD over declarations, tagged link values, and binds.
//!
//! The repository owns a [`Store`] and keeps its derived invariant: after
//! every mutation of the link values, the declared-name list equals the
//! distinct names appearing in the values, in first-seen order.  Every
//! mutator edits the in-memory snapshot and flushes the whole
//! configuration back — no partial writes.  Queries return owned copies.
//!
//! Identifiers are unique: duplicate declarations, `(name, tag)` values,
//! and binds are rejected at insert time with typed "already exists"
//! errors rather than silently accumulated.

use std::path::Path;

use crate::error::RepoError;
use crate::store::{BindItem, Binds, Link, Store};

/// Result of a [`Repository::delete_link`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedLinks {
    /// The link values that were removed.
    pub removed: Vec<Link>,
    /// Whether the declaration itself is now fully gone.
    pub declaration_removed: bool,
}

/// Partial update for a link value: `None` fields are left unchanged.
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    /// Replacement tag, if any.
    pub tag: Option<String>,
    /// Replacement path, if any.
    pub path: Option<String>,
}

/// Coordinates of a bind plus optional renames of its target.
#[derive(Debug, Clone)]
pub struct BindUpdate {
    /// Source declaration name of the bind to update.
    pub source_name: String,
    /// Source tag of the bind to update.
    pub source_tag: String,
    /// Current target declaration name.
    pub target_name: String,
    /// Current target tag.
    pub target_tag: String,
    /// Replacement target name, if any.
    pub new_target_name: Option<String>,
    /// Replacement target tag, if any.
    pub new_target_tag: Option<String>,
}

/// Repository over the persisted relational model.
#[derive(Debug)]
pub struct Repository {
    store: Store,
}

impl Repository {
    /// Open the repository for the given home directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the persisted configuration cannot be loaded.
    pub fn open(home: &Path) -> Result<Self, RepoError> {
        Ok(Self {
            store: Store::open(home)?,
        })
    }

    /// Wrap an already-opened store.
    #[must_use]
    pub const fn from_store(store: Store) -> Self {
        Self { store }
    }

    // -- declarations -------------------------------------------------------

    /// Declare a new link name.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::DeclarationAlreadyExists`] if `name` is
    /// already declared, or a storage error if the flush fails.
    pub fn add_declaration(&mut self, name: &str) -> Result<(), RepoError> {
        if self.is_declared(name) {
            return Err(RepoError::DeclarationAlreadyExists(name.to_string()));
        }
        self.store
            .config_mut()
            .declared_names
            .push(name.to_string());
        self.store.flush()?;
        Ok(())
    }

    /// All declared names, first-seen order.
    #[must_use]
    pub fn declared_names(&self) -> Vec<String> {
        self.store.config().declared_names.clone()
    }

    /// Whether `name` is currently declared.
    #[must_use]
    pub fn is_declared(&self, name: &str) -> bool {
        self.store
            .config()
            .declared_names
            .iter()
            .any(|n| n == name)
    }

    /// Rename a declaration, rewriting every matching link value and
    /// migrating its bind list to the new key.
    ///
    /// Bind lists are merged: items already keyed under `new` are kept
    /// and the migrated items appended after them.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::DeclarationNotFound`] if `old` is absent and
    /// [`RepoError::DeclarationAlreadyExists`] if `new` is already
    /// declared; in both cases state is unchanged.
    pub fn rename_declaration(&mut self, old: &str, new: &str) -> Result<(), RepoError> {
        if !self.is_declared(old) {
            return Err(RepoError::DeclarationNotFound(old.to_string()));
        }
        if self.is_declared(new) {
            return Err(RepoError::DeclarationAlreadyExists(new.to_string()));
        }
        let config = self.store.config_mut();
        for link in &mut config.links {
            if link.name == old {
                link.name = new.to_string();
            }
        }
        config.declared_names = rebuild_declared_names(&config.links);
        if let Some(migrated) = config.binds.remove(old) {
            config.binds.entry(new.to_string()).or_default().extend(migrated);
        }
        self.store.flush()?;
        Ok(())
    }

    // -- link values --------------------------------------------------------

    /// Add a tagged link value under an existing declaration.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::DeclarationNotFound`] if the value's name is
    /// not declared and [`RepoError::TagAlreadyExists`] if a value for
    /// the same `(name, tag)` pair is already present.
    pub fn add_link_value(&mut self, link: Link) -> Result<(), RepoError> {
        if !self.is_declared(&link.name) {
            return Err(RepoError::DeclarationNotFound(link.name));
        }
        if self.find_link_value(&link.name, &link.tag).is_some() {
            return Err(RepoError::TagAlreadyExists {
                name: link.name,
                tag: link.tag,
            });
        }
        self.store.config_mut().links.push(link);
        self.store.flush()?;
        Ok(())
    }

    /// Link values for `name`, or all values when `name` is `None`.
    #[must_use]
    pub fn link_values(&self, name: Option<&str>) -> Vec<Link> {
        let links = &self.store.config().links;
        name.map_or_else(
            || links.clone(),
            |name| links.iter().filter(|l| l.name == name).cloned().collect(),
        )
    }

    /// First link value matching `(name, tag)` exactly.
    #[must_use]
    pub fn find_link_value(&self, name: &str, tag: &str) -> Option<Link> {
        self.store
            .config()
            .links
            .iter()
            .find(|l| l.name == name && l.tag == tag)
            .cloned()
    }

    /// Update the exact `(name, tag)` value, applying only the `Some`
    /// fields of `patch`.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::TagNotFound`] if no value matches, and
    /// [`RepoError::TagAlreadyExists`] if the patch would re-tag the
    /// value onto a `(name, tag)` pair that already has one — renaming
    /// must not reintroduce duplicates.
    pub fn update_link_value(
        &mut self,
        name: &str,
        tag: &str,
        patch: &LinkPatch,
    ) -> Result<Link, RepoError> {
        if let Some(new_tag) = &patch.tag
            && new_tag != tag
            && self.find_link_value(name, new_tag).is_some()
        {
            return Err(RepoError::TagAlreadyExists {
                name: name.to_string(),
                tag: new_tag.clone(),
            });
        }
        let link = self
            .store
            .config_mut()
            .links
            .iter_mut()
            .find(|l| l.name == name && l.tag == tag)
            .ok_or_else(|| RepoError::TagNotFound {
                name: name.to_string(),
                tag: tag.to_string(),
            })?;
        if let Some(new_tag) = &patch.tag {
            link.tag = new_tag.clone();
        }
        if let Some(new_path) = &patch.path {
            link.path = new_path.clone();
        }
        let updated = link.clone();
        self.store.flush()?;
        Ok(updated)
    }

    /// Delete link values for `name`: all of them, or only those matching
    /// `tag` when given.  Recomputes the declared names from the
    /// survivors.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::DeclarationNotFound`] if `name` was never
    /// declared.
    pub fn delete_link(&mut self, name: &str, tag: Option<&str>) -> Result<DeletedLinks, RepoError> {
        if !self.is_declared(name) {
            return Err(RepoError::DeclarationNotFound(name.to_string()));
        }
        let config = self.store.config_mut();
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(config.links.len());
        for link in config.links.drain(..) {
            if link.name == name && tag.is_none_or(|t| link.tag == t) {
                removed.push(link);
            } else {
                kept.push(link);
            }
        }
        config.links = kept;
        config.declared_names = rebuild_declared_names(&config.links);
        let declaration_removed = !config.declared_names.iter().any(|n| n == name);
        self.store.flush()?;
        Ok(DeletedLinks {
            removed,
            declaration_removed,
        })
    }

    // -- binds --------------------------------------------------------------

    /// Register a bind: activating `(source_name, source_tag)` also
    /// activates `(target_name, target_tag)`.
    ///
    /// Neither endpoint is required to exist yet; a bind whose target
    /// never resolves is skipped during activation.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::BindAlreadyExists`] on an exact duplicate.
    pub fn add_bind(
        &mut self,
        source_name: &str,
        source_tag: &str,
        target_name: &str,
        target_tag: &str,
    ) -> Result<(), RepoError> {
        let item = BindItem {
            current_tag: source_tag.to_string(),
            target_name: target_name.to_string(),
            target_tag: target_tag.to_string(),
        };
        let config = self.store.config_mut();
        let list = config.binds.entry(source_name.to_string()).or_default();
        if list.contains(&item) {
            return Err(RepoError::BindAlreadyExists {
                source_name: source_name.to_string(),
                source_tag: source_tag.to_string(),
                target_name: target_name.to_string(),
                target_tag: target_tag.to_string(),
            });
        }
        list.push(item);
        self.store.flush()?;
        Ok(())
    }

    /// Binds keyed by `name` whose current tag equals `tag`.
    #[must_use]
    pub fn binds_for_source(&self, name: &str, tag: &str) -> Vec<BindItem> {
        self.store.config().binds.get(name).map_or_else(Vec::new, |items| {
            items
                .iter()
                .filter(|b| b.current_tag == tag)
                .cloned()
                .collect()
        })
    }

    /// Full bind adjacency copy.
    #[must_use]
    pub fn all_binds(&self) -> Binds {
        self.store.config().binds.clone()
    }

    /// Remove the first bind under `source_name` matching `item` exactly.
    /// Returns whether a removal occurred.  A source key whose list
    /// becomes empty is dropped.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the flush fails.
    pub fn delete_bind(&mut self, source_name: &str, item: &BindItem) -> Result<bool, RepoError> {
        let config = self.store.config_mut();
        let Some(list) = config.binds.get_mut(source_name) else {
            return Ok(false);
        };
        let Some(pos) = list.iter().position(|b| b == item) else {
            return Ok(false);
        };
        list.remove(pos);
        if list.is_empty() {
            config.binds.remove(source_name);
        }
        self.store.flush()?;
        Ok(true)
    }

    /// Update the bind identified by `update`'s source name and
    /// `(target_name, target_tag)`, applying the optional target renames.
    ///
    /// # Errors
    ///
    /// Returns [`RepoError::BindNotFound`] if no bind list exists for the
    /// source name or no item matches the target coordinates, and
    /// [`RepoError::BindAlreadyExists`] if the renames would make the
    /// bind identical to a sibling under the same source name.
    pub fn update_bind(&mut self, update: &BindUpdate) -> Result<BindItem, RepoError> {
        let not_found = || RepoError::BindNotFound {
            source_name: update.source_name.clone(),
            source_tag: update.source_tag.clone(),
        };
        let list = self
            .store
            .config_mut()
            .binds
            .get_mut(&update.source_name)
            .ok_or_else(not_found)?;
        let pos = list
            .iter()
            .position(|b| b.target_name == update.target_name && b.target_tag == update.target_tag)
            .ok_or_else(not_found)?;
        let existing = list.get(pos).cloned().ok_or_else(not_found)?;

        let mut updated = existing.clone();
        if let Some(new_name) = &update.new_target_name {
            updated.target_name = new_name.clone();
        }
        if let Some(new_tag) = &update.new_target_tag {
            updated.target_tag = new_tag.clone();
        }
        if updated != existing && list.contains(&updated) {
            return Err(RepoError::BindAlreadyExists {
                source_name: update.source_name.clone(),
                source_tag: updated.current_tag,
                target_name: updated.target_name,
                target_tag: updated.target_tag,
            });
        }
        if let Some(slot) = list.get_mut(pos) {
            *slot = updated.clone();
        }
        self.store.flush()?;
        Ok(updated)
    }
}

/// Distinct names appearing in `links`, first-seen order.
fn rebuild_declared_names(links: &[Link]) -> Vec<String> {
    let mut names = Vec::new();
    for link in links {
        if !names.iter().any(|n| n == &link.name) {
            names.push(link.name.clone());
        }
    }
    names
}
