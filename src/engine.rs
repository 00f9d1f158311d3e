//! Activation engine.
//!
//! Activating a `(name, tag)` pair materializes the chosen link value as
//! a symlink in the managed directory and then follows the value's binds
//! depth-first, activating each resolvable downstream target.  The link
//! file is named after the *declaration*, not the tag, so activating a
//! different tag for the same name replaces the same file.
//!
//! Traversal threads a visited set of `(name, tag)` pairs; a pair reached
//! twice (a bind cycle, or two binds converging on one target) is
//! activated once and skipped afterwards.  Filesystem failures abort the
//! traversal with no rollback of links already created.

use anyhow::{Context as _, Result};
use std::collections::HashSet;
use std::path::Path;

use crate::error::RepoError;
use crate::repository::Repository;
use crate::store::Link;

/// Activate `(name, tag)` and every value reachable through its binds.
///
/// Returns the activated values in pre-order: each node first, then the
/// subtree of each of its binds in bind-list order.  Validation happens
/// before any filesystem change.
///
/// # Errors
///
/// Returns [`RepoError::TagNotFound`] if no link value matches
/// `(name, tag)`, or a filesystem error from directory creation or
/// symlink replacement.
pub fn activate(
    repo: &Repository,
    managed_dir: &Path,
    name: &str,
    tag: &str,
) -> Result<Vec<Link>> {
    let root = repo
        .find_link_value(name, tag)
        .ok_or_else(|| RepoError::TagNotFound {
            name: name.to_string(),
            tag: tag.to_string(),
        })?;

    let mut activated = Vec::new();
    let mut visited = HashSet::new();
    activate_value(repo, managed_dir, root, &mut activated, &mut visited)?;
    Ok(activated)
}

/// Activate one value and recurse into its binds.
fn activate_value(
    repo: &Repository,
    managed_dir: &Path,
    link: Link,
    activated: &mut Vec<Link>,
    visited: &mut HashSet<(String, String)>,
) -> Result<()> {
    if !visited.insert((link.name.clone(), link.tag.clone())) {
        tracing::debug!("already activated, skipping: {}:{}", link.name, link.tag);
        return Ok(());
    }

    ensure_managed_dir(managed_dir)?;

    let link_file = managed_dir.join(&link.name);
    if std::fs::read_link(&link_file).is_ok() {
        tracing::debug!("removing old link file: {}", link_file.display());
        std::fs::remove_file(&link_file)
            .with_context(|| format!("remove old link: {}", link_file.display()))?;
    }
    // The stored path is used verbatim; no normalization or resolution.
    create_symlink(Path::new(&link.path), &link_file)?;
    tracing::debug!("linked {} -> {}", link_file.display(), link.path);

    let binds = repo.binds_for_source(&link.name, &link.tag);
    activated.push(link);

    for bind in binds {
        let Some(target) = repo.find_link_value(&bind.target_name, &bind.target_tag) else {
            // Dangling binds are tolerated: the target may be declared later.
            tracing::debug!(
                "bind target {}:{} does not resolve, skipping",
                bind.target_name,
                bind.target_tag
            );
            continue;
        };
        activate_value(repo, managed_dir, target, activated, visited)?;
    }
    Ok(())
}

/// Create the managed directory if missing, mode `0o755` on Unix.
fn ensure_managed_dir(managed_dir: &Path) -> Result<()> {
    if managed_dir.is_dir() {
        return Ok(());
    }
    tracing::debug!("creating managed directory: {}", managed_dir.display());
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt as _;
        std::fs::DirBuilder::new()
            .recursive(true)
            .mode(0o755)
            .create(managed_dir)
            .with_context(|| format!("create managed dir: {}", managed_dir.display()))?;
    }
    #[cfg(not(unix))]
    {
        std::fs::create_dir_all(managed_dir)
            .with_context(|| format!("create managed dir: {}", managed_dir.display()))?;
    }
    Ok(())
}

/// Create a symlink at `link` pointing to `target`.
fn create_symlink(target: &Path, link: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        std::os::unix::fs::symlink(target, link).with_context(|| {
            format!(
                "creating symlink {} -> {}",
                link.display(),
                target.display()
            )
        })?;
    }

    #[cfg(windows)]
    {
        let result = if target.is_dir() {
            std::os::windows::fs::symlink_dir(target, link)
        } else {
            std::os::windows::fs::symlink_file(target, link)
        };
        result.with_context(|| {
            format!(
                "creating symlink {} -> {}",
                link.display(),
                target.display()
            )
        })?;
    }

    Ok(())
}
