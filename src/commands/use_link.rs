//! `slm use` — activate a tagged value and everything its binds reach.
use anyhow::Result;

use crate::cli::{GlobalOpts, UseOpts};
use crate::{engine, paths};

/// Run the use command.
///
/// # Errors
///
/// Returns an error if no value matches `(name, tag)` or a symlink
/// cannot be created.
pub fn run(global: &GlobalOpts, opts: &UseOpts) -> Result<()> {
    let (repo, home) = super::open_repository(global)?;
    let managed = paths::managed_dir(&home);
    let activated = engine::activate(&repo, &managed, &opts.name, &opts.tag)?;
    for link in &activated {
        tracing::info!("Using {}:{} -> {}", link.name, link.tag, link.path);
    }
    Ok(())
}
