//! `slm add` — add a tagged path value under a declared link.
use anyhow::Result;

use crate::cli::{AddOpts, GlobalOpts};
use crate::store::Link;

/// Run the add command.
///
/// # Errors
///
/// Returns an error if the name is not declared, the `(name, tag)` pair
/// already has a value, or the configuration cannot be persisted.
pub fn run(global: &GlobalOpts, opts: &AddOpts) -> Result<()> {
    let (mut repo, _home) = super::open_repository(global)?;
    repo.add_link_value(Link::new(&opts.name, &opts.tag, &opts.path))?;
    tracing::info!("Added {}:{} -> {}", opts.name, opts.tag, opts.path);
    Ok(())
}
