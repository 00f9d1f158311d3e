//! `slm declare` — declare a new link name.
use anyhow::Result;

use crate::cli::{DeclareOpts, GlobalOpts};

/// Run the declare command.
///
/// # Errors
///
/// Returns an error if the name is already declared or the
/// configuration cannot be persisted.
pub fn run(global: &GlobalOpts, opts: &DeclareOpts) -> Result<()> {
    let (mut repo, _home) = super::open_repository(global)?;
    repo.add_declaration(&opts.name)?;
    tracing::info!("Declared link '{}'", opts.name);
    Ok(())
}
