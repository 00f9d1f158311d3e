//! `slm rename` — rename a link declaration.
use anyhow::Result;

use crate::cli::{GlobalOpts, RenameOpts};

/// Run the rename command.
///
/// # Errors
///
/// Returns an error if the old name is not declared, the new name
/// already is, or the configuration cannot be persisted.
pub fn run(global: &GlobalOpts, opts: &RenameOpts) -> Result<()> {
    let (mut repo, _home) = super::open_repository(global)?;
    repo.rename_declaration(&opts.old, &opts.new)?;
    tracing::info!("Renamed link '{}' to '{}'", opts.old, opts.new);
    Ok(())
}
