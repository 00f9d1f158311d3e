//! `slm bind` — register a propagation rule between tagged values.
use anyhow::Result;

use crate::cli::{BindOpts, GlobalOpts};

/// Run the bind command.
///
/// # Errors
///
/// Returns an error if an identical bind already exists or the
/// configuration cannot be persisted.
pub fn run(global: &GlobalOpts, opts: &BindOpts) -> Result<()> {
    let (mut repo, _home) = super::open_repository(global)?;
    repo.add_bind(&opts.name, &opts.tag, &opts.target_name, &opts.target_tag)?;
    tracing::info!(
        "Bound {}:{} -> {}:{}",
        opts.name,
        opts.tag,
        opts.target_name,
        opts.target_tag
    );
    Ok(())
}
