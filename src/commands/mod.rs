//! Top-level subcommand orchestration.
//!
//! Each handler is a thin seam: resolve the home directory, open the
//! repository, call into the core, and report.  Typed core errors cross
//! this boundary as [`anyhow::Error`] via `?`.

pub mod add;
pub mod bind;
pub mod declare;
pub mod list;
pub mod remove;
pub mod rename;
pub mod update;
pub mod use_link;

use anyhow::Result;
use std::path::PathBuf;

use crate::cli::GlobalOpts;
use crate::paths;
use crate::repository::Repository;

/// Resolve the home directory and open the repository over it.
fn open_repository(global: &GlobalOpts) -> Result<(Repository, PathBuf)> {
    let home = paths::app_home(global.home.as_deref());
    let repo = Repository::open(&home)?;
    Ok((repo, home))
}
