//! `slm remove` — delete link values or binds.
use anyhow::Result;

use crate::cli::{GlobalOpts, RemoveCommand};
use crate::store::BindItem;

/// Run a remove subcommand.
///
/// # Errors
///
/// Returns an error if the link name was never declared or the
/// configuration cannot be persisted.
pub fn run(global: &GlobalOpts, cmd: &RemoveCommand) -> Result<()> {
    let (mut repo, _home) = super::open_repository(global)?;
    match cmd {
        RemoveCommand::Link { name, tag } => {
            let result = repo.delete_link(name, tag.as_deref())?;
            for link in &result.removed {
                tracing::info!("Removed {}:{} -> {}", link.name, link.tag, link.path);
            }
            if result.declaration_removed {
                tracing::info!("Link '{name}' is fully removed");
            }
        }
        RemoveCommand::Bind {
            name,
            tag,
            target_name,
            target_tag,
        } => {
            let item = BindItem {
                current_tag: tag.clone(),
                target_name: target_name.clone(),
                target_tag: target_tag.clone(),
            };
            if repo.delete_bind(name, &item)? {
                tracing::info!("Removed bind {name}:{tag} -> {target_name}:{target_tag}");
            } else {
                tracing::warn!("No such bind: {name}:{tag} -> {target_name}:{target_tag}");
            }
        }
    }
    Ok(())
}
