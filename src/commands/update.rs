//! `slm update` — patch a tagged value or a bind's target.
use anyhow::Result;

use crate::cli::{GlobalOpts, UpdateCommand};
use crate::repository::{BindUpdate, LinkPatch};

/// Run an update subcommand.
///
/// # Errors
///
/// Returns an error if the value or bind does not exist or the
/// configuration cannot be persisted.
pub fn run(global: &GlobalOpts, cmd: &UpdateCommand) -> Result<()> {
    let (mut repo, _home) = super::open_repository(global)?;
    match cmd {
        UpdateCommand::Value {
            name,
            tag,
            new_tag,
            new_path,
        } => {
            let patch = LinkPatch {
                tag: new_tag.clone(),
                path: new_path.clone(),
            };
            let updated = repo.update_link_value(name, tag, &patch)?;
            tracing::info!("Updated {}:{} -> {}", updated.name, updated.tag, updated.path);
        }
        UpdateCommand::Bind {
            name,
            tag,
            target_name,
            target_tag,
            new_target,
            new_target_tag,
        } => {
            let updated = repo.update_bind(&BindUpdate {
                source_name: name.clone(),
                source_tag: tag.clone(),
                target_name: target_name.clone(),
                target_tag: target_tag.clone(),
                new_target_name: new_target.clone(),
                new_target_tag: new_target_tag.clone(),
            })?;
            tracing::info!(
                "Updated bind {name}:{tag} -> {}:{}",
                updated.target_name,
                updated.target_tag
            );
        }
    }
    Ok(())
}
