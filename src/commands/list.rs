//! `slm list` — inspect declarations, values, binds, and live symlinks.
use anyhow::Result;

use crate::cli::{GlobalOpts, ListCommand};
use crate::{paths, query};

/// Run a list subcommand.  Listings are the command's product and go to
/// stdout directly.
///
/// # Errors
///
/// Returns an error if the configuration cannot be loaded or, for
/// `using`, the managed directory cannot be read.
#[allow(clippy::print_stdout)] // listings are this command's output, not logging
pub fn run(global: &GlobalOpts, cmd: &ListCommand) -> Result<()> {
    let (repo, home) = super::open_repository(global)?;
    match cmd {
        ListCommand::Names => {
            for name in repo.declared_names() {
                println!("{name}");
            }
        }
        ListCommand::Values { name } => {
            for link in repo.link_values(name.as_deref()) {
                println!("{}:{} -> {}", link.name, link.tag, link.path);
            }
        }
        ListCommand::Binds => {
            for (source, items) in repo.all_binds() {
                for item in items {
                    println!(
                        "{source}:{} -> {}:{}",
                        item.current_tag, item.target_name, item.target_tag
                    );
                }
            }
        }
        ListCommand::Using => {
            for using in query::list_using(&paths::managed_dir(&home))? {
                println!("{} -> {}", using.name, using.path.display());
            }
        }
    }
    Ok(())
}
