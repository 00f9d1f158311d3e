//! Command-line argument definitions.

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the symbolic link manager.
#[derive(Parser, Debug)]
#[command(
    name = "slm",
    about = "Manage named symlinks with tagged path variants and bind propagation",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by every subcommand.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Override the application home directory (default: $SLM_HOME or ~/.slm)
    #[arg(long, global = true)]
    pub home: Option<std::path::PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Declare a new link name
    Declare(DeclareOpts),
    /// Add a tagged path value under a declared link
    Add(AddOpts),
    /// Register a bind: activating one tagged value also activates another
    Bind(BindOpts),
    /// Activate a tagged value, creating its symlink and following binds
    Use(UseOpts),
    /// List declared names, tagged values, binds, or live symlinks
    #[command(subcommand)]
    List(ListCommand),
    /// Rename a link declaration
    Rename(RenameOpts),
    /// Remove a link (all tags or one) or a bind
    #[command(subcommand)]
    Remove(RemoveCommand),
    /// Update a tagged value or a bind
    #[command(subcommand)]
    Update(UpdateCommand),
    /// Print version information
    Version,
}

/// Options for `slm declare`.
#[derive(Parser, Debug, Clone)]
pub struct DeclareOpts {
    /// Link name to declare
    pub name: String,
}

/// Options for `slm add`.
#[derive(Parser, Debug, Clone)]
pub struct AddOpts {
    /// Declared link name
    pub name: String,
    /// Tag identifying this value
    pub tag: String,
    /// Path the symlink will point at (stored verbatim)
    pub path: String,
}

/// Options for `slm bind`.
#[derive(Parser, Debug, Clone)]
pub struct BindOpts {
    /// Source link name
    pub name: String,
    /// Source tag that triggers the bind
    pub tag: String,
    /// Target link name to activate downstream
    pub target_name: String,
    /// Target tag to activate downstream
    pub target_tag: String,
}

/// Options for `slm use`.
#[derive(Parser, Debug, Clone)]
pub struct UseOpts {
    /// Declared link name
    pub name: String,
    /// Tag to activate
    pub tag: String,
}

/// Subcommands of `slm list`.
#[derive(Subcommand, Debug)]
pub enum ListCommand {
    /// List declared link names
    Names,
    /// List tagged values, optionally restricted to one name
    Values {
        /// Restrict to this link name
        name: Option<String>,
    },
    /// List all registered binds
    Binds,
    /// List live symlinks in the managed directory
    Using,
}

/// Options for `slm rename`.
#[derive(Parser, Debug, Clone)]
pub struct RenameOpts {
    /// Current declaration name
    pub old: String,
    /// New declaration name
    pub new: String,
}

/// Subcommands of `slm remove`.
#[derive(Subcommand, Debug)]
pub enum RemoveCommand {
    /// Remove a link's values: all of them, or one tag
    Link {
        /// Declared link name
        name: String,
        /// Remove only the value with this tag
        #[arg(long)]
        tag: Option<String>,
    },
    /// Remove a bind by exact match
    Bind {
        /// Source link name
        name: String,
        /// Source tag
        tag: String,
        /// Target link name
        target_name: String,
        /// Target tag
        target_tag: String,
    },
}

/// Subcommands of `slm update`.
#[derive(Subcommand, Debug)]
pub enum UpdateCommand {
    /// Update a tagged value's tag and/or path
    Value {
        /// Declared link name
        name: String,
        /// Tag of the value to update
        tag: String,
        /// New tag
        #[arg(long)]
        new_tag: Option<String>,
        /// New path
        #[arg(long)]
        new_path: Option<String>,
    },
    /// Update a bind's target coordinates
    Bind {
        /// Source link name
        name: String,
        /// Source tag
        tag: String,
        /// Current target link name
        target_name: String,
        /// Current target tag
        target_tag: String,
        /// New target link name
        #[arg(long)]
        new_target: Option<String>,
        /// New target tag
        #[arg(long)]
        new_target_tag: Option<String>,
    },
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_declare() {
        let cli = Cli::parse_from(["slm", "declare", "editor"]);
        assert!(matches!(cli.command, Command::Declare(opts) if opts.name == "editor"));
    }

    #[test]
    fn parse_add() {
        let cli = Cli::parse_from(["slm", "add", "editor", "stable", "/opt/editor-1.0"]);
        let Command::Add(opts) = cli.command else {
            panic!("expected Add command");
        };
        assert_eq!(opts.name, "editor");
        assert_eq!(opts.tag, "stable");
        assert_eq!(opts.path, "/opt/editor-1.0");
    }

    #[test]
    fn parse_bind() {
        let cli = Cli::parse_from(["slm", "bind", "jdk", "17", "maven", "3.9"]);
        let Command::Bind(opts) = cli.command else {
            panic!("expected Bind command");
        };
        assert_eq!(opts.name, "jdk");
        assert_eq!(opts.target_tag, "3.9");
    }

    #[test]
    fn parse_use() {
        let cli = Cli::parse_from(["slm", "use", "editor", "beta"]);
        let Command::Use(opts) = cli.command else {
            panic!("expected Use command");
        };
        assert_eq!(opts.name, "editor");
        assert_eq!(opts.tag, "beta");
    }

    #[test]
    fn parse_list_values_with_optional_name() {
        let cli = Cli::parse_from(["slm", "list", "values"]);
        assert!(matches!(cli.command, Command::List(ListCommand::Values { name: None })));

        let cli = Cli::parse_from(["slm", "list", "values", "editor"]);
        assert!(
            matches!(cli.command, Command::List(ListCommand::Values { name: Some(n) }) if n == "editor")
        );
    }

    #[test]
    fn parse_list_using() {
        let cli = Cli::parse_from(["slm", "list", "using"]);
        assert!(matches!(cli.command, Command::List(ListCommand::Using)));
    }

    #[test]
    fn parse_rename() {
        let cli = Cli::parse_from(["slm", "rename", "jdk", "java"]);
        let Command::Rename(opts) = cli.command else {
            panic!("expected Rename command");
        };
        assert_eq!(opts.old, "jdk");
        assert_eq!(opts.new, "java");
    }

    #[test]
    fn parse_remove_link_with_tag_flag() {
        let cli = Cli::parse_from(["slm", "remove", "link", "jdk", "--tag", "17"]);
        let Command::Remove(RemoveCommand::Link { name, tag }) = cli.command else {
            panic!("expected Remove Link command");
        };
        assert_eq!(name, "jdk");
        assert_eq!(tag, Some("17".to_string()));
    }

    #[test]
    fn parse_remove_link_without_tag() {
        let cli = Cli::parse_from(["slm", "remove", "link", "jdk"]);
        assert!(matches!(
            cli.command,
            Command::Remove(RemoveCommand::Link { tag: None, .. })
        ));
    }

    #[test]
    fn parse_remove_bind() {
        let cli = Cli::parse_from(["slm", "remove", "bind", "jdk", "17", "maven", "3.9"]);
        assert!(matches!(cli.command, Command::Remove(RemoveCommand::Bind { .. })));
    }

    #[test]
    fn parse_update_value() {
        let cli = Cli::parse_from([
            "slm", "update", "value", "jdk", "17", "--new-path", "/opt/jdk17.1",
        ]);
        let Command::Update(UpdateCommand::Value {
            new_tag, new_path, ..
        }) = cli.command
        else {
            panic!("expected Update Value command");
        };
        assert_eq!(new_tag, None);
        assert_eq!(new_path, Some("/opt/jdk17.1".to_string()));
    }

    #[test]
    fn parse_update_bind() {
        let cli = Cli::parse_from([
            "slm",
            "update",
            "bind",
            "jdk",
            "17",
            "maven",
            "3.9",
            "--new-target-tag",
            "4.0",
        ]);
        let Command::Update(UpdateCommand::Bind { new_target_tag, .. }) = cli.command else {
            panic!("expected Update Bind command");
        };
        assert_eq!(new_target_tag, Some("4.0".to_string()));
    }

    #[test]
    fn parse_home_override() {
        let cli = Cli::parse_from(["slm", "--home", "/tmp/slm", "list", "names"]);
        assert_eq!(cli.global.home, Some(std::path::PathBuf::from("/tmp/slm")));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["slm", "-v", "list", "names"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["slm", "version"]);
        assert!(matches!(cli.command, Command::Version));
    }
}
