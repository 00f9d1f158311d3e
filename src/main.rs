//! Binary entry point for `slm`.
use anyhow::Result;
use clap::Parser;

use slm::{cli, commands, logging};

#[allow(clippy::print_stdout)] // version output goes to stdout
fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    logging::init_subscriber(args.verbose);

    match args.command {
        cli::Command::Declare(opts) => commands::declare::run(&args.global, &opts),
        cli::Command::Add(opts) => commands::add::run(&args.global, &opts),
        cli::Command::Bind(opts) => commands::bind::run(&args.global, &opts),
        cli::Command::Use(opts) => commands::use_link::run(&args.global, &opts),
        cli::Command::List(cmd) => commands::list::run(&args.global, &cmd),
        cli::Command::Rename(opts) => commands::rename::run(&args.global, &opts),
        cli::Command::Remove(cmd) => commands::remove::run(&args.global, &cmd),
        cli::Command::Update(cmd) => commands::update::run(&args.global, &cmd),
        cli::Command::Version => {
            let version = option_env!("SLM_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"));
            println!("slm {version}");
            Ok(())
        }
    }
}
