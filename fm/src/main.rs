mod cli;
mod commands;
mod error;
mod util;

use structopt::StructOpt;
use tracing::Level;

use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    let cli = Cli::from_iter(wild::args_os());

    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info(args) => commands::info(args)?,
        Commands::List(args) => commands::list(args)?,
        Commands::Validate(args) => {
            if commands::validate(args)? > 0 {
                std::process::exit(1);
            }
        }
        Commands::Export(args) => commands::export(args)?,
        Commands::Import(args) => commands::import(args)?,
        Commands::Rebuild(args) => commands::rebuild(args)?,
        Commands::Remove(args) => commands::remove(args)?,
    };

    Ok(())
}
