mod active;
mod cli;
mod commands;
mod config;
mod error;
mod github;
mod naming;
mod platform;
mod resolver;
mod store;
mod ui;
mod version;

use clap::Parser;
use cli::{Cli, Commands};
use config::Paths;

#[tokio::main]
async fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        ui::error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let paths = Paths::resolve()?;

    match cli.command {
        Commands::Install {
            version,
            latest,
            platform,
            architecture,
            flavour,
        } => {
            commands::install::run(&paths, version, latest, platform, architecture, flavour).await
        }
        Commands::List => commands::list::run(&paths),
        Commands::Current => commands::current::run(&paths),
        Commands::Uninstall {
            version,
            platform,
            architecture,
            flavour,
            force,
            unused,
        } => commands::uninstall::run(&paths, version, platform, architecture, flavour, force, unused),
    }
}
