mod commands;
mod terminal;

use commands::{CommandLine, Commands, hosts, normalize, sync, watch};
use terminal::{logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();
    logging::init(commands.verbose, commands.quiet)?;

    let quiet = commands.quiet;
    let config = commands.config.as_path();

    match commands.command {
        Commands::Sync { json } => {
            if !json {
                print::banner(quiet);
            }
            sync::sync(config, json, quiet).await
        }
        Commands::Watch { interval } => {
            print::banner(quiet);
            print::header("watching sources", quiet);
            watch::watch(config, interval, quiet).await
        }
        Commands::Hosts { status } => hosts::hosts(config, status.map(Into::into), quiet).await,
        Commands::Normalize { macs } => normalize::normalize(&macs),
    }
}
