//! neolink: command line client for Neo4j

use clap::Parser;
use neolink_cli::{commands, log_filter, Cli, Commands};
use tracing_subscriber::{fmt, prelude::*};

fn setup_logging(verbose: bool) {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(log_filter(verbose))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match cli.command {
        Commands::Run {
            statement,
            params,
            json,
            connection,
        } => {
            commands::run::run(&statement, &params, json, &connection).await?;
        }
        Commands::CreateNode {
            labels,
            props,
            json,
            connection,
        } => {
            commands::create_node::run(&labels, &props, json, &connection).await?;
        }
        Commands::About => {
            commands::about::run();
        }
    }

    Ok(())
}
