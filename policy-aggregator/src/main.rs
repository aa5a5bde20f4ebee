use anyhow::Context;
use clap::{Parser, Subcommand};
use policy_aggregator::{server, AppConfig, PolicyAggregator};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "policy-aggregator", about = "Serves Bundestag, government and court activity as one JSON list")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Serve GET /api/policies (default)
    Serve {
        /// Address to bind, overrides POLICY_BIND
        #[arg(long)]
        bind: Option<SocketAddr>,
    },
    /// Aggregate once and print the JSON array to stdout
    Dump,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = AppConfig::from_env();

    if config.dip.api_key.is_none() {
        warn!("BUNDESTAG_API_KEY is not set; DIP items will be replaced by a diagnostic entry");
    }

    let aggregator = Arc::new(
        PolicyAggregator::from_config(&config).context("Failed to set up the HTTP client")?,
    );

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            info!("Starting policy aggregator with {} sources", aggregator.sources().len());
            server::serve(config.bind_addr, aggregator)
                .await
                .with_context(|| format!("Server on {} failed", config.bind_addr))?;
        }
        Command::Dump => {
            let items = aggregator.aggregate().await?;
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
    }

    info!("Policy aggregator finished");
    Ok(())
}
