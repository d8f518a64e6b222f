//! snapshot-gateway - command-line access to the snapshot storage gateway

#![allow(missing_docs)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::json;
use snapshot_gateway::utils::logging::{init_logging, redact_signed_url};
use snapshot_gateway::{
    AccessTier, Config, GatewayMode, GatewayRegistry, SnapshotService, StorageGateway,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Parser)]
#[command(name = "snapshot-gateway", version, about = "Query snapshot collections and issue signed download links")]
struct Cli {
    /// YAML configuration file; environment variables override it
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Override the gateway selection mode (production, mock, auto)
    #[arg(long)]
    mode: Option<GatewayMode>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List collections with snapshot counts and sizes
    Collections,
    /// List the snapshots of one collection, newest first
    Snapshots {
        /// Collection id
        collection: String,
    },
    /// Issue a signed download URL
    Url {
        /// Collection id
        collection: String,
        /// Snapshot file name
        file: String,
        /// Access tier (free, premium, unlimited)
        #[arg(long, default_value = "free")]
        tier: AccessTier,
    },
    /// Probe the origin and report the selected gateway
    Health,
    /// Print the selected gateway's metrics
    Metrics,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file_and_env(path)
            .await
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::from_env().context("loading configuration from environment")?,
    };
    if let Some(mode) = cli.mode {
        config.registry.mode = mode;
    }
    Ok(config)
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = load_config(&cli).await?;
    init_logging(&config.logging)?;
    debug!("Effective configuration: {:?}", config);

    let registry = Arc::new(GatewayRegistry::new(config));
    let gateway = registry
        .initialize()
        .await
        .context("resolving storage gateway")?;
    let service = SnapshotService::new(registry.clone());

    match cli.command {
        Command::Collections => print_json(&service.list_collections().await?),
        Command::Snapshots { collection } => print_json(&service.list_snapshots(&collection).await?),
        Command::Url {
            collection,
            file,
            tier,
        } => {
            let link = service.build_download_link(&collection, &file, tier).await?;
            debug!("Issued {}", redact_signed_url(&link.url));
            print_json(&link)
        }
        Command::Health => {
            let healthy = gateway.health_check().await;
            print_json(&json!({
                "gateway": gateway.name(),
                "healthy": healthy,
                "selection": registry.selection(),
            }))
        }
        Command::Metrics => print_json(&json!({
            "gateway": gateway.name(),
            "selection": registry.selection(),
            "metrics": gateway.metrics(),
        })),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env file is fine
    dotenvy::dotenv().ok();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
