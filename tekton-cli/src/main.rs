//! Tekton CLI
//!
//! Command-line interface for managing IBM Cloud Continuous Delivery Tekton
//! pipelines, their runs, definitions, properties and triggers.

mod commands;
mod config;
mod id_resolver;
mod types;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::{Config, Settings};
use tekton_client::DEFAULT_SERVICE_URL;
use tekton_client::config::{ENV_AUTH_TYPE, ENV_BEARER_TOKEN, ENV_TIMEOUT, ENV_URL};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tekton")]
#[command(about = "IBM Cloud Tekton Pipeline CLI", long_about = None)]
struct Cli {
    /// Tekton Pipeline service URL
    #[arg(long, global = true, env = ENV_URL, default_value = DEFAULT_SERVICE_URL)]
    service_url: String,

    /// Authentication scheme: "noauth" or "bearertoken" (default: bearertoken when a token is given)
    #[arg(long, global = true, env = ENV_AUTH_TYPE)]
    auth_type: Option<String>,

    /// IAM bearer token
    #[arg(long, global = true, env = ENV_BEARER_TOKEN, hide_env_values = true)]
    bearer_token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, env = ENV_TIMEOUT, default_value = "60")]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs on stderr, command output on stdout
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tekton_cli=info,tekton_client=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::new(Settings {
        service_url: cli.service_url,
        auth_type: cli.auth_type,
        bearer_token: cli.bearer_token,
        timeout_secs: cli.timeout,
    })?;

    handle_command(cli.command, &config).await
}
