//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod definition;
mod pipeline;
mod property;
mod run;
mod trigger;

pub use definition::DefinitionCommands;
pub use pipeline::PipelineCommands;
pub use property::PropertyCommands;
pub use run::RunCommands;
pub use trigger::TriggerCommands;

use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Pipeline management
    Pipeline {
        #[command(subcommand)]
        command: PipelineCommands,
    },
    /// Pipeline run management
    Run {
        /// Pipeline ID
        #[arg(short, long)]
        pipeline: String,

        #[command(subcommand)]
        command: RunCommands,
    },
    /// Definition management
    Definition {
        /// Pipeline ID
        #[arg(short, long)]
        pipeline: String,

        #[command(subcommand)]
        command: DefinitionCommands,
    },
    /// Pipeline and trigger property management
    Property {
        /// Pipeline ID
        #[arg(short, long)]
        pipeline: String,

        /// Work on the properties of this trigger (ID or unambiguous prefix)
        #[arg(short, long)]
        trigger: Option<String>,

        #[command(subcommand)]
        command: PropertyCommands,
    },
    /// Trigger management
    Trigger {
        /// Pipeline ID
        #[arg(short, long)]
        pipeline: String,

        #[command(subcommand)]
        command: TriggerCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    let client = config.api_client()?;

    match command {
        Commands::Pipeline { command } => pipeline::handle_pipeline_command(command, &client).await,
        Commands::Run { pipeline, command } => {
            run::handle_run_command(command, &client, &pipeline).await
        }
        Commands::Definition { pipeline, command } => {
            definition::handle_definition_command(command, &client, &pipeline).await
        }
        Commands::Property {
            pipeline,
            trigger,
            command,
        } => property::handle_property_command(command, &client, &pipeline, trigger).await,
        Commands::Trigger { pipeline, command } => {
            trigger::handle_trigger_command(command, &client, &pipeline).await
        }
    }
}

/// Parse a single key=value pair
fn parse_key_val(s: &str) -> Result<(String, String)> {
    let pos = s
        .find('=')
        .ok_or_else(|| anyhow::anyhow!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Render an optional timestamp for display
fn format_time(time: Option<DateTime<Utc>>) -> String {
    time.map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "-".to_string())
}
