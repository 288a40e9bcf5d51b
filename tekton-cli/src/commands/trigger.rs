//! Trigger command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use tekton_client::TektonPipelineClient;
use tekton_core::domain::trigger::{Trigger, TriggerType};
use tekton_core::dto::trigger::{DuplicateTrigger, ListTriggers, TriggerPatch};

use crate::id_resolver::resolve_trigger_id;
use crate::types::IdOrPrefix;

/// Trigger subcommands
#[derive(Subcommand)]
pub enum TriggerCommands {
    /// List the triggers of the pipeline
    List {
        /// Only triggers of these types (comma-separated)
        #[arg(long = "type", value_delimiter = ',')]
        types: Vec<TriggerType>,

        /// Only triggers carrying any of these tags (comma-separated)
        #[arg(long, value_delimiter = ',')]
        tags: Vec<String>,

        /// Only disabled triggers
        #[arg(long, conflicts_with = "enabled")]
        disabled: bool,

        /// Only enabled triggers
        #[arg(long)]
        enabled: bool,
    },
    /// Get trigger details
    Get {
        /// Trigger ID or unambiguous prefix
        id: String,
    },
    /// Enable a trigger
    Enable {
        /// Trigger ID or unambiguous prefix
        id: String,
    },
    /// Disable a trigger
    Disable {
        /// Trigger ID or unambiguous prefix
        id: String,
    },
    /// Copy a trigger under a new name
    Duplicate {
        /// Trigger ID or unambiguous prefix
        id: String,

        /// Name of the copy
        #[arg(short, long)]
        name: String,
    },
    /// Delete a trigger
    Delete {
        /// Trigger ID or unambiguous prefix
        id: String,
    },
}

/// Handle trigger commands
pub async fn handle_trigger_command(
    command: TriggerCommands,
    client: &TektonPipelineClient,
    pipeline_id: &str,
) -> Result<()> {
    match command {
        TriggerCommands::List {
            types,
            tags,
            disabled,
            enabled,
        } => {
            let opts = ListTriggers {
                types,
                tags,
                disabled: match (disabled, enabled) {
                    (true, _) => Some(true),
                    (_, true) => Some(false),
                    _ => None,
                },
                ..Default::default()
            };
            list_triggers(client, pipeline_id, &opts).await
        }
        TriggerCommands::Get { id } => {
            let id = resolve(client, pipeline_id, &id).await?;
            let trigger = client.get_tekton_pipeline_trigger(pipeline_id, &id).await?;
            print_trigger_details(&trigger);
            Ok(())
        }
        TriggerCommands::Enable { id } => set_enabled(client, pipeline_id, &id, true).await,
        TriggerCommands::Disable { id } => set_enabled(client, pipeline_id, &id, false).await,
        TriggerCommands::Duplicate { id, name } => {
            let id = resolve(client, pipeline_id, &id).await?;
            let trigger = client
                .duplicate_tekton_pipeline_trigger(pipeline_id, &id, &DuplicateTrigger { name })
                .await?;
            println!("{}", "✓ Trigger duplicated successfully!".green().bold());
            print_trigger_summary(&trigger);
            Ok(())
        }
        TriggerCommands::Delete { id } => {
            let id = resolve(client, pipeline_id, &id).await?;
            client.delete_tekton_pipeline_trigger(pipeline_id, &id).await?;
            println!(
                "{}",
                format!("✓ Trigger {} deleted successfully!", id)
                    .green()
                    .bold()
            );
            Ok(())
        }
    }
}

async fn resolve(client: &TektonPipelineClient, pipeline_id: &str, id: &str) -> Result<String> {
    resolve_trigger_id(client, pipeline_id, &IdOrPrefix::parse(id)).await
}

async fn list_triggers(
    client: &TektonPipelineClient,
    pipeline_id: &str,
    opts: &ListTriggers,
) -> Result<()> {
    let triggers = client
        .list_tekton_pipeline_triggers(pipeline_id, opts)
        .await?
        .triggers;

    if triggers.is_empty() {
        println!("{}", "No triggers found.".yellow());
    } else {
        println!("{}", format!("Found {} trigger(s):", triggers.len()).bold());
        println!();
        for trigger in &triggers {
            print_trigger_summary(trigger);
        }
    }

    Ok(())
}

async fn set_enabled(
    client: &TektonPipelineClient,
    pipeline_id: &str,
    id: &str,
    enabled: bool,
) -> Result<()> {
    let id = resolve(client, pipeline_id, id).await?;
    let trigger = client
        .update_tekton_pipeline_trigger(pipeline_id, &id, &TriggerPatch::enabled(enabled))
        .await?;

    let verb = if enabled { "enabled" } else { "disabled" };
    println!(
        "{}",
        format!("✓ Trigger {} {}", trigger.name.as_deref().unwrap_or(&id), verb)
            .green()
            .bold()
    );

    Ok(())
}

/// Print a trigger summary
fn print_trigger_summary(trigger: &Trigger) {
    let state = if trigger.is_enabled() {
        "enabled".green()
    } else {
        "disabled".dimmed()
    };

    println!(
        "  {} {} {}",
        "▸".cyan(),
        trigger.name.as_deref().unwrap_or("(unnamed)").bold(),
        format!("[{}]", trigger.trigger_type).dimmed()
    );
    println!("    ID:     {}", trigger.id.dimmed());
    println!("    State:  {}", state);
    println!();
}

/// Print detailed trigger information
fn print_trigger_details(trigger: &Trigger) {
    println!("{}", "Trigger Details:".bold());
    println!("  ID:             {}", trigger.id.cyan());
    if let Some(name) = &trigger.name {
        println!("  Name:           {}", name.bold());
    }
    println!("  Type:           {}", trigger.trigger_type);
    println!("  Enabled:        {}", trigger.is_enabled());
    if let Some(listener) = &trigger.event_listener {
        println!("  Event listener: {}", listener);
    }
    if !trigger.tags.is_empty() {
        println!("  Tags:           {}", trigger.tags.join(", "));
    }
    if let Some(max) = trigger.max_concurrent_runs {
        println!("  Max runs:       {}", max);
    }

    match trigger.trigger_type {
        TriggerType::Scm => {
            if let Some(source) = &trigger.source {
                let props = &source.properties;
                println!("  Repository:     {}", props.url);
                if let Some(branch) = props.branch.as_ref().or(props.pattern.as_ref()) {
                    println!("  Branch:         {}", branch);
                }
            }
            if !trigger.events.is_empty() {
                let events: Vec<String> = trigger.events.iter().map(|e| e.to_string()).collect();
                println!("  Events:         {}", events.join(", "));
            }
        }
        TriggerType::Timer => {
            if let Some(cron) = &trigger.cron {
                println!(
                    "  Schedule:       {} ({})",
                    cron,
                    trigger.timezone.as_deref().unwrap_or("UTC")
                );
            }
        }
        TriggerType::Generic => {
            if let Some(url) = &trigger.webhook_url {
                println!("  Webhook:        {}", url.dimmed());
            }
        }
        TriggerType::Manual | TriggerType::Unknown => {}
    }
    if let Some(filter) = &trigger.filter {
        println!("  Filter:         {}", filter);
    }

    if !trigger.properties.is_empty() {
        println!("\n{}", "Properties:".bold());
        for property in &trigger.properties {
            println!(
                "  {} = {}",
                property.name.cyan(),
                property.value.as_deref().unwrap_or("")
            );
        }
    }
}
