//! Pipeline run command handlers
//!
//! Handles listing, starting, inspecting and controlling the runs of a
//! pipeline, plus reading their step logs.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use serde_json::Value as JsonValue;
use tekton_client::TektonPipelineClient;
use tekton_core::domain::run::{PipelineRun, RunStatus};
use tekton_core::dto::run::{CancelPipelineRun, CreatePipelineRun, JsonMap, ListPipelineRuns};
use tracing::info;

use super::{format_time, parse_key_val};
use crate::id_resolver::resolve_run_id;
use crate::types::IdOrPrefix;

/// Run subcommands
#[derive(Subcommand)]
pub enum RunCommands {
    /// List runs, newest first
    List {
        /// Only runs with this status
        #[arg(long)]
        status: Option<RunStatus>,

        /// Only runs started by this trigger
        #[arg(long)]
        trigger: Option<String>,

        /// Page size
        #[arg(long)]
        limit: Option<i64>,

        /// Fetch every page instead of just the first
        #[arg(long)]
        all: bool,
    },
    /// Get run details
    Get {
        /// Run ID or unambiguous prefix
        id: String,

        /// Expand related resources (e.g. "definitions")
        #[arg(long)]
        includes: Option<String>,
    },
    /// Start a run from a manual trigger
    Start {
        /// Name of the trigger to run
        #[arg(short, long)]
        trigger: String,

        /// Description of the run
        #[arg(short, long)]
        description: Option<String>,

        /// Property overrides as key=value pairs (e.g., branch=main)
        #[arg(short, long, value_parser = parse_key_val)]
        param: Vec<(String, String)>,

        /// Secure property overrides as key=value pairs
        #[arg(long, value_parser = parse_key_val)]
        secure_param: Vec<(String, String)>,
    },
    /// Cancel a run
    Cancel {
        /// Run ID or unambiguous prefix
        id: String,

        /// Stop immediately without waiting for running steps
        #[arg(long)]
        force: bool,
    },
    /// Start a new run with the same settings as an earlier one
    Rerun {
        /// Run ID or unambiguous prefix
        id: String,
    },
    /// Delete a run
    Delete {
        /// Run ID or unambiguous prefix
        id: String,
    },
    /// Show the step logs of a run
    Logs {
        /// Run ID or unambiguous prefix
        id: String,

        /// Only show the log with this ID
        #[arg(long)]
        step: Option<String>,
    },
}

/// Handle run commands
pub async fn handle_run_command(
    command: RunCommands,
    client: &TektonPipelineClient,
    pipeline_id: &str,
) -> Result<()> {
    match command {
        RunCommands::List {
            status,
            trigger,
            limit,
            all,
        } => {
            let opts = ListPipelineRuns {
                start: None,
                limit,
                status,
                trigger_name: trigger,
            };
            list_runs(client, pipeline_id, opts, all).await
        }
        RunCommands::Get { id, includes } => {
            let id = resolve(client, pipeline_id, &id).await?;
            let run = client
                .get_tekton_pipeline_run(pipeline_id, &id, includes.as_deref())
                .await?;
            print_run_details(&run);
            Ok(())
        }
        RunCommands::Start {
            trigger,
            description,
            param,
            secure_param,
        } => start_run(client, pipeline_id, trigger, description, param, secure_param).await,
        RunCommands::Cancel { id, force } => {
            let id = resolve(client, pipeline_id, &id).await?;
            let req = CancelPipelineRun {
                force: force.then_some(true),
            };
            client.cancel_tekton_pipeline_run(pipeline_id, &id, &req).await?;
            println!("{}", format!("✓ Run {} cancelling", id).green().bold());
            Ok(())
        }
        RunCommands::Rerun { id } => {
            let id = resolve(client, pipeline_id, &id).await?;
            let run = client.rerun_tekton_pipeline_run(pipeline_id, &id).await?;
            println!("{}", "✓ Run restarted successfully!".green().bold());
            print_run_summary(&run);
            Ok(())
        }
        RunCommands::Delete { id } => {
            let id = resolve(client, pipeline_id, &id).await?;
            client.delete_tekton_pipeline_run(pipeline_id, &id).await?;
            println!(
                "{}",
                format!("✓ Run {} deleted successfully!", id).green().bold()
            );
            Ok(())
        }
        RunCommands::Logs { id, step } => show_logs(client, pipeline_id, &id, step).await,
    }
}

async fn resolve(client: &TektonPipelineClient, pipeline_id: &str, id: &str) -> Result<String> {
    resolve_run_id(client, pipeline_id, &IdOrPrefix::parse(id)).await
}

async fn list_runs(
    client: &TektonPipelineClient,
    pipeline_id: &str,
    opts: ListPipelineRuns,
    all: bool,
) -> Result<()> {
    let (runs, more) = if all {
        let runs = client.pipeline_runs_pager(pipeline_id, opts)?.all().await?;
        (runs, false)
    } else {
        let page = client.list_tekton_pipeline_runs(pipeline_id, &opts).await?;
        let more = page.next.is_some();
        (page.pipeline_runs, more)
    };

    if runs.is_empty() {
        println!("{}", "No runs found.".yellow());
        return Ok(());
    }

    println!("{}", format!("Found {} run(s):", runs.len()).bold());
    println!();
    for run in &runs {
        print_run_summary(run);
    }
    if more {
        println!("{}", "More runs available; pass --all to list them.".dimmed());
    }

    Ok(())
}

async fn start_run(
    client: &TektonPipelineClient,
    pipeline_id: &str,
    trigger: String,
    description: Option<String>,
    params: Vec<(String, String)>,
    secure_params: Vec<(String, String)>,
) -> Result<()> {
    let mut req = CreatePipelineRun::for_trigger(trigger);
    req.description = description;
    if let Some(run_trigger) = req.trigger.as_mut() {
        run_trigger.properties = to_json_map(params);
        run_trigger.secure_properties = to_json_map(secure_params);
    }

    let run = client
        .create_tekton_pipeline_run(pipeline_id, &req)
        .await
        .context("Failed to start pipeline run")?;
    info!("Started run {} on pipeline {}", run.id, pipeline_id);

    println!("{}", "✓ Run started successfully!".green().bold());
    print_run_summary(&run);

    Ok(())
}

async fn show_logs(
    client: &TektonPipelineClient,
    pipeline_id: &str,
    id: &str,
    step: Option<String>,
) -> Result<()> {
    let run_id = resolve(client, pipeline_id, id).await?;
    let logs = client
        .get_tekton_pipeline_run_logs(pipeline_id, &run_id)
        .await?
        .logs;

    let selected: Vec<_> = logs
        .iter()
        .filter(|log| step.as_deref().is_none_or(|s| log.id == s))
        .collect();

    if selected.is_empty() {
        println!("{}", "No logs found for this run.".yellow());
        return Ok(());
    }

    for log in selected {
        let content = client
            .get_tekton_pipeline_run_log_content(pipeline_id, &run_id, &log.id)
            .await?;

        println!(
            "{} {}",
            "▸".cyan(),
            log.name.as_deref().unwrap_or(&log.id).bold()
        );
        println!("{}", "─".repeat(80).dimmed());
        println!("{}", content.data);
        println!("{}", "─".repeat(80).dimmed());
    }

    Ok(())
}

/// Override values are always sent as JSON strings
fn to_json_map(pairs: Vec<(String, String)>) -> Option<JsonMap> {
    if pairs.is_empty() {
        return None;
    }
    Some(
        pairs
            .into_iter()
            .map(|(k, v)| (k, JsonValue::String(v)))
            .collect(),
    )
}

/// Print a run summary
fn print_run_summary(run: &PipelineRun) {
    println!("  {} Run {}", "▸".cyan(), run.id.dimmed());
    println!("    Status:   {}", colorize_status(run.status));
    if let Some(name) = run.trigger.as_ref().and_then(|t| t.name.as_deref()) {
        println!("    Trigger:  {}", name);
    }
    println!("    Created:  {}", format_time(run.created_at).dimmed());
    println!();
}

/// Print detailed run information
fn print_run_details(run: &PipelineRun) {
    println!("{}", "Run Details:".bold());
    println!("  ID:          {}", run.id.cyan());
    println!("  Status:      {}", colorize_status(run.status));
    if let Some(description) = &run.description {
        println!("  Description: {}", description);
    }
    if let Some(trigger) = &run.trigger {
        println!(
            "  Trigger:     {} ({})",
            trigger.name.as_deref().unwrap_or(&trigger.id),
            trigger.trigger_type
        );
    }
    if let Some(user) = &run.user_info {
        println!("  Started by:  {}", user.iam_id);
    }
    if let Some(worker) = &run.worker {
        println!(
            "  Worker:      {}",
            worker.name.as_deref().unwrap_or(&worker.id)
        );
    }
    println!("  Created:     {}", format_time(run.created_at));
    println!("  Updated:     {}", format_time(run.updated_at));
    if let Some(url) = &run.run_url {
        println!("  Dashboard:   {}", url.dimmed());
    }

    if !run.properties.is_empty() {
        println!("\n{}", "Properties:".bold());
        for property in &run.properties {
            println!(
                "  {} = {}",
                property.name.cyan(),
                property.value.as_deref().unwrap_or("")
            );
        }
    }

    if let Some(error) = &run.error_message {
        println!("\n{}", "Error:".bold());
        println!("{}", error.red());
    }
}

/// Colorize run status for display
fn colorize_status(status: Option<RunStatus>) -> ColoredString {
    let Some(status) = status else {
        return "-".dimmed();
    };
    let label = status.as_str();
    match status {
        RunStatus::Pending | RunStatus::Waiting | RunStatus::Queued => label.yellow(),
        RunStatus::Running => label.cyan(),
        RunStatus::Succeeded => label.green(),
        RunStatus::Failed | RunStatus::Error => label.red(),
        RunStatus::Cancelled | RunStatus::Cancelling | RunStatus::Unknown => label.dimmed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_json_map() {
        assert!(to_json_map(Vec::new()).is_none());

        let map = to_json_map(vec![("branch".into(), "main".into())]).unwrap();
        assert_eq!(map["branch"], JsonValue::String("main".into()));
    }
}
