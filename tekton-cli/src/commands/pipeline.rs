//! Pipeline command handlers
//!
//! Handles pipeline-level CLI commands: creating the pipeline for a
//! toolchain tool integration, viewing it, changing its settings and
//! deleting it.

use anyhow::{Result, bail};
use clap::Subcommand;
use colored::*;
use tekton_client::TektonPipelineClient;
use tekton_core::domain::ResourceRef;
use tekton_core::domain::pipeline::TektonPipeline;
use tekton_core::dto::pipeline::{CreateTektonPipeline, TektonPipelinePatch};

use super::format_time;

/// Pipeline subcommands
#[derive(Subcommand)]
pub enum PipelineCommands {
    /// Create the pipeline for a Tekton tool integration
    Create {
        /// ID of the pipeline tool integration in the toolchain
        id: String,

        /// Build number of the next run
        #[arg(long)]
        next_build_number: Option<i64>,

        /// Send run notifications to toolchain integrations
        #[arg(long)]
        enable_notifications: Option<bool>,

        /// Clone only the paths that the definitions need
        #[arg(long)]
        enable_partial_cloning: Option<bool>,

        /// Worker ID ("public" for IBM Managed workers)
        #[arg(long)]
        worker: Option<String>,
    },
    /// Get pipeline details
    Get {
        /// Pipeline ID
        id: String,
    },
    /// Change pipeline settings
    Update {
        /// Pipeline ID
        id: String,

        #[arg(long)]
        next_build_number: Option<i64>,

        #[arg(long)]
        enable_notifications: Option<bool>,

        #[arg(long)]
        enable_partial_cloning: Option<bool>,

        #[arg(long)]
        worker: Option<String>,
    },
    /// Delete a pipeline
    Delete {
        /// Pipeline ID
        id: String,
    },
}

/// Handle pipeline commands
pub async fn handle_pipeline_command(
    command: PipelineCommands,
    client: &TektonPipelineClient,
) -> Result<()> {
    match command {
        PipelineCommands::Create {
            id,
            next_build_number,
            enable_notifications,
            enable_partial_cloning,
            worker,
        } => {
            let req = CreateTektonPipeline {
                id,
                next_build_number,
                enable_notifications,
                enable_partial_cloning,
                worker: worker.map(|id| ResourceRef { id }),
            };
            create_pipeline(client, &req).await
        }
        PipelineCommands::Get { id } => get_pipeline(client, &id).await,
        PipelineCommands::Update {
            id,
            next_build_number,
            enable_notifications,
            enable_partial_cloning,
            worker,
        } => {
            let patch = TektonPipelinePatch {
                next_build_number,
                enable_notifications,
                enable_partial_cloning,
                worker: worker.map(|id| ResourceRef { id }),
            };
            update_pipeline(client, &id, &patch).await
        }
        PipelineCommands::Delete { id } => delete_pipeline(client, &id).await,
    }
}

async fn create_pipeline(client: &TektonPipelineClient, req: &CreateTektonPipeline) -> Result<()> {
    let pipeline = client.create_tekton_pipeline(req).await?;

    println!("{}", "✓ Pipeline created successfully!".green().bold());
    print_pipeline_details(&pipeline);

    Ok(())
}

async fn get_pipeline(client: &TektonPipelineClient, id: &str) -> Result<()> {
    let pipeline = client.get_tekton_pipeline(id).await?;

    print_pipeline_details(&pipeline);

    Ok(())
}

async fn update_pipeline(
    client: &TektonPipelineClient,
    id: &str,
    patch: &TektonPipelinePatch,
) -> Result<()> {
    if patch.is_empty() {
        bail!("Nothing to update; pass at least one setting");
    }

    let pipeline = client.update_tekton_pipeline(id, patch).await?;

    println!("{}", "✓ Pipeline updated successfully!".green().bold());
    print_pipeline_details(&pipeline);

    Ok(())
}

async fn delete_pipeline(client: &TektonPipelineClient, id: &str) -> Result<()> {
    client.delete_tekton_pipeline(id).await?;

    println!(
        "{}",
        format!("✓ Pipeline {} deleted successfully!", id)
            .green()
            .bold()
    );

    Ok(())
}

/// Print detailed pipeline information
fn print_pipeline_details(pipeline: &TektonPipeline) {
    println!("{}", "Pipeline Details:".bold());
    println!("  ID:            {}", pipeline.id.cyan());
    if let Some(name) = &pipeline.name {
        println!("  Name:          {}", name.bold());
    }
    if let Some(status) = pipeline.status {
        println!("  Status:        {}", status);
    }
    if let Some(toolchain) = &pipeline.toolchain {
        println!("  Toolchain:     {}", toolchain.id.dimmed());
    }
    if let Some(worker) = &pipeline.worker {
        println!(
            "  Worker:        {}",
            worker.name.as_deref().unwrap_or(&worker.id)
        );
    }
    if let Some(next) = pipeline.next_build_number {
        println!("  Next build:    {}", next);
    }
    println!("  Enabled:       {}", pipeline.enabled.unwrap_or(true));
    println!("  Created:       {}", format_time(pipeline.created_at));
    println!("  Updated:       {}", format_time(pipeline.updated_at));
    if let Some(runs_url) = &pipeline.runs_url {
        println!("  Runs:          {}", runs_url.dimmed());
    }

    println!(
        "\n{} {} definition(s), {} propert(ies), {} trigger(s)",
        "Contents:".bold(),
        pipeline.definitions.len(),
        pipeline.properties.len(),
        pipeline.triggers.len()
    );
}
