//! Definition command handlers

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use tekton_client::TektonPipelineClient;
use tekton_core::domain::definition::Definition;
use tekton_core::dto::definition::DefinitionPrototype;

/// Definition subcommands
#[derive(Subcommand)]
pub enum DefinitionCommands {
    /// List the definitions of the pipeline
    List,
    /// Get definition details
    Get {
        /// Definition ID
        id: String,
    },
    /// Add a definition pointing at a git repository
    Create {
        /// Repository URL
        #[arg(long)]
        url: String,

        /// Branch to read the YAML from
        #[arg(long, conflicts_with = "tag", required_unless_present = "tag")]
        branch: Option<String>,

        /// Tag to read the YAML from
        #[arg(long)]
        tag: Option<String>,

        /// Directory holding the Tekton YAML
        #[arg(long, default_value = ".tekton")]
        path: String,
    },
    /// Remove a definition
    Delete {
        /// Definition ID
        id: String,
    },
}

/// Handle definition commands
pub async fn handle_definition_command(
    command: DefinitionCommands,
    client: &TektonPipelineClient,
    pipeline_id: &str,
) -> Result<()> {
    match command {
        DefinitionCommands::List => {
            let definitions = client
                .list_tekton_pipeline_definitions(pipeline_id)
                .await?
                .definitions;

            if definitions.is_empty() {
                println!("{}", "No definitions found.".yellow());
            } else {
                println!(
                    "{}",
                    format!("Found {} definition(s):", definitions.len()).bold()
                );
                println!();
                for definition in &definitions {
                    print_definition(definition);
                }
            }
            Ok(())
        }
        DefinitionCommands::Get { id } => {
            let definition = client
                .get_tekton_pipeline_definition(pipeline_id, &id)
                .await?;
            print_definition(&definition);
            Ok(())
        }
        DefinitionCommands::Create {
            url,
            branch,
            tag,
            path,
        } => {
            let req = match (branch, tag) {
                (_, Some(tag)) => DefinitionPrototype::git_tag(url, tag, path),
                (branch, None) => {
                    DefinitionPrototype::git_branch(url, branch.unwrap_or_default(), path)
                }
            };
            let definition = client
                .create_tekton_pipeline_definition(pipeline_id, &req)
                .await?;

            println!("{}", "✓ Definition created successfully!".green().bold());
            print_definition(&definition);
            Ok(())
        }
        DefinitionCommands::Delete { id } => {
            client
                .delete_tekton_pipeline_definition(pipeline_id, &id)
                .await?;
            println!(
                "{}",
                format!("✓ Definition {} deleted successfully!", id)
                    .green()
                    .bold()
            );
            Ok(())
        }
    }
}

fn print_definition(definition: &Definition) {
    let source = &definition.source.properties;
    println!("  {} {}", "▸".cyan(), definition.id.dimmed());
    println!("    Repository: {}", source.url);
    if let Some(git_ref) = definition.git_ref() {
        println!("    Ref:        {}", git_ref.bold());
    }
    println!("    Path:       {}", source.path);
    println!();
}
