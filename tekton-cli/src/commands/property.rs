//! Property command handlers
//!
//! Every subcommand works on pipeline properties, or on the properties of
//! one trigger when `--trigger` is given.

use anyhow::Result;
use clap::Subcommand;
use colored::*;
use tekton_client::TektonPipelineClient;
use tekton_core::domain::property::{Property, PropertyType};
use tekton_core::dto::property::{ListProperties, PropertyPrototype};

use crate::id_resolver::resolve_trigger_id;
use crate::types::IdOrPrefix;

/// Property subcommands
#[derive(Subcommand)]
pub enum PropertyCommands {
    /// List properties
    List {
        /// Only properties of these types (comma-separated)
        #[arg(long = "type", value_delimiter = ',')]
        types: Vec<PropertyType>,

        /// Sort field; prefix with '-' for descending order
        #[arg(long)]
        sort: Option<String>,
    },
    /// Get a property
    Get {
        /// Property name
        name: String,
    },
    /// Create a property, or replace it if it already exists
    Set {
        /// Property name
        name: String,

        /// Property value
        value: String,

        /// Property type
        #[arg(long = "type", default_value = "text")]
        property_type: PropertyType,

        /// Lock the value so runs cannot override it (trigger properties only)
        #[arg(long)]
        locked: bool,
    },
    /// Delete a property
    Delete {
        /// Property name
        name: String,
    },
}

/// Handle property commands
pub async fn handle_property_command(
    command: PropertyCommands,
    client: &TektonPipelineClient,
    pipeline_id: &str,
    trigger: Option<String>,
) -> Result<()> {
    let scope = match trigger {
        Some(trigger) => Some(
            resolve_trigger_id(client, pipeline_id, &IdOrPrefix::parse(&trigger)).await?,
        ),
        None => None,
    };
    let scope = Scope {
        client,
        pipeline_id,
        trigger_id: scope.as_deref(),
    };

    match command {
        PropertyCommands::List { types, sort } => {
            let opts = ListProperties {
                name: None,
                types,
                sort,
            };
            let properties = scope.list(&opts).await?;

            if properties.is_empty() {
                println!("{}", "No properties found.".yellow());
            } else {
                println!(
                    "{}",
                    format!("Found {} propert(ies):", properties.len()).bold()
                );
                for property in &properties {
                    print_property(property);
                }
            }
            Ok(())
        }
        PropertyCommands::Get { name } => {
            print_property(&scope.get(&name).await?);
            Ok(())
        }
        PropertyCommands::Set {
            name,
            value,
            property_type,
            locked,
        } => {
            let mut req = PropertyPrototype::new(name, property_type, value);
            req.locked = locked.then_some(true);

            let property = scope.set(&req).await?;
            println!("{}", "✓ Property saved successfully!".green().bold());
            print_property(&property);
            Ok(())
        }
        PropertyCommands::Delete { name } => {
            scope.delete(&name).await?;
            println!(
                "{}",
                format!("✓ Property {} deleted successfully!", name)
                    .green()
                    .bold()
            );
            Ok(())
        }
    }
}

/// Pipeline or trigger whose properties are being managed
struct Scope<'a> {
    client: &'a TektonPipelineClient,
    pipeline_id: &'a str,
    trigger_id: Option<&'a str>,
}

impl Scope<'_> {
    async fn list(&self, opts: &ListProperties) -> Result<Vec<Property>> {
        let collection = match self.trigger_id {
            Some(trigger_id) => {
                self.client
                    .list_tekton_pipeline_trigger_properties(self.pipeline_id, trigger_id, opts)
                    .await?
            }
            None => {
                self.client
                    .list_tekton_pipeline_properties(self.pipeline_id, opts)
                    .await?
            }
        };
        Ok(collection.properties)
    }

    async fn get(&self, name: &str) -> Result<Property> {
        Ok(match self.trigger_id {
            Some(trigger_id) => {
                self.client
                    .get_tekton_pipeline_trigger_property(self.pipeline_id, trigger_id, name)
                    .await?
            }
            None => {
                self.client
                    .get_tekton_pipeline_property(self.pipeline_id, name)
                    .await?
            }
        })
    }

    /// Replace when the property exists, otherwise create it
    async fn set(&self, req: &PropertyPrototype) -> Result<Property> {
        let exists = match self.get(&req.name).await {
            Ok(_) => true,
            Err(e) if is_not_found(&e) => false,
            Err(e) => return Err(e),
        };

        Ok(match (self.trigger_id, exists) {
            (Some(trigger_id), true) => {
                self.client
                    .replace_tekton_pipeline_trigger_property(
                        self.pipeline_id,
                        trigger_id,
                        &req.name,
                        req,
                    )
                    .await?
            }
            (Some(trigger_id), false) => {
                self.client
                    .create_tekton_pipeline_trigger_property(self.pipeline_id, trigger_id, req)
                    .await?
            }
            (None, true) => {
                self.client
                    .replace_tekton_pipeline_property(self.pipeline_id, &req.name, req)
                    .await?
            }
            (None, false) => {
                self.client
                    .create_tekton_pipeline_property(self.pipeline_id, req)
                    .await?
            }
        })
    }

    async fn delete(&self, name: &str) -> Result<()> {
        match self.trigger_id {
            Some(trigger_id) => {
                self.client
                    .delete_tekton_pipeline_trigger_property(self.pipeline_id, trigger_id, name)
                    .await?
            }
            None => {
                self.client
                    .delete_tekton_pipeline_property(self.pipeline_id, name)
                    .await?
            }
        }
        Ok(())
    }
}

fn is_not_found(err: &anyhow::Error) -> bool {
    err.downcast_ref::<tekton_client::ClientError>()
        .is_some_and(|e| e.is_not_found())
}

fn print_property(property: &Property) {
    let kind = property
        .property_type
        .map(|t| t.to_string())
        .unwrap_or_default();
    let lock = if property.locked.unwrap_or(false) {
        " (locked)".yellow().to_string()
    } else {
        String::new()
    };

    println!(
        "  {} = {} {}{}",
        property.name.cyan(),
        property.value.as_deref().unwrap_or(""),
        format!("[{}]", kind).dimmed(),
        lock
    );
    if !property.options.is_empty() {
        println!("      options: {}", property.options.join(", ").dimmed());
    }
}
