//! Definition endpoints

use reqwest::Method;
use tekton_core::domain::definition::{Definition, DefinitionsCollection};
use tekton_core::dto::definition::DefinitionPrototype;

use crate::error::Result;
use crate::{TektonPipelineClient, require};

impl TektonPipelineClient {
    // =============================================================================
    // Definition Management
    // =============================================================================

    /// List the definitions of a pipeline
    pub async fn list_tekton_pipeline_definitions(
        &self,
        pipeline_id: &str,
    ) -> Result<DefinitionsCollection> {
        require("pipeline_id", pipeline_id)?;

        let url = self.endpoint(&["tekton_pipelines", pipeline_id, "definitions"])?;
        let response = self.send(self.request(Method::GET, url)).await?;

        self.handle_response(response).await
    }

    /// Add a definition to a pipeline
    ///
    /// # Example
    /// ```no_run
    /// # use tekton_client::TektonPipelineClient;
    /// # use tekton_core::dto::definition::DefinitionPrototype;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = TektonPipelineClient::new("https://api.us-south.devops.cloud.ibm.com/pipeline/v2");
    /// let definition = client
    ///     .create_tekton_pipeline_definition(
    ///         "94619026-912b-4d92-8f51-6c74f0692d90",
    ///         &DefinitionPrototype::git_branch(
    ///             "https://github.com/open-toolchain/hello-tekton.git",
    ///             "master",
    ///             ".tekton",
    ///         ),
    ///     )
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_tekton_pipeline_definition(
        &self,
        pipeline_id: &str,
        req: &DefinitionPrototype,
    ) -> Result<Definition> {
        require("pipeline_id", pipeline_id)?;

        let url = self.endpoint(&["tekton_pipelines", pipeline_id, "definitions"])?;
        let response = self.send(self.request(Method::POST, url).json(req)).await?;

        self.handle_response(response).await
    }

    /// Get a definition by ID
    pub async fn get_tekton_pipeline_definition(
        &self,
        pipeline_id: &str,
        definition_id: &str,
    ) -> Result<Definition> {
        require("pipeline_id", pipeline_id)?;
        require("definition_id", definition_id)?;

        let url = self.endpoint(&["tekton_pipelines", pipeline_id, "definitions", definition_id])?;
        let response = self.send(self.request(Method::GET, url)).await?;

        self.handle_response(response).await
    }

    /// Replace the source of a definition
    pub async fn replace_tekton_pipeline_definition(
        &self,
        pipeline_id: &str,
        definition_id: &str,
        req: &DefinitionPrototype,
    ) -> Result<Definition> {
        require("pipeline_id", pipeline_id)?;
        require("definition_id", definition_id)?;

        let url = self.endpoint(&["tekton_pipelines", pipeline_id, "definitions", definition_id])?;
        let response = self.send(self.request(Method::PUT, url).json(req)).await?;

        self.handle_response(response).await
    }

    /// Remove a definition from a pipeline
    pub async fn delete_tekton_pipeline_definition(
        &self,
        pipeline_id: &str,
        definition_id: &str,
    ) -> Result<()> {
        require("pipeline_id", pipeline_id)?;
        require("definition_id", definition_id)?;

        let url = self.endpoint(&["tekton_pipelines", pipeline_id, "definitions", definition_id])?;
        let response = self.send(self.request(Method::DELETE, url)).await?;

        self.handle_empty_response(response).await
    }
}
