//! Pipeline endpoints

use reqwest::Method;
use tekton_core::domain::pipeline::TektonPipeline;
use tekton_core::dto::pipeline::{CreateTektonPipeline, TektonPipelinePatch};

use crate::error::Result;
use crate::{TektonPipelineClient, require};

impl TektonPipelineClient {
    // =============================================================================
    // Pipeline Management
    // =============================================================================

    /// Create a Tekton pipeline for an existing toolchain tool integration
    ///
    /// # Arguments
    /// * `req` - The pipeline creation request; `id` is the tool integration ID
    ///
    /// # Returns
    /// The created pipeline
    ///
    /// # Example
    /// ```no_run
    /// # use tekton_client::TektonPipelineClient;
    /// # use tekton_core::dto::pipeline::CreateTektonPipeline;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = TektonPipelineClient::new("https://api.us-south.devops.cloud.ibm.com/pipeline/v2");
    /// let pipeline = client.create_tekton_pipeline(&CreateTektonPipeline {
    ///     id: "94619026-912b-4d92-8f51-6c74f0692d90".to_string(),
    ///     enable_notifications: Some(true),
    ///     ..Default::default()
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_tekton_pipeline(&self, req: &CreateTektonPipeline) -> Result<TektonPipeline> {
        require("id", &req.id)?;

        let url = self.endpoint(&["tekton_pipelines"])?;
        let response = self.send(self.request(Method::POST, url).json(req)).await?;

        self.handle_response(response).await
    }

    /// Get a pipeline by ID, including its definitions, properties and triggers
    pub async fn get_tekton_pipeline(&self, id: &str) -> Result<TektonPipeline> {
        require("id", id)?;

        let url = self.endpoint(&["tekton_pipelines", id])?;
        let response = self.send(self.request(Method::GET, url)).await?;

        self.handle_response(response).await
    }

    /// Update pipeline settings
    ///
    /// Only the fields set in `patch` are changed.
    pub async fn update_tekton_pipeline(
        &self,
        id: &str,
        patch: &TektonPipelinePatch,
    ) -> Result<TektonPipeline> {
        require("id", id)?;

        let url = self.endpoint(&["tekton_pipelines", id])?;
        let request = Self::merge_patch(self.request(Method::PATCH, url), patch)?;
        let response = self.send(request).await?;

        self.handle_response(response).await
    }

    /// Delete a pipeline
    ///
    /// The toolchain tool integration is left in place.
    pub async fn delete_tekton_pipeline(&self, id: &str) -> Result<()> {
        require("id", id)?;

        let url = self.endpoint(&["tekton_pipelines", id])?;
        let response = self.send(self.request(Method::DELETE, url)).await?;

        self.handle_empty_response(response).await
    }
}
