//! Trigger endpoints

use reqwest::Method;
use tekton_core::domain::trigger::{Trigger, TriggerType, TriggersCollection};
use tekton_core::dto::QueryParams;
use tekton_core::dto::trigger::{DuplicateTrigger, ListTriggers, TriggerPatch, TriggerPrototype};

use crate::error::{ClientError, Result};
use crate::{TektonPipelineClient, require};

impl TektonPipelineClient {
    // =============================================================================
    // Trigger Management
    // =============================================================================

    /// List the triggers of a pipeline
    pub async fn list_tekton_pipeline_triggers(
        &self,
        pipeline_id: &str,
        opts: &ListTriggers,
    ) -> Result<TriggersCollection> {
        require("pipeline_id", pipeline_id)?;

        let url = self.endpoint(&["tekton_pipelines", pipeline_id, "triggers"])?;
        let request = self
            .request(Method::GET, url)
            .query(&opts.query_pairs());
        let response = self.send(request).await?;

        self.handle_response(response).await
    }

    /// Add a trigger to a pipeline
    ///
    /// # Example
    /// ```no_run
    /// # use tekton_client::TektonPipelineClient;
    /// # use tekton_core::dto::trigger::TriggerPrototype;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = TektonPipelineClient::new("https://api.us-south.devops.cloud.ibm.com/pipeline/v2");
    /// let trigger = client
    ///     .create_tekton_pipeline_trigger(
    ///         "94619026-912b-4d92-8f51-6c74f0692d90",
    ///         &TriggerPrototype::timer("nightly", "listener", "0 2 * * *", None),
    ///     )
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_tekton_pipeline_trigger(
        &self,
        pipeline_id: &str,
        req: &TriggerPrototype,
    ) -> Result<Trigger> {
        require("pipeline_id", pipeline_id)?;
        require("name", &req.name)?;
        require("event_listener", &req.event_listener)?;
        if req.trigger_type == TriggerType::Unknown {
            return Err(ClientError::InvalidRequest(
                "trigger type must be manual, scm, timer or generic".to_string(),
            ));
        }

        let url = self.endpoint(&["tekton_pipelines", pipeline_id, "triggers"])?;
        let response = self.send(self.request(Method::POST, url).json(req)).await?;

        self.handle_response(response).await
    }

    /// Get a trigger by ID
    pub async fn get_tekton_pipeline_trigger(
        &self,
        pipeline_id: &str,
        trigger_id: &str,
    ) -> Result<Trigger> {
        require("pipeline_id", pipeline_id)?;
        require("trigger_id", trigger_id)?;

        let url = self.endpoint(&["tekton_pipelines", pipeline_id, "triggers", trigger_id])?;
        let response = self.send(self.request(Method::GET, url)).await?;

        self.handle_response(response).await
    }

    /// Update a trigger
    ///
    /// Only the fields set in `patch` are changed.
    pub async fn update_tekton_pipeline_trigger(
        &self,
        pipeline_id: &str,
        trigger_id: &str,
        patch: &TriggerPatch,
    ) -> Result<Trigger> {
        require("pipeline_id", pipeline_id)?;
        require("trigger_id", trigger_id)?;

        let url = self.endpoint(&["tekton_pipelines", pipeline_id, "triggers", trigger_id])?;
        let request = Self::merge_patch(self.request(Method::PATCH, url), patch)?;
        let response = self.send(request).await?;

        self.handle_response(response).await
    }

    /// Delete a trigger
    pub async fn delete_tekton_pipeline_trigger(&self, pipeline_id: &str, trigger_id: &str) -> Result<()> {
        require("pipeline_id", pipeline_id)?;
        require("trigger_id", trigger_id)?;

        let url = self.endpoint(&["tekton_pipelines", pipeline_id, "triggers", trigger_id])?;
        let response = self.send(self.request(Method::DELETE, url)).await?;

        self.handle_empty_response(response).await
    }

    /// Copy a trigger, including its properties, under a new name
    pub async fn duplicate_tekton_pipeline_trigger(
        &self,
        pipeline_id: &str,
        source_trigger_id: &str,
        req: &DuplicateTrigger,
    ) -> Result<Trigger> {
        require("pipeline_id", pipeline_id)?;
        require("source_trigger_id", source_trigger_id)?;
        require("name", &req.name)?;

        let url = self.endpoint(&[
            "tekton_pipelines",
            pipeline_id,
            "triggers",
            source_trigger_id,
            "duplicate",
        ])?;
        let response = self.send(self.request(Method::POST, url).json(req)).await?;

        self.handle_response(response).await
    }
}
