//! Pipeline run endpoints

use reqwest::Method;
use tekton_core::domain::log::{LogsCollection, StepLog};
use tekton_core::domain::run::{PipelineRun, PipelineRunsCollection};
use tekton_core::dto::QueryParams;
use tekton_core::dto::run::{CancelPipelineRun, CreatePipelineRun, ListPipelineRuns};

use crate::error::Result;
use crate::pager::PipelineRunsPager;
use crate::{TektonPipelineClient, require};

impl TektonPipelineClient {
    // =============================================================================
    // Run Lifecycle
    // =============================================================================

    /// List one page of runs for a pipeline, newest first
    ///
    /// # Arguments
    /// * `pipeline_id` - The pipeline ID
    /// * `opts` - Filters and the paging cursor
    ///
    /// # Returns
    /// A page of runs with links to the first, next and last pages
    pub async fn list_tekton_pipeline_runs(
        &self,
        pipeline_id: &str,
        opts: &ListPipelineRuns,
    ) -> Result<PipelineRunsCollection> {
        require("pipeline_id", pipeline_id)?;

        let url = self.endpoint(&["tekton_pipelines", pipeline_id, "pipeline_runs"])?;
        let request = self
            .request(Method::GET, url)
            .query(&opts.query_pairs());
        let response = self.send(request).await?;

        self.handle_response(response).await
    }

    /// Page through all runs matching `opts`
    ///
    /// `opts.start` must be unset; the pager manages the cursor.
    pub fn pipeline_runs_pager(
        &self,
        pipeline_id: &str,
        opts: ListPipelineRuns,
    ) -> Result<PipelineRunsPager<'_>> {
        PipelineRunsPager::new(self, pipeline_id, opts)
    }

    /// Start a pipeline run
    ///
    /// # Example
    /// ```no_run
    /// # use tekton_client::TektonPipelineClient;
    /// # use tekton_core::dto::run::CreatePipelineRun;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = TektonPipelineClient::new("https://api.us-south.devops.cloud.ibm.com/pipeline/v2");
    /// let run = client
    ///     .create_tekton_pipeline_run("94619026-912b-4d92-8f51-6c74f0692d90", &CreatePipelineRun::for_trigger("Manual Trigger"))
    ///     .await?;
    /// println!("{:?}", run.status);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn create_tekton_pipeline_run(
        &self,
        pipeline_id: &str,
        req: &CreatePipelineRun,
    ) -> Result<PipelineRun> {
        require("pipeline_id", pipeline_id)?;

        let url = self.endpoint(&["tekton_pipelines", pipeline_id, "pipeline_runs"])?;
        let response = self.send(self.request(Method::POST, url).json(req)).await?;

        self.handle_response(response).await
    }

    /// Get a run by ID
    ///
    /// # Arguments
    /// * `pipeline_id` - The pipeline ID
    /// * `id` - The run ID
    /// * `includes` - Extra data to embed, e.g. "definitions"
    pub async fn get_tekton_pipeline_run(
        &self,
        pipeline_id: &str,
        id: &str,
        includes: Option<&str>,
    ) -> Result<PipelineRun> {
        require("pipeline_id", pipeline_id)?;
        require("id", id)?;

        let url = self.endpoint(&["tekton_pipelines", pipeline_id, "pipeline_runs", id])?;
        let mut request = self.request(Method::GET, url);
        if let Some(includes) = includes {
            request = request.query(&[("includes", includes)]);
        }
        let response = self.send(request).await?;

        self.handle_response(response).await
    }

    /// Delete a run and its logs
    pub async fn delete_tekton_pipeline_run(&self, pipeline_id: &str, id: &str) -> Result<()> {
        require("pipeline_id", pipeline_id)?;
        require("id", id)?;

        let url = self.endpoint(&["tekton_pipelines", pipeline_id, "pipeline_runs", id])?;
        let response = self.send(self.request(Method::DELETE, url)).await?;

        self.handle_empty_response(response).await
    }

    /// Cancel a queued or running run
    pub async fn cancel_tekton_pipeline_run(
        &self,
        pipeline_id: &str,
        id: &str,
        req: &CancelPipelineRun,
    ) -> Result<PipelineRun> {
        require("pipeline_id", pipeline_id)?;
        require("id", id)?;

        let url = self.endpoint(&[
            "tekton_pipelines",
            pipeline_id,
            "pipeline_runs",
            id,
            "cancel",
        ])?;
        let response = self.send(self.request(Method::POST, url).json(req)).await?;

        self.handle_response(response).await
    }

    /// Start a new run with the same trigger and properties as an earlier one
    pub async fn rerun_tekton_pipeline_run(&self, pipeline_id: &str, id: &str) -> Result<PipelineRun> {
        require("pipeline_id", pipeline_id)?;
        require("id", id)?;

        let url = self.endpoint(&[
            "tekton_pipelines",
            pipeline_id,
            "pipeline_runs",
            id,
            "rerun",
        ])?;
        let response = self.send(self.request(Method::POST, url)).await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Run Logs
    // =============================================================================

    /// List the step logs of a run
    pub async fn get_tekton_pipeline_run_logs(
        &self,
        pipeline_id: &str,
        id: &str,
    ) -> Result<LogsCollection> {
        require("pipeline_id", pipeline_id)?;
        require("id", id)?;

        let url = self.endpoint(&[
            "tekton_pipelines",
            pipeline_id,
            "pipeline_runs",
            id,
            "logs",
        ])?;
        let response = self.send(self.request(Method::GET, url)).await?;

        self.handle_response(response).await
    }

    /// Get the content of one step log
    ///
    /// # Arguments
    /// * `pipeline_id` - The pipeline ID
    /// * `pipeline_run_id` - The run ID
    /// * `id` - The log ID, as listed by [`Self::get_tekton_pipeline_run_logs`]
    pub async fn get_tekton_pipeline_run_log_content(
        &self,
        pipeline_id: &str,
        pipeline_run_id: &str,
        id: &str,
    ) -> Result<StepLog> {
        require("pipeline_id", pipeline_id)?;
        require("pipeline_run_id", pipeline_run_id)?;
        require("id", id)?;

        let url = self.endpoint(&[
            "tekton_pipelines",
            pipeline_id,
            "pipeline_runs",
            pipeline_run_id,
            "logs",
            id,
        ])?;
        let response = self.send(self.request(Method::GET, url)).await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BearerTokenAuthenticator;
    use crate::test_support::{MockServer, run_json};
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tekton_core::domain::run::RunStatus;
    use tekton_core::dto::run::PipelineRunTrigger;

    const PIPELINE_ID: &str = "94619026-912b-4d92-8f51-6c74f0692d90";
    const RUN_ID: &str = "b4b6e5bc-4bb0-4d5d-9ad0-15bd7d0f2c44";

    #[tokio::test]
    async fn test_list_runs_sends_filters() {
        let server = MockServer::respond(
            200,
            json!({
                "pipeline_runs": [run_json(RUN_ID, "running")],
                "limit": 5,
                "first": { "href": "https://api.example.com/pipeline_runs?limit=5" }
            }),
        )
        .await;

        let page = server
            .client()
            .list_tekton_pipeline_runs(
                PIPELINE_ID,
                &ListPipelineRuns {
                    limit: Some(5),
                    status: Some(RunStatus::Running),
                    trigger_name: Some("Manual Trigger".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(page.pipeline_runs.len(), 1);
        assert_eq!(page.pipeline_runs[0].status, Some(RunStatus::Running));
        assert!(page.next.is_none());

        let req = server.single_request();
        assert_eq!(req.method, "GET");
        assert_eq!(
            req.path,
            format!("/pipeline/v2/tekton_pipelines/{}/pipeline_runs", PIPELINE_ID)
        );
        assert_eq!(
            req.query_pairs(),
            vec![
                ("limit".to_string(), "5".to_string()),
                ("status".to_string(), "running".to_string()),
                ("trigger.name".to_string(), "Manual Trigger".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_create_run_with_trigger_overrides() {
        let server = MockServer::respond(201, run_json(RUN_ID, "pending")).await;

        let mut properties = HashMap::new();
        properties.insert("branch".to_string(), json!("main"));

        let run = server
            .client()
            .create_tekton_pipeline_run(
                PIPELINE_ID,
                &CreatePipelineRun {
                    description: Some("nightly".into()),
                    trigger: Some(PipelineRunTrigger {
                        name: "Manual Trigger".into(),
                        properties: Some(properties),
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(run.id, RUN_ID);
        let req = server.single_request();
        assert_eq!(req.method, "POST");
        assert_eq!(
            req.body,
            Some(json!({
                "description": "nightly",
                "trigger": { "name": "Manual Trigger", "properties": { "branch": "main" } }
            }))
        );
    }

    #[tokio::test]
    async fn test_get_run_with_includes() {
        let server = MockServer::respond(200, run_json(RUN_ID, "succeeded")).await;

        let run = server
            .client()
            .get_tekton_pipeline_run(PIPELINE_ID, RUN_ID, Some("definitions"))
            .await
            .unwrap();

        assert_eq!(run.status, Some(RunStatus::Succeeded));
        let req = server.single_request();
        assert_eq!(
            req.path,
            format!(
                "/pipeline/v2/tekton_pipelines/{}/pipeline_runs/{}",
                PIPELINE_ID, RUN_ID
            )
        );
        assert_eq!(req.query.as_deref(), Some("includes=definitions"));
    }

    #[tokio::test]
    async fn test_get_run_without_includes_has_no_query() {
        let server = MockServer::respond(200, run_json(RUN_ID, "queued")).await;

        server
            .client()
            .get_tekton_pipeline_run(PIPELINE_ID, RUN_ID, None)
            .await
            .unwrap();

        assert!(server.single_request().query.is_none());
    }

    #[tokio::test]
    async fn test_cancel_run_with_force() {
        let server = MockServer::respond(202, run_json(RUN_ID, "cancelling")).await;

        let run = server
            .client()
            .cancel_tekton_pipeline_run(PIPELINE_ID, RUN_ID, &CancelPipelineRun { force: Some(true) })
            .await
            .unwrap();

        assert_eq!(run.status, Some(RunStatus::Cancelling));
        let req = server.single_request();
        assert_eq!(req.method, "POST");
        assert!(req.path.ends_with(&format!("/pipeline_runs/{}/cancel", RUN_ID)));
        assert_eq!(req.body, Some(json!({ "force": true })));
    }

    #[tokio::test]
    async fn test_rerun() {
        let server = MockServer::respond(201, run_json("new-run", "pending")).await;

        let run = server
            .client()
            .rerun_tekton_pipeline_run(PIPELINE_ID, RUN_ID)
            .await
            .unwrap();

        assert_eq!(run.id, "new-run");
        let req = server.single_request();
        assert_eq!(req.method, "POST");
        assert!(req.path.ends_with(&format!("/pipeline_runs/{}/rerun", RUN_ID)));
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn test_delete_run() {
        let server = MockServer::respond(204, serde_json::Value::Null).await;

        server
            .client()
            .delete_tekton_pipeline_run(PIPELINE_ID, RUN_ID)
            .await
            .unwrap();

        let req = server.single_request();
        assert_eq!(req.method, "DELETE");
        assert!(req.path.ends_with(&format!("/pipeline_runs/{}", RUN_ID)));
    }

    #[tokio::test]
    async fn test_run_logs_and_content() {
        let server = MockServer::sequence(vec![
            (
                200,
                json!({
                    "logs": [{
                        "id": "log-1",
                        "name": "pipeline-task/step-build",
                        "href": "https://api.example.com/tekton_pipelines/p1/pipeline_runs/r1/logs/log-1"
                    }]
                }),
            ),
            (200, json!({ "id": "log-1", "data": "building...\ndone\n" })),
        ])
        .await;
        let client = server.client();

        let logs = client
            .get_tekton_pipeline_run_logs(PIPELINE_ID, RUN_ID)
            .await
            .unwrap();
        assert_eq!(logs.logs.len(), 1);

        let content = client
            .get_tekton_pipeline_run_log_content(PIPELINE_ID, RUN_ID, &logs.logs[0].id)
            .await
            .unwrap();
        assert_eq!(content.data, "building...\ndone\n");

        let requests = server.requests();
        assert!(requests[0].path.ends_with(&format!("/pipeline_runs/{}/logs", RUN_ID)));
        assert!(requests[1].path.ends_with(&format!("/pipeline_runs/{}/logs/log-1", RUN_ID)));
    }

    #[tokio::test]
    async fn test_bearer_token_is_sent() {
        let server = MockServer::respond(200, run_json(RUN_ID, "running")).await;
        let client = server
            .client()
            .with_authenticator(Arc::new(BearerTokenAuthenticator::new("token-123").unwrap()));

        client
            .get_tekton_pipeline_run(PIPELINE_ID, RUN_ID, None)
            .await
            .unwrap();

        assert_eq!(
            server.single_request().authorization.as_deref(),
            Some("Bearer token-123")
        );
    }

    #[tokio::test]
    async fn test_log_content_requires_run_id() {
        let server = MockServer::respond(200, json!({})).await;

        let err = server
            .client()
            .get_tekton_pipeline_run_log_content(PIPELINE_ID, "", "log-1")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Invalid request: pipeline_run_id must be set");
        assert!(server.requests().is_empty());
    }
}
