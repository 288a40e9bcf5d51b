//! Cursor pagination over pipeline runs
//!
//! Each page of runs carries a `next` link whose `start` query parameter is
//! the cursor for the following page. The pager feeds that cursor back into
//! the list call until the service stops returning a `next` link.

use reqwest::Url;
use tekton_core::domain::run::{PipelineRun, PipelineRunsCollection};
use tekton_core::dto::run::ListPipelineRuns;
use tracing::{debug, warn};

use crate::error::{ClientError, Result};
use crate::{TektonPipelineClient, require};

/// Walks every page of a pipeline's run list
pub struct PipelineRunsPager<'a> {
    client: &'a TektonPipelineClient,
    pipeline_id: String,
    options: ListPipelineRuns,
    next_start: Option<String>,
    has_next: bool,
}

impl<'a> PipelineRunsPager<'a> {
    /// Create a pager starting at the first page
    ///
    /// # Errors
    /// Returns an error if `pipeline_id` is empty or `options.start` is set
    pub fn new(
        client: &'a TektonPipelineClient,
        pipeline_id: &str,
        options: ListPipelineRuns,
    ) -> Result<Self> {
        require("pipeline_id", pipeline_id)?;

        if options.start.is_some() {
            return Err(ClientError::InvalidRequest(
                "the 'start' option must not be set when paging".to_string(),
            ));
        }

        Ok(Self {
            client,
            pipeline_id: pipeline_id.to_string(),
            options,
            next_start: None,
            has_next: true,
        })
    }

    /// Whether another page can be fetched
    pub fn has_next(&self) -> bool {
        self.has_next
    }

    /// Fetch the next page of runs
    ///
    /// # Errors
    /// Returns an error if there are no more pages or the request fails
    pub async fn next_page(&mut self) -> Result<Vec<PipelineRun>> {
        if !self.has_next {
            return Err(ClientError::InvalidRequest(
                "no more results available".to_string(),
            ));
        }

        let options = ListPipelineRuns {
            start: self.next_start.clone(),
            ..self.options.clone()
        };
        let page = self
            .client
            .list_tekton_pipeline_runs(&self.pipeline_id, &options)
            .await?;

        self.next_start = next_start(&page);
        self.has_next = self.next_start.is_some();

        debug!(
            "Fetched {} run(s) for pipeline {} (more: {})",
            page.pipeline_runs.len(),
            self.pipeline_id,
            self.has_next
        );

        Ok(page.pipeline_runs)
    }

    /// Fetch all remaining pages
    pub async fn all(&mut self) -> Result<Vec<PipelineRun>> {
        let mut runs = Vec::new();
        while self.has_next {
            runs.extend(self.next_page().await?);
        }
        Ok(runs)
    }
}

/// Cursor for the page after `page`
///
/// Returns `None` on the last page, and also when the `next` link carries no
/// readable `start` parameter.
pub fn next_start(page: &PipelineRunsCollection) -> Option<String> {
    let href = &page.next.as_ref()?.href;

    let start = start_param(href);
    if start.is_none() {
        warn!("Could not read a start cursor from next link {}", href);
    }
    start
}

fn start_param(href: &str) -> Option<String> {
    // Relative links are resolved against a placeholder origin; only the query matters
    let base = Url::parse("http://localhost/").ok()?;
    let url = base.join(href).ok()?;

    url.query_pairs()
        .find(|(key, _)| key == "start")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}
