//! Pipeline run DTOs

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::QueryParams;
use crate::domain::run::RunStatus;

/// Arbitrary JSON values keyed by name, passed through to the run
pub type JsonMap = HashMap<String, serde_json::Value>;

/// Request to start a pipeline run
///
/// Prefer `trigger` over the flat `trigger_*` fields; the flat form is kept
/// for compatibility with older service versions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePipelineRun {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_properties: Option<JsonMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure_trigger_properties: Option<JsonMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_headers: Option<JsonMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_body: Option<JsonMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<PipelineRunTrigger>,
}

impl CreatePipelineRun {
    /// Run the manual trigger with the given name and no overrides
    pub fn for_trigger(name: impl Into<String>) -> Self {
        Self {
            trigger: Some(PipelineRunTrigger {
                name: name.into(),
                ..Default::default()
            }),
            ..Default::default()
        }
    }
}

/// Trigger to run, with per-run overrides
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineRunTrigger {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<JsonMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secure_properties: Option<JsonMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub headers: Option<JsonMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<JsonMap>,
}

/// Request to cancel a run
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CancelPipelineRun {
    /// Cancel immediately without waiting for running steps to stop
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<bool>,
}

/// Filters and paging for listing runs
#[derive(Debug, Clone, Default)]
pub struct ListPipelineRuns {
    /// Cursor from the previous page's `next` link
    pub start: Option<String>,
    pub limit: Option<i64>,
    pub status: Option<RunStatus>,
    pub trigger_name: Option<String>,
}

impl QueryParams for ListPipelineRuns {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(start) = &self.start {
            pairs.push(("start", start.clone()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        // Unknown only exists for decoding responses; the service has no such filter
        if let Some(status) = self.status.filter(|s| *s != RunStatus::Unknown) {
            pairs.push(("status", status.as_str().to_string()));
        }
        if let Some(trigger_name) = &self.trigger_name {
            pairs.push(("trigger.name", trigger_name.clone()));
        }
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_for_trigger_body() {
        let req = CreatePipelineRun::for_trigger("Manual Trigger");
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({ "trigger": { "name": "Manual Trigger" } })
        );
    }

    #[test]
    fn test_list_runs_query() {
        let opts = ListPipelineRuns {
            limit: Some(10),
            status: Some(RunStatus::Succeeded),
            trigger_name: Some("manual".into()),
            ..Default::default()
        };
        assert_eq!(
            opts.query_pairs(),
            vec![
                ("limit", "10".to_string()),
                ("status", "succeeded".to_string()),
                ("trigger.name", "manual".to_string()),
            ]
        );
        assert!(ListPipelineRuns::default().query_pairs().is_empty());
    }

    #[test]
    fn test_unknown_status_is_not_sent() {
        let opts = ListPipelineRuns {
            limit: Some(5),
            status: Some(RunStatus::Unknown),
            ..Default::default()
        };
        assert_eq!(opts.query_pairs(), vec![("limit", "5".to_string())]);
    }
}
