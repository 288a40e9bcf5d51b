//! Pipeline run domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::property::Property;
use super::trigger::Trigger;
use super::{Link, ResourceRef};

/// A single execution of a pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRun {
    pub id: String,
    pub href: Option<String>,
    pub user_info: Option<UserInfo>,
    pub status: Option<RunStatus>,
    pub definition_id: Option<String>,
    pub definition: Option<ResourceRef>,
    pub description: Option<String>,
    pub worker: Option<RunWorker>,
    pub pipeline_id: Option<String>,
    pub pipeline: Option<ResourceRef>,
    /// Event listener that received the triggering event
    pub listen_for: Option<String>,
    pub trigger: Option<Trigger>,
    /// Raw JSON of the event parameters, as a string
    pub event_params_blob: Option<String>,
    /// Raw JSON of the triggering request's headers, as a string
    pub trigger_headers: Option<String>,
    #[serde(default)]
    pub properties: Vec<Property>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub run_url: Option<String>,
    pub error_message: Option<String>,
}

/// Run lifecycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Pending,
    Waiting,
    Queued,
    Running,
    Cancelled,
    Cancelling,
    Failed,
    Error,
    Succeeded,
    #[serde(other)]
    Unknown,
}

impl RunStatus {
    /// Wire name of the status, as used in query parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            RunStatus::Pending => "pending",
            RunStatus::Waiting => "waiting",
            RunStatus::Queued => "queued",
            RunStatus::Running => "running",
            RunStatus::Cancelled => "cancelled",
            RunStatus::Cancelling => "cancelling",
            RunStatus::Failed => "failed",
            RunStatus::Error => "error",
            RunStatus::Succeeded => "succeeded",
            RunStatus::Unknown => "unknown",
        }
    }

    /// Whether the run has stopped and will not change status again
    pub fn is_finished(&self) -> bool {
        matches!(
            self,
            RunStatus::Cancelled | RunStatus::Failed | RunStatus::Error | RunStatus::Succeeded
        )
    }
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RunStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(RunStatus::Pending),
            "waiting" => Ok(RunStatus::Waiting),
            "queued" => Ok(RunStatus::Queued),
            "running" => Ok(RunStatus::Running),
            "cancelled" => Ok(RunStatus::Cancelled),
            "cancelling" => Ok(RunStatus::Cancelling),
            "failed" => Ok(RunStatus::Failed),
            "error" => Ok(RunStatus::Error),
            "succeeded" => Ok(RunStatus::Succeeded),
            other => Err(format!("unknown run status: {}", other)),
        }
    }
}

/// Identity of the user that started a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    pub iam_id: String,
    pub sub: Option<String>,
}

/// Worker a run executed on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunWorker {
    pub id: String,
    pub name: Option<String>,
    pub agent_id: Option<String>,
    pub service_id: Option<String>,
}

/// One page of pipeline runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRunsCollection {
    #[serde(default)]
    pub pipeline_runs: Vec<PipelineRun>,
    pub limit: Option<i64>,
    pub first: Option<Link>,
    /// Link to the following page; absent on the last page
    pub next: Option<Link>,
    pub last: Option<Link>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_run_page() {
        let page: PipelineRunsCollection = serde_json::from_value(json!({
            "pipeline_runs": [{
                "id": "b4b6e5bc-4bb0-4d5d-9ad0-15bd7d0f2c44",
                "user_info": { "iam_id": "IBMid-123", "sub": "user@example.com" },
                "status": "succeeded",
                "definition_id": "d1",
                "worker": { "id": "public", "name": "IBM Managed workers", "agent_id": "a1", "service_id": "s1" },
                "pipeline_id": "94619026-912b-4d92-8f51-6c74f0692d90",
                "listen_for": "listener",
                "trigger": { "type": "manual", "id": "t1", "name": "start" },
                "event_params_blob": "{}",
                "properties": [],
                "created_at": "2019-01-01T12:00:00.000Z",
                "run_url": "https://cloud.ibm.com/devops/pipelines/tekton/p1/runs/r1"
            }],
            "limit": 1,
            "first": { "href": "https://api.example.com/tekton_pipelines/p1/pipeline_runs?limit=1" },
            "next": { "href": "https://api.example.com/tekton_pipelines/p1/pipeline_runs?start=abc&limit=1" }
        }))
        .unwrap();

        let run = &page.pipeline_runs[0];
        assert_eq!(run.status, Some(RunStatus::Succeeded));
        assert_eq!(run.user_info.as_ref().map(|u| u.iam_id.as_str()), Some("IBMid-123"));
        assert!(page.next.is_some());
        assert!(page.last.is_none());
    }

    #[test]
    fn test_run_status_finished() {
        assert!(RunStatus::Succeeded.is_finished());
        assert!(RunStatus::Cancelled.is_finished());
        assert!(!RunStatus::Cancelling.is_finished());
        assert!(!RunStatus::Queued.is_finished());
    }

    #[test]
    fn test_unknown_status_is_tolerated() {
        let status: RunStatus = serde_json::from_value(json!("paused")).unwrap();
        assert_eq!(status, RunStatus::Unknown);
    }
}
