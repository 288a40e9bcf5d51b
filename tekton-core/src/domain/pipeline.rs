//! Pipeline domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ResourceRef;
use super::definition::Definition;
use super::property::Property;
use super::trigger::Trigger;

/// A Tekton pipeline
///
/// The pipeline shares its ID with the toolchain tool integration that owns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TektonPipeline {
    pub id: String,
    pub name: Option<String>,
    pub status: Option<PipelineStatus>,
    pub resource_group: Option<ResourceRef>,
    pub toolchain: Option<ToolchainRef>,
    #[serde(default)]
    pub definitions: Vec<Definition>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub triggers: Vec<Trigger>,
    pub worker: Option<Worker>,
    pub runs_url: Option<String>,
    pub href: Option<String>,
    pub build_number: Option<i64>,
    pub next_build_number: Option<i64>,
    pub enable_notifications: Option<bool>,
    pub enable_partial_cloning: Option<bool>,
    pub enabled: Option<bool>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Configuration state of a pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    Configured,
    Configuring,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineStatus::Configured => write!(f, "configured"),
            PipelineStatus::Configuring => write!(f, "configuring"),
            PipelineStatus::Unknown => write!(f, "unknown"),
        }
    }
}

/// Toolchain the pipeline belongs to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolchainRef {
    pub id: String,
    pub crn: Option<String>,
}

/// Worker used to run a pipeline or trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Worker {
    pub id: String,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub worker_type: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_pipeline() {
        let pipeline: TektonPipeline = serde_json::from_value(json!({
            "id": "94619026-912b-4d92-8f51-6c74f0692d90",
            "name": "tekton-pipeline",
            "status": "configured",
            "resource_group": { "id": "6a9a01f2cff54a7f966f803d92877123" },
            "toolchain": {
                "id": "bf5fa00f-ddef-4298-b87b-aa8b6da0e1a6",
                "crn": "crn:v1:staging:public:toolchain:us-south:a/0ba224679d6c697f9baee5e14ade83ac:bf5fa00f-ddef-4298-b87b-aa8b6da0e1a6::"
            },
            "definitions": [],
            "properties": [{ "name": "env", "value": "prod", "type": "text" }],
            "triggers": [{ "type": "manual", "id": "1bb892a1-2e04-4768-a369-b1159eace147", "name": "start" }],
            "worker": { "id": "public", "name": "IBM Managed workers", "type": "public" },
            "runs_url": "https://cloud.ibm.com/devops/pipelines/tekton/94619026-912b-4d92-8f51-6c74f0692d90?env_id=ibm:yp:us-south",
            "build_number": 5,
            "next_build_number": 6,
            "enable_notifications": false,
            "enable_partial_cloning": true,
            "enabled": true,
            "created_at": "2019-01-01T12:00:00.000Z",
            "updated_at": "2019-01-01T12:00:00.000Z"
        }))
        .unwrap();

        assert_eq!(pipeline.status, Some(PipelineStatus::Configured));
        assert_eq!(pipeline.properties.len(), 1);
        assert_eq!(pipeline.triggers[0].name.as_deref(), Some("start"));
        assert_eq!(
            pipeline.worker.as_ref().and_then(|w| w.worker_type.as_deref()),
            Some("public")
        );
        assert_eq!(pipeline.next_build_number, Some(6));
        assert!(pipeline.created_at.is_some());
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let pipeline: TektonPipeline =
            serde_json::from_value(json!({ "id": "p1", "status": "rebuilding" })).unwrap();

        assert!(pipeline.definitions.is_empty());
        assert!(pipeline.triggers.is_empty());
        assert_eq!(pipeline.status, Some(PipelineStatus::Unknown));
    }
}
