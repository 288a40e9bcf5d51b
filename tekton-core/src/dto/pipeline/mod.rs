//! Pipeline DTOs

use serde::{Deserialize, Serialize};

use crate::domain::ResourceRef;

/// Request to create a pipeline for an existing toolchain tool integration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTektonPipeline {
    /// ID of the pipeline tool integration in the toolchain
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_build_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_partial_cloning: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<ResourceRef>,
}

/// Merge patch for a pipeline
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TektonPipelinePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_build_number: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_notifications: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_partial_cloning: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<ResourceRef>,
}

impl TektonPipelinePatch {
    /// True when the patch would change nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
