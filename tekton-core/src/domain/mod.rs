//! Core domain types
//!
//! This module mirrors the JSON resources returned by the Tekton Pipeline
//! service. Fields the service may leave out are optional; collections
//! default to empty when absent.

pub mod definition;
pub mod log;
pub mod pipeline;
pub mod property;
pub mod run;
pub mod trigger;

use serde::{Deserialize, Serialize};

/// Reference to another resource by ID
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRef {
    pub id: String,
}

/// A link to another page or resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

/// Reference to a toolchain tool integration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRef {
    pub id: String,
}
