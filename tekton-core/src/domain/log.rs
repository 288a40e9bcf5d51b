//! Log domain types

use serde::{Deserialize, Serialize};

/// A log produced by one step of a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Log {
    pub id: String,
    pub name: Option<String>,
    pub href: Option<String>,
}

/// Logs available for a pipeline run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsCollection {
    #[serde(default)]
    pub logs: Vec<Log>,
}

/// Content of a single step log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepLog {
    pub id: String,
    #[serde(default)]
    pub data: String,
}
