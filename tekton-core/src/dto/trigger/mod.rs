//! Trigger DTOs

use serde::{Deserialize, Serialize};

use super::{QueryParams, comma_joined};
use crate::domain::ResourceRef;
use crate::domain::trigger::{GenericSecret, TriggerEvent, TriggerType};

/// Request to create a trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerPrototype {
    #[serde(rename = "type")]
    pub trigger_type: TriggerType,
    pub name: String,
    pub event_listener: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<ResourceRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent_runs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_waiting_runs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<GenericSecret>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<TriggerSourcePrototype>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<TriggerEvent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_events_from_forks: Option<bool>,
}

impl TriggerPrototype {
    /// Bare trigger of the given kind; set kind-specific fields afterwards
    pub fn new(
        trigger_type: TriggerType,
        name: impl Into<String>,
        event_listener: impl Into<String>,
    ) -> Self {
        Self {
            trigger_type,
            name: name.into(),
            event_listener: event_listener.into(),
            tags: Vec::new(),
            worker: None,
            max_concurrent_runs: None,
            limit_waiting_runs: None,
            enabled: None,
            secret: None,
            cron: None,
            timezone: None,
            source: None,
            events: Vec::new(),
            filter: None,
            favorite: None,
            enable_events_from_forks: None,
        }
    }

    /// Timer trigger firing on a cron schedule
    pub fn timer(
        name: impl Into<String>,
        event_listener: impl Into<String>,
        cron: impl Into<String>,
        timezone: Option<String>,
    ) -> Self {
        Self {
            cron: Some(cron.into()),
            timezone,
            ..Self::new(TriggerType::Timer, name, event_listener)
        }
    }
}

/// Repository an scm trigger should watch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSourcePrototype {
    #[serde(rename = "type")]
    pub source_type: String,
    pub properties: TriggerSourcePropertiesPrototype,
}

/// Repository coordinates for a new scm trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSourcePropertiesPrototype {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

/// Merge patch for a trigger
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerPatch {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub trigger_type: Option<TriggerType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_listener: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worker: Option<ResourceRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrent_runs: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit_waiting_runs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<GenericSecret>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cron: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<TriggerSourcePrototype>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub events: Option<Vec<TriggerEvent>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub favorite: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enable_events_from_forks: Option<bool>,
}

impl TriggerPatch {
    /// Patch that only flips the `enabled` flag
    pub fn enabled(enabled: bool) -> Self {
        Self {
            enabled: Some(enabled),
            ..Default::default()
        }
    }
}

/// Request to copy a trigger under a new name
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DuplicateTrigger {
    pub name: String,
}

/// Filters for listing triggers
#[derive(Debug, Clone, Default)]
pub struct ListTriggers {
    pub types: Vec<TriggerType>,
    pub name: Option<String>,
    pub event_listener: Option<String>,
    pub worker_id: Option<String>,
    pub worker_name: Option<String>,
    /// `Some(true)` for disabled triggers only, `Some(false)` for enabled only
    pub disabled: Option<bool>,
    /// Triggers carrying any of these tags
    pub tags: Vec<String>,
}

impl QueryParams for ListTriggers {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let types: Vec<&str> = self
            .types
            .iter()
            .filter(|t| **t != TriggerType::Unknown)
            .map(TriggerType::as_str)
            .collect();
        if let Some(types) = comma_joined(&types) {
            pairs.push(("type", types));
        }
        if let Some(name) = &self.name {
            pairs.push(("name", name.clone()));
        }
        if let Some(event_listener) = &self.event_listener {
            pairs.push(("event_listener", event_listener.clone()));
        }
        if let Some(worker_id) = &self.worker_id {
            pairs.push(("worker.id", worker_id.clone()));
        }
        if let Some(worker_name) = &self.worker_name {
            pairs.push(("worker.name", worker_name.clone()));
        }
        if let Some(disabled) = self.disabled {
            pairs.push(("disabled", disabled.to_string()));
        }
        if let Some(tags) = comma_joined(&self.tags) {
            pairs.push(("tags", tags));
        }
        pairs
    }
}
