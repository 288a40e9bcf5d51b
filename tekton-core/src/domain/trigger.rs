//! Trigger domain types
//!
//! The service models four trigger kinds (manual, scm, timer and generic)
//! as one resource whose populated fields depend on `type`. They are kept
//! as a single flat structure here:
//! - manual: name, event_listener, properties
//! - scm: additionally `source`, `events` and `filter`
//! - timer: additionally `cron` and `timezone`
//! - generic: additionally `secret`, `filter` and `webhook_url`

use serde::{Deserialize, Serialize};

use super::ToolRef;
use super::pipeline::Worker;
use super::property::Property;

/// Something that starts pipeline runs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trigger {
    #[serde(rename = "type")]
    pub trigger_type: TriggerType,
    pub id: String,
    pub name: Option<String>,
    pub href: Option<String>,
    pub event_listener: Option<String>,
    #[serde(default)]
    pub properties: Vec<Property>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Overrides the pipeline worker when set
    pub worker: Option<Worker>,
    pub max_concurrent_runs: Option<i64>,
    pub limit_waiting_runs: Option<bool>,
    pub enabled: Option<bool>,
    pub favorite: Option<bool>,
    pub enable_events_from_forks: Option<bool>,
    pub source: Option<TriggerSource>,
    #[serde(default)]
    pub events: Vec<TriggerEvent>,
    /// CEL expression evaluated against the incoming event
    pub filter: Option<String>,
    pub cron: Option<String>,
    pub timezone: Option<String>,
    pub secret: Option<GenericSecret>,
    pub webhook_url: Option<String>,
}

impl Trigger {
    /// Triggers are enabled unless the service says otherwise
    pub fn is_enabled(&self) -> bool {
        self.enabled.unwrap_or(true)
    }
}

/// Kind of trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    Manual,
    Scm,
    Timer,
    Generic,
    #[serde(other)]
    Unknown,
}

impl TriggerType {
    /// Wire name of the type, as used in query parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            TriggerType::Manual => "manual",
            TriggerType::Scm => "scm",
            TriggerType::Timer => "timer",
            TriggerType::Generic => "generic",
            TriggerType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for TriggerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TriggerType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "manual" => Ok(TriggerType::Manual),
            "scm" => Ok(TriggerType::Scm),
            "timer" => Ok(TriggerType::Timer),
            "generic" => Ok(TriggerType::Generic),
            other => Err(format!("unknown trigger type: {}", other)),
        }
    }
}

/// SCM events an scm trigger listens for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerEvent {
    Push,
    PullRequest,
    PullRequestClosed,
}

impl std::fmt::Display for TriggerEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TriggerEvent::Push => write!(f, "push"),
            TriggerEvent::PullRequest => write!(f, "pull_request"),
            TriggerEvent::PullRequestClosed => write!(f, "pull_request_closed"),
        }
    }
}

/// Repository an scm trigger watches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSource {
    #[serde(rename = "type")]
    pub source_type: String,
    pub properties: TriggerSourceProperties,
}

/// Repository coordinates of an scm trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSourceProperties {
    pub url: String,
    pub branch: Option<String>,
    /// Glob pattern matched against branch names
    pub pattern: Option<String>,
    /// Repository is behind a private network and reached through a worker
    pub blind_connection: Option<bool>,
    pub hook_id: Option<String>,
    pub tool: Option<ToolRef>,
}

/// Secret used to validate events received by a generic webhook trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericSecret {
    #[serde(rename = "type")]
    pub secret_type: SecretType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SecretSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub algorithm: Option<SecretAlgorithm>,
}

/// How a webhook secret is checked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretType {
    TokenMatches,
    DigestMatches,
    InternalValidation,
}

/// Where in the incoming request the secret is found
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretSource {
    Header,
    Payload,
    Query,
}

/// Digest algorithm for `digest_matches` secrets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretAlgorithm {
    Md4,
    Md5,
    Sha1,
    Sha256,
    Sha384,
    Sha512,
    #[serde(rename = "sha512_224")]
    Sha512_224,
    #[serde(rename = "sha512_256")]
    Sha512_256,
    Ripemd160,
}

/// Triggers of a pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggersCollection {
    #[serde(default)]
    pub triggers: Vec<Trigger>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_scm_trigger() {
        let trigger: Trigger = serde_json::from_value(json!({
            "type": "scm",
            "id": "1bb892a1-2e04-4768-a369-b1159eace147",
            "name": "git-push",
            "event_listener": "listener",
            "tags": ["ci"],
            "max_concurrent_runs": 3,
            "enabled": false,
            "source": {
                "type": "git",
                "properties": {
                    "url": "https://github.com/open-toolchain/hello-tekton.git",
                    "pattern": "release-*",
                    "blind_connection": false,
                    "hook_id": "12345",
                    "tool": { "id": "tool-1" }
                }
            },
            "events": ["push", "pull_request_closed"],
            "filter": "header['x-github-event'] == 'push'"
        }))
        .unwrap();

        assert_eq!(trigger.trigger_type, TriggerType::Scm);
        assert!(!trigger.is_enabled());
        assert_eq!(
            trigger.events,
            vec![TriggerEvent::Push, TriggerEvent::PullRequestClosed]
        );
        let source = trigger.source.unwrap();
        assert_eq!(source.properties.pattern.as_deref(), Some("release-*"));
        assert_eq!(source.properties.tool, Some(ToolRef { id: "tool-1".into() }));
    }

    #[test]
    fn test_deserialize_generic_trigger_secret() {
        let trigger: Trigger = serde_json::from_value(json!({
            "type": "generic",
            "id": "t2",
            "name": "webhook",
            "secret": {
                "type": "digest_matches",
                "source": "header",
                "key_name": "X-Signature",
                "algorithm": "sha512_256"
            },
            "webhook_url": "https://devops-api.us-south.devops.cloud.ibm.com/v1/tekton-webhook/p1/run/t2"
        }))
        .unwrap();

        assert!(trigger.is_enabled());
        let secret = trigger.secret.as_ref().unwrap();
        assert_eq!(secret.secret_type, SecretType::DigestMatches);
        assert_eq!(secret.algorithm, Some(SecretAlgorithm::Sha512_256));
    }

    #[test]
    fn test_unrecognized_trigger_type_still_decodes() {
        let trigger: Trigger = serde_json::from_value(json!({
            "type": "slack_command",
            "id": "t3",
            "name": "chatops"
        }))
        .unwrap();

        assert_eq!(trigger.trigger_type, TriggerType::Unknown);
        assert!("unknown".parse::<TriggerType>().is_err());
    }

    #[test]
    fn test_secret_omits_unset_fields() {
        let secret = GenericSecret {
            secret_type: SecretType::InternalValidation,
            value: None,
            source: None,
            key_name: None,
            algorithm: None,
        };
        assert_eq!(
            serde_json::to_value(&secret).unwrap(),
            json!({ "type": "internal_validation" })
        );
    }
}
