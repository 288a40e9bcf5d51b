//! Definition domain types

use serde::{Deserialize, Serialize};

use super::ToolRef;

/// Binds a pipeline to the repository location holding its Tekton YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Definition {
    pub id: String,
    pub href: Option<String>,
    pub source: DefinitionSource,
}

/// Where the definition YAML lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionSource {
    /// Source kind; only "git" is currently offered by the service
    #[serde(rename = "type")]
    pub source_type: String,
    pub properties: DefinitionSourceProperties,
}

/// Repository coordinates of a definition
///
/// Exactly one of `branch` or `tag` is expected to be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefinitionSourceProperties {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<ToolRef>,
}

/// Definitions attached to a pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionsCollection {
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

impl Definition {
    /// Branch or tag the definition tracks, whichever is set
    pub fn git_ref(&self) -> Option<&str> {
        let props = &self.source.properties;
        props.branch.as_deref().or(props.tag.as_deref())
    }
}
