//! Property domain types

use serde::{Deserialize, Serialize};

/// A key/value configuration entry on a pipeline or trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    pub value: Option<String>,
    pub href: Option<String>,
    /// Allowed values for `single_select` properties
    #[serde(rename = "enum", default)]
    pub options: Vec<String>,
    #[serde(rename = "type")]
    pub property_type: Option<PropertyType>,
    /// Locked trigger properties cannot be overridden at run time
    pub locked: Option<bool>,
    /// Dot notation path into an `integration` property's JSON
    pub path: Option<String>,
}

/// Kind of a property
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    Secure,
    Text,
    Integration,
    SingleSelect,
    Appconfig,
}

impl PropertyType {
    /// Wire name of the type, as used in query parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::Secure => "secure",
            PropertyType::Text => "text",
            PropertyType::Integration => "integration",
            PropertyType::SingleSelect => "single_select",
            PropertyType::Appconfig => "appconfig",
        }
    }
}

impl std::fmt::Display for PropertyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "secure" => Ok(PropertyType::Secure),
            "text" => Ok(PropertyType::Text),
            "integration" => Ok(PropertyType::Integration),
            "single_select" => Ok(PropertyType::SingleSelect),
            "appconfig" => Ok(PropertyType::Appconfig),
            other => Err(format!("unknown property type: {}", other)),
        }
    }
}

/// Properties of a pipeline or trigger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertiesCollection {
    #[serde(default)]
    pub properties: Vec<Property>,
}
