//! Property DTOs
//!
//! Pipeline and trigger properties share the same request shapes.

use serde::{Deserialize, Serialize};

use super::{QueryParams, comma_joined};
use crate::domain::property::PropertyType;

/// Request body for creating or replacing a property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyPrototype {
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl PropertyPrototype {
    /// Property with the given type and value, nothing else set
    pub fn new(
        name: impl Into<String>,
        property_type: PropertyType,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            property_type,
            value: Some(value.into()),
            options: Vec::new(),
            locked: None,
            path: None,
        }
    }

    /// Plain text property
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, PropertyType::Text, value)
    }

    /// Secure property; the service stores the value encrypted
    pub fn secure(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(name, PropertyType::Secure, value)
    }
}

/// Filters for listing properties
#[derive(Debug, Clone, Default)]
pub struct ListProperties {
    pub name: Option<String>,
    /// Only return properties of these types
    pub types: Vec<PropertyType>,
    /// Field to sort by; prefix with `-` for descending order
    pub sort: Option<String>,
}

impl QueryParams for ListProperties {
    fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(name) = &self.name {
            pairs.push(("name", name.clone()));
        }
        let types: Vec<&str> = self.types.iter().map(PropertyType::as_str).collect();
        if let Some(types) = comma_joined(&types) {
            pairs.push(("type", types));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        pairs
    }
}
