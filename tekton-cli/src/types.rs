//! Common types used across CLI modules

use uuid::Uuid;

/// Identifier that can be either a full UUID or an unambiguous prefix
///
/// Run and trigger IDs are UUIDs, so users may type just the first few
/// characters of one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdOrPrefix {
    /// Full UUID
    Full(Uuid),
    /// Prefix that should uniquely identify a resource
    Prefix(String),
}

impl IdOrPrefix {
    /// Parse a string into an IdOrPrefix
    ///
    /// Attempts to parse as a full UUID first, otherwise treats as a prefix
    pub fn parse(input: &str) -> Self {
        match Uuid::parse_str(input) {
            Ok(uuid) => IdOrPrefix::Full(uuid),
            Err(_) => IdOrPrefix::Prefix(input.to_lowercase()),
        }
    }

    /// The full ID, when no lookup is needed
    pub fn as_full(&self) -> Option<String> {
        match self {
            IdOrPrefix::Full(uuid) => Some(uuid.hyphenated().to_string()),
            IdOrPrefix::Prefix(_) => None,
        }
    }

    /// Whether `id` is identified by this value
    pub fn matches(&self, id: &str) -> bool {
        match self {
            IdOrPrefix::Full(uuid) => Uuid::parse_str(id).is_ok_and(|other| other == *uuid),
            IdOrPrefix::Prefix(prefix) => id.to_lowercase().starts_with(prefix.as_str()),
        }
    }
}

impl std::fmt::Display for IdOrPrefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdOrPrefix::Full(uuid) => write!(f, "{}", uuid),
            IdOrPrefix::Prefix(prefix) => write!(f, "{}", prefix),
        }
    }
}

impl From<&str> for IdOrPrefix {
    fn from(s: &str) -> Self {
        IdOrPrefix::parse(s)
    }
}
