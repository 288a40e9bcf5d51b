//! Data Transfer Objects for requests to the Tekton Pipeline service
//!
//! This module contains request bodies (prototypes and merge patches) and
//! list options. Unset optional fields are left out of the serialized body
//! so the service applies its own defaults.

pub mod definition;
pub mod pipeline;
pub mod property;
pub mod run;
pub mod trigger;

/// Options that render to URL query parameters
pub trait QueryParams {
    /// Query pairs for the options that are set, in a stable order
    fn query_pairs(&self) -> Vec<(&'static str, String)>;
}

/// Join a multi-valued query option the way the service expects it
pub(crate) fn comma_joined<T: AsRef<str>>(values: &[T]) -> Option<String> {
    if values.is_empty() {
        None
    } else {
        Some(
            values
                .iter()
                .map(|v| v.as_ref())
                .collect::<Vec<&str>>()
                .join(","),
        )
    }
}
