//! ID resolver module
//!
//! Handles resolution of ID prefixes to full IDs by querying the API.
//! This allows users to specify short, unambiguous prefixes instead of full UUIDs.

use anyhow::{Context, Result, anyhow};
use tekton_client::TektonPipelineClient;
use tekton_core::dto::run::ListPipelineRuns;
use tekton_core::dto::trigger::ListTriggers;
use tracing::debug;

use crate::types::IdOrPrefix;

/// Resolve a pipeline run ID or prefix within a pipeline
///
/// Full IDs are returned as-is. Prefixes are matched against every run of
/// the pipeline, walking all pages of the run list.
///
/// # Errors
/// Returns an error if:
/// - No run matches the prefix
/// - Multiple runs match the prefix (ambiguous)
/// - API call fails
pub async fn resolve_run_id(
    client: &TektonPipelineClient,
    pipeline_id: &str,
    id_or_prefix: &IdOrPrefix,
) -> Result<String> {
    if let Some(id) = id_or_prefix.as_full() {
        return Ok(id);
    }

    let runs = client
        .pipeline_runs_pager(pipeline_id, ListPipelineRuns::default())?
        .all()
        .await
        .context("Failed to fetch pipeline runs for ID resolution")?;
    debug!("Resolving run prefix {} against {} run(s)", id_or_prefix, runs.len());

    unique_match(runs.iter().map(|r| r.id.as_str()), id_or_prefix, "run")
}

/// Resolve a trigger ID or prefix within a pipeline
///
/// # Errors
/// Returns an error if no trigger or more than one trigger matches
pub async fn resolve_trigger_id(
    client: &TektonPipelineClient,
    pipeline_id: &str,
    id_or_prefix: &IdOrPrefix,
) -> Result<String> {
    if let Some(id) = id_or_prefix.as_full() {
        return Ok(id);
    }

    let triggers = client
        .list_tekton_pipeline_triggers(pipeline_id, &ListTriggers::default())
        .await
        .context("Failed to fetch triggers for ID resolution")?
        .triggers;

    unique_match(triggers.iter().map(|t| t.id.as_str()), id_or_prefix, "trigger")
}

/// Pick the single ID identified by `id_or_prefix`
fn unique_match<'a>(
    ids: impl Iterator<Item = &'a str>,
    id_or_prefix: &IdOrPrefix,
    kind: &str,
) -> Result<String> {
    let matches: Vec<&str> = ids.filter(|id| id_or_prefix.matches(id)).collect();

    match matches.as_slice() {
        [] => Err(anyhow!(
            "No {} found with ID starting with '{}'",
            kind,
            id_or_prefix
        )),
        [id] => Ok(id.to_string()),
        _ => Err(anyhow!(
            "Ambiguous prefix '{}' matches multiple {}s: {}",
            id_or_prefix,
            kind,
            matches.join(", ")
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDS: [&str; 3] = [
        "94619026-912b-4d92-8f51-6c74f0692d90",
        "94619977-1111-4d92-8f51-6c74f0692d90",
        "1bb892a1-2e04-4768-a369-b1159eace147",
    ];

    #[test]
    fn test_unique_prefix_resolves() {
        let id = unique_match(IDS.into_iter(), &IdOrPrefix::parse("1bb"), "run").unwrap();
        assert_eq!(id, IDS[2]);
    }

    #[test]
    fn test_ambiguous_prefix_lists_candidates() {
        let err = unique_match(IDS.into_iter(), &IdOrPrefix::parse("9461"), "run").unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("Ambiguous prefix '9461' matches multiple runs"));
        assert!(msg.contains(IDS[0]) && msg.contains(IDS[1]));
    }

    #[test]
    fn test_unknown_prefix() {
        let err = unique_match(IDS.into_iter(), &IdOrPrefix::parse("ffff"), "trigger").unwrap_err();
        assert_eq!(err.to_string(), "No trigger found with ID starting with 'ffff'");
    }
}
