//! Definition DTOs

use serde::{Deserialize, Serialize};

use crate::domain::definition::{DefinitionSource, DefinitionSourceProperties};

/// Request body for creating or replacing a definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefinitionPrototype {
    pub source: DefinitionSource,
}

impl DefinitionPrototype {
    /// Definition tracking a branch of a git repository
    pub fn git_branch(
        url: impl Into<String>,
        branch: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self::git(DefinitionSourceProperties {
            url: url.into(),
            branch: Some(branch.into()),
            path: path.into(),
            ..Default::default()
        })
    }

    /// Definition pinned to a tag of a git repository
    pub fn git_tag(url: impl Into<String>, tag: impl Into<String>, path: impl Into<String>) -> Self {
        Self::git(DefinitionSourceProperties {
            url: url.into(),
            tag: Some(tag.into()),
            path: path.into(),
            ..Default::default()
        })
    }

    fn git(properties: DefinitionSourceProperties) -> Self {
        Self {
            source: DefinitionSource {
                source_type: "git".to_string(),
                properties,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_git_branch_body() {
        let req = DefinitionPrototype::git_branch(
            "https://github.com/open-toolchain/hello-tekton.git",
            "master",
            ".tekton",
        );
        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "source": {
                    "type": "git",
                    "properties": {
                        "url": "https://github.com/open-toolchain/hello-tekton.git",
                        "branch": "master",
                        "path": ".tekton"
                    }
                }
            })
        );
    }
}
