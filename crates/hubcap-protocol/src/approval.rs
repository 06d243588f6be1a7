//! Approval policy for mutating tools
//!
//! The calling framework decides what a `true` flag means (typically a
//! human-in-the-loop prompt before execution); this layer only resolves the
//! configured policy into one boolean per mutating tool.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::names::ToolName;

/// Approval configuration for the registry's mutating tools.
///
/// Deserializes from either a bare boolean (uniform policy) or a map of
/// tool name to boolean (per-tool policy).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ApprovalPolicy {
    /// One flag for every mutating tool.
    Uniform(bool),
    /// Per-tool flags; tools absent from the map require approval.
    PerTool(HashMap<ToolName, bool>),
}

impl ApprovalPolicy {
    /// Resolve the flag for one mutating tool.
    ///
    /// Unspecified entries in a per-tool map default to `true`: a mutating
    /// operation nobody thought about still requires approval.
    pub fn resolve(&self, tool: ToolName) -> bool {
        match self {
            ApprovalPolicy::Uniform(flag) => *flag,
            ApprovalPolicy::PerTool(map) => map.get(&tool).copied().unwrap_or(true),
        }
    }
}

impl Default for ApprovalPolicy {
    fn default() -> Self {
        ApprovalPolicy::Uniform(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_applies_to_every_tool() {
        for flag in [true, false] {
            let policy = ApprovalPolicy::Uniform(flag);
            for tool in ToolName::MUTATING {
                assert_eq!(policy.resolve(tool), flag);
            }
        }
    }

    #[test]
    fn test_per_tool_defaults_to_true() {
        let policy = ApprovalPolicy::PerTool(HashMap::from([
            (ToolName::MergePullRequest, true),
            (ToolName::CreateIssue, false),
        ]));

        assert!(policy.resolve(ToolName::MergePullRequest));
        assert!(!policy.resolve(ToolName::CreateIssue));
        // Unspecified entry
        assert!(policy.resolve(ToolName::AddIssueComment));
    }

    #[test]
    fn test_default_requires_approval() {
        let policy = ApprovalPolicy::default();
        for tool in ToolName::MUTATING {
            assert!(policy.resolve(tool));
        }
    }

    #[test]
    fn test_deserialize_bare_boolean() {
        let policy: ApprovalPolicy = serde_json::from_str("false").unwrap();
        assert_eq!(policy, ApprovalPolicy::Uniform(false));
    }

    #[test]
    fn test_deserialize_per_tool_map() {
        let policy: ApprovalPolicy =
            serde_json::from_str(r#"{"createIssue": false, "mergePullRequest": true}"#).unwrap();
        assert!(!policy.resolve(ToolName::CreateIssue));
        assert!(policy.resolve(ToolName::MergePullRequest));
        assert!(policy.resolve(ToolName::CreateBranch));
    }
}
