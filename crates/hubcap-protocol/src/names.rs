//! Tool name enumeration and preset tables
//!
//! `ToolName` is a closed set: every tool the registry can ever contain is a
//! variant here, and preset membership is expressed in terms of variants, so
//! a preset can never reference a tool that does not exist.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use thiserror::Error;

/// Identifier of a tool in the registry.
///
/// Wire names are camelCase, matching what the agent framework sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ToolName {
    GetRepository,
    ListIssues,
    GetIssue,
    ListPullRequests,
    GetPullRequest,
    ListCommits,
    ListBranches,
    GetFileContents,
    SearchRepositories,
    SearchCode,
    SearchIssues,
    CreateIssue,
    AddIssueComment,
    CloseIssue,
    CreatePullRequest,
    MergePullRequest,
    CreateBranch,
    CreateOrUpdateFile,
}

impl ToolName {
    /// Every tool the registry knows about.
    pub const ALL: [ToolName; 18] = [
        ToolName::GetRepository,
        ToolName::ListIssues,
        ToolName::GetIssue,
        ToolName::ListPullRequests,
        ToolName::GetPullRequest,
        ToolName::ListCommits,
        ToolName::ListBranches,
        ToolName::GetFileContents,
        ToolName::SearchRepositories,
        ToolName::SearchCode,
        ToolName::SearchIssues,
        ToolName::CreateIssue,
        ToolName::AddIssueComment,
        ToolName::CloseIssue,
        ToolName::CreatePullRequest,
        ToolName::MergePullRequest,
        ToolName::CreateBranch,
        ToolName::CreateOrUpdateFile,
    ];

    /// The tools whose execution changes remote state.
    pub const MUTATING: [ToolName; 7] = [
        ToolName::CreateIssue,
        ToolName::AddIssueComment,
        ToolName::CloseIssue,
        ToolName::CreatePullRequest,
        ToolName::MergePullRequest,
        ToolName::CreateBranch,
        ToolName::CreateOrUpdateFile,
    ];

    /// Whether executing this tool changes remote state.
    pub fn is_mutating(&self) -> bool {
        Self::MUTATING.contains(self)
    }

    /// The camelCase wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::GetRepository => "getRepository",
            ToolName::ListIssues => "listIssues",
            ToolName::GetIssue => "getIssue",
            ToolName::ListPullRequests => "listPullRequests",
            ToolName::GetPullRequest => "getPullRequest",
            ToolName::ListCommits => "listCommits",
            ToolName::ListBranches => "listBranches",
            ToolName::GetFileContents => "getFileContents",
            ToolName::SearchRepositories => "searchRepositories",
            ToolName::SearchCode => "searchCode",
            ToolName::SearchIssues => "searchIssues",
            ToolName::CreateIssue => "createIssue",
            ToolName::AddIssueComment => "addIssueComment",
            ToolName::CloseIssue => "closeIssue",
            ToolName::CreatePullRequest => "createPullRequest",
            ToolName::MergePullRequest => "mergePullRequest",
            ToolName::CreateBranch => "createBranch",
            ToolName::CreateOrUpdateFile => "createOrUpdateFile",
        }
    }
}

impl std::fmt::Display for ToolName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for a tool name outside the closed enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown tool name: {0}")]
pub struct ToolNameError(pub String);

impl FromStr for ToolName {
    type Err = ToolNameError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| ToolNameError(s.to_string()))
    }
}

/// A named, curated subset of the tool enumeration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    CodeReview,
    IssueTriage,
    RepoExplorer,
    Maintainer,
}

impl Preset {
    pub const ALL: [Preset; 4] = [
        Preset::CodeReview,
        Preset::IssueTriage,
        Preset::RepoExplorer,
        Preset::Maintainer,
    ];

    /// The kebab-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Preset::CodeReview => "code-review",
            Preset::IssueTriage => "issue-triage",
            Preset::RepoExplorer => "repo-explorer",
            Preset::Maintainer => "maintainer",
        }
    }

    /// The tools this preset scopes an agent down to.
    pub fn members(&self) -> &'static [ToolName] {
        match self {
            Preset::CodeReview => &[
                ToolName::GetRepository,
                ToolName::ListPullRequests,
                ToolName::GetPullRequest,
                ToolName::ListCommits,
                ToolName::GetFileContents,
                ToolName::SearchCode,
                ToolName::AddIssueComment,
            ],
            Preset::IssueTriage => &[
                ToolName::ListIssues,
                ToolName::GetIssue,
                ToolName::CreateIssue,
                ToolName::AddIssueComment,
                ToolName::CloseIssue,
                ToolName::GetRepository,
                ToolName::SearchRepositories,
                ToolName::SearchCode,
            ],
            Preset::RepoExplorer => &[
                ToolName::GetRepository,
                ToolName::SearchRepositories,
                ToolName::SearchCode,
                ToolName::SearchIssues,
                ToolName::ListIssues,
                ToolName::ListPullRequests,
                ToolName::ListCommits,
                ToolName::ListBranches,
                ToolName::GetFileContents,
            ],
            Preset::Maintainer => &ToolName::ALL,
        }
    }

    /// Union of the member sets of `presets`. Order independent; an empty
    /// slice yields the empty set (callers treat "no presets supplied" as
    /// "no filtering" before ever getting here).
    pub fn union(presets: &[Preset]) -> BTreeSet<ToolName> {
        presets
            .iter()
            .flat_map(|preset| preset.members().iter().copied())
            .collect()
    }
}

impl std::fmt::Display for Preset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error for an unrecognized preset identifier.
///
/// Unknown presets are rejected rather than treated as empty sets, so a typo
/// surfaces before a registry with silently missing tools is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown preset: {0} (expected one of: code-review, issue-triage, repo-explorer, maintainer)")]
pub struct PresetError(pub String);

impl FromStr for Preset {
    type Err = PresetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| PresetError(s.to_string()))
    }
}
