//! Registry composition
//!
//! Builds the tool name → tool definition mapping handed to an agent
//! execution loop: one shared client, approval flags resolved for the
//! mutating tools, optional preset filtering. Composition performs no
//! network I/O; remote calls only happen when a tool is executed.

use secrecy::SecretString;
use serde_json::Value;
use std::collections::BTreeMap;
use std::str::FromStr;
use std::sync::Arc;
use thiserror::Error;

use hubcap_github::{GitHubClient, GitHubError};
use hubcap_protocol::{ApprovalPolicy, Preset, PresetError, ToolName, ToolOutput, ToolSpec};

use crate::builtins::*;
use crate::{BoxedTool, ToolError};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Github(#[from] GitHubError),

    #[error(transparent)]
    Preset(#[from] PresetError),
}

/// The finished mapping of tool name to tool definition.
///
/// A freshly constructed value every time; composing twice with the same
/// inputs yields registries with identical key sets and approval flags.
pub struct ToolRegistry {
    tools: BTreeMap<ToolName, BoxedTool>,
}

impl ToolRegistry {
    pub fn builder(token: impl Into<String>) -> RegistryBuilder {
        RegistryBuilder {
            token: SecretString::from(token.into()),
            base_url: None,
            approval: ApprovalPolicy::default(),
            presets: None,
        }
    }

    pub fn get(&self, name: ToolName) -> Option<&BoxedTool> {
        self.tools.get(&name)
    }

    pub fn contains(&self, name: ToolName) -> bool {
        self.tools.contains_key(&name)
    }

    /// Registry key set, in stable order.
    pub fn names(&self) -> Vec<ToolName> {
        self.tools.keys().copied().collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Tool specifications for the model API, approval flags included.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.values().map(|tool| tool.spec()).collect()
    }

    /// Execute a tool by its wire name.
    pub async fn dispatch(&self, name: &str, input: Value) -> Result<ToolOutput, ToolError> {
        let tool = ToolName::from_str(name)
            .ok()
            .and_then(|name| self.tools.get(&name))
            .ok_or_else(|| ToolError::NotFound {
                name: name.to_string(),
            })?;

        tracing::debug!(tool = name, "dispatching tool");
        tool.execute(input).await
    }
}

/// Composes a [`ToolRegistry`].
#[derive(Debug)]
pub struct RegistryBuilder {
    token: SecretString,
    base_url: Option<String>,
    approval: ApprovalPolicy,
    presets: Option<Vec<Preset>>,
}

impl RegistryBuilder {
    /// Approval configuration for mutating tools. Default: every mutating
    /// tool requires approval.
    pub fn approval_policy(mut self, policy: ApprovalPolicy) -> Self {
        self.approval = policy;
        self
    }

    /// Restrict the registry to the union of these presets. Supplying an
    /// empty list yields an empty registry; not calling this yields all
    /// tools.
    pub fn presets(mut self, presets: impl IntoIterator<Item = Preset>) -> Self {
        self.presets = Some(presets.into_iter().collect());
        self
    }

    /// Like [`Self::presets`] but from wire names; unknown identifiers are
    /// rejected rather than ignored.
    pub fn preset_names<I, S>(self, names: I) -> Result<Self, PresetError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let presets = names
            .into_iter()
            .map(|name| Preset::from_str(name.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(self.presets(presets))
    }

    /// Point the underlying client at a non-default API host.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    pub fn build(self) -> Result<ToolRegistry, RegistryError> {
        let client = Arc::new(match &self.base_url {
            Some(url) => GitHubClient::with_base_url(self.token, url)?,
            None => GitHubClient::new(self.token)?,
        });

        let mut tools = BTreeMap::new();
        for name in ToolName::ALL {
            tools.insert(name, build_tool(name, &client, &self.approval));
        }

        if let Some(presets) = &self.presets {
            let keep = Preset::union(presets);
            tools.retain(|name, _| keep.contains(name));
        }

        Ok(ToolRegistry { tools })
    }
}

fn build_tool(name: ToolName, client: &Arc<GitHubClient>, approval: &ApprovalPolicy) -> BoxedTool {
    let client = Arc::clone(client);
    let gate = approval.resolve(name);
    match name {
        ToolName::GetRepository => Arc::new(GetRepositoryTool::new(client)),
        ToolName::ListIssues => Arc::new(ListIssuesTool::new(client)),
        ToolName::GetIssue => Arc::new(GetIssueTool::new(client)),
        ToolName::ListPullRequests => Arc::new(ListPullRequestsTool::new(client)),
        ToolName::GetPullRequest => Arc::new(GetPullRequestTool::new(client)),
        ToolName::ListCommits => Arc::new(ListCommitsTool::new(client)),
        ToolName::ListBranches => Arc::new(ListBranchesTool::new(client)),
        ToolName::GetFileContents => Arc::new(GetFileContentsTool::new(client)),
        ToolName::SearchRepositories => Arc::new(SearchRepositoriesTool::new(client)),
        ToolName::SearchCode => Arc::new(SearchCodeTool::new(client)),
        ToolName::SearchIssues => Arc::new(SearchIssuesTool::new(client)),
        ToolName::CreateIssue => Arc::new(CreateIssueTool::new(client, gate)),
        ToolName::AddIssueComment => Arc::new(AddIssueCommentTool::new(client, gate)),
        ToolName::CloseIssue => Arc::new(CloseIssueTool::new(client, gate)),
        ToolName::CreatePullRequest => Arc::new(CreatePullRequestTool::new(client, gate)),
        ToolName::MergePullRequest => Arc::new(MergePullRequestTool::new(client, gate)),
        ToolName::CreateBranch => Arc::new(CreateBranchTool::new(client, gate)),
        ToolName::CreateOrUpdateFile => Arc::new(CreateOrUpdateFileTool::new(client, gate)),
    }
}
