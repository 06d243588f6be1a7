//! Branch tools

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use hubcap_github::GitHubClient;
use hubcap_protocol::{JsonSchema, ToolName, ToolOutput};

use super::parse_input;
use crate::{Tool, ToolError};

// -- listBranches -----------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ListBranchesInput {
    owner: String,
    repo: String,
    per_page: Option<u32>,
}

/// List a repository's branches.
pub struct ListBranchesTool {
    client: Arc<GitHubClient>,
}

impl ListBranchesTool {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListBranchesTool {
    fn name(&self) -> ToolName {
        ToolName::ListBranches
    }

    fn description(&self) -> &str {
        "List branches in a repository with their head commit SHA and protection status."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("owner", JsonSchema::string().description("Repository owner"))
            .property("repo", JsonSchema::string().description("Repository name"))
            .property(
                "per_page",
                JsonSchema::integer().description("Results per page (max 100)"),
            )
            .required(&["owner", "repo"])
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let input: ListBranchesInput = parse_input(input)?;
        let branches = self
            .client
            .list_branches(&input.owner, &input.repo, input.per_page)
            .await?;

        Ok(ToolOutput::json(json!({
            "count": branches.len(),
            "branches": branches
                .iter()
                .map(|b| json!({ "name": b.name, "sha": b.commit.sha, "protected": b.protected }))
                .collect::<Vec<_>>(),
        })))
    }
}

// -- createBranch -----------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CreateBranchInput {
    owner: String,
    repo: String,
    /// Name of the branch to create.
    branch: String,
    /// Source: a 40-hex commit SHA, a branch name, or omitted for the
    /// repository's default branch.
    from: Option<String>,
}

fn is_commit_sha(s: &str) -> bool {
    s.len() == 40 && s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Create a branch from a commit SHA, a source branch, or the default branch.
///
/// When no SHA is supplied the source ref is resolved with an extra lookup
/// and the new ref is created from the SHA observed then. The two steps are
/// not transactional: if the source moves in between, the branch points at
/// the earlier commit.
pub struct CreateBranchTool {
    client: Arc<GitHubClient>,
    requires_approval: bool,
}

impl CreateBranchTool {
    pub fn new(client: Arc<GitHubClient>, requires_approval: bool) -> Self {
        Self {
            client,
            requires_approval,
        }
    }
}

#[async_trait]
impl Tool for CreateBranchTool {
    fn name(&self) -> ToolName {
        ToolName::CreateBranch
    }

    fn description(&self) -> &str {
        "Create a new branch from a commit SHA, another branch, or the repository's default branch."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("owner", JsonSchema::string().description("Repository owner"))
            .property("repo", JsonSchema::string().description("Repository name"))
            .property("branch", JsonSchema::string().description("Name of the branch to create"))
            .property(
                "from",
                JsonSchema::string().description(
                    "Source: a full commit SHA or a branch name (default branch if omitted)",
                ),
            )
            .required(&["owner", "repo", "branch"])
    }

    fn approval(&self) -> Option<bool> {
        Some(self.requires_approval)
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let input: CreateBranchInput = parse_input(input)?;

        let sha = match input.from.as_deref() {
            Some(from) if is_commit_sha(from) => from.to_string(),
            from => {
                let source = match from {
                    Some(branch) => branch.to_string(),
                    None => {
                        self.client
                            .get_repository(&input.owner, &input.repo)
                            .await?
                            .default_branch
                    }
                };
                self.client
                    .get_ref(&input.owner, &input.repo, &format!("heads/{source}"))
                    .await?
                    .object
                    .sha
            }
        };

        let created = self
            .client
            .create_ref(
                &input.owner,
                &input.repo,
                &format!("refs/heads/{}", input.branch),
                &sha,
            )
            .await?;

        Ok(ToolOutput::json(json!({
            "ref": created.ref_name,
            "branch": input.branch,
            "sha": created.object.sha,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_sha_detection() {
        assert!(is_commit_sha("0123456789abcdef0123456789abcdef01234567"));
        assert!(!is_commit_sha("main"));
        assert!(!is_commit_sha("0123456789abcdef"));
        // Right length, not hex
        assert!(!is_commit_sha("z123456789abcdef0123456789abcdef01234567"));
    }
}
