//! Pull request tools

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use hubcap_github::{GitHubClient, MergeOptions, NewPullRequest, PullRequest};
use hubcap_protocol::{JsonSchema, ToolName, ToolOutput};

use super::parse_input;
use crate::{Tool, ToolError};

fn pull_summary(pull: &PullRequest) -> Value {
    json!({
        "number": pull.number,
        "title": pull.title,
        "state": pull.state,
        "author": pull.user.login,
        "draft": pull.draft,
        "head": pull.head.ref_name,
        "base": pull.base.ref_name,
        "url": pull.html_url,
        "created_at": pull.created_at,
        "updated_at": pull.updated_at,
    })
}

// -- listPullRequests -------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ListPullRequestsInput {
    owner: String,
    repo: String,
    /// "open", "closed" or "all".
    state: Option<String>,
    /// Filter by base branch name.
    base: Option<String>,
    per_page: Option<u32>,
}

/// List a repository's pull requests.
pub struct ListPullRequestsTool {
    client: Arc<GitHubClient>,
}

impl ListPullRequestsTool {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListPullRequestsTool {
    fn name(&self) -> ToolName {
        ToolName::ListPullRequests
    }

    fn description(&self) -> &str {
        "List pull requests in a repository, optionally filtered by state and base branch."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("owner", JsonSchema::string().description("Repository owner"))
            .property("repo", JsonSchema::string().description("Repository name"))
            .property(
                "state",
                JsonSchema::string().description("State: open, closed or all (default: open)"),
            )
            .property("base", JsonSchema::string().description("Base branch to filter by"))
            .property(
                "per_page",
                JsonSchema::integer().description("Results per page (max 100)"),
            )
            .required(&["owner", "repo"])
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let input: ListPullRequestsInput = parse_input(input)?;
        let pulls = self
            .client
            .list_pull_requests(
                &input.owner,
                &input.repo,
                input.state.as_deref(),
                input.base.as_deref(),
                input.per_page,
            )
            .await?;

        Ok(ToolOutput::json(json!({
            "count": pulls.len(),
            "pull_requests": pulls.iter().map(pull_summary).collect::<Vec<_>>(),
        })))
    }
}

// -- getPullRequest ---------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GetPullRequestInput {
    owner: String,
    repo: String,
    pull_number: u64,
}

/// Fetch one pull request, including diff stats.
pub struct GetPullRequestTool {
    client: Arc<GitHubClient>,
}

impl GetPullRequestTool {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetPullRequestTool {
    fn name(&self) -> ToolName {
        ToolName::GetPullRequest
    }

    fn description(&self) -> &str {
        "Get a single pull request by number, including body, branches, merge state and diff statistics."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("owner", JsonSchema::string().description("Repository owner"))
            .property("repo", JsonSchema::string().description("Repository name"))
            .property(
                "pull_number",
                JsonSchema::integer().description("Pull request number"),
            )
            .required(&["owner", "repo", "pull_number"])
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let input: GetPullRequestInput = parse_input(input)?;
        let pull = self
            .client
            .get_pull_request(&input.owner, &input.repo, input.pull_number)
            .await?;

        Ok(ToolOutput::json(json!({
            "number": pull.number,
            "title": pull.title,
            "state": pull.state,
            "body": pull.body,
            "author": pull.user.login,
            "draft": pull.draft,
            "head": { "ref": pull.head.ref_name, "sha": pull.head.sha },
            "base": { "ref": pull.base.ref_name, "sha": pull.base.sha },
            "merged": pull.merged,
            "mergeable": pull.mergeable,
            "commits": pull.commits,
            "additions": pull.additions,
            "deletions": pull.deletions,
            "changed_files": pull.changed_files,
            "url": pull.html_url,
            "created_at": pull.created_at,
            "merged_at": pull.merged_at,
        })))
    }
}

// -- createPullRequest ------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CreatePullRequestInput {
    owner: String,
    repo: String,
    title: String,
    /// Branch with the changes.
    head: String,
    /// Branch to merge into.
    base: String,
    body: Option<String>,
    draft: Option<bool>,
}

/// Open a pull request.
pub struct CreatePullRequestTool {
    client: Arc<GitHubClient>,
    requires_approval: bool,
}

impl CreatePullRequestTool {
    pub fn new(client: Arc<GitHubClient>, requires_approval: bool) -> Self {
        Self {
            client,
            requires_approval,
        }
    }
}

#[async_trait]
impl Tool for CreatePullRequestTool {
    fn name(&self) -> ToolName {
        ToolName::CreatePullRequest
    }

    fn description(&self) -> &str {
        "Open a pull request from a head branch into a base branch."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("owner", JsonSchema::string().description("Repository owner"))
            .property("repo", JsonSchema::string().description("Repository name"))
            .property("title", JsonSchema::string().description("Pull request title"))
            .property("head", JsonSchema::string().description("Branch containing the changes"))
            .property("base", JsonSchema::string().description("Branch to merge into"))
            .property("body", JsonSchema::string().description("Pull request body (markdown)"))
            .property("draft", JsonSchema::boolean().description("Open as draft"))
            .required(&["owner", "repo", "title", "head", "base"])
    }

    fn approval(&self) -> Option<bool> {
        Some(self.requires_approval)
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let input: CreatePullRequestInput = parse_input(input)?;
        let pull = self
            .client
            .create_pull_request(
                &input.owner,
                &input.repo,
                &NewPullRequest {
                    title: input.title,
                    head: input.head,
                    base: input.base,
                    body: input.body,
                    draft: input.draft,
                },
            )
            .await?;

        Ok(ToolOutput::json(json!({
            "number": pull.number,
            "title": pull.title,
            "state": pull.state,
            "draft": pull.draft,
            "url": pull.html_url,
            "created_at": pull.created_at,
        })))
    }
}

// -- mergePullRequest -------------------------------------------------------

#[derive(Debug, Deserialize)]
struct MergePullRequestInput {
    owner: String,
    repo: String,
    pull_number: u64,
    commit_title: Option<String>,
    commit_message: Option<String>,
    /// "merge", "squash" or "rebase".
    merge_method: Option<String>,
}

/// Merge a pull request.
pub struct MergePullRequestTool {
    client: Arc<GitHubClient>,
    requires_approval: bool,
}

impl MergePullRequestTool {
    pub fn new(client: Arc<GitHubClient>, requires_approval: bool) -> Self {
        Self {
            client,
            requires_approval,
        }
    }
}

#[async_trait]
impl Tool for MergePullRequestTool {
    fn name(&self) -> ToolName {
        ToolName::MergePullRequest
    }

    fn description(&self) -> &str {
        "Merge a pull request using the merge, squash or rebase method."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("owner", JsonSchema::string().description("Repository owner"))
            .property("repo", JsonSchema::string().description("Repository name"))
            .property(
                "pull_number",
                JsonSchema::integer().description("Pull request number"),
            )
            .property(
                "commit_title",
                JsonSchema::string().description("Title for the merge commit"),
            )
            .property(
                "commit_message",
                JsonSchema::string().description("Message for the merge commit"),
            )
            .property(
                "merge_method",
                JsonSchema::string().description("merge, squash or rebase"),
            )
            .required(&["owner", "repo", "pull_number"])
    }

    fn approval(&self) -> Option<bool> {
        Some(self.requires_approval)
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let input: MergePullRequestInput = parse_input(input)?;
        let result = self
            .client
            .merge_pull_request(
                &input.owner,
                &input.repo,
                input.pull_number,
                &MergeOptions {
                    commit_title: input.commit_title,
                    commit_message: input.commit_message,
                    merge_method: input.merge_method,
                },
            )
            .await?;

        Ok(ToolOutput::json(json!({
            "merged": result.merged,
            "sha": result.sha,
            "message": result.message,
        })))
    }
}
