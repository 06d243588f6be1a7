//! Issue tools

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use hubcap_github::{GitHubClient, Issue, NewIssue};
use hubcap_protocol::{JsonSchema, ToolName, ToolOutput};

use super::parse_input;
use crate::{Tool, ToolError};

fn issue_summary(issue: &Issue) -> Value {
    json!({
        "number": issue.number,
        "title": issue.title,
        "state": issue.state,
        "author": issue.user.login,
        "labels": issue.labels.iter().map(|l| l.name.clone()).collect::<Vec<_>>(),
        "comments": issue.comments,
        "url": issue.html_url,
        "created_at": issue.created_at,
        "updated_at": issue.updated_at,
    })
}

// -- listIssues -------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ListIssuesInput {
    owner: String,
    repo: String,
    /// "open", "closed" or "all".
    state: Option<String>,
    labels: Option<Vec<String>>,
    per_page: Option<u32>,
}

/// List a repository's issues.
pub struct ListIssuesTool {
    client: Arc<GitHubClient>,
}

impl ListIssuesTool {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListIssuesTool {
    fn name(&self) -> ToolName {
        ToolName::ListIssues
    }

    fn description(&self) -> &str {
        "List issues in a repository, optionally filtered by state and labels."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("owner", JsonSchema::string().description("Repository owner"))
            .property("repo", JsonSchema::string().description("Repository name"))
            .property(
                "state",
                JsonSchema::string().description("Issue state: open, closed or all (default: open)"),
            )
            .property(
                "labels",
                JsonSchema::array(JsonSchema::string()).description("Label names to filter by"),
            )
            .property(
                "per_page",
                JsonSchema::integer().description("Results per page (max 100)"),
            )
            .required(&["owner", "repo"])
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let input: ListIssuesInput = parse_input(input)?;
        let labels = input.labels.map(|l| l.join(","));
        let issues = self
            .client
            .list_issues(
                &input.owner,
                &input.repo,
                input.state.as_deref(),
                labels.as_deref(),
                input.per_page,
            )
            .await?;

        Ok(ToolOutput::json(json!({
            "count": issues.len(),
            "issues": issues.iter().map(issue_summary).collect::<Vec<_>>(),
        })))
    }
}

// -- getIssue ---------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GetIssueInput {
    owner: String,
    repo: String,
    issue_number: u64,
}

/// Fetch one issue, including its body.
pub struct GetIssueTool {
    client: Arc<GitHubClient>,
}

impl GetIssueTool {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetIssueTool {
    fn name(&self) -> ToolName {
        ToolName::GetIssue
    }

    fn description(&self) -> &str {
        "Get a single issue by number, including its body, labels and assignees."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("owner", JsonSchema::string().description("Repository owner"))
            .property("repo", JsonSchema::string().description("Repository name"))
            .property("issue_number", JsonSchema::integer().description("Issue number"))
            .required(&["owner", "repo", "issue_number"])
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let input: GetIssueInput = parse_input(input)?;
        let issue = self
            .client
            .get_issue(&input.owner, &input.repo, input.issue_number)
            .await?;

        Ok(ToolOutput::json(json!({
            "number": issue.number,
            "title": issue.title,
            "state": issue.state,
            "state_reason": issue.state_reason,
            "body": issue.body,
            "author": issue.user.login,
            "labels": issue.labels.iter().map(|l| l.name.clone()).collect::<Vec<_>>(),
            "assignees": issue.assignees.iter().map(|a| a.login.clone()).collect::<Vec<_>>(),
            "comments": issue.comments,
            "url": issue.html_url,
            "created_at": issue.created_at,
            "updated_at": issue.updated_at,
            "closed_at": issue.closed_at,
        })))
    }
}

// -- createIssue ------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CreateIssueInput {
    owner: String,
    repo: String,
    title: String,
    body: Option<String>,
    #[serde(default)]
    labels: Vec<String>,
    #[serde(default)]
    assignees: Vec<String>,
}

/// Open a new issue.
pub struct CreateIssueTool {
    client: Arc<GitHubClient>,
    requires_approval: bool,
}

impl CreateIssueTool {
    pub fn new(client: Arc<GitHubClient>, requires_approval: bool) -> Self {
        Self {
            client,
            requires_approval,
        }
    }
}

#[async_trait]
impl Tool for CreateIssueTool {
    fn name(&self) -> ToolName {
        ToolName::CreateIssue
    }

    fn description(&self) -> &str {
        "Open a new issue with a title and optional body, labels and assignees."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("owner", JsonSchema::string().description("Repository owner"))
            .property("repo", JsonSchema::string().description("Repository name"))
            .property("title", JsonSchema::string().description("Issue title"))
            .property("body", JsonSchema::string().description("Issue body (markdown)"))
            .property(
                "labels",
                JsonSchema::array(JsonSchema::string()).description("Labels to apply"),
            )
            .property(
                "assignees",
                JsonSchema::array(JsonSchema::string()).description("Logins to assign"),
            )
            .required(&["owner", "repo", "title"])
    }

    fn approval(&self) -> Option<bool> {
        Some(self.requires_approval)
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let input: CreateIssueInput = parse_input(input)?;
        let issue = self
            .client
            .create_issue(
                &input.owner,
                &input.repo,
                &NewIssue {
                    title: input.title,
                    body: input.body,
                    labels: input.labels,
                    assignees: input.assignees,
                },
            )
            .await?;

        Ok(ToolOutput::json(json!({
            "number": issue.number,
            "title": issue.title,
            "state": issue.state,
            "url": issue.html_url,
            "created_at": issue.created_at,
        })))
    }
}

// -- addIssueComment --------------------------------------------------------

#[derive(Debug, Deserialize)]
struct AddIssueCommentInput {
    owner: String,
    repo: String,
    issue_number: u64,
    body: String,
}

/// Comment on an issue or pull request.
pub struct AddIssueCommentTool {
    client: Arc<GitHubClient>,
    requires_approval: bool,
}

impl AddIssueCommentTool {
    pub fn new(client: Arc<GitHubClient>, requires_approval: bool) -> Self {
        Self {
            client,
            requires_approval,
        }
    }
}

#[async_trait]
impl Tool for AddIssueCommentTool {
    fn name(&self) -> ToolName {
        ToolName::AddIssueComment
    }

    fn description(&self) -> &str {
        "Add a comment to an issue or pull request."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("owner", JsonSchema::string().description("Repository owner"))
            .property("repo", JsonSchema::string().description("Repository name"))
            .property(
                "issue_number",
                JsonSchema::integer().description("Issue or pull request number"),
            )
            .property("body", JsonSchema::string().description("Comment body (markdown)"))
            .required(&["owner", "repo", "issue_number", "body"])
    }

    fn approval(&self) -> Option<bool> {
        Some(self.requires_approval)
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let input: AddIssueCommentInput = parse_input(input)?;
        let comment = self
            .client
            .add_issue_comment(&input.owner, &input.repo, input.issue_number, &input.body)
            .await?;

        Ok(ToolOutput::json(json!({
            "id": comment.id,
            "author": comment.user.login,
            "url": comment.html_url,
            "created_at": comment.created_at,
        })))
    }
}

// -- closeIssue -------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CloseIssueInput {
    owner: String,
    repo: String,
    issue_number: u64,
    /// "completed" or "not_planned".
    state_reason: Option<String>,
}

/// Close an issue.
pub struct CloseIssueTool {
    client: Arc<GitHubClient>,
    requires_approval: bool,
}

impl CloseIssueTool {
    pub fn new(client: Arc<GitHubClient>, requires_approval: bool) -> Self {
        Self {
            client,
            requires_approval,
        }
    }
}

#[async_trait]
impl Tool for CloseIssueTool {
    fn name(&self) -> ToolName {
        ToolName::CloseIssue
    }

    fn description(&self) -> &str {
        "Close an issue, optionally marking it completed or not planned."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("owner", JsonSchema::string().description("Repository owner"))
            .property("repo", JsonSchema::string().description("Repository name"))
            .property("issue_number", JsonSchema::integer().description("Issue number"))
            .property(
                "state_reason",
                JsonSchema::string().description("Reason: completed or not_planned"),
            )
            .required(&["owner", "repo", "issue_number"])
    }

    fn approval(&self) -> Option<bool> {
        Some(self.requires_approval)
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let input: CloseIssueInput = parse_input(input)?;
        let issue = self
            .client
            .close_issue(
                &input.owner,
                &input.repo,
                input.issue_number,
                input.state_reason.as_deref(),
            )
            .await?;

        Ok(ToolOutput::json(json!({
            "number": issue.number,
            "state": issue.state,
            "state_reason": issue.state_reason,
            "url": issue.html_url,
            "closed_at": issue.closed_at,
        })))
    }
}
