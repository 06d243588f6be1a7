//! Commit tools

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use hubcap_github::GitHubClient;
use hubcap_protocol::{JsonSchema, ToolName, ToolOutput};

use super::parse_input;
use crate::{Tool, ToolError};

#[derive(Debug, Deserialize)]
struct ListCommitsInput {
    owner: String,
    repo: String,
    /// Branch name or commit SHA to start listing from.
    sha: Option<String>,
    /// Only commits touching this path.
    path: Option<String>,
    per_page: Option<u32>,
}

/// List a repository's commit history.
pub struct ListCommitsTool {
    client: Arc<GitHubClient>,
}

impl ListCommitsTool {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for ListCommitsTool {
    fn name(&self) -> ToolName {
        ToolName::ListCommits
    }

    fn description(&self) -> &str {
        "List commits on a branch, optionally restricted to commits touching a given path."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("owner", JsonSchema::string().description("Repository owner"))
            .property("repo", JsonSchema::string().description("Repository name"))
            .property(
                "sha",
                JsonSchema::string().description("Branch name or SHA to list from (default branch if omitted)"),
            )
            .property("path", JsonSchema::string().description("Only commits touching this path"))
            .property(
                "per_page",
                JsonSchema::integer().description("Results per page (max 100)"),
            )
            .required(&["owner", "repo"])
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let input: ListCommitsInput = parse_input(input)?;
        let commits = self
            .client
            .list_commits(
                &input.owner,
                &input.repo,
                input.sha.as_deref(),
                input.path.as_deref(),
                input.per_page,
            )
            .await?;

        Ok(ToolOutput::json(json!({
            "count": commits.len(),
            "commits": commits
                .iter()
                .map(|entry| {
                    json!({
                        "sha": entry.sha,
                        "message": entry.commit.message,
                        "author": entry.commit.author.name,
                        "login": entry.author.as_ref().map(|a| a.login.clone()),
                        "date": entry.commit.author.date,
                        "url": entry.html_url,
                    })
                })
                .collect::<Vec<_>>(),
        })))
    }
}
