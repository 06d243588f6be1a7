//! Repository tools

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use hubcap_github::GitHubClient;
use hubcap_protocol::{JsonSchema, ToolName, ToolOutput};

use super::parse_input;
use crate::{Tool, ToolError};

#[derive(Debug, Deserialize)]
struct GetRepositoryInput {
    owner: String,
    repo: String,
}

/// Fetch one repository's metadata.
pub struct GetRepositoryTool {
    client: Arc<GitHubClient>,
}

impl GetRepositoryTool {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for GetRepositoryTool {
    fn name(&self) -> ToolName {
        ToolName::GetRepository
    }

    fn description(&self) -> &str {
        "Get metadata about a repository: description, default branch, primary language, star/fork/open-issue counts and timestamps."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("owner", JsonSchema::string().description("Repository owner"))
            .property("repo", JsonSchema::string().description("Repository name"))
            .required(&["owner", "repo"])
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let input: GetRepositoryInput = parse_input(input)?;
        let repo = self.client.get_repository(&input.owner, &input.repo).await?;

        Ok(ToolOutput::json(json!({
            "name": repo.name,
            "full_name": repo.full_name,
            "owner": repo.owner.login,
            "private": repo.private,
            "description": repo.description,
            "default_branch": repo.default_branch,
            "language": repo.language,
            "stars": repo.stargazers_count,
            "forks": repo.forks_count,
            "open_issues": repo.open_issues_count,
            "url": repo.html_url,
            "created_at": repo.created_at,
            "updated_at": repo.updated_at,
            "pushed_at": repo.pushed_at,
        })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_malformed_input_fails_before_any_call() {
        let client = Arc::new(
            GitHubClient::with_base_url(
                secrecy::SecretString::from("t"),
                "http://127.0.0.1:1", // unroutable; must never be contacted
            )
            .unwrap(),
        );
        let tool = GetRepositoryTool::new(client);

        let err = tool.execute(json!({ "owner": "octocat" })).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidInput { .. }));
    }
}
