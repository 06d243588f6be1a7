//! Search tools

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use hubcap_github::GitHubClient;
use hubcap_protocol::{JsonSchema, ToolName, ToolOutput};

use super::parse_input;
use crate::{Tool, ToolError};

#[derive(Debug, Deserialize)]
struct SearchInput {
    /// GitHub search syntax, e.g. "language:rust topic:agents".
    query: String,
    per_page: Option<u32>,
}

fn search_schema(what: &str) -> JsonSchema {
    JsonSchema::object()
        .property(
            "query",
            JsonSchema::string().description(format!(
                "Search query in GitHub search syntax for {what}"
            )),
        )
        .property(
            "per_page",
            JsonSchema::integer().description("Results per page (max 100)"),
        )
        .required(&["query"])
}

// -- searchRepositories -----------------------------------------------------

/// Search repositories.
pub struct SearchRepositoriesTool {
    client: Arc<GitHubClient>,
}

impl SearchRepositoriesTool {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SearchRepositoriesTool {
    fn name(&self) -> ToolName {
        ToolName::SearchRepositories
    }

    fn description(&self) -> &str {
        "Search for repositories using GitHub search syntax (e.g. language:, topic:, stars: qualifiers)."
    }

    fn schema(&self) -> JsonSchema {
        search_schema("repositories")
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let input: SearchInput = parse_input(input)?;
        let results = self
            .client
            .search_repositories(&input.query, input.per_page)
            .await?;

        Ok(ToolOutput::json(json!({
            "total_count": results.total_count,
            "items": results
                .items
                .iter()
                .map(|repo| json!({
                    "full_name": repo.full_name,
                    "description": repo.description,
                    "language": repo.language,
                    "stars": repo.stargazers_count,
                    "url": repo.html_url,
                }))
                .collect::<Vec<_>>(),
        })))
    }
}

// -- searchCode -------------------------------------------------------------

/// Search file contents.
pub struct SearchCodeTool {
    client: Arc<GitHubClient>,
}

impl SearchCodeTool {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SearchCodeTool {
    fn name(&self) -> ToolName {
        ToolName::SearchCode
    }

    fn description(&self) -> &str {
        "Search code across repositories using GitHub search syntax (e.g. repo:, path:, extension: qualifiers)."
    }

    fn schema(&self) -> JsonSchema {
        search_schema("code")
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let input: SearchInput = parse_input(input)?;
        let results = self.client.search_code(&input.query, input.per_page).await?;

        Ok(ToolOutput::json(json!({
            "total_count": results.total_count,
            "items": results
                .items
                .iter()
                .map(|item| json!({
                    "name": item.name,
                    "path": item.path,
                    "repository": item.repository.full_name,
                    "sha": item.sha,
                    "url": item.html_url,
                }))
                .collect::<Vec<_>>(),
        })))
    }
}

// -- searchIssues -----------------------------------------------------------

/// Search issues and pull requests.
pub struct SearchIssuesTool {
    client: Arc<GitHubClient>,
}

impl SearchIssuesTool {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SearchIssuesTool {
    fn name(&self) -> ToolName {
        ToolName::SearchIssues
    }

    fn description(&self) -> &str {
        "Search issues and pull requests using GitHub search syntax (e.g. repo:, is:open, label: qualifiers)."
    }

    fn schema(&self) -> JsonSchema {
        search_schema("issues and pull requests")
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let input: SearchInput = parse_input(input)?;
        let results = self
            .client
            .search_issues(&input.query, input.per_page)
            .await?;

        Ok(ToolOutput::json(json!({
            "total_count": results.total_count,
            "items": results
                .items
                .iter()
                .map(|issue| json!({
                    "number": issue.number,
                    "title": issue.title,
                    "state": issue.state,
                    "author": issue.user.login,
                    "comments": issue.comments,
                    "url": issue.html_url,
                    "created_at": issue.created_at,
                }))
                .collect::<Vec<_>>(),
        })))
    }
}
