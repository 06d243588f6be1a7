//! File contents tools

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

use hubcap_github::{Contents, FileWrite, GitHubClient, GitHubError};
use hubcap_protocol::{JsonSchema, ToolName, ToolOutput};

use super::parse_input;
use crate::{Tool, ToolError};

// -- getFileContents --------------------------------------------------------

#[derive(Debug, Deserialize)]
struct GetFileContentsInput {
    owner: String,
    repo: String,
    path: String,
    /// Branch, tag or commit SHA (default branch if omitted).
    #[serde(rename = "ref")]
    git_ref: Option<String>,
}

/// Read a file or list a directory.
pub struct GetFileContentsTool {
    client: Arc<GitHubClient>,
}

impl GetFileContentsTool {
    pub fn new(client: Arc<GitHubClient>) -> Self {
        Self { client }
    }
}

/// The remote wraps base64 payloads with newlines.
fn decode_base64_content(content: &str) -> Result<String, ToolError> {
    let stripped: String = content.chars().filter(|c| !c.is_whitespace()).collect();
    let bytes = BASE64
        .decode(stripped)
        .map_err(|e| GitHubError::InvalidResponse(format!("invalid base64 content: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| GitHubError::InvalidResponse(format!("non-utf8 file content: {e}")).into())
}

#[async_trait]
impl Tool for GetFileContentsTool {
    fn name(&self) -> ToolName {
        ToolName::GetFileContents
    }

    fn description(&self) -> &str {
        "Get the contents of a file (decoded to text) or the entry listing of a directory."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("owner", JsonSchema::string().description("Repository owner"))
            .property("repo", JsonSchema::string().description("Repository name"))
            .property("path", JsonSchema::string().description("File or directory path"))
            .property(
                "ref",
                JsonSchema::string().description("Branch, tag or commit SHA (default branch if omitted)"),
            )
            .required(&["owner", "repo", "path"])
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let input: GetFileContentsInput = parse_input(input)?;
        let contents = self
            .client
            .get_contents(
                &input.owner,
                &input.repo,
                &input.path,
                input.git_ref.as_deref(),
            )
            .await?;

        let result = match contents {
            // Remote ordering preserved
            Contents::Directory(entries) => json!({
                "type": "dir",
                "path": input.path,
                "entries": entries
                    .iter()
                    .map(|e| json!({
                        "name": e.name,
                        "path": e.path,
                        "type": e.entry_type,
                        "size": e.size,
                        "sha": e.sha,
                    }))
                    .collect::<Vec<_>>(),
            }),
            Contents::Node(node) => match node.content.as_deref() {
                Some(content) if node.entry_type == "file" => json!({
                    "type": "file",
                    "name": node.name,
                    "path": node.path,
                    "size": node.size,
                    "sha": node.sha,
                    "content": decode_base64_content(content)?,
                }),
                // Symlink or submodule: metadata only
                _ => json!({
                    "type": node.entry_type,
                    "name": node.name,
                    "path": node.path,
                    "size": node.size,
                    "sha": node.sha,
                    "target": node.target,
                    "submodule_git_url": node.submodule_git_url,
                }),
            },
        };

        Ok(ToolOutput::json(result))
    }
}

// -- createOrUpdateFile -----------------------------------------------------

#[derive(Debug, Deserialize)]
struct CreateOrUpdateFileInput {
    owner: String,
    repo: String,
    path: String,
    /// Plain-text content; encoded before transmission.
    content: String,
    /// Commit message.
    message: String,
    branch: Option<String>,
    /// SHA of the file being replaced. Present: update; absent: create.
    sha: Option<String>,
}

/// Create or update a file through the contents API.
pub struct CreateOrUpdateFileTool {
    client: Arc<GitHubClient>,
    requires_approval: bool,
}

impl CreateOrUpdateFileTool {
    pub fn new(client: Arc<GitHubClient>, requires_approval: bool) -> Self {
        Self {
            client,
            requires_approval,
        }
    }
}

#[async_trait]
impl Tool for CreateOrUpdateFileTool {
    fn name(&self) -> ToolName {
        ToolName::CreateOrUpdateFile
    }

    fn description(&self) -> &str {
        "Create a new file or update an existing one (supply the current file SHA to update), committing to a branch."
    }

    fn schema(&self) -> JsonSchema {
        JsonSchema::object()
            .property("owner", JsonSchema::string().description("Repository owner"))
            .property("repo", JsonSchema::string().description("Repository name"))
            .property("path", JsonSchema::string().description("File path"))
            .property("content", JsonSchema::string().description("Plain-text file content"))
            .property("message", JsonSchema::string().description("Commit message"))
            .property(
                "branch",
                JsonSchema::string().description("Branch to commit to (default branch if omitted)"),
            )
            .property(
                "sha",
                JsonSchema::string().description("Current file SHA when updating an existing file"),
            )
            .required(&["owner", "repo", "path", "content", "message"])
    }

    fn approval(&self) -> Option<bool> {
        Some(self.requires_approval)
    }

    async fn execute(&self, input: Value) -> Result<ToolOutput, ToolError> {
        let input: CreateOrUpdateFileInput = parse_input(input)?;
        let result = self
            .client
            .put_contents(
                &input.owner,
                &input.repo,
                &input.path,
                &FileWrite {
                    message: input.message,
                    content: BASE64.encode(input.content.as_bytes()),
                    branch: input.branch,
                    sha: input.sha,
                },
            )
            .await?;

        Ok(ToolOutput::json(json!({
            "path": result.content.as_ref().map(|c| c.path.clone()),
            "file_sha": result.content.as_ref().map(|c| c.sha.clone()),
            "commit_sha": result.commit.sha,
            "commit_url": result.commit.html_url,
        })))
    }
}
