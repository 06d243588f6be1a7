//! The built-in GitHub tools, grouped by resource.

pub mod branches;
pub mod commits;
pub mod contents;
pub mod issues;
pub mod pulls;
pub mod repos;
pub mod search;

pub use branches::{CreateBranchTool, ListBranchesTool};
pub use commits::ListCommitsTool;
pub use contents::{CreateOrUpdateFileTool, GetFileContentsTool};
pub use issues::{
    AddIssueCommentTool, CloseIssueTool, CreateIssueTool, GetIssueTool, ListIssuesTool,
};
pub use pulls::{
    CreatePullRequestTool, GetPullRequestTool, ListPullRequestsTool, MergePullRequestTool,
};
pub use repos::GetRepositoryTool;
pub use search::{SearchCodeTool, SearchIssuesTool, SearchRepositoriesTool};

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::ToolError;

/// Deserialize tool input, mapping malformed arguments to a validation
/// error before any remote call happens.
pub(crate) fn parse_input<T: DeserializeOwned>(input: Value) -> Result<T, ToolError> {
    serde_json::from_value(input).map_err(|e| ToolError::InvalidInput {
        message: e.to_string(),
    })
}
