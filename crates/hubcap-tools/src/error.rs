//! Tool error types

use hubcap_github::GitHubError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToolError {
    /// Malformed tool arguments, surfaced before any remote call.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// Registry dispatch miss.
    #[error("tool not found: {name}")]
    NotFound { name: String },

    /// Remote API failure, propagated unchanged. No retry, no translation.
    #[error(transparent)]
    Github(#[from] GitHubError),
}
