//! Thin typed client for the GitHub REST API.
//!
//! One async method per remote operation, serde models for the response
//! subsets the tool layer consumes. Authorization, rate limiting, pagination
//! and retries are the remote API's concern; nothing here retries, caches,
//! or translates failures.

mod client;
mod error;
mod models;

pub use client::GitHubClient;
pub use error::GitHubError;
pub use models::*;
