//! GitHub REST client

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, USER_AGENT};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

use crate::error::GitHubError;
use crate::models::*;

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const API_VERSION: &str = "2022-11-28";
const CLIENT_USER_AGENT: &str = concat!("hubcap/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Deserialize)]
struct ApiMessage {
    message: String,
}

/// Authenticated GitHub API client.
///
/// One instance is shared by every tool in a registry; it holds no mutable
/// state and is safe for concurrent use.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: Url,
}

impl GitHubClient {
    /// Build a client against the public GitHub API.
    pub fn new(token: SecretString) -> Result<Self, GitHubError> {
        Self::with_base_url(token, DEFAULT_BASE_URL)
    }

    /// Build a client against a custom base URL (GitHub Enterprise, tests).
    pub fn with_base_url(token: SecretString, base_url: &str) -> Result<Self, GitHubError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| GitHubError::Configuration(format!("invalid base url: {e}")))?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|_| GitHubError::Configuration("invalid token format".into()))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(DEFAULT_TIMEOUT)
            .build()?;

        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.as_str().trim_end_matches('/'), path)
    }

    async fn send<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, GitHubError> {
        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiMessage>(&body)
                .map(|m| m.message)
                .unwrap_or_else(|_| body.clone());
            tracing::warn!(status = status.as_u16(), %message, "github api error");
            return Err(GitHubError::Api {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_str(&body).map_err(|e| GitHubError::InvalidResponse(e.to_string()))
    }

    // -- Repositories -------------------------------------------------------

    pub async fn get_repository(&self, owner: &str, repo: &str) -> Result<Repository, GitHubError> {
        tracing::debug!(owner, repo, "get repository");
        let url = self.endpoint(&format!("/repos/{owner}/{repo}"));
        self.send(self.http.get(url)).await
    }

    pub async fn list_branches(
        &self,
        owner: &str,
        repo: &str,
        per_page: Option<u32>,
    ) -> Result<Vec<Branch>, GitHubError> {
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/branches"));
        let mut query = Vec::new();
        if let Some(n) = per_page {
            query.push(("per_page", n.to_string()));
        }
        self.send(self.http.get(url).query(&query)).await
    }

    // -- Issues -------------------------------------------------------------

    pub async fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        state: Option<&str>,
        labels: Option<&str>,
        per_page: Option<u32>,
    ) -> Result<Vec<Issue>, GitHubError> {
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/issues"));
        let mut query = Vec::new();
        if let Some(state) = state {
            query.push(("state", state.to_string()));
        }
        if let Some(labels) = labels {
            query.push(("labels", labels.to_string()));
        }
        if let Some(n) = per_page {
            query.push(("per_page", n.to_string()));
        }
        self.send(self.http.get(url).query(&query)).await
    }

    pub async fn get_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<Issue, GitHubError> {
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/issues/{number}"));
        self.send(self.http.get(url)).await
    }

    pub async fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        issue: &NewIssue,
    ) -> Result<Issue, GitHubError> {
        tracing::debug!(owner, repo, title = %issue.title, "create issue");
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/issues"));
        self.send(self.http.post(url).json(issue)).await
    }

    pub async fn add_issue_comment(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        body: &str,
    ) -> Result<IssueComment, GitHubError> {
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/issues/{number}/comments"));
        self.send(
            self.http
                .post(url)
                .json(&serde_json::json!({ "body": body })),
        )
        .await
    }

    pub async fn close_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        state_reason: Option<&str>,
    ) -> Result<Issue, GitHubError> {
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/issues/{number}"));
        let mut body = serde_json::json!({ "state": "closed" });
        if let Some(reason) = state_reason {
            body["state_reason"] = serde_json::Value::String(reason.to_string());
        }
        self.send(self.http.patch(url).json(&body)).await
    }

    // -- Pull requests ------------------------------------------------------

    pub async fn list_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        state: Option<&str>,
        base: Option<&str>,
        per_page: Option<u32>,
    ) -> Result<Vec<PullRequest>, GitHubError> {
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/pulls"));
        let mut query = Vec::new();
        if let Some(state) = state {
            query.push(("state", state.to_string()));
        }
        if let Some(base) = base {
            query.push(("base", base.to_string()));
        }
        if let Some(n) = per_page {
            query.push(("per_page", n.to_string()));
        }
        self.send(self.http.get(url).query(&query)).await
    }

    pub async fn get_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
    ) -> Result<PullRequest, GitHubError> {
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/pulls/{number}"));
        self.send(self.http.get(url)).await
    }

    pub async fn create_pull_request(
        &self,
        owner: &str,
        repo: &str,
        pull: &NewPullRequest,
    ) -> Result<PullRequest, GitHubError> {
        tracing::debug!(owner, repo, head = %pull.head, base = %pull.base, "create pull request");
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/pulls"));
        self.send(self.http.post(url).json(pull)).await
    }

    pub async fn merge_pull_request(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        options: &MergeOptions,
    ) -> Result<MergeResult, GitHubError> {
        tracing::debug!(owner, repo, number, "merge pull request");
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/pulls/{number}/merge"));
        self.send(self.http.put(url).json(options)).await
    }

    // -- Commits ------------------------------------------------------------

    pub async fn list_commits(
        &self,
        owner: &str,
        repo: &str,
        sha: Option<&str>,
        path: Option<&str>,
        per_page: Option<u32>,
    ) -> Result<Vec<CommitEntry>, GitHubError> {
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/commits"));
        let mut query = Vec::new();
        if let Some(sha) = sha {
            query.push(("sha", sha.to_string()));
        }
        if let Some(path) = path {
            query.push(("path", path.to_string()));
        }
        if let Some(n) = per_page {
            query.push(("per_page", n.to_string()));
        }
        self.send(self.http.get(url).query(&query)).await
    }

    // -- Git refs -----------------------------------------------------------

    /// Fetch a single ref. `git_ref` is the short form, e.g. `heads/main`.
    pub async fn get_ref(
        &self,
        owner: &str,
        repo: &str,
        git_ref: &str,
    ) -> Result<GitRef, GitHubError> {
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/git/ref/{git_ref}"));
        self.send(self.http.get(url)).await
    }

    /// Create a ref. `git_ref` is the fully qualified form, e.g.
    /// `refs/heads/feature`.
    pub async fn create_ref(
        &self,
        owner: &str,
        repo: &str,
        git_ref: &str,
        sha: &str,
    ) -> Result<GitRef, GitHubError> {
        tracing::debug!(owner, repo, git_ref, sha, "create ref");
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/git/refs"));
        self.send(
            self.http
                .post(url)
                .json(&serde_json::json!({ "ref": git_ref, "sha": sha })),
        )
        .await
    }

    // -- Contents -----------------------------------------------------------

    pub async fn get_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        git_ref: Option<&str>,
    ) -> Result<Contents, GitHubError> {
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/contents/{path}"));
        let mut query = Vec::new();
        if let Some(git_ref) = git_ref {
            query.push(("ref", git_ref.to_string()));
        }
        self.send(self.http.get(url).query(&query)).await
    }

    pub async fn put_contents(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        write: &FileWrite,
    ) -> Result<FileWriteResult, GitHubError> {
        tracing::debug!(owner, repo, path, "put contents");
        let url = self.endpoint(&format!("/repos/{owner}/{repo}/contents/{path}"));
        self.send(self.http.put(url).json(write)).await
    }

    // -- Search -------------------------------------------------------------

    pub async fn search_repositories(
        &self,
        query: &str,
        per_page: Option<u32>,
    ) -> Result<SearchResults<Repository>, GitHubError> {
        self.search("/search/repositories", query, per_page).await
    }

    pub async fn search_code(
        &self,
        query: &str,
        per_page: Option<u32>,
    ) -> Result<SearchResults<CodeSearchItem>, GitHubError> {
        self.search("/search/code", query, per_page).await
    }

    pub async fn search_issues(
        &self,
        query: &str,
        per_page: Option<u32>,
    ) -> Result<SearchResults<Issue>, GitHubError> {
        self.search("/search/issues", query, per_page).await
    }

    async fn search<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &str,
        per_page: Option<u32>,
    ) -> Result<SearchResults<T>, GitHubError> {
        let url = self.endpoint(path);
        let mut params = vec![("q", query.to_string())];
        if let Some(n) = per_page {
            params.push(("per_page", n.to_string()));
        }
        self.send(self.http.get(url).query(&params)).await
    }
}
