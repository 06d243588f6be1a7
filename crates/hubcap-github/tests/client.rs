//! Client behavior against a mocked GitHub API.

use hubcap_github::{Contents, GitHubClient, GitHubError};
use secrecy::SecretString;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client_for(server: &MockServer) -> GitHubClient {
    GitHubClient::with_base_url(SecretString::from("test-token"), &server.uri()).unwrap()
}

fn repo_body() -> serde_json::Value {
    json!({
        "id": 42,
        "name": "hubcap",
        "full_name": "octocat/hubcap",
        "owner": { "login": "octocat" },
        "private": false,
        "description": "GitHub tools for agents",
        "default_branch": "main",
        "language": "Rust",
        "html_url": "https://github.com/octocat/hubcap",
        "stargazers_count": 7,
        "forks_count": 1,
        "open_issues_count": 3,
        "created_at": "2024-01-01T00:00:00Z",
        "updated_at": "2024-06-01T00:00:00Z",
        "pushed_at": "2024-06-02T00:00:00Z"
    })
}

#[tokio::test]
async fn get_repository_decodes_subset() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/hubcap"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_body()))
        .expect(1)
        .mount(&server)
        .await;

    let repo = client_for(&server)
        .get_repository("octocat", "hubcap")
        .await
        .unwrap();

    assert_eq!(repo.full_name, "octocat/hubcap");
    assert_eq!(repo.default_branch, "main");
    assert_eq!(repo.owner.login, "octocat");
}

#[tokio::test]
async fn api_failure_maps_status_and_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "message": "Not Found" })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .get_repository("octocat", "missing")
        .await
        .unwrap_err();

    match err {
        GitHubError::Api { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Not Found");
        }
        other => panic!("expected api error, got {other:?}"),
    }
    assert!(client_err_is_not_found(&server).await);
}

async fn client_err_is_not_found(server: &MockServer) -> bool {
    client_for(server)
        .get_repository("octocat", "missing")
        .await
        .unwrap_err()
        .is_not_found()
}

#[tokio::test]
async fn contents_decodes_directory_and_file() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/hubcap/contents/src"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "lib.rs", "path": "src/lib.rs", "sha": "a1", "size": 10, "type": "file" },
            { "name": "sub", "path": "src/sub", "sha": "b2", "size": 0, "type": "dir" }
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/hubcap/contents/README.md"))
        .and(query_param("ref", "main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "README.md",
            "path": "README.md",
            "sha": "c3",
            "size": 6,
            "type": "file",
            "content": "aGVsbG8K",
            "encoding": "base64"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);

    match client
        .get_contents("octocat", "hubcap", "src", None)
        .await
        .unwrap()
    {
        Contents::Directory(entries) => {
            // Remote ordering is preserved
            assert_eq!(entries[0].name, "lib.rs");
            assert_eq!(entries[1].entry_type, "dir");
        }
        Contents::Node(_) => panic!("expected directory listing"),
    }

    match client
        .get_contents("octocat", "hubcap", "README.md", Some("main"))
        .await
        .unwrap()
    {
        Contents::Node(node) => {
            assert_eq!(node.entry_type, "file");
            assert_eq!(node.content.as_deref(), Some("aGVsbG8K"));
        }
        Contents::Directory(_) => panic!("expected file node"),
    }
}

#[tokio::test]
async fn create_ref_posts_fully_qualified_ref() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/octocat/hubcap/git/refs"))
        .and(body_json(json!({
            "ref": "refs/heads/feature",
            "sha": "0123456789abcdef0123456789abcdef01234567"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "ref": "refs/heads/feature",
            "object": { "sha": "0123456789abcdef0123456789abcdef01234567", "type": "commit" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let git_ref = client_for(&server)
        .create_ref(
            "octocat",
            "hubcap",
            "refs/heads/feature",
            "0123456789abcdef0123456789abcdef01234567",
        )
        .await
        .unwrap();

    assert_eq!(git_ref.ref_name, "refs/heads/feature");
}

#[tokio::test]
async fn search_sends_query_params() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/repositories"))
        .and(query_param("q", "language:rust agent"))
        .and(query_param("per_page", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_count": 1,
            "incomplete_results": false,
            "items": [repo_body()]
        })))
        .mount(&server)
        .await;

    let results = client_for(&server)
        .search_repositories("language:rust agent", Some(5))
        .await
        .unwrap();

    assert_eq!(results.total_count, 1);
    assert_eq!(results.items[0].name, "hubcap");
}
