//! Tool behavior against a mocked GitHub API, dispatched through a
//! composed registry.

use hubcap_tools::ToolRegistry;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const HEAD_SHA: &str = "0123456789abcdef0123456789abcdef01234567";

fn registry_for(server: &MockServer) -> ToolRegistry {
    ToolRegistry::builder("test-token")
        .base_url(server.uri())
        .build()
        .unwrap()
}

fn repo_body(default_branch: &str) -> serde_json::Value {
    json!({
        "id": 1,
        "name": "hubcap",
        "full_name": "octocat/hubcap",
        "owner": { "login": "octocat" },
        "private": false,
        "description": null,
        "default_branch": default_branch,
        "language": "Rust",
        "html_url": "https://github.com/octocat/hubcap",
        "stargazers_count": 0,
        "forks_count": 0,
        "open_issues_count": 0
    })
}

#[tokio::test]
async fn create_branch_with_sha_skips_all_lookups() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/octocat/hubcap/git/refs"))
        .and(body_json(json!({ "ref": "refs/heads/feature", "sha": HEAD_SHA })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "ref": "refs/heads/feature",
            "object": { "sha": HEAD_SHA, "type": "commit" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let out = registry_for(&server)
        .dispatch(
            "createBranch",
            json!({
                "owner": "octocat",
                "repo": "hubcap",
                "branch": "feature",
                "from": HEAD_SHA
            }),
        )
        .await
        .unwrap();

    assert_eq!(out.as_value()["sha"], HEAD_SHA);
    // No GET mocks mounted: any lookup would have failed the call.
}

#[tokio::test]
async fn create_branch_resolves_named_source_with_one_lookup() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/hubcap/git/ref/heads/develop"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ref": "refs/heads/develop",
            "object": { "sha": HEAD_SHA, "type": "commit" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/octocat/hubcap/git/refs"))
        .and(body_json(json!({ "ref": "refs/heads/feature", "sha": HEAD_SHA })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "ref": "refs/heads/feature",
            "object": { "sha": HEAD_SHA, "type": "commit" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let out = registry_for(&server)
        .dispatch(
            "createBranch",
            json!({
                "owner": "octocat",
                "repo": "hubcap",
                "branch": "feature",
                "from": "develop"
            }),
        )
        .await
        .unwrap();

    assert_eq!(out.as_value()["ref"], "refs/heads/feature");
}

#[tokio::test]
async fn create_branch_without_source_does_exactly_two_lookups() {
    let server = MockServer::start().await;
    // Lookup 1: repository, for its default branch
    Mock::given(method("GET"))
        .and(path("/repos/octocat/hubcap"))
        .respond_with(ResponseTemplate::new(200).set_body_json(repo_body("main")))
        .expect(1)
        .mount(&server)
        .await;
    // Lookup 2: the default branch's ref
    Mock::given(method("GET"))
        .and(path("/repos/octocat/hubcap/git/ref/heads/main"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ref": "refs/heads/main",
            "object": { "sha": HEAD_SHA, "type": "commit" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/repos/octocat/hubcap/git/refs"))
        .and(body_json(json!({ "ref": "refs/heads/feature", "sha": HEAD_SHA })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "ref": "refs/heads/feature",
            "object": { "sha": HEAD_SHA, "type": "commit" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let out = registry_for(&server)
        .dispatch(
            "createBranch",
            json!({ "owner": "octocat", "repo": "hubcap", "branch": "feature" }),
        )
        .await
        .unwrap();

    assert_eq!(out.as_value()["branch"], "feature");
    // MockServer verifies the expect(1) counts on drop.
}

#[tokio::test]
async fn get_file_contents_directory_preserves_remote_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/hubcap/contents/src"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "zebra.rs", "path": "src/zebra.rs", "sha": "a", "size": 1, "type": "file" },
            { "name": "alpha.rs", "path": "src/alpha.rs", "sha": "b", "size": 2, "type": "file" }
        ])))
        .mount(&server)
        .await;

    let out = registry_for(&server)
        .dispatch(
            "getFileContents",
            json!({ "owner": "octocat", "repo": "hubcap", "path": "src" }),
        )
        .await
        .unwrap();

    let value = out.as_value();
    assert_eq!(value["type"], "dir");
    let entries = value["entries"].as_array().unwrap();
    assert_eq!(entries[0]["name"], "zebra.rs");
    assert_eq!(entries[1]["name"], "alpha.rs");
}

#[tokio::test]
async fn get_file_contents_symlink_is_metadata_only() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/hubcap/contents/link"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "link",
            "path": "link",
            "sha": "d4",
            "size": 0,
            "type": "symlink",
            "target": "src/lib.rs"
        })))
        .mount(&server)
        .await;

    let out = registry_for(&server)
        .dispatch(
            "getFileContents",
            json!({ "owner": "octocat", "repo": "hubcap", "path": "link" }),
        )
        .await
        .unwrap();

    let value = out.as_value();
    assert_eq!(value["type"], "symlink");
    assert_eq!(value["target"], "src/lib.rs");
    assert!(value.get("content").is_none());
}

#[tokio::test]
async fn file_content_round_trips_through_write_encoding() {
    let original = "fn main() {\n    println!(\"round trip\");\n}\n";
    let encoded = {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(original.as_bytes())
    };

    let server = MockServer::start().await;
    // Write: the tool must transmit exactly this base64 payload
    Mock::given(method("PUT"))
        .and(path("/repos/octocat/hubcap/contents/src/main.rs"))
        .and(body_json(json!({
            "message": "add main",
            "content": encoded,
            "branch": "main"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "content": { "name": "main.rs", "path": "src/main.rs", "sha": "f1", "size": 40, "type": "file" },
            "commit": { "sha": "c9", "html_url": "https://github.com/octocat/hubcap/commit/c9" }
        })))
        .expect(1)
        .mount(&server)
        .await;
    // Read back: the remote serves the same payload, newline-wrapped
    let mut wrapped = encoded.clone();
    wrapped.insert(12, '\n');
    Mock::given(method("GET"))
        .and(path("/repos/octocat/hubcap/contents/src/main.rs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "main.rs",
            "path": "src/main.rs",
            "sha": "f1",
            "size": 40,
            "type": "file",
            "content": wrapped,
            "encoding": "base64"
        })))
        .mount(&server)
        .await;

    let registry = registry_for(&server);

    let written = registry
        .dispatch(
            "createOrUpdateFile",
            json!({
                "owner": "octocat",
                "repo": "hubcap",
                "path": "src/main.rs",
                "content": original,
                "message": "add main",
                "branch": "main"
            }),
        )
        .await
        .unwrap();
    assert_eq!(written.as_value()["commit_sha"], "c9");

    let read = registry
        .dispatch(
            "getFileContents",
            json!({ "owner": "octocat", "repo": "hubcap", "path": "src/main.rs" }),
        )
        .await
        .unwrap();
    assert_eq!(read.as_value()["content"], original);
}

#[tokio::test]
async fn list_issues_accepts_labels_as_published_in_schema() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/hubcap/issues"))
        .and(query_param("labels", "bug,triage"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "number": 12,
            "title": "Panic on empty config",
            "state": "open",
            "user": { "login": "octocat" },
            "labels": [{ "name": "bug" }, { "name": "triage" }],
            "comments": 2,
            "html_url": "https://github.com/octocat/hubcap/issues/12",
            "created_at": "2024-05-01T00:00:00Z",
            "updated_at": "2024-05-02T00:00:00Z"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let registry = registry_for(&server);

    // The published schema and the validator agree: labels is an array.
    let spec = registry
        .specs()
        .into_iter()
        .find(|s| s.name == "listIssues")
        .unwrap();
    let props = spec.input_schema.properties.unwrap();
    assert_eq!(props["labels"]["type"], "array");
    assert_eq!(props["labels"]["items"]["type"], "string");

    let out = registry
        .dispatch(
            "listIssues",
            json!({
                "owner": "octocat",
                "repo": "hubcap",
                "labels": ["bug", "triage"]
            }),
        )
        .await
        .unwrap();

    assert_eq!(out.as_value()["count"], 1);
    assert_eq!(out.as_value()["issues"][0]["number"], 12);
}

#[tokio::test]
async fn create_issue_schema_covers_labels_and_assignees() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/repos/octocat/hubcap/issues"))
        .and(body_json(json!({
            "title": "Flaky test",
            "labels": ["bug"],
            "assignees": ["octocat"]
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "number": 13,
            "title": "Flaky test",
            "state": "open",
            "user": { "login": "octocat" },
            "comments": 0,
            "html_url": "https://github.com/octocat/hubcap/issues/13",
            "created_at": "2024-05-03T00:00:00Z",
            "updated_at": "2024-05-03T00:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let registry = registry_for(&server);

    let spec = registry
        .specs()
        .into_iter()
        .find(|s| s.name == "createIssue")
        .unwrap();
    let props = spec.input_schema.properties.unwrap();
    assert_eq!(props["labels"]["type"], "array");
    assert_eq!(props["assignees"]["type"], "array");

    let out = registry
        .dispatch(
            "createIssue",
            json!({
                "owner": "octocat",
                "repo": "hubcap",
                "title": "Flaky test",
                "labels": ["bug"],
                "assignees": ["octocat"]
            }),
        )
        .await
        .unwrap();

    assert_eq!(out.as_value()["number"], 13);
}

#[tokio::test]
async fn remote_failure_propagates_untranslated() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/repos/octocat/hubcap/pulls/7/merge"))
        .respond_with(ResponseTemplate::new(405).set_body_json(json!({
            "message": "Pull Request is not mergeable"
        })))
        .mount(&server)
        .await;

    let err = registry_for(&server)
        .dispatch(
            "mergePullRequest",
            json!({ "owner": "octocat", "repo": "hubcap", "pull_number": 7 }),
        )
        .await
        .unwrap_err();

    match err {
        hubcap_tools::ToolError::Github(e) => {
            assert_eq!(e.status(), Some(405));
        }
        other => panic!("expected propagated github error, got {other:?}"),
    }
}
