//! Dispatch tests: run plans end to end against a mock API and the real binary.

use anythingllm_docs::cli::{execute, Plan};
use anythingllm_docs_core::contract::MockDocumentApi;
use anythingllm_docs_core::tree::DocumentTree;
use anythingllm_docs_core::workspace::Workspace;
use anythingllm_docs_core::DocsError;
use assert_cmd::assert::OutputAssertExt;
use assert_cmd::Command;
use mockall::Sequence;
use predicates::prelude::*;
use serde_json::json;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn research() -> Vec<Workspace> {
    vec![Workspace {
        id: 1,
        name: "Research".into(),
        slug: "research".into(),
    }]
}

#[tokio::test]
async fn test_upload_runs_before_embed() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("report_q1.csv"), "a,b\n1,2\n").unwrap();

    let mut seq = Sequence::new();
    let mut api = MockDocumentApi::new();
    api.expect_upload_document()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_, _| Ok(()));
    api.expect_list_workspaces()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(research()));
    api.expect_list_documents()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|| Ok(DocumentTree::default()));
    api.expect_update_embeddings().never();

    let plan = Plan::UploadThenEmbed {
        directory: dir.path().to_path_buf(),
        pattern: "^report".into(),
        workspace: "research".into(),
    };
    execute(&api, plan).await.expect("no matches is not a failure");
}

#[tokio::test]
async fn test_embed_still_runs_when_upload_directory_is_invalid() {
    let dir = tempdir().unwrap();
    let mut api = MockDocumentApi::new();
    api.expect_upload_document().never();
    api.expect_list_workspaces().times(1).returning(|| Ok(research()));
    api.expect_list_documents()
        .times(1)
        .returning(|| Ok(DocumentTree::default()));

    let plan = Plan::UploadThenEmbed {
        directory: dir.path().join("missing"),
        pattern: ".*".into(),
        workspace: "Research".into(),
    };
    let err = execute(&api, plan).await.unwrap_err();
    assert!(format!("{err:#}").contains("upload step failed"));
}

#[tokio::test]
async fn test_invalid_pattern_sends_nothing() {
    let mut api = MockDocumentApi::new();
    api.expect_list_workspaces().never();
    api.expect_list_documents().never();

    let plan = Plan::Embed {
        pattern: "report(".into(),
        workspace: "Research".into(),
    };
    assert!(execute(&api, plan).await.is_err());
}

#[tokio::test]
async fn test_invalid_pattern_is_rejected_before_upload() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("report_q1.csv"), "a,b\n").unwrap();
    let mut api = MockDocumentApi::new();
    api.expect_upload_document().never();
    api.expect_list_workspaces().never();
    api.expect_list_documents().never();

    let plan = Plan::UploadThenEmbed {
        directory: dir.path().to_path_buf(),
        pattern: "report(".into(),
        workspace: "Research".into(),
    };
    let err = execute(&api, plan).await.unwrap_err();
    assert!(matches!(
        err.downcast_ref::<DocsError>(),
        Some(DocsError::InvalidPattern(_))
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_upload_failure_is_printed_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/workspaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "workspaces": [{"id": 1, "name": "Research", "slug": "research"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/documents"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"localFiles": {"items": []}})),
        )
        .mount(&server)
        .await;

    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");
    let base_url = format!("{}/api", server.uri());
    let output = tokio::task::spawn_blocking(move || {
        Command::cargo_bin("anythingllm-docs")
            .expect("Binary exists")
            .env("ANYTHINGLLM_API_KEY", "test-key")
            .env("ANYTHINGLLM_BASE_URL", base_url)
            .env("RUST_LOG", "off")
            .arg("-u")
            .arg(&missing)
            .args(["-e", ".*", "-w", "Research"])
            .output()
            .expect("binary runs")
    })
    .await
    .unwrap();

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    assert_eq!(stderr.matches("[ERROR]").count(), 1, "{stderr}");
    output
        .assert()
        .code(1)
        .stderr(predicate::str::contains("upload step failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_output_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/workspaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "workspaces": [{"id": 1, "name": "Research", "slug": "research"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/documents"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "localFiles": {"items": [
                {"type": "file", "title": "paper1.pdf", "name": "paper1.json", "pinnedWorkspaces": [1]},
                {"type": "file", "title": "notes.txt", "name": "notes.json", "pinnedWorkspaces": []}
            ]}
        })))
        .mount(&server)
        .await;

    let base_url = format!("{}/api", server.uri());
    let output = tokio::task::spawn_blocking(move || {
        Command::cargo_bin("anythingllm-docs")
            .expect("Binary exists")
            .env("ANYTHINGLLM_API_KEY", "test-key")
            .env("ANYTHINGLLM_BASE_URL", base_url)
            .arg("-l")
            .output()
            .expect("binary runs")
    })
    .await
    .unwrap();

    output.assert().success().stdout(predicate::str::contains(
        "Workspace: Research, Documents: 1\nUnassigned Documents: 1",
    ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_embed_unknown_workspace_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/workspaces"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "workspaces": [{"id": 1, "name": "Research", "slug": "research"}]
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/documents"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"localFiles": {"items": []}})),
        )
        .expect(0)
        .mount(&server)
        .await;

    let base_url = format!("{}/api", server.uri());
    let output = tokio::task::spawn_blocking(move || {
        Command::cargo_bin("anythingllm-docs")
            .expect("Binary exists")
            .env("ANYTHINGLLM_API_KEY", "test-key")
            .env("ANYTHINGLLM_BASE_URL", base_url)
            .args(["-e", ".*", "-w", "Ghost"])
            .output()
            .expect("binary runs")
    })
    .await
    .unwrap();

    output
        .assert()
        .code(1)
        .stderr(predicate::str::contains("workspace 'Ghost' not found"));
}
