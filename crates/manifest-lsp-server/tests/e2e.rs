//! End-to-end tests for the Cargo manifest LSP server.
//!
//! These tests exercise the full LSP protocol stack using tower-lsp's
//! in-process service, sending JSON-RPC requests and verifying responses.

use futures::StreamExt;
use serde_json::json;
use tower::{Service, ServiceExt};
use tower_lsp::jsonrpc::Request;
use tower_lsp::LspService;

use manifest_lsp_server::ManifestLspBackend;

fn initialize_request(id: i64) -> Request {
    Request::build("initialize")
        .params(json!({
            "capabilities": {},
            "rootUri": null
        }))
        .id(id)
        .finish()
}

fn initialized_notification() -> Request {
    Request::build("initialized").params(json!({})).finish()
}

fn shutdown_request(id: i64) -> Request {
    Request::build("shutdown").id(id).finish()
}

fn did_open_notification(uri: &str, text: &str) -> Request {
    Request::build("textDocument/didOpen")
        .params(json!({
            "textDocument": {
                "uri": uri,
                "languageId": "toml",
                "version": 1,
                "text": text
            }
        }))
        .finish()
}

fn did_change_notification(uri: &str, version: i64, text: &str) -> Request {
    Request::build("textDocument/didChange")
        .params(json!({
            "textDocument": { "uri": uri, "version": version },
            "contentChanges": [{ "text": text }]
        }))
        .finish()
}

fn completion_request(id: i64, uri: &str, line: u32, character: u32) -> Request {
    Request::build("textDocument/completion")
        .params(json!({
            "textDocument": { "uri": uri },
            "position": { "line": line, "character": character }
        }))
        .id(id)
        .finish()
}

/// Helper to extract the "result" field from a JSON-RPC response.
fn extract_result(response: Option<tower_lsp::jsonrpc::Response>) -> serde_json::Value {
    let resp = response.expect("expected a response");
    let serialized = serde_json::to_value(&resp).unwrap();
    serialized.get("result").cloned().unwrap_or(json!(null))
}

/// Labels from a completion response value (array or item-list form).
fn completion_labels(result: &serde_json::Value) -> Vec<String> {
    let items = result
        .as_array()
        .cloned()
        .or_else(|| result.get("items").and_then(|i| i.as_array()).cloned())
        .unwrap_or_default();
    items
        .iter()
        .filter_map(|i| i.get("label").and_then(|l| l.as_str()))
        .map(String::from)
        .collect()
}

const MANIFEST: &str = r#"[package]
name = "demo"
version = "0.1.0"

[dependencies]
serde = "1"

[[bin]]
name = "demo"
"#;

async fn start_session() -> LspService<ManifestLspBackend> {
    let (mut service, socket) = LspService::new(ManifestLspBackend::new);

    // Drain server→client messages so client.log_message() etc. don't block.
    tokio::spawn(async move {
        socket.collect::<Vec<_>>().await;
    });

    service
        .ready()
        .await
        .unwrap()
        .call(initialize_request(1))
        .await
        .unwrap();
    service
        .ready()
        .await
        .unwrap()
        .call(initialized_notification())
        .await
        .unwrap();

    service
}

#[tokio::test(flavor = "current_thread")]
async fn test_initialize_and_shutdown() {
    let (mut service, socket) = LspService::new(ManifestLspBackend::new);
    tokio::spawn(async move {
        socket.collect::<Vec<_>>().await;
    });

    let resp = service
        .ready()
        .await
        .unwrap()
        .call(initialize_request(1))
        .await
        .unwrap();

    let result = extract_result(resp);
    assert!(
        result.get("capabilities").is_some(),
        "expected capabilities in init result"
    );
    assert!(
        result
            .get("serverInfo")
            .and_then(|s| s.get("name"))
            .and_then(|n| n.as_str())
            == Some("cargo-manifest-lsp"),
        "expected server name 'cargo-manifest-lsp'"
    );

    let resp = service
        .ready()
        .await
        .unwrap()
        .call(initialized_notification())
        .await
        .unwrap();
    assert!(
        resp.is_none(),
        "initialized is a notification, no response expected"
    );

    let resp = service
        .ready()
        .await
        .unwrap()
        .call(shutdown_request(2))
        .await
        .unwrap();
    assert!(resp.is_some(), "shutdown should return a response");
}

#[tokio::test(flavor = "current_thread")]
async fn test_package_key_completion() {
    let mut service = start_session().await;
    let uri = "file:///test/Cargo.toml";

    service
        .ready()
        .await
        .unwrap()
        .call(did_open_notification(uri, MANIFEST))
        .await
        .unwrap();

    // Completion on "name" under [package]
    let resp = service
        .ready()
        .await
        .unwrap()
        .call(completion_request(2, uri, 1, 2))
        .await
        .unwrap();

    let labels = completion_labels(&extract_result(resp));
    for key in ["name", "version", "authors", "edition"] {
        assert!(labels.contains(&key.to_string()), "missing {key} in {labels:?}");
    }

    service
        .ready()
        .await
        .unwrap()
        .call(shutdown_request(99))
        .await
        .unwrap();
}

#[tokio::test(flavor = "current_thread")]
async fn test_table_header_completion() {
    let mut service = start_session().await;
    let uri = "file:///test/Cargo.toml";

    service
        .ready()
        .await
        .unwrap()
        .call(did_open_notification(uri, MANIFEST))
        .await
        .unwrap();

    // Completion inside "package" in the [package] header
    let resp = service
        .ready()
        .await
        .unwrap()
        .call(completion_request(2, uri, 0, 4))
        .await
        .unwrap();

    let labels = completion_labels(&extract_result(resp));
    assert!(labels.contains(&"package".to_string()));
    assert!(labels.contains(&"dependencies".to_string()));
    assert!(
        !labels.contains(&"bin".to_string()),
        "plain header must not suggest array tables"
    );

    // Completion inside "bin" in the [[bin]] header
    let resp = service
        .ready()
        .await
        .unwrap()
        .call(completion_request(3, uri, 7, 3))
        .await
        .unwrap();

    let labels = completion_labels(&extract_result(resp));
    assert!(labels.contains(&"bin".to_string()));
    assert!(labels.contains(&"bench".to_string()));
    assert!(
        !labels.contains(&"package".to_string()),
        "array header must not suggest plain tables"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn test_no_completion_in_dependency_table() {
    let mut service = start_session().await;
    let uri = "file:///test/Cargo.toml";

    service
        .ready()
        .await
        .unwrap()
        .call(did_open_notification(uri, MANIFEST))
        .await
        .unwrap();

    // Completion on "serde" under [dependencies]
    let resp = service
        .ready()
        .await
        .unwrap()
        .call(completion_request(2, uri, 5, 3))
        .await
        .unwrap();

    let labels = completion_labels(&extract_result(resp));
    assert!(
        labels.is_empty(),
        "dependency names are user-defined, got {labels:?}"
    );
}

#[tokio::test(flavor = "current_thread")]
async fn test_completion_after_change() {
    let mut service = start_session().await;
    let uri = "file:///test/Cargo.toml";

    service
        .ready()
        .await
        .unwrap()
        .call(did_open_notification(uri, "[package]\nname = \"demo\"\n"))
        .await
        .unwrap();

    // Replace the document with a [lib] section
    service
        .ready()
        .await
        .unwrap()
        .call(did_change_notification(
            uri,
            2,
            "[lib]\ncrate-type = [\"rlib\"]\n",
        ))
        .await
        .unwrap();

    // Completion on "crate-type" under [lib]
    let resp = service
        .ready()
        .await
        .unwrap()
        .call(completion_request(3, uri, 1, 4))
        .await
        .unwrap();

    let labels = completion_labels(&extract_result(resp));
    assert!(labels.contains(&"crate-type".to_string()));
    assert!(labels.contains(&"proc-macro".to_string()));
}

#[tokio::test(flavor = "current_thread")]
async fn test_completion_on_unopened_document() {
    let mut service = start_session().await;

    let resp = service
        .ready()
        .await
        .unwrap()
        .call(completion_request(2, "file:///test/Other.toml", 0, 0))
        .await
        .unwrap();

    let result = extract_result(resp);
    assert!(result.is_null(), "unopened documents yield no completions");
}
