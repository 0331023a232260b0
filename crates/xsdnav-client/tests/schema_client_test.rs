//! Contract tests for SchemaClient against the backend schema endpoints.
//!
//! | Method | Path | Test |
//! |--------|------|------|
//! | GET    | `/api/schema/summary` | `summary_*` |
//! | GET    | `/api/schema/tree` | `tree_*` |

use std::sync::Arc;

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use xsdnav_client::{ClientConfig, ClientError, XsdnavClient};
use xsdnav_core::{MaxOccurs, SchemaSource, SourceError};
use xsdnav_state::{ExplorerSession, JumpCoordinator, SessionTree};

/// Build a client pointed at a wiremock server.
fn test_client(mock_server: &MockServer) -> XsdnavClient {
    let config = ClientConfig::new(&mock_server.uri())
        .unwrap()
        .with_token("test-token")
        .with_timeout_secs(5);
    XsdnavClient::new(config).unwrap()
}

fn tree_body() -> serde_json::Value {
    serde_json::json!({
        "root": {
            "name": "naturalPersonTaxData",
            "kind": "element",
            "type": "naturalPersonTaxDataType",
            "namespace": "http://www.ech.ch/xmlns/eCH-0278/1",
            "cardinality": {"min": 1, "max": 1},
            "attributes": [],
            "enumeration": null,
            "children": [
                {"name": "person", "kind": "element", "type": "personType",
                 "namespace": "http://www.ech.ch/xmlns/eCH-0278/1",
                 "cardinality": {"min": 1, "max": "unbounded"},
                 "attributes": [{"name": "taxProcedure", "kind": "attribute", "type": "string",
                                 "enum": [], "source": "taxProcedureGroup"}],
                 "enumeration": null,
                 "children": []}
            ]
        }
    })
}

// ── GET /api/schema/summary ─────────────────────────────────────────

#[tokio::test]
async fn summary_sends_token_and_parses_camel_case() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/schema/summary"))
        .and(header("authorization", "Bearer test-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "schemaVersion": "1.0",
            "targetNamespace": "http://www.ech.ch/xmlns/eCH-0278/1",
            "schemaLocation": "schema/eCH-0278-1-0.xsd",
            "rootElements": ["naturalPersonTaxData"],
            "topLevelTypes": ["naturalPersonTaxDataType", "personType"]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let summary = client.schema().summary().await.unwrap();
    assert_eq!(summary.schema_version, "1.0");
    assert_eq!(summary.root_elements, ["naturalPersonTaxData"]);
    assert_eq!(summary.top_level_types.len(), 2);
}

#[tokio::test]
async fn summary_reports_non_success_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/schema/summary"))
        .respond_with(ResponseTemplate::new(500).set_body_string("schema not loaded"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    match client.schema().summary().await {
        Err(ClientError::ApiError { endpoint, status, body }) => {
            assert_eq!(endpoint, "GET /api/schema/summary");
            assert_eq!(status, 500);
            assert_eq!(body, "schema not loaded");
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

// ── GET /api/schema/tree ────────────────────────────────────────────

#[tokio::test]
async fn tree_unwraps_root_envelope() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/schema/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tree_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let root = client.fetch_tree().await.unwrap();
    assert_eq!(root.name, "naturalPersonTaxData");
    let person = &root.children[0];
    assert_eq!(person.cardinality.unwrap().max, MaxOccurs::Unbounded);
    assert!(person.attributes[0].is_highlighted());
}

#[tokio::test]
async fn tree_with_malformed_body_is_invalid_payload() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/schema/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"nodes": []})))
        .mount(&mock_server)
        .await;

    let client = test_client(&mock_server);
    let err = client.fetch_tree().await.unwrap_err();
    assert!(matches!(err, SourceError::InvalidPayload { .. }));
}

#[tokio::test]
async fn tree_is_fetched_once_per_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/schema/tree"))
        .respond_with(ResponseTemplate::new(200).set_body_json(tree_body()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/schema/summary"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let tree = Arc::new(SessionTree::new(Arc::new(test_client(&mock_server))));
    let jumps = Arc::new(JumpCoordinator::new());
    assert!(jumps.request("/eCH-0278:naturalPersonTaxData/eCH-0278:person"));

    let explorer = ExplorerSession::new(Arc::clone(&tree), Arc::clone(&jumps));
    explorer.load().await;
    assert_eq!(explorer.error().as_deref(), Some(xsdnav_state::SUMMARY_LOAD_FAILED));
    assert_eq!(explorer.selected().unwrap().as_str(), "0-0");

    assert!(tree.resolve_path("/naturalPersonTaxData/person").await.is_some());
    assert!(jumps.state().path().is_none());
}
