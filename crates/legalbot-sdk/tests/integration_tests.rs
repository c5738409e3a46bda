//! Integration tests for the LegalBot SDK against an in-process backend

use axum::extract::Json;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::post;
use axum::Router;
use legalbot_domain::{Domain, Transport, TransportError};
use legalbot_sdk::{Assistant, HttpTransport, SubmitOutcome};
use serde_json::{json, Value};
use std::sync::Arc;

async fn ipc(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let query = body["query"].as_str().unwrap_or_default().to_string();
    Json(json!({
        "answer": format!("For '{}' see Section 302 and IPC 34.", query),
        "content_type": content_type,
        "retrieved_docs": [
            {"filename": "IPC-302.txt", "text": "Punishment for murder", "score": 0.87},
            {"filename": null, "text": "Unscored fragment"}
        ]
    }))
}

async fn legal(Json(body): Json<Value>) -> impl IntoResponse {
    // Raw text keeps the model order exactly as written.
    assert!(body["query"].is_string());
    (
        [(header::CONTENT_TYPE, "application/json")],
        r#"{"answers": {"modelB": "x (2020) 5 SCC 1", "modelA": "y"}, "retrieved_docs": []}"#,
    )
}

async fn contract(Json(body): Json<Value>) -> Json<Value> {
    let question = body["question"].as_str().unwrap_or_default();
    Json(json!({
        "contract": format!("RENTAL AGREEMENT\n\nDrafted for: {}\n\nSection 1 applies.", question)
    }))
}

async fn failing() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "backend exploded")
}

async fn not_json() -> &'static str {
    "<html>oops</html>"
}

async fn empty() -> Json<Value> {
    Json(json!({}))
}

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn backend() -> Router {
    Router::new()
        .route("/query/ipc", post(ipc))
        .route("/query/legal", post(legal))
        .route("/generate_contract", post(contract))
}

#[tokio::test]
async fn test_transport_posts_json() {
    let url = spawn_backend(backend()).await;
    let transport = HttpTransport::new(&format!("{}/", url)).unwrap();

    let value = transport
        .post_json("/query/ipc", json!({"query": "murder"}))
        .await
        .unwrap();
    assert_eq!(value["content_type"], "application/json");
    assert!(value["answer"].as_str().unwrap().contains("murder"));
}

#[tokio::test]
async fn test_transport_error_classes() {
    let router = Router::new()
        .route("/fail", post(failing))
        .route("/html", post(not_json));
    let url = spawn_backend(router).await;
    let transport = HttpTransport::new(&url).unwrap();

    match transport.post_json("/fail", json!({})).await {
        Err(TransportError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "backend exploded");
        }
        other => panic!("Expected status error, got {:?}", other),
    }

    assert!(matches!(
        transport.post_json("/html", json!({})).await,
        Err(TransportError::Decode(_))
    ));

    assert!(matches!(
        transport.post_json("/missing", json!({})).await,
        Err(TransportError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn test_code_section_round_trip() {
    let url = spawn_backend(backend()).await;
    let assistant = Assistant::new(Arc::new(HttpTransport::new(&url).unwrap()));

    let outcome = assistant.submit(Domain::CodeSection, "murder").await;
    assert_eq!(outcome, SubmitOutcome::Answered { appended: 1, recorded: true });

    let state = assistant.controller(Domain::CodeSection).state();
    let bot = &state.messages[2];
    assert!(bot.content.starts_with("For 'murder' see"));
    assert_eq!(bot.citations, vec!["Section 302", "IPC 34"]);
    assert_eq!(bot.documents.len(), 2);
    assert_eq!(bot.documents[0].relevance_percent(), Some(87.0));
    assert_eq!(bot.documents[1].filename, "");
    assert_eq!(bot.documents[1].relevance_percent(), None);
}

#[tokio::test]
async fn test_precedent_multi_model_order() {
    let url = spawn_backend(backend()).await;
    let assistant = Assistant::new(Arc::new(HttpTransport::new(&url).unwrap()));

    let outcome = assistant.submit(Domain::Precedent, "privacy").await;
    assert_eq!(outcome, SubmitOutcome::Answered { appended: 2, recorded: true });

    let added = assistant.controller(Domain::Precedent).messages_since(2);
    assert_eq!(added[0].content, "[modelB]\n\nx (2020) 5 SCC 1");
    assert_eq!(added[0].citations, vec!["(2020) 5 SCC 1"]);
    assert_eq!(added[1].content, "[modelA]\n\ny");
    assert!(added[1].citations.is_empty());

    let entries = assistant.history().all();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].query, "privacy");
    assert_eq!(entries[0].response, "x (2020) 5 SCC 1");
    assert_eq!(entries[0].domain, Domain::Precedent);
}

#[tokio::test]
async fn test_document_skips_citations() {
    let url = spawn_backend(backend()).await;
    let assistant = Assistant::new(Arc::new(HttpTransport::new(&url).unwrap()));

    assistant.submit(Domain::Document, "rent a flat").await;
    let state = assistant.controller(Domain::Document).state();
    assert!(state.messages[2].content.starts_with("RENTAL AGREEMENT"));
    assert!(state.messages[2].content.contains("Drafted for: rent a flat"));
    assert!(state.messages[2].citations.is_empty());
}

#[tokio::test]
async fn test_backend_failures_become_fallback_messages() {
    let router = Router::new()
        .route("/query/ipc", post(failing))
        .route("/query/legal", post(not_json))
        .route("/generate_contract", post(empty));
    let url = spawn_backend(router).await;
    let assistant = Assistant::new(Arc::new(HttpTransport::new(&url).unwrap()));

    for domain in Domain::ALL {
        let outcome = assistant.submit(domain, "anything").await;
        let state = assistant.controller(domain).state();
        let last = state.last().unwrap();
        match domain {
            Domain::Document => {
                assert_eq!(outcome, SubmitOutcome::EmptyAnswer);
                assert_eq!(last.content, domain.empty_answer_text());
            }
            _ => {
                assert_eq!(outcome, SubmitOutcome::TransportFailure);
                assert_eq!(last.content, domain.transport_failure_text());
            }
        }
        assert!(!state.pending);
    }
    assert!(assistant.history().is_empty());
}
