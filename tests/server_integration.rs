//! Integration tests for the HTTP API over a real socket.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use portfolio_bot::chat::ChatEngine;
use portfolio_bot::config::{BotConfig, KnowledgeConfig};
use portfolio_bot::knowledge::KnowledgeBase;
use portfolio_bot::server::{ChatServer, HealthResponse};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

async fn start() -> (SocketAddr, CancellationToken, tokio::task::JoinHandle<()>) {
    let config = BotConfig {
        knowledge: KnowledgeConfig {
            data_dir: PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"),
            ..KnowledgeConfig::default()
        },
        ..BotConfig::default()
    };
    let kb = KnowledgeBase::load(&config.knowledge).await;
    let engine = ChatEngine::from_config(Arc::new(kb), &config)
        .unwrap()
        .with_ai(None);

    let server = ChatServer::new(Arc::new(engine));
    let cancel = server.cancel_token();
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        server.serve(listener).await.unwrap();
    });
    (addr, cancel, handle)
}

async fn stop(cancel: CancellationToken, handle: tokio::task::JoinHandle<()>) {
    cancel.cancel();
    timeout(Duration::from_secs(5), handle)
        .await
        .expect("server did not shut down")
        .unwrap();
}

#[tokio::test]
async fn test_health_endpoint() {
    let (addr, cancel, handle) = start().await;

    let health: HealthResponse = reqwest::get(format!("http://{addr}/api/health"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.name, "Jon");
    assert_eq!(health.qa_entries, 9);
    assert_eq!(health.projects, 3);
    assert!(!health.ai);

    stop(cancel, handle).await;
}

#[tokio::test]
async fn test_chat_round_trip_keeps_context() {
    let (addr, cancel, handle) = start().await;
    let client = reqwest::Client::new();
    let url = format!("http://{addr}/api/chat");

    let first: Value = client
        .post(&url)
        .json(&json!({ "action": "begin_fit" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(first["reply"]["kind"], "fit_prompt");

    let second: Value = client
        .post(&url)
        .json(&json!({
            "message": "Senior UX Designer",
            "context": first["context"],
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(second["reply"]["kind"], "fit");
    assert_eq!(second["reply"]["report"]["score"], 94);
    assert_eq!(second["context"]["id"], first["context"]["id"]);

    stop(cancel, handle).await;
}

#[tokio::test]
async fn test_fit_endpoint_rejects_blank() {
    let (addr, cancel, handle) = start().await;

    let response = reqwest::Client::new()
        .post(format!("http://{addr}/api/fit"))
        .json(&json!({ "job_text": "   " }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), reqwest::StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("job_text"));

    stop(cancel, handle).await;
}

#[tokio::test]
async fn test_projects_and_about() {
    let (addr, cancel, handle) = start().await;

    let projects: Vec<Value> = reqwest::get(format!("http://{addr}/api/projects"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(projects.len(), 3);
    assert_eq!(projects[0]["id"], "evcharge");

    let about: Value = reqwest::get(format!("http://{addr}/api/about"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(about["title"], "About Jon");

    stop(cancel, handle).await;
}
