use serde_json::{Value, json};
use wiremock::MockServer;

use mindmate::Config;
use mindmate::gateway::{AI_CHAT_PATH, ANALYZE_JOURNAL_PATH, run_gateway_with_listener};

use crate::gateway_harness::{
    llm_config, mount_completion, mount_status, mount_stream, received_bodies, sse_body,
};

/// Start the gateway on a random loopback port and return its base URL.
async fn spawn_gateway(config: Config) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = run_gateway_with_listener(listener, &config).await;
    });
    format!("http://{addr}")
}

fn config_for(server: &MockServer) -> Config {
    Config {
        llm: llm_config(server),
        ..Config::default()
    }
}

async fn error_message(response: reqwest::Response) -> String {
    let body: Value = response.json().await.unwrap();
    body["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn health_reports_ok() {
    let base = spawn_gateway(Config::default()).await;
    let response = reqwest::get(format!("{base}/health")).await.unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn analyze_journal_returns_analysis() {
    let server = MockServer::start().await;
    mount_completion(
        &server,
        r#"{"tone":"positive","emotions":["calm"],"sentiment_score":0.6,
            "insights":"Restful.","suggestions":["Keep it up"]}"#,
    )
    .await;
    let base = spawn_gateway(config_for(&server)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}{ANALYZE_JOURNAL_PATH}"))
        .json(&json!({"content": "Quiet evening with a book."}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["tone"], "positive");
    assert_eq!(body["sentiment_score"], 0.6);
    assert_eq!(body["insights"], "Restful.");
}

#[tokio::test]
async fn analyze_journal_rejects_bad_bodies() {
    let server = MockServer::start().await;
    mount_completion(&server, "{}").await;
    let base = spawn_gateway(config_for(&server)).await;
    let client = reqwest::Client::new();

    let malformed = client
        .post(format!("{base}{ANALYZE_JOURNAL_PATH}"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(malformed.status(), 400);
    assert!(!error_message(malformed).await.is_empty());

    let empty = client
        .post(format!("{base}{ANALYZE_JOURNAL_PATH}"))
        .json(&json!({"content": "   "}))
        .send()
        .await
        .unwrap();
    assert_eq!(empty.status(), 400);

    assert!(received_bodies(&server).await.is_empty());
}

#[tokio::test]
async fn analyze_journal_upstream_failure_is_500() {
    let server = MockServer::start().await;
    mount_status(&server, 503, "overloaded").await;
    let base = spawn_gateway(config_for(&server)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}{ANALYZE_JOURNAL_PATH}"))
        .json(&json!({"content": "Long day."}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    assert_eq!(
        error_message(response).await,
        "Failed to analyze journal entry"
    );
}

#[tokio::test]
async fn ai_routes_fail_without_api_key() {
    let base = spawn_gateway(Config::default()).await;
    let client = reqwest::Client::new();

    for (route, body) in [
        (ANALYZE_JOURNAL_PATH, json!({"content": "hi"})),
        (
            AI_CHAT_PATH,
            json!({"messages": [{"role": "user", "content": "hi"}]}),
        ),
    ] {
        let response = client
            .post(format!("{base}{route}"))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), 500, "{route}");
        assert!(error_message(response).await.contains("API key"));
    }
}

#[tokio::test]
async fn ai_chat_relays_stream_unchanged() {
    let server = MockServer::start().await;
    let upstream_body = sse_body(&["You are ", "doing well."], true);
    mount_stream(&server, upstream_body.clone()).await;
    let base = spawn_gateway(config_for(&server)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}{AI_CHAT_PATH}"))
        .json(&json!({"messages": [{"role": "user", "content": "Am I okay?"}]}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "text/event-stream"
    );
    assert_eq!(response.text().await.unwrap(), upstream_body);

    let bodies = received_bodies(&server).await;
    assert_eq!(bodies[0]["stream"], true);
    assert_eq!(bodies[0]["messages"][0]["role"], "system");
    assert_eq!(bodies[0]["messages"][1]["content"], "Am I okay?");
}

#[tokio::test]
async fn ai_chat_keeps_caller_system_prompt() {
    let server = MockServer::start().await;
    mount_stream(&server, sse_body(&["ok"], true)).await;
    let base = spawn_gateway(config_for(&server)).await;

    reqwest::Client::new()
        .post(format!("{base}{AI_CHAT_PATH}"))
        .json(&json!({"messages": [
            {"role": "system", "content": "custom"},
            {"role": "user", "content": "hi"}
        ]}))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();

    let bodies = received_bodies(&server).await;
    let messages = bodies[0]["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["content"], "custom");
}

#[tokio::test]
async fn ai_chat_upstream_failure_is_500() {
    let server = MockServer::start().await;
    mount_status(&server, 402, "payment required").await;
    let base = spawn_gateway(config_for(&server)).await;

    let response = reqwest::Client::new()
        .post(format!("{base}{AI_CHAT_PATH}"))
        .json(&json!({"messages": [{"role": "user", "content": "hi"}]}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    assert!(error_message(response).await.contains("402"));
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let base = spawn_gateway(Config::default()).await;

    let response = reqwest::Client::new()
        .request(
            reqwest::Method::OPTIONS,
            format!("{base}{ANALYZE_JOURNAL_PATH}"),
        )
        .header("origin", "https://app.example")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type, authorization")
        .send()
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()["access-control-allow-origin"]
            .to_str()
            .unwrap(),
        "*"
    );
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let mut config = Config::default();
    config.gateway.max_body_bytes = 64;
    let base = spawn_gateway(config).await;

    let response = reqwest::Client::new()
        .post(format!("{base}{ANALYZE_JOURNAL_PATH}"))
        .json(&json!({"content": "x".repeat(1024)}))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 413);
}
