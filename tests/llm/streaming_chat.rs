use futures_util::StreamExt;
use serde_json::json;
use wiremock::MockServer;

use mindmate::config::LlmConfig;
use mindmate::error::LlmError;
use mindmate::llm::{ChatMessage, GatewayClient, NullStreamSink};

use crate::gateway_harness::{
    RecordingSink, llm_config, mount_status, mount_stream, received_bodies, sse_body,
};

#[tokio::test]
async fn stream_chat_into_assembles_reply_and_feeds_sink() {
    let server = MockServer::start().await;
    mount_stream(&server, sse_body(&["Take ", "a slow ", "breath ☀️"], true)).await;

    let client = GatewayClient::new(&llm_config(&server)).unwrap();
    let sink = RecordingSink::default();
    let reply = client
        .stream_chat_into(&[ChatMessage::user("I feel tense")], &sink)
        .await
        .unwrap();

    assert_eq!(reply.text, "Take a slow breath ☀️");
    assert!(reply.done);
    assert_eq!(sink.text(), reply.text);
    assert!(sink.increments().last().unwrap().done);
    assert!(sink.increments().iter().all(|i| !i.is_empty()));
}

#[tokio::test]
async fn streaming_request_carries_model_messages_and_stream_flag() {
    let server = MockServer::start().await;
    mount_stream(&server, sse_body(&["ok"], true)).await;

    let mut config = llm_config(&server);
    config.temperature = Some(0.3);
    let client = GatewayClient::new(&config).unwrap();
    client
        .stream_chat_into(
            &[ChatMessage::system("be kind"), ChatMessage::user("hi")],
            &NullStreamSink,
        )
        .await
        .unwrap();

    let bodies = received_bodies(&server).await;
    assert_eq!(bodies.len(), 1);
    assert_eq!(bodies[0]["model"], "google/gemini-2.5-flash");
    assert_eq!(bodies[0]["stream"], true);
    assert_eq!(bodies[0]["temperature"], 0.3);
    assert_eq!(
        bodies[0]["messages"],
        json!([
            {"role": "system", "content": "be kind"},
            {"role": "user", "content": "hi"}
        ])
    );
}

#[tokio::test]
async fn closed_stream_without_terminator_keeps_text() {
    let server = MockServer::start().await;
    mount_stream(&server, sse_body(&["Partial ", "answer"], false)).await;

    let client = GatewayClient::new(&llm_config(&server)).unwrap();
    let reply = client
        .stream_chat_into(&[ChatMessage::user("hi")], &NullStreamSink)
        .await
        .unwrap();

    assert_eq!(reply.text, "Partial answer");
    assert!(!reply.done);
}

#[tokio::test]
async fn malformed_frames_are_skipped_in_the_live_stream() {
    let server = MockServer::start().await;
    let mut body = String::from(": ping\n\ndata: {broken\n\n");
    body.push_str(&sse_body(&["still ", "here"], true));
    mount_stream(&server, body).await;

    let client = GatewayClient::new(&llm_config(&server)).unwrap();
    let mut stream = client.stream_chat(&[ChatMessage::user("hi")]).await.unwrap();

    let mut text = String::new();
    while let Some(increment) = stream.next().await {
        text.push_str(&increment.unwrap().appended);
    }
    assert_eq!(text, "still here");
}

#[tokio::test]
async fn error_status_is_reported_with_secrets_redacted() {
    let server = MockServer::start().await;
    mount_status(
        &server,
        429,
        "rate limited for key sk-live-abcdef123456, slow down",
    )
    .await;

    let client = GatewayClient::new(&llm_config(&server)).unwrap();
    let error = client
        .stream_chat(&[ChatMessage::user("hi")])
        .await
        .err()
        .unwrap();

    match error {
        LlmError::Request { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("rate limited"));
            assert!(!message.contains("abcdef123456"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unreachable_gateway_is_a_transport_error() {
    let port = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port();
    let config = LlmConfig {
        base_url: format!("http://127.0.0.1:{port}/v1"),
        api_key: Some("test-key".into()),
        ..LlmConfig::default()
    };

    let client = GatewayClient::new(&config).unwrap();
    let error = client
        .stream_chat(&[ChatMessage::user("hi")])
        .await
        .err()
        .unwrap();
    assert!(matches!(error, LlmError::Transport(_)));
}
