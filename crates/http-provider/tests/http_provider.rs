use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use chat_widget_http::{HttpConfigBuilder, HttpProvider};
use chat_widget_protocol::{
    ErrorKind, PromptRequest, ReplyProvider, ReplyProviderError,
};
use serde_json::{Value, json};
use tokio::net::TcpListener;

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("failed to bind address");
    let addr = listener.local_addr().expect("failed to get local address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    addr
}

fn provider_for(addr: SocketAddr) -> HttpProvider {
    let config = HttpConfigBuilder::new()
        .with_endpoint(format!("http://{addr}/"))
        .with_timeout(Duration::from_secs(5))
        .build();
    HttpProvider::new(config)
}

#[tokio::test]
async fn test_posts_prompt_and_reads_bot() {
    let router = Router::new().route(
        "/",
        post(|axum::Json(body): axum::Json<Value>| async move {
            let prompt = body["prompt"].as_str().unwrap_or_default();
            axum::Json(json!({ "bot": format!("  echo: {prompt}\n") }))
        }),
    );
    let provider = provider_for(serve(router).await);

    let reply = provider
        .send_prompt(&PromptRequest::new("hi"))
        .await
        .unwrap();
    assert_eq!(reply.bot, "  echo: hi\n");
    assert_eq!(reply.trimmed(), "echo: hi");
}

#[tokio::test]
async fn test_failure_status_keeps_raw_body() {
    let router = Router::new().route(
        "/",
        post(|| async {
            (StatusCode::INTERNAL_SERVER_ERROR, "server exploded")
        }),
    );
    let provider = provider_for(serve(router).await);

    let err = provider
        .send_prompt(&PromptRequest::new("x"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Application);
    assert_eq!(err.message(), "server exploded");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_malformed_success_body() {
    let router = Router::new().route("/", post(|| async { "plain text" }));
    let provider = provider_for(serve(router).await);

    let err = provider
        .send_prompt(&PromptRequest::new("x"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidReply);
    assert_eq!(err.status(), Some(200));
}

#[tokio::test]
async fn test_unreachable_server() {
    // Bind and drop right away so the port is very likely closed.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };
    let provider = provider_for(addr);

    let err = provider
        .send_prompt(&PromptRequest::new("x"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(err.status(), None);
}
