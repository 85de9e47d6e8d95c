use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use chat_widget::SessionBuilder;
use chat_widget::core::{Outcome, ReplyErrorKind, WidgetConfigBuilder};
use chat_widget::view::Role;
use chat_widget_test_view::TestView;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::timeout;

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

fn session_builder(view: &Arc<TestView>, addr: SocketAddr) -> SessionBuilder {
    let config = WidgetConfigBuilder::new()
        .with_typing_interval(Duration::from_millis(1))
        .build();
    SessionBuilder::new(view.clone())
        .with_endpoint(format!("http://{addr}/"))
        .with_timeout(Duration::from_secs(5))
        .with_widget_config(config)
}

#[tokio::test]
async fn test_prompt_round_trip() {
    let router = Router::new().route(
        "/",
        post(|axum::Json(body): axum::Json<Value>| async move {
            assert_eq!(body, json!({ "prompt": "hi" }));
            axum::Json(json!({ "bot": "Hello!\n" }))
        }),
    );
    let addr = serve(router).await;

    let view = TestView::new();
    let session = session_builder(&view, addr).build().unwrap();
    view.set_field("prompt", "hi");

    let outcome = timeout(
        Duration::from_secs(5),
        session.submit().unwrap().outcome(),
    )
    .await
    .unwrap()
    .unwrap();
    let Outcome::Revealed { id, text } = outcome else {
        panic!("expected a revealed reply");
    };
    assert_eq!(text, "Hello!");

    let transcript = view.transcript();
    assert_eq!(transcript.len(), 2);
    assert_eq!(transcript[0].role, Role::User);
    assert_eq!(transcript[0].text, "hi");
    assert_eq!(transcript[1].id.as_deref(), Some(id.as_str()));
    assert_eq!(transcript[1].text, "Hello!");

    let history = view.element(id.as_str()).unwrap().history();
    assert!(history.ends_with(&[
        "H".to_owned(),
        "He".to_owned(),
        "Hel".to_owned(),
        "Hell".to_owned(),
        "Hello".to_owned(),
        "Hello!".to_owned(),
    ]));
}

#[tokio::test]
async fn test_server_error_alerts_raw_body() {
    let router = Router::new().route(
        "/",
        post(|| async {
            (StatusCode::INTERNAL_SERVER_ERROR, "server exploded")
        }),
    );
    let addr = serve(router).await;

    let (idle_tx, mut idle_rx) = mpsc::unbounded_channel();
    let view = TestView::new();
    let _session = session_builder(&view, addr)
        .on_idle(move || {
            idle_tx.send(()).unwrap();
        })
        .build()
        .unwrap();
    view.set_field("prompt", "x");

    let event = view.submit();
    assert!(event.is_default_prevented());
    timeout(Duration::from_secs(5), idle_rx.recv())
        .await
        .unwrap()
        .unwrap();

    let transcript = view.transcript();
    assert_eq!(transcript[1].text, "Something went wrong");
    assert_eq!(view.alerts(), ["server exploded"]);
}

#[tokio::test]
async fn test_unreachable_endpoint() {
    // Bind and drop right away so the port is very likely closed.
    let addr = {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        listener.local_addr().unwrap()
    };

    let view = TestView::new();
    let session = session_builder(&view, addr).build().unwrap();

    let outcome = timeout(
        Duration::from_secs(5),
        session.submit().unwrap().outcome(),
    )
    .await
    .unwrap()
    .unwrap();
    let Outcome::Failed { kind, .. } = outcome else {
        panic!("expected a failure");
    };
    assert_eq!(kind, ReplyErrorKind::Transport);
    assert_eq!(view.transcript()[1].text, "Something went wrong");
    assert_eq!(view.alerts().len(), 1);
}
