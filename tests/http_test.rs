use axum::body::Body;
use axum::http::{Request, StatusCode};
use banksim::config::Config;
use banksim::interfaces::http::{AppState, build_router};
use serde_json::{Value, json};
use tower::ServiceExt;

async fn call(router: &axum::Router, method: &str, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    // Extractor rejections answer in plain text
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

#[tokio::test]
async fn test_session_keeps_state_across_batches() {
    let router = build_router(AppState::new(&Config::default()));

    let (status, created) = call(&router, "POST", "/api/banking/sessions", Value::Null).await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["sessionId"].as_str().unwrap().to_string();
    let uri = format!("/api/banking/sessions/{id}/commands");

    let (_, first) = call(
        &router,
        "POST",
        &uri,
        json!({"commands": ["create savings 12345678 6.0", "deposit 12345678 1000", "bogus"]}),
    )
    .await;
    assert_eq!(first["invalidCommands"], json!(["bogus"]));

    let (status, second) = call(&router, "POST", &uri, json!({"commands": ["pass 1"]})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["accounts"][0]["state"], "Savings 12345678 1005.00 6.00");
    assert_eq!(second["accounts"][0]["monthsOpen"], 1);
    assert_eq!(second["invalidCommands"], json!([]));

    let (_, health) = call(&router, "GET", "/health", Value::Null).await;
    assert_eq!(health["sessions"], 1);
}

#[tokio::test]
async fn test_malformed_session_id_is_rejected() {
    let router = build_router(AppState::new(&Config::default()));
    let (status, _) = call(&router, "GET", "/api/banking/sessions/not-a-uuid", Value::Null).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_bot_uses_configured_limits() {
    let config = Config {
        bulk_emails_max: 2,
        ..Config::default()
    };
    let router = build_router(AppState::new(&config));

    let (status, body) = call(
        &router,
        "POST",
        "/api/bot-simulate",
        json!({
            "command": "/bulk_emails_pump25",
            "params": {"file": {"content": "a@x.io\nb@x.io\nc@x.io"}}
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["response"],
        "❌ Operation exceeds limit: 3 items (max 2 per request)"
    );
    assert_eq!(body["embed"]["title"], "Bulk Operation Limit Exceeded");
}
