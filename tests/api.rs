use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use pomodoro_server::{
    api::create_router,
    state::{AppState, ConfiguredDurations},
};

fn app() -> (Arc<AppState>, Router) {
    let state = Arc::new(AppState::new(
        20554,
        "127.0.0.1".to_string(),
        ConfiguredDurations::new(25.0, 5.0),
    ));
    (Arc::clone(&state), create_router(state))
}

async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        // Extractor rejections come back as plain text
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

#[tokio::test]
async fn status_renders_idle_timer() {
    let (_, router) = app();
    let (status, body) = send(&router, Method::GET, "/status", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["phase"], "IDLE");
    assert_eq!(body["timer"]["is_playing"], false);
    assert_eq!(body["remaining"], "25:00");
    assert_eq!(body["primary"]["label"], "start");
    assert_eq!(body["secondary"]["disabled"], true);
    assert_eq!(body["durations"]["break_minutes"], 5.0);
}

#[tokio::test]
async fn primary_control_starts_and_resets() {
    let (_, router) = app();

    let (status, body) = send(&router, Method::POST, "/primary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "playing");
    assert_eq!(body["timer"]["phase"], "WORK");
    assert_eq!(body["timer"]["color"], "#4EED83");

    let (_, status_body) = send(&router, Method::GET, "/status", None).await;
    assert_eq!(status_body["primary"]["label"], "reset");
    assert_eq!(status_body["secondary"]["label"], "pause");
    assert_eq!(status_body["last_action"], "advance");

    let (_, body) = send(&router, Method::POST, "/primary", None).await;
    assert_eq!(body["status"], "stopped");
    assert_eq!(body["timer"]["phase"], "IDLE");
    assert_eq!(body["timer"]["duration"], 25.0);
}

#[tokio::test]
async fn secondary_control_conflicts_while_idle() {
    let (state, router) = app();
    let (status, body) = send(&router, Method::POST, "/secondary", None).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["status"], "error");
    assert_eq!(state.get_timer_state().unwrap().restart_token.value(), 0);
}

#[tokio::test]
async fn secondary_control_toggles_pause_without_new_run() {
    let (_, router) = app();
    let (_, started) = send(&router, Method::POST, "/primary", None).await;

    let (status, paused) = send(&router, Method::POST, "/secondary", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paused["timer"]["is_playing"], false);
    assert_eq!(paused["timer"]["restart_token"], started["timer"]["restart_token"]);

    let (_, resumed) = send(&router, Method::POST, "/secondary", None).await;
    assert_eq!(resumed["timer"]["is_playing"], true);
    assert_eq!(resumed["timer"]["restart_token"], started["timer"]["restart_token"]);
}

#[tokio::test]
async fn dispatch_uses_explicit_or_configured_duration() {
    let (_, router) = app();

    let (status, body) = send(
        &router,
        Method::POST,
        "/dispatch",
        Some(json!({ "kind": "advance", "duration": 50 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["timer"]["phase"], "WORK");
    assert_eq!(body["timer"]["duration"], 50.0);

    let (_, body) = send(&router, Method::POST, "/dispatch", Some(json!({ "kind": "advance" }))).await;
    assert_eq!(body["timer"]["phase"], "BREAK");
    assert_eq!(body["timer"]["duration"], 5.0);
    assert_eq!(body["timer"]["color"], "#EDA437");

    let (_, body) = send(&router, Method::POST, "/dispatch", Some(json!({ "kind": "reset" }))).await;
    assert_eq!(body["timer"]["phase"], "IDLE");
    assert_eq!(body["timer"]["restart_token"], 3);
}

#[tokio::test]
async fn dispatch_rejects_unknown_event_kind() {
    let (state, router) = app();
    let (status, body) = send(&router, Method::POST, "/dispatch", Some(json!({ "kind": "skip" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body, Value::Null);
    assert_eq!(state.get_timer_state().unwrap().restart_token.value(), 0);
}

#[tokio::test]
async fn work_length_is_locked_while_running() {
    let (state, router) = app();

    let (status, body) = send(&router, Method::PUT, "/config/work", Some(json!({ "minutes": 40 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["durations"]["work_minutes"], 40.0);

    send(&router, Method::POST, "/primary", None).await;
    let (status, _) = send(&router, Method::PUT, "/config/work", Some(json!({ "minutes": 10 }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(&router, Method::PUT, "/config/break", Some(json!({ "minutes": 0 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(state.get_durations().unwrap(), ConfiguredDurations::new(40.0, 0.0));
}

#[tokio::test]
async fn health_reports_ok() {
    let (_, router) = app();
    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
