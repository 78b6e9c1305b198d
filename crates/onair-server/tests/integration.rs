use std::time::{Duration, Instant};

use axum::http::StatusCode;
use http_body_util::BodyExt;
use onair_core::{Color, Config};
use onair_device::sim::{PinWrite, SimBoard};
use onair_device::{actor, ActuationTask, Indicator};
use onair_server::state::AppState;
use tower::ServiceExt;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a router backed by a simulated board; the returned board clone
/// observes every pin write the webhook triggers.
async fn test_app() -> (axum::Router, SimBoard) {
    let board = SimBoard::new();
    let pin_names = ["18".to_string(), "5".to_string(), "19".to_string()];
    let indicator = Indicator::setup(&board, &pin_names, 3000).await.unwrap();
    let (handle, _task) = actor::spawn(indicator);
    let state = AppState::new(Config::new("s3cret", "Pat"), handle);
    (onair_server::build_router(state), board)
}

/// Send a GET request via `oneshot` and return (status, parsed JSON body).
async fn get(app: axum::Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Send a POST with a raw body to /webhooks/zoom and return (status, JSON).
async fn post_webhook(app: axum::Router, body: Vec<u8>) -> (StatusCode, serde_json::Value) {
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/webhooks/zoom")
        .header("content-type", "application/json")
        .body(axum::body::Body::from(body))
        .unwrap();
    let response = app.oneshot(req).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

fn json_body(value: serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(&value).unwrap()
}

/// Poll the board's write log until `pred` holds or two seconds pass.
async fn wait_for_writes(board: &SimBoard, pred: impl Fn(&[PinWrite]) -> bool) -> Vec<PinWrite> {
    let deadline = Instant::now() + Duration::from_secs(2);
    loop {
        let writes = board.writes();
        if pred(&writes) {
            return writes;
        }
        assert!(
            Instant::now() < deadline,
            "timed out waiting for writes; got {writes:?}"
        );
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

fn duties(writes: &[PinWrite]) -> Vec<f64> {
    writes.iter().map(|w| w.duty).collect()
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

#[tokio::test]
async fn homepage_returns_ok_message() {
    let (app, _board) = test_app().await;
    let (status, body) = get(app, "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "message": "Ok" }));
}

// ---------------------------------------------------------------------------
// Endpoint validation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn url_validation_returns_challenge_response() {
    let (app, board) = test_app().await;
    let (status, body) = post_webhook(
        app,
        json_body(serde_json::json!({
            "event": "endpoint.url_validation",
            "payload": { "plainToken": "abc123" }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!({
            "plainToken": "abc123",
            "encryptedToken":
                "c769096b4d5745c128ffb221dc2e2d5cb38b4a1cae423cf413b12cbef730bc57"
        })
    );
    assert!(board.writes().is_empty(), "validation must not actuate");
}

#[tokio::test]
async fn url_validation_without_token_returns_500() {
    let (app, _board) = test_app().await;
    let (status, _) = post_webhook(
        app,
        json_body(serde_json::json!({
            "event": "endpoint.url_validation",
            "payload": {}
        })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unknown_event_returns_404_and_leaves_pins_untouched() {
    let (app, board) = test_app().await;
    // Keep `app` (and the actuation handle inside it) alive past the sleep
    // below, so the actor's shutdown idle write cannot pollute the log.
    let (status, body) = post_webhook(
        app.clone(),
        json_body(serde_json::json!({ "event": "bogus.kind", "payload": {} })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        body,
        serde_json::json!({ "message": "Event type bogus.kind unknown" })
    );
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(board.writes().is_empty());
}

#[tokio::test]
async fn join_with_matching_username_sets_magenta() {
    let (app, board) = test_app().await;
    let (status, body) = post_webhook(
        app,
        json_body(serde_json::json!({
            "event": "meeting.participant_joined",
            "payload": { "object": { "participant": { "user_name": "Pat" } } }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({}));

    let writes = wait_for_writes(&board, |w| w.len() >= 3).await;
    assert_eq!(duties(&writes[..3]), vec![1.0, 0.0, 1.0]);
}

#[tokio::test]
async fn join_with_other_username_is_a_no_op() {
    let (app, board) = test_app().await;
    // Keep `app` (and the actuation handle inside it) alive past the sleep
    // below, so the actor's shutdown idle write cannot pollute the log.
    let (status, body) = post_webhook(
        app.clone(),
        json_body(serde_json::json!({
            "event": "meeting.participant_joined",
            "payload": { "object": { "participant": { "user_name": "Sam" } } }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({}));
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(board.writes().is_empty());
}

#[tokio::test]
async fn leave_with_matching_username_sets_green() {
    let (app, board) = test_app().await;
    let (status, _) = post_webhook(
        app,
        json_body(serde_json::json!({
            "event": "meeting.participant_left",
            "payload": { "object": { "participant": { "user_name": "Pat" } } }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let writes = wait_for_writes(&board, |w| w.len() >= 3).await;
    assert_eq!(duties(&writes[..3]), vec![0.0, 1.0, 0.0]);
}

#[tokio::test]
async fn meeting_started_sets_cyan() {
    let (app, board) = test_app().await;
    let (status, _) = post_webhook(
        app,
        json_body(serde_json::json!({
            "event": "meeting.started",
            "payload": { "object": { "topic": "Standup" } }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let writes = wait_for_writes(&board, |w| w.len() >= 3).await;
    assert_eq!(duties(&writes[..3]), vec![0.0, 1.0, 1.0]);
}

#[tokio::test]
async fn meeting_ended_responds_before_blink_finishes() {
    let (app, board) = test_app().await;
    let started = Instant::now();
    let (status, body) = post_webhook(
        app,
        json_body(serde_json::json!({
            "event": "meeting.ended",
            "payload": { "object": { "topic": "Standup" } }
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({}));
    // The blink runs 5 s; the response must not wait on it.
    assert!(started.elapsed() < Duration::from_secs(1));

    // The sequence starts with cyan on all three channels.
    let writes = wait_for_writes(&board, |w| w.len() >= 3).await;
    assert_eq!(duties(&writes[..3]), vec![0.0, 1.0, 1.0]);
}

// ---------------------------------------------------------------------------
// Shutdown
// ---------------------------------------------------------------------------

#[tokio::test]
async fn graceful_shutdown_drains_the_actor_and_idles_the_indicator() {
    let board = SimBoard::new();
    let pin_names = ["18".to_string(), "5".to_string(), "19".to_string()];
    let indicator = Indicator::setup(&board, &pin_names, 3000).await.unwrap();
    let (handle, actor_task) = actor::spawn(indicator);
    handle.schedule(ActuationTask::SetColor { color: Color::CYAN });

    // The state takes the only handle, exactly as the binary wires it.
    let state = AppState::new(Config::new("s3cret", "Pat"), handle);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();
    let server = tokio::spawn(onair_server::serve_with_shutdown(
        listener,
        state,
        async move {
            let _ = shutdown_rx.await;
        },
    ));

    wait_for_writes(&board, |w| w.len() >= 3).await;
    shutdown_tx.send(()).unwrap();
    server.await.unwrap().unwrap();
    actor_task.await.unwrap();

    let writes = board.writes();
    assert_eq!(duties(&writes[writes.len() - 3..]), vec![1.0, 1.0, 1.0]);
}

// ---------------------------------------------------------------------------
// Error surface
// ---------------------------------------------------------------------------

#[tokio::test]
async fn unparseable_body_returns_500() {
    let (app, board) = test_app().await;
    let (status, _) = post_webhook(app, b"not json".to_vec()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(board.writes().is_empty());
}

#[tokio::test]
async fn missing_event_field_returns_500() {
    let (app, _board) = test_app().await;
    let (status, _) = post_webhook(app, json_body(serde_json::json!({ "payload": {} }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}
