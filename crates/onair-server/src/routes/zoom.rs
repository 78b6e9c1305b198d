use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use onair_core::event::{self, Directive};
use onair_device::ActuationTask;

use crate::error::AppError;
use crate::state::AppState;

/// POST /webhooks/zoom — classify the delivery and answer immediately.
///
/// Validation challenges are computed synchronously; colour and blink
/// actions are scheduled on the actuation actor and acknowledged with an
/// empty 200 before any pin is touched.
pub async fn handle_zoom(
    State(app): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    match event::dispatch(&body, &app.config)? {
        Directive::Challenge(challenge) => Ok(Json(challenge).into_response()),
        Directive::SetColor(color) => {
            app.actuation.schedule(ActuationTask::SetColor { color });
            Ok(empty_ok())
        }
        Directive::Blink {
            color,
            duration,
            interval,
        } => {
            app.actuation.schedule(ActuationTask::Blink {
                color,
                duration,
                interval,
            });
            Ok(empty_ok())
        }
        Directive::Ignore => Ok(empty_ok()),
        Directive::Unknown(kind) => Ok((
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({
                "message": format!("Event type {kind} unknown")
            })),
        )
            .into_response()),
    }
}

fn empty_ok() -> Response {
    Json(serde_json::json!({})).into_response()
}
