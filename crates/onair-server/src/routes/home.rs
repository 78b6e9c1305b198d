use axum::Json;

/// GET / — liveness probe.
pub async fn homepage() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "Ok" }))
}
