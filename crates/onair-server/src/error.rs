use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Unified error type for HTTP responses.
///
/// Every error surfacing here — malformed webhook bodies included — maps to
/// a plain-text 500, matching the upstream sender's expectations (the
/// 500-not-400 choice is deliberate; see DESIGN.md).
#[derive(Debug)]
pub struct AppError(pub anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!("request failed: {:#}", self.0);
        (StatusCode::INTERNAL_SERVER_ERROR, "Server Error").into_response()
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onair_core::OnAirError;

    #[test]
    fn malformed_request_maps_to_500() {
        let err = AppError(OnAirError::MalformedRequest("no event field".into()).into());
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn response_body_is_plain_text() {
        let err = AppError(anyhow::anyhow!("boom"));
        let response = err.into_response();
        let ct = response
            .headers()
            .get(axum::http::header::CONTENT_TYPE)
            .expect("should have content-type");
        assert!(ct.to_str().unwrap().starts_with("text/plain"));
    }
}
