pub mod error;
pub mod routes;
pub mod state;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the axum Router with all routes and middleware.
/// Used by `serve()` and available for integration testing.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::home::homepage))
        .route("/webhooks/zoom", post(routes::zoom::handle_zoom))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the webhook endpoint on a pre-bound listener until Ctrl-C.
///
/// The listener is bound by the caller so device setup can fail the process
/// before any traffic is accepted. On shutdown the router (and with it the
/// actuation handle held in `state`) is dropped, letting the actuation actor
/// drain and force the indicator to its idle colour.
pub async fn serve(listener: tokio::net::TcpListener, state: AppState) -> anyhow::Result<()> {
    serve_with_shutdown(listener, state, shutdown_signal()).await
}

/// Like `serve`, but with a caller-supplied shutdown future. Used by tests
/// to stop the server without delivering a real signal.
pub async fn serve_with_shutdown(
    listener: tokio::net::TcpListener,
    state: AppState,
    shutdown: impl std::future::Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let addr = listener.local_addr()?;
    let app = build_router(state);

    tracing::info!("on-air webhook listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("shutdown signal received"),
        Err(e) => tracing::warn!("failed to listen for shutdown signal: {e}"),
    }
}
