use std::future::Future;
use std::sync::Arc;

use axum::{extract::State, routing::get, Router};
use metrics_exporter_prometheus::PrometheusBuilder;

use crate::api::{self, ApiError};
use crate::infrastructure::config::{BindAddress, Settings};
use crate::state::AppState;

async fn health_live() -> &'static str {
    "OK"
}

async fn health_ready(State(state): State<Arc<AppState>>) -> Result<&'static str, ApiError> {
    state.store().ping().await?;
    Ok("OK")
}

/// Resource routes plus liveness and readiness probes, bound to `state`.
pub fn app(state: Arc<AppState>) -> Router {
    api::routes()
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .with_state(state)
}

/// Serves the API on the configured address until `shutdown` resolves.
///
/// Installs the Prometheus recorder and exposes it at `/metrics`.
///
/// # Errors
///
/// Returns an error if the recorder cannot be installed, the address is
/// invalid or cannot be bound, or the server fails while running.
pub async fn run_server(
    config: &Settings,
    state: Arc<AppState>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> anyhow::Result<()> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {e}"))?;

    let router = app(state).route("/metrics", get(move || std::future::ready(handle.render())));

    let addr = BindAddress::from(&config.server).to_socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Task board listening on {}", listener.local_addr()?);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
