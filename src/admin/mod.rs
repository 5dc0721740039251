//! Admin HTTP API for operator actions.
//!
//! # Routes
//! - `GET /healthz`: liveness, no auth
//! - `POST /dr/action`: `{"draction": "failover" | "failback" | "status"}`
//! - `GET /dr/status`: shorthand for the status action
//!
//! The HTTP status code mirrors the `statusCode` field of the response body.

pub mod auth;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::orchestrator::FailbackOrchestrator;
use self::auth::admin_auth_middleware;
use self::handlers::*;

/// Shared state injected into admin handlers.
#[derive(Clone)]
pub struct AdminState {
    pub orchestrator: Arc<FailbackOrchestrator>,
    pub api_key: Arc<str>,
}

impl AdminState {
    pub fn new(orchestrator: Arc<FailbackOrchestrator>, api_key: &str) -> Self {
        Self {
            orchestrator,
            api_key: Arc::from(api_key),
        }
    }
}

/// Build the admin router with auth, tracing and a request timeout.
#[allow(deprecated)]
pub fn setup_admin_router(state: AdminState, request_timeout: Duration) -> Router {
    let protected = Router::new()
        .route("/dr/action", post(post_action))
        .route("/dr/status", get(get_dr_status))
        .layer(middleware::from_fn_with_state(state.clone(), admin_auth_middleware))
        .with_state(state);

    Router::new()
        .route("/healthz", get(get_health))
        .merge(protected)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Serve `router` until `shutdown` fires.
pub async fn serve(
    listener: TcpListener,
    router: Router,
    mut shutdown: broadcast::Receiver<()>,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(address = %addr, "Admin API listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            let _ = shutdown.recv().await;
        })
        .await?;

    tracing::info!("Admin API stopped");
    Ok(())
}
