pub mod deploy;
pub mod types;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::deploy::Orchestrator;
use crate::platform_client::PlatformClient;

#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Arc<Orchestrator<PlatformClient>>,
}

async fn healthz() -> &'static str {
    "ok"
}

/// Create router for the deploy endpoint and health check
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/deploy", post(deploy::deploy_site))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
