use axum::{Json, extract::State, extract::rejection::JsonRejection};

use crate::api::AppState;
use crate::error::DeployError;

use super::types::{DeployRequest, DeploymentResult};

/// POST /deploy - Ship a one-page site for the given project
pub async fn deploy_site(
    State(AppState { orchestrator }): State<AppState>,
    body: Result<Json<DeployRequest>, JsonRejection>,
) -> DeploymentResult {
    match body {
        Ok(Json(body)) => orchestrator.deploy(&body).await,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "rejected deploy request body");
            DeploymentResult::Failure(DeployError::Validation(rejection.body_text()).into())
        }
    }
}
