use axum::http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::error::DeployError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeployRequest {
    /// Free text; `null` and a missing key are both rejected by the orchestrator.
    #[serde(default)]
    pub project_name: Option<String>,
    #[serde(default)]
    pub site_name: Option<String>,
    /// Overrides the configured wait mode for this request.
    #[serde(default)]
    pub wait_for_ready: Option<bool>,
}

impl DeployRequest {
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            project_name: Some(project_name.into()),
            ..Self::default()
        }
    }

    pub fn with_site_name(mut self, site_name: impl Into<String>) -> Self {
        self.site_name = Some(site_name.into());
        self
    }

    pub fn with_wait_for_ready(mut self, wait: bool) -> Self {
        self.wait_for_ready = Some(wait);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentSuccess {
    pub success: bool,
    pub url: String,
    pub project_id: String,
    pub deployment_id: String,
    pub project_name: String,
    pub site_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeploymentFailure {
    pub success: bool,
    pub error: String,
    #[serde(skip)]
    pub status: StatusCode,
}

impl From<DeployError> for DeploymentFailure {
    fn from(err: DeployError) -> Self {
        Self {
            success: false,
            status: err.status_code(),
            error: err.to_string(),
        }
    }
}

/// Outcome of one deploy request, in the shape returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DeploymentResult {
    Success(DeploymentSuccess),
    Failure(DeploymentFailure),
}

impl DeploymentResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Success(_) => StatusCode::OK,
            Self::Failure(failure) => failure.status,
        }
    }
}
