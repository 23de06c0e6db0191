use axum::http::StatusCode;
use thiserror::Error;

/// Everything that can go wrong while shipping a site.
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("platform returned {status}: {body}")]
    Platform { status: StatusCode, body: String },

    #[error("platform request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("deployment failed: {0}")]
    DeploymentFailed(String),

    #[error("deployment was canceled")]
    DeploymentCanceled,

    #[error("deployment not ready after {attempts} attempts")]
    PollTimeout { attempts: u32 },
}

impl DeployError {
    /// True when the platform answered 409, i.e. the resource already exists.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Platform { status, .. } if *status == StatusCode::CONFLICT)
    }

    /// Status used when the error is returned by the inbound endpoint.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Platform { .. }
            | Self::Transport(_)
            | Self::DeploymentFailed(_)
            | Self::DeploymentCanceled => StatusCode::BAD_GATEWAY,
            Self::PollTimeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}
