use axum::{
    Json,
    response::{IntoResponse, Response},
};

pub use crate::models::deploy::{
    DeployRequest, DeploymentFailure, DeploymentResult, DeploymentSuccess,
};

impl IntoResponse for DeploymentResult {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
