pub mod poll;
pub mod project;
pub mod submit;

#[cfg(test)]
pub(crate) mod mock;

pub use poll::{PollSettings, wait_until_ready};
pub use project::resolve_project;
pub use submit::submit_deployment;

use crate::models::deploy::{DeployRequest, DeploymentResult, DeploymentSuccess};
use crate::error::DeployError;
use crate::platform_client::PlatformApi;
use crate::sanitize_project_name;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploySettings {
    /// Poll the deployment until it is ready before answering.
    pub wait_for_ready: bool,
    pub poll: PollSettings,
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self {
            wait_for_ready: true,
            poll: PollSettings::default(),
        }
    }
}

/// Runs the whole ship sequence: project, deployment, then optionally readiness.
#[derive(Debug)]
pub struct Orchestrator<P> {
    platform: P,
    settings: DeploySettings,
}

impl<P: PlatformApi> Orchestrator<P> {
    pub fn new(platform: P, settings: DeploySettings) -> Self {
        Self { platform, settings }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    pub fn settings(&self) -> &DeploySettings {
        &self.settings
    }

    /// Never fails: every error is folded into [`DeploymentResult::Failure`].
    pub async fn deploy(&self, request: &DeployRequest) -> DeploymentResult {
        match self.run(request).await {
            Ok(success) => DeploymentResult::Success(success),
            Err(e) => {
                tracing::error!(project_name = ?request.project_name, error = %e, "deploy failed");
                DeploymentResult::Failure(e.into())
            }
        }
    }

    pub async fn run(&self, request: &DeployRequest) -> Result<DeploymentSuccess, DeployError> {
        let raw_name = request.project_name.as_deref().unwrap_or_default().trim();
        if raw_name.is_empty() {
            return Err(DeployError::Validation("projectName is required".into()));
        }
        if !self.platform.has_credential() {
            return Err(DeployError::Config("PLATFORM_TOKEN is not set".into()));
        }

        let name = sanitize_project_name(raw_name);
        if !name.chars().any(|c| c.is_ascii_alphanumeric()) {
            return Err(DeployError::Validation(format!(
                "projectName {:?} has no usable characters (a-z, 0-9, -)",
                raw_name
            )));
        }
        let site_name = request
            .site_name
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| name.clone());
        let wait = request.wait_for_ready.unwrap_or(self.settings.wait_for_ready);

        tracing::info!(name = %name, site_name = %site_name, wait, "deploying site");

        let project = resolve_project(&self.platform, &name).await?;
        let deployment = submit_deployment(&self.platform, &project, &site_name).await?;

        let fallback_url = deployment.https_url();
        let url = if wait {
            wait_until_ready(
                &self.platform,
                &deployment.id,
                Some(&fallback_url),
                &self.settings.poll,
            )
            .await?
        } else {
            fallback_url
        };

        tracing::info!(project_id = %project.id, deployment_id = %deployment.id, url = %url, "site deployed");

        Ok(DeploymentSuccess {
            success: true,
            url,
            project_id: project.id,
            deployment_id: deployment.id,
            project_name: project.name,
            site_name,
        })
    }
}
