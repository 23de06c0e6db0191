use std::time::Duration;

use crate::error::DeployError;
use crate::models::platform::ReadyState;
use crate::platform_client::PlatformApi;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            interval: Duration::from_secs(2),
        }
    }
}

/// Polls the deployment until it reaches a terminal state and returns its live URL.
///
/// A failing status query uses up an attempt but is only returned when it happens
/// on the last one. When the budget runs out without a terminal state the
/// `fallback_url` is returned as-is, so the deployment may still be building.
pub async fn wait_until_ready<P>(
    platform: &P,
    deployment_id: &str,
    fallback_url: Option<&str>,
    settings: &PollSettings,
) -> Result<String, DeployError>
where
    P: PlatformApi + ?Sized,
{
    for attempt in 1..=settings.max_attempts {
        match platform.get_deployment(deployment_id).await {
            Ok(deployment) => match deployment.ready_state {
                Some(ReadyState::Ready) => {
                    tracing::info!(deployment_id, attempt, "deployment is ready");
                    return Ok(deployment.https_url());
                }
                Some(ReadyState::Error) => {
                    let message = deployment
                        .error_message
                        .unwrap_or_else(|| "platform reported an error state".to_string());
                    return Err(DeployError::DeploymentFailed(message));
                }
                Some(ReadyState::Canceled) => return Err(DeployError::DeploymentCanceled),
                state => {
                    tracing::debug!(deployment_id, attempt, ?state, "deployment not ready yet");
                }
            },
            Err(e) if attempt == settings.max_attempts => return Err(e),
            Err(e) => {
                tracing::warn!(deployment_id, attempt, error = %e, "status check failed");
            }
        }

        if attempt < settings.max_attempts {
            tokio::time::sleep(settings.interval).await;
        }
    }

    match fallback_url {
        Some(url) => {
            tracing::warn!(
                deployment_id,
                attempts = settings.max_attempts,
                "deployment still pending, returning unconfirmed url"
            );
            Ok(url.to_string())
        }
        None => Err(DeployError::PollTimeout {
            attempts: settings.max_attempts,
        }),
    }
}
