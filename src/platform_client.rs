use std::time::Duration;

use async_trait::async_trait;
use reqwest::RequestBuilder;
use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;

use crate::error::DeployError;
use crate::models::platform::{CreateDeploymentRequest, CreateProjectRequest, Deployment, Project};

const PROJECTS_PATH: &str = "v9/projects";
const DEPLOYMENTS_PATH: &str = "v13/deployments";

/// The slice of the hosting platform's REST API the deploy flow needs.
#[async_trait]
pub trait PlatformApi: Send + Sync {
    /// Whether a bearer credential is available for outbound calls.
    fn has_credential(&self) -> bool;

    async fn create_project(&self, req: &CreateProjectRequest) -> Result<Project, DeployError>;

    async fn get_project(&self, name: &str) -> Result<Project, DeployError>;

    async fn create_deployment(
        &self,
        req: &CreateDeploymentRequest,
    ) -> Result<Deployment, DeployError>;

    async fn get_deployment(&self, deployment_id: &str) -> Result<Deployment, DeployError>;
}

/// Thin reqwest wrapper around the platform API, authenticated with a static bearer token.
#[derive(Debug)]
pub struct PlatformClient {
    base_url: String,
    token: Option<SecretString>,
    team_id: Option<String>,
    http: reqwest::Client,
}

impl PlatformClient {
    pub fn new(
        base_url: impl AsRef<str>,
        token: Option<SecretString>,
        team_id: Option<String>,
    ) -> Result<Self, DeployError> {
        let http = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(15))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self {
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.expose_secret().trim().is_empty()),
            team_id: team_id.filter(|t| !t.is_empty()),
            http,
        })
    }

    /// Last four characters of the token, for log lines.
    pub fn masked_token(&self) -> Option<String> {
        self.token.as_ref().map(|t| mask_secret(t.expose_secret()))
    }

    fn auth_headers(&self) -> Result<HeaderMap, DeployError> {
        let token = self
            .token
            .as_ref()
            .ok_or_else(|| DeployError::Config("platform token is not configured".into()))?;
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.expose_secret()))
            .map_err(|_| DeployError::Config("platform token is not a valid header value".into()))?;
        value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        Ok(headers)
    }

    fn join_url(&self, url: &str) -> String {
        format!("{}/{}", self.base_url, url.trim_start_matches('/'))
    }

    fn scoped(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.team_id {
            Some(team_id) => req.query(&[("teamId", team_id)]),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, DeployError> {
        let resp = self.scoped(req).headers(self.auth_headers()?).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_else(|e| {
                tracing::debug!(%status, error = %e, "failed to read platform error body");
                String::new()
            });
            return Err(DeployError::Platform { status, body });
        }

        Ok(resp.json::<T>().await?)
    }
}

#[async_trait]
impl PlatformApi for PlatformClient {
    fn has_credential(&self) -> bool {
        self.token.is_some()
    }

    async fn create_project(&self, req: &CreateProjectRequest) -> Result<Project, DeployError> {
        tracing::debug!(name = %req.name, "creating project");
        self.send(self.http.post(self.join_url(PROJECTS_PATH)).json(req))
            .await
    }

    async fn get_project(&self, name: &str) -> Result<Project, DeployError> {
        let url = format!("{}/{}", PROJECTS_PATH, urlencoding::encode(name));
        self.send(self.http.get(self.join_url(&url))).await
    }

    async fn create_deployment(
        &self,
        req: &CreateDeploymentRequest,
    ) -> Result<Deployment, DeployError> {
        tracing::debug!(project = %req.project, target = %req.target, "creating deployment");
        self.send(self.http.post(self.join_url(DEPLOYMENTS_PATH)).json(req))
            .await
    }

    async fn get_deployment(&self, deployment_id: &str) -> Result<Deployment, DeployError> {
        let url = format!(
            "{}/{}",
            DEPLOYMENTS_PATH,
            urlencoding::encode(deployment_id)
        );
        self.send(self.http.get(self.join_url(&url))).await
    }
}

fn mask_secret(secret: &str) -> String {
    let len = secret.chars().count();
    if len <= 8 {
        return "****".to_string();
    }
    let tail: String = secret.chars().skip(len - 4).collect();
    format!("****{}", tail)
}
