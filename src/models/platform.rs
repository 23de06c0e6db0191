use serde::{Deserialize, Serialize};

/// Framework slug sent for projects and deployments that serve files as-is.
pub const STATIC_FRAMEWORK: &str = "static";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    pub id: String,
    /// Host of the deployment, without scheme.
    pub url: String,
    #[serde(default)]
    pub ready_state: Option<ReadyState>,
    #[serde(default)]
    pub error_message: Option<String>,
}

impl Deployment {
    pub fn https_url(&self) -> String {
        format!("https://{}", self.url)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadyState {
    Queued,
    Initializing,
    Building,
    Ready,
    Error,
    Canceled,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: String,
    pub framework: String,
    pub build_command: Option<String>,
    pub output_directory: Option<String>,
    pub install_command: Option<String>,
}

impl CreateProjectRequest {
    pub fn static_site(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            framework: STATIC_FRAMEWORK.to_string(),
            build_command: None,
            output_directory: None,
            install_command: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDeploymentRequest {
    pub name: String,
    /// Project id the deployment belongs to.
    pub project: String,
    pub target: String,
    pub files: Vec<DeploymentFile>,
    pub framework: String,
    pub project_settings: ProjectSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DeploymentFile {
    pub file: String,
    pub data: String,
    pub encoding: String,
}

// Commands are serialized as explicit nulls so the platform skips every build step.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSettings {
    pub framework: Option<String>,
    pub build_command: Option<String>,
    pub install_command: Option<String>,
    pub output_directory: Option<String>,
}

impl ProjectSettings {
    pub fn static_site() -> Self {
        Self {
            framework: Some(STATIC_FRAMEWORK.to_string()),
            build_command: None,
            install_command: None,
            output_directory: None,
        }
    }
}
