use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use chrono::{DateTime, Utc};

use crate::error::DeployError;
use crate::models::platform::{
    CreateDeploymentRequest, Deployment, DeploymentFile, Project, ProjectSettings,
    STATIC_FRAMEWORK,
};
use crate::platform_client::PlatformApi;

pub const INDEX_FILE: &str = "index.html";
pub const PRODUCTION_TARGET: &str = "production";

/// Submits a one-page static site as a new production deployment of `project`.
///
/// Every call creates a new deployment on the platform, so callers must not
/// retry it blindly.
pub async fn submit_deployment<P>(
    platform: &P,
    project: &Project,
    site_name: &str,
) -> Result<Deployment, DeployError>
where
    P: PlatformApi + ?Sized,
{
    let req = build_deployment_request(project, site_name, Utc::now());
    let deployment = platform.create_deployment(&req).await?;
    tracing::info!(
        deployment_id = %deployment.id,
        url = %deployment.url,
        ready_state = ?deployment.ready_state,
        "submitted deployment"
    );
    Ok(deployment)
}

pub fn build_deployment_request(
    project: &Project,
    site_name: &str,
    submitted_at: DateTime<Utc>,
) -> CreateDeploymentRequest {
    let page = render_site_page(site_name, &project.name, submitted_at);
    CreateDeploymentRequest {
        name: project.name.clone(),
        project: project.id.clone(),
        target: PRODUCTION_TARGET.to_string(),
        files: vec![DeploymentFile {
            file: INDEX_FILE.to_string(),
            data: BASE64.encode(page.as_bytes()),
            encoding: "base64".to_string(),
        }],
        framework: STATIC_FRAMEWORK.to_string(),
        project_settings: ProjectSettings::static_site(),
    }
}

pub fn render_site_page(site_name: &str, project_name: &str, submitted_at: DateTime<Utc>) -> String {
    let site_name = escape_html(site_name);
    let project_name = escape_html(project_name);
    let deployed_at = submitted_at.to_rfc2822();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>{site_name}</title>
  <style>
    body {{ font-family: system-ui, sans-serif; display: grid; place-items: center; min-height: 100vh; margin: 0; background: #0f172a; color: #e2e8f0; }}
    main {{ text-align: center; }}
    small {{ color: #94a3b8; }}
  </style>
</head>
<body>
  <main>
    <h1>{site_name}</h1>
    <p>Project <code>{project_name}</code> is live.</p>
    <small>Deployed {deployed_at}</small>
  </main>
</body>
</html>
"#
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
