use crate::error::DeployError;
use crate::models::platform::{CreateProjectRequest, Project};
use crate::platform_client::PlatformApi;

/// Creates the project `name`, or returns the existing one when the platform
/// reports that the name is already taken.
pub async fn resolve_project<P>(platform: &P, name: &str) -> Result<Project, DeployError>
where
    P: PlatformApi + ?Sized,
{
    match platform
        .create_project(&CreateProjectRequest::static_site(name))
        .await
    {
        Ok(project) => {
            tracing::info!(project_id = %project.id, name, "created project");
            Ok(project)
        }
        Err(e) if e.is_conflict() => {
            tracing::info!(name, "project already exists, reusing it");
            platform.get_project(name).await
        }
        Err(e) => Err(e),
    }
}
