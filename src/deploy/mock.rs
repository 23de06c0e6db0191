//! Scripted in-memory platform used by the deploy flow tests.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use axum::http::StatusCode;

use crate::error::DeployError;
use crate::models::platform::{
    CreateDeploymentRequest, CreateProjectRequest, Deployment, Project, ReadyState,
};
use crate::platform_client::PlatformApi;

pub const DEPLOYMENT_ID: &str = "dep1";
pub const DEPLOYMENT_HOST: &str = "my-site-abc.platform.dev";

/// One answer to a deployment status query.
#[derive(Debug, Clone, Copy)]
pub enum PollStep {
    State(ReadyState),
    Fail(StatusCode),
}

#[derive(Default)]
struct Calls {
    projects: HashMap<String, Project>,
    project_creates: usize,
    created_projects: usize,
    project_fetches: usize,
    deployment_creates: usize,
    deployments: Vec<CreateDeploymentRequest>,
    polls: usize,
}

pub struct MockPlatform {
    credential: bool,
    create_project_failure: Option<StatusCode>,
    get_project_failure: Option<StatusCode>,
    create_deployment_failure: Option<StatusCode>,
    polls: Mutex<VecDeque<PollStep>>,
    calls: Mutex<Calls>,
}

impl MockPlatform {
    pub fn new() -> Self {
        Self {
            credential: true,
            create_project_failure: None,
            get_project_failure: None,
            create_deployment_failure: None,
            polls: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Calls::default()),
        }
    }

    pub fn without_credential(mut self) -> Self {
        self.credential = false;
        self
    }

    pub fn with_create_project_failure(mut self, status: StatusCode) -> Self {
        self.create_project_failure = Some(status);
        self
    }

    pub fn with_get_project_failure(mut self, status: StatusCode) -> Self {
        self.get_project_failure = Some(status);
        self
    }

    pub fn with_create_deployment_failure(mut self, status: StatusCode) -> Self {
        self.create_deployment_failure = Some(status);
        self
    }

    /// Status answers handed out in order; once exhausted every poll sees `BUILDING`.
    pub fn with_polls(self, steps: impl IntoIterator<Item = PollStep>) -> Self {
        *self.polls.lock().unwrap() = steps.into_iter().collect();
        self
    }

    pub fn with_states(self, states: impl IntoIterator<Item = ReadyState>) -> Self {
        self.with_polls(states.into_iter().map(PollStep::State))
    }

    pub fn created_projects(&self) -> usize {
        self.calls.lock().unwrap().created_projects
    }

    pub fn project_fetches(&self) -> usize {
        self.calls.lock().unwrap().project_fetches
    }

    pub fn deployments(&self) -> Vec<CreateDeploymentRequest> {
        self.calls.lock().unwrap().deployments.clone()
    }

    pub fn polls(&self) -> usize {
        self.calls.lock().unwrap().polls
    }

    pub fn total_calls(&self) -> usize {
        let calls = self.calls.lock().unwrap();
        calls.project_creates + calls.project_fetches + calls.deployment_creates + calls.polls
    }

    fn failure(status: StatusCode) -> DeployError {
        DeployError::Platform {
            status,
            body: format!(r#"{{"error":{{"message":"mock {}"}}}}"#, status.as_u16()),
        }
    }

    fn deployment(state: ReadyState) -> Deployment {
        Deployment {
            id: DEPLOYMENT_ID.to_string(),
            url: DEPLOYMENT_HOST.to_string(),
            ready_state: Some(state),
            error_message: (state == ReadyState::Error).then(|| "Build step exited with 1".into()),
        }
    }
}

#[async_trait]
impl PlatformApi for MockPlatform {
    fn has_credential(&self) -> bool {
        self.credential
    }

    async fn create_project(&self, req: &CreateProjectRequest) -> Result<Project, DeployError> {
        let mut calls = self.calls.lock().unwrap();
        calls.project_creates += 1;
        if let Some(status) = self.create_project_failure {
            return Err(Self::failure(status));
        }
        if calls.projects.contains_key(&req.name) {
            return Err(Self::failure(StatusCode::CONFLICT));
        }
        calls.created_projects += 1;
        let project = Project {
            id: format!("prj_{}", calls.created_projects),
            name: req.name.clone(),
        };
        calls.projects.insert(req.name.clone(), project.clone());
        Ok(project)
    }

    async fn get_project(&self, name: &str) -> Result<Project, DeployError> {
        let mut calls = self.calls.lock().unwrap();
        calls.project_fetches += 1;
        if let Some(status) = self.get_project_failure {
            return Err(Self::failure(status));
        }
        calls
            .projects
            .get(name)
            .cloned()
            .ok_or_else(|| Self::failure(StatusCode::NOT_FOUND))
    }

    async fn create_deployment(
        &self,
        req: &CreateDeploymentRequest,
    ) -> Result<Deployment, DeployError> {
        let mut calls = self.calls.lock().unwrap();
        calls.deployment_creates += 1;
        if let Some(status) = self.create_deployment_failure {
            return Err(Self::failure(status));
        }
        calls.deployments.push(req.clone());
        Ok(Self::deployment(ReadyState::Queued))
    }

    async fn get_deployment(&self, deployment_id: &str) -> Result<Deployment, DeployError> {
        assert_eq!(deployment_id, DEPLOYMENT_ID);
        self.calls.lock().unwrap().polls += 1;
        let step = self
            .polls
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(PollStep::State(ReadyState::Building));
        match step {
            PollStep::State(state) => Ok(Self::deployment(state)),
            PollStep::Fail(status) => Err(Self::failure(status)),
        }
    }
}
