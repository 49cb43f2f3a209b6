//! This submodule declares data structures used to
//! deserialize (and serialize) CodeBuild's JSON payload data.

use serde::{Deserialize, Serialize};

use crate::client::ProjectSourceConfig;

/// The `BatchGetProjects` request payload.
#[derive(Debug, Serialize)]
pub struct BatchGetProjectsRequest<'a> {
    pub names: Vec<&'a str>,
}

/// The `BatchGetProjects` response payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchGetProjectsResponse {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub projects_not_found: Vec<String>,
}

/// The parts of a build project that are of interest.
#[derive(Debug, Deserialize)]
pub struct Project {
    pub name: String,
    pub source: ProjectSource,
}

#[derive(Debug, Deserialize)]
pub struct ProjectSource {
    #[serde(rename = "type")]
    pub source_type: String,
    pub location: Option<String>,
    pub auth: Option<SourceAuth>,
}

#[derive(Debug, Deserialize)]
pub struct SourceAuth {
    #[serde(rename = "type")]
    pub auth_type: String,
    pub resource: Option<String>,
}

impl From<Project> for ProjectSourceConfig {
    fn from(project: Project) -> Self {
        let (auth_type, auth_resource) = match project.source.auth {
            Some(auth) => (Some(auth.auth_type), auth.resource),
            None => (None, None),
        };
        Self {
            project_name: project.name,
            source_type: project.source.source_type,
            auth_type,
            auth_resource,
            location: project.source.location,
        }
    }
}

