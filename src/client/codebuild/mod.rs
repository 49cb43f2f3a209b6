//! This module holds functionality specific to using AWS CodeBuild's API.
//!
//! Only the `BatchGetProjects` action is used. Requests are signed with
//! AWS Signature Version 4 using the credentials a Lambda function's
//! environment provides.

use std::env;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{
    Client, Method, Url,
    header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue},
};

use crate::{
    NotifierError, ProjectConfigError,
    client::{
        BuildSystemClient, ProjectSourceConfig, USER_AGENT, make_api_request, read_json,
        send_api_request,
    },
};
mod serde_structs;
use serde_structs::{BatchGetProjectsRequest, BatchGetProjectsResponse};
mod sigv4;
use sigv4::SigningRequest;

const SERVICE: &str = "codebuild";
const CONTENT_TYPE_JSON: &str = "application/x-amz-json-1.1";
const BATCH_GET_PROJECTS: &str = "CodeBuild_20161006.BatchGetProjects";

/// Credentials used to sign requests to AWS.
#[derive(Clone)]
pub struct AwsCredentials {
    /// The value of the `AWS_ACCESS_KEY_ID` environment variable.
    pub access_key_id: String,

    /// The value of the `AWS_SECRET_ACCESS_KEY` environment variable.
    pub secret_access_key: String,

    /// The value of the `AWS_SESSION_TOKEN` environment variable, if any.
    ///
    /// Lambda functions always run with temporary credentials that need this.
    pub session_token: Option<String>,
}

impl AwsCredentials {
    /// Read the credentials from the environment.
    pub fn from_env() -> Result<Self, NotifierError> {
        Ok(Self {
            access_key_id: env::var("AWS_ACCESS_KEY_ID")
                .map_err(|e| NotifierError::env_var("AWS_ACCESS_KEY_ID", e))?,
            secret_access_key: env::var("AWS_SECRET_ACCESS_KEY")
                .map_err(|e| NotifierError::env_var("AWS_SECRET_ACCESS_KEY", e))?,
            session_token: env::var("AWS_SESSION_TOKEN").ok(),
        })
    }
}

impl std::fmt::Debug for AwsCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AwsCredentials")
            .field("access_key_id", &self.access_key_id)
            .finish_non_exhaustive()
    }
}

/// A structure to work with the AWS CodeBuild API.
pub struct CodeBuildClient {
    /// The HTTP request client to be used for all API calls.
    client: Client,

    /// The regional API endpoint.
    endpoint: Url,

    /// The AWS region that requests are signed for.
    region: String,

    credentials: AwsCredentials,
}

impl CodeBuildClient {
    /// Instantiate a [`CodeBuildClient`] for the given `region`.
    ///
    /// If no `endpoint` is given, the public regional endpoint is used.
    pub fn new(
        region: &str,
        credentials: AwsCredentials,
        endpoint: Option<&str>,
    ) -> Result<Self, NotifierError> {
        let endpoint = match endpoint {
            Some(url) => Url::parse(url)?,
            None => Url::parse(format!("https://{SERVICE}.{region}.amazonaws.com/").as_str())?,
        };
        Ok(Self {
            client: Client::builder().user_agent(USER_AGENT).build()?,
            endpoint,
            region: region.to_string(),
            credentials,
        })
    }

    /// Instantiate a [`CodeBuildClient`] from the environment.
    ///
    /// The region is read from `AWS_REGION` (or `AWS_DEFAULT_REGION`), the
    /// credentials as described in [`AwsCredentials::from_env()`], and an
    /// optional endpoint override from `AWS_ENDPOINT_URL_CODEBUILD`.
    pub fn from_env() -> Result<Self, NotifierError> {
        let region = env::var("AWS_REGION")
            .or_else(|_| env::var("AWS_DEFAULT_REGION"))
            .map_err(|e| NotifierError::env_var("AWS_REGION", e))?;
        let endpoint = env::var("AWS_ENDPOINT_URL_CODEBUILD").ok();
        Self::new(&region, AwsCredentials::from_env()?, endpoint.as_deref())
    }

    /// The `Host` header value that reqwest sends for the endpoint.
    fn host(&self) -> String {
        let host = self.endpoint.host_str().unwrap_or_default();
        match self.endpoint.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }

    fn make_headers(&self, payload: &str) -> Result<HeaderMap<HeaderValue>, NotifierError> {
        let host = self.host();
        let signed = sigv4::sign(
            &SigningRequest {
                host: &host,
                content_type: CONTENT_TYPE_JSON,
                target: BATCH_GET_PROJECTS,
                payload: payload.as_bytes(),
                region: &self.region,
                service: SERVICE,
            },
            &self.credentials,
            Utc::now(),
        )?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_str(CONTENT_TYPE_JSON)?);
        headers.insert(
            HeaderName::from_static("x-amz-target"),
            HeaderValue::from_str(BATCH_GET_PROJECTS)?,
        );
        headers.insert(
            HeaderName::from_static("x-amz-date"),
            HeaderValue::from_str(&signed.amz_date)?,
        );
        if let Some(token) = &self.credentials.session_token {
            let mut val = HeaderValue::from_str(token)?;
            val.set_sensitive(true);
            headers.insert(HeaderName::from_static("x-amz-security-token"), val);
        }
        let mut val = HeaderValue::from_str(&signed.authorization)?;
        val.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, val);
        Ok(headers)
    }
}

#[async_trait]
impl BuildSystemClient for CodeBuildClient {
    async fn get_project(&self, project_name: &str) -> Result<ProjectSourceConfig, NotifierError> {
        let payload = serde_json::to_string(&BatchGetProjectsRequest {
            names: vec![project_name],
        })
        .map_err(|e| NotifierError::json("serialize BatchGetProjects payload", e))?;
        let headers = self.make_headers(&payload)?;
        let request = make_api_request(
            &self.client,
            self.endpoint.clone(),
            Method::POST,
            Some(payload),
            Some(headers),
        )?;
        let response =
            send_api_request(&self.client, request, "get AWS CodeBuild project details").await?;
        let body: BatchGetProjectsResponse =
            read_json(response, "deserialize AWS CodeBuild project details").await?;
        if !body.projects_not_found.is_empty() {
            log::debug!("Projects not found: {:?}", body.projects_not_found);
        }
        body.projects
            .into_iter()
            .find(|p| p.name == project_name)
            .map(ProjectSourceConfig::from)
            .ok_or_else(|| {
                ProjectConfigError::ProjectNotFound {
                    project: project_name.to_string(),
                }
                .into()
            })
    }
}
