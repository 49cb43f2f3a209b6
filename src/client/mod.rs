//! A module to contain traits and structs that are needed to talk to
//! the build system and the source host.
use async_trait::async_trait;
use reqwest::{
    Client, IntoUrl, Method, Request, Response,
    header::{HeaderMap, HeaderValue},
};

use crate::{NotifierError, RepoRef};

#[cfg(feature = "codebuild")]
mod codebuild;
#[cfg(feature = "codebuild")]
pub use codebuild::{AwsCredentials, CodeBuildClient};

#[cfg(feature = "github")]
mod github;
#[cfg(feature = "github")]
pub use github::{GithubApiClient, GithubConnector};

#[cfg(not(any(feature = "github", feature = "codebuild", feature = "custom-client-impl")))]
compile_error!(
    "At least one client implementation (eg. 'github') should be enabled via `features`"
);

/// The User-Agent header value included in all HTTP requests.
pub static USER_AGENT: &str = concat!(env!("CARGO_CRATE_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// The source configuration of a build project, as stored by the build system.
#[derive(Clone, PartialEq, Eq)]
pub struct ProjectSourceConfig {
    /// The build project's name.
    pub project_name: String,

    /// The kind of source host (eg. `"GITHUB"`).
    pub source_type: String,

    /// The kind of authentication used to pull the source (eg. `"OAUTH"`).
    pub auth_type: Option<String>,

    /// The opaque auth resource. For `OAUTH` sources, this is the token.
    pub auth_resource: Option<String>,

    /// The clone location of the source.
    pub location: Option<String>,
}

impl std::fmt::Debug for ProjectSourceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProjectSourceConfig")
            .field("project_name", &self.project_name)
            .field("source_type", &self.source_type)
            .field("auth_type", &self.auth_type)
            .field("auth_resource", &self.auth_resource.as_ref().map(|_| "***"))
            .field("location", &self.location)
            .finish()
    }
}

/// A Pull Request as resolved on the source host.
///
/// Only [`Self::number`] is used to post comments. The other fields are
/// informational: comments are posted regardless of them, and the source
/// host decides whether a closed or locked PR accepts a comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequest {
    /// The Pull Request's number.
    pub number: u64,
    /// Is this PR still open? (informational)
    pub open: bool,
    /// Is this PR locked? (informational)
    pub locked: bool,
    /// Is this PR a draft? (informational)
    pub draft: bool,
}

/// A comment created on the source host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedComment {
    /// The comment's ID number.
    pub id: u64,
    /// The comment's web page.
    pub html_url: String,
}

/// A read-only view of the build system's project configuration.
#[async_trait]
pub trait BuildSystemClient {
    /// Get the source configuration of the build project named `project_name`.
    async fn get_project(&self, project_name: &str) -> Result<ProjectSourceConfig, NotifierError>;
}

/// Creates authenticated source host clients.
pub trait SourceHostConnector {
    /// The client type created by [`Self::connect()`].
    type Client: SourceHostClient;

    /// Create a client that authenticates all requests with the given `token`.
    fn connect(&self, token: &str) -> Result<Self::Client, NotifierError>;
}

/// An authenticated client of the source host's API.
#[async_trait]
pub trait SourceHostClient {
    /// Resolve the Pull Request `number` in the given `repo`.
    async fn get_pull_request(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<PullRequest, NotifierError>;

    /// Post a new comment with the given `body` on the thread of the given Pull Request.
    async fn create_issue_comment(
        &self,
        repo: &RepoRef,
        pull_request: &PullRequest,
        body: &str,
    ) -> Result<PostedComment, NotifierError>;
}

/// Construct a HTTP request to be sent.
pub(crate) fn make_api_request(
    client: &Client,
    url: impl IntoUrl,
    method: Method,
    data: Option<String>,
    headers: Option<HeaderMap<HeaderValue>>,
) -> Result<Request, NotifierError> {
    let mut req = client.request(method, url);
    if let Some(h) = headers {
        req = req.headers(h);
    }
    if let Some(d) = data {
        req = req.body(d);
    }
    req.build().map_err(NotifierError::Request)
}

/// Send a request and check the response's status.
///
/// A non-success status is logged along with the response's text
/// and returned as [`NotifierError::HttpStatus`].
pub(crate) async fn send_api_request(
    client: &Client,
    request: Request,
    task: &str,
) -> Result<Response, NotifierError> {
    let response = client
        .execute(request)
        .await
        .map_err(|e| NotifierError::Request(e).add_request_context(task))?;
    let status = response.status();
    if !status.is_success() {
        log::error!("Failed to {task}: {status}");
        if let Ok(text) = response.text().await {
            log::error!("{text}");
        }
        return Err(NotifierError::HttpStatus {
            task: task.to_string(),
            status,
        });
    }
    Ok(response)
}

/// Read a successful response's text and deserialize it as JSON.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    response: Response,
    task: &str,
) -> Result<T, NotifierError> {
    let body = response
        .text()
        .await
        .map_err(|e| NotifierError::Request(e).add_request_context(task))?;
    serde_json::from_str::<T>(&body).map_err(|e| NotifierError::json(task, e))
}
