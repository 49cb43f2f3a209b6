//! Error types used across the codebuild-pr-notifier crate.
use thiserror::Error;

/// The possible errors emitted when a build project's source configuration
/// cannot be used to comment on a Pull Request.
///
/// These indicate a deployment misconfiguration; retrying will not help.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProjectConfigError {
    /// The build system does not know the project.
    #[error("AWS CodeBuild project {project} was not found")]
    ProjectNotFound { project: String },

    /// The project's source is not hosted on GitHub.
    #[error(
        "AWS CodeBuild project {project} source is {source_type}. Project source must be of type GITHUB"
    )]
    NotGithubSource {
        project: String,
        source_type: String,
    },

    /// The project's source is not authenticated with OAuth.
    #[error(
        "Could not get GitHub auth token from AWS CodeBuild project {project}. auth.type={}",
        .auth_type.as_deref().unwrap_or("<none>")
    )]
    NotOauthAuth {
        project: String,
        auth_type: Option<String>,
    },

    /// The project's OAuth source auth carries no token.
    #[error("AWS CodeBuild project {project} has no OAuth token in auth.resource")]
    MissingAuthToken { project: String },

    /// The project's source location does not name a GitHub owner/repo.
    #[error(
        "Could not parse GitHub owner/repo name from AWS CodeBuild project {project}. location={}",
        .location.as_deref().unwrap_or("<none>")
    )]
    UnparsableLocation {
        project: String,
        location: Option<String>,
    },
}

/// The possible errors emitted by the notifier and its clients.
#[derive(Debug, Error)]
pub enum NotifierError {
    /// Error related to making HTTP requests
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// Error related to making HTTP requests, with additional context about the request that caused the error.
    #[error("Failed to {task}: {source}")]
    RequestContext {
        task: String,
        #[source]
        source: reqwest::Error,
    },

    /// A request completed with a non-success HTTP status.
    #[error("Failed to {task}: server responded with {status}")]
    HttpStatus {
        task: String,
        status: reqwest::StatusCode,
    },

    /// Error emitted when creating header value fails.
    #[error("Tried to create a header value from invalid string data")]
    InvalidHeaderValue(#[from] reqwest::header::InvalidHeaderValue),

    /// Error emitted when parsing a URL fails.
    #[error("Failed to parse URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Error emitted when deserializing/serializing request/response JSON data.
    #[error("Failed to {task}: {source}")]
    Json {
        task: String,
        #[source]
        source: serde_json::Error,
    },

    /// Error emitted when failing to read environment variable
    #[error("Failed to get env var '{name}': {source}")]
    EnvVar {
        name: String,
        #[source]
        source: std::env::VarError,
    },

    /// Error emitted when an environment variable holds an unusable value.
    #[error("Env var '{name}' has invalid value '{value}': {source}")]
    ConfigValue {
        name: String,
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Error emitted when a request signing key is rejected.
    #[cfg(feature = "codebuild")]
    #[cfg_attr(docsrs, doc(cfg(feature = "codebuild")))]
    #[error("Failed to create request signing key: {0}")]
    SigningKey(#[from] hmac::digest::InvalidLength),

    /// The build project's source configuration is unusable.
    #[error(transparent)]
    ProjectConfig(#[from] ProjectConfigError),

    /// A previous attempt to open the session failed on this notifier instance.
    #[error("Source host session is unavailable after a failed initialization")]
    SessionUnavailable,
}

impl NotifierError {
    /// Helper function to create an [`Self::EnvVar`] error with variable name and source error.
    pub fn env_var(name: &str, source: std::env::VarError) -> Self {
        Self::EnvVar {
            name: name.to_string(),
            source,
        }
    }

    /// Builder function to add context to [`Self::Request`] errors.
    ///
    /// Returns a [`Self::RequestContext`] error if `self` is a [`Self::Request`] error.
    /// Otherwise, returns `self` unchanged.
    pub fn add_request_context(self, task: &str) -> Self {
        match self {
            Self::Request(e) => Self::RequestContext {
                task: task.to_string(),
                source: e,
            },
            _ => self,
        }
    }

    /// Helper function to create a [`Self::Json`] error with task context.
    pub fn json(task: &str, source: serde_json::Error) -> Self {
        Self::Json {
            task: task.to_string(),
            source,
        }
    }

    /// Is this error caused by the build project's configuration?
    ///
    /// Such errors are fatal for the deployment and should not be retried.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Self::ProjectConfig(_) | Self::EnvVar { .. } | Self::ConfigValue { .. }
        )
    }
}
