#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]
pub mod client;
pub mod comment;
mod config;
pub mod error;
mod notifier;
mod repo_ref;

pub use client::{BuildSystemClient, SourceHostClient, SourceHostConnector};
pub use config::{EXPIRATION_IN_DAYS_VAR, NotifierConfig, PROJECT_NAME_VAR};
pub use error::{NotifierError, ProjectConfigError};
pub use notifier::{BuildNotifier, GITHUB_SOURCE_TYPE, OAUTH_AUTH_TYPE, Session, validate_project};
pub use repo_ref::RepoRef;

/// The outcome of a finished build, as reported on its Pull Request.
pub trait BuildResult {
    /// The build's status label (eg. `"SUCCEEDED"` or `"FAILED"`).
    fn status(&self) -> &str;

    /// The URL of the build's logs.
    fn logs_url(&self) -> &str;

    /// The number of the Pull Request that triggered the build.
    fn pr_id(&self) -> u64;
}

/// A plain [`BuildResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildInfo {
    pub status: String,
    pub logs_url: String,
    pub pr_id: u64,
}

impl BuildInfo {
    pub fn new(status: impl Into<String>, logs_url: impl Into<String>, pr_id: u64) -> Self {
        Self {
            status: status.into(),
            logs_url: logs_url.into(),
            pr_id,
        }
    }
}

impl BuildResult for BuildInfo {
    fn status(&self) -> &str {
        &self.status
    }

    fn logs_url(&self) -> &str {
        &self.logs_url
    }

    fn pr_id(&self) -> u64 {
        self.pr_id
    }
}
