//! The Pull Request comment publisher.
use crate::{
    BuildResult, NotifierConfig, NotifierError, ProjectConfigError, RepoRef,
    client::{
        BuildSystemClient, PostedComment, ProjectSourceConfig, SourceHostClient,
        SourceHostConnector,
    },
    comment::{SAR_APP_URL, SAR_HOMEPAGE, render_pr_comment},
};

/// The source type a build project must have.
pub const GITHUB_SOURCE_TYPE: &str = "GITHUB";

/// The source auth type a build project must have.
pub const OAUTH_AUTH_TYPE: &str = "OAUTH";

/// An authenticated source host session for one repository.
pub struct Session<C> {
    /// The repository that builds are reported to.
    pub repo: RepoRef,

    /// The client authenticated with the build project's OAuth token.
    pub client: C,
}

/// The lifecycle of a notifier's [`Session`].
enum SessionState<C> {
    Uninitialized,
    /// Left behind if opening the session was cancelled.
    Initializing,
    Ready(Session<C>),
    Failed,
}

/// Posts build results as comments on Pull Requests.
///
/// The source host session is opened on first use and reused afterward.
/// If opening it fails, the notifier stays unusable; create a new one instead.
pub struct BuildNotifier<B, S: SourceHostConnector> {
    build_system: B,
    connector: S,
    config: NotifierConfig,
    state: SessionState<S::Client>,
}

impl<B, S> BuildNotifier<B, S>
where
    B: BuildSystemClient,
    S: SourceHostConnector,
{
    /// Instantiate a [`BuildNotifier`]. No requests are made until one is needed.
    pub fn new(build_system: B, connector: S, config: NotifierConfig) -> Self {
        Self {
            build_system,
            connector,
            config,
            state: SessionState::Uninitialized,
        }
    }

    /// The configuration this notifier was created with.
    pub fn config(&self) -> &NotifierConfig {
        &self.config
    }

    /// Is the source host session open?
    pub fn is_ready(&self) -> bool {
        matches!(self.state, SessionState::Ready(_))
    }

    /// Open the source host session, if not already open.
    ///
    /// This fetches the build project's source configuration, validates it,
    /// and authenticates with the project's OAuth token. Calling this again
    /// after it succeeded returns the same session without any requests.
    pub async fn init_session(&mut self) -> Result<&Session<S::Client>, NotifierError> {
        if matches!(self.state, SessionState::Uninitialized) {
            self.state = SessionState::Initializing;
            match self.open_session().await {
                Ok(session) => self.state = SessionState::Ready(session),
                Err(e) => {
                    self.state = SessionState::Failed;
                    return Err(e);
                }
            }
        }
        match &self.state {
            SessionState::Ready(session) => Ok(session),
            _ => Err(NotifierError::SessionUnavailable),
        }
    }

    async fn open_session(&self) -> Result<Session<S::Client>, NotifierError> {
        let project = self
            .build_system
            .get_project(&self.config.project_name)
            .await?;
        let (token, repo) = validate_project(&self.config.project_name, &project)?;
        let client = self.connector.connect(token)?;
        Ok(Session { repo, client })
    }

    /// Post a comment that reports the given `build` on its Pull Request.
    pub async fn publish_pr_comment<R>(&mut self, build: &R) -> Result<PostedComment, NotifierError>
    where
        R: BuildResult + ?Sized,
    {
        let pr_comment = render_pr_comment(
            build.status(),
            build.logs_url(),
            self.config.expiration_in_days,
            SAR_APP_URL,
            SAR_HOMEPAGE,
        );

        // open the session first so the log shows the real repository
        let session = self.init_session().await?;
        log::debug!(
            "Publishing PR Comment: repo={}/{}, pr_id={}, comment={}",
            session.repo.owner,
            session.repo.name,
            build.pr_id(),
            pr_comment
        );

        let pull_request = session
            .client
            .get_pull_request(&session.repo, build.pr_id())
            .await?;
        session
            .client
            .create_issue_comment(&session.repo, &pull_request, &pr_comment)
            .await
    }
}

/// Check that a build project pulls from GitHub with OAuth, and
/// extract its token and repository.
///
/// The checks run in order: source type, auth type, token, then location.
pub fn validate_project<'a>(
    project_name: &str,
    project: &'a ProjectSourceConfig,
) -> Result<(&'a str, RepoRef), ProjectConfigError> {
    if project.source_type != GITHUB_SOURCE_TYPE {
        return Err(ProjectConfigError::NotGithubSource {
            project: project_name.to_string(),
            source_type: project.source_type.clone(),
        });
    }
    if project.auth_type.as_deref() != Some(OAUTH_AUTH_TYPE) {
        return Err(ProjectConfigError::NotOauthAuth {
            project: project_name.to_string(),
            auth_type: project.auth_type.clone(),
        });
    }
    let token = project
        .auth_resource
        .as_deref()
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ProjectConfigError::MissingAuthToken {
            project: project_name.to_string(),
        })?;
    let repo = project
        .location
        .as_deref()
        .and_then(RepoRef::from_location)
        .ok_or_else(|| ProjectConfigError::UnparsableLocation {
            project: project_name.to_string(),
            location: project.location.clone(),
        })?;
    Ok((token, repo))
}
