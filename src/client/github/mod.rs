//! This module holds functionality specific to using Github's REST API.
//!
//! In the root module, we implement the source host traits.
//! The (private) submodule declares the JSON payloads exchanged with Github.

use std::env;

use async_trait::async_trait;
use reqwest::{
    Client, Method, Url,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue},
};

use crate::{
    NotifierError, RepoRef,
    client::{
        PostedComment, PullRequest, SourceHostClient, SourceHostConnector, USER_AGENT,
        make_api_request, read_json, send_api_request,
    },
};
mod serde_structs;
use serde_structs::{NewThreadComment, PullRequestInfo, ThreadComment};

/// The REST API used when `GITHUB_API_URL` is not set.
const DEFAULT_API_URL: &str = "https://api.github.com";

/// Creates [`GithubApiClient`]s for a Github REST API.
#[derive(Debug, Clone)]
pub struct GithubConnector {
    /// The base URL of the REST API, always ending with a `/`.
    api_url: Url,
}

impl GithubConnector {
    /// Instantiate a [`GithubConnector`] for the REST API at `api_url`.
    ///
    /// The `api_url` may include a path prefix, as Github Enterprise servers do
    /// (eg. `https://ghe.example.com/api/v3`).
    pub fn new(api_url: &str) -> Result<Self, NotifierError> {
        let mut api_url = Url::parse(api_url)?;
        if !api_url.path().ends_with('/') {
            // Url::join() would otherwise replace the last path segment
            let path = format!("{}/", api_url.path());
            api_url.set_path(&path);
        }
        Ok(Self { api_url })
    }

    /// Instantiate a [`GithubConnector`] from the `GITHUB_API_URL` environment variable.
    ///
    /// Defaults to `https://api.github.com` if the variable is not set.
    pub fn from_env() -> Result<Self, NotifierError> {
        let api_url = env::var("GITHUB_API_URL").unwrap_or(DEFAULT_API_URL.to_string());
        Self::new(&api_url)
    }

    /// The base URL of the REST API.
    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    fn make_headers(token: &str) -> Result<HeaderMap<HeaderValue>, NotifierError> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_str("application/vnd.github+json")?);
        let mut val = HeaderValue::from_str(format!("token {token}").as_str())?;
        val.set_sensitive(true);
        headers.insert(AUTHORIZATION, val);
        Ok(headers)
    }
}

impl SourceHostConnector for GithubConnector {
    type Client = GithubApiClient;

    fn connect(&self, token: &str) -> Result<GithubApiClient, NotifierError> {
        Ok(GithubApiClient {
            client: Client::builder()
                .default_headers(Self::make_headers(token)?)
                .user_agent(USER_AGENT)
                .build()?,
            api_url: self.api_url.clone(),
        })
    }
}

/// A structure to work with Github REST API on behalf of an authenticated user.
pub struct GithubApiClient {
    /// The HTTP request client to be used for all REST API calls.
    client: Client,

    /// The base URL of the REST API.
    api_url: Url,
}

impl GithubApiClient {
    fn repo_url(&self, repo: &RepoRef, endpoint: &str) -> Result<Url, NotifierError> {
        Ok(self
            .api_url
            .join(format!("repos/{}/{}/{endpoint}", repo.owner, repo.name).as_str())?)
    }
}

#[async_trait]
impl SourceHostClient for GithubApiClient {
    async fn get_pull_request(
        &self,
        repo: &RepoRef,
        number: u64,
    ) -> Result<PullRequest, NotifierError> {
        let url = self.repo_url(repo, format!("pulls/{number}").as_str())?;
        let request = make_api_request(&self.client, url, Method::GET, None, None)?;
        let response = send_api_request(&self.client, request, "get Pull Request info").await?;
        let info: PullRequestInfo = read_json(response, "deserialize Pull Request info").await?;
        log::debug!(
            "Resolved {repo}#{}: state={:?}, locked={}, draft={}",
            info.number,
            info.state,
            info.locked,
            info.draft
        );
        Ok(info.into())
    }

    async fn create_issue_comment(
        &self,
        repo: &RepoRef,
        pull_request: &PullRequest,
        body: &str,
    ) -> Result<PostedComment, NotifierError> {
        let url = self.repo_url(
            repo,
            format!("issues/{}/comments", pull_request.number).as_str(),
        )?;
        let payload = serde_json::to_string(&NewThreadComment { body })
            .map_err(|e| NotifierError::json("serialize thread comment payload", e))?;
        let request = make_api_request(&self.client, url, Method::POST, Some(payload), None)?;
        let response = send_api_request(&self.client, request, "post thread comment").await?;
        let comment: ThreadComment =
            read_json(response, "deserialize posted thread comment").await?;
        if let Some(user) = &comment.user {
            log::debug!(
                "Posted comment id {} as user {} ({})",
                comment.id,
                user.login,
                user.id
            );
        }
        Ok(comment.into())
    }
}
