//! This submodule declares data structures used to
//! deserialize (and serialize) JSON payload data.

use serde::{Deserialize, Serialize};

use crate::client::{PostedComment, PullRequest};

#[derive(Debug, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "lowercase")]
pub enum PullRequestState {
    Open,
    Closed,
}

/// A structure for deserializing a Pull Request's info from a response's json.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct PullRequestInfo {
    /// Is this PR a draft?
    #[serde(default)]
    pub draft: bool,
    /// Is this PR locked?
    pub locked: bool,
    /// The Pull Request's number.
    pub number: u64,
    /// What is current state of this PR?
    pub state: PullRequestState,
}

impl From<PullRequestInfo> for PullRequest {
    fn from(info: PullRequestInfo) -> Self {
        Self {
            number: info.number,
            open: info.state == PullRequestState::Open,
            locked: info.locked,
            draft: info.draft,
        }
    }
}

/// The payload used to create a thread comment.
#[derive(Debug, Serialize)]
pub struct NewThreadComment<'a> {
    pub body: &'a str,
}

/// A structure for deserializing a created comment from a response's json.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct ThreadComment {
    /// The comment's ID number.
    pub id: u64,
    /// The comment's web page.
    pub html_url: String,
    /// The comment's author.
    ///
    /// This is only used for debug output.
    pub user: Option<User>,
}

impl From<ThreadComment> for PostedComment {
    fn from(comment: ThreadComment) -> Self {
        Self {
            id: comment.id,
            html_url: comment.html_url,
        }
    }
}

/// A structure for deserializing a comment's author from a response's json.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct User {
    pub login: String,
    pub id: u64,
}
