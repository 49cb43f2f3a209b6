//! Extraction of a GitHub repository's owner and name from a clone location.
use std::{fmt::Display, sync::OnceLock};

use regex::Regex;

/// Matches `github.com/<owner>/<repo>.git` at the end of a clone location,
/// optionally followed by a single line feed.
///
/// Both captures are greedy, so extra path segments before the repo name
/// are kept in the owner (`github.com/a/b/c.git` yields owner `a/b`).
const LOCATION_PATTERN: &str = r"github\.com/(.+)/(.+)\.git\n?$";

static LOCATION_REGEX: OnceLock<Regex> = OnceLock::new();

/// A repository on GitHub, identified by its owner and name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoRef {
    /// The user or organization that owns the repository.
    pub owner: String,

    /// The repository's name (without a `.git` suffix).
    pub name: String,
}

impl RepoRef {
    /// Parse a repository reference from a clone location such as
    /// `https://github.com/owner/repo.git`.
    ///
    /// Returns [`None`] if the location does not end with a
    /// `github.com/<owner>/<repo>.git` sequence.
    pub fn from_location(location: &str) -> Option<Self> {
        let regex = LOCATION_REGEX.get_or_init(|| Regex::new(LOCATION_PATTERN).unwrap());
        let captures = regex.captures(location)?;
        Some(Self {
            owner: captures[1].to_string(),
            name: captures[2].to_string(),
        })
    }
}

impl Display for RepoRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
