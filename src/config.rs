//! Deployment-time configuration of the notifier.
use std::env::{self, VarError};

use crate::NotifierError;

/// The env var naming the AWS CodeBuild project whose builds are reported.
pub const PROJECT_NAME_VAR: &str = "PROJECT_NAME";

/// The env var holding the number of days build logs stay available.
pub const EXPIRATION_IN_DAYS_VAR: &str = "EXPIRATION_IN_DAYS";

/// Values fixed per deployment of the notifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotifierConfig {
    /// The build project to fetch source configuration for.
    pub project_name: String,

    /// The log retention period mentioned in each comment.
    pub expiration_in_days: u32,
}

impl NotifierConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, NotifierError> {
        Self::from_vars(|name| env::var(name))
    }

    /// Read the configuration with the given variable lookup.
    ///
    /// This is what [`Self::from_env()`] uses with [`std::env::var()`].
    pub fn from_vars<F>(lookup: F) -> Result<Self, NotifierError>
    where
        F: Fn(&str) -> Result<String, VarError>,
    {
        let project_name =
            lookup(PROJECT_NAME_VAR).map_err(|e| NotifierError::env_var(PROJECT_NAME_VAR, e))?;
        let days = lookup(EXPIRATION_IN_DAYS_VAR)
            .map_err(|e| NotifierError::env_var(EXPIRATION_IN_DAYS_VAR, e))?;
        let expiration_in_days = days
            .trim()
            .parse::<u32>()
            .map_err(|e| NotifierError::ConfigValue {
                name: EXPIRATION_IN_DAYS_VAR.to_string(),
                value: days.clone(),
                source: e,
            })?;
        Ok(Self {
            project_name,
            expiration_in_days,
        })
    }
}
