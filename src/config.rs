//! Server configuration.
//!
//! Configuration is loaded from environment variables. The server talks to a
//! single Mattermost deployment authenticated with a static bearer token;
//! there is no interactive login flow.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required environment variable.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
}

/// Connection settings for a Mattermost deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the deployment (e.g. "https://chat.example.com").
    pub base_url: String,

    /// Personal access token or bot token used as the bearer credential.
    pub token: String,

    /// Team name used when a tool call omits `team_id`.
    pub default_team: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Config {
    /// Create a configuration from a base URL and token, with defaults for
    /// the optional settings.
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: token.into(),
            default_team: None,
            timeout_secs: 30,
        }
    }

    /// Set the default team name.
    pub fn with_default_team(mut self, team: impl Into<String>) -> Self {
        self.default_team = Some(team.into());
        self
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `MM_URL`: Mattermost base URL (required)
    /// - `MM_TOKEN`: bearer token (required)
    /// - `MM_DEFAULT_TEAM`: team name used when tools omit `team_id`
    /// - `MM_TIMEOUT_SECS`: request timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = std::env::var("MM_URL")
            .map_err(|_| ConfigError::MissingEnvVar("MM_URL".to_string()))?;
        let token = std::env::var("MM_TOKEN")
            .map_err(|_| ConfigError::MissingEnvVar("MM_TOKEN".to_string()))?;

        Ok(Self {
            base_url,
            token,
            default_team: std::env::var("MM_DEFAULT_TEAM").ok(),
            timeout_secs: std::env::var("MM_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Get the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let config = Config::new("https://chat.example.com", "secret");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.default_team.is_none());
    }

    #[test]
    fn test_with_default_team() {
        let config = Config::new("https://chat.example.com", "secret").with_default_team("qa");
        assert_eq!(config.default_team.as_deref(), Some("qa"));
    }
}
