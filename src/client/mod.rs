//! Mattermost API client.
//!
//! [`MattermostClient`] wraps outbound HTTP calls to the two API surfaces of
//! a deployment: the platform REST API mounted at `/api/v4` and the
//! Playbooks plugin API mounted at `/plugins/playbooks/api/v0`. Every
//! request carries the configured bearer token; responses are normalized so
//! that HTTP 204, empty bodies and non-JSON bodies on successful calls all
//! become the literal value `{"status": "ok"}` instead of a parse failure.
//!
//! Resource operations live in the per-group submodules and are all methods
//! on the one client type. Nothing here is retried: every failure surfaces
//! to the caller, which decides what to do with it.

pub mod channel;
pub mod playbook;
pub mod post;
pub mod run;
pub mod task;
pub mod team;
pub mod user;
pub mod webhook;

use crate::config::Config;
use crate::models::User;
use reqwest::{Client, Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::OnceLock;
use thiserror::Error;
use tracing::{debug, warn};

/// Mattermost client errors.
#[derive(Debug, Error)]
pub enum MattermostError {
    /// HTTP request failed before a status was received.
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned a non-success status.
    #[error("Mattermost API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body text.
        body: String,
    },

    /// Successful status whose body does not match the expected shape.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    /// A positional reference pointed at nothing. Lookup-style operations
    /// return `Ok(None)` instead; this is raised by mutations that require
    /// the target to exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A tool relied on the default-team fallback with none configured.
    #[error("No default team configured: set MM_DEFAULT_TEAM or pass team_id explicitly")]
    NoDefaultTeam,
}

/// Identities resolved from the bearer token, cached for the life of the
/// client. Populated on first use and never invalidated — a rename on the
/// remote side is not picked up until a new client is constructed. Under
/// first-use contention two callers may both issue the lookup; the extra
/// call is redundant, not harmful, since the value is immutable once set.
#[derive(Debug, Default)]
pub struct IdentityCache {
    current_user_id: OnceLock<String>,
    default_team_id: OnceLock<String>,
}

/// Serialize a request body struct. Infallible for the plain data structs
/// used as bodies.
pub(crate) fn to_body<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).expect("request body serialization")
}

/// Which API surface a request targets.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Api {
    /// The platform REST API (`/api/v4`).
    Platform,
    /// The Playbooks plugin API (`/plugins/playbooks/api/v0`).
    Playbooks,
}

/// Authenticated client for a Mattermost deployment.
pub struct MattermostClient {
    /// HTTP client instance.
    http: Client,

    /// Connection settings.
    config: Config,

    /// Memoized token identities.
    identity: IdentityCache,
}

impl MattermostClient {
    /// Create a new client. Each client gets a fresh identity cache, so
    /// constructing a new client is how tests (or a credential rotation)
    /// reset the memoized lookups.
    pub fn new(config: Config) -> Self {
        Self::with_identity(config, IdentityCache::default())
    }

    /// Create a client around an explicit identity cache.
    pub fn with_identity(config: Config, identity: IdentityCache) -> Self {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http,
            config,
            identity,
        }
    }

    /// Connection settings.
    pub fn config(&self) -> &Config {
        &self.config
    }

    fn url(&self, api: Api, endpoint: &str) -> String {
        let root = self.config.base_url.trim_end_matches('/');
        match api {
            Api::Platform => format!("{root}/api/v4{endpoint}"),
            Api::Playbooks => format!("{root}/plugins/playbooks/api/v0{endpoint}"),
        }
    }

    /// Core request path shared by every resource operation.
    ///
    /// On a non-success status the body is read as text and returned inside
    /// [`MattermostError::ApiError`]. On success the body is parsed as
    /// JSON; the three "no content" shapes (204, empty body, non-JSON body)
    /// normalize to `{"status": "ok"}` — a parse failure on a successful
    /// call is not an error.
    pub(crate) async fn request(
        &self,
        method: Method,
        api: Api,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<Value, MattermostError> {
        let url = self.url(api, endpoint);
        debug!(%method, %url, "mattermost request");

        let mut request = self
            .http
            .request(method, &url)
            .header("Authorization", format!("Bearer {}", self.config.token))
            .header("Content-Type", "application/json");
        if let Some(ref body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            warn!(status = status.as_u16(), %url, "mattermost API error: {body}");
            return Err(MattermostError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        if status == StatusCode::NO_CONTENT {
            return Ok(json!({ "status": "ok" }));
        }

        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(json!({ "status": "ok" }));
        }

        match serde_json::from_str(&text) {
            Ok(value) => Ok(value),
            // Successful status with a body that is not JSON.
            Err(_) => Ok(json!({ "status": "ok" })),
        }
    }

    /// Typed variant of [`request`](Self::request).
    pub(crate) async fn request_as<T: DeserializeOwned>(
        &self,
        method: Method,
        api: Api,
        endpoint: &str,
        body: Option<Value>,
    ) -> Result<T, MattermostError> {
        let value = self.request(method, api, endpoint, body).await?;
        serde_json::from_value(value).map_err(|e| MattermostError::InvalidResponse(e.to_string()))
    }

    /// Fetch an entity, shallow-merge `props` into whatever it currently
    /// carries, and write the whole entity back with a full PUT.
    ///
    /// The partial-update (PATCH) endpoints silently drop the `props` field,
    /// so a full replace is the only write that persists it. The entity is
    /// fetched as raw JSON and round-tripped untouched apart from the merged
    /// map. Best effort: there is no transaction on the remote side, and two
    /// concurrent merges on the same entity can lose one writer's keys.
    pub(crate) async fn merge_props(
        &self,
        endpoint: &str,
        props: &HashMap<String, String>,
    ) -> Result<Value, MattermostError> {
        let mut entity = self.request(Method::GET, Api::Platform, endpoint, None).await?;

        let Some(fields) = entity.as_object_mut() else {
            return Err(MattermostError::InvalidResponse(format!(
                "expected a JSON object from {endpoint}"
            )));
        };

        let merged = fields
            .entry("props")
            .or_insert_with(|| Value::Object(serde_json::Map::new()));
        if !merged.is_object() {
            *merged = Value::Object(serde_json::Map::new());
        }
        if let Some(map) = merged.as_object_mut() {
            for (key, value) in props {
                map.insert(key.clone(), Value::String(value.clone()));
            }
        }

        self.request(Method::PUT, Api::Platform, endpoint, Some(entity))
            .await
    }

    /// User id belonging to the bearer token, memoized after the first
    /// successful `/users/me` call.
    pub async fn current_user_id(&self) -> Result<String, MattermostError> {
        if let Some(id) = self.identity.current_user_id.get() {
            return Ok(id.clone());
        }

        let me: User = self
            .request_as(Method::GET, Api::Platform, "/users/me", None)
            .await?;
        // A lost set race just means another caller resolved it first.
        let _ = self.identity.current_user_id.set(me.id.clone());
        Ok(me.id)
    }

    /// Id of the configured default team, memoized after the first
    /// successful name lookup. Fails with [`MattermostError::NoDefaultTeam`]
    /// when no default team name is configured.
    pub async fn default_team_id(&self) -> Result<String, MattermostError> {
        if let Some(id) = self.identity.default_team_id.get() {
            return Ok(id.clone());
        }

        let name = self
            .config
            .default_team
            .clone()
            .ok_or(MattermostError::NoDefaultTeam)?;
        let team = self.team_get_by_name(&name).await?;
        let _ = self.identity.default_team_id.set(team.id.clone());
        Ok(team.id)
    }

    /// Use the given team id, or fall back to the configured default team.
    pub async fn resolve_team_id(
        &self,
        team_id: Option<String>,
    ) -> Result<String, MattermostError> {
        match team_id {
            Some(id) => Ok(id),
            None => self.default_team_id().await,
        }
    }

    /// Use the given user id, or fall back to the token's user.
    pub async fn resolve_user_id(
        &self,
        user_id: Option<String>,
    ) -> Result<String, MattermostError> {
        match user_id {
            Some(id) => Ok(id),
            None => self.current_user_id().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = MattermostClient::new(Config::new("https://chat.example.com/", "t"));
        assert_eq!(
            client.url(Api::Platform, "/users/me"),
            "https://chat.example.com/api/v4/users/me"
        );
        assert_eq!(
            client.url(Api::Playbooks, "/runs/r1"),
            "https://chat.example.com/plugins/playbooks/api/v0/runs/r1"
        );
    }

    #[test]
    fn test_identity_cache_starts_empty() {
        let client = MattermostClient::new(Config::new("https://chat.example.com", "t"));
        assert!(client.identity.current_user_id.get().is_none());
        assert!(client.identity.default_team_id.get().is_none());
    }
}
