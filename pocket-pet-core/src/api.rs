//! HTTP access to the pet API.
//!
//! This module provides the `PetApi` struct wrapping a shared `reqwest`
//! client. It issues the two operations the API exposes (`GET /status`,
//! `POST /{action}`) and maps every failure mode — transport error, non-2xx
//! status, unparseable body — into [`Error`](crate::Error) variants for the
//! caller to render.

use crate::error::{Error, Result};
use crate::pet::{Action, PetState};

/// HTTP client for the pet API.
///
/// Requests carry no body, headers, or authentication beyond the client
/// defaults, and no client-side timeout is enforced; a hung request is cut
/// off only by the transport's own limits.
#[derive(Debug, Clone)]
pub struct PetApi {
    /// Shared connection pool.
    http: reqwest::Client,
    /// Base URL with any trailing slash stripped.
    base_url: String,
}

impl PetApi {
    /// Create a new API handle for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidBaseUrl` if the URL does not parse. This is a
    /// construction-time check so a misconfigured client fails fast instead
    /// of failing on every poll.
    pub fn new(base_url: &str) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|e| Error::invalid_base_url(&base_url, e.to_string()))?;

        Ok(Self {
            http: reqwest::Client::new(),
            base_url,
        })
    }

    /// Get the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the full URL for an endpoint path.
    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Fetch the current pet state (`GET /status`).
    pub async fn status(&self) -> Result<PetState> {
        let url = self.endpoint("status");
        tracing::debug!(%url, "fetching pet status");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| Error::transport(&url, e.to_string()))?;

        Self::decode(&url, response).await
    }

    /// Perform an action (`POST /feed` or `POST /play`) and return the
    /// resulting pet state.
    ///
    /// A denial communicated via `action_allowed: false` in the body is a
    /// success at this layer; only transport/status/parse failures error.
    pub async fn act(&self, action: Action) -> Result<PetState> {
        let url = self.endpoint(action.path());
        tracing::debug!(%url, %action, "performing pet action");

        let response = self
            .http
            .post(&url)
            .send()
            .await
            .map_err(|e| Error::transport(&url, e.to_string()))?;

        Self::decode(&url, response).await
    }

    /// Check the response status and decode the JSON body.
    async fn decode(url: &str, response: reqwest::Response) -> Result<PetState> {
        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(url, e.to_string()))?;

        serde_json::from_str(&body).map_err(|source| Error::MalformedBody {
            url: url.to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_strips_trailing_slash() {
        let api = PetApi::new("http://localhost:8000/").unwrap();
        assert_eq!(api.base_url(), "http://localhost:8000");
        assert_eq!(api.endpoint("status"), "http://localhost:8000/status");
    }

    #[test]
    fn test_endpoint_paths() {
        let api = PetApi::new("http://localhost:8000").unwrap();
        assert_eq!(api.endpoint(Action::Feed.path()), "http://localhost:8000/feed");
        assert_eq!(api.endpoint(Action::Play.path()), "http://localhost:8000/play");
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let err = PetApi::new("not a url").unwrap_err();
        assert!(matches!(err, Error::InvalidBaseUrl { .. }));
    }
}
