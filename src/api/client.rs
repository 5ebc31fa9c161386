//! Authenticated HTTP client for the Jiminny API
//!
//! Every request is a single GET against the configured base URL with a
//! bearer token, JSON `Accept`/`Content-Type` headers and a fixed
//! timeout. There are no retries.

use std::time::Duration;

use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::StatusCode;
use serde_json::Value;
use url::Url;

use crate::api::ParticipantNames;
use crate::config::ApiConfig;
use crate::error::{JiminnyError, Result};

/// Result of probing several path prefixes for the same resource
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    /// Status of the successful attempt, or of the last one tried
    pub status: u16,
    /// Parsed body of the first `200` response
    pub body: Option<Value>,
    /// One `"<url> -> <status>"` entry per attempt
    pub attempts: Vec<String>,
}

impl ProbeOutcome {
    /// Whether one of the prefixes answered `200`
    pub fn is_found(&self) -> bool {
        self.status == StatusCode::OK.as_u16() && self.body.is_some()
    }
}

/// HTTP client for the Jiminny REST API
///
/// The bearer token is injected at construction; a client without one can
/// still be built, and every request then fails with
/// [`JiminnyError::MissingToken`].
#[derive(Clone)]
pub struct ApiClient {
    /// HTTP client instance
    client: reqwest::Client,
    /// Base URL that request paths are appended to
    base_url: Url,
    /// Bearer token
    token: Option<String>,
    /// Timeout for HTTP requests
    timeout: Duration,
}

impl ApiClient {
    /// Create a client from API configuration
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client cannot
    /// be built
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Self::build(
            &config.base_url,
            config.token.clone(),
            config.timeout(),
            &config.user_agent,
        )
    }

    /// Create a client with an explicit base URL, token and timeout
    ///
    /// # Examples
    ///
    /// ```
    /// use std::time::Duration;
    /// use jiminny_mcp::api::ApiClient;
    ///
    /// let client = ApiClient::with_timeout(
    ///     "https://app.jiminny.com/api/v1",
    ///     Some("token".to_string()),
    ///     Duration::from_secs(30),
    /// )
    /// .unwrap();
    /// assert!(client.has_token());
    /// ```
    pub fn with_timeout(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        Self::build(base_url, token, timeout, &ApiConfig::default().user_agent)
    }

    fn build(
        base_url: &str,
        token: Option<String>,
        timeout: Duration,
        user_agent: &str,
    ) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            JiminnyError::Config(format!("Invalid API base URL {}: {}", base_url, e))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(
                JiminnyError::Config(format!("API base URL cannot be a base: {}", base_url)).into(),
            );
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(JiminnyError::Http)?;

        Ok(Self {
            client,
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
            timeout,
        })
    }

    /// Whether a bearer token is configured
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Fail fast when no token is configured
    ///
    /// # Errors
    ///
    /// Returns [`JiminnyError::MissingToken`] if the token is absent
    pub fn require_token(&self) -> Result<&str> {
        self.token
            .as_deref()
            .ok_or_else(|| JiminnyError::MissingToken.into())
    }

    /// Build the URL for a sequence of path segments
    ///
    /// Each segment is percent-encoded on its own, so a conversation id
    /// containing `/` or `?` stays inside its segment.
    pub fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, url: &Url, query: &[(&str, String)]) -> Result<reqwest::Response> {
        let token = self.require_token()?;

        tracing::debug!("GET {}", url);
        let mut request = self
            .client
            .get(url.clone())
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");
        if !query.is_empty() {
            request = request.query(query);
        }

        request
            .send()
            .await
            .map_err(|e| transport_error(e, url).into())
    }

    async fn read_json(response: reqwest::Response, url: &Url) -> Result<Value> {
        let body = response
            .text()
            .await
            .map_err(|e| transport_error(e, url))?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!("Invalid JSON from {}: {}", url, e);
            JiminnyError::Serialization(e).into()
        })
    }

    /// Perform one authenticated GET and parse the JSON body
    ///
    /// # Arguments
    ///
    /// * `segments` - Path segments appended to the base URL
    /// * `query` - Query parameters
    ///
    /// # Errors
    ///
    /// Returns [`JiminnyError::MissingToken`] without a token,
    /// [`JiminnyError::Status`] for non-2xx responses,
    /// [`JiminnyError::Timeout`] when the timeout elapses and
    /// [`JiminnyError::Serialization`] for malformed JSON
    pub async fn get(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Value> {
        let url = self.url_for(segments);
        let response = self.send(&url, query).await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Jiminny API returned {} for {}", status, url);
            return Err(JiminnyError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into());
        }

        Self::read_json(response, &url).await
    }

    /// Try `{prefix}/{id}/{suffix}` for each prefix until one answers `200`
    ///
    /// Non-200 answers are recorded and the next prefix is tried. Transport
    /// failures and malformed JSON on a `200` abort the probe.
    ///
    /// # Errors
    ///
    /// Returns error if a request cannot be sent or a `200` body is not JSON
    pub async fn probe(&self, prefixes: &[&str], id: &str, suffix: &str) -> Result<ProbeOutcome> {
        let mut attempts = Vec::with_capacity(prefixes.len());
        let mut status = StatusCode::NOT_FOUND.as_u16();

        for prefix in prefixes {
            let url = self.url_for(&[*prefix, id, suffix]);
            let response = self.send(&url, &[]).await?;
            status = response.status().as_u16();
            attempts.push(format!("{} -> {}", url, status));

            if response.status() == StatusCode::OK {
                let body = Self::read_json(response, &url).await?;
                tracing::debug!("Probe for {} succeeded: {}", suffix, url);
                return Ok(ProbeOutcome {
                    status,
                    body: Some(body),
                    attempts,
                });
            }
        }

        tracing::debug!("Probe for {} failed: {}", suffix, attempts.join(" | "));
        Ok(ProbeOutcome {
            status,
            body: None,
            attempts,
        })
    }

    /// Resolve participant display names for a conversation
    ///
    /// Best-effort: any failure is logged and yields an empty mapping.
    pub async fn participant_names(&self, conversation_id: &str) -> ParticipantNames {
        match self
            .get(&["activity", conversation_id, "participants"], &[])
            .await
        {
            Ok(data) => ParticipantNames::from_response(&data),
            Err(e) => {
                tracing::debug!(
                    "Participant lookup failed for {}: {}",
                    conversation_id,
                    e
                );
                ParticipantNames::new()
            }
        }
    }
}

fn transport_error(e: reqwest::Error, url: &Url) -> JiminnyError {
    if e.is_timeout() {
        JiminnyError::Timeout(url.to_string())
    } else {
        JiminnyError::Http(e)
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_token", &self.token.is_some())
            .field("timeout", &self.timeout)
            .finish()
    }
}
