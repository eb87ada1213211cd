//! Scratch API client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::error::{FetchFailure, ResolverError};
use crate::types::{LookupResult, UserResponse};

const DEFAULT_API_URL: &str = "https://api.scratch.mit.edu";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = concat!("scratch-user-resolver/", env!("CARGO_PKG_VERSION"));

/// Remote source of username to user ID lookups
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Look up a normalized username. Makes exactly one attempt.
    async fn fetch_user_id(&self, username: &str) -> LookupResult;
}

/// Client for the public Scratch user API
pub struct ScratchApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ScratchApiClient {
    /// Create a client for api.scratch.mit.edu with the default timeout
    pub fn new() -> crate::Result<Self> {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Create a client for a custom API base URL
    pub fn with_base_url(base_url: &str) -> crate::Result<Self> {
        Self::with_base_url_and_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client for a custom API base URL and request timeout
    pub fn with_base_url_and_timeout(base_url: &str, timeout: Duration) -> crate::Result<Self> {
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ResolverError::InvalidBaseUrl(base_url.to_string()));
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn user_url(&self, username: &str) -> String {
        format!("{}/users/{}", self.base_url, urlencoding::encode(username))
    }

    /// `Ok(None)` means the API answered 404
    async fn request_user_id(&self, username: &str) -> Result<Option<String>, FetchFailure> {
        let response = self
            .http
            .get(self.user_url(username))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(FetchFailure::UnexpectedStatus(status));
        }

        let body: UserResponse = response
            .json()
            .await
            .map_err(|e| FetchFailure::MalformedBody(e.to_string()))?;

        body.user_id()
            .map(Some)
            .ok_or_else(|| FetchFailure::MalformedBody("missing or non-numeric id".to_string()))
    }
}

#[async_trait]
impl UserDirectory for ScratchApiClient {
    async fn fetch_user_id(&self, username: &str) -> LookupResult {
        match self.request_user_id(username).await {
            Ok(Some(id)) => {
                debug!(username = %username, user_id = %id, "Resolved Scratch user");
                LookupResult::Found(id)
            }
            Ok(None) => {
                debug!(username = %username, "Scratch user not found");
                LookupResult::NotFound
            }
            Err(e) => {
                warn!(username = %username, error = %e, "Scratch API lookup failed");
                LookupResult::TransientFailure
            }
        }
    }
}
