//! JIRA API client implementation.
//!
//! This module provides the main client for interacting with the JIRA REST
//! API v2. It handles authentication, request/response processing, error
//! handling, and retry logic for GET requests.

use std::time::Duration;

use reqwest::{header, Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use super::auth::Auth;
use super::error::{ApiError, Result};
use super::record::{Record, Value};
use crate::config::Credentials;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of attempts for a GET request.
const MAX_ATTEMPTS: u32 = 3;

/// Delay between GET attempts in milliseconds.
const RETRY_DELAY_MS: u64 = 1000;

/// The JIRA API client.
///
/// Provides async methods for the JIRA REST API v2. Each operation is a
/// single request/response round trip with no cross-call state; the client
/// holds only immutable credentials and the transport handle, so it is safe
/// to share across tasks for independent calls.
///
/// GET requests are retried against transient failures because they are
/// idempotent. POST requests are issued exactly once - they may have side
/// effects (issue creation, comments) and retrying risks duplication.
#[derive(Debug)]
pub struct JiraClient {
    /// The HTTP client.
    client: Client,
    /// The normalized base URL for the JIRA instance.
    base_url: String,
    /// Authentication credentials.
    auth: Auth,
    /// Delay between GET retry attempts.
    retry_delay: Duration,
}

/// Options for a JQL search.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// The index of the first result to return (0-based).
    pub start_at: u32,
    /// Maximum number of issues to return.
    pub max_results: u32,
    /// Restrict returned issues to these fields, if set.
    pub fields: Option<Vec<String>>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            start_at: 0,
            max_results: 100,
            fields: None,
        }
    }
}

/// Body of a `POST search` request.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    jql: &'a str,
    start_at: u32,
    max_results: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    fields: Option<&'a [String]>,
}

/// The parts of a search response the client inspects.
#[derive(Deserialize)]
struct SearchResponse {
    total: u64,
    #[serde(default)]
    issues: Vec<serde_json::Value>,
}

impl JiraClient {
    /// Create a new JIRA client from resolved credentials.
    ///
    /// Uses the default per-request timeout of 30 seconds.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(credentials: &Credentials) -> Result<Self> {
        Self::with_timeout(credentials, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a new JIRA client with an explicit per-request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(credentials: &Credentials, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Network)?;

        Ok(Self {
            client,
            base_url: normalize_base_url(&credentials.base_url),
            auth: Auth::from_credentials(credentials),
            retry_delay: Duration::from_millis(RETRY_DELAY_MS),
        })
    }

    /// Override the delay between GET retry attempts.
    ///
    /// The default is one second.
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch issues by id or key, one GET per id, in input order.
    ///
    /// The whole batch aborts on the first failing id; there is no
    /// partial-success aggregation.
    #[instrument(skip(self, ids))]
    pub async fn get_issues<S: AsRef<str>>(&self, ids: &[S]) -> Result<Vec<Record>> {
        let mut issues = Vec::with_capacity(ids.len());
        for id in ids {
            debug!("Fetching issue {}", id.as_ref());
            let url = self.rest_url(&format!("issue/{}", id.as_ref()));
            let json = self.get(&url).await?;
            issues.push(into_record(json)?);
        }
        Ok(issues)
    }

    /// Search for issues using JQL.
    ///
    /// Issues a single `POST search`; no follow-up pages are fetched. If the
    /// server reports more matches than `max_results`, the call fails with
    /// [`ApiError::ResultSizeExceeded`] so the caller can re-issue the search
    /// with pagination.
    #[instrument(skip(self, options), fields(jql = %jql))]
    pub async fn search(&self, jql: &str, options: &SearchOptions) -> Result<Vec<Record>> {
        debug!(
            "Searching issues: startAt={}, maxResults={}",
            options.start_at, options.max_results
        );

        let request = SearchRequest {
            jql,
            start_at: options.start_at,
            max_results: options.max_results,
            fields: options.fields.as_deref(),
        };
        let json = self.post(&self.rest_url("search"), &request).await?;

        let response: SearchResponse = serde_json::from_value(json)
            .map_err(|e| ApiError::InvalidResponse(format!("malformed search response: {}", e)))?;

        if response.total > u64::from(options.max_results) {
            return Err(ApiError::ResultSizeExceeded {
                total: response.total,
                max_results: options.max_results,
            });
        }

        debug!("Found {} issues (total: {})", response.issues.len(), response.total);
        response.issues.into_iter().map(into_record).collect()
    }

    /// Create an issue from the given field mapping.
    ///
    /// The fields are posted as-is; no client-side validation against the
    /// service's create metadata is performed.
    #[instrument(skip(self, fields))]
    pub async fn create_issue(&self, fields: serde_json::Value) -> Result<Record> {
        let json = self.post(&self.rest_url("issue"), &fields).await?;
        into_record(json)
    }

    /// Add a comment to an issue on behalf of the given author.
    ///
    /// The server's response is discarded, but failures propagate.
    #[instrument(skip(self, body), fields(issue_id = %issue_id))]
    pub async fn add_comment(&self, issue_id: &str, body: &str, author: &str) -> Result<()> {
        let payload = serde_json::json!({
            "body": body,
            "author": { "name": author },
        });
        let url = self.rest_url(&format!("issue/{}/comment", issue_id));
        self.post(&url, &payload).await?;
        Ok(())
    }

    /// Fetch server metadata from the `serverInfo` endpoint.
    #[instrument(skip(self))]
    pub async fn server_info(&self) -> Result<Record> {
        let json = self.get(&self.rest_url("serverInfo")).await?;
        into_record(json)
    }

    /// Fetch server metadata and format a human-readable status line.
    ///
    /// The format is `"<serverTitle> -- <baseUrl> -- version <version>"`.
    #[instrument(skip(self))]
    pub async fn test_connection(&self) -> Result<String> {
        let info = self.server_info().await?;
        let title = server_info_field(&info, "serverTitle")?;
        let base_url = server_info_field(&info, "baseUrl")?;
        let version = server_info_field(&info, "version")?;
        Ok(format!("{} -- {} -- version {}", title, base_url, version))
    }

    /// Fetch the issue creation metadata, raw and unwrapped.
    #[instrument(skip(self))]
    pub async fn create_metadata(&self) -> Result<serde_json::Value> {
        self.get(&self.rest_url("issue/createmeta")).await
    }

    /// Build a full request URL for a REST API path.
    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/api/2/{}", self.base_url, path)
    }

    /// Perform an authenticated GET with retry on transient failures.
    ///
    /// A 200 body that fails JSON decoding is returned as a raw string
    /// value - a documented soft fallback, not an error. 401 fails
    /// immediately; any other status is retried up to [`MAX_ATTEMPTS`]
    /// with a fixed delay between attempts.
    async fn get(&self, url: &str) -> Result<serde_json::Value> {
        let mut attempts = 0;
        loop {
            attempts += 1;
            debug!("GET {} attempt {}/{}", url, attempts, MAX_ATTEMPTS);

            let response = self
                .client
                .get(url)
                .header(header::AUTHORIZATION, self.auth.header_value())
                .header(header::ACCEPT, "application/json")
                .send()
                .await?;

            let status = response.status();
            if status == StatusCode::OK {
                let body = response.text().await?;
                return match serde_json::from_str(&body) {
                    Ok(json) => Ok(json),
                    Err(_) => Ok(serde_json::Value::String(body)),
                };
            }
            if status == StatusCode::UNAUTHORIZED {
                return Err(ApiError::Unauthorized);
            }
            if attempts >= MAX_ATTEMPTS {
                return Err(ApiError::ConnectionFailed {
                    attempts,
                    last_status: status.as_u16(),
                });
            }

            warn!(
                "GET returned {} (attempt {}), retrying in {:?}",
                status, attempts, self.retry_delay
            );
            tokio::time::sleep(self.retry_delay).await;
        }
    }

    /// Perform an authenticated POST. Exactly one attempt.
    ///
    /// Non-success statuses are expected to carry a machine-readable error
    /// payload, which is surfaced through [`ApiError::Query`]. An error body
    /// that is not JSON is itself an error, never swallowed.
    async fn post<B: Serialize + ?Sized>(&self, url: &str, body: &B) -> Result<serde_json::Value> {
        debug!("POST {}", url);

        let response = self
            .client
            .post(url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::OK || status == StatusCode::CREATED {
            return response
                .json()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("failed to parse response: {}", e)));
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::Unauthorized);
        }

        let body_text = response.text().await?;
        let payload = serde_json::from_str(&body_text).map_err(|_| {
            ApiError::InvalidResponse(format!(
                "undecodable error body (status {}): {}",
                status, body_text
            ))
        })?;
        Err(ApiError::Query {
            status: status.as_u16(),
            payload,
        })
    }
}

/// Wrap a response body in a [`Record`], requiring a JSON object.
fn into_record(json: serde_json::Value) -> Result<Record> {
    match Value::from_json(json) {
        Value::Record(record) => Ok(record),
        _ => Err(ApiError::InvalidResponse(
            "expected a JSON object".to_string(),
        )),
    }
}

/// Extract a string field from a serverInfo record.
fn server_info_field<'a>(info: &'a Record, name: &str) -> Result<&'a str> {
    info.get(name)
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::InvalidResponse(format!("serverInfo missing field '{}'", name)))
}

/// Normalize the base URL by removing trailing slashes.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    // Warn if not HTTPS (but don't enforce for localhost/testing)
    if !url.starts_with("https://") && !url.contains("localhost") && !url.contains("127.0.0.1") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    url.to_string()
}
