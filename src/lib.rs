//! A client library for the JIRA REST API (v2).
//!
//! Authenticates with basic credentials, issues GET/POST requests against a
//! JIRA instance's REST endpoint, and deserializes JSON responses into
//! schema-less [`Record`]s so callers can read arbitrary nested fields
//! without a typed model.
//!
//! GET requests are retried against transient failures; POST requests are
//! issued exactly once because they may have side effects.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use jiraclient::{CredentialSource, Credentials, JiraClient, SearchOptions, Value};
//!
//! // Reads JIRA_API_USER, JIRA_API_PASS and JIRA_API_URL
//! let credentials = Credentials::resolve(CredentialSource::Env)?;
//! let jira = JiraClient::new(&credentials)?;
//!
//! println!("{}", jira.test_connection().await?);
//!
//! let issues = jira.search("project = OPS", &SearchOptions::default()).await?;
//! for issue in &issues {
//!     if let Some(key) = issue.get("key").and_then(Value::as_str) {
//!         println!("{}", key);
//!     }
//! }
//! ```

pub mod api;
pub mod config;

pub use api::{ApiError, Auth, JiraClient, Record, SearchOptions, Value};
pub use config::{ConfigError, CredentialSource, Credentials};
