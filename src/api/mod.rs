//! JIRA API client and types.
//!
//! This module provides the interface for communicating with the JIRA REST
//! API: authentication, the dynamic record mapper, and the client facade.

mod auth;
mod client;
mod error;
mod record;

pub use auth::Auth;
pub use client::{JiraClient, SearchOptions};
pub use error::{ApiError, Result};
pub use record::{Record, Value};
