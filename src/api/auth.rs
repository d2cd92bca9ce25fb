//! Authentication handling for the JIRA API.
//!
//! JIRA accepts Basic Auth with a username and password (or API token).
//! The raw password is encoded into the header value immediately and not
//! retained.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};

use crate::config::Credentials;

/// Authentication credentials in HTTP header form.
#[derive(Debug, Clone)]
pub struct Auth {
    /// The JIRA username.
    username: String,
    /// The complete "Basic ..." authorization header value.
    auth_header: String,
}

impl Auth {
    /// Create new authentication credentials from username and password.
    ///
    /// The password is immediately encoded and the raw value is not stored.
    pub fn new(username: &str, password: &str) -> Self {
        let auth_header = build_auth_header(username, password);
        Self {
            username: username.to_string(),
            auth_header,
        }
    }

    /// Create authentication from resolved credentials.
    pub fn from_credentials(credentials: &Credentials) -> Self {
        Self::new(&credentials.username, &credentials.password)
    }

    /// Get the authorization header value for HTTP requests.
    ///
    /// Returns the complete "Basic ..." header value.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }

    /// Get the username.
    pub fn username(&self) -> &str {
        &self.username
    }
}

/// Build the Basic Auth header value.
///
/// Encodes "username:password" in Base64 and prepends "Basic ".
fn build_auth_header(username: &str, password: &str) -> String {
    let credentials = format!("{}:{}", username, password);
    let encoded = BASE64.encode(credentials.as_bytes());
    format!("Basic {}", encoded)
}
