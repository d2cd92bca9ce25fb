//! Credential resolution for JIRA authentication.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{ConfigError, Result};

/// Environment variable holding the JIRA username.
pub const ENV_USER: &str = "JIRA_API_USER";

/// Environment variable holding the JIRA password or API token.
pub const ENV_PASS: &str = "JIRA_API_PASS";

/// Environment variable holding the JIRA base URL.
pub const ENV_URL: &str = "JIRA_API_URL";

/// Where to resolve credentials from.
#[derive(Debug, Clone)]
pub enum CredentialSource {
    /// Read [`ENV_USER`], [`ENV_PASS`] and [`ENV_URL`] from the process
    /// environment.
    Env,
    /// Read a TOML file with an `[auth]` section holding `username`,
    /// `password` and `url` keys.
    File(PathBuf),
    /// Use an in-memory map with `username`, `password` and `url` keys.
    Inline(HashMap<String, String>),
}

/// Resolved credentials for a JIRA instance.
///
/// Immutable once resolved; held for the lifetime of the client session
/// and never persisted by this library.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// The JIRA username.
    pub username: String,
    /// The password or API token.
    pub password: String,
    /// The JIRA instance base URL (e.g., "https://jira.example.com").
    pub base_url: String,
}

impl Credentials {
    /// Create credentials directly.
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            base_url: base_url.into(),
        }
    }

    /// Resolve credentials from the given source.
    ///
    /// All three values must be present; partial credentials are rejected
    /// rather than silently proceeding.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the source cannot be read or any of the
    /// three required values is missing.
    pub fn resolve(source: CredentialSource) -> Result<Self> {
        match source {
            CredentialSource::Env => Self::from_env(),
            CredentialSource::File(path) => Self::from_file(&path),
            CredentialSource::Inline(map) => Self::from_map(&map),
        }
    }

    /// Resolve credentials from environment variables.
    fn from_env() -> Result<Self> {
        Ok(Self {
            username: env_var(ENV_USER)?,
            password: env_var(ENV_PASS)?,
            base_url: env_var(ENV_URL)?,
        })
    }

    /// Resolve credentials from a TOML file with an `[auth]` section.
    fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let file: CredentialsFile = toml::from_str(&contents)?;
        let auth = file.auth.ok_or(ConfigError::MissingSection)?;

        Ok(Self {
            username: auth.username.ok_or(ConfigError::MissingKey("username"))?,
            password: auth.password.ok_or(ConfigError::MissingKey("password"))?,
            base_url: auth.url.ok_or(ConfigError::MissingKey("url"))?,
        })
    }

    /// Resolve credentials from an in-memory map.
    fn from_map(map: &HashMap<String, String>) -> Result<Self> {
        Ok(Self {
            username: map_key(map, "username")?,
            password: map_key(map, "password")?,
            base_url: map_key(map, "url")?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// The shape of a credentials file.
#[derive(Deserialize)]
struct CredentialsFile {
    auth: Option<AuthSection>,
}

#[derive(Deserialize)]
struct AuthSection {
    username: Option<String>,
    password: Option<String>,
    url: Option<String>,
}

fn env_var(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| ConfigError::MissingEnvVar(name.to_string()))
}

fn map_key(map: &HashMap<String, String>, key: &'static str) -> Result<String> {
    map.get(key).cloned().ok_or(ConfigError::MissingKey(key))
}
