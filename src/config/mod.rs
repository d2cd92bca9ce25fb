//! Credential configuration for the JIRA client.
//!
//! Credentials can be resolved from environment variables, a TOML
//! credentials file, or an in-memory map supplied by the embedding
//! application.

mod credentials;

pub use credentials::{CredentialSource, Credentials, ENV_PASS, ENV_URL, ENV_USER};

use thiserror::Error;

/// Errors that can occur while resolving credentials.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing credential environment variable: {0}")]
    MissingEnvVar(String),

    /// The credentials file could not be read.
    #[error("could not read credentials file: {0}")]
    ReadError(#[from] std::io::Error),

    /// The credentials file is not valid TOML.
    #[error("could not parse credentials file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The credentials file has no `[auth]` section.
    #[error("credentials file has no [auth] section")]
    MissingSection,

    /// A required credential key is absent from the source.
    #[error("missing credential key '{0}'")]
    MissingKey(&'static str),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
