//! API error types for the JIRA client.

use thiserror::Error;

/// Errors that can occur when interacting with the JIRA API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Authentication failed - invalid username or password.
    #[error("authentication failed: check your username and password")]
    Unauthorized,

    /// A GET request exhausted its retry budget against non-success statuses.
    #[error("connection failed after {attempts} attempts (last status {last_status})")]
    ConnectionFailed {
        /// How many attempts were made.
        attempts: u32,
        /// The HTTP status of the final attempt.
        last_status: u16,
    },

    /// The server rejected a POST body (malformed JQL, invalid fields, ...).
    ///
    /// Carries the service's structured error payload.
    #[error("request rejected with status {status}: {payload}")]
    Query {
        /// The HTTP status of the rejection.
        status: u16,
        /// The decoded error body returned by the server.
        payload: serde_json::Value,
    },

    /// A search matched more issues than the requested page size.
    ///
    /// Re-issue the search with a larger `max_results` or a `start_at`
    /// offset.
    #[error("search matched {total} issues but only {max_results} were requested")]
    ResultSizeExceeded {
        /// Total matches reported by the server.
        total: u64,
        /// The page size that was requested.
        max_results: u32,
    },

    /// Network or HTTP transport error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Invalid response from the API.
    #[error("invalid API response: {0}")]
    InvalidResponse(String),
}

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthorized_display() {
        let err = ApiError::Unauthorized;
        assert_eq!(
            err.to_string(),
            "authentication failed: check your username and password"
        );
    }

    #[test]
    fn test_connection_failed_display() {
        let err = ApiError::ConnectionFailed {
            attempts: 3,
            last_status: 503,
        };
        assert_eq!(
            err.to_string(),
            "connection failed after 3 attempts (last status 503)"
        );
    }

    #[test]
    fn test_query_error_carries_payload() {
        let err = ApiError::Query {
            status: 400,
            payload: serde_json::json!({"errorMessages": ["bad jql"]}),
        };
        assert!(err.to_string().contains("400"));
        assert!(err.to_string().contains("bad jql"));
    }

    #[test]
    fn test_result_size_exceeded_display() {
        let err = ApiError::ResultSizeExceeded {
            total: 15,
            max_results: 10,
        };
        assert!(err.to_string().contains("15"));
        assert!(err.to_string().contains("10"));
    }
}
