use thiserror::Error;

/// Errors returned by REST service operations.
///
/// Every transport and parse failure in the crate converges on this type, so
/// callers match one error regardless of which layer failed.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Base URL is not a valid absolute URL.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),

    /// Endpoint path could not be joined to the base URL.
    #[error("invalid endpoint path '{0}'")]
    InvalidPath(String),

    /// HTTP transport-layer request failure.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Response body could not be parsed as JSON.
    #[error("failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Response body parsed as JSON, but not to the shape the operation expects.
    #[error("expected {expected}, got: {body}")]
    UnexpectedBody {
        expected: &'static str,
        body: String,
    },

    /// Non-success HTTP status with response payload.
    #[error("server returned status {status}: {body}")]
    HttpStatus {
        status: reqwest::StatusCode,
        body: String,
    },
}
