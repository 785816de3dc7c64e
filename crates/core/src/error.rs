//! Error types for the LocalAgent domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each boundary (model gateway, tool handlers) has its own error type; none
//! of them escape a turn, they are rendered into assistant content instead.

use thiserror::Error;

/// Errors from work done outside a turn, such as saving a transcript.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Failure to obtain a completion from the model endpoint.
///
/// The `Display` output is what the user sees as the assistant reply when a
/// turn ends on this error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Connection refused, DNS failure, or the request timed out.
    #[error("Error connecting to the model endpoint: {0}")]
    ConnectionFailed(String),

    /// The endpoint answered with a non-success HTTP status.
    #[error("Error: model endpoint returned status {0}")]
    BadStatus(u16),

    /// The endpoint answered 2xx but the body was not a completion.
    #[error("Error: model endpoint returned an invalid response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Short machine-readable kind, used in logs and domain events.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConnectionFailed(_) => "connection_failed",
            Self::BadStatus(_) => "bad_status",
            Self::InvalidResponse(_) => "invalid_response",
        }
    }

    /// Whether another attempt could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::ConnectionFailed(_) => true,
            Self::BadStatus(code) => *code >= 500 || *code == 408 || *code == 429,
            Self::InvalidResponse(_) => false,
        }
    }
}

/// Failure raised by a tool handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ToolError {
    #[error("Invalid tool argument: {0}")]
    InvalidArguments(String),
}
