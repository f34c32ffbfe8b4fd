//! Error taxonomy for the fetch and resolution layers

use thiserror::Error;

/// Failure talking to the CloudFront API.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never produced an error response: credentials could not
    /// be loaded, or the connection or timeout failed
    #[error("request failed: {0}")]
    Request(String),

    /// The API answered with a non-success status
    #[error("API request failed: {status} {code}: {message}")]
    Status {
        status: u16,
        code: String,
        message: String,
    },

    /// A successful response was missing its document
    #[error("failed to decode response body: {0}")]
    Decode(String),
}

impl TransportError {
    /// HTTP status of an API error, if the request got that far
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Provider error code (e.g. `NoSuchDistribution`), if any
    pub fn code(&self) -> Option<&str> {
        match self {
            TransportError::Status { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }
}

/// Errors surfaced by the enumerator, fetchers and resolver.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The requested distribution does not exist
    #[error("distribution not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The provider returned a shape the model cannot accept
    #[error("malformed upstream response: {0}")]
    MalformedUpstream(String),

    /// A requested column is not part of the table
    #[error("unknown column: {0}")]
    UnknownColumn(String),
}

impl FetchError {
    pub fn malformed(message: impl Into<String>) -> Self {
        FetchError::MalformedUpstream(message.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound(_))
    }
}
