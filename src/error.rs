//! Error types for talking to the analysis service.

use thiserror::Error;

/// Errors raised by a diagnosis or query request.
#[derive(Error, Debug)]
pub enum RequestError {
    /// Endpoint base URL could not be parsed or joined
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// HTTP client could not be constructed
    #[error("Client error: {0}")]
    Client(String),

    /// Connection refused, timeout, broken body stream, ...
    #[error("Request failed: {0}")]
    Transport(String),

    /// Service answered with a non-2xx status
    #[error("Service returned HTTP {0}")]
    Status(u16),

    /// Body was not the expected JSON shape
    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Query message is empty")]
    EmptyMessage,

    /// Task was superseded or shut down before it finished
    #[error("Request cancelled")]
    Cancelled,
}

impl From<serde_json::Error> for RequestError {
    fn from(err: serde_json::Error) -> Self {
        RequestError::Decode(err.to_string())
    }
}

pub type RequestResult<T> = Result<T, RequestError>;
