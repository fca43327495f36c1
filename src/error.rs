//! Request Errors

use thiserror::Error;

/// Failure of a backend request
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// The request could not be sent or no response arrived
    #[error("network error: {0}")]
    Network(String),

    /// Non-JSON error response
    #[error("server responded with status {0}")]
    Status(u16),

    /// Response body did not have the expected shape
    #[error("unexpected response: {0}")]
    Decode(String),

    /// Response parsed but carried `success: false`
    #[error("{}", .0.as_deref().unwrap_or("request was rejected"))]
    Rejected(Option<String>),
}

impl ApiError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        ApiError::Network(err.to_string())
    }
}
