//! Error types for the backend client
//!
//! Every failure mode here is non-fatal to the session: the controller logs it
//! and leaves turn state untouched.

use thiserror::Error;

/// Errors that can occur while talking to the rules/AI backend
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection, timeout or body read failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend answered with a non-success status code
    #[error("backend returned {status}: {body}")]
    Status { status: u16, body: String },

    /// Response body was not the expected JSON
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),

    /// JSON parsed but violates the protocol (bad board shape, bad coordinates)
    #[error("protocol error: {message}")]
    Protocol { message: String },
}

impl ClientError {
    pub fn protocol(message: impl Into<String>) -> Self {
        ClientError::Protocol {
            message: message.into(),
        }
    }
}

/// Result type alias for backend calls
pub type ClientResult<T> = Result<T, ClientError>;
