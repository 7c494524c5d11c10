//! Error types for the QFPay client
//!
//! All fallible operations in this crate return [`Result`], whose error type
//! is [`QfPayError`].
//!
//! # Error Categories
//!
//! - **Transport** ([`QfPayError::Http`]): network failure, timeout or an
//!   aborted exchange. Nothing was written to any destination.
//! - **Gateway** ([`QfPayError::Gateway`]): the API answered with a `respcd`
//!   other than `"0000"`. Nothing was written to any destination.
//! - **Decode** ([`QfPayError::Json`]): the body did not match the shape a
//!   wholesale decode asked for.
//! - **Local** ([`QfPayError::Config`], [`QfPayError::InvalidRequest`],
//!   [`QfPayError::Url`]): the request could not be built.
//!
//! Missing values during path extraction are not errors; they become default
//! values (see [`crate::extract`]).

use crate::types::GatewayError;
use thiserror::Error;

/// Result type alias for QFPay operations
pub type Result<T> = std::result::Result<T, QfPayError>;

/// Errors that can occur while talking to the QFPay gateway
#[derive(Debug, Error)]
pub enum QfPayError {
    /// HTTP transport failed (connect, timeout, body read)
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway answered with a non-success `respcd`
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The request URL could not be formed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Client configuration is invalid or incomplete
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// The caller supplied arguments the request cannot carry
    #[error("Invalid request: {message}")]
    InvalidRequest { message: String },
}

impl QfPayError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an invalid request error
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// The gateway envelope, if this error came from the gateway
    pub fn gateway(&self) -> Option<&GatewayError> {
        match self {
            Self::Gateway(envelope) => Some(envelope),
            _ => None,
        }
    }

    /// Whether the error happened on the wire rather than at the gateway
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Http(_))
    }
}
