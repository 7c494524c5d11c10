//! Gateway response envelope

use super::constants::SUCCESS_CODE;
use super::lenient;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The API's uniform success/failure wrapper
///
/// Every response body is decoded into this shape before anything else. A
/// body that is not a JSON object, or lacks `respcd`, decodes to an empty
/// code and is therefore a failure. Fields are read independently, so a
/// `null` or mistyped `respmsg` does not hide a valid `respcd`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayError {
    /// Response code, `"0000"` on success
    #[serde(rename = "respcd", default, deserialize_with = "lenient::string")]
    pub code: String,
    /// Short error token
    #[serde(rename = "resperr", default, deserialize_with = "lenient::string")]
    pub err: String,
    /// Human-readable message, often empty
    #[serde(rename = "respmsg", default, deserialize_with = "lenient::string")]
    pub message: String,
}

impl GatewayError {
    /// Decode an envelope from a response body, ignoring decode failures
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// Whether the envelope carries the success code
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Turn a failed envelope into an error, pass a successful one through
    pub fn into_result(self) -> crate::Result<()> {
        if self.is_success() {
            Ok(())
        } else {
            Err(self.into())
        }
    }
}

impl fmt::Display for GatewayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: Code={}, Message={}", self.code, self.err)?;
        if !self.message.is_empty() {
            write!(f, " ({})", self.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for GatewayError {}
