//! # QFPay Rust Client
//!
//! A typed client for the QFPay payment gateway (`openapi-hk.qfapi.com`).
//!
//! ## Features
//!
//! - **Signed requests**: MD5 payload signatures with the `X-QF-*` headers
//! - **Payments**: QR-code and wallet payments through `/trade/v1/payment`
//! - **Queries**: transaction lookup through `/trade/v1/query`
//! - **Path extraction**: pull fields out of a response by dotted path,
//!   with `*` expanding over arrays
//! - **Gateway errors**: every response is checked for `respcd == "0000"`
//!   before anything is decoded
//! - **Debug dumps**: optional request/response traces through `tracing`
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use qfpay::{Extraction, PayType, QfPayClient};
//! use std::collections::HashMap;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Reads QFPAY_APPCODE, QFPAY_KEY and optionally QFPAY_PREFIX
//!     let client = QfPayClient::from_env()?;
//!
//!     let mut qrcode = String::new();
//!     let mut syssn = String::new();
//!     client
//!         .make_payment(PayType::AlipayQrCode, "ORDER-1", "Coffee", 3500, &HashMap::new())?
//!         .send_into(
//!             Extraction::new()
//!                 .scalar(&mut qrcode, "qrcode")
//!                 .scalar(&mut syssn, "syssn"),
//!         )
//!         .await?;
//!
//!     println!("Scan {} to pay (syssn {})", qrcode, syssn);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! - **`types`**: configuration, payloads, pay types, query records, the
//!   gateway envelope and protocol constants
//! - **`client`**: request builders and the send/dispatch envelope
//! - **`crypto`**: payload signing
//! - **`extract`**: path-addressed JSON extraction
//! - **`error`**: crate-wide error type

pub mod client;
pub mod crypto;
pub mod error;
pub mod extract;
pub mod types;

// Re-exports for convenience
pub use client::{QfPayClient, Request};
pub use error::{QfPayError, Result};
pub use extract::{extract, Extraction, Scalar, Sequence};
pub use types::*;

/// Current version of the qfpay library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_constant() {
        assert!(!VERSION.is_empty());
    }

    #[test]
    fn test_reexports() {
        let payload = Payload::new().with("txamt", "1");
        let signature = crypto::generate_sign(&payload, "key");
        assert_eq!(signature.len(), 32);

        let config = ClientConfig::new(prefixes::HK_PRODUCTION, "app", "key");
        assert!(QfPayClient::new(config).is_ok());
        assert_eq!("fps_qr".parse::<PayType>().unwrap(), PayType::FpsQrCode);
    }
}
