//! Core types for the QFPay client
//!
//! # Architecture
//!
//! - [`config`] - Client configuration and environment loading
//! - [`payload`] - Form payloads sent to signed endpoints
//! - [`payment`] - Payment channel codes
//! - [`query`] - Transaction records returned by the query endpoint
//! - [`gateway`] - The `respcd`/`resperr`/`respmsg` response envelope
//! - [`constants`] - Endpoints, header names, success code, known prefixes
//!
//! # Examples
//!
//! ```
//! use qfpay::types::{ClientConfig, PayType, Payload, prefixes};
//!
//! # fn example() -> qfpay::Result<()> {
//! let config = ClientConfig::new(prefixes::HK_TEST, "APPCODE", "KEY").with_debug(true);
//! config.validate()?;
//!
//! let payload = Payload::new()
//!     .with("pay_type", PayType::FpsQrCode.code())
//!     .with("txamt", "100");
//! assert_eq!(payload.encode(), "pay_type=802001&txamt=100");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod gateway;
mod lenient;
pub mod payload;
pub mod payment;
pub mod query;

// Re-export commonly used types
pub use config::ClientConfig;
pub use constants::{content_types, endpoints, headers, prefixes};
pub use gateway::GatewayError;
pub use payload::Payload;
pub use payment::PayType;
pub use query::QueryRecord;
