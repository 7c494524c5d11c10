//! Cryptographic utilities for QFPay requests
//!
//! - [`sign`] - MD5 payload signatures sent in `X-QF-SIGN`
//!
//! # Examples
//!
//! ```
//! use qfpay::crypto::generate_sign;
//! use qfpay::types::Payload;
//!
//! let payload = Payload::new().with("out_trade_no", "T1");
//! let signature = generate_sign(&payload, "KEY");
//! assert_eq!(signature.len(), 32);
//! ```

pub mod sign;


pub use sign::{generate_sign, string_to_sign, verify_sign};
