//! Common constants for the QFPay API

/// Known gateway prefixes
pub mod prefixes {
    /// Hong Kong production gateway
    pub const HK_PRODUCTION: &str = "https://openapi-hk.qfapi.com";
    /// Hong Kong sandbox gateway
    pub const HK_TEST: &str = "https://test-openapi-hk.qfapi.com";

    /// Check if a prefix is one of the known gateways
    pub fn is_known(prefix: &str) -> bool {
        matches!(prefix.trim_end_matches('/'), HK_PRODUCTION | HK_TEST)
    }
}

/// API endpoint paths, relative to the prefix
pub mod endpoints {
    /// Payment creation
    pub const PAYMENT: &str = "/trade/v1/payment";
    /// Transaction query
    pub const QUERY: &str = "/trade/v1/query";
}

/// Header names used on signed endpoints
pub mod headers {
    /// Merchant application code
    pub const APP_CODE: &str = "X-QF-APPCODE";
    /// Request signature
    pub const SIGN: &str = "X-QF-SIGN";
    /// Signature scheme
    pub const SIGN_TYPE: &str = "X-QF-SIGNTYPE";
}

/// Content types sent by the client
pub mod content_types {
    pub const JSON: &str = "application/json";
    pub const FORM: &str = "application/x-www-form-urlencoded";
}

/// Signature scheme announced in `X-QF-SIGNTYPE`
pub const SIGN_TYPE_MD5: &str = "MD5";

/// `respcd` value meaning success, both for the envelope and for a transaction
pub const SUCCESS_CODE: &str = "0000";

/// Transaction currency
pub const CURRENCY_HKD: &str = "HKD";

/// Layout of the `txdtm` request timestamp (UTC)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
