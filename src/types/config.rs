//! Client configuration

use super::constants::prefixes;
use std::env;
use std::time::Duration;

/// Environment variable holding the gateway prefix
pub const ENV_PREFIX: &str = "QFPAY_PREFIX";
/// Environment variable holding the merchant app code
pub const ENV_APP_CODE: &str = "QFPAY_APPCODE";
/// Environment variable holding the signing key
pub const ENV_KEY: &str = "QFPAY_KEY";
/// Environment variable enabling request/response dumps
pub const ENV_DEBUG: &str = "QFPAY_DEBUG";
/// Environment variable holding the request timeout in seconds
pub const ENV_TIMEOUT_SECS: &str = "QFPAY_TIMEOUT_SECS";

/// QFPay client configuration
///
/// Read-only once a client is built from it.
#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Gateway prefix, e.g. `https://openapi-hk.qfapi.com`
    pub prefix: String,
    /// Merchant application code (32 characters)
    pub app_code: String,
    /// Signing key (32 characters); never sent on the wire
    pub key: String,
    /// Dump requests and responses to the tracing sink
    pub debug: bool,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("prefix", &self.prefix)
            .field("app_code", &self.app_code)
            .field("key", &"<redacted>")
            .field("debug", &self.debug)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl ClientConfig {
    /// Create a new client config
    pub fn new(
        prefix: impl Into<String>,
        app_code: impl Into<String>,
        key: impl Into<String>,
    ) -> Self {
        Self {
            prefix: prefix.into(),
            app_code: app_code.into(),
            key: key.into(),
            debug: false,
            timeout: None,
        }
    }

    /// Load the config from `QFPAY_*` environment variables
    ///
    /// `QFPAY_PREFIX` defaults to the sandbox gateway. The result is validated.
    pub fn from_env() -> crate::Result<Self> {
        let prefix = env::var(ENV_PREFIX).unwrap_or_else(|_| prefixes::HK_TEST.to_string());
        let app_code = env::var(ENV_APP_CODE).unwrap_or_default();
        let key = env::var(ENV_KEY).unwrap_or_default();

        if app_code.is_empty() || key.is_empty() {
            return Err(crate::QfPayError::config(format!(
                "Missing credentials: {} and {} must be set",
                ENV_APP_CODE, ENV_KEY
            )));
        }

        let debug = env::var(ENV_DEBUG)
            .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true"))
            .unwrap_or(false);

        let mut config = Self::new(prefix, app_code, key).with_debug(debug);

        if let Ok(secs) = env::var(ENV_TIMEOUT_SECS) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                crate::QfPayError::config(format!(
                    "{} must be a whole number of seconds",
                    ENV_TIMEOUT_SECS
                ))
            })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the client configuration
    pub fn validate(&self) -> crate::Result<()> {
        if self.prefix.is_empty() {
            return Err(crate::QfPayError::config("Gateway prefix cannot be empty"));
        }

        if !self.prefix.starts_with("http://") && !self.prefix.starts_with("https://") {
            return Err(crate::QfPayError::config(
                "Gateway prefix must start with http:// or https://",
            ));
        }

        if self.app_code.is_empty() {
            return Err(crate::QfPayError::config("App code cannot be empty"));
        }

        if self.key.is_empty() {
            return Err(crate::QfPayError::config("Signing key cannot be empty"));
        }

        if !prefixes::is_known(&self.prefix) {
            tracing::debug!("Using non-standard gateway prefix: {}", self.prefix);
        }

        Ok(())
    }

    /// Enable or disable request/response dumps
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
