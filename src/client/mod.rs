//! QFPay API client
//!
//! [`QfPayClient`] owns the configuration and the HTTP transport and builds
//! [`Request`]s. Requests are sent with one of the `send*` methods, which
//! decide what happens to the response body:
//!
//! | method | destination |
//! |---|---|
//! | [`Request::send`] | none, only the gateway envelope is checked |
//! | [`Request::send_raw`] | the raw body |
//! | [`Request::send_json`] / [`Request::send_json_into`] | a fully typed value |
//! | [`Request::send_into`] | (destination, path) pairs, see [`crate::extract`] |
//!
//! # Examples
//!
//! ```no_run
//! use qfpay::client::QfPayClient;
//! use qfpay::extract::Extraction;
//! use qfpay::types::{ClientConfig, PayType, prefixes};
//! use std::collections::HashMap;
//!
//! # async fn example() -> qfpay::Result<()> {
//! let client = QfPayClient::new(ClientConfig::new(prefixes::HK_TEST, "APPCODE", "KEY"))?;
//!
//! let mut qrcode = String::new();
//! let mut syssn = String::new();
//! client
//!     .make_payment(PayType::FpsQrCode, "ORDER-1", "Coffee", 3500, &HashMap::new())?
//!     .send_into(
//!         Extraction::new()
//!             .scalar(&mut qrcode, "qrcode")
//!             .scalar(&mut syssn, "syssn"),
//!     )
//!     .await?;
//!
//! for record in client.query(&["ORDER-1"]).await? {
//!     println!("{} paid: {}", record.out_trade_no, record.paid());
//! }
//! # Ok(())
//! # }
//! ```

use crate::crypto;
use crate::extract::Extraction;
use crate::types::constants::{CURRENCY_HKD, SIGN_TYPE_MD5, TIMESTAMP_FORMAT};
use crate::types::{
    content_types, endpoints, headers, ClientConfig, Payload, QueryRecord,
};
use crate::{QfPayError, Result};
use chrono::{DateTime, Utc};
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, Method};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use url::Url;

mod request;


pub use request::Request;

/// Path under which the query endpoint lists transactions
pub const QUERY_RECORDS_PATH: &str = "data.*";

/// Client for the QFPay gateway
///
/// Cheap to clone; the configuration is shared and never mutated.
#[derive(Clone)]
pub struct QfPayClient {
    config: Arc<ClientConfig>,
    http: reqwest::Client,
}

impl std::fmt::Debug for QfPayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QfPayClient")
            .field("config", &self.config)
            .finish()
    }
}

impl QfPayClient {
    /// Create a new client
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;

        let mut client_builder = reqwest::Client::builder();

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let http = client_builder
            .build()
            .map_err(|e| QfPayError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// Create a client around an existing `reqwest::Client`
    ///
    /// The config's timeout is ignored; configure it on `http` instead.
    pub fn with_http_client(config: ClientConfig, http: reqwest::Client) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config: Arc::new(config),
            http,
        })
    }

    /// Create a client from `QFPAY_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// The client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn url(&self, path: &str) -> Result<Url> {
        let prefix = self.config.prefix.trim_end_matches('/');
        Ok(Url::parse(&format!("{}{}", prefix, path))?)
    }

    fn build(
        &self,
        method: Method,
        path: &str,
        headers: HeaderMap,
        body: Option<Vec<u8>>,
    ) -> Result<Request> {
        let mut builder = self.http.request(method, self.url(path)?).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        Ok(Request::new(
            builder.build()?,
            self.http.clone(),
            Arc::clone(&self.config),
        ))
    }

    /// Build a request with an optional JSON body
    pub fn new_request<T: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        body: Option<&T>,
    ) -> Result<Request> {
        let body = body.map(serde_json::to_vec).transpose()?;
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_types::JSON));
        self.build(method, path, headers, body)
    }

    /// Build a request whose body is sent as-is
    ///
    /// The content type defaults to JSON; override it with
    /// [`Request::set_header`].
    pub fn new_raw_request(
        &self,
        method: Method,
        path: &str,
        body: impl Into<Vec<u8>>,
    ) -> Result<Request> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(content_types::JSON));
        self.build(method, path, headers, Some(body.into()))
    }

    /// Build a signed, form-encoded `POST` to `path`
    pub fn signed_request(&self, path: &str, payload: &Payload) -> Result<Request> {
        let app_code = HeaderValue::from_str(&self.config.app_code)
            .map_err(|_| QfPayError::invalid_request("app code is not a valid header value"))?;

        let mut header_map = HeaderMap::new();
        header_map.insert(CONTENT_TYPE, HeaderValue::from_static(content_types::FORM));
        header_map.insert(headers::APP_CODE, app_code);
        header_map.insert(
            headers::SIGN,
            HeaderValue::from_str(&self.generate_sign(payload)).map_err(|_| {
                QfPayError::invalid_request("signature is not a valid header value")
            })?,
        );
        header_map.insert(headers::SIGN_TYPE, HeaderValue::from_static(SIGN_TYPE_MD5));

        self.build(
            Method::POST,
            path,
            header_map,
            Some(payload.encode().into_bytes()),
        )
    }

    /// Sign a payload with the configured key
    pub fn generate_sign(&self, payload: &Payload) -> String {
        crypto::generate_sign(payload, &self.config.key)
    }

    /// Prepare a payment request
    ///
    /// `pay_type` is a [`PayType`](crate::types::PayType) or any raw `pay_type` code the gateway
    /// accepts. `cents` is the amount in minor currency units. `extra` fields are
    /// merged in last and override the standard ones. The returned request
    /// has not been sent; pick a destination with one of its `send*`
    /// methods, typically extracting `qrcode` and `syssn`.
    pub fn make_payment(
        &self,
        pay_type: impl AsRef<str>,
        out_trade_no: &str,
        goods_name: &str,
        cents: u64,
        extra: &HashMap<String, String>,
    ) -> Result<Request> {
        let pay_type = pay_type.as_ref();
        let payload = payment_payload(
            pay_type,
            out_trade_no,
            goods_name,
            cents,
            extra,
            Utc::now(),
        );
        tracing::debug!("Preparing pay_type {} payment for {}", pay_type, out_trade_no);
        self.signed_request(endpoints::PAYMENT, &payload)
    }

    /// Look up one or more past transactions by merchant order number
    ///
    /// No request is made when `out_trade_nos` is empty.
    pub async fn query<S: AsRef<str>>(&self, out_trade_nos: &[S]) -> Result<Vec<QueryRecord>> {
        if out_trade_nos.is_empty() {
            return Ok(Vec::new());
        }

        let joined = out_trade_nos
            .iter()
            .map(|out_trade_no| out_trade_no.as_ref())
            .collect::<Vec<_>>()
            .join(",");
        let payload = Payload::new().with("out_trade_no", joined);

        let mut records: Vec<QueryRecord> = Vec::new();
        self.signed_request(endpoints::QUERY, &payload)?
            .send_into(Extraction::new().sequence(&mut records, QUERY_RECORDS_PATH))
            .await?;
        Ok(records)
    }
}

/// Build the form payload for `/trade/v1/payment`
pub fn payment_payload(
    pay_type: &str,
    out_trade_no: &str,
    goods_name: &str,
    cents: u64,
    extra: &HashMap<String, String>,
    now: DateTime<Utc>,
) -> Payload {
    let mut payload = Payload::new()
        .with("txamt", cents.to_string())
        .with("txcurrcd", CURRENCY_HKD)
        .with("pay_type", pay_type)
        .with("out_trade_no", out_trade_no)
        .with("goods_name", goods_name)
        .with("txdtm", now.format(TIMESTAMP_FORMAT).to_string());
    payload.extend(extra.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    payload
}
