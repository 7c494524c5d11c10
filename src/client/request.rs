//! Outbound requests and response dispatch

use crate::extract::Extraction;
use crate::types::{ClientConfig, GatewayError};
use crate::{QfPayError, Result};
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderName, HeaderValue, Method};
use serde::de::DeserializeOwned;
use std::fmt::Write as _;
use std::sync::Arc;
use url::Url;

/// A prepared request bound to the client that built it
///
/// Created by [`QfPayClient`](super::QfPayClient); consumed by one of the
/// `send*` methods, each of which performs exactly one HTTP exchange, checks
/// the gateway envelope, and only then writes to the destination it was
/// given.
pub struct Request {
    inner: reqwest::Request,
    http: reqwest::Client,
    config: Arc<ClientConfig>,
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("method", self.inner.method())
            .field("url", &self.inner.url().as_str())
            .field("headers", self.inner.headers())
            .finish()
    }
}

impl Request {
    pub(crate) fn new(
        inner: reqwest::Request,
        http: reqwest::Client,
        config: Arc<ClientConfig>,
    ) -> Self {
        Self {
            inner,
            http,
            config,
        }
    }

    /// HTTP method
    pub fn method(&self) -> &Method {
        self.inner.method()
    }

    /// Full request URL
    pub fn url(&self) -> &Url {
        self.inner.url()
    }

    /// Request headers
    pub fn headers(&self) -> &HeaderMap {
        self.inner.headers()
    }

    /// Request body, if it is held in memory
    pub fn body(&self) -> Option<&[u8]> {
        self.inner.body().and_then(|body| body.as_bytes())
    }

    /// Set or replace a header
    pub fn set_header(&mut self, name: &str, value: &str) -> Result<()> {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
            QfPayError::invalid_request(format!("invalid header name {}: {}", name, e))
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            QfPayError::invalid_request(format!("invalid value for {}: {}", name, e))
        })?;
        self.inner.headers_mut().insert(name, value);
        Ok(())
    }

    /// Perform the call and only check the gateway envelope
    pub async fn send(self) -> Result<()> {
        self.execute().await.map(|_| ())
    }

    /// Perform the call and return the response body verbatim
    pub async fn send_raw(self) -> Result<Vec<u8>> {
        self.execute().await
    }

    /// Perform the call and decode the whole body as `T`
    pub async fn send_json<T: DeserializeOwned>(self) -> Result<T> {
        let body = self.execute().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    /// Perform the call and decode the whole body into `dest`
    ///
    /// `dest` is left untouched on any error.
    pub async fn send_json_into<T: DeserializeOwned>(self, dest: &mut T) -> Result<()> {
        *dest = self.send_json().await?;
        Ok(())
    }

    /// Perform the call and fill each (destination, path) pair
    ///
    /// Pairs are filled in order with best-effort semantics; see
    /// [`crate::extract`]. On a transport or gateway error no destination is
    /// touched.
    pub async fn send_into(self, extraction: Extraction<'_>) -> Result<()> {
        let body = self.execute().await?;
        extraction.apply(&body);
        Ok(())
    }

    async fn execute(self) -> Result<Vec<u8>> {
        let debug = self.config.debug;
        if debug {
            tracing::info!("{}", dump_request(&self.inner));
        }

        tracing::debug!("Sending {} {}", self.inner.method(), self.inner.url());

        let response = self.http.execute(self.inner).await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        if debug {
            let is_json = headers
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(|value| value.contains("json"))
                .unwrap_or(false);
            tracing::info!(
                "{}",
                dump_response(status, &headers, is_json.then_some(body.as_slice()))
            );
        }

        GatewayError::from_body(&body).into_result()?;
        Ok(body)
    }
}

fn write_headers(out: &mut String, headers: &HeaderMap) {
    for (name, value) in headers {
        let _ = writeln!(
            out,
            "{}: {}",
            name,
            String::from_utf8_lossy(value.as_bytes())
        );
    }
}

fn dump_request(request: &reqwest::Request) -> String {
    let url = request.url();
    let mut target = url.path().to_string();
    if let Some(query) = url.query() {
        target.push('?');
        target.push_str(query);
    }

    let mut out = String::new();
    let _ = writeln!(out, "{} {} HTTP/1.1", request.method(), target);
    if let Some(host) = url.host_str() {
        match url.port() {
            Some(port) => {
                let _ = writeln!(out, "Host: {}:{}", host, port);
            }
            None => {
                let _ = writeln!(out, "Host: {}", host);
            }
        }
    }
    write_headers(&mut out, request.headers());

    if let Some(body) = request.body().and_then(|body| body.as_bytes()) {
        let _ = writeln!(out, "Content-Length: {}", body.len());
        out.push('\n');
        out.push_str(&String::from_utf8_lossy(body));
    }
    out
}

fn dump_response(status: reqwest::StatusCode, headers: &HeaderMap, body: Option<&[u8]>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "HTTP/1.1 {}", status);
    write_headers(&mut out, headers);
    if let Some(body) = body {
        out.push('\n');
        out.push_str(&String::from_utf8_lossy(body));
    }
    out
}
