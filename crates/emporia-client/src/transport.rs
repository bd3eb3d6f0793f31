//! Transport abstraction and the reqwest-backed implementation.
//!
//! [`Transport`] carries one logical request: no retry policy, no backoff,
//! no circuit breaking, no request deduplication, no caching. Every call is
//! fire-once; the surrounding system does not need more at its scale.
//!
//! [`HttpTransport`] normalizes every failure into the workspace error
//! taxonomy: transport failures (no response), server-reported failures
//! (non-2xx with a message extracted from the body when present), and
//! decode failures (a body that is not valid JSON).

use async_trait::async_trait;
use emporia_core::{Error, Result};
use serde_json::Value;
use std::time::Duration;

/// HTTP method of an [`ApiRequest`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    /// GET.
    Get,
    /// POST.
    Post,
    /// PUT.
    Put,
    /// DELETE.
    Delete,
}

/// One logical request against the admin API.
#[derive(Clone, Debug)]
pub struct ApiRequest {
    /// HTTP method.
    pub method: Method,
    /// Path below the API base URL, e.g. `/orders/o1/status`.
    pub path: String,
    /// Query-string pairs.
    pub query: Vec<(String, String)>,
    /// JSON body, for POST/PUT.
    pub body: Option<Value>,
    /// Bearer token to attach, when a session token is stored.
    pub bearer: Option<String>,
}

impl ApiRequest {
    /// Create a request with no query, body, or bearer token.
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    /// Attach query-string pairs.
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Attach a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach a bearer token.
    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }
}

/// Issues one logical request and returns the decoded JSON body.
///
/// Implemented by [`HttpTransport`] for production and by
/// [`StubTransport`](crate::testing::StubTransport) in tests.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute the request. A bodyless success (e.g. DELETE) resolves to
    /// `Value::Null`.
    async fn execute(&self, request: ApiRequest) -> Result<Value>;
}

/// Reqwest-backed transport.
pub struct HttpTransport {
    base_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a transport against the given API base URL.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::transport(format!("client init: {e}")))?;
        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<Value> {
        let url = format!("{}{}", self.base_url, request.path);
        log::debug!("{:?} {}", request.method, url);

        let mut builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
            Method::Put => self.client.put(&url),
            Method::Delete => self.client.delete(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| Error::transport(e.to_string()))?;

        if !status.is_success() {
            let message = extract_message(&text)
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());
            log::warn!("{url} -> {status}: {message}");
            return Err(status_error(status.as_u16(), message));
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| Error::decode(format!("response body: {e}")))
    }
}

/// Classify a non-2xx status: authentication rejections get their own
/// variant so session teardown can recognize them, everything else is a
/// server-reported failure.
fn status_error(status: u16, message: String) -> Error {
    if status == 401 {
        Error::auth(message)
    } else {
        Error::api(status, message)
    }
}

/// Pull a human-readable message out of an error body, when the server
/// shipped one under the conventional `message` or `error` keys.
fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
