//! HTTP transport for the reporting API
//!
//! [`Transport`] is the seam between API objects and the network: it takes a
//! [`Request`] (method, resource path, headers, JSON payload) and returns the
//! decoded JSON body. [`HttpTransport`] is the reqwest implementation; tests
//! substitute an in-memory transport.

use std::collections::BTreeMap;
use std::fmt;

use async_trait::async_trait;
use rsuite_config::ApiConfig;
use serde_json::Value;
use tracing::debug;

use crate::error::{ClientError, Result};

/// HTTP method of a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// One API call, relative to the company endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    /// Path below the company endpoint, e.g. `/reports`
    pub resource: String,
    /// Extra headers; names are stored lowercase
    pub headers: BTreeMap<String, String>,
    /// JSON body, sent for POST only
    pub payload: Option<Value>,
}

impl Request {
    pub fn get(resource: impl Into<String>) -> Self {
        Self {
            method: Method::Get,
            resource: resource.into(),
            headers: BTreeMap::new(),
            payload: None,
        }
    }

    pub fn post(resource: impl Into<String>, payload: Value) -> Self {
        Self {
            method: Method::Post,
            resource: resource.into(),
            headers: BTreeMap::new(),
            payload: Some(payload),
        }
    }

    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }
}

/// Executes requests against the reporting API
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the decoded JSON body
    async fn execute(&self, request: &Request) -> Result<Value>;
}

/// reqwest-backed transport with API key and bearer token authentication
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    config: ApiConfig,
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("endpoint", &self.config.endpoint)
            .field("company_id", &self.config.company_id)
            .finish()
    }
}

impl HttpTransport {
    /// Create a transport from API configuration
    ///
    /// # Errors
    ///
    /// Returns error if a credential is missing or the HTTP client cannot be
    /// built (e.g., TLS misconfiguration)
    pub fn new(config: &ApiConfig) -> Result<Self> {
        config.validate_credentials()?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("rsuite/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout())
            .build()
            .map_err(|e| ClientError::Init(format!("HTTP client: {}", e)))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    /// Full URL of a resource
    pub fn url(&self, resource: &str) -> String {
        build_url(&self.config.endpoint, &self.config.company_id, resource)
    }

    fn auth_headers(&self) -> [(&'static str, String); 3] {
        [
            ("x-api-key", self.config.api_key.clone()),
            ("x-proxy-global-company-id", self.config.company_id.clone()),
            ("authorization", format!("Bearer {}", self.config.token)),
        ]
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &Request) -> Result<Value> {
        let url = self.url(&request.resource);
        let headers = merge_headers(&request.headers, self.auth_headers());

        let mut builder = self.client.request(request.method.into(), &url);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if request.method == Method::Post
            && let Some(payload) = &request.payload
        {
            builder = builder.json(payload);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        debug!(
            method = %request.method,
            resource = %request.resource,
            status,
            bytes = body.len(),
            "api request"
        );

        interpret_response(status, &body)
    }
}

/// `endpoint + company_id + resource`
pub(crate) fn build_url(endpoint: &str, company_id: &str, resource: &str) -> String {
    format!("{}{}{}", endpoint, company_id, resource)
}

/// Request headers first, then authentication headers on top
pub(crate) fn merge_headers<I>(
    request_headers: &BTreeMap<String, String>,
    auth: I,
) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = (&'static str, String)>,
{
    let mut headers = request_headers.clone();
    headers.extend(auth.into_iter().map(|(k, v)| (k.to_string(), v)));
    headers
}

/// Decode a response body, surfacing API error documents
pub(crate) fn interpret_response(status: u16, body: &str) -> Result<Value> {
    let value: Value = serde_json::from_str(body).map_err(|_| {
        ClientError::unexpected(format!(
            "HTTP {} with a non-JSON body ({} bytes)",
            status,
            body.len()
        ))
    })?;

    if let Some(code) = value.get("errorCode") {
        return Err(ClientError::Api {
            status,
            code: json_text(code),
            message: value
                .get("errorDescription")
                .map(json_text)
                .unwrap_or_default(),
            error_id: value.get("errorId").map(json_text),
        });
    }

    if !(200..300).contains(&status) {
        return Err(ClientError::unexpected(format!(
            "HTTP {} without an error document",
            status
        )));
    }

    Ok(value)
}

fn json_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "transport_test.rs"]
mod transport_test;
