//! Transport seam for the redirect-resolving client
//!
//! The client never talks to the network directly; it goes through the
//! [`Transport`] capability so tests can substitute canned responses keyed
//! by method and URL. [`HttpTransport`] is the reqwest-backed default.

use crate::config::ClientConfig;
use crate::TransportError;
use async_trait::async_trait;
use reqwest::redirect::Policy;
use std::collections::HashMap;

/// An outbound HTTP request. The crawler only ever issues bodyless GETs.
#[derive(Debug, Clone)]
pub struct Request {
    pub method: String,
    pub url: String,
}

impl Request {
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            method: "GET".to_string(),
            url: url.into(),
        }
    }
}

/// A buffered HTTP response: status line, headers, and full body.
///
/// Header names are stored lowercased.
#[derive(Debug, Clone, Default)]
pub struct Response {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    /// Returns a response header value, matching the name case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(|v| v.as_str())
    }

    /// Returns the `Location` header, if any.
    pub fn location(&self) -> Option<&str> {
        self.header("location")
    }
}

/// Capability for performing one HTTP exchange: given a request, return a
/// response or an error. Implementations must not follow redirects
/// themselves; the client owns the redirect loop.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}

/// The reqwest-backed transport used outside of tests.
pub struct HttpTransport {
    inner: reqwest::Client,
}

impl HttpTransport {
    /// Builds a transport from explicit client configuration.
    ///
    /// Automatic redirect following is disabled so redirect responses are
    /// returned to the caller as-is.
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let inner = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout())
            .connect_timeout(config.connect_timeout())
            .redirect(Policy::none())
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self { inner })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| TransportError::new(format!("invalid method {}: {}", request.method, e)))?;

        let response = self
            .inner
            .request(method, &request.url)
            .send()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?;

        let status = response.status().as_u16();
        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.as_str().to_ascii_lowercase(), value.to_string());
            }
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::new(e.to_string()))?
            .to_vec();

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}
