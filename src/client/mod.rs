//! Redirect-resolving HTTP client
//!
//! This module produces the body of the final resource reachable from a
//! starting URL, following HTTP redirects manually up to a fixed budget:
//! - Strict fetching via [`Client::get`] with a full error taxonomy
//! - Lenient URL canonicalization via [`Client::follow_redirect`]
//! - Relative reference resolution for links found on fetched pages

pub(crate) mod transport;

pub use transport::{HttpTransport, Request, Response, Transport};

use crate::config::ClientConfig;
use crate::FetchError;
use std::sync::Arc;
use url::Url;

/// The outcome of a successful fetch: the final resolved URL and the body
/// of the resource found there.
#[derive(Debug)]
pub struct FetchResult {
    /// URL of the attempt that returned 200, after any redirects
    pub final_url: String,

    /// Response body
    pub body: Vec<u8>,
}

impl FetchResult {
    /// Returns the body as a readable byte stream.
    pub fn reader(&self) -> std::io::Cursor<&[u8]> {
        std::io::Cursor::new(self.body.as_slice())
    }
}

/// HTTP client with explicit timeout configuration and manual redirect
/// handling.
///
/// Cloning is cheap; clones share the underlying transport.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
}

impl Client {
    /// Creates a client with default configuration (redirect budget 7,
    /// connect timeout 5s, request timeout 15s) over a real HTTP transport.
    pub fn new() -> crate::Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client with the given configuration over a real HTTP
    /// transport.
    pub fn with_config(config: ClientConfig) -> crate::Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Creates a client over an injected transport. This is the seam tests
    /// use to substitute canned responses.
    pub fn with_transport(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        Self { transport, config }
    }

    /// Fetches a URL, following up to `max_redirects` redirect responses.
    ///
    /// Each redirect hop issues one GET. A 200 ends the loop with the body
    /// and the URL used for that attempt; a 3xx resolves the `Location`
    /// header against the current URL and continues; anything else fails.
    ///
    /// # Errors
    ///
    /// * [`FetchError::Network`] - transport-level failure; no retry
    /// * [`FetchError::InvalidRedirect`] - missing or unparseable Location
    /// * [`FetchError::UnexpectedStatus`] - terminal non-2xx, non-3xx status
    /// * [`FetchError::RedirectLimitExceeded`] - budget exhausted
    pub async fn get(&self, url: &str) -> Result<FetchResult, FetchError> {
        let mut current = url.to_string();

        for _ in 0..=self.config.max_redirects {
            let response = self
                .transport
                .send(Request::get(&current))
                .await
                .map_err(|e| FetchError::Network {
                    url: current.clone(),
                    message: e.to_string(),
                })?;

            match response.status {
                200 => {
                    return Ok(FetchResult {
                        final_url: current,
                        body: response.body,
                    });
                }
                300..=399 => {
                    let location = response.location().unwrap_or_default().to_string();
                    let next = redirect_target(&current, &location)?;
                    tracing::debug!("redirect {} -> {}", current, next);
                    current = next;
                }
                status => {
                    return Err(FetchError::UnexpectedStatus {
                        url: current,
                        status,
                    });
                }
            }
        }

        Err(FetchError::RedirectLimitExceeded {
            url: url.to_string(),
            limit: self.config.max_redirects,
        })
    }

    /// Follows redirects from a URL and returns the final URL, never
    /// failing.
    ///
    /// On any failure (network error, invalid Location, non-2xx terminal
    /// status) this returns the last URL it successfully reasoned about, or
    /// the input URL if nothing succeeded. Profile discovery uses this to
    /// canonicalize candidate identity links: an unreachable candidate is
    /// "no opinion", not an error.
    pub async fn follow_redirect(&self, url: &str) -> String {
        let mut current = url.to_string();

        for _ in 0..=self.config.max_redirects {
            let response = match self.transport.send(Request::get(&current)).await {
                Ok(response) => response,
                Err(e) => {
                    tracing::debug!("follow_redirect: {} unreachable: {}", current, e);
                    return current;
                }
            };

            match response.status {
                200 => return current,
                300..=399 => {
                    let location = response.location().unwrap_or_default().to_string();
                    match redirect_target(&current, &location) {
                        Ok(next) => current = next,
                        Err(e) => {
                            tracing::debug!("follow_redirect: stopping at {}: {}", current, e);
                            return current;
                        }
                    }
                }
                status => {
                    tracing::debug!("follow_redirect: ignored status {} at {}", status, current);
                    return current;
                }
            }
        }

        current
    }

    /// Resolves an href found on a page against that page's URL.
    ///
    /// Returns `None` when either part fails to parse. An absolute href
    /// resolves to itself.
    pub fn resolve_reference(&self, base: &str, href: &str) -> Option<String> {
        let base = Url::parse(base).ok()?;
        base.join(href).ok().map(|u| u.to_string())
    }

    /// Returns the configured redirect budget.
    pub fn max_redirects(&self) -> u32 {
        self.config.max_redirects
    }
}

/// Resolves a `Location` header against the URL that produced it.
///
/// An absolute Location replaces the current URL outright; a Location with
/// neither host nor scheme is taken as a reference on the current URL's
/// host and scheme.
fn redirect_target(current: &str, location: &str) -> Result<String, FetchError> {
    if location.is_empty() {
        return Err(FetchError::InvalidRedirect {
            url: current.to_string(),
            message: "missing Location header".to_string(),
        });
    }

    match Url::parse(location) {
        Ok(absolute) => Ok(absolute.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let base = Url::parse(current).map_err(|e| FetchError::InvalidRedirect {
                url: current.to_string(),
                message: e.to_string(),
            })?;
            base.join(location)
                .map(|u| u.to_string())
                .map_err(|e| FetchError::InvalidRedirect {
                    url: current.to_string(),
                    message: e.to_string(),
                })
        }
        Err(e) => Err(FetchError::InvalidRedirect {
            url: current.to_string(),
            message: e.to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::transport::testing::{
        page_response, redirect_response, status_response, StaticTransport,
    };
    use super::*;

    fn test_client(transport: StaticTransport) -> (Client, Arc<StaticTransport>) {
        let transport = Arc::new(transport);
        let client = Client::with_transport(transport.clone(), ClientConfig::default());
        (client, transport)
    }

    #[test]
    fn test_redirect_target_absolute_location() {
        let target = redirect_target("https://t.co/abc", "https://example.org/profile").unwrap();
        assert_eq!(target, "https://example.org/profile");
    }

    #[test]
    fn test_redirect_target_relative_location_keeps_host_and_scheme() {
        let target = redirect_target("https://donate.mozilla.org/", "/en-US/index.html").unwrap();
        assert_eq!(target, "https://donate.mozilla.org/en-US/index.html");
    }

    #[test]
    fn test_redirect_target_missing_location() {
        let result = redirect_target("https://example.org/", "");
        assert!(matches!(result, Err(FetchError::InvalidRedirect { .. })));
    }

    #[tokio::test]
    async fn test_get_success() {
        let html = "<html><head><title>Home</title></head><body></body></html>";
        let (client, _) =
            test_client(StaticTransport::new().on_get("https://example.org/", page_response(html)));

        let fetch = client.get("https://example.org/").await.unwrap();
        assert_eq!(fetch.final_url, "https://example.org/");
        assert_eq!(fetch.body, html.as_bytes());
    }

    #[tokio::test]
    async fn test_get_follows_redirect_chain() {
        let (client, transport) = test_client(
            StaticTransport::new()
                .on_get("https://a.example/", redirect_response("https://b.example/"))
                .on_get("https://b.example/", redirect_response("/landing"))
                .on_get("https://b.example/landing", page_response("<html></html>")),
        );

        let fetch = client.get("https://a.example/").await.unwrap();
        assert_eq!(fetch.final_url, "https://b.example/landing");
        assert_eq!(transport.total_requests(), 3);
    }

    #[tokio::test]
    async fn test_get_redirect_limit_exceeded() {
        let (client, transport) = test_client(
            StaticTransport::new()
                .on_get("https://loop.example/", redirect_response("https://loop.example/")),
        );

        let result = client.get("https://loop.example/").await;
        assert!(matches!(
            result,
            Err(FetchError::RedirectLimitExceeded { limit: 7, .. })
        ));
        // Budget of 7 means 8 attempts before giving up.
        assert_eq!(transport.request_count("https://loop.example/"), 8);
    }

    #[tokio::test]
    async fn test_get_unexpected_status() {
        let (client, _) = test_client(
            StaticTransport::new().on_get("https://example.org/gone", status_response(404)),
        );

        let result = client.get("https://example.org/gone").await;
        assert!(matches!(
            result,
            Err(FetchError::UnexpectedStatus { status: 404, .. })
        ));
    }

    #[tokio::test]
    async fn test_get_network_failure() {
        let (client, _) = test_client(
            StaticTransport::new().fail_get("https://down.example/", "connection refused"),
        );

        let result = client.get("https://down.example/").await;
        assert!(matches!(result, Err(FetchError::Network { .. })));
    }

    #[tokio::test]
    async fn test_get_redirect_without_location() {
        let (client, _) = test_client(
            StaticTransport::new().on_get("https://example.org/", status_response(302)),
        );

        let result = client.get("https://example.org/").await;
        assert!(matches!(result, Err(FetchError::InvalidRedirect { .. })));
    }

    #[tokio::test]
    async fn test_follow_redirect_resolves_chain() {
        let (client, _) = test_client(
            StaticTransport::new()
                .on_get("https://t.co/short", redirect_response("https://example.org/me"))
                .on_get("https://example.org/me", page_response("<html></html>")),
        );

        let url = client.follow_redirect("https://t.co/short").await;
        assert_eq!(url, "https://example.org/me");
    }

    #[tokio::test]
    async fn test_follow_redirect_unreachable_returns_input() {
        let (client, _) = test_client(StaticTransport::new());

        let url = client.follow_redirect("https://unknown.example/").await;
        assert_eq!(url, "https://unknown.example/");
    }

    #[tokio::test]
    async fn test_follow_redirect_keeps_last_reachable_url() {
        // The hop is reasoned about even though its target never answers.
        let (client, _) = test_client(
            StaticTransport::new()
                .on_get("https://t.co/short", redirect_response("https://dead.example/")),
        );

        let url = client.follow_redirect("https://t.co/short").await;
        assert_eq!(url, "https://dead.example/");
    }

    #[tokio::test]
    async fn test_follow_redirect_error_status_returns_current() {
        let (client, _) = test_client(
            StaticTransport::new().on_get("https://example.org/", status_response(500)),
        );

        let url = client.follow_redirect("https://example.org/").await;
        assert_eq!(url, "https://example.org/");
    }

    #[test]
    fn test_resolve_reference() {
        let (client, _) = test_client(StaticTransport::new());

        assert_eq!(
            client.resolve_reference("https://example.org/profile", "/about"),
            Some("https://example.org/about".to_string())
        );
        assert_eq!(
            client.resolve_reference("https://example.org/profile", "https://other.example/"),
            Some("https://other.example/".to_string())
        );
        assert_eq!(client.resolve_reference("not a url", "/about"), None);
    }
}
