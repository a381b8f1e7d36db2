use serde::Deserialize;
use std::time::Duration;

/// Default redirect budget (maximum number of 3xx hops followed).
pub const DEFAULT_MAX_REDIRECTS: u32 = 7;

/// Default connect + TLS handshake timeout in milliseconds.
pub const DEFAULT_CONNECT_TIMEOUT_MS: u64 = 5_000;

/// Default overall request timeout in milliseconds.
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 15_000;

/// Main configuration structure for relmap
///
/// Every field has a default, so an empty file (or no file at all) yields a
/// working configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub client: ClientConfig,
}

/// HTTP client behavior configuration
///
/// Passed explicitly into [`crate::client::Client`] constructors; no global
/// or implicit state is consulted.
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    /// Maximum number of redirects followed before giving up
    #[serde(rename = "max-redirects", default = "default_max_redirects")]
    pub max_redirects: u32,

    /// Connect + TLS handshake timeout (milliseconds)
    #[serde(rename = "connect-timeout-ms", default = "default_connect_timeout")]
    pub connect_timeout_ms: u64,

    /// Overall per-request timeout (milliseconds)
    #[serde(rename = "request-timeout-ms", default = "default_request_timeout")]
    pub request_timeout_ms: u64,

    /// User agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl ClientConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            max_redirects: default_max_redirects(),
            connect_timeout_ms: default_connect_timeout(),
            request_timeout_ms: default_request_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_max_redirects() -> u32 {
    DEFAULT_MAX_REDIRECTS
}

fn default_connect_timeout() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_MS
}

fn default_request_timeout() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_MS
}

fn default_user_agent() -> String {
    format!("relmap/{}", env!("CARGO_PKG_VERSION"))
}
