//! Relmap: a rel=me identity web mapper
//!
//! This crate discovers cross-referenced identity/profile pages by crawling
//! outward from a seed URL, extracting page metadata (Open Graph, Dublin
//! Core, Twitter Card) and "rel=me" link relations along the way.

pub mod client;
pub mod config;
pub mod crawler;
pub mod metadata;
pub mod output;

use thiserror::Error;

/// Main error type for relmap operations
#[derive(Debug, Error)]
pub enum RelmapError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Errors surfaced by the redirect-resolving client's strict fetch path.
///
/// The lenient [`client::Client::follow_redirect`] variant absorbs all of
/// these and degrades to returning the best-known URL instead.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connection, timeout, or other transport-level failure.
    #[error("network failure for {url}: {message}")]
    Network { url: String, message: String },

    /// A redirect status carried a missing or unparseable Location header.
    #[error("invalid redirect from {url}: {message}")]
    InvalidRedirect { url: String, message: String },

    /// The redirect budget was exhausted without reaching a 200.
    #[error("redirect limit of {limit} exceeded starting from {url}")]
    RedirectLimitExceeded { url: String, limit: u32 },

    /// A terminal status that is neither success nor redirect.
    #[error("unexpected response code {status} for {url}")]
    UnexpectedStatus { url: String, status: u16 },
}

/// Errors surfaced by the metadata extractors.
///
/// Absence of metadata is never an error; only a genuine failure of the
/// underlying byte stream is.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("failed to read document stream: {0}")]
    Read(#[from] std::io::Error),
}

/// Error returned by a [`client::Transport`] implementation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct TransportError {
    pub message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Result type alias for relmap operations
pub type Result<T> = std::result::Result<T, RelmapError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use client::{Client, FetchResult};
pub use config::ClientConfig;
pub use crawler::{CrawlContext, Crawler, Processor, ProfileProcessor};
pub use metadata::{extract_rel_me, read_page, Page, Properties};
