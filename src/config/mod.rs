//! Configuration module for relmap
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files. The library itself never reads a file or an environment variable;
//! constructors take these structs explicitly, and every field has a
//! documented default.
//!
//! # Example
//!
//! ```no_run
//! use relmap::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Redirect budget: {}", config.client.max_redirects);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    ClientConfig, Config, DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_MAX_REDIRECTS,
    DEFAULT_REQUEST_TIMEOUT_MS,
};

// Re-export parser functions
pub use parser::load_config;
