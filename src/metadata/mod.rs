//! Page metadata extraction
//!
//! This module turns an HTML document into structured metadata:
//! - [`read_page`] scans the document head for recognized `<meta>`
//!   properties (Dublin Core, Open Graph, Twitter Card) and the page title
//! - [`extract_rel_me`] scans the whole document for "rel=me" identity
//!   links
//!
//! Absence of metadata is success with empty results; only a failure of the
//! underlying byte stream is an error.
//!
//! # Example
//!
//! ```
//! use relmap::metadata::read_page;
//!
//! let html = r#"<!DOCTYPE html>
//! <html lang="en">
//! <head>
//!     <meta charset="utf-8"/>
//!     <meta property="og:title" content="Open Graph title" />
//! </head>
//! <body><p>This is a test page</p></body>
//! </html>"#;
//!
//! let page = read_page(html.as_bytes()).unwrap();
//! assert_eq!(page.title(), "Open Graph title");
//! ```

mod page;
mod relme;

pub use page::{read_page, Page, Properties};
pub use relme::extract_rel_me;
