use crate::MetadataError;
use scraper::{Html, Selector};
use std::io::Read;

/// Extracts "rel=me" identity links from an HTML document.
///
/// Scans the entire document (not just the head) for `<a>` and `<link>`
/// elements whose whitespace-split `rel` attribute contains the token `me`,
/// and collects their `href` values in document order. Duplicates are kept;
/// deduplication belongs to the crawler's visited set.
pub fn extract_rel_me(mut body: impl Read) -> Result<Vec<String>, MetadataError> {
    let mut bytes = Vec::new();
    body.read_to_end(&mut bytes)?;
    Ok(scan_rel_me(&String::from_utf8_lossy(&bytes)))
}

fn scan_rel_me(html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut urls = Vec::new();

    if let Ok(selector) = Selector::parse("a[rel][href], link[rel][href]") {
        for element in document.select(&selector) {
            let rel = element.value().attr("rel").unwrap_or("");
            if rel.split_whitespace().any(|token| token == "me") {
                if let Some(href) = element.value().attr("href") {
                    urls.push(href.to_string());
                }
            }
        }
    }

    urls
}
