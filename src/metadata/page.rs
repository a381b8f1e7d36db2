use crate::MetadataError;
use scraper::{Html, Selector};
use serde::Serialize;
use std::collections::HashMap;
use std::io::Read;

/// Recognized metadata property names. A `<meta>` element whose name is not
/// on this list never reaches [`Page::properties`].
const KNOWN_PROPERTIES: &[&str] = &[
    // Dublin Core (HTML 5)
    "dc:title",
    "dc:creator",
    // Open Graph
    "og:title",
    "og:type",
    "og:url",
    "og:image",
    "og:description",
    "og:site_name",
    // Twitter
    "twitter:card",
    "twitter:site",
    "twitter:title",
    "twitter:image",
    "twitter:description",
    // Extra real world usage
    "description",
];

/// Mapping of HTML page metadata properties to their values.
pub type Properties = HashMap<String, String>;

/// Extracted metadata of one HTML document. Built once by [`read_page`] and
/// immutable afterwards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Page {
    /// Document language from the root `lang` attribute, possibly empty
    #[serde(skip_serializing_if = "String::is_empty")]
    pub lang: String,

    /// Recognized properties plus the synthetic `"title"` key
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub properties: Properties,
}

impl Page {
    /// Returns the page title based on defined priorities
    /// (dc > og > twitter > html title).
    ///
    /// Returns the empty string when no title of any kind is present; that
    /// is not an error condition.
    pub fn title(&self) -> &str {
        for name in ["dc:title", "og:title", "twitter:title", "title"] {
            if let Some(value) = self.properties.get(name) {
                if !value.is_empty() {
                    return value;
                }
            }
        }
        ""
    }
}

/// Extracts metadata from an HTML page.
///
/// Scans `<meta>` elements in the document head in document order. The
/// property name comes from the `property` attribute, falling back to the
/// `name` attribute (Twitter incorrectly uses `name` to hold metadata; see
/// https://www.ctrl.blog/entry/rdfa-socialmedia-metadata). The value comes
/// from the `content` attribute. When the same property appears twice in
/// the head, the last occurrence wins; [`Page::title`] resolves priority
/// between property kinds at read time. Elements outside the head
/// contribute nothing.
///
/// # Errors
///
/// Only a failure of the byte stream itself; malformed HTML and absent
/// metadata are not errors.
pub fn read_page(mut body: impl Read) -> Result<Page, MetadataError> {
    let mut bytes = Vec::new();
    body.read_to_end(&mut bytes)?;
    Ok(parse_page(&String::from_utf8_lossy(&bytes)))
}

fn parse_page(html: &str) -> Page {
    let document = Html::parse_document(html);
    let mut page = Page::default();

    if let Ok(selector) = Selector::parse("html") {
        if let Some(root) = document.select(&selector).next() {
            if let Some(lang) = root.value().attr("lang") {
                page.lang = lang.to_string();
            }
        }
    }

    if let Ok(selector) = Selector::parse("head meta") {
        for element in document.select(&selector) {
            let property = element
                .value()
                .attr("property")
                .filter(|value| !value.is_empty())
                .or_else(|| element.value().attr("name"));

            if let Some(property) = property {
                if KNOWN_PROPERTIES.contains(&property) {
                    let content = element.value().attr("content").unwrap_or("");
                    page.properties
                        .insert(property.to_string(), content.to_string());
                }
            }
        }
    }

    if let Ok(selector) = Selector::parse("head > title") {
        for element in document.select(&selector) {
            let text: String = element.text().collect();
            if !text.is_empty() {
                page.properties.insert("title".to_string(), text);
            }
        }
    }

    page
}
