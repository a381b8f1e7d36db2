//! Output module for rendering crawl results
//!
//! This module turns the outcomes of the two CLI operations into printable
//! form: the certified profile list (text or JSON) and a page's extracted
//! metadata (pretty-printed JSON).

use crate::metadata::Page;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ProfileReport<'a> {
    profiles: &'a [String],
}

/// Renders the certified profile list as plain text, one URL per line.
pub fn render_profiles_text(profiles: &[String]) -> String {
    let mut out = String::from("Profiles:\n");
    for url in profiles {
        out.push_str(url);
        out.push('\n');
    }
    out
}

/// Renders the certified profile list as pretty-printed JSON.
pub fn render_profiles_json(profiles: &[String]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ProfileReport { profiles })
}

/// Renders a page's extracted metadata as pretty-printed JSON.
pub fn render_page_json(page: &Page) -> serde_json::Result<String> {
    serde_json::to_string_pretty(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_profiles_text() {
        let profiles = vec![
            "https://a.example/".to_string(),
            "https://b.example/me".to_string(),
        ];
        let text = render_profiles_text(&profiles);
        assert_eq!(text, "Profiles:\nhttps://a.example/\nhttps://b.example/me\n");
    }

    #[test]
    fn test_render_profiles_json() {
        let profiles = vec!["https://a.example/".to_string()];
        let json = render_profiles_json(&profiles).unwrap();
        assert!(json.contains("\"profiles\""));
        assert!(json.contains("https://a.example/"));
    }

    #[test]
    fn test_render_page_json_omits_empty_lang() {
        let mut page = Page::default();
        page.properties
            .insert("og:title".to_string(), "A title".to_string());

        let json = render_page_json(&page).unwrap();
        assert!(json.contains("og:title"));
        assert!(!json.contains("\"lang\""));
    }
}
