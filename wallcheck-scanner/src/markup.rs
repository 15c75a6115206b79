// Bootstrap data extraction from embed pages

use crate::error::{ProbeError, Result};
use scraper::{Html, Selector};
use serde_json::Value;
use std::sync::LazyLock;

static BOOTSTRAP_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("noscript[data-bootstrap]").expect("static selector"));

const BOOTSTRAP_ATTR: &str = "data-bootstrap";

/// Pull the JSON blob out of the page's `<noscript data-bootstrap>` element.
///
/// The result is returned as-is: its schema changes with the response mode,
/// so callers probe for the paths they need.
pub fn extract(markup: &str) -> Result<Value> {
    let document = Html::parse_document(markup);

    let raw = document
        .select(&BOOTSTRAP_SELECTOR)
        .next()
        .and_then(|element| element.value().attr(BOOTSTRAP_ATTR))
        .ok_or(ProbeError::BootstrapMissing)?;

    serde_json::from_str(raw.trim()).map_err(|e| ProbeError::BootstrapParse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page_with_bootstrap(attr: &str) -> String {
        format!(
            "<!doctype html><html><head><title>Post</title></head><body>\
             <div id=\"post\"></div>\
             <noscript data-bootstrap=\"{}\"></noscript>\
             </body></html>",
            attr
        )
    }

    fn escape_attr(s: &str) -> String {
        s.replace('&', "&amp;").replace('"', "&quot;")
    }

    #[test]
    fn test_extract_returns_parsed_payload() {
        let payload = json!({
            "Components": {
                "EmbeddablePost": {
                    "posts_data": [{ "blog": { "name": "example" }, "slug": "some-slug" }]
                }
            },
            "Flags": { "count": 3, "enabled": true, "ratio": 0.5, "none": null }
        });
        let page = page_with_bootstrap(&escape_attr(&payload.to_string()));

        assert_eq!(extract(&page).unwrap(), payload);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let page = page_with_bootstrap("\n   {&quot;Components&quot;: {}}   \n");
        assert_eq!(extract(&page).unwrap(), json!({ "Components": {} }));
    }

    #[test]
    fn test_missing_element_is_bootstrap_missing() {
        let page = "<html><body><noscript>enable js</noscript><script data-bootstrap=\"{}\"></script></body></html>";
        assert!(matches!(extract(page), Err(ProbeError::BootstrapMissing)));
    }

    #[test]
    fn test_invalid_json_is_bootstrap_parse_error() {
        let page = page_with_bootstrap("{not json");
        assert!(matches!(extract(&page), Err(ProbeError::BootstrapParse(_))));
    }

    #[test]
    fn test_empty_attribute_is_bootstrap_parse_error() {
        let page = page_with_bootstrap("   ");
        assert!(matches!(extract(&page), Err(ProbeError::BootstrapParse(_))));
    }
}
