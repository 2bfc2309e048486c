//! HTML cleaning and text digests
//!
//! This module turns a raw HTML document into the two textual views the price
//! extractor reads:
//! - the cleaned markup (scripts, styles and noscript blocks removed)
//! - a text digest with one line per visible text block

use scraper::{Html, Selector};

/// Elements whose content never renders as page text
const HIDDEN_ELEMENTS: &str = "script, style, noscript, template";

/// Textual views of a parsed page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// Markup with non-rendered elements removed
    pub html: String,

    /// Visible text, one trimmed line per text block
    pub text: String,

    /// Whether the readiness selector matched a non-empty element
    pub ready: bool,
}

/// Parses and cleans an HTML document
///
/// # Arguments
///
/// * `html` - The raw HTML content
/// * `ready_selector` - Optional CSS selector that must match an element with
///   content for the page to count as rendered
///
/// # Example
///
/// ```
/// use price_scout::crawler::parse_page;
///
/// let html = r#"<html><body><script>var p = 1;</script><p>Price: ₹999</p></body></html>"#;
/// let page = parse_page(html, Some("body"));
/// assert!(page.ready);
/// assert_eq!(page.text, "Price: ₹999");
/// assert!(!page.html.contains("var p"));
/// ```
pub fn parse_page(html: &str, ready_selector: Option<&str>) -> ParsedPage {
    let mut document = Html::parse_document(html);

    strip_hidden_elements(&mut document);

    let ready = match ready_selector.filter(|s| !s.is_empty()) {
        Some(selector) => is_ready(&document, selector),
        None => true,
    };

    ParsedPage {
        html: document.root_element().html(),
        text: text_digest(&document),
        ready,
    }
}

/// Detaches every non-rendered element from the tree
fn strip_hidden_elements(document: &mut Html) {
    let Ok(selector) = Selector::parse(HIDDEN_ELEMENTS) else {
        return;
    };

    let ids: Vec<_> = document.select(&selector).map(|el| el.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Checks that the selector matches at least one element with content
fn is_ready(document: &Html, selector: &str) -> bool {
    let Ok(selector) = Selector::parse(selector) else {
        return false;
    };

    document
        .select(&selector)
        .any(|el| el.has_children())
}

/// Collects visible text from the body, one trimmed block per line
fn text_digest(document: &Html) -> String {
    let Ok(body) = Selector::parse("body") else {
        return String::new();
    };

    document
        .select(&body)
        .flat_map(|el| el.text())
        .map(|t| t.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
