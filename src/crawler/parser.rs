//! HTML parser for extracting anchors and the page title
//!
//! Links are returned exactly as written in the `href` attribute (trimmed).
//! Resolution and filtering happen in the link classifier so that the
//! classification rules can look at the raw link text.

use scraper::{Html, Selector};

/// Extracted information from an HTML page
#[derive(Debug, Clone)]
pub struct ParsedPage {
    /// The page title (from <title> tag)
    pub title: Option<String>,

    /// Raw href values of every `<a href>` on the page, in document order
    pub hrefs: Vec<String>,
}

/// Parses HTML content and extracts anchors and the title
///
/// html5ever recovers from malformed markup, so parsing never fails; a
/// broken page simply yields whatever anchors survived recovery.
///
/// # Example
///
/// ```
/// use site_harvest::crawler::parse_html;
///
/// let html = r#"<html><head><title>Test</title></head><body><a href="/page">Link</a></body></html>"#;
/// let parsed = parse_html(html);
/// assert_eq!(parsed.title, Some("Test".to_string()));
/// assert_eq!(parsed.hrefs, vec!["/page".to_string()]);
/// ```
pub fn parse_html(html: &str) -> ParsedPage {
    let document = Html::parse_document(html);

    ParsedPage {
        title: extract_title(&document),
        hrefs: extract_hrefs(&document),
    }
}

/// Extracts the page title from the HTML document
pub(crate) fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Extracts every non-empty anchor href
fn extract_hrefs(document: &Html) -> Vec<String> {
    let Ok(a_selector) = Selector::parse("a[href]") else {
        return Vec::new();
    };

    document
        .select(&a_selector)
        .filter_map(|element| element.value().attr("href"))
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(str::to_string)
        .collect()
}
