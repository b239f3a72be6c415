//! Readable-text extraction from a single page
//!
//! The page is fetched, boilerplate elements are dropped, the main content
//! region is picked and rendered to text with html2text.

use crate::crawler::{extract_title, fetch_page, FetchedPage};
use crate::FetchError;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};

/// Elements removed before the content region is rendered
const STRIPPED_SELECTOR: &str = "script, style, iframe, nav, footer, img";

/// Content region candidates, in priority order
const CONTENT_SELECTORS: &[&str] = &["main", "article", ".content", ".main", "#content", "#main"];

/// Line width handed to html2text
const TEXT_WIDTH: usize = 80;

/// Title used when a page has none
const NO_TITLE: &str = "No Title";

/// Fetches a page and returns its readable text
///
/// Non-HTML responses are not an error; they produce a one-line placeholder
/// naming the content type.
///
/// # Returns
///
/// * `Ok(String)` - Extracted text, or the non-HTML placeholder
/// * `Err(FetchError)` - Network failure, timeout, or non-2xx status
pub async fn fetch_and_extract(client: &Client, url: &str) -> Result<String, FetchError> {
    match fetch_page(client, url).await? {
        FetchedPage::Html { body } => Ok(extract_text(&body, url)),
        FetchedPage::NonHtml { content_type } => Ok(non_html_placeholder(content_type.as_deref())),
    }
}

/// Text stored for a response that is not HTML
pub fn non_html_placeholder(content_type: Option<&str>) -> String {
    format!("[Non-HTML content: {}]", content_type.unwrap_or("unknown"))
}

/// Converts an HTML document into the stored text form
///
/// Output starts with a `Title:` line and a `URL:` line, followed by the
/// rendered content region. Blank lines are dropped and trailing whitespace
/// is trimmed from every line.
///
/// # Example
///
/// ```
/// use site_harvest::extract::extract_text;
///
/// let html = "<html><head><title>Menu</title></head><body><main><p>Soup</p></main></body></html>";
/// let text = extract_text(html, "https://example.com/menu");
/// assert!(text.starts_with("Title: Menu\nURL: https://example.com/menu\n"));
/// assert!(text.contains("Soup"));
/// ```
pub fn extract_text(html: &str, url: &str) -> String {
    let mut document = Html::parse_document(html);
    let title = extract_title(&document).unwrap_or_else(|| NO_TITLE.to_string());

    strip_elements(&mut document);
    let markup = select_content_region(&document)
        .map(|region| region.html())
        .unwrap_or_default();

    let rendered = html2text::from_read(markup.as_bytes(), TEXT_WIDTH);
    let full = format!("Title: {}\nURL: {}\n\n{}", title, url, rendered);

    remove_blank_lines(&full)
}

/// Detaches boilerplate elements and images from the tree
fn strip_elements(document: &mut Html) {
    let Ok(selector) = Selector::parse(STRIPPED_SELECTOR) else {
        return;
    };

    let ids: Vec<_> = document.select(&selector).map(|element| element.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Picks the first content candidate still attached to the document, else `body`
fn select_content_region(document: &Html) -> Option<ElementRef<'_>> {
    for candidate in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(candidate) else {
            continue;
        };

        if let Some(element) = document.select(&selector).find(|el| is_attached(*el)) {
            return Some(element);
        }
    }

    let body = Selector::parse("body").ok()?;
    document
        .select(&body)
        .find(|el| is_attached(*el))
        .or_else(|| Some(document.root_element()))
}

/// False for elements inside a detached subtree
fn is_attached(element: ElementRef<'_>) -> bool {
    element.ancestors().any(|node| node.value().is_document())
}

/// Drops whitespace-only lines and trims the end of the rest
fn remove_blank_lines(text: &str) -> String {
    text.lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
