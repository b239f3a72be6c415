/// Normalizes a URL string into the key used for crawl deduplication
///
/// # Normalization Steps
///
/// 1. Remove the fragment (everything from the first `#`)
/// 2. Remove trailing slashes
///
/// The result is only ever used as a dedup key; pages are fetched using the
/// resolved absolute URL, never the normalized form. Any string is accepted.
///
/// # Examples
///
/// ```
/// use site_harvest::url::normalize_url;
///
/// assert_eq!(normalize_url("https://example.com/page/#top"), "https://example.com/page");
/// assert_eq!(normalize_url("https://example.com/"), "https://example.com");
/// ```
pub fn normalize_url(url: &str) -> String {
    let without_fragment = match url.find('#') {
        Some(pos) => &url[..pos],
        None => url,
    };

    // Stripping every trailing slash keeps the function idempotent for
    // inputs such as "a//"
    without_fragment.trim_end_matches('/').to_string()
}
