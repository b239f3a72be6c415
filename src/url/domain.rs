use crate::UrlError;
use url::Url;

/// Extracts the scope host of a seed URL
///
/// The scope host is the lowercase host portion of the seed. Links whose
/// resolved host equals it are crawled; everything else is external.
///
/// # Arguments
///
/// * `seed` - The seed URL string
///
/// # Returns
///
/// * `Ok(String)` - The lowercase host
/// * `Err(UrlError)` - The seed is not an absolute http(s) URL with a host
///
/// # Examples
///
/// ```
/// use site_harvest::url::scope_host;
///
/// assert_eq!(scope_host("https://Example.com/menu").unwrap(), "example.com");
/// assert!(scope_host("mailto:owner@example.com").is_err());
/// ```
pub fn scope_host(seed: &str) -> Result<String, UrlError> {
    let url = Url::parse(seed.trim()).map_err(|e| UrlError::Parse(e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(UrlError::InvalidScheme(url.scheme().to_string()));
    }

    extract_domain(&url).ok_or(UrlError::MissingDomain)
}

/// Extracts the lowercase host from a URL
pub fn extract_domain(url: &Url) -> Option<String> {
    url.host_str().map(|h| h.to_lowercase())
}
