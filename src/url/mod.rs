//! URL handling module for Site-Harvest
//!
//! This module provides URL normalization, scope host extraction and
//! link classification.

mod domain;
mod normalize;

use url::Url;

// Re-export main functions
pub use domain::{extract_domain, scope_host};
pub use normalize::normalize_url;

/// Link prefixes that are never recorded or followed
const EXCLUDED_SCHEMES: &[&str] = &["javascript:", "mailto:", "tel:"];

/// Image extensions that mark a link as a binary asset when the path ends with them
const ASSET_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".webp"];

/// Image extensions that mark a link as an asset wherever they appear in the path
const EMBEDDED_IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];

/// Hosts that only contribute social-media chrome
const SOCIAL_MEDIA_HOSTS: &[&str] = &["facebook.com", "youtube.com", "youtu.be"];

/// Image extensions checked on file-hosting links
const HOSTED_IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif"];

/// Why a link was excluded from the crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Exclusion {
    /// `javascript:`, `mailto:` or `tel:` link
    Scheme,
    /// Empty href, or one that does not resolve to an http(s) URL
    Unresolvable,
    /// Path points at an image file
    Asset,
    /// Host is a social-media site
    SocialMedia,
    /// Image hosted on a file-sharing service
    HostedImage,
}

/// Classification of a discovered link relative to the crawl scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkClass {
    /// Not crawled
    Excluded(Exclusion),
    /// Different host than the seed - recorded but not followed
    External,
    /// Same host as the seed - recorded and enqueued
    Internal,
}

impl LinkClass {
    /// Returns true if the link is excluded for any reason
    pub fn is_excluded(&self) -> bool {
        matches!(self, Self::Excluded(_))
    }

    /// Returns true if the link belongs in the output link set
    ///
    /// Asset and social-media links are kept for completeness; only links
    /// that are not web addresses at all are dropped.
    pub fn is_recorded(&self) -> bool {
        !matches!(
            self,
            Self::Excluded(Exclusion::Scheme) | Self::Excluded(Exclusion::Unresolvable)
        )
    }

    /// Returns true if the link should be fed to the frontier
    pub fn should_follow(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Resolves a raw href against the page it was found on
///
/// Returns None for empty hrefs and for links that do not resolve to an
/// absolute http(s) URL.
pub fn resolve_link(discovered: &str, base: &Url) -> Option<Url> {
    let href = discovered.trim();
    if href.is_empty() {
        return None;
    }

    match base.join(href) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => Some(url),
        _ => None,
    }
}

/// Classifies a discovered link
///
/// Rules are applied in order:
/// 1. Resolve the link against `base`
/// 2. `javascript:`, `mailto:`, `tel:` → Excluded
/// 3. Image asset path → Excluded
/// 4. Social-media host → Excluded
/// 5. Image on a dropbox host → Excluded
/// 6. Same host as `scope_host` → Internal, otherwise External
///
/// This function performs no I/O and always returns the same answer for the
/// same inputs.
///
/// # Examples
///
/// ```
/// use site_harvest::url::{classify, LinkClass};
/// use url::Url;
///
/// let base = Url::parse("https://example.com/").unwrap();
/// assert_eq!(classify("/about", &base, "example.com"), LinkClass::Internal);
/// assert_eq!(classify("https://other.org/", &base, "example.com"), LinkClass::External);
/// assert!(classify("image.jpg", &base, "example.com").is_excluded());
/// ```
pub fn classify(discovered: &str, base: &Url, scope_host: &str) -> LinkClass {
    let raw = discovered.trim();

    if EXCLUDED_SCHEMES
        .iter()
        .any(|scheme| starts_with_ignore_case(raw, scheme))
    {
        return LinkClass::Excluded(Exclusion::Scheme);
    }

    let resolved = match resolve_link(raw, base) {
        Some(url) => url,
        None => return LinkClass::Excluded(Exclusion::Unresolvable),
    };

    let path = resolved.path().to_lowercase();
    let host = extract_domain(&resolved).unwrap_or_default();

    if is_asset_path(&path) {
        return LinkClass::Excluded(Exclusion::Asset);
    }

    if SOCIAL_MEDIA_HOSTS.iter().any(|social| host.contains(social)) {
        return LinkClass::Excluded(Exclusion::SocialMedia);
    }

    if host.contains("dropbox") && HOSTED_IMAGE_EXTENSIONS.iter().any(|ext| path.contains(ext)) {
        return LinkClass::Excluded(Exclusion::HostedImage);
    }

    if host == scope_host.to_lowercase() {
        LinkClass::Internal
    } else {
        LinkClass::External
    }
}

/// Checks a lowercase path against the image asset rules
fn is_asset_path(path: &str) -> bool {
    ASSET_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
        || EMBEDDED_IMAGE_EXTENSIONS.iter().any(|ext| path.contains(ext))
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
