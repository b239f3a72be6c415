//! Merging of per-page content into one structured file per domain
//!
//! Merged file layout:
//!
//! ```text
//! Merged content for <domain>
//! ================================================================================
//!
//! SECTION: <page name>
//! --------------------------------------------------------------------------------
//! <cleaned page text>
//!
//! ================================================================================
//!
//! ```

use crate::output::stats::MergeReport;
use crate::storage::StorageError;
use crate::HarvestError;
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Section rule between pages
pub const SECTION_RULE: &str =
    "================================================================================";

/// Rule under a section header
const HEADER_RULE: &str =
    "--------------------------------------------------------------------------------";

/// Page files with this many non-blank lines or fewer are left out
const MIN_CONTENT_LINES: usize = 3;

const HOME_PAGE_STEM: &str = "index";
const HOME_PAGE_NAME: &str = "Home Page";

fn url_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^URL: .*$").expect("url line regex is valid"))
}

/// `[n]: target` footnote lines html2text appends after the text
fn link_footnote_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^\[\d+\]: .*$").expect("footnote regex is valid"))
}

/// `[text][n]` reference to a footnote
fn reference_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\]]+)\]\[\d+\]").expect("reference link regex is valid"))
}

fn markdown_link_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\[([^\]]+)\]\(https?://[^)]+\)").expect("markdown link regex is valid")
    })
}

fn bare_url_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"https?://\S+").expect("bare url regex is valid"))
}

/// Matches three or more newlines with only whitespace between them
pub(crate) fn blank_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\n\s*\n\s*\n+").expect("blank run regex is valid"))
}

/// Strips URLs from page text
///
/// `URL:` lines and link footnotes are removed, reference and inline
/// markdown links are reduced to their text, and any remaining
/// `http(s)://` URL is dropped. Runs of blank lines collapse to
/// a single blank line.
///
/// # Example
///
/// ```
/// use site_harvest::output::remove_urls;
///
/// let text = "URL: https://a.com/\nSee [menu](https://a.com/menu) or https://b.com/x";
/// assert_eq!(remove_urls(text), "\nSee menu or ");
/// ```
pub fn remove_urls(text: &str) -> String {
    let text = url_line_re().replace_all(text, "");
    let text = link_footnote_re().replace_all(&text, "");
    let text = reference_link_re().replace_all(&text, "$1");
    let text = markdown_link_re().replace_all(&text, "$1");
    let text = bare_url_re().replace_all(&text, "");
    blank_run_re().replace_all(&text, "\n\n").into_owned()
}

/// Counts lines that are not blank
pub fn count_content_lines(text: &str) -> usize {
    text.lines().filter(|line| !line.trim().is_empty()).count()
}

/// Turns a page file stem back into a readable section name
pub fn section_name(stem: &str) -> String {
    if stem == HOME_PAGE_STEM {
        return HOME_PAGE_NAME.to_string();
    }
    stem.replace("__", "/")
}

/// Merges one domain directory into `output`
///
/// Page files are read in sorted order. Short or unreadable pages are
/// skipped and counted.
pub fn merge_domain(domain: &str, domain_dir: &Path, output: &Path) -> Result<MergeReport, StorageError> {
    let entries = fs::read_dir(domain_dir).map_err(|e| StorageError::io(domain_dir, e))?;

    let mut page_files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| StorageError::io(domain_dir, e))?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            page_files.push(path);
        }
    }
    page_files.sort();

    let mut merged = format!("Merged content for {}\n{}\n\n", domain, SECTION_RULE);
    let mut files_merged = 0;
    let mut files_skipped = 0;

    for path in &page_files {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Error reading {}: {}", path.display(), e);
                files_skipped += 1;
                continue;
            }
        };

        let line_count = count_content_lines(&content);
        if line_count <= MIN_CONTENT_LINES {
            tracing::debug!(
                "Skipping {} - insufficient content ({} lines)",
                path.display(),
                line_count
            );
            files_skipped += 1;
            continue;
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        merged.push_str(&format!("SECTION: {}\n{}\n", section_name(&stem), HEADER_RULE));
        merged.push_str(&remove_urls(&content));
        merged.push_str(&format!("\n\n{}\n\n", SECTION_RULE));
        files_merged += 1;
    }

    fs::write(output, merged).map_err(|e| StorageError::io(output, e))?;

    Ok(MergeReport {
        domain: domain.to_string(),
        output: output.to_path_buf(),
        files_merged,
        files_skipped,
    })
}

/// Merges every domain under `data_dir` into `structured_dir`
///
/// # Returns
///
/// * `Ok(Vec<MergeReport>)` - One report per domain, in sorted order
/// * `Err(HarvestError)` - The data directory is missing or the output
///   directory cannot be created
pub fn merge_all(data_dir: &Path, structured_dir: &Path) -> Result<Vec<MergeReport>, HarvestError> {
    if !data_dir.is_dir() {
        return Err(HarvestError::MissingInput(format!(
            "data directory {} not found",
            data_dir.display()
        )));
    }

    fs::create_dir_all(structured_dir)?;

    let mut domains = Vec::new();
    for entry in fs::read_dir(data_dir)? {
        let entry = entry?;
        if entry.path().is_dir() {
            domains.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    domains.sort();

    let mut reports = Vec::with_capacity(domains.len());
    for domain in domains {
        let output = structured_dir.join(format!("{}.txt", domain));
        match merge_domain(&domain, &data_dir.join(&domain), &output) {
            Ok(report) => {
                tracing::info!(
                    "Completed {}: merged {} files, skipped {} files",
                    domain,
                    report.files_merged,
                    report.files_skipped
                );
                reports.push(report);
            }
            Err(e) => tracing::warn!("Failed to merge {}: {}", domain, e),
        }
    }

    Ok(reports)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_remove_url_lines() {
        let text = "Title: Menu\nURL: https://a.com/menu\nSoup of the day";
        assert_eq!(remove_urls(text), "Title: Menu\n\nSoup of the day");
    }

    #[test]
    fn test_markdown_links_unwrapped() {
        assert_eq!(
            remove_urls("Book a [table](https://a.com/book) today"),
            "Book a table today"
        );
    }

    #[test]
    fn test_reference_links_and_footnotes_removed() {
        let text = "See our [lunch menu][1] and [drinks][2] today.\n[1]: https://a.com/menu\n[2]: /drinks";
        assert_eq!(remove_urls(text), "See our lunch menu and drinks today.\n\n");
    }

    #[test]
    fn test_extracted_page_is_cleaned() {
        let html = r#"<html><head><title>Menu</title></head><body><main>
            <p>See our <a href="https://a.com/menu">lunch menu</a> and <a href="/drinks">drinks</a> today.</p>
        </main></body></html>"#;
        let cleaned = remove_urls(&crate::extract::extract_text(html, "https://a.com/"));

        assert!(cleaned.contains("See our lunch menu and drinks today."));
        assert!(!cleaned.contains("/drinks"));
        assert!(!cleaned.contains("https://"));
        assert!(!cleaned.contains("[1]"));
        assert!(!cleaned.contains("[2]"));
    }

    #[test]
    fn test_bare_urls_removed() {
        assert_eq!(remove_urls("Visit http://a.com/x now"), "Visit  now");
    }

    #[test]
    fn test_blank_runs_collapsed() {
        assert_eq!(remove_urls("one\n\n  \n\n\ntwo"), "one\n\ntwo");
    }

    #[test]
    fn test_count_content_lines() {
        assert_eq!(count_content_lines("a\n\n  \nb\nc\n"), 3);
        assert_eq!(count_content_lines(""), 0);
    }

    #[test]
    fn test_section_name() {
        assert_eq!(section_name("index"), "Home Page");
        assert_eq!(section_name("menu__drinks"), "menu/drinks");
        assert_eq!(section_name("about"), "about");
    }

    #[test]
    fn test_merge_domain_layout() {
        let dir = TempDir::new().unwrap();
        let domain_dir = dir.path().join("example.com");
        fs::create_dir(&domain_dir).unwrap();

        fs::write(
            domain_dir.join("index.txt"),
            "Title: Home\nURL: https://example.com/\nWelcome\nOpen daily",
        )
        .unwrap();
        fs::write(domain_dir.join("short.txt"), "Title: Short\nURL: x\nHi").unwrap();

        let output = dir.path().join("example.com.txt");
        let report = merge_domain("example.com", &domain_dir, &output).unwrap();

        assert_eq!(report.files_merged, 1);
        assert_eq!(report.files_skipped, 1);

        let merged = fs::read_to_string(&output).unwrap();
        let expected = format!(
            "Merged content for example.com\n{rule}\n\nSECTION: Home Page\n{dash}\nTitle: Home\n\nWelcome\nOpen daily\n\n{rule}\n\n",
            rule = SECTION_RULE,
            dash = HEADER_RULE
        );
        assert_eq!(merged, expected);
    }

    #[test]
    fn test_merge_all_sorted_domains() {
        let dir = TempDir::new().unwrap();
        let data = dir.path().join("data");
        fs::create_dir_all(data.join("b.com")).unwrap();
        fs::create_dir_all(data.join("a.com")).unwrap();
        fs::write(data.join("stray.txt"), "not a domain").unwrap();

        let structured = dir.path().join("structured");
        let reports = merge_all(&data, &structured).unwrap();

        let domains: Vec<_> = reports.iter().map(|r| r.domain.as_str()).collect();
        assert_eq!(domains, vec!["a.com", "b.com"]);
        assert!(structured.join("a.com.txt").exists());
    }

    #[test]
    fn test_merge_all_missing_data_dir() {
        let dir = TempDir::new().unwrap();
        let result = merge_all(&dir.path().join("data"), &dir.path().join("out"));
        assert!(matches!(result, Err(HarvestError::MissingInput(_))));
    }
}
