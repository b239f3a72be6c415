//! Filesystem storage for link lists and page content
//!
//! Layout:
//! - `<href-dir>/<host>.txt` - one discovered link per line, sorted
//! - `<data-dir>/<host>/<sanitized-path>.txt` - extracted text of one page

use crate::storage::traits::{ContentStore, StorageError, StorageResult};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// File name used for a URL with an empty path
const INDEX_FILE_STEM: &str = "index";

/// Extension of every link and content file
const TEXT_EXTENSION: &str = ".txt";

/// Derives the content file name for a URL
///
/// The URL path is taken, `/` becomes `__`, the characters
/// `\ * ? : " < > |` become `_`, and leading underscores are dropped. An
/// empty result (the home page) becomes `index`. A `.txt` suffix is added
/// unless already present. Query and fragment do not take part.
///
/// # Examples
///
/// ```
/// use site_harvest::storage::sanitize_filename;
///
/// assert_eq!(sanitize_filename("https://example.com/"), "index.txt");
/// assert_eq!(sanitize_filename("https://example.com/menu/drinks"), "menu__drinks.txt");
/// ```
pub fn sanitize_filename(url: &str) -> String {
    let path = Url::parse(url)
        .map(|u| u.path().to_string())
        .unwrap_or_default();

    let mut name = String::with_capacity(path.len() + TEXT_EXTENSION.len());
    for c in path.chars() {
        match c {
            '/' => name.push_str("__"),
            '\\' | '*' | '?' | ':' | '"' | '<' | '>' | '|' => name.push('_'),
            _ => name.push(c),
        }
    }

    let trimmed = name.trim_start_matches('_');
    let mut file_name = if trimmed.is_empty() {
        INDEX_FILE_STEM.to_string()
    } else {
        trimmed.to_string()
    };

    if !file_name.ends_with(TEXT_EXTENSION) {
        file_name.push_str(TEXT_EXTENSION);
    }

    file_name
}

/// Per-domain directory of extracted page content
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at the data directory
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    /// Returns the directory holding a domain's page files
    pub fn domain_dir(&self, domain: &str) -> PathBuf {
        self.root.join(domain)
    }

    /// Returns the file a URL's content is stored in
    pub fn page_path(&self, domain: &str, url: &str) -> PathBuf {
        self.domain_dir(domain).join(sanitize_filename(url))
    }
}

impl ContentStore for FileStore {
    fn already_processed(&self, domain: &str, url: &str) -> bool {
        self.page_path(domain, url).exists()
    }

    fn save(&self, domain: &str, url: &str, content: &str) -> StorageResult<PathBuf> {
        let dir = self.domain_dir(domain);
        fs::create_dir_all(&dir).map_err(|e| StorageError::io(&dir, e))?;

        let path = dir.join(sanitize_filename(url));
        fs::write(&path, content).map_err(|e| StorageError::io(&path, e))?;

        Ok(path)
    }
}

/// Directory of per-host link files
#[derive(Debug, Clone)]
pub struct LinkStore {
    dir: PathBuf,
}

impl LinkStore {
    /// Creates a store for the given directory
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    /// Returns the link file for a host
    pub fn path_for(&self, host: &str) -> PathBuf {
        self.dir.join(format!("{}{}", host, TEXT_EXTENSION))
    }

    /// Writes a host's link set, replacing any previous file
    ///
    /// The set is already sorted and deduplicated, so the file is too.
    pub fn write(&self, host: &str, links: &BTreeSet<String>) -> StorageResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;

        let mut content = String::new();
        for link in links {
            content.push_str(link);
            content.push('\n');
        }

        let path = self.path_for(host);
        fs::write(&path, content).map_err(|e| StorageError::io(&path, e))?;

        Ok(path)
    }

    /// Reads a host's links, skipping blank lines
    pub fn read(&self, host: &str) -> StorageResult<Vec<String>> {
        let path = self.path_for(host);
        let content = fs::read_to_string(&path).map_err(|e| StorageError::io(&path, e))?;

        Ok(content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect())
    }

    /// Lists the hosts that have a link file, sorted
    pub fn domains(&self) -> StorageResult<Vec<String>> {
        if !self.dir.is_dir() {
            return Err(StorageError::MissingDirectory(self.dir.clone()));
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| StorageError::io(&self.dir, e))?;

        let mut domains = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StorageError::io(&self.dir, e))?;
            if !entry.path().is_file() {
                continue;
            }

            let file_name = entry.file_name().to_string_lossy().into_owned();
            if let Some(domain) = file_name.strip_suffix(TEXT_EXTENSION) {
                domains.push(domain.to_string());
            }
        }

        domains.sort();
        Ok(domains)
    }
}
