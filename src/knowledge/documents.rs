//! Knowledge-base documents built from merged content
//!
//! Each merged section becomes one [`Document`]. Documents are written as
//! JSON lines so an external vector store can ingest them.

use crate::knowledge::KnowledgeError;
use crate::output::merge::blank_run_re;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::sync::OnceLock;

/// Sections with fewer words than this are not worth indexing
const MIN_SECTION_WORDS: usize = 10;

const UNKNOWN_SECTION: &str = "Unknown Section";

/// One retrievable chunk of site content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub page_content: String,
    pub metadata: DocumentMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Seed URL of the site, or the domain when no seed matches
    pub source: String,
    pub domain: String,
    /// Page title, falling back to the section name
    pub title: String,
    pub section: String,
}

fn section_split_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"={80}\s*").expect("section split regex is valid"))
}

fn section_title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"SECTION: (.*)").expect("section title regex is valid"))
}

fn page_title_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"Title: (.*)").expect("page title regex is valid"))
}

fn header_line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^(?:Title|URL): .*$").expect("header line regex is valid"))
}

/// Removes page headers and horizontal rules from a section
///
/// # Example
///
/// ```
/// use site_harvest::knowledge::clean_content;
///
/// let section = "Title: Menu\nURL: https://a.com/menu\n\n\n\nSoup\n* * *\nBread\n";
/// assert_eq!(clean_content(section), "Soup\n\nBread");
/// ```
pub fn clean_content(content: &str) -> String {
    let content = header_line_re().replace_all(content, "");
    let content = content.replace("* * *", "");
    blank_run_re()
        .replace_all(&content, "\n\n")
        .trim()
        .to_string()
}

/// Returns the trimmed value of the first `<label>: ` line
fn capture_line(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

/// Picks the seed a domain's content came from
fn source_for(domain: &str, seeds: &[String]) -> String {
    seeds
        .iter()
        .map(String::as_str)
        .find(|seed| seed.contains(domain))
        .unwrap_or(domain)
        .to_string()
}

/// Splits one merged file into documents
pub fn documents_from_merged(domain: &str, merged: &str, seeds: &[String]) -> Vec<Document> {
    let source = source_for(domain, seeds);

    section_split_re()
        .split(merged)
        .skip(1)
        .filter(|section| !section.trim().is_empty())
        .filter_map(|section| {
            let section_title = capture_line(section_title_re(), section)
                .unwrap_or_else(|| UNKNOWN_SECTION.to_string());

            let page_content = clean_content(section);
            if page_content.split_whitespace().count() < MIN_SECTION_WORDS {
                return None;
            }

            let title = capture_line(page_title_re(), section)
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| section_title.clone());

            Some(Document {
                page_content,
                metadata: DocumentMetadata {
                    source: source.clone(),
                    domain: domain.to_string(),
                    title,
                    section: section_title,
                },
            })
        })
        .collect()
}

/// Builds documents from every merged file in `structured_dir`
///
/// Files are read in sorted order. An unreadable file is logged and
/// skipped.
pub fn build_documents(structured_dir: &Path, seeds: &[String]) -> Result<Vec<Document>, KnowledgeError> {
    if !structured_dir.is_dir() {
        return Err(KnowledgeError::MissingDirectory(structured_dir.to_path_buf()));
    }

    let entries = fs::read_dir(structured_dir).map_err(|e| KnowledgeError::io(structured_dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| KnowledgeError::io(structured_dir, e))?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "txt") {
            files.push(path);
        }
    }
    files.sort();

    let mut documents = Vec::new();
    for path in files {
        let Some(domain) = path.file_stem().map(|s| s.to_string_lossy().into_owned()) else {
            continue;
        };

        let merged = match fs::read_to_string(&path) {
            Ok(merged) => merged,
            Err(e) => {
                tracing::warn!("Error processing {}: {}", path.display(), e);
                continue;
            }
        };

        let domain_docs = documents_from_merged(&domain, &merged, seeds);
        tracing::info!("Built {} documents for {}", domain_docs.len(), domain);
        documents.extend(domain_docs);
    }

    Ok(documents)
}

/// Writes documents as JSON lines, replacing any existing file
pub fn write_documents(path: &Path, documents: &[Document]) -> Result<(), KnowledgeError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| KnowledgeError::io(parent, e))?;
    }

    let file = File::create(path).map_err(|e| KnowledgeError::io(path, e))?;
    let mut writer = BufWriter::new(file);

    for document in documents {
        serde_json::to_writer(&mut writer, document)?;
        writer.write_all(b"\n").map_err(|e| KnowledgeError::io(path, e))?;
    }

    writer.flush().map_err(|e| KnowledgeError::io(path, e))?;
    Ok(())
}

/// Reads a JSON-lines document file, skipping blank lines
pub fn read_documents(path: &Path) -> Result<Vec<Document>, KnowledgeError> {
    let file = File::open(path).map_err(|e| KnowledgeError::io(path, e))?;

    let mut documents = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|e| KnowledgeError::io(path, e))?;
        if line.trim().is_empty() {
            continue;
        }

        let document = serde_json::from_str(&line).map_err(|source| KnowledgeError::InvalidDocument {
            line: index + 1,
            source,
        })?;
        documents.push(document);
    }

    Ok(documents)
}
