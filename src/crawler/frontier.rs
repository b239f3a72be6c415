//! Breadth-first crawl frontier
//!
//! The frontier owns the FIFO queue of `(url, depth)` entries and the two
//! run-local sets that keep the traversal bounded:
//! - the seen set, updated when a key is enqueued, so that every normalized
//!   URL enters the queue at most once per run
//! - the visited set, updated when an entry is dequeued for processing
//!
//! Neither set is persisted; every run starts empty.

use crate::url::normalize_url;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// A URL waiting to be fetched
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Absolute URL used for fetching
    pub url: Url,

    /// Normalized dedup key
    pub key: String,

    /// Hops from the seed
    pub depth: u32,
}

impl FrontierEntry {
    fn new(url: Url, depth: u32) -> Self {
        let key = normalize_url(url.as_str());
        Self { url, key, depth }
    }
}

/// FIFO frontier bounded by a maximum depth
#[derive(Debug)]
pub struct Frontier {
    queue: VecDeque<FrontierEntry>,
    seen: HashSet<String>,
    visited: HashSet<String>,
    max_depth: u32,
}

impl Frontier {
    /// Creates a frontier holding only the seed at depth 0
    pub fn new(seed: Url, max_depth: u32) -> Self {
        let entry = FrontierEntry::new(seed, 0);

        let mut seen = HashSet::new();
        seen.insert(entry.key.clone());

        let mut queue = VecDeque::new();
        queue.push_back(entry);

        Self {
            queue,
            seen,
            visited: HashSet::new(),
            max_depth,
        }
    }

    /// Dequeues the next entry to process and marks it visited
    ///
    /// Entries already visited or deeper than the maximum depth are
    /// discarded without side effects. Returns None once the queue is empty.
    pub fn next_entry(&mut self) -> Option<FrontierEntry> {
        while let Some(entry) = self.queue.pop_front() {
            if self.visited.contains(&entry.key) || entry.depth > self.max_depth {
                tracing::trace!("Discarding frontier entry {} (depth {})", entry.key, entry.depth);
                continue;
            }

            self.visited.insert(entry.key.clone());
            return Some(entry);
        }

        None
    }

    /// Offers a same-host link discovered on a page at `parent_depth`
    ///
    /// The link is enqueued at `parent_depth + 1` only if the parent is
    /// shallower than the maximum depth and the link's normalized key has
    /// never been enqueued or visited in this run.
    ///
    /// # Returns
    ///
    /// `true` if the link was enqueued
    pub fn offer(&mut self, url: Url, parent_depth: u32) -> bool {
        if parent_depth >= self.max_depth {
            return false;
        }

        let entry = FrontierEntry::new(url, parent_depth + 1);
        if self.visited.contains(&entry.key) || !self.seen.insert(entry.key.clone()) {
            return false;
        }

        self.queue.push_back(entry);
        true
    }

    /// Returns true if the normalized key has been dequeued for processing
    pub fn is_visited(&self, key: &str) -> bool {
        self.visited.contains(key)
    }

    /// Returns the visited set
    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    /// Consumes the frontier, returning the visited set
    pub fn into_visited(self) -> HashSet<String> {
        self.visited
    }

    /// Returns the number of queued entries
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Returns whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Returns the configured maximum depth
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }
}
