//! Breadth-first traversal state
//!
//! A `CrawlState` is created by one traversal, never shared, and dropped when
//! the frontier drains.

use crate::url::same_domain;
use std::collections::{HashSet, VecDeque};
use url::Url;

/// Visited set, FIFO frontier and the domain the traversal is confined to
#[derive(Debug)]
pub struct CrawlState {
    visited: HashSet<Url>,
    /// Every URL ever pushed onto the frontier, visited or not
    queued: HashSet<Url>,
    frontier: VecDeque<(Url, u32)>,
    root_domain: String,
}

impl CrawlState {
    /// Creates a state seeded with `root` at depth 0
    pub fn new(root: Url, root_domain: impl Into<String>) -> Self {
        let mut frontier = VecDeque::new();
        frontier.push_back((root.clone(), 0));
        Self {
            visited: HashSet::new(),
            queued: HashSet::from([root]),
            frontier,
            root_domain: root_domain.into(),
        }
    }

    /// Pops the next unvisited frontier entry and marks it visited
    ///
    /// Entries already visited are discarded here, so the check-and-insert
    /// happens in one place.
    pub fn next_unvisited(&mut self) -> Option<(Url, u32)> {
        while let Some((url, depth)) = self.frontier.pop_front() {
            if self.visited.insert(url.clone()) {
                return Some((url, depth));
            }
            tracing::trace!("Skipping already visited {}", url);
        }
        None
    }

    /// Enqueues `url` at `depth` if it is on the root domain and has never
    /// been queued
    ///
    /// Returns false when the link was dropped. A URL keeps the depth of its
    /// first enqueue, which in FIFO order is its shortest distance from the
    /// root.
    pub fn enqueue(&mut self, url: &Url, depth: u32) -> bool {
        if !self.is_same_domain(url) || !self.queued.insert(url.clone()) {
            return false;
        }
        self.frontier.push_back((url.clone(), depth));
        true
    }

    pub fn is_same_domain(&self, url: &Url) -> bool {
        same_domain(url, &self.root_domain)
    }

    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }
}
