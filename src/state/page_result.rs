//! Per-page traversal outcome
//!
//! A `PageResult` is produced for every fetch attempt and consumed within the
//! same traversal step.
use crate::convert::{ContentTree, ExtractedPage};
use crate::{ExtractError, FetchError};
use std::fmt;
use url::Url;

/// Why a page produced no content
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// The fetch itself failed (timeout, HTTP status, network)
    Fetch(FetchError),

    /// The body could not be parsed as HTML
    Parse(ExtractError),

    /// The page converted but could not be persisted
    Write(String),
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fetch(e) => write!(f, "fetch failed: {}", e),
            Self::Parse(e) => write!(f, "parse failed: {}", e),
            Self::Write(e) => write!(f, "write failed: {}", e),
        }
    }
}

/// Whether the fetch and extraction of a page succeeded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Fetched,
    Failed(FailureKind),
}

/// Outcome of fetching and extracting one page
#[derive(Debug, Clone)]
pub struct PageResult {
    /// Normalized page URL
    pub url: Url,

    /// Discovery depth, the root being 0
    pub depth: u32,

    /// Page title, if one was found
    pub title: Option<String>,

    /// Extracted main content (absent on failure or in link-only mode)
    pub content: Option<ContentTree>,

    /// Outbound links in document order, deduplicated, any domain
    pub outbound_links: Vec<Url>,

    pub outcome: PageOutcome,
}

impl PageResult {
    /// Builds the result of a failed fetch or extraction
    pub fn failed(url: Url, depth: u32, kind: FailureKind) -> Self {
        Self {
            url,
            depth,
            title: None,
            content: None,
            outbound_links: Vec::new(),
            outcome: PageOutcome::Failed(kind),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self.outcome, PageOutcome::Fetched)
    }

    /// Returns the failure, if any
    pub fn failure(&self) -> Option<&FailureKind> {
        match &self.outcome {
            PageOutcome::Fetched => None,
            PageOutcome::Failed(kind) => Some(kind),
        }
    }

    /// Converts the result into the converter's input
    ///
    /// A result without content (failed or link-only) yields an empty tree.
    pub fn into_page(self) -> ExtractedPage {
        ExtractedPage {
            url: self.url,
            title: self.title,
            content: self.content.unwrap_or_default(),
            links: self.outbound_links,
        }
    }
}
