//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with error classification
//! - HTML cleaning, content extraction and link extraction
//! - The bounded-depth breadth-first crawl engine

mod engine;
mod extractor;
mod fetcher;

pub use engine::{fetch_page, CrawlEngine, CrawlReport, CrawledPage, ExtractMode};
pub use extractor::{extract, extract_links};
pub use fetcher::{build_http_client, Fetcher};
