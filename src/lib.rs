//! opencrawl: fetch, clean and convert web pages
//!
//! This crate fetches HTML pages, strips boilerplate (header, nav, footer),
//! and re-emits the main content as HTML, Markdown or a JSON text record.
//! It can expand a single conversion into a bounded same-domain crawl and
//! build a site map of the link graph.

pub mod config;
pub mod convert;
pub mod crawler;
pub mod dispatch;
pub mod output;
pub mod session;
pub mod sitemap;
pub mod state;
pub mod url;

use thiserror::Error;

/// Main error type for opencrawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown output format: {0}")]
    UnknownFormat(String),
}

/// URL-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing domain in URL")]
    MissingDomain,
}

/// Failure of a single page fetch
///
/// A fetch failure is terminal for the page that requested it; traversals
/// record it and move on to the rest of the frontier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,

    #[error("HTTP status {status}")]
    Http { status: u16 },

    #[error("network error: {0}")]
    Network(String),
}

/// Failure to make sense of a fetched body
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("empty document")]
    EmptyDocument,

    #[error("body contains no markup")]
    NotMarkup,

    #[error("document nesting exceeds {0} levels")]
    TooDeep(usize),
}

/// Result type alias for opencrawl operations
pub type Result<T> = std::result::Result<T, CrawlError>;

// Re-export commonly used types
pub use config::Config;
pub use convert::{convert, ConversionOptions, OutputFormat};
pub use dispatch::{dispatch, DispatchArgs, DispatchError, DispatchOutcome, FunctionName};
pub use output::{FsWriter, MemoryWriter, OutputTarget, OutputWriter};
pub use session::Session;
pub use url::{extract_domain, normalize_url, same_domain};
