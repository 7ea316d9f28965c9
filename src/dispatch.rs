//! Routing of named function calls to session operations
//!
//! Callers that only have a function name and a JSON argument object (tool
//! calling front ends, scripts) go through [`dispatch`]. Names form a closed
//! set; anything else is rejected before any work happens.

use crate::convert::{ConversionOptions, OutputFormat};
use crate::crawler::CrawlReport;
use crate::output::OutputWriter;
use crate::session::Session;
use crate::sitemap::MapReport;
use crate::CrawlError;
use serde::Deserialize;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Errors surfaced by the dispatcher
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    #[error("Invalid arguments: {0}")]
    InvalidArgs(#[from] serde_json::Error),

    #[error(transparent)]
    Operation(#[from] CrawlError),
}

/// The operations a dispatcher can route to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionName {
    SinglePage,
    RecursiveCrawl,
    MapOnly,
    RecursiveCrawlAndMap,
}

impl FunctionName {
    pub const ALL: [FunctionName; 4] = [
        Self::SinglePage,
        Self::RecursiveCrawl,
        Self::MapOnly,
        Self::RecursiveCrawlAndMap,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SinglePage => "single_page",
            Self::RecursiveCrawl => "recursive_crawl",
            Self::MapOnly => "map_only",
            Self::RecursiveCrawlAndMap => "recursive_crawl_and_map",
        }
    }
}

impl FromStr for FunctionName {
    type Err = DispatchError;

    /// Accepts the canonical names and the older `do_*` spellings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "single_page" | "do_single_page_conversion" => Ok(Self::SinglePage),
            "recursive_crawl" | "do_recursive_crawling" => Ok(Self::RecursiveCrawl),
            "map_only" | "do_map_only" => Ok(Self::MapOnly),
            "recursive_crawl_and_map" | "do_recursive_crawling_and_map" => {
                Ok(Self::RecursiveCrawlAndMap)
            }
            _ => Err(DispatchError::UnknownFunction(s.to_string())),
        }
    }
}

impl fmt::Display for FunctionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_true() -> bool {
    true
}

fn default_max_depth() -> u32 {
    1
}

/// Arguments shared by every routed operation
///
/// Only `url` is required; omitted fields take the documented defaults.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DispatchArgs {
    pub url: String,

    #[serde(default, alias = "output_format")]
    pub format: OutputFormat,

    #[serde(default = "default_true")]
    pub keep_images: bool,

    #[serde(default = "default_true")]
    pub keep_links: bool,

    #[serde(default = "default_true")]
    pub keep_emphasis: bool,

    #[serde(default)]
    pub generate_toc: bool,

    /// Base name for single page output; ignored by the other operations
    #[serde(default)]
    pub custom_filename: Option<String>,

    #[serde(default = "default_max_depth")]
    pub max_depth: u32,
}

impl DispatchArgs {
    /// Arguments for `url` with every other field at its default
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            format: OutputFormat::default(),
            keep_images: true,
            keep_links: true,
            keep_emphasis: true,
            generate_toc: false,
            custom_filename: None,
            max_depth: default_max_depth(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, DispatchError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn conversion_options(&self) -> ConversionOptions {
        ConversionOptions {
            format: self.format,
            keep_images: self.keep_images,
            keep_links: self.keep_links,
            keep_emphasis: self.keep_emphasis,
            generate_toc: self.generate_toc,
        }
    }
}

/// What the routed operation returned
#[derive(Debug)]
pub enum DispatchOutcome {
    SinglePage(Option<PathBuf>),
    Crawl(CrawlReport),
    Map(MapReport),
    CrawlAndMap(CrawlReport, MapReport),
}

/// Routes `name` to the matching session operation
///
/// # Errors
///
/// `UnknownFunction` for names outside the fixed set; operation errors
/// (such as an invalid root URL for a crawl) are passed through.
pub async fn dispatch<W: OutputWriter>(
    session: &mut Session<W>,
    name: &str,
    args: DispatchArgs,
) -> Result<DispatchOutcome, DispatchError> {
    let function: FunctionName = name.parse()?;
    let options = args.conversion_options();

    tracing::info!("Dispatching {} for {}", function, args.url);

    let outcome = match function {
        FunctionName::SinglePage => DispatchOutcome::SinglePage(
            session
                .single_page_convert(&args.url, options, args.custom_filename.as_deref())
                .await,
        ),
        FunctionName::RecursiveCrawl => {
            let report = session
                .recursive_crawl(&args.url, args.max_depth, options)
                .await?;
            DispatchOutcome::Crawl(report)
        }
        FunctionName::MapOnly => DispatchOutcome::Map(session.map_only(&args.url, options).await?),
        FunctionName::RecursiveCrawlAndMap => {
            let (crawl, map) = session
                .recursive_crawl_and_map(&args.url, args.max_depth, options)
                .await?;
            DispatchOutcome::CrawlAndMap(crawl, map)
        }
    };

    Ok(outcome)
}
