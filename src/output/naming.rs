//! Output layout and default file names

use crate::convert::OutputFormat;
use std::path::{Path, PathBuf};
use url::Url;

/// Directory for single page conversions
pub const SINGLE_PAGE_DIR: &str = "output";
/// Directory for recursive crawl page files
pub const RECURSIVE_CRAWL_DIR: &str = "recursive_crawl";
/// Directory for standalone site maps
pub const SITE_MAP_DIR: &str = "site_map";
/// Directory for combined crawl and site map runs
pub const CRAWL_AND_MAP_DIR: &str = "crawl_and_map";

/// Base name (without extension) of every site map file
pub const SITE_MAP_BASENAME: &str = "site_map";

/// Per-operation output directories under a common root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn single_page_dir(&self) -> PathBuf {
        self.root.join(SINGLE_PAGE_DIR)
    }

    pub fn crawl_dir(&self) -> PathBuf {
        self.root.join(RECURSIVE_CRAWL_DIR)
    }

    pub fn site_map_dir(&self) -> PathBuf {
        self.root.join(SITE_MAP_DIR)
    }

    pub fn crawl_and_map_dir(&self) -> PathBuf {
        self.root.join(CRAWL_AND_MAP_DIR)
    }
}

impl Default for OutputLayout {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Default single page name: `<host>-<YYYYmmdd-HHMMSS>`
pub fn timestamped_name(url: &Url) -> String {
    let host = url.host_str().unwrap_or("page");
    format!(
        "{}-{}",
        sanitize(host),
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    )
}

/// Base name for a user supplied file name
///
/// A trailing extension matching `format` is stripped, since the writer
/// appends it again. Any other extension is kept as part of the base.
pub fn custom_base(filename: &str, format: OutputFormat) -> String {
    let filename = filename.trim();
    let suffix = format!(".{}", format.extension());
    match filename.strip_suffix(suffix.as_str()) {
        Some(base) if !base.is_empty() => base.to_string(),
        _ => filename.to_string(),
    }
}

/// File name slug for a crawled page, built from host and path
///
/// `https://example.com/docs/intro?x=1` becomes `example.com_docs_intro_x_1`.
pub fn page_slug(url: &Url) -> String {
    let mut slug = sanitize(url.host_str().unwrap_or("page"));

    if let Some(port) = url.port() {
        slug.push('_');
        slug.push_str(&port.to_string());
    }

    let path = url.path().trim_matches('/');
    if !path.is_empty() {
        slug.push('_');
        slug.push_str(&sanitize(path));
    }

    if let Some(query) = url.query().filter(|q| !q.is_empty()) {
        slug.push('_');
        slug.push_str(&sanitize(query));
    }

    slug
}

/// Replaces anything outside `[A-Za-z0-9._-]` with `_` and squeezes runs
fn sanitize(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        let c = if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
            c
        } else {
            '_'
        };
        if c == '_' && out.ends_with('_') {
            continue;
        }
        out.push(c);
    }
    let trimmed = out.trim_matches('_');
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') {
        "page".to_string()
    } else {
        trimmed.to_string()
    }
}
