//! Output module for persisting converted pages and site maps
//!
//! This module handles:
//! - The [`OutputWriter`] seam used by every traversal
//! - Collision-free file naming (`page.md`, `page_1.md`, ...)
//! - The per-operation directory layout and default file names

mod naming;
mod traits;
mod writer;

pub use naming::{
    custom_base, page_slug, timestamped_name, OutputLayout, CRAWL_AND_MAP_DIR,
    RECURSIVE_CRAWL_DIR, SINGLE_PAGE_DIR, SITE_MAP_BASENAME, SITE_MAP_DIR,
};
pub use traits::{
    resolve_collision, OutputError, OutputResult, OutputTarget, OutputWriter,
    MAX_COLLISION_ATTEMPTS,
};
pub use writer::{FsWriter, MemoryWriter};

/// Prepends the YAML front matter used for Markdown page files
pub fn with_front_matter(title: Option<&str>, body: &str) -> String {
    let title = title.unwrap_or("").replace(['\r', '\n'], " ");
    format!("---\ntitle: {}\ntype: reference\n---\n\n{}", title.trim(), body)
}
