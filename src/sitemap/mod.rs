//! Site map construction and rendering
//!
//! This module handles:
//! - Recording the same-domain link graph during an unbounded traversal
//! - Rendering that graph as a nested HTML list, nested Markdown bullets,
//!   or a JSON adjacency map

mod builder;
mod graph;
mod render;

pub use builder::{MapReport, SiteMapBuilder};
pub use graph::{SiteMapGraph, TreeEntry};
pub use render::{render, render_html, render_json, render_markdown};
