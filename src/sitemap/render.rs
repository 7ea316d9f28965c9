//! Site map renderings
//!
//! HTML and Markdown show the tree projection of the graph; JSON is the only
//! graph-complete form.

use crate::convert::{to_pretty_json, OutputFormat};
use crate::sitemap::graph::SiteMapGraph;
use html_escape::encode_text;
use std::fmt::Write;

/// Renders the site map in `format`
pub fn render(graph: &SiteMapGraph, format: OutputFormat) -> String {
    match format {
        OutputFormat::Html => render_html(graph),
        OutputFormat::Markdown => render_markdown(graph),
        OutputFormat::Json => render_json(graph),
    }
}

/// `<h1>Site Map for ROOT</h1>` followed by nested `<ul>`/`<li>` lists
pub fn render_html(graph: &SiteMapGraph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "<h1>Site Map for {}</h1>", encode_text(graph.root().as_str()));
    out.push_str("<ul>\n");

    // A pre-order entry deeper than its predecessor opens a nested list; a
    // shallower one first closes every list it climbs out of.
    let tree = graph.tree();
    for (i, entry) in tree.iter().enumerate() {
        let _ = writeln!(out, "<li>{}", encode_text(entry.url.as_str()));
        let next_level = tree.get(i + 1).map_or(0, |next| next.level);
        if next_level > entry.level {
            out.push_str("<ul>\n");
            continue;
        }
        out.push_str("</li>\n");
        for _ in next_level..entry.level {
            out.push_str("</ul>\n</li>\n");
        }
    }

    out.push_str("</ul>\n");
    out
}

/// `# Site Map for ROOT` followed by bullets indented two spaces per level
pub fn render_markdown(graph: &SiteMapGraph) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Site Map for {}\n", graph.root());
    for entry in graph.tree() {
        let _ = writeln!(out, "{}- {}", "  ".repeat(entry.level), entry.url);
    }
    out
}

/// Adjacency map `url -> [children]`, pretty printed, in expansion order
pub fn render_json(graph: &SiteMapGraph) -> String {
    to_pretty_json(graph)
}
