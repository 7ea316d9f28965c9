//! Table of contents generation from document headings

use super::tree::ContentTree;
use once_cell::sync::Lazy;
use regex::Regex;

static NON_SLUG_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s-]").expect("valid regex"));

/// Builds a Markdown outline of the `<h1>`..`<h6>` headings in `tree`
///
/// Entries keep document order and are indented two spaces per level below
/// the shallowest heading present. Returns None when there are no headings.
pub fn table_of_contents(tree: &ContentTree) -> Option<String> {
    let headings = tree.headings();
    let min_level = headings.iter().map(|(level, _)| *level).min()?;

    let mut lines = vec!["## Table of Contents".to_string(), String::new()];
    for (level, title) in &headings {
        let indent = "  ".repeat(level - min_level);
        lines.push(format!("{}- [{}](#{})", indent, title, heading_anchor(title)));
    }

    Some(lines.join("\n"))
}

/// GitHub-style anchor for a heading title
///
/// Lowercases, drops punctuation other than `-` and `_`, and turns spaces
/// into hyphens.
pub fn heading_anchor(title: &str) -> String {
    let lowered = title.to_lowercase();
    NON_SLUG_CHARS
        .replace_all(lowered.trim(), "")
        .replace(' ', "-")
}
