//! Format conversion for extracted pages
//!
//! This module renders an [`ExtractedPage`] into one of three formats:
//! - HTML: the cleaned content tree, re-serialized
//! - Markdown: a transcription with an optional table of contents
//! - JSON: a flat `{url, title, text}` record
//!
//! Conversion is a pure function of the page and the options: no I/O, and
//! identical input always yields identical output.

mod html;
mod markdown;
mod text;
mod toc;
mod tree;

pub use toc::{heading_anchor, table_of_contents};
pub use tree::{collapse_whitespace, ContentNode, ContentTree, Element, Elements};

use crate::ConfigError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// Output format of a conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum OutputFormat {
    Html,
    #[default]
    Markdown,
    Json,
}

impl OutputFormat {
    /// File extension (without the dot) used for this format
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Markdown => "md",
            Self::Json => "json",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" | "htm" => Ok(Self::Html),
            "markdown" | "md" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnknownFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for OutputFormat {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Html => "HTML",
            Self::Markdown => "Markdown",
            Self::Json => "JSON",
        };
        f.write_str(name)
    }
}

/// What a conversion keeps and produces
///
/// Built once per operation and passed by value to every conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionOptions {
    pub format: OutputFormat,
    pub keep_images: bool,
    pub keep_links: bool,
    pub keep_emphasis: bool,
    /// Prepend a heading outline (Markdown only)
    pub generate_toc: bool,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Markdown,
            keep_images: true,
            keep_links: true,
            keep_emphasis: true,
            generate_toc: false,
        }
    }
}

impl ConversionOptions {
    pub fn with_format(self, format: OutputFormat) -> Self {
        Self { format, ..self }
    }
}

/// Extractor output: everything the converter needs about one page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Normalized page URL
    pub url: Url,
    pub title: Option<String>,
    pub content: ContentTree,
    /// Outbound links in document order, deduplicated
    pub links: Vec<Url>,
}

/// Renders a page in the requested format
pub fn convert(page: &ExtractedPage, options: ConversionOptions) -> String {
    match options.format {
        OutputFormat::Html => html::render(&page.content, &options),
        OutputFormat::Markdown => {
            let body = markdown::render(&page.content, &options);
            if options.generate_toc {
                match table_of_contents(&page.content) {
                    Some(toc) => format!("{}\n\n{}", toc, body),
                    None => body,
                }
            } else {
                body
            }
        }
        OutputFormat::Json => text::render_record(page, &options),
    }
}

static BLANK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Blanks whitespace-only lines, collapses runs of blank lines and trims
pub(crate) fn tidy_blocks(raw: &str) -> String {
    let normalized = raw
        .lines()
        .map(|line| if line.trim().is_empty() { "" } else { line })
        .collect::<Vec<_>>()
        .join("\n");
    BLANK_RUNS.replace_all(&normalized, "\n\n").trim().to_string()
}

/// Serializes a record whose fields are plain strings
pub(crate) fn to_pretty_json<T: Serialize>(value: &T) -> String {
    // Only string, sequence and map fields reach here, which always serialize
    serde_json::to_string_pretty(value).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(html_nodes: Vec<ContentNode>) -> ExtractedPage {
        ExtractedPage {
            url: Url::parse("https://example.com/").unwrap(),
            title: Some("Example".to_string()),
            content: ContentTree::new(html_nodes),
            links: Vec::new(),
        }
    }

    fn heading(tag: &str, text: &str) -> ContentNode {
        let mut el = Element::new(tag);
        el.children.push(ContentNode::Text(text.to_string()));
        ContentNode::Element(el)
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("HTML".parse::<OutputFormat>().unwrap(), OutputFormat::Html);
        assert_eq!("Markdown".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!(matches!(
            "pdf".parse::<OutputFormat>(),
            Err(ConfigError::UnknownFormat(_))
        ));
    }

    #[test]
    fn test_extensions() {
        assert_eq!(OutputFormat::Html.extension(), "html");
        assert_eq!(OutputFormat::Markdown.extension(), "md");
        assert_eq!(OutputFormat::Json.extension(), "json");
    }

    #[test]
    fn test_convert_is_deterministic() {
        let page = page(vec![heading("h1", "Title"), heading("p", "Body text")]);
        for format in [OutputFormat::Html, OutputFormat::Markdown, OutputFormat::Json] {
            let options = ConversionOptions {
                generate_toc: true,
                ..ConversionOptions::default()
            }
            .with_format(format);
            assert_eq!(convert(&page, options), convert(&page, options));
        }
    }

    #[test]
    fn test_toc_prepended_for_markdown() {
        let page = page(vec![heading("h1", "Title"), heading("h2", "Part")]);
        let options = ConversionOptions {
            generate_toc: true,
            ..ConversionOptions::default()
        };

        let out = convert(&page, options);
        assert!(out.starts_with("## Table of Contents"));
        assert!(out.contains("- [Title](#title)"));
        assert!(out.contains("  - [Part](#part)"));
        assert!(out.contains("# Title"));
    }

    #[test]
    fn test_toc_ignored_for_html() {
        let page = page(vec![heading("h1", "Title")]);
        let options = ConversionOptions {
            format: OutputFormat::Html,
            generate_toc: true,
            ..ConversionOptions::default()
        };
        assert!(!convert(&page, options).contains("Table of Contents"));
    }

    #[test]
    fn test_tidy_blocks() {
        assert_eq!(tidy_blocks("\n\na\n  \n\n\n\nb\n\n"), "a\n\nb");
    }
}
