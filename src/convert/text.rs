//! Plain text extraction and the JSON page record

use super::html::IMAGE_ELEMENTS;
use super::tree::{collapse_whitespace, ContentNode, Element};
use super::{tidy_blocks, to_pretty_json, ConversionOptions, ExtractedPage};
use serde::Serialize;

const BLOCK_ELEMENTS: &[&str] = &[
    "address", "article", "aside", "blockquote", "body", "dd", "details", "div", "dl", "dt",
    "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr",
    "main", "ol", "p", "section", "summary", "table", "ul",
];

/// Flat JSON record for one page
#[derive(Debug, Serialize)]
struct TextRecord<'a> {
    url: &'a str,
    title: Option<&'a str>,
    text: String,
}

pub(super) fn render_record(page: &ExtractedPage, options: &ConversionOptions) -> String {
    let record = TextRecord {
        url: page.url.as_str(),
        title: page.title.as_deref(),
        text: plain_text(&page.content.nodes, options),
    };
    to_pretty_json(&record)
}

/// Plain text with block breaks and the retention rules applied
///
/// Emphasis carries no markup in plain text; kept links append their target
/// in parentheses and kept images contribute their alt text.
pub(super) fn plain_text(nodes: &[ContentNode], options: &ConversionOptions) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(node, options, &mut out);
    }
    tidy_blocks(&out)
}

fn write_node(node: &ContentNode, options: &ConversionOptions, out: &mut String) {
    match node {
        ContentNode::Text(text) => out.push_str(&collapse_whitespace(text)),
        ContentNode::Element(el) => write_element(el, options, out),
    }
}

fn write_element(el: &Element, options: &ConversionOptions, out: &mut String) {
    let tag = el.tag.as_str();

    if IMAGE_ELEMENTS.contains(&tag) {
        if options.keep_images {
            let alt = el
                .attr("alt")
                .or_else(|| el.child_elements().find_map(|img| img.attr("alt")))
                .map(collapse_whitespace)
                .unwrap_or_default();
            out.push_str(alt.trim());
        }
        return;
    }

    match tag {
        "br" => out.push('\n'),
        "pre" => {
            out.push_str("\n\n");
            out.push_str(el.text_content().trim_matches('\n'));
            out.push_str("\n\n");
        }
        "a" => {
            let mut label = String::new();
            for child in &el.children {
                write_node(child, options, &mut label);
            }
            out.push_str(&label);
            if let Some(href) = el.attr("href").filter(|_| options.keep_links) {
                let label = label.trim();
                if !label.is_empty() && label != href {
                    out.push_str(" (");
                    out.push_str(href);
                    out.push(')');
                }
            }
        }
        "li" | "tr" => {
            out.push('\n');
            write_children(el, options, out);
            out.push('\n');
        }
        "td" | "th" => {
            write_children(el, options, out);
            out.push('\t');
        }
        _ if BLOCK_ELEMENTS.contains(&tag) => {
            out.push_str("\n\n");
            write_children(el, options, out);
            out.push_str("\n\n");
        }
        _ => write_children(el, options, out),
    }
}

fn write_children(el: &Element, options: &ConversionOptions, out: &mut String) {
    for child in &el.children {
        write_node(child, options, out);
    }
}
