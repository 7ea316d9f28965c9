//! HTML extraction: boilerplate removal, main content, links and title
//!
//! Removal happens while the parsed document is copied into an owned
//! [`ContentTree`], so nothing downstream ever sees a removed element:
//!
//! - `<header>`, `<nav>` and `<footer>` elements
//! - any element whose `id` or `class` attribute contains `"footer"`
//!   (substring, case-sensitive: `site-footer-links` and `prefooter` both go)
//! - `<script>`, `<style>`, `<noscript>` and `<template>`
//! - symbol markers: `doc-symbol`/`headerlink`/`meth` class tokens and
//!   self-link anchors whose only text is a glyph such as `¶`

use crate::convert::{collapse_whitespace, ContentNode, ContentTree, Element, ExtractedPage};
use crate::url::resolve_link;
use crate::ExtractError;
use scraper::{ElementRef, Html, Node, Selector};
use std::collections::HashSet;
use url::Url;

const BOILERPLATE_TAGS: &[&str] = &["header", "nav", "footer"];

const NON_CONTENT_TAGS: &[&str] = &["script", "style", "noscript", "template"];

const FOOTER_MARKER: &str = "footer";

const SYMBOL_CLASSES: &[&str] = &["doc-symbol", "headerlink", "meth"];

const SELF_LINK_GLYPHS: &[&str] = &["¶", "§", "#", "🔗"];

/// Attributes holding URLs that are rewritten to absolute form
const URL_ATTRIBUTES: &[&str] = &["href", "src"];

/// Element nesting beyond this depth fails extraction
///
/// Every consumer of the content tree walks it, so the bound applies once
/// here rather than in each renderer.
pub const MAX_NESTING_DEPTH: usize = 256;

/// Parses a page and extracts its main content, title and outbound links
///
/// # Main Content
///
/// After removal, the first `<main>` element is the content; without one the
/// `<body>` is used, and failing that the whole document.
///
/// # Link Extraction Rules
///
/// Links come from `<a href>` elements of the content only, resolved against
/// `page_url` and normalized. Excluded: `javascript:`, `mailto:`, `tel:`,
/// `data:`, fragment-only links and `<a download>`. Duplicates are dropped,
/// first occurrence order is kept. Foreign-domain links are returned too.
///
/// # Errors
///
/// Empty or markup-free bodies fail, as do documents whose elements nest
/// deeper than [`MAX_NESTING_DEPTH`].
///
/// # Example
///
/// ```
/// use opencrawl::crawler::extract;
/// use url::Url;
///
/// let html = r#"<html><head><title>Test</title></head>
///     <body><nav><a href="/menu">Menu</a></nav><p><a href="/page">Link</a></p></body></html>"#;
/// let page = extract(html, &Url::parse("https://example.com/").unwrap()).unwrap();
/// assert_eq!(page.title.as_deref(), Some("Test"));
/// assert_eq!(page.links.len(), 1);
/// assert_eq!(page.links[0].as_str(), "https://example.com/page");
/// ```
pub fn extract(html: &str, page_url: &Url) -> Result<ExtractedPage, ExtractError> {
    check_markup(html)?;

    let document = Html::parse_document(html);

    let content = build_element(document.root_element(), page_url, 0)?
        .map(main_content)
        .unwrap_or_default();

    let title = extract_title(&document).or_else(|| first_heading(&content));
    let links = collect_links(&content, page_url);

    Ok(ExtractedPage {
        url: page_url.clone(),
        title,
        content,
        links,
    })
}

/// Link-only extraction, used when the content itself is not needed
pub fn extract_links(html: &str, page_url: &Url) -> Result<Vec<Url>, ExtractError> {
    extract(html, page_url).map(|page| page.links)
}

/// Rejects bodies that cannot be an HTML document
fn check_markup(html: &str) -> Result<(), ExtractError> {
    if html.trim().is_empty() {
        return Err(ExtractError::EmptyDocument);
    }
    if !html.contains('<') {
        return Err(ExtractError::NotMarkup);
    }
    Ok(())
}

/// Extracts the page title from the HTML document
fn extract_title(document: &Html) -> Option<String> {
    let title_selector = Selector::parse("title").ok()?;

    document
        .select(&title_selector)
        .next()
        .map(|element| collapse_whitespace(&element.text().collect::<String>()))
        .map(|title| title.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn first_heading(content: &ContentTree) -> Option<String> {
    content
        .elements()
        .find(|el| el.tag == "h1")
        .map(|el| collapse_whitespace(&el.text_content()).trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Copies a parsed element into the owned tree, dropping removed subtrees
fn build_element(
    element: ElementRef<'_>,
    page_url: &Url,
    depth: usize,
) -> Result<Option<Element>, ExtractError> {
    if is_removed(element) {
        return Ok(None);
    }
    if depth >= MAX_NESTING_DEPTH {
        return Err(ExtractError::TooDeep(MAX_NESTING_DEPTH));
    }

    let value = element.value();
    let attrs = value
        .attrs()
        .map(|(name, v)| (name.to_string(), absolutize(name, v, page_url)))
        .collect();

    let mut children = Vec::new();
    for child in element.children() {
        if let Some(child_element) = ElementRef::wrap(child) {
            if let Some(built) = build_element(child_element, page_url, depth + 1)? {
                children.push(ContentNode::Element(built));
            }
        } else if let Node::Text(text) = child.value() {
            children.push(ContentNode::Text(String::from(&**text)));
        }
    }

    Ok(Some(Element {
        tag: value.name().to_ascii_lowercase(),
        attrs,
        children,
    }))
}

fn is_removed(element: ElementRef<'_>) -> bool {
    let value = element.value();
    let tag = value.name();

    if BOILERPLATE_TAGS.contains(&tag) || NON_CONTENT_TAGS.contains(&tag) {
        return true;
    }

    let footer_like = ["id", "class"]
        .iter()
        .any(|attr| value.attr(attr).is_some_and(|v| v.contains(FOOTER_MARKER)));
    if footer_like {
        return true;
    }

    if value.classes().any(|class| SYMBOL_CLASSES.contains(&class)) {
        return true;
    }

    tag == "a" && is_self_link_glyph(element)
}

/// Anchors like `<a href="#install">¶</a>` that site generators attach to headings
fn is_self_link_glyph(anchor: ElementRef<'_>) -> bool {
    let points_to_fragment = anchor
        .value()
        .attr("href")
        .is_some_and(|href| href.trim_start().starts_with('#'));
    if !points_to_fragment {
        return false;
    }
    let text = anchor.text().collect::<String>();
    SELF_LINK_GLYPHS.contains(&text.trim())
}

/// Rewrites relative `href`/`src` values to absolute URLs
///
/// Fragment-only and special-scheme values are kept as written.
fn absolutize(name: &str, value: &str, page_url: &Url) -> String {
    if !URL_ATTRIBUTES.contains(&name) {
        return value.to_string();
    }
    let trimmed = value.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return value.to_string();
    }
    match page_url.join(trimmed) {
        Ok(absolute) => absolute.to_string(),
        Err(_) => value.to_string(),
    }
}

/// Picks the first `<main>`, else `<body>`, else the whole tree
fn main_content(root: Element) -> ContentTree {
    let whole = ContentTree::new(vec![ContentNode::Element(root)]);

    let selected = whole
        .elements()
        .find(|el| el.tag == "main")
        .or_else(|| whole.elements().find(|el| el.tag == "body"))
        .cloned();

    match selected {
        Some(element) => ContentTree::new(vec![ContentNode::Element(element)]),
        None => whole,
    }
}

fn collect_links(content: &ContentTree, page_url: &Url) -> Vec<Url> {
    let mut seen = HashSet::new();
    content
        .elements()
        .filter(|el| el.tag == "a" && el.attr("download").is_none())
        .filter_map(|el| el.attr("href"))
        .filter_map(|href| resolve_link(href, page_url))
        .filter(|url| seen.insert(url.clone()))
        .collect()
}
