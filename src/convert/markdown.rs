//! HTML to Markdown transcription
//!
//! The content tree is serialized with the retention rules applied and the
//! markup is converted by `htmd`. Code blocks bypass the converter: each
//! `<pre>` is fenced straight from the tree and handed to `htmd` as a
//! placeholder, so code text is never escaped or reflowed.

use super::html::render_with;
use super::text::plain_text;
use super::tree::{collapse_whitespace, ContentTree, Element};
use super::{tidy_blocks, ConversionOptions};
use htmd::element_handler::{ElementHandler, HandlerResult, Handlers};
use htmd::options::{BulletListMarker, HeadingStyle, Options};
use htmd::{Element as HtmdElement, HtmlToMarkdown};

/// Attribute carrying a placeholder's index into the fenced code blocks
const BLOCK_ATTR: &str = "data-opencrawl-block";

pub(super) fn render(tree: &ContentTree, options: &ConversionOptions) -> String {
    let mut blocks = Vec::new();
    let source = render_with(tree, options, |el| {
        if el.tag != "pre" {
            return None;
        }
        blocks.push(code_block(el));
        let index = blocks.len() - 1;
        Some(format!(r#"<pre {}="{}">{}</pre>"#, BLOCK_ATTR, index, index))
    });

    match converter(blocks).convert(&source) {
        Ok(markdown) => tidy_blocks(&markdown),
        Err(e) => {
            tracing::warn!("Markdown conversion failed, falling back to plain text: {}", e);
            plain_text(&tree.nodes, options)
        }
    }
}

fn converter(blocks: Vec<String>) -> HtmlToMarkdown {
    HtmlToMarkdown::builder()
        .options(Options {
            heading_style: HeadingStyle::Atx,
            bullet_list_marker: BulletListMarker::Dash,
            ..Default::default()
        })
        .add_handler(vec!["pre"], CodeBlocks(blocks))
        .add_handler(vec!["em", "i", "strong", "b"], emphasis_handler)
        .add_handler(vec!["a"], link_handler)
        .add_handler(vec!["img"], image_handler)
        .build()
}

/// Pre-rendered fences, indexed by the placeholder attribute
struct CodeBlocks(Vec<String>);

impl ElementHandler for CodeBlocks {
    fn handle(&self, handlers: &dyn Handlers, element: HtmdElement) -> Option<HandlerResult> {
        let block = attr(&element, BLOCK_ATTR)
            .and_then(|index| index.parse::<usize>().ok())
            .and_then(|index| self.0.get(index));
        match block {
            Some(block) => Some(HandlerResult::from(block.as_str())),
            None => Some(handlers.walk_children(element.node)),
        }
    }
}

/// `*text*` for `em`/`i`, `**text**` for `strong`/`b`
///
/// Surrounding whitespace is moved outside the markers, which Markdown
/// requires for the emphasis to be recognized.
fn emphasis_handler(handlers: &dyn Handlers, element: HtmdElement) -> Option<HandlerResult> {
    let content = handlers.walk_children(element.node).content;
    let inner = content.trim();
    if inner.is_empty() {
        return Some(HandlerResult::from(content));
    }

    let marker = if matches!(element.tag, "strong" | "b") { "**" } else { "*" };
    let leading = &content[..content.len() - content.trim_start().len()];
    let trailing = &content[content.trim_end().len()..];
    Some(HandlerResult::from(format!(
        "{}{}{}{}{}",
        leading, marker, inner, marker, trailing
    )))
}

/// `[text](href)`; anchors without a target keep their text, empty ones vanish
fn link_handler(handlers: &dyn Handlers, element: HtmdElement) -> Option<HandlerResult> {
    let content = handlers.walk_children(element.node).content;
    let href = match attr(&element, "href") {
        Some(href) if !href.trim().is_empty() => href,
        _ => return Some(HandlerResult::from(content)),
    };

    let label = content.trim();
    if label.is_empty() {
        return Some(HandlerResult::from(""));
    }
    Some(HandlerResult::from(format!("[{}]({})", label, href.trim())))
}

fn image_handler(_handlers: &dyn Handlers, element: HtmdElement) -> Option<HandlerResult> {
    let src = attr(&element, "src").unwrap_or_default();
    if src.trim().is_empty() {
        return Some(HandlerResult::from(""));
    }
    let alt = collapse_whitespace(&attr(&element, "alt").unwrap_or_default());
    Some(HandlerResult::from(format!("![{}]({})", alt.trim(), src.trim())))
}

fn attr(element: &HtmdElement, name: &str) -> Option<String> {
    element
        .attrs
        .iter()
        .find(|a| &*a.name.local == name)
        .map(|a| a.value.to_string())
}

/// Fences a `<pre>` verbatim, tagged with its `language-*`/`lang-*` class
fn code_block(el: &Element) -> String {
    let code = el.text_content();
    let code = code.trim_matches('\n');
    if code.trim().is_empty() {
        return String::new();
    }

    let language = std::iter::once(el)
        .chain(el.child_elements().filter(|c| c.tag == "code"))
        .filter_map(|e| e.attr("class"))
        .flat_map(str::split_whitespace)
        .find_map(|class| {
            class
                .strip_prefix("language-")
                .or_else(|| class.strip_prefix("lang-"))
        })
        .unwrap_or_default();

    let fence = "`".repeat(longest_backtick_run(code).max(2) + 1);
    format!("\n\n{}{}\n{}\n{}\n\n", fence, language, code, fence)
}

fn longest_backtick_run(text: &str) -> usize {
    text.split(|c| c != '`').map(str::len).max().unwrap_or(0)
}
