//! HTML re-serialization of a cleaned content tree

use super::tree::{ContentNode, ContentTree, Element};
use super::ConversionOptions;
use html_escape::{encode_double_quoted_attribute, encode_text};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

pub(super) const IMAGE_ELEMENTS: &[&str] = &["img", "picture"];

pub(super) const EMPHASIS_ELEMENTS: &[&str] = &["em", "i", "strong", "b"];

/// Serializes the tree, applying the image/link/emphasis retention rules
///
/// - images are dropped entirely when `keep_images` is false
/// - anchors are unwrapped to their content when `keep_links` is false
/// - emphasis elements are unwrapped when `keep_emphasis` is false
pub(super) fn render(tree: &ContentTree, options: &ConversionOptions) -> String {
    render_with(tree, options, |_| None)
}

/// Like [`render`], but elements for which `replace` returns markup are
/// written as that markup instead of being serialized
pub(super) fn render_with<F>(
    tree: &ContentTree,
    options: &ConversionOptions,
    mut replace: F,
) -> String
where
    F: FnMut(&Element) -> Option<String>,
{
    let mut out = String::new();
    let mut stack: Vec<Step<'_>> = tree.nodes.iter().rev().map(Step::Node).collect();

    while let Some(step) = stack.pop() {
        let el = match step {
            Step::Close(tag) => {
                out.push_str("</");
                out.push_str(tag);
                out.push('>');
                continue;
            }
            Step::Node(ContentNode::Text(text)) => {
                out.push_str(&encode_text(text));
                continue;
            }
            Step::Node(ContentNode::Element(el)) => el,
        };
        let tag = el.tag.as_str();

        if !options.keep_images && IMAGE_ELEMENTS.contains(&tag) {
            continue;
        }

        let unwrap = (tag == "a" && !options.keep_links)
            || (!options.keep_emphasis && EMPHASIS_ELEMENTS.contains(&tag));
        if unwrap {
            push_children(el, &mut stack);
            continue;
        }

        if let Some(markup) = replace(el) {
            out.push_str(&markup);
            continue;
        }

        write_open_tag(el, &mut out);
        if VOID_ELEMENTS.contains(&tag) {
            continue;
        }
        stack.push(Step::Close(tag));
        push_children(el, &mut stack);
    }

    out
}

/// Pending serialization work, popped in document order
enum Step<'a> {
    Node(&'a ContentNode),
    Close(&'a str),
}

fn push_children<'a>(el: &'a Element, stack: &mut Vec<Step<'a>>) {
    stack.extend(el.children.iter().rev().map(Step::Node));
}

fn write_open_tag(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(&el.tag);
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&encode_double_quoted_attribute(value));
        out.push('"');
    }
    out.push('>');
}
