//! Owned content tree produced by extraction
//!
//! The tree is detached from the parser's arena so conversion can be a plain
//! function of the tree and the options, with no lifetimes tied to a parsed
//! document.

/// One node of the cleaned content tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentNode {
    Element(Element),
    Text(String),
}

/// An element with its attributes in source order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<ContentNode>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns the value of attribute `name`, if present
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Heading level for `h1`..`h6`
    pub fn heading_level(&self) -> Option<usize> {
        match self.tag.as_str() {
            "h1" => Some(1),
            "h2" => Some(2),
            "h3" => Some(3),
            "h4" => Some(4),
            "h5" => Some(5),
            "h6" => Some(6),
            _ => None,
        }
    }

    /// Concatenated raw text of all descendants
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(&self.children, &mut text);
        text
    }

    /// Element children, skipping text nodes
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            ContentNode::Element(el) => Some(el),
            ContentNode::Text(_) => None,
        })
    }
}

// Children are detached onto a heap stack so dropping a deep tree does not
// recurse once per level.
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let ContentNode::Element(mut el) = node {
                pending.append(&mut el.children);
            }
        }
    }
}

fn collect_text(nodes: &[ContentNode], out: &mut String) {
    let mut stack: Vec<&ContentNode> = nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        match node {
            ContentNode::Text(t) => out.push_str(t),
            ContentNode::Element(el) => stack.extend(el.children.iter().rev()),
        }
    }
}

/// The main content of a page after boilerplate removal
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentTree {
    pub nodes: Vec<ContentNode>,
}

impl ContentTree {
    pub fn new(nodes: Vec<ContentNode>) -> Self {
        Self { nodes }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over every element in document order
    pub fn elements(&self) -> Elements<'_> {
        Elements {
            stack: self.nodes.iter().rev().collect(),
        }
    }

    /// Concatenated raw text of the whole tree
    pub fn text_content(&self) -> String {
        let mut text = String::new();
        collect_text(&self.nodes, &mut text);
        text
    }

    /// Headings as `(level, text)` in document order, empty ones skipped
    pub fn headings(&self) -> Vec<(usize, String)> {
        self.elements()
            .filter_map(|el| {
                let level = el.heading_level()?;
                let text = collapse_whitespace(&el.text_content()).trim().to_string();
                (!text.is_empty()).then_some((level, text))
            })
            .collect()
    }
}

/// Depth-first pre-order iterator over the elements of a tree
pub struct Elements<'a> {
    stack: Vec<&'a ContentNode>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if let ContentNode::Element(el) = node {
                self.stack.extend(el.children.iter().rev());
                return Some(el);
            }
        }
        None
    }
}

/// Collapses every whitespace run to a single space
pub fn collapse_whitespace(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;
    for c in text.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push(' ');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
