//! Link graph recorded by the site map traversal

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::{HashMap, HashSet};
use url::Url;

/// Adjacency form of a site's link graph
///
/// `nodes` are visited URLs in visit order. `edges` holds one entry per
/// expanded node (fetched successfully), in expansion order; its targets are
/// the node's same-domain links in first-recorded order. Once a traversal
/// completes, every edge target is also a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteMapGraph {
    root: Url,
    nodes: Vec<Url>,
    node_set: HashSet<Url>,
    expanded: Vec<Url>,
    edges: HashMap<Url, Vec<Url>>,
}

/// One node of the tree projection, listed in pre-order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeEntry<'a> {
    pub url: &'a Url,
    /// Distance from the root in the projected tree; the root is 0
    pub level: usize,
}

impl SiteMapGraph {
    pub fn new(root: Url) -> Self {
        Self {
            root,
            nodes: Vec::new(),
            node_set: HashSet::new(),
            expanded: Vec::new(),
            edges: HashMap::new(),
        }
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    /// Records a visited node; returns false if it was already present
    pub fn add_node(&mut self, url: &Url) -> bool {
        if !self.node_set.insert(url.clone()) {
            return false;
        }
        self.nodes.push(url.clone());
        true
    }

    /// Records the outbound edges of an expanded node
    ///
    /// Duplicate targets are dropped, keeping the first occurrence. Recording
    /// a node twice appends to its existing edge list.
    pub fn add_edges(&mut self, from: &Url, targets: impl IntoIterator<Item = Url>) {
        if !self.edges.contains_key(from) {
            self.expanded.push(from.clone());
        }
        let children = self.edges.entry(from.clone()).or_default();
        for target in targets {
            if !children.contains(&target) {
                children.push(target);
            }
        }
    }

    /// Visited nodes in visit order
    pub fn nodes(&self) -> &[Url] {
        &self.nodes
    }

    pub fn contains(&self, url: &Url) -> bool {
        self.node_set.contains(url)
    }

    pub fn is_expanded(&self, url: &Url) -> bool {
        self.edges.contains_key(url)
    }

    /// Direct successors of `url`, empty for leaves and unexpanded nodes
    pub fn children(&self, url: &Url) -> &[Url] {
        self.edges.get(url).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Expanded nodes with their successors, in expansion order
    pub fn edges(&self) -> impl Iterator<Item = (&Url, &[Url])> {
        self.expanded
            .iter()
            .map(move |url| (url, self.children(url)))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    /// Projects the graph onto a tree rooted at the root URL
    ///
    /// Depth-first from the root, children in first-recorded order. A node
    /// reachable through several parents appears once, under the parent that
    /// reaches it first in this walk. The tree comes back flattened in
    /// pre-order, each entry tagged with its level, so a child always follows
    /// its parent directly or after the parent's earlier subtrees.
    pub fn tree(&self) -> Vec<TreeEntry<'_>> {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        let mut stack = vec![TreeEntry {
            url: &self.root,
            level: 0,
        }];

        while let Some(entry) = stack.pop() {
            if !seen.insert(entry.url) {
                continue;
            }
            entries.push(entry);
            stack.extend(self.children(entry.url).iter().rev().map(|child| TreeEntry {
                url: child,
                level: entry.level + 1,
            }));
        }
        entries
    }
}

impl Serialize for SiteMapGraph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.expanded.len()))?;
        for (url, children) in self.edges() {
            let targets: Vec<&str> = children.iter().map(Url::as_str).collect();
            map.serialize_entry(url.as_str(), &targets)?;
        }
        map.end()
    }
}
