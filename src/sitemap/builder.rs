//! Unbounded same-domain traversal that records the link graph

use crate::crawler::{fetch_page, ExtractMode, Fetcher};
use crate::sitemap::graph::SiteMapGraph;
use crate::state::{CrawlState, FailureKind, PageOutcome};
use crate::url::extract_domain;
use std::path::PathBuf;
use url::Url;

/// Result of a site map operation
#[derive(Debug, Clone)]
pub struct MapReport {
    pub graph: SiteMapGraph,
    /// Nodes that could not be fetched or parsed; present as leaves
    pub failures: Vec<(Url, FailureKind)>,
    /// Where the rendered site map was written, once persisted
    pub path: Option<PathBuf>,
}

/// Walks every reachable same-domain page, keeping only links
pub struct SiteMapBuilder<'a> {
    fetcher: &'a Fetcher,
}

impl<'a> SiteMapBuilder<'a> {
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self { fetcher }
    }

    /// Builds the link graph reachable from `root`
    ///
    /// Same FIFO discipline as the crawl engine without a depth bound. A
    /// node's edges are its same-domain links; foreign links are not part of
    /// the graph. Failed nodes stay in the graph as unexpanded leaves.
    pub async fn build(&self, root: &Url) -> MapReport {
        let root_domain = extract_domain(root).unwrap_or_default();
        let mut state = CrawlState::new(root.clone(), root_domain);
        let mut graph = SiteMapGraph::new(root.clone());
        let mut failures = Vec::new();

        tracing::info!("Building site map for {}", root);

        while let Some((url, depth)) = state.next_unvisited() {
            graph.add_node(&url);

            let result = fetch_page(self.fetcher, &url, depth, ExtractMode::LinksOnly).await;
            if let PageOutcome::Failed(kind) = result.outcome {
                tracing::warn!("Skipping {}: {}", url, kind);
                failures.push((url, kind));
                continue;
            }

            let children: Vec<Url> = result
                .outbound_links
                .into_iter()
                .filter(|link| state.is_same_domain(link))
                .collect();

            for child in &children {
                if !state.enqueue(child, depth + 1) {
                    tracing::trace!("Already visited or queued {}", child);
                }
            }

            tracing::debug!("[depth {}] {} has {} links", depth, url, children.len());
            graph.add_edges(&url, children);
        }

        tracing::info!(
            "Site map complete: {} nodes, {} edges, {} failures",
            graph.node_count(),
            graph.edge_count(),
            failures.len()
        );

        MapReport {
            graph,
            failures,
            path: None,
        }
    }
}
