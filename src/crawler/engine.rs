//! Breadth-first crawl engine
//!
//! The engine drives one bounded-depth traversal:
//! 1. Pop the next unvisited URL from the frontier and mark it visited
//! 2. Fetch and extract it; a failure is recorded and the loop moves on
//! 3. Enqueue same-domain, unvisited links one level deeper, unless the
//!    page already sits at the depth bound
//! 4. Convert the page and hand it to the output writer
//!
//! Pages are processed strictly in FIFO order, one fetch at a time.

use crate::convert::{convert, ConversionOptions, ExtractedPage, OutputFormat};
use crate::crawler::extractor::{extract, extract_links};
use crate::crawler::fetcher::Fetcher;
use crate::output::{page_slug, with_front_matter, OutputTarget, OutputWriter};
use crate::state::{CrawlState, FailureKind, PageOutcome, PageResult};
use crate::url::extract_domain;
use std::path::{Path, PathBuf};
use url::Url;

/// How much of a page a traversal needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// Content tree, title and links
    Full,
    /// Links only; the content tree is dropped
    LinksOnly,
}

/// Fetches and extracts one page, folding every failure into the result
pub async fn fetch_page(
    fetcher: &Fetcher,
    url: &Url,
    depth: u32,
    mode: ExtractMode,
) -> PageResult {
    let body = match fetcher.fetch(url).await {
        Ok(body) => body,
        Err(e) => return PageResult::failed(url.clone(), depth, FailureKind::Fetch(e)),
    };

    let extracted = match mode {
        ExtractMode::Full => {
            extract(&body, url).map(|page| (page.title, Some(page.content), page.links))
        }
        ExtractMode::LinksOnly => extract_links(&body, url).map(|links| (None, None, links)),
    };

    match extracted {
        Ok((title, content, outbound_links)) => PageResult {
            url: url.clone(),
            depth,
            title,
            content,
            outbound_links,
            outcome: PageOutcome::Fetched,
        },
        Err(e) => PageResult::failed(url.clone(), depth, FailureKind::Parse(e)),
    }
}

/// One page written by a crawl
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawledPage {
    pub url: Url,
    pub depth: u32,
    /// Where the converted page was written
    pub path: PathBuf,
}

/// Summary of a completed crawl
#[derive(Debug, Clone, Default)]
pub struct CrawlReport {
    /// Written pages, in visit order
    pub pages: Vec<CrawledPage>,
    /// Pages that could not be fetched, parsed or written
    pub failures: Vec<(Url, FailureKind)>,
    /// Foreign-domain links seen on crawled pages and not followed
    pub skipped_external: usize,
}

impl CrawlReport {
    /// Number of pages the crawl visited, successful or not
    pub fn visited(&self) -> usize {
        self.pages.len() + self.failures.len()
    }

    pub fn page(&self, url: &Url) -> Option<&CrawledPage> {
        self.pages.iter().find(|p| &p.url == url)
    }
}

/// Bounded-depth, same-domain breadth-first crawler
pub struct CrawlEngine<'a> {
    fetcher: &'a Fetcher,
    options: ConversionOptions,
    max_depth: u32,
}

impl<'a> CrawlEngine<'a> {
    /// Creates an engine
    ///
    /// `max_depth` is inclusive: the root is depth 0 and pages at
    /// `max_depth` are converted but their links are not followed.
    pub fn new(fetcher: &'a Fetcher, options: ConversionOptions, max_depth: u32) -> Self {
        Self {
            fetcher,
            options,
            max_depth,
        }
    }

    /// Crawls from `root`, writing one file per page into `output_dir`
    ///
    /// `root` must already be normalized. Per-page failures never abort the
    /// traversal; they are logged and collected in the report.
    pub async fn run<W: OutputWriter>(
        &self,
        root: &Url,
        writer: &mut W,
        output_dir: &Path,
    ) -> CrawlReport {
        let root_domain = extract_domain(root).unwrap_or_default();
        let mut state = CrawlState::new(root.clone(), root_domain);
        let mut report = CrawlReport::default();

        tracing::info!(
            "Starting crawl of {} (max depth {}, format {})",
            root,
            self.max_depth,
            self.options.format
        );

        while let Some((url, depth)) = state.next_unvisited() {
            tracing::info!("[depth {}] Crawling {}", depth, url);

            let result = fetch_page(self.fetcher, &url, depth, ExtractMode::Full).await;
            if let PageOutcome::Failed(kind) = result.outcome {
                tracing::warn!("Skipping {}: {}", url, kind);
                report.failures.push((url, kind));
                continue;
            }

            if depth < self.max_depth {
                for link in &result.outbound_links {
                    if !state.is_same_domain(link) {
                        tracing::debug!("Not following external link {}", link);
                        report.skipped_external += 1;
                    } else if !state.enqueue(link, depth + 1) {
                        tracing::debug!("Already visited or queued {}", link);
                    }
                }
            }

            let page = result.into_page();

            match self.write_page(&page, writer, output_dir) {
                Ok(path) => {
                    tracing::info!("Saved {} to {}", page.url, path.display());
                    report.pages.push(CrawledPage {
                        url: page.url,
                        depth,
                        path,
                    });
                }
                Err(e) => {
                    tracing::warn!("Failed to write {}: {}", page.url, e);
                    report.failures.push((page.url, FailureKind::Write(e.to_string())));
                }
            }
        }

        tracing::info!(
            "Crawl finished: {} pages written, {} failures, {} external links skipped",
            report.pages.len(),
            report.failures.len(),
            report.skipped_external
        );

        report
    }

    fn write_page<W: OutputWriter>(
        &self,
        page: &ExtractedPage,
        writer: &mut W,
        output_dir: &Path,
    ) -> crate::output::OutputResult<PathBuf> {
        let mut body = convert(page, self.options);
        if self.options.format == OutputFormat::Markdown {
            body = with_front_matter(page.title.as_deref(), &body);
        }
        let target = OutputTarget::new(
            output_dir,
            page_slug(&page.url),
            self.options.format.extension(),
        );
        writer.write(body.as_bytes(), &target)
    }
}
