//! The four top-level operations
//!
//! A [`Session`] pairs a [`Fetcher`] with an injected [`OutputWriter`] and an
//! output layout. Each operation owns its traversal state for the duration
//! of the call; nothing is carried between calls except the writer.

use crate::config::Config;
use crate::convert::{convert, ConversionOptions, OutputFormat};
use crate::crawler::{fetch_page, CrawlEngine, CrawlReport, ExtractMode, Fetcher};
use crate::output::{
    custom_base, timestamped_name, with_front_matter, FsWriter, OutputLayout, OutputTarget,
    OutputWriter, SITE_MAP_BASENAME,
};
use crate::sitemap::{render, MapReport, SiteMapBuilder};
use crate::state::PageOutcome;
use crate::url::normalize_url;
use crate::Result;
use std::path::{Path, PathBuf};

/// Runs conversions, crawls and site maps against one writer
pub struct Session<W> {
    fetcher: Fetcher,
    writer: W,
    layout: OutputLayout,
}

impl Session<FsWriter> {
    /// Creates a filesystem-backed session from a loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(
            Fetcher::new(&config.fetcher)?,
            FsWriter::new(),
            OutputLayout::new(&config.output.root),
        ))
    }
}

impl<W: OutputWriter> Session<W> {
    pub fn new(fetcher: Fetcher, writer: W, layout: OutputLayout) -> Self {
        Self {
            fetcher,
            writer,
            layout,
        }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Converts one page and writes it under `output/`
    ///
    /// Returns the written path, or `None` when the URL is invalid or the
    /// page could not be fetched, parsed or written. The reason is logged.
    pub async fn single_page_convert(
        &mut self,
        url: &str,
        options: ConversionOptions,
        custom_filename: Option<&str>,
    ) -> Option<PathBuf> {
        let url = match normalize_url(url) {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Invalid URL {:?}: {}", url, e);
                return None;
            }
        };

        tracing::info!("Converting {} to {}", url, options.format);

        let result = fetch_page(&self.fetcher, &url, 0, ExtractMode::Full).await;
        if let PageOutcome::Failed(kind) = result.outcome {
            tracing::warn!("Could not convert {}: {}", url, kind);
            return None;
        }

        let page = result.into_page();

        let mut body = convert(&page, options);
        if options.format == OutputFormat::Markdown {
            body = with_front_matter(page.title.as_deref(), &body);
        }

        let base = match custom_filename.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => custom_base(name, options.format),
            None => timestamped_name(&page.url),
        };
        let target = OutputTarget::new(
            self.layout.single_page_dir(),
            base,
            options.format.extension(),
        );

        match self.writer.write(body.as_bytes(), &target) {
            Ok(path) => {
                tracing::info!("Saved {} to {}", page.url, path.display());
                Some(path)
            }
            Err(e) => {
                tracing::warn!("Failed to write {}: {}", page.url, e);
                None
            }
        }
    }

    /// Crawls same-domain pages up to `max_depth` into `recursive_crawl/`
    pub async fn recursive_crawl(
        &mut self,
        url: &str,
        max_depth: u32,
        options: ConversionOptions,
    ) -> Result<CrawlReport> {
        let dir = self.layout.crawl_dir();
        self.crawl_into(url, max_depth, options, &dir).await
    }

    /// Builds the site map of every reachable same-domain page into `site_map/`
    pub async fn map_only(&mut self, url: &str, options: ConversionOptions) -> Result<MapReport> {
        let dir = self.layout.site_map_dir();
        self.map_into(url, options.format, &dir).await
    }

    /// Runs a crawl, then a site map traversal, both into `crawl_and_map/`
    pub async fn recursive_crawl_and_map(
        &mut self,
        url: &str,
        max_depth: u32,
        options: ConversionOptions,
    ) -> Result<(CrawlReport, MapReport)> {
        let dir = self.layout.crawl_and_map_dir();
        let crawl = self.crawl_into(url, max_depth, options, &dir).await?;
        let map = self.map_into(url, options.format, &dir).await?;
        Ok((crawl, map))
    }

    async fn crawl_into(
        &mut self,
        url: &str,
        max_depth: u32,
        options: ConversionOptions,
        dir: &Path,
    ) -> Result<CrawlReport> {
        let root = normalize_url(url)?;
        let report = CrawlEngine::new(&self.fetcher, options, max_depth)
            .run(&root, &mut self.writer, dir)
            .await;
        Ok(report)
    }

    async fn map_into(&mut self, url: &str, format: OutputFormat, dir: &Path) -> Result<MapReport> {
        let root = normalize_url(url)?;
        let mut report = SiteMapBuilder::new(&self.fetcher).build(&root).await;

        let rendered = render(&report.graph, format);
        let target = OutputTarget::new(dir, SITE_MAP_BASENAME, format.extension());
        let path = self.writer.write(rendered.as_bytes(), &target)?;
        tracing::info!("Site map saved to {}", path.display());

        report.path = Some(path);
        Ok(report)
    }
}
