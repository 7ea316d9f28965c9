//! opencrawl main entry point
//!
//! This is the command-line interface for converting, crawling and mapping
//! web pages.

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand};
use opencrawl::config::{load_config_with_hash, Config};
use opencrawl::crawler::CrawlReport;
use opencrawl::sitemap::MapReport;
use opencrawl::{dispatch, ConversionOptions, DispatchArgs, DispatchOutcome, OutputFormat, Session};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// opencrawl: fetch, clean and convert web pages
///
/// Strips headers, navigation and footers from pages and saves the main
/// content as HTML, Markdown or JSON. Pages can be converted one at a time,
/// crawled breadth-first within their domain, or mapped into a site map.
#[derive(Parser, Debug)]
#[command(name = "opencrawl")]
#[command(version)]
#[command(about = "Fetch, clean and convert web pages", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(short, long, global = true, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert a single page into the output directory
    Single {
        url: String,

        /// Base name for the output file (extension optional)
        #[arg(long)]
        filename: Option<String>,

        #[command(flatten)]
        conversion: ConversionArgs,
    },

    /// Crawl same-domain pages breadth-first, converting each one
    Crawl {
        url: String,

        /// Maximum link depth (root is depth 0)
        #[arg(long)]
        max_depth: Option<u32>,

        #[command(flatten)]
        conversion: ConversionArgs,
    },

    /// Build a site map of every reachable same-domain page
    Map {
        url: String,

        #[command(flatten)]
        conversion: ConversionArgs,
    },

    /// Crawl, then build a site map, into one directory
    CrawlAndMap {
        url: String,

        /// Maximum link depth (root is depth 0)
        #[arg(long)]
        max_depth: Option<u32>,

        #[command(flatten)]
        conversion: ConversionArgs,
    },

    /// Run an operation by name with a JSON argument object
    Dispatch {
        /// single_page, recursive_crawl, map_only or recursive_crawl_and_map
        function: String,

        /// JSON arguments, e.g. '{"url": "https://example.com", "max_depth": 2}'
        #[arg(long)]
        args: String,
    },
}

/// Conversion flags shared by the page-producing subcommands
///
/// Each retention switch comes as a `--x`/`--no-x` pair overriding the
/// configured default either way; when both are given the last one wins.
#[derive(Args, Debug)]
struct ConversionArgs {
    /// Output format: html, markdown or json
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Keep images in the output
    #[arg(long, overrides_with = "no_images")]
    images: bool,

    /// Drop images from the output
    #[arg(long, overrides_with = "images")]
    no_images: bool,

    /// Keep hyperlinks in the output
    #[arg(long, overrides_with = "no_links")]
    links: bool,

    /// Drop hyperlinks, keeping their text
    #[arg(long, overrides_with = "links")]
    no_links: bool,

    /// Keep emphasis in the output
    #[arg(long, overrides_with = "no_emphasis")]
    emphasis: bool,

    /// Drop emphasis, keeping its text
    #[arg(long, overrides_with = "emphasis")]
    no_emphasis: bool,

    /// Prepend a table of contents (Markdown only)
    #[arg(long, overrides_with = "no_toc")]
    toc: bool,

    /// Omit the table of contents
    #[arg(long, overrides_with = "toc")]
    no_toc: bool,
}

impl ConversionArgs {
    /// Applies the flags on top of the configured defaults
    fn apply(&self, defaults: ConversionOptions) -> ConversionOptions {
        ConversionOptions {
            format: self.format.unwrap_or(defaults.format),
            keep_images: switch(self.images, self.no_images).unwrap_or(defaults.keep_images),
            keep_links: switch(self.links, self.no_links).unwrap_or(defaults.keep_links),
            keep_emphasis: switch(self.emphasis, self.no_emphasis)
                .unwrap_or(defaults.keep_emphasis),
            generate_toc: switch(self.toc, self.no_toc).unwrap_or(defaults.generate_toc),
        }
    }
}

/// Collapses a `--x`/`--no-x` pair; `None` when neither was given
fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = load_configuration(cli.config.as_ref())?;
    let defaults = config.defaults.conversion_options();
    let mut session = Session::from_config(&config).context("Failed to build HTTP client")?;

    match cli.command {
        Command::Single {
            url,
            filename,
            conversion,
        } => {
            let options = conversion.apply(defaults);
            match session
                .single_page_convert(&url, options, filename.as_deref())
                .await
            {
                Some(path) => println!("Saved {}", path.display()),
                None => bail!("Could not convert {}", url),
            }
        }
        Command::Crawl {
            url,
            max_depth,
            conversion,
        } => {
            let max_depth = max_depth.unwrap_or(config.defaults.max_depth);
            let report = session
                .recursive_crawl(&url, max_depth, conversion.apply(defaults))
                .await?;
            print_crawl_report(&report);
        }
        Command::Map { url, conversion } => {
            let report = session.map_only(&url, conversion.apply(defaults)).await?;
            print_map_report(&report);
        }
        Command::CrawlAndMap {
            url,
            max_depth,
            conversion,
        } => {
            let max_depth = max_depth.unwrap_or(config.defaults.max_depth);
            let (crawl, map) = session
                .recursive_crawl_and_map(&url, max_depth, conversion.apply(defaults))
                .await?;
            print_crawl_report(&crawl);
            print_map_report(&map);
        }
        Command::Dispatch { function, args } => {
            let args = DispatchArgs::from_json(&args)?;
            match dispatch(&mut session, &function, args).await? {
                DispatchOutcome::SinglePage(Some(path)) => println!("Saved {}", path.display()),
                DispatchOutcome::SinglePage(None) => bail!("Conversion produced no output"),
                DispatchOutcome::Crawl(report) => print_crawl_report(&report),
                DispatchOutcome::Map(report) => print_map_report(&report),
                DispatchOutcome::CrawlAndMap(crawl, map) => {
                    print_crawl_report(&crawl);
                    print_map_report(&map);
                }
            }
        }
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("opencrawl=info,warn"),
            1 => EnvFilter::new("opencrawl=debug,info"),
            2 => EnvFilter::new("opencrawl=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the configuration file if one was given, defaults otherwise
fn load_configuration(path: Option<&PathBuf>) -> anyhow::Result<Config> {
    let Some(path) = path else {
        tracing::debug!("No configuration file given, using defaults");
        return Ok(Config::default());
    };

    tracing::info!("Loading configuration from: {}", path.display());
    match load_config_with_hash(path) {
        Ok((config, hash)) => {
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok(config)
        }
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            Err(e.into())
        }
    }
}

fn print_crawl_report(report: &CrawlReport) {
    println!("=== Crawl Summary ===\n");
    println!("Pages written: {}", report.pages.len());
    for page in &report.pages {
        println!("  [{}] {} -> {}", page.depth, page.url, page.path.display());
    }

    if !report.failures.is_empty() {
        println!("\nFailures ({}):", report.failures.len());
        for (url, kind) in &report.failures {
            println!("  - {}: {}", url, kind);
        }
    }

    println!("\nExternal links skipped: {}", report.skipped_external);
}

fn print_map_report(report: &MapReport) {
    println!("=== Site Map Summary ===\n");
    println!("Pages mapped: {}", report.graph.node_count());
    println!("Links recorded: {}", report.graph.edge_count());
    if !report.failures.is_empty() {
        println!("Unreachable pages: {}", report.failures.len());
    }
    if let Some(path) = &report.path {
        println!("Site map saved to: {}", path.display());
    }
}
