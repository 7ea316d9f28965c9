use crate::convert::{ConversionOptions, OutputFormat};
use serde::Deserialize;

/// Main configuration structure for opencrawl
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fetcher: FetcherConfig,
    pub output: OutputConfig,
    pub defaults: DefaultsConfig,
}

/// HTTP fetcher configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FetcherConfig {
    /// Total request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,

    /// Connection establishment timeout (seconds)
    #[serde(rename = "connect-timeout-secs")]
    pub connect_timeout_secs: u64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            connect_timeout_secs: 10,
            user_agent: format!("opencrawl/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory under which the per-operation output directories are created
    pub root: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            root: ".".to_string(),
        }
    }
}

/// Default conversion settings, overridable from the command line
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub format: OutputFormat,

    #[serde(rename = "keep-images")]
    pub keep_images: bool,

    #[serde(rename = "keep-links")]
    pub keep_links: bool,

    #[serde(rename = "keep-emphasis")]
    pub keep_emphasis: bool,

    #[serde(rename = "generate-toc")]
    pub generate_toc: bool,

    #[serde(rename = "max-depth")]
    pub max_depth: u32,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Markdown,
            keep_images: true,
            keep_links: true,
            keep_emphasis: true,
            generate_toc: false,
            max_depth: 1,
        }
    }
}

impl DefaultsConfig {
    /// Builds the conversion options described by these defaults
    pub fn conversion_options(&self) -> ConversionOptions {
        ConversionOptions {
            format: self.format,
            keep_images: self.keep_images,
            keep_links: self.keep_links,
            keep_emphasis: self.keep_emphasis,
            generate_toc: self.generate_toc,
        }
    }
}
