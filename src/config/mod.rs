//! Configuration module for opencrawl
//!
//! This module handles loading, parsing, and validating the optional TOML
//! configuration file. Every section and key has a default, so an empty file
//! (or no file at all) yields a working configuration.
//!
//! # Example
//!
//! ```no_run
//! use opencrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("opencrawl.toml")).unwrap();
//! println!("Fetch timeout: {}s", config.fetcher.timeout_secs);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, DefaultsConfig, FetcherConfig, OutputConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash};
pub use validation::validate;
