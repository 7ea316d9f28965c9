//! URL handling module for opencrawl
//!
//! This module provides URL normalization and the same-domain test used to
//! keep crawls on the starting site. Normalized URLs are the identity key for
//! visited sets and site-map nodes.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::{extract_domain, same_domain};
pub use normalize::{normalize_url, resolve_link};
