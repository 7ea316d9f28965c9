//! State module for tracking traversal progress
//!
//! # Components
//!
//! - `CrawlState`: visited set and FIFO frontier owned by one traversal
//! - `PageResult`: the transient outcome of fetching and extracting one page

mod crawl_state;
mod page_result;

// Re-export main types
pub use crawl_state::CrawlState;
pub use page_result::{FailureKind, PageOutcome, PageResult};
