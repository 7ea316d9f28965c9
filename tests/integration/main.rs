//! Integration tests for opencrawl
//!
//! These tests use wiremock to serve small sites and run the top-level
//! operations end-to-end against temporary output directories.

mod common;
mod crawl_tests;
mod dispatch_tests;
mod map_tests;
mod single_page_tests;
