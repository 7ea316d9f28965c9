//! Shared fixtures for the integration tests

use opencrawl::config::FetcherConfig;
use opencrawl::crawler::Fetcher;
use opencrawl::output::OutputLayout;
use opencrawl::{FsWriter, MemoryWriter, Session};
use std::path::Path;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub fn fetcher() -> Fetcher {
    let config = FetcherConfig {
        timeout_secs: 5,
        connect_timeout_secs: 2,
        user_agent: "opencrawl-tests".to_string(),
    };
    Fetcher::new(&config).expect("Failed to build fetcher")
}

pub fn memory_session() -> Session<MemoryWriter> {
    Session::new(fetcher(), MemoryWriter::new(), OutputLayout::new("/out"))
}

pub fn fs_session(root: &Path) -> Session<FsWriter> {
    Session::new(fetcher(), FsWriter::new(), OutputLayout::new(root))
}

/// Serves `body` as an HTML page at `route`
pub async fn mount_html(server: &MockServer, route: &str, body: impl Into<String>) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body.into())
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// A page with a title, a heading and one paragraph link per href
pub fn page_with_links(title: &str, hrefs: &[&str]) -> String {
    let links: String = hrefs
        .iter()
        .map(|href| format!(r#"<p><a href="{}">{}</a></p>"#, href, href))
        .collect();
    format!(
        r#"<html><head><title>{title}</title></head><body>
        <header><a href="/header-only">Header</a></header>
        <nav><a href="/nav-only">Menu</a></nav>
        <main><h1>{title}</h1>{links}</main>
        <footer><a href="/footer-only">Footer</a></footer>
        </body></html>"#
    )
}

/// Fails the test if `route` is ever requested
pub async fn forbid(server: &MockServer, route: &str) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(server)
        .await;
}

pub async fn request_count(server: &MockServer, route: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.url.path() == route)
        .count()
}
