//! Recursive crawl scenarios

use crate::common::{forbid, fs_session, memory_session, mount_html, page_with_links, request_count};
use opencrawl::state::FailureKind;
use opencrawl::{ConversionOptions, FetchError, OutputFormat};
use tempfile::TempDir;
use wiremock::MockServer;

#[tokio::test]
async fn test_foreign_links_are_never_fetched() {
    let server = MockServer::start().await;
    let port = server.address().port();

    // 127.0.0.1 and localhost are different hosts to the crawler
    let foreign = format!("http://localhost:{}/x", port);
    mount_html(&server, "/", page_with_links("Home", &["/a", foreign.as_str()])).await;
    mount_html(&server, "/a", page_with_links("A", &[])).await;
    forbid(&server, "/x").await;

    let mut session = memory_session();
    let report = session
        .recursive_crawl(&server.uri(), 1, ConversionOptions::default())
        .await
        .expect("crawl failed");

    let converted: Vec<&str> = report.pages.iter().map(|p| p.url.path()).collect();
    assert_eq!(converted, vec!["/", "/a"]);
    assert_eq!(report.skipped_external, 1);
    assert!(report.failures.is_empty());
}

#[tokio::test]
async fn test_boilerplate_links_are_not_followed() {
    let server = MockServer::start().await;
    mount_html(&server, "/", page_with_links("Home", &[])).await;
    forbid(&server, "/header-only").await;
    forbid(&server, "/nav-only").await;
    forbid(&server, "/footer-only").await;

    let mut session = memory_session();
    let report = session
        .recursive_crawl(&server.uri(), 3, ConversionOptions::default())
        .await
        .unwrap();

    assert_eq!(report.pages.len(), 1);
}

#[tokio::test]
async fn test_depth_bound_is_inclusive() {
    let server = MockServer::start().await;
    mount_html(&server, "/", page_with_links("Root", &["/d1"])).await;
    mount_html(&server, "/d1", page_with_links("D1", &["/d2"])).await;
    mount_html(&server, "/d2", page_with_links("D2", &["/d3"])).await;
    forbid(&server, "/d3").await;

    let mut session = memory_session();
    let report = session
        .recursive_crawl(&server.uri(), 2, ConversionOptions::default())
        .await
        .unwrap();

    let depths: Vec<(&str, u32)> = report.pages.iter().map(|p| (p.url.path(), p.depth)).collect();
    assert_eq!(depths, vec![("/", 0), ("/d1", 1), ("/d2", 2)]);
    assert!(report.pages.iter().all(|p| p.depth <= 2));
}

#[tokio::test]
async fn test_page_reachable_twice_is_fetched_once() {
    let server = MockServer::start().await;
    mount_html(&server, "/", page_with_links("Root", &["/a", "/b", "/shared#top"])).await;
    mount_html(&server, "/a", page_with_links("A", &["/shared", "/b/"])).await;
    mount_html(&server, "/b", page_with_links("B", &["/shared", "/"])).await;
    mount_html(&server, "/shared", page_with_links("Shared", &["/a"])).await;

    let mut session = memory_session();
    let report = session
        .recursive_crawl(&server.uri(), 5, ConversionOptions::default())
        .await
        .unwrap();

    assert_eq!(report.pages.len(), 4);
    for route in ["/", "/a", "/b", "/shared"] {
        assert_eq!(request_count(&server, route).await, 1, "{} fetched more than once", route);
    }
    assert_eq!(session.writer().len(), 4);
}

#[tokio::test]
async fn test_bfs_order_follows_discovery() {
    let server = MockServer::start().await;
    mount_html(&server, "/", page_with_links("Root", &["/z", "/a"])).await;
    mount_html(&server, "/z", page_with_links("Z", &["/z/deep"])).await;
    mount_html(&server, "/a", page_with_links("A", &[])).await;
    mount_html(&server, "/z/deep", page_with_links("Deep", &[])).await;

    let mut session = memory_session();
    let report = session
        .recursive_crawl(&server.uri(), 2, ConversionOptions::default())
        .await
        .unwrap();

    let order: Vec<&str> = report.pages.iter().map(|p| p.url.path()).collect();
    assert_eq!(order, vec!["/", "/z", "/a", "/z/deep"]);
}

#[tokio::test]
async fn test_failed_pages_are_recorded_and_skipped() {
    let server = MockServer::start().await;
    mount_html(&server, "/", page_with_links("Root", &["/missing", "/ok"])).await;
    mount_html(&server, "/ok", page_with_links("Ok", &[])).await;

    let mut session = memory_session();
    let report = session
        .recursive_crawl(&server.uri(), 1, ConversionOptions::default())
        .await
        .unwrap();

    assert_eq!(report.pages.len(), 2);
    assert_eq!(report.failures.len(), 1);
    let (url, kind) = &report.failures[0];
    assert_eq!(url.path(), "/missing");
    assert_eq!(kind, &FailureKind::Fetch(FetchError::Http { status: 404 }));
}

#[tokio::test]
async fn test_crawl_writes_files_under_recursive_crawl() {
    let server = MockServer::start().await;
    mount_html(&server, "/", page_with_links("Root", &["/docs/intro"])).await;
    mount_html(&server, "/docs/intro", page_with_links("Intro", &[])).await;

    let dir = TempDir::new().unwrap();
    let mut session = fs_session(dir.path());
    let options = ConversionOptions::default().with_format(OutputFormat::Html);
    let report = session.recursive_crawl(&server.uri(), 1, options).await.unwrap();

    let crawl_dir = dir.path().join("recursive_crawl").canonicalize().unwrap();
    assert_eq!(report.pages.len(), 2);
    for page in &report.pages {
        assert!(page.path.starts_with(&crawl_dir));
        assert_eq!(page.path.extension().unwrap(), "html");
        let html = std::fs::read_to_string(&page.path).unwrap();
        assert!(!html.contains("<nav"));
        assert!(!html.contains("Footer"));
    }
    assert!(report.pages[1]
        .path
        .file_name()
        .unwrap()
        .to_string_lossy()
        .ends_with("_docs_intro.html"));
}

#[tokio::test]
async fn test_invalid_root_url_is_an_error() {
    let mut session = memory_session();
    let result = session
        .recursive_crawl("javascript:alert(1)", 1, ConversionOptions::default())
        .await;
    assert!(matches!(result, Err(opencrawl::CrawlError::Url(_))));
}
