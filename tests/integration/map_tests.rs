//! Site map scenarios

use crate::common::{fs_session, memory_session, mount_html, page_with_links, request_count};
use opencrawl::{ConversionOptions, OutputFormat};
use std::path::Path;
use tempfile::TempDir;
use wiremock::MockServer;

/// A -> B, A -> C, B -> C
async fn abc_site() -> MockServer {
    let server = MockServer::start().await;
    mount_html(&server, "/", page_with_links("A", &["/b", "/c"])).await;
    mount_html(&server, "/b", page_with_links("B", &["/c"])).await;
    mount_html(&server, "/c", page_with_links("C", &[])).await;
    server
}

fn options(format: OutputFormat) -> ConversionOptions {
    ConversionOptions::default().with_format(format)
}

#[tokio::test]
async fn test_json_adjacency_is_graph_complete() {
    let server = abc_site().await;
    let base = server.uri();

    let mut session = memory_session();
    let report = session
        .map_only(&base, options(OutputFormat::Json))
        .await
        .unwrap();

    let path = report.path.expect("site map not written");
    assert_eq!(path, Path::new("/out/site_map/site_map.json"));

    let json = session.writer().get_str(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(json).unwrap();
    let expected = serde_json::json!({
        format!("{}/", base): [format!("{}/b", base), format!("{}/c", base)],
        format!("{}/b", base): [format!("{}/c", base)],
        format!("{}/c", base): [],
    });
    assert_eq!(value, expected);

    // Expansion order is kept in the file
    let a = json.find(&format!("\"{}/\"", base)).unwrap();
    let b = json.find(&format!("\"{}/b\": [", base)).unwrap();
    let c = json.find(&format!("\"{}/c\": []", base)).unwrap();
    assert!(a < b && b < c);
}

#[tokio::test]
async fn test_markdown_tree_nests_shared_child_under_first_discoverer() {
    let server = abc_site().await;
    let base = server.uri();

    let mut session = memory_session();
    let report = session
        .map_only(&base, options(OutputFormat::Markdown))
        .await
        .unwrap();

    let markdown = session.writer().get_str(report.path.as_ref().unwrap()).unwrap();
    let expected = format!(
        "# Site Map for {base}/\n\n- {base}/\n  - {base}/b\n    - {base}/c\n"
    );
    assert_eq!(markdown, expected);
}

#[tokio::test]
async fn test_html_tree_lists_each_node_once() {
    let server = abc_site().await;
    let base = server.uri();

    let mut session = memory_session();
    let report = session
        .map_only(&base, options(OutputFormat::Html))
        .await
        .unwrap();

    let html = session.writer().get_str(report.path.as_ref().unwrap()).unwrap();
    assert!(html.starts_with(&format!("<h1>Site Map for {}/</h1>", base)));
    assert_eq!(html.matches(&format!("<li>{}/c", base)).count(), 1);
    assert_eq!(html.matches("<li>").count(), 3);
}

#[tokio::test]
async fn test_map_has_no_depth_limit_and_fetches_once() {
    let server = MockServer::start().await;
    mount_html(&server, "/", page_with_links("0", &["/1"])).await;
    mount_html(&server, "/1", page_with_links("1", &["/2", "/"])).await;
    mount_html(&server, "/2", page_with_links("2", &["/3", "/1"])).await;
    mount_html(&server, "/3", page_with_links("3", &["/"])).await;

    let mut session = memory_session();
    let report = session
        .map_only(&server.uri(), options(OutputFormat::Json))
        .await
        .unwrap();

    assert_eq!(report.graph.node_count(), 4);
    for route in ["/", "/1", "/2", "/3"] {
        assert_eq!(request_count(&server, route).await, 1);
    }
}

#[tokio::test]
async fn test_repeated_maps_get_suffixed_names() {
    let server = abc_site().await;
    let dir = TempDir::new().unwrap();
    let mut session = fs_session(dir.path());

    let first = session
        .map_only(&server.uri(), options(OutputFormat::Markdown))
        .await
        .unwrap();
    let second = session
        .map_only(&server.uri(), options(OutputFormat::Markdown))
        .await
        .unwrap();

    assert_eq!(first.path.unwrap().file_name().unwrap(), "site_map.md");
    assert_eq!(second.path.unwrap().file_name().unwrap(), "site_map_1.md");
}

#[tokio::test]
async fn test_crawl_and_map_share_a_directory() {
    let server = abc_site().await;
    let dir = TempDir::new().unwrap();
    let mut session = fs_session(dir.path());

    let (crawl, map) = session
        .recursive_crawl_and_map(&server.uri(), 1, options(OutputFormat::Markdown))
        .await
        .unwrap();

    let target = dir.path().join("crawl_and_map").canonicalize().unwrap();
    assert_eq!(crawl.pages.len(), 3);
    assert!(crawl.pages.iter().all(|p| p.path.starts_with(&target)));
    assert_eq!(map.path.unwrap(), target.join("site_map.md"));
    assert_eq!(std::fs::read_dir(&target).unwrap().count(), 4);
}
