//! Single page conversion scenarios

use crate::common::{fs_session, memory_session, mount_html};
use opencrawl::{ConversionOptions, OutputFormat};
use tempfile::TempDir;
use wiremock::MockServer;

const ARTICLE: &str = r#"<html><head><title>Guide</title></head><body>
<header><h1>Site Name</h1></header>
<nav><ul><li><a href="/">Home</a></li></ul></nav>
<div id="content">
  <h1>Guide</h1>
  <p>Read the <em>whole</em> <a href="/docs">docs</a>.</p>
  <img src="/diagram.png" alt="Diagram">
  <h2>Setup</h2>
  <p>Install it.</p>
</div>
<div class="site-footer-links"><a href="/legal">Legal</a></div>
</body></html>"#;

#[tokio::test]
async fn test_html_without_images() {
    let server = MockServer::start().await;
    mount_html(&server, "/guide", ARTICLE).await;

    let mut session = memory_session();
    let options = ConversionOptions {
        format: OutputFormat::Html,
        keep_images: false,
        ..ConversionOptions::default()
    };
    let path = session
        .single_page_convert(&format!("{}/guide", server.uri()), options, None)
        .await
        .expect("conversion failed");

    let html = session.writer().get_str(&path).unwrap();
    assert!(!html.contains("<img"));
    assert!(!html.contains("Site Name"));
    assert!(!html.contains("Legal"));
    assert!(html.contains("<em>whole</em>"));
    assert!(html.contains(&format!(r#"href="{}/docs""#, server.uri())));
}

#[tokio::test]
async fn test_markdown_with_toc_and_front_matter() {
    let server = MockServer::start().await;
    mount_html(&server, "/guide", ARTICLE).await;

    let mut session = memory_session();
    let options = ConversionOptions {
        generate_toc: true,
        ..ConversionOptions::default()
    };
    let path = session
        .single_page_convert(&format!("{}/guide", server.uri()), options, None)
        .await
        .unwrap();

    let markdown = session.writer().get_str(&path).unwrap();
    let front_matter = "---\ntitle: Guide\ntype: reference\n---\n\n";
    assert!(markdown.starts_with(&format!("{}## Table of Contents\n", front_matter)));
    assert!(markdown.contains("- [Guide](#guide)"));
    assert!(markdown.contains("  - [Setup](#setup)"));
    assert!(markdown.contains("Read the *whole* [docs]("));
    assert!(markdown.contains("![Diagram]("));
}

#[tokio::test]
async fn test_default_filename_uses_host_and_timestamp() {
    let server = MockServer::start().await;
    mount_html(&server, "/guide", ARTICLE).await;

    let mut session = memory_session();
    let path = session
        .single_page_convert(
            &format!("{}/guide", server.uri()),
            ConversionOptions::default().with_format(OutputFormat::Json),
            None,
        )
        .await
        .unwrap();

    assert!(path.starts_with("/out/output"));
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("127.0.0.1-"), "unexpected name {}", name);
    assert!(name.ends_with(".json"));

    let record: serde_json::Value =
        serde_json::from_str(session.writer().get_str(&path).unwrap()).unwrap();
    assert_eq!(record["title"], "Guide");
    assert!(record["text"].as_str().unwrap().contains("Install it."));
}

#[tokio::test]
async fn test_custom_filename_collisions_on_disk() {
    let server = MockServer::start().await;
    mount_html(&server, "/guide", ARTICLE).await;
    let url = format!("{}/guide", server.uri());

    let dir = TempDir::new().unwrap();
    let mut session = fs_session(dir.path());
    let options = ConversionOptions::default();

    let mut names = Vec::new();
    for _ in 0..3 {
        let path = session
            .single_page_convert(&url, options, Some("page.md"))
            .await
            .unwrap();
        assert!(path.is_absolute());
        names.push(path.file_name().unwrap().to_string_lossy().into_owned());
    }

    assert_eq!(names, vec!["page.md", "page_1.md", "page_2.md"]);
}

#[tokio::test]
async fn test_unreachable_page_yields_none() {
    let server = MockServer::start().await;

    let mut session = memory_session();
    let result = session
        .single_page_convert(
            &format!("{}/nothing", server.uri()),
            ConversionOptions::default(),
            None,
        )
        .await;

    assert!(result.is_none());
    assert!(session.writer().is_empty());
}

#[tokio::test]
async fn test_invalid_url_yields_none() {
    let mut session = memory_session();
    let result = session
        .single_page_convert("not a url", ConversionOptions::default(), None)
        .await;
    assert!(result.is_none());
}
