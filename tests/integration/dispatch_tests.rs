//! Dispatcher routing

use crate::common::{memory_session, mount_html, page_with_links};
use opencrawl::{dispatch, DispatchArgs, DispatchError, DispatchOutcome};
use wiremock::MockServer;

#[tokio::test]
async fn test_unknown_function_is_rejected() {
    let mut session = memory_session();
    let args = DispatchArgs::new("https://example.com");
    let result = dispatch(&mut session, "summarize", args).await;

    match result {
        Err(DispatchError::UnknownFunction(name)) => assert_eq!(name, "summarize"),
        other => panic!("expected UnknownFunction, got {:?}", other),
    }
}

#[tokio::test]
async fn test_json_arguments_route_to_crawl() {
    let server = MockServer::start().await;
    mount_html(&server, "/", page_with_links("Root", &["/a"])).await;
    mount_html(&server, "/a", page_with_links("A", &["/b"])).await;
    mount_html(&server, "/b", page_with_links("B", &[])).await;

    let args = DispatchArgs::from_json(&format!(
        r#"{{"url": "{}", "output_format": "json", "max_depth": 2}}"#,
        server.uri()
    ))
    .unwrap();

    let mut session = memory_session();
    match dispatch(&mut session, "recursive_crawl", args).await.unwrap() {
        DispatchOutcome::Crawl(report) => {
            assert_eq!(report.pages.len(), 3);
            assert!(report
                .pages
                .iter()
                .all(|p| p.path.extension().unwrap() == "json"));
        }
        other => panic!("expected a crawl report, got {:?}", other),
    }
}

#[tokio::test]
async fn test_defaults_route_single_page_to_markdown() {
    let server = MockServer::start().await;
    mount_html(&server, "/", page_with_links("Root", &[])).await;

    let mut session = memory_session();
    let outcome = dispatch(&mut session, "single_page", DispatchArgs::new(server.uri()))
        .await
        .unwrap();

    match outcome {
        DispatchOutcome::SinglePage(Some(path)) => {
            assert_eq!(path.extension().unwrap(), "md");
        }
        other => panic!("expected a written page, got {:?}", other),
    }
}

#[tokio::test]
async fn test_map_only_route() {
    let server = MockServer::start().await;
    mount_html(&server, "/", page_with_links("Root", &["/a"])).await;
    mount_html(&server, "/a", page_with_links("A", &[])).await;

    let mut session = memory_session();
    let outcome = dispatch(&mut session, "map_only", DispatchArgs::new(server.uri()))
        .await
        .unwrap();

    match outcome {
        DispatchOutcome::Map(report) => {
            assert_eq!(report.graph.node_count(), 2);
            assert!(report.path.unwrap().ends_with("site_map/site_map.md"));
        }
        other => panic!("expected a map report, got {:?}", other),
    }
}
