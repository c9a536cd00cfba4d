//! Integration tests for the crawler
//!
//! These tests use wiremock to create mock HTTP servers and test
//! the full crawl cycle end-to-end, from seed fetch to snapshot.

use fathom::audit::AuditLog;
use fathom::config::Config;
use fathom::{CrawlSnapshot, Orchestrator};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Runs a crawl against a mock server and returns the final snapshot
async fn run_crawl(seed: &str, depth: u32) -> CrawlSnapshot {
    let orchestrator =
        Orchestrator::new(seed, depth, &Config::default()).expect("Failed to create orchestrator");
    orchestrator.run(Arc::new(AuditLog::console())).await
}

/// Mounts a GET mock serving an HTML body at the given path
async fn mount_html(server: &MockServer, at: &str, body: String) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(body)
                .insert_header("content-type", "text/html"),
        )
        .mount(server)
        .await;
}

/// Mounts a catch-all HEAD mock reporting text/html for every path
async fn mount_html_heads(server: &MockServer) {
    Mock::given(method("HEAD"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_full_crawl_collects_linked_pages() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html_heads(&mock_server).await;

    // Mock index page with links
    mount_html(
        &mock_server,
        "/",
        r#"<html><head><title>Home</title></head><body>
        <a href="/page1">Page 1</a>
        <a href="/page2">Page 2</a>
        </body></html>"#
            .to_string(),
    )
    .await;

    // Mock page1
    mount_html(
        &mock_server,
        "/page1",
        r#"<html><head><title>Page 1</title></head><body><p>Content 1</p></body></html>"#
            .to_string(),
    )
    .await;

    // Mock page2
    mount_html(
        &mock_server,
        "/page2",
        r#"<html><head><title>Page 2</title></head><body><p>Content 2</p></body></html>"#
            .to_string(),
    )
    .await;

    // Run the crawl
    let seed = format!("{}/", base_url);
    let orchestrator =
        Orchestrator::new(&seed, 2, &Config::default()).expect("Failed to create orchestrator");
    let snapshot = orchestrator.run(Arc::new(AuditLog::console())).await;

    // Verify results
    assert_eq!(snapshot.total_pages, 3, "Expected 3 pages total");
    assert_eq!(snapshot.succeeded_pages, 3, "Expected 3 succeeded pages");
    assert_eq!(snapshot.failed_pages, 0, "Expected no failed pages");
    assert_eq!(
        snapshot.total_pages,
        snapshot.succeeded_pages + snapshot.failed_pages
    );

    let home = snapshot
        .succeeded
        .get(&seed)
        .expect("Seed page missing from snapshot");
    assert_eq!(home.title, "Home");
    assert_eq!(home.outbound_links.len(), 2);
    assert!(home.outbound_links.contains(&format!("{}/page1", base_url)));

    let page1 = snapshot
        .succeeded
        .get(&format!("{}/page1", base_url))
        .expect("page1 missing from snapshot");
    assert_eq!(page1.title, "Page 1");
    assert_eq!(page1.paragraphs, vec!["Content 1".to_string()]);

    // Every started page must have reached a terminal state
    let counts = orchestrator.state().counts();
    assert_eq!(counts.in_flight, 0, "No page should remain in flight");
    assert_eq!(counts.succeeded, 3);
}

#[tokio::test]
async fn test_shared_link_fetched_exactly_once() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html_heads(&mock_server).await;

    // Both /a and /b link to /shared; the dedup tracker must admit
    // exactly one of the two scrape attempts
    mount_html(
        &mock_server,
        "/",
        r#"<html><body><a href="/a">A</a><a href="/b">B</a></body></html>"#.to_string(),
    )
    .await;
    mount_html(
        &mock_server,
        "/a",
        r#"<html><body><a href="/shared">Shared</a></body></html>"#.to_string(),
    )
    .await;
    mount_html(
        &mock_server,
        "/b",
        r#"<html><body><a href="/shared">Shared</a></body></html>"#.to_string(),
    )
    .await;

    // The shared page must be fetched exactly once
    Mock::given(method("GET"))
        .and(path("/shared"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<html><head><title>Shared</title></head></html>"#)
                .insert_header("content-type", "text/html"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    // Run the crawl deep enough to reach /shared through both parents
    let snapshot = run_crawl(&format!("{}/", base_url), 3).await;

    assert_eq!(snapshot.total_pages, 4, "Expected /, /a, /b and /shared");
    assert_eq!(snapshot.succeeded_pages, 4);
    assert!(snapshot
        .succeeded
        .contains_key(&format!("{}/shared", base_url)));

    // Wiremock verifies the expect(1) when mock_server drops
}

#[tokio::test]
async fn test_depth_limit_stops_link_traversal() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // Create a chain: / -> level1 -> level2
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(&mock_server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/level1"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(&mock_server)
        .await;

    mount_html(
        &mock_server,
        "/",
        r#"<html><body><a href="/level1">Level 1</a></body></html>"#.to_string(),
    )
    .await;
    mount_html(
        &mock_server,
        "/level1",
        r#"<html><body><a href="/level2">Level 2</a></body></html>"#.to_string(),
    )
    .await;

    // level2 lies beyond the depth bound and must never be requested,
    // not even with a HEAD probe
    Mock::given(method("HEAD"))
        .and(path("/level2"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .expect(0)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/level2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .expect(0)
        .mount(&mock_server)
        .await;

    // Run the crawl with depth 2: the seed plus one level of links
    let snapshot = run_crawl(&format!("{}/", base_url), 2).await;

    assert_eq!(snapshot.total_pages, 2, "Expected only / and /level1");
    assert_eq!(snapshot.succeeded_pages, 2);

    // level2 still appears in level1's link list even though it was
    // never visited
    let level1 = snapshot
        .succeeded
        .get(&format!("{}/level1", base_url))
        .expect("level1 missing from snapshot");
    assert_eq!(
        level1.outbound_links,
        vec![format!("{}/level2", base_url)]
    );
}

#[tokio::test]
async fn test_non_html_page_skips_body_download() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(&mock_server)
        .await;

    // Mock index with link to PDF
    mount_html(
        &mock_server,
        "/",
        r#"<html><body><a href="/document.pdf">PDF Document</a></body></html>"#.to_string(),
    )
    .await;

    // Mock PDF HEAD request (the crawler checks content-type first)
    Mock::given(method("HEAD"))
        .and(path("/document.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "application/pdf")
                .insert_header("content-length", "1024"),
        )
        .mount(&mock_server)
        .await;

    // The PDF body must never be downloaded
    Mock::given(method("GET"))
        .and(path("/document.pdf"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_bytes(vec![0x25, 0x50, 0x44, 0x46]) // %PDF
                .insert_header("content-type", "application/pdf"),
        )
        .expect(0)
        .mount(&mock_server)
        .await;

    // Run the crawl
    let snapshot = run_crawl(&format!("{}/", base_url), 2).await;

    // The PDF still counts as a succeeded page, with empty page fields
    assert_eq!(snapshot.succeeded_pages, 2);
    let pdf = snapshot
        .succeeded
        .get(&format!("{}/document.pdf", base_url))
        .expect("PDF record missing from snapshot");
    assert_eq!(pdf.content_type, "application/pdf");
    // The advertised length survives even though no body was fetched
    assert_eq!(pdf.content_length, Some(1024));
    assert_eq!(pdf.title, "");
    assert_eq!(pdf.description, "");
    assert!(pdf.outbound_links.is_empty());
    assert!(pdf.paragraphs.is_empty());
}

#[tokio::test]
async fn test_failed_fetch_recorded_with_reason() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(&mock_server)
        .await;

    // Mock index with a link that 404s
    mount_html(
        &mock_server,
        "/",
        r#"<html><body><a href="/missing">Missing</a></body></html>"#.to_string(),
    )
    .await;

    Mock::given(method("HEAD"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    // Run the crawl
    let snapshot = run_crawl(&format!("{}/", base_url), 2).await;

    // Verify the failure was recorded as data, not an abort
    assert_eq!(snapshot.succeeded_pages, 1);
    assert_eq!(snapshot.failed_pages, 1);
    assert_eq!(
        snapshot.total_pages,
        snapshot.succeeded_pages + snapshot.failed_pages
    );

    let failure = snapshot
        .failed
        .get(&format!("{}/missing", base_url))
        .expect("Failure record missing from snapshot");
    assert_eq!(failure.reason, "Status code: 404");
    assert!(failure.failed_at_unix > 0);
}

#[tokio::test]
async fn test_seed_failure_still_produces_snapshot() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // The seed itself refuses to serve
    Mock::given(method("HEAD"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    // Run the crawl
    let seed = format!("{}/", base_url);
    let snapshot = run_crawl(&seed, 2).await;

    // A failed seed still yields a complete snapshot of the run
    assert_eq!(snapshot.total_pages, 1);
    assert_eq!(snapshot.succeeded_pages, 0);
    assert_eq!(snapshot.failed_pages, 1);
    assert_eq!(snapshot.seed, seed);

    let failure = snapshot
        .failed
        .get(&seed)
        .expect("Seed failure missing from snapshot");
    assert_eq!(failure.reason, "Status code: 500");
}

#[tokio::test]
async fn test_redirected_page_recorded_under_requested_url() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    // /old permanently redirects to /new for both request methods
    Mock::given(method("HEAD"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(301).insert_header("location", "/new"))
        .mount(&mock_server)
        .await;

    Mock::given(method("HEAD"))
        .and(path("/new"))
        .respond_with(ResponseTemplate::new(200).insert_header("content-type", "text/html"))
        .mount(&mock_server)
        .await;
    mount_html(
        &mock_server,
        "/new",
        r#"<html><head><title>Moved Target</title></head></html>"#.to_string(),
    )
    .await;

    // Crawl the redirecting URL
    let seed = format!("{}/old", base_url);
    let snapshot = run_crawl(&seed, 1).await;

    // The 301 is followed rather than recorded as a failure
    assert_eq!(snapshot.succeeded_pages, 1);
    assert_eq!(snapshot.failed_pages, 0);

    // The record keeps the URL that was asked for, not the redirect target
    let page = snapshot
        .succeeded
        .get(&seed)
        .expect("Redirected page missing from snapshot");
    assert_eq!(page.title, "Moved Target");
    assert!(!snapshot.succeeded.contains_key(&format!("{}/new", base_url)));
}

#[tokio::test]
async fn test_page_field_extraction_end_to_end() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html_heads(&mock_server).await;

    // One page exercising every extracted field
    mount_html(
        &mock_server,
        "/",
        r##"<html><head>
        <title>Fathom Test Page</title>
        <meta name="description" content="Two  spaces survive here">
        </head><body>
        <p>First paragraph.</p>
        <p>   </p>
        <p>Gap   here</p>
        <a href="/about">About</a>
        <a href="#top">Top</a>
        <a href="ftp://example.com/file">FTP</a>
        <a href="/about">About again</a>
        </body></html>"##
            .to_string(),
    )
    .await;

    // Run the crawl at depth 1: record the links, follow none of them
    let seed = format!("{}/", base_url);
    let snapshot = run_crawl(&seed, 1).await;

    assert_eq!(snapshot.total_pages, 1);
    let page = snapshot
        .succeeded
        .get(&seed)
        .expect("Seed page missing from snapshot");

    assert_eq!(page.title, "Fathom Test Page");
    // Description content is taken verbatim, without whitespace collapsing
    assert_eq!(page.description, "Two  spaces survive here");
    assert_eq!(page.content_type, "text/html");
    assert!(page.fetched_at_unix > 0);

    // Whitespace-only paragraphs are dropped; inner runs collapse away
    assert_eq!(
        page.paragraphs,
        vec!["First paragraph.".to_string(), "Gaphere".to_string()]
    );

    // Fragment and non-http links are dropped, duplicates kept once
    assert_eq!(page.outbound_links, vec![format!("{}/about", base_url)]);
}

#[tokio::test]
async fn test_snapshot_round_trips_through_file() {
    // Start a mock server
    let mock_server = MockServer::start().await;
    let base_url = mock_server.uri();

    mount_html_heads(&mock_server).await;
    mount_html(
        &mock_server,
        "/",
        r#"<html><head><title>Saved</title></head></html>"#.to_string(),
    )
    .await;

    // Run the crawl and write the snapshot out
    let seed = format!("{}/", base_url);
    let snapshot = run_crawl(&seed, 1).await;

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let snapshot_path = dir.path().join("results.json");
    snapshot
        .write_to_file(&snapshot_path)
        .expect("Failed to write snapshot");

    // Read it back and check the fields survived serialization
    let content = std::fs::read_to_string(&snapshot_path).expect("Failed to read snapshot");
    let restored: CrawlSnapshot =
        serde_json::from_str(&content).expect("Failed to parse snapshot JSON");

    assert_eq!(restored.seed, seed);
    assert_eq!(restored.depth, 1);
    assert_eq!(restored.total_pages, 1);
    assert_eq!(restored.succeeded_pages, 1);
    let page = restored.succeeded.get(&seed).expect("Page missing");
    assert_eq!(page.title, "Saved");
}
