//! Integration tests for the harvester
//!
//! These tests use wiremock to create mock HTTP servers and run the real
//! fetcher, extractor and file sink end-to-end.

use docs_harvest::config::Config;
use docs_harvest::crawler::{build_http_client, harvest, CrawlEngine, HtmlExtractor, HttpFetcher};
use docs_harvest::output::FileSink;
use docs_harvest::url::DomainFilter;
use std::path::Path;
use tempfile::tempdir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Mounts an HTML page at `route`
async fn mount_page(server: &MockServer, route: &str, html: String) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_raw(html, "text/html"))
        .mount(server)
        .await;
}

/// Number of requests the server received for `route`
async fn hits(server: &MockServer, route: &str) -> usize {
    server
        .received_requests()
        .await
        .expect("Request recording is enabled")
        .iter()
        .filter(|request| request.url.path() == route)
        .count()
}

/// Mounts a small documentation site:
///
/// - `/`  links to /a, /b, an outside page and /a again
/// - `/a` links to /b and back to /
/// - `/b` links to /missing, which answers 404
async fn mount_docs_site(server: &MockServer) {
    let base = server.uri();

    mount_page(
        server,
        "/",
        format!(
            r#"<html><head><title>Home</title></head><body>
            <nav>
                <a href="{base}/a">A</a>
                <a href="{base}/b">B</a>
                <a href="https://example.com/">Elsewhere</a>
                <a href="/a">A again</a>
            </nav>
            <main><p>Welcome to the docs</p></main>
            </body></html>"#
        ),
    )
    .await;

    mount_page(
        server,
        "/a",
        format!(
            r#"<html><body>
            <nav><a href="{base}/b">B</a><a href="{base}/">Home</a></nav>
            <main><p>Shared intro</p><p>Alpha body</p></main>
            </body></html>"#
        ),
    )
    .await;

    mount_page(
        server,
        "/b",
        format!(
            r#"<html><body>
            <nav><a href="{base}/missing">Missing</a></nav>
            <article><p>Shared intro</p><p>Beta
                body</p></article>
            </body></html>"#
        ),
    )
    .await;

    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

fn create_test_config(server: &MockServer, output: &Path) -> Config {
    let mut config = Config::new(
        format!("{}/", server.uri()),
        output.to_string_lossy().to_string(),
    );
    config.allowed_prefixes = vec![format!("{}/", server.uri())];
    config.user_agent = Some("TestHarvester/1.0".to_string());
    config
}

#[tokio::test]
async fn test_full_harvest_writes_each_block_once() {
    let mock_server = MockServer::start().await;
    mount_docs_site(&mock_server).await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("harvest.txt");
    let config = create_test_config(&mock_server, &output);

    let stats = harvest(&config).await.expect("Harvest failed");

    let content = std::fs::read_to_string(&output).unwrap();
    assert_eq!(
        content,
        "Shared intro\nAlpha body\nBeta body\nWelcome to the docs\n"
    );

    assert_eq!(stats.pages_visited, 4);
    assert_eq!(stats.blocks_written, 4);
    assert_eq!(stats.links_filtered, 1);
    assert_eq!(stats.discovery_failures, 1);
    assert_eq!(stats.content_failures, 1);
}

#[tokio::test]
async fn test_fetch_counts_follow_discovery_and_content_fetches() {
    let mock_server = MockServer::start().await;
    mount_docs_site(&mock_server).await;

    let dir = tempdir().unwrap();
    let config = create_test_config(&mock_server, &dir.path().join("harvest.txt"));

    harvest(&config).await.expect("Harvest failed");

    // one discovery fetch each, plus one content fetch per eligible link to it
    assert_eq!(hits(&mock_server, "/").await, 2);
    assert_eq!(hits(&mock_server, "/a").await, 3);
    assert_eq!(hits(&mock_server, "/b").await, 3);
    assert_eq!(hits(&mock_server, "/missing").await, 2);
}

#[tokio::test]
async fn test_cycle_terminates() {
    let mock_server = MockServer::start().await;
    let base = mock_server.uri();

    mount_page(
        &mock_server,
        "/a",
        format!(r#"<html><body><a href="{base}/b">B</a><p>Page A</p></body></html>"#),
    )
    .await;
    mount_page(
        &mock_server,
        "/b",
        format!(r#"<html><body><a href="{base}/a">A</a><p>Page B</p></body></html>"#),
    )
    .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("harvest.txt");
    let mut config = create_test_config(&mock_server, &output);
    config.start_url = format!("{}/a", base);

    let stats = harvest(&config).await.expect("Harvest failed");

    assert_eq!(stats.pages_visited, 2);
    assert_eq!(hits(&mock_server, "/a").await, 2);
    assert_eq!(hits(&mock_server, "/b").await, 2);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Page B\nPage A\n"
    );
}

#[tokio::test]
async fn test_relative_links_are_resolved() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/docs/",
        r#"<html><body><a href="intro.html">Intro</a></body></html>"#.to_string(),
    )
    .await;
    mount_page(
        &mock_server,
        "/docs/intro.html",
        r#"<html><body><main><h1>Introduction</h1></main></body></html>"#.to_string(),
    )
    .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("harvest.txt");
    let mut config = create_test_config(&mock_server, &output);
    config.start_url = format!("{}/docs/", mock_server.uri());

    harvest(&config).await.expect("Harvest failed");

    assert_eq!(std::fs::read_to_string(&output).unwrap(), "Introduction\n");
}

#[tokio::test]
async fn test_anchors_into_one_page_are_visited_once() {
    let mock_server = MockServer::start().await;

    mount_page(
        &mock_server,
        "/",
        r#"<html><body><a href="/p#a">A</a><a href="/p#b">B</a><a href="/p">P</a></body></html>"#
            .to_string(),
    )
    .await;
    mount_page(
        &mock_server,
        "/p",
        r#"<html><body><p>Anchored page</p></body></html>"#.to_string(),
    )
    .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("harvest.txt");
    let config = create_test_config(&mock_server, &output);

    let stats = harvest(&config).await.expect("Harvest failed");

    // one discovery fetch of /p plus a content fetch per link to it
    assert_eq!(stats.pages_visited, 2);
    assert_eq!(stats.content_fetches, 3);
    assert_eq!(hits(&mock_server, "/p").await, 4);
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "Anchored page\n");
}

#[tokio::test]
async fn test_unreachable_seed_is_not_fatal() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mock_server)
        .await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("harvest.txt");
    let config = create_test_config(&mock_server, &output);

    let stats = harvest(&config).await.expect("Fetch failures must not be fatal");

    assert_eq!(stats.discovery_failures, 1);
    assert!(output.exists());
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "");
}

#[tokio::test]
async fn test_second_run_appends_without_shared_state() {
    let mock_server = MockServer::start().await;
    mount_docs_site(&mock_server).await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("harvest.txt");
    let config = create_test_config(&mock_server, &output);

    harvest(&config).await.expect("First run failed");
    let first = std::fs::read_to_string(&output).unwrap();

    harvest(&config).await.expect("Second run failed");
    let second = std::fs::read_to_string(&output).unwrap();

    // Visited sets are not persisted: the second run appends its own copy
    // of every block and never rewrites the first run's output.
    assert!(second.starts_with(&first));
    assert_eq!(second, format!("{}{}", first, first));
}

#[tokio::test]
async fn test_engine_with_http_fetcher_and_file_sink() {
    let mock_server = MockServer::start().await;
    mount_docs_site(&mock_server).await;

    let dir = tempdir().unwrap();
    let output = dir.path().join("harvest.txt");

    let fetcher = HttpFetcher::new(build_http_client(None).unwrap());
    let sink = FileSink::open(&output).unwrap();
    let mut engine = CrawlEngine::new(fetcher, HtmlExtractor::new(), sink)
        .with_filter(DomainFilter::new([format!("{}/a", mock_server.uri())]));

    engine.run(&format!("{}/", mock_server.uri())).await.unwrap();

    // Only /a is eligible; its links to / and /b are filtered out
    assert_eq!(engine.statistics().pages_visited, 2);
    assert_eq!(hits(&mock_server, "/b").await, 0);
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "Shared intro\nAlpha body\n"
    );
}

mod cli {
    use super::*;
    use tokio::process::Command;

    const BIN: &str = env!("CARGO_BIN_EXE_docs-harvest");

    fn write_config(dir: &Path, content: &str) -> std::path::PathBuf {
        let config_path = dir.join("harvest.toml");
        std::fs::write(&config_path, content).unwrap();
        config_path
    }

    #[tokio::test]
    async fn test_missing_start_url_exits_with_one() {
        let mock_server = MockServer::start().await;
        let dir = tempdir().unwrap();
        let output = dir.path().join("harvest.txt");
        let config_path = write_config(
            dir.path(),
            &format!(
                "file-name = {:?}\nallowed-prefixes = [{:?}]\n",
                output.to_string_lossy(),
                mock_server.uri()
            ),
        );

        let status = Command::new(BIN)
            .arg(&config_path)
            .arg("--quiet")
            .status()
            .await
            .unwrap();

        assert_eq!(status.code(), Some(1));
        assert_eq!(hits(&mock_server, "/").await, 0);
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn test_empty_start_url_exits_with_one() {
        let dir = tempdir().unwrap();
        let config_path = write_config(
            dir.path(),
            "start-url = \"\"\nfile-name = \"harvest.txt\"\n",
        );

        let status = Command::new(BIN)
            .arg(&config_path)
            .arg("--quiet")
            .status()
            .await
            .unwrap();

        assert_eq!(status.code(), Some(1));
    }

    #[tokio::test]
    async fn test_missing_config_file_exits_with_one() {
        let dir = tempdir().unwrap();

        let status = Command::new(BIN)
            .arg(dir.path().join("absent.toml"))
            .arg("--quiet")
            .status()
            .await
            .unwrap();

        assert_eq!(status.code(), Some(1));
    }

    #[tokio::test]
    async fn test_completed_harvest_exits_with_zero() {
        let mock_server = MockServer::start().await;
        mount_docs_site(&mock_server).await;

        let dir = tempdir().unwrap();
        let output = dir.path().join("harvest.txt");
        let config_path = write_config(
            dir.path(),
            &format!(
                "start-url = {:?}\nfile-name = {:?}\nsleep-time = 0\nallowed-prefixes = [{:?}]\n",
                format!("{}/", mock_server.uri()),
                output.to_string_lossy(),
                format!("{}/", mock_server.uri())
            ),
        );

        let status = Command::new(BIN)
            .arg(&config_path)
            .arg("--quiet")
            .status()
            .await
            .unwrap();

        assert_eq!(status.code(), Some(0));
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "Shared intro\nAlpha body\nBeta body\nWelcome to the docs\n"
        );
    }

    #[tokio::test]
    async fn test_dry_run_fetches_nothing() {
        let mock_server = MockServer::start().await;
        let dir = tempdir().unwrap();
        let output = dir.path().join("harvest.txt");
        let config_path = write_config(
            dir.path(),
            &format!(
                "start-url = {:?}\nfile-name = {:?}\n",
                format!("{}/", mock_server.uri()),
                output.to_string_lossy()
            ),
        );

        let result = Command::new(BIN)
            .arg(&config_path)
            .arg("--dry-run")
            .output()
            .await
            .unwrap();

        assert_eq!(result.status.code(), Some(0));
        assert!(String::from_utf8_lossy(&result.stdout).contains("Configuration is valid"));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
        assert!(!output.exists());
    }
}
