//! End-to-end pipeline tests against a local HTTP listener.

use crate::config::Config;
use crate::run_pipeline;
use std::net::SocketAddr;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

/// Serve a single canned HTTP response on an ephemeral local port.
async fn serve_once(status_line: &'static str, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind listener");
    let addr = listener.local_addr().expect("listener addr");
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.expect("accept");
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "{}\r\ncontent-type: text/plain; charset=utf-8\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        socket
            .write_all(response.as_bytes())
            .await
            .expect("write response");
        socket.shutdown().await.ok();
    });
    addr
}

fn quiet_config(url: String) -> Config {
    let mut config = Config::default();
    config.fetch.url = url;
    config.processing.enable_metrics = false;
    config
}

#[tokio::test]
async fn test_pipeline_counts_and_charts_a_document() {
    let addr = serve_once("HTTP/1.1 200 OK", "The cat sat. The cat ran!").await;
    let dir = tempfile::tempdir().expect("tempdir");
    let svg = dir.path().join("top_words.svg");

    let mut config = quiet_config(format!("http://{}/doc.txt", addr));
    config.processing.num_threads = 1;
    config.report.top_n = 2;
    config.report.terminal = false;
    config.report.svg_path = Some(svg.to_string_lossy().into_owned());

    let stats = run_pipeline(config).await.expect("pipeline");

    assert!(!stats.fetch_failed);
    assert_eq!(stats.chunks, 1);
    assert_eq!(stats.total_words, 6);
    assert_eq!(stats.distinct_words, 4);
    assert!(stats.rendered);

    let svg_text = std::fs::read_to_string(&svg).expect("read svg");
    assert!(svg_text.contains("<svg"));
    assert!(svg_text.contains("Top 2 most frequent words"));
}

#[tokio::test]
async fn test_pipeline_matches_direct_count_across_threads() {
    // Single-character words cannot straddle a chunk cut.
    let body: &'static str = "a b c a b a ";
    let direct = crate::count_words(body);

    for threads in [1, 2, 4] {
        let addr = serve_once("HTTP/1.1 200 OK", body).await;
        let mut config = quiet_config(format!("http://{}/doc.txt", addr));
        config.processing.num_threads = threads;

        let stats = run_pipeline(config).await.expect("pipeline");
        assert_eq!(stats.total_words, direct.total(), "threads={}", threads);
        assert_eq!(stats.distinct_words, direct.len(), "threads={}", threads);
    }
}

#[tokio::test]
async fn test_pipeline_aborts_on_http_error_without_chart() {
    let addr = serve_once("HTTP/1.1 404 Not Found", "").await;
    let dir = tempfile::tempdir().expect("tempdir");
    let svg = dir.path().join("top_words.svg");

    let mut config = quiet_config(format!("http://{}/missing.txt", addr));
    config.report.svg_path = Some(svg.to_string_lossy().into_owned());

    let stats = run_pipeline(config).await.expect("pipeline");

    assert!(stats.fetch_failed);
    assert_eq!(stats.chunks, 0);
    assert_eq!(stats.total_words, 0);
    assert!(!stats.rendered);
    assert!(!svg.exists());
}

#[tokio::test]
async fn test_pipeline_skips_chart_for_wordless_document() {
    let addr = serve_once("HTTP/1.1 200 OK", "... !!! ???").await;
    let dir = tempfile::tempdir().expect("tempdir");
    let svg = dir.path().join("top_words.svg");

    let mut config = quiet_config(format!("http://{}/doc.txt", addr));
    config.report.svg_path = Some(svg.to_string_lossy().into_owned());

    let stats = run_pipeline(config).await.expect("pipeline");

    assert!(!stats.fetch_failed);
    assert!(stats.chunks > 0);
    assert_eq!(stats.total_words, 0);
    assert!(!stats.rendered);
    assert!(!svg.exists());
}

#[tokio::test]
async fn test_pipeline_treats_empty_body_as_no_text() {
    let addr = serve_once("HTTP/1.1 200 OK", "").await;
    let dir = tempfile::tempdir().expect("tempdir");
    let svg = dir.path().join("top_words.svg");

    let mut config = quiet_config(format!("http://{}/doc.txt", addr));
    config.report.svg_path = Some(svg.to_string_lossy().into_owned());

    let stats = run_pipeline(config).await.expect("pipeline");

    assert!(!stats.fetch_failed);
    assert_eq!(stats.document_chars, 0);
    assert_eq!(stats.chunks, 0);
    assert!(!stats.rendered);
    assert!(!svg.exists());
}

#[tokio::test]
async fn test_pipeline_rejects_invalid_configuration() {
    let mut config = Config::default();
    config.fetch.url = String::new();
    assert!(run_pipeline(config).await.is_err());
}
