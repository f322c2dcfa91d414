//! End-to-end tests for `run`: catalog, aliases and downloads against one mock server.

use std::time::Duration;

use emoji_downloader_core::{Config, ConfigError, RateLimitPolicy, RunError, run};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer, output_dir: &std::path::Path) -> Config {
    Config::new(Some("xoxb-test".to_string()))
        .with_api_url(format!("{}/api/emoji.list", server.uri()))
        .expect("mock URL is valid")
        .with_output_dir(output_dir)
        .with_pacing(Duration::ZERO)
        .with_rate_limit_policy(RateLimitPolicy::new(5, Duration::from_millis(1)))
}

/// Catalog with two images, one alias chain, one dangling alias, one cycle,
/// and one image whose download fails.
async fn mount_workspace(server: &MockServer) {
    let base = server.uri();
    Mock::given(method("GET"))
        .and(path("/api/emoji.list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "emoji": {
                "party": format!("{base}/img/party"),
                "fiesta": "alias:party",
                "fiesta2": "alias:fiesta",
                "team/logo": format!("{base}/img/logo.jpg"),
                "broken": format!("{base}/img/missing.png"),
                "dangling": "alias:nowhere",
                "ouroboros": "alias:ouroboros"
            }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/img/party"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("Content-Type", "image/gif")
                .set_body_bytes(b"GIF89a"),
        )
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/img/logo.jpg"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"jpeg"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/img/missing.png"))
        .respond_with(ResponseTemplate::new(404))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_run_downloads_resolved_entries_and_reports_failures() {
    let mock_server = MockServer::start().await;
    mount_workspace(&mock_server).await;
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("emojis");

    let summary = run(&config_for(&mock_server, &output_dir))
        .await
        .expect("run should complete despite per-item failures");

    assert_eq!(summary.total_entries(), 7);
    assert_eq!(summary.resolved(), 5);
    // party, fiesta and fiesta2 share one URL.
    assert_eq!(summary.unique_urls(), 3);
    assert_eq!(summary.unresolved(), ["dangling", "ouroboros"]);
    assert_eq!(summary.written(), 4);
    assert_eq!(summary.skipped(), 0);
    assert_eq!(summary.failed(), ["broken"]);

    for name in ["party.gif", "fiesta.gif", "fiesta2.gif", "team_logo.jpg"] {
        assert!(output_dir.join(name).exists(), "{name} should be written");
    }
    assert_eq!(std::fs::read(output_dir.join("fiesta2.gif")).unwrap(), b"GIF89a");
}

#[tokio::test]
async fn test_run_twice_performs_no_redundant_writes() {
    let mock_server = MockServer::start().await;
    mount_workspace(&mock_server).await;
    let temp_dir = TempDir::new().unwrap();
    let config = config_for(&mock_server, temp_dir.path());

    let first = run(&config).await.unwrap();
    assert_eq!(first.written(), 4);

    let modified_before = std::fs::metadata(temp_dir.path().join("party.gif"))
        .unwrap()
        .modified()
        .unwrap();

    let second = run(&config).await.unwrap();
    assert_eq!(second.written(), 0);
    assert_eq!(second.skipped(), 4);
    assert_eq!(second.failed(), ["broken"]);

    let modified_after = std::fs::metadata(temp_dir.path().join("party.gif"))
        .unwrap()
        .modified()
        .unwrap();
    assert_eq!(modified_before, modified_after);
}

#[tokio::test]
async fn test_run_limit_downloads_first_names_only() {
    let mock_server = MockServer::start().await;
    mount_workspace(&mock_server).await;
    let temp_dir = TempDir::new().unwrap();
    let config = config_for(&mock_server, temp_dir.path()).with_limit(Some(2));

    let summary = run(&config).await.unwrap();

    // Counts still describe the whole catalog.
    assert_eq!(summary.total_entries(), 7);
    assert_eq!(summary.attempted(), 2);
    // Resolved names in order: broken, fiesta, fiesta2, party, team/logo.
    assert_eq!(summary.failed(), ["broken"]);
    assert!(temp_dir.path().join("fiesta.gif").exists());
    assert!(!temp_dir.path().join("party.gif").exists());
}

#[tokio::test]
async fn test_run_missing_token_is_fatal_before_any_request() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;
    let temp_dir = TempDir::new().unwrap();
    let output_dir = temp_dir.path().join("emojis");

    let config = Config::new(None)
        .with_api_url(format!("{}/api/emoji.list", mock_server.uri()))
        .unwrap()
        .with_output_dir(&output_dir);

    let err = run(&config).await.unwrap_err();
    assert!(
        matches!(err, RunError::Config(ConfigError::MissingToken { .. })),
        "expected missing token, got {err:?}"
    );
    assert!(!output_dir.exists(), "nothing may be created without a token");
}

#[tokio::test]
async fn test_run_catalog_failure_is_fatal() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/emoji.list"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "ok": false, "error": "not_authed" })),
        )
        .mount(&mock_server)
        .await;
    let temp_dir = TempDir::new().unwrap();

    let err = run(&config_for(&mock_server, temp_dir.path()))
        .await
        .unwrap_err();
    assert!(matches!(err, RunError::Catalog(_)), "got {err:?}");
    assert!(err.to_string().contains("not_authed"));
}

#[tokio::test]
async fn test_run_output_dir_blocked_by_file_is_fatal() {
    let mock_server = MockServer::start().await;
    mount_workspace(&mock_server).await;
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("emojis");
    std::fs::write(&blocker, b"not a directory").unwrap();

    let err = run(&config_for(&mock_server, &blocker)).await.unwrap_err();
    assert!(matches!(err, RunError::OutputDir { .. }), "got {err:?}");
}

#[tokio::test]
async fn test_run_empty_catalog_completes() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/emoji.list"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true, "emoji": {} })))
        .mount(&mock_server)
        .await;
    let temp_dir = TempDir::new().unwrap();

    let summary = run(&config_for(&mock_server, temp_dir.path())).await.unwrap();
    assert_eq!(summary.total_entries(), 0);
    assert_eq!(summary.attempted(), 0);
}
