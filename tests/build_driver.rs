//! Build driver tests against a mock BinderHub build service.
//!
//! The HTTP service, event decoding and the driver loop run for real; only the
//! remote end is mocked.

mod common;

use imagebuilder::build::{BuildDriver, BuildError, BuildOutcome, BuildRequest, HttpBuildService};
use imagebuilder::config::{BuildServiceConfig, TerminalConfig};
use imagebuilder::sink::ScrollbackLog;
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const BUILD_PATH: &str = "/services/binder/build/gh/org/repo/HEAD";

fn driver(server: &MockServer) -> BuildDriver<HttpBuildService> {
    let config = BuildServiceConfig {
        base_url: server.uri(),
        ..Default::default()
    };
    BuildDriver::from_config(&config, &TerminalConfig::default()).unwrap()
}

fn log() -> ScrollbackLog {
    ScrollbackLog::new(&TerminalConfig::default())
}

async fn mount_stream(server: &MockServer, body: String) {
    Mock::given(method("GET"))
        .and(path(BUILD_PATH))
        .and(query_param("build_only", "true"))
        .and(header("accept", "text/event-stream"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/event-stream")
                .set_body_string(body),
        )
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_failed_build_writes_messages_and_rejects() {
    let server = MockServer::start().await;
    mount_stream(
        &server,
        common::sse_body(&[
            json!({"message": "Starting build\n"}),
            json!({"message": "Building...\n", "phase": "building"}),
            json!({"phase": "failed"}),
            json!({"message": "never shown\n"}),
        ]),
    )
    .await;

    let mut log = log();
    let result = driver(&server)
        .run_build(&BuildRequest::new("org/repo", "HEAD"), &mut log)
        .await;

    assert!(matches!(result, Err(BuildError::Failed)));
    assert_eq!(BuildOutcome::from(result), BuildOutcome::Failure);
    let text = log.text();
    assert!(text.contains("Starting build"));
    assert!(text.contains("Building..."));
    assert!(!text.contains("never shown"));
    assert!(!text.contains("Logs will appear here"));
}

#[tokio::test]
async fn test_ready_build_resolves_with_image_name() {
    let server = MockServer::start().await;
    mount_stream(
        &server,
        common::sse_body(&[
            json!({"phase": "waiting"}),
            json!({"message": "Pushed image", "phase": "ready", "imageName": "img:1"}),
        ]),
    )
    .await;

    let mut log = log();
    let image = driver(&server)
        .run_build(&BuildRequest::new("org/repo", "HEAD"), &mut log)
        .await
        .unwrap();

    assert_eq!(image, "img:1");
    assert_eq!(log.lines(), vec!["Pushed image".to_string()]);
    assert_eq!((log.cols(), log.rows()), (66, 16));
    assert_eq!(log.visible_rows(), 1);
}

#[tokio::test]
async fn test_keepalives_and_malformed_payloads_are_skipped() {
    let server = MockServer::start().await;
    let body = format!(
        ": keepalive\n\ndata: not json\n\n{}",
        common::sse_body(&[json!({"phase": "ready", "imageName": "img:2"})])
    );
    mount_stream(&server, body).await;

    let mut log = log();
    let image = driver(&server)
        .run_build(&BuildRequest::new("org/repo", "HEAD"), &mut log)
        .await
        .unwrap();
    assert_eq!(image, "img:2");
}

#[tokio::test]
async fn test_stream_ending_without_terminal_phase_fails() {
    let server = MockServer::start().await;
    mount_stream(
        &server,
        format!(
            "{}data: {{\"phase\":\"rea",
            common::sse_body(&[json!({"message": "Step 1/3\n", "phase": "building"})])
        ),
    )
    .await;

    let mut log = log();
    let result = driver(&server)
        .run_build(&BuildRequest::new("org/repo", "HEAD"), &mut log)
        .await;
    assert!(matches!(result, Err(BuildError::StreamEnded)));
    assert!(log.text().contains("Step 1/3"));
}

#[tokio::test]
async fn test_ready_without_image_is_failure() {
    let server = MockServer::start().await;
    mount_stream(&server, common::sse_body(&[json!({"phase": "ready"})])).await;

    let mut log = log();
    let result = driver(&server)
        .run_build(&BuildRequest::new("org/repo", "HEAD"), &mut log)
        .await;
    assert!(matches!(result, Err(BuildError::MissingImage)));
}

#[tokio::test]
async fn test_upstream_error_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(BUILD_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("hub is down"))
        .mount(&server)
        .await;

    let mut log = log();
    let result = driver(&server)
        .run_build(&BuildRequest::new("org/repo", "HEAD"), &mut log)
        .await;

    match result {
        Err(BuildError::Upstream { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "hub is down");
        }
        other => panic!("Expected upstream error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_service_is_network_error() {
    // Nothing listens on port 9 of localhost
    let config = BuildServiceConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        connect_timeout_seconds: 1,
        ..Default::default()
    };
    let driver = BuildDriver::from_config(&config, &TerminalConfig::default()).unwrap();

    let mut log = log();
    let result = driver
        .run_build(&BuildRequest::new("org/repo", "HEAD"), &mut log)
        .await;
    assert!(matches!(result, Err(BuildError::Network(_))));
}

#[tokio::test]
async fn test_token_and_ref_in_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/services/binder/build/gh/org/repo/v2.1"))
        .and(query_param("build_token", "s3cret"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(common::sse_body(&[json!({"phase": "ready", "imageName": "img:v2"})])),
        )
        .expect(1)
        .mount(&server)
        .await;

    let config = BuildServiceConfig {
        base_url: server.uri(),
        build_token: Some("s3cret".to_string()),
        ..Default::default()
    };
    let driver = BuildDriver::from_config(&config, &TerminalConfig::default()).unwrap();

    let mut log = log();
    let image = driver
        .run_build(&BuildRequest::new("org/repo", "v2.1"), &mut log)
        .await
        .unwrap();
    assert_eq!(image, "img:v2");
}
