// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use axum_test::TestResponse;
use serde_json::{json, Value};

use super::helpers::{create_test_app, create_test_app_with, ECHO_ARGUMENT};

/// 校验失败信封：`success` 为假、只有 `error`、CORS头齐全
fn assert_failure(response: &TestResponse, status: StatusCode) -> String {
    assert_eq!(response.status_code(), status);
    assert_eq!(response.header("access-control-allow-origin"), "*");
    assert_eq!(
        response.header("content-type"),
        "application/json; charset=utf-8"
    );

    let body: Value = response.json();
    assert_eq!(body["success"], json!(false));
    assert!(body.get("data").is_none());
    assert!(!body["timestamp"].as_str().unwrap().is_empty());
    body["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn non_zero_exit_returns_500() {
    let app = create_test_app("echo '{\"partial\":true}'\nexit 2\n", ECHO_ARGUMENT);

    let response = app.server.get("/").add_query_param("type", "single").await;

    let error = assert_failure(&response, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(error, "scraper exited with non-zero code: 2");
}

#[tokio::test]
async fn empty_output_returns_404() {
    let app = create_test_app(ECHO_ARGUMENT, "exit 0\n");

    let response = app.server.get("/").await;

    let error = assert_failure(&response, StatusCode::NOT_FOUND);
    assert_eq!(error, "no result");
}

#[tokio::test]
async fn blank_output_line_returns_500() {
    let app = create_test_app("echo\n", ECHO_ARGUMENT);

    let response = app.server.get("/").add_query_param("type", "single").await;

    let error = assert_failure(&response, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error.starts_with("failed to decode scraper output"));
}

#[tokio::test]
async fn invalid_utf8_output_returns_500() {
    let app = create_test_app("printf '{\"title\":\"\\377\\376\"}\\n'\n", ECHO_ARGUMENT);

    let response = app.server.get("/").add_query_param("type", "single").await;

    let error = assert_failure(&response, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error.starts_with("failed to decode scraper output"));
}

#[tokio::test]
async fn invalid_json_output_returns_500() {
    let app = create_test_app("echo error\n", ECHO_ARGUMENT);

    let response = app.server.get("/").add_query_param("type", "single").await;

    let error = assert_failure(&response, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error.starts_with("failed to decode scraper output"));
}

#[tokio::test]
async fn hung_scraper_times_out_with_504() {
    let app = create_test_app_with("sleep 30\n", ECHO_ARGUMENT, |settings| {
        settings.scraper.timeout_secs = 1;
    });

    let response = app.server.get("/").add_query_param("type", "single").await;

    let error = assert_failure(&response, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(error, "scraper timed out after 1s");
}

#[tokio::test]
async fn missing_interpreter_returns_500_naming_crawl_type() {
    let app = create_test_app_with(ECHO_ARGUMENT, ECHO_ARGUMENT, |settings| {
        settings.scraper.interpreter = "/nonexistent/python3".to_string();
    });

    let response = app.server.get("/").await;

    let error = assert_failure(&response, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(error.starts_with("failed to run multi URL crawl: failed to start scraper"));
}
