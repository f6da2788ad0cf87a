// ABOUTME: HTTP integration tests for the liveness and readiness probes
// ABOUTME: Also checks the request id and CORS layers wrapped around every route
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::TestApp;
use helpers::axum_test::AxumTestRequest;
use serde_json::Value;

#[tokio::test]
async fn test_health_reports_service_metadata() {
    let app = TestApp::new().await;

    let body: Value = AxumTestRequest::get("/health")
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "Ecommerce Assessment APIs Project");
    assert_eq!(body["version"], "1.0.0");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_ready_pings_database() {
    let app = TestApp::new().await;

    let body: Value = AxumTestRequest::get("/ready")
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["status"], "ready");
    assert!(body["database"].as_str().unwrap().contains("SQLite"));
}

#[tokio::test]
async fn test_request_id_is_generated_and_propagated() {
    let app = TestApp::new().await;

    let response = AxumTestRequest::get("/health").send(app.app()).await;
    let generated = response.header("x-request-id").expect("request id header");
    assert!(!generated.is_empty());

    let response = AxumTestRequest::get("/health")
        .header("x-request-id", "trace-me-123")
        .send(app.app())
        .await;
    assert_eq!(response.header("x-request-id").as_deref(), Some("trace-me-123"));
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let app = TestApp::new().await;

    let response = AxumTestRequest::get("/health")
        .header("origin", "https://shop.example.com")
        .send(app.app())
        .await
        .assert_status(StatusCode::OK);
    assert_eq!(
        response.header("access-control-allow-origin").as_deref(),
        Some("*")
    );
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let app = TestApp::new().await;
    AxumTestRequest::get("/v2/nothing/")
        .send(app.app())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
