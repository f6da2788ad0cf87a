// ABOUTME: HTTP integration tests for role and organization management
// ABOUTME: Any authenticated user may read, only the super-admin may write
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
use serde_json::{json, Value};
use shopfront_api::database_plugins::DatabaseProvider;

#[tokio::test]
async fn test_seeded_roles_are_listed() {
    let app = TestApp::new().await;
    let (_, token) = app.create_active_user("reader", "user").await;

    let body: Value = AxumTestRequest::get("/v1/role/")
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    let names: Vec<&str> = body["records"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["role_name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["super-admin", "admin", "manager", "user"]);

    let body: Value = AxumTestRequest::get("/v1/role/name/manager/")
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["role_description"], "Manager Role Description");
}

#[tokio::test]
async fn test_role_writes_require_superuser() {
    let app = TestApp::new().await;
    let (_, admin_token) = app.create_active_user("orgadmin", "admin").await;

    let body: Value = AxumTestRequest::post("/v1/role/")
        .bearer(&admin_token)
        .json(&json!({ "role_name": "auditor" }))
        .send(app.app())
        .await
        .assert_status(StatusCode::FORBIDDEN)
        .json();
    assert_eq!(body["code"], "PERMISSION_DENIED");

    AxumTestRequest::delete("/v1/role/4/")
        .bearer(&admin_token)
        .send(app.app())
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let root = app.superuser_token().await;
    let created: Value = AxumTestRequest::post("/v1/role/")
        .bearer(&root)
        .json(&json!({ "role_name": "auditor", "role_description": "Reads reports" }))
        .send(app.app())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    let id = created["id"].as_i64().unwrap();

    let body: Value = AxumTestRequest::patch(&format!("/v1/role/{id}/"))
        .bearer(&root)
        .json(&json!({ "role_description": "Reads every report" }))
        .send(app.app())
        .await
        .assert_status(StatusCode::ACCEPTED)
        .json();
    assert_eq!(body["role_name"], "auditor");
    assert_eq!(body["role_description"], "Reads every report");

    AxumTestRequest::post("/v1/role/")
        .bearer(&root)
        .json(&json!({ "role_name": "auditor" }))
        .send(app.app())
        .await
        .assert_status(StatusCode::CONFLICT);

    AxumTestRequest::delete(&format!("/v1/role/{id}/"))
        .bearer(&root)
        .send(app.app())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let body: Value = AxumTestRequest::get(&format!("/v1/role/{id}/"))
        .bearer(&root)
        .send(app.app())
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();
    assert_eq!(body["detail"], "Role not found");
}

#[tokio::test]
async fn test_organization_management() {
    let app = TestApp::new().await;
    let (member, token) = app.create_active_user("member", "manager").await;
    let organization_id = member.organization_id.unwrap();

    let body: Value = AxumTestRequest::get(&format!("/v1/organization/{organization_id}/"))
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["organization_name"], "member org");

    AxumTestRequest::get("/v1/organization/name/member%20org/")
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK);

    AxumTestRequest::put(&format!("/v1/organization/{organization_id}/"))
        .bearer(&token)
        .json(&json!({ "organization_name": "Renamed" }))
        .send(app.app())
        .await
        .assert_status(StatusCode::FORBIDDEN);

    let root = app.superuser_token().await;
    let body: Value = AxumTestRequest::put(&format!("/v1/organization/{organization_id}/"))
        .bearer(&root)
        .json(&json!({ "organization_name": "Renamed", "organization_description": "New name" }))
        .send(app.app())
        .await
        .assert_status(StatusCode::ACCEPTED)
        .json();
    assert_eq!(body["organization_name"], "Renamed");

    let page: Value = AxumTestRequest::get("/v1/organization/?page=1&limit=10")
        .bearer(&root)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(page["total_records"], 1);

    // deleting an organization removes its users
    AxumTestRequest::delete(&format!("/v1/organization/{organization_id}/"))
        .bearer(&root)
        .send(app.app())
        .await
        .assert_status(StatusCode::NO_CONTENT);
    assert!(app.db().get_user(member.id).await.unwrap().is_none());

    AxumTestRequest::delete(&format!("/v1/organization/{organization_id}/"))
        .bearer(&root)
        .send(app.app())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}
