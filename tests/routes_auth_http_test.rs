// ABOUTME: HTTP integration tests for registration, login, token refresh and logout
// ABOUTME: Drives the full router with an in-memory database and a recording mailer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use common::{TestApp, SUPERUSER_PASSWORD, SUPERUSER_USERNAME, USER_PASSWORD};
use helpers::axum_test::{AxumTestRequest, AxumTestResponse};
use serde_json::{json, Value};
use shopfront_api::database_plugins::DatabaseProvider;
use shopfront_api::models::TokenStatus;

fn register_body(organization: &str, username: &str) -> Value {
    json!({
        "organization_name": organization,
        "organization_description": "Kitchen supplies",
        "first_name": "jane",
        "last_name": "DOE",
        "username": username,
        "email": format!("{username}@Example.com"),
        "password": USER_PASSWORD,
        "role_id": 2,
        "city": "Lahore"
    })
}

async fn login(app: &TestApp, username: &str, password: &str) -> AxumTestResponse {
    AxumTestRequest::post("/auth/login/")
        .form(&[("username", username), ("password", password)])
        .send(app.app())
        .await
}

#[tokio::test]
async fn test_register_creates_inactive_admin_and_mails_otp() {
    let app = TestApp::new().await;

    let body: Value = AxumTestRequest::post("/auth/register/")
        .json(&register_body("Acme Kitchen", "JaneDoe"))
        .send(app.app())
        .await
        .assert_status(StatusCode::CREATED)
        .json();

    assert_eq!(body["username"], "janedoe");
    assert_eq!(body["email"], "janedoe@example.com");
    assert_eq!(body["first_name"], "Jane");
    assert_eq!(body["last_name"], "Doe");
    assert_eq!(body["organization_name"], "Acme Kitchen");
    assert_eq!(body["is_active"], false);
    assert_eq!(body["email_verified"], false);
    assert_eq!(body["token_status"], "email_verify");
    assert!(body.get("password_hash").is_none());
    assert!(body.get("email_otp").is_none());

    let message = app
        .outbox
        .last_message_to("janedoe@example.com")
        .await
        .expect("verification email");
    assert_eq!(message.subject, "Welcome to Acme Shop");

    let stored = app
        .db()
        .get_user_by_username("janedoe")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.email_otp.is_some());
    assert!(message.html_body.contains(stored.email_otp.as_deref().unwrap()));
    assert_ne!(stored.password_hash, USER_PASSWORD);
}

#[tokio::test]
async fn test_register_rejects_duplicates_in_order() {
    let app = TestApp::new().await;
    AxumTestRequest::post("/auth/register/")
        .json(&register_body("Acme Kitchen", "janedoe"))
        .send(app.app())
        .await
        .assert_status(StatusCode::CREATED);

    let body: Value = AxumTestRequest::post("/auth/register/")
        .json(&register_body("Acme Kitchen", "johndoe"))
        .send(app.app())
        .await
        .assert_status(StatusCode::CONFLICT)
        .json();
    assert_eq!(body["detail"], "Organization already exists");

    let body: Value = AxumTestRequest::post("/auth/register/")
        .json(&register_body("Other Kitchen", "janedoe"))
        .send(app.app())
        .await
        .assert_status(StatusCode::CONFLICT)
        .json();
    assert_eq!(body["detail"], "Username already exists");

    let mut same_email = register_body("Third Kitchen", "someoneelse");
    same_email["email"] = json!("janedoe@example.com");
    let body: Value = AxumTestRequest::post("/auth/register/")
        .json(&same_email)
        .send(app.app())
        .await
        .assert_status(StatusCode::CONFLICT)
        .json();
    assert_eq!(body["detail"], "Email already exists");
    assert_eq!(body["code"], "RESOURCE_ALREADY_EXISTS");
}

#[tokio::test]
async fn test_register_validation_failures_return_422() {
    let app = TestApp::new().await;

    let mut weak = register_body("Acme Kitchen", "janedoe");
    weak["password"] = json!("password");
    let body: Value = AxumTestRequest::post("/auth/register/")
        .json(&weak)
        .send(app.app())
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY)
        .json();
    assert_eq!(body["code"], "VALIDATION_FAILED");

    let mut bad_name = register_body("Acme Kitchen", "janedoe");
    bad_name["first_name"] = json!("Jane2");
    AxumTestRequest::post("/auth/register/")
        .json(&bad_name)
        .send(app.app())
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    AxumTestRequest::post("/auth/register/")
        .header("content-type", "application/json")
        .raw_body("{\"organization_name\": ")
        .send(app.app())
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    assert!(app
        .db()
        .get_organization_by_name("Acme Kitchen")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_register_rolls_back_organization_when_email_fails() {
    let app = TestApp::with_failing_email().await;

    let body: Value = AxumTestRequest::post("/auth/register/")
        .json(&register_body("Acme Kitchen", "janedoe"))
        .send(app.app())
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .json();
    assert_eq!(body["detail"], "Email sending failed");

    assert!(app
        .db()
        .get_organization_by_name("Acme Kitchen")
        .await
        .unwrap()
        .is_none());
    assert!(app
        .db()
        .get_user_by_username("janedoe")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_login_with_username_or_email() {
    let app = TestApp::new().await;
    let (user, _) = app.create_active_user("shopkeeper", "admin").await;

    let body: Value = login(&app, "ShopKeeper", USER_PASSWORD)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["token_type"], "bearer");
    assert_eq!(body["role_id"], user.role_id);
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body["refresh_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert!(body.get("detail").is_none());

    login(&app, "shopkeeper@example.com", USER_PASSWORD)
        .await
        .assert_status(StatusCode::OK);

    let stored = app.db().get_user(user.id).await.unwrap().unwrap();
    assert_eq!(stored.token_status, TokenStatus::Login);
}

#[tokio::test]
async fn test_login_failures() {
    let app = TestApp::new().await;

    let body: Value = login(&app, "nobody", USER_PASSWORD)
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();
    assert_eq!(body["detail"], "User not found");

    let response = login(&app, SUPERUSER_USERNAME, "Wrong@Pass1")
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate").as_deref(), Some("Bearer"));
    let body: Value = response.json();
    assert_eq!(body["detail"], "Incorrect password");

    AxumTestRequest::post("/auth/login/")
        .form(&[("username", SUPERUSER_USERNAME)])
        .send(app.app())
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_refresh_issues_new_access_token() {
    let app = TestApp::new().await;
    let tokens: Value = login(&app, SUPERUSER_USERNAME, SUPERUSER_PASSWORD)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let body: Value = AxumTestRequest::post("/auth/refresh/")
        .json(&json!({ "refresh_token": tokens["refresh_token"] }))
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["token_type"], "access_token");
    let access = body["access_token"].as_str().unwrap();

    AxumTestRequest::get("/v1/user/me/")
        .bearer(access)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK);

    // an access token is not accepted as a refresh token
    AxumTestRequest::post("/auth/refresh/")
        .json(&json!({ "refresh_token": tokens["access_token"] }))
        .send(app.app())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_for_deleted_user_is_not_found() {
    let app = TestApp::new().await;
    let (user, _) = app.create_active_user("shortlived", "user").await;
    let tokens: Value = login(&app, "shortlived", USER_PASSWORD)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert!(app.db().delete_user(user.id).await.unwrap());

    AxumTestRequest::post("/auth/refresh/")
        .json(&json!({ "refresh_token": tokens["refresh_token"] }))
        .send(app.app())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logout_invalidates_existing_tokens() {
    let app = TestApp::new().await;
    let (_, token) = app.create_active_user("leaving", "manager").await;

    let body: Value = AxumTestRequest::post("/auth/logout/")
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["detail"], "User logged out successfully");

    let body: Value = AxumTestRequest::get("/v1/user/me/")
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .json();
    assert_eq!(body["detail"], "User has been logged out");
}

#[tokio::test]
async fn test_protected_routes_require_bearer_token() {
    let app = TestApp::new().await;

    let response = AxumTestRequest::post("/auth/logout/")
        .send(app.app())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(response.header("www-authenticate").as_deref(), Some("Bearer"));

    let body: Value = AxumTestRequest::get("/v1/category/")
        .bearer("not-a-jwt")
        .send(app.app())
        .await
        .assert_status(StatusCode::UNAUTHORIZED)
        .json();
    assert_eq!(body["detail"], "Could not validate credentials");
}

#[tokio::test]
async fn test_inactive_user_is_rejected() {
    let app = TestApp::new().await;
    AxumTestRequest::post("/auth/register/")
        .json(&register_body("Acme Kitchen", "janedoe"))
        .send(app.app())
        .await
        .assert_status(StatusCode::CREATED);

    let tokens: Value = login(&app, "janedoe", USER_PASSWORD)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let body: Value = AxumTestRequest::get("/v1/user/me/")
        .bearer(tokens["access_token"].as_str().unwrap())
        .send(app.app())
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .json();
    assert_eq!(body["detail"], "Inactive user");
}

#[tokio::test]
async fn test_register_refuses_superuser_role() {
    let app = TestApp::new().await;
    let superuser_role = app
        .db()
        .get_role_by_name("super-admin")
        .await
        .unwrap()
        .unwrap();

    let mut body = register_body("Climbers Inc", "climber");
    body["role_id"] = json!(superuser_role.id);
    let response = AxumTestRequest::post("/auth/register/")
        .json(&body)
        .send(app.app())
        .await
        .assert_status(StatusCode::FORBIDDEN);
    assert_eq!(response.error_code(), "PERMISSION_DENIED");

    assert!(app.db().get_user_by_username("climber").await.unwrap().is_none());
    assert!(app
        .db()
        .get_organization_by_name("Climbers Inc")
        .await
        .unwrap()
        .is_none());
    assert!(app.outbox.last_message_to("climber@example.com").await.is_none());
}
