// ABOUTME: HTTP integration tests for the category and product catalog
// ABOUTME: Covers CRUD, name lookups, per-category listing, cascades and validation errors
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

async fn create_category(app: &TestApp, token: &str, name: &str) -> i64 {
    let body: Value = AxumTestRequest::post("/v1/category/")
        .bearer(token)
        .json(&json!({ "category_name": name, "category_description": "Things" }))
        .send(app.app())
        .await
        .assert_status(StatusCode::CREATED)
        .json();
    body["id"].as_i64().unwrap()
}

async fn create_product(app: &TestApp, token: &str, name: &str, category_id: i64) -> Value {
    AxumTestRequest::post("/v1/product/")
        .bearer(token)
        .json(&json!({
            "product_name": name,
            "price": 9.99,
            "quantity": 20,
            "category_id": category_id
        }))
        .send(app.app())
        .await
        .assert_status(StatusCode::CREATED)
        .json()
}

#[tokio::test]
async fn test_category_crud() {
    let app = TestApp::new().await;
    let (_, token) = app.create_active_user("catalog", "manager").await;
    let id = create_category(&app, &token, "Kitchen").await;

    let body: Value = AxumTestRequest::get(&format!("/v1/category/{id}/"))
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["category_name"], "Kitchen");

    AxumTestRequest::get("/v1/category/name/Kitchen/")
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK);

    let body: Value = AxumTestRequest::put(&format!("/v1/category/{id}/"))
        .bearer(&token)
        .json(&json!({ "category_name": "Cookware" }))
        .send(app.app())
        .await
        .assert_status(StatusCode::ACCEPTED)
        .json();
    assert_eq!(body["category_name"], "Cookware");
    assert_eq!(body["category_description"], "Things");

    let body: Value = AxumTestRequest::patch(&format!("/v1/category/{id}/"))
        .bearer(&token)
        .json(&json!({ "category_description": "Pots and pans" }))
        .send(app.app())
        .await
        .assert_status(StatusCode::ACCEPTED)
        .json();
    assert_eq!(body["category_name"], "Cookware");
    assert_eq!(body["category_description"], "Pots and pans");

    AxumTestRequest::delete(&format!("/v1/category/{id}/"))
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let body: Value = AxumTestRequest::get(&format!("/v1/category/{id}/"))
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();
    assert_eq!(body["detail"], "Category not found");
}

#[tokio::test]
async fn test_category_errors() {
    let app = TestApp::new().await;
    let (_, token) = app.create_active_user("catalog", "manager").await;
    create_category(&app, &token, "Garden").await;

    let body: Value = AxumTestRequest::post("/v1/category/")
        .bearer(&token)
        .json(&json!({ "category_name": "Garden" }))
        .send(app.app())
        .await
        .assert_status(StatusCode::CONFLICT)
        .json();
    assert_eq!(body["code"], "CONSTRAINT_VIOLATION");

    AxumTestRequest::post("/v1/category/")
        .bearer(&token)
        .json(&json!({ "category_name": "   " }))
        .send(app.app())
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    AxumTestRequest::post("/v1/category/")
        .bearer(&token)
        .json(&json!({ "category_description": "no name" }))
        .send(app.app())
        .await
        .assert_status(StatusCode::UNPROCESSABLE_ENTITY);

    AxumTestRequest::delete("/v1/category/4242/")
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::NOT_FOUND);

    AxumTestRequest::get("/v1/category/")
        .send(app.app())
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_category_list_paginates() {
    let app = TestApp::new().await;
    let (_, token) = app.create_active_user("catalog", "user").await;
    for name in ["One", "Two", "Three"] {
        create_category(&app, &token, name).await;
    }

    let page: Value = AxumTestRequest::get("/v1/category/?page=1&limit=2")
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(page["total_records"], 3);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["records"][0]["category_name"], "One");
    assert_eq!(page["records"].as_array().unwrap().len(), 2);

    let page: Value = AxumTestRequest::get("/v1/category/?page=5&limit=2")
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(page["records"].as_array().unwrap().is_empty());

    for uri in [
        "/v1/category/?page=4294967295&limit=4294967295",
        "/v1/product/?page=4294967295&limit=4294967295",
    ] {
        let body: Value = AxumTestRequest::get(uri)
            .bearer(&token)
            .send(app.app())
            .await
            .assert_status(StatusCode::BAD_REQUEST)
            .json();
        assert_eq!(body["detail"], "Page and limit are too large");
    }

    // the largest page that still fits an offset is simply empty
    let page: Value = AxumTestRequest::get("/v1/category/?page=4294967295&limit=1")
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(page["records"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_product_crud_and_defaults() {
    let app = TestApp::new().await;
    let (_, token) = app.create_active_user("catalog", "manager").await;
    let kitchen = create_category(&app, &token, "Kitchen").await;
    let garden = create_category(&app, &token, "Garden").await;

    let product = create_product(&app, &token, "Skillet", kitchen).await;
    assert_eq!(product["is_available"], true);
    assert_eq!(product["low_stock_threshold"], 50);
    assert_eq!(product["quantity"], 20);
    let id = product["id"].as_i64().unwrap();

    let body: Value = AxumTestRequest::get("/v1/product/name/Skillet/")
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(body["id"], id);

    let body: Value = AxumTestRequest::put(&format!("/v1/product/{id}/"))
        .bearer(&token)
        .json(&json!({
            "product_name": "Cast Iron Skillet",
            "price": 24.5,
            "quantity": 3,
            "low_stock_threshold": 5,
            "category_id": kitchen
        }))
        .send(app.app())
        .await
        .assert_status(StatusCode::ACCEPTED)
        .json();
    assert_eq!(body["product_name"], "Cast Iron Skillet");
    assert_eq!(body["price"], 24.5);
    assert_eq!(body["low_stock_threshold"], 5);

    let body: Value = AxumTestRequest::patch(&format!("/v1/product/{id}/"))
        .bearer(&token)
        .json(&json!({ "category_id": garden, "is_available": false }))
        .send(app.app())
        .await
        .assert_status(StatusCode::ACCEPTED)
        .json();
    assert_eq!(body["category_id"], garden);
    assert_eq!(body["is_available"], false);
    assert_eq!(body["product_name"], "Cast Iron Skillet");

    AxumTestRequest::delete(&format!("/v1/product/{id}/"))
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let body: Value = AxumTestRequest::get(&format!("/v1/product/{id}/"))
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();
    assert_eq!(body["detail"], "Product not found");
}

#[tokio::test]
async fn test_product_validation_and_missing_category() {
    let app = TestApp::new().await;
    let (_, token) = app.create_active_user("catalog", "manager").await;
    let kitchen = create_category(&app, &token, "Kitchen").await;

    for body in [
        json!({ "product_name": "Pan", "price": 0, "quantity": 1, "category_id": kitchen }),
        json!({ "product_name": "Pan", "price": 5, "quantity": 0, "category_id": kitchen }),
        json!({ "product_name": "Pan", "price": 5, "quantity": 1, "low_stock_threshold": -1, "category_id": kitchen }),
        json!({ "product_name": "", "price": 5, "quantity": 1, "category_id": kitchen }),
        json!({ "product_name": "Pan", "price": "cheap", "quantity": 1, "category_id": kitchen }),
    ] {
        AxumTestRequest::post("/v1/product/")
            .bearer(&token)
            .json(&body)
            .send(app.app())
            .await
            .assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    let body: Value = AxumTestRequest::post("/v1/product/")
        .bearer(&token)
        .json(&json!({ "product_name": "Pan", "price": 5, "quantity": 1, "category_id": 999 }))
        .send(app.app())
        .await
        .assert_status(StatusCode::NOT_FOUND)
        .json();
    assert_eq!(body["detail"], "Category not found");

    let product = create_product(&app, &token, "Pan", kitchen).await;
    AxumTestRequest::patch(&format!("/v1/product/{}/", product["id"]))
        .bearer(&token)
        .json(&json!({ "category_id": 999 }))
        .send(app.app())
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_products_by_category_and_cascade() {
    let app = TestApp::new().await;
    let (_, token) = app.create_active_user("catalog", "admin").await;
    let kitchen = create_category(&app, &token, "Kitchen").await;
    let garden = create_category(&app, &token, "Garden").await;
    for name in ["Pot", "Pan", "Ladle"] {
        create_product(&app, &token, name, kitchen).await;
    }
    create_product(&app, &token, "Rake", garden).await;

    let page: Value = AxumTestRequest::get(&format!("/v1/product/category/{kitchen}/?page=1&limit=2"))
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(page["total_records"], 3);
    assert_eq!(page["total_pages"], 2);
    assert_eq!(page["records"][0]["product_name"], "Pot");

    let all: Value = AxumTestRequest::get("/v1/product/")
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(all["total_records"], 4);

    AxumTestRequest::delete(&format!("/v1/category/{kitchen}/"))
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let all: Value = AxumTestRequest::get("/v1/product/")
        .bearer(&token)
        .send(app.app())
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(all["total_records"], 1);
    assert_eq!(all["records"][0]["product_name"], "Rake");
}
