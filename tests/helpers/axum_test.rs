// ABOUTME: In-process HTTP client for driving the Shopfront router in integration tests
// ABOUTME: Builds JSON, form and raw requests and reads status, headers and error envelopes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, HeaderName, HeaderValue, Method, Request, Response, StatusCode};
use axum::Router;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tower::ServiceExt;

const JSON_MIME: &str = "application/json";
const FORM_MIME: &str = "application/x-www-form-urlencoded";

enum RequestBody {
    Empty,
    Encoded { content_type: &'static str, text: String },
    Raw(String),
}

/// Request under construction, sent with [`AxumTestRequest::send`]
pub struct AxumTestRequest {
    method: Method,
    uri: String,
    headers: HeaderMap,
    body: RequestBody,
}

impl AxumTestRequest {
    fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_owned(),
            headers: HeaderMap::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    pub fn put(uri: &str) -> Self {
        Self::new(Method::PUT, uri)
    }

    pub fn patch(uri: &str) -> Self {
        Self::new(Method::PATCH, uri)
    }

    pub fn delete(uri: &str) -> Self {
        Self::new(Method::DELETE, uri)
    }

    /// Set a header, replacing any earlier value
    pub fn header(mut self, name: &str, value: &str) -> Self {
        let name = HeaderName::try_from(name).expect("valid header name");
        let value = HeaderValue::try_from(value).expect("valid header value");
        self.headers.insert(name, value);
        self
    }

    /// `Authorization: Bearer <token>`
    pub fn bearer(self, token: &str) -> Self {
        self.header(AUTHORIZATION.as_str(), &format!("Bearer {token}"))
    }

    /// Serialize `data` as the JSON body
    pub fn json<T: Serialize>(mut self, data: &T) -> Self {
        self.body = RequestBody::Encoded {
            content_type: JSON_MIME,
            text: serde_json::to_string(data).expect("serializable JSON body"),
        };
        self
    }

    /// Serialize `data` as an urlencoded form body
    pub fn form<T: Serialize>(mut self, data: &T) -> Self {
        self.body = RequestBody::Encoded {
            content_type: FORM_MIME,
            text: serde_urlencoded::to_string(data).expect("serializable form body"),
        };
        self
    }

    /// Send `body` as-is; combine with [`Self::header`] to pick a content type
    pub fn raw_body(mut self, body: &str) -> Self {
        self.body = RequestBody::Raw(body.to_owned());
        self
    }

    /// Run the request through `app` and buffer the response
    pub async fn send(self, app: Router) -> AxumTestResponse {
        let mut headers = self.headers;
        let body = match self.body {
            RequestBody::Empty => Body::empty(),
            RequestBody::Encoded { content_type, text } => {
                headers
                    .entry(CONTENT_TYPE)
                    .or_insert(HeaderValue::from_static(content_type));
                Body::from(text)
            }
            RequestBody::Raw(text) => Body::from(text),
        };

        let mut request = Request::builder()
            .method(self.method)
            .uri(self.uri)
            .body(body)
            .expect("valid request");
        request.headers_mut().extend(headers);

        let response = app.oneshot(request).await.expect("router is infallible");
        AxumTestResponse::read(response).await
    }
}

/// Fully buffered response
pub struct AxumTestResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
}

impl AxumTestResponse {
    async fn read(response: Response<Body>) -> Self {
        let (parts, body) = response.into_parts();
        let body = to_bytes(body, usize::MAX)
            .await
            .expect("readable response body")
            .to_vec();
        Self {
            status: parts.status,
            headers: parts.headers,
            body,
        }
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Header value, if present and ASCII
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned)
    }

    pub fn json<T: DeserializeOwned>(self) -> T {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "response is not the expected JSON ({e}): {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn text(self) -> String {
        String::from_utf8(self.body).expect("UTF-8 response body")
    }

    /// `detail` of a `{"detail", ...}` body
    pub fn detail(self) -> String {
        let body: Value = self.json();
        body["detail"]
            .as_str()
            .expect("body carries a string detail")
            .to_owned()
    }

    /// `code` of an error envelope
    pub fn error_code(&self) -> String {
        let body: Value = serde_json::from_slice(&self.body).expect("error body is JSON");
        body["code"].as_str().expect("error body has a code").to_owned()
    }

    /// Panic with the body text when the status differs
    pub fn assert_status(self, expected: StatusCode) -> Self {
        assert_eq!(
            self.status,
            expected,
            "unexpected status, body: {}",
            String::from_utf8_lossy(&self.body)
        );
        self
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use axum::routing::{get, post};
    use axum::{Form, Json};
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_json_body_sets_content_type() {
        let app = Router::new().route(
            "/echo",
            post(|headers: HeaderMap, Json(body): Json<Value>| async move {
                let content_type = headers[CONTENT_TYPE].to_str().unwrap_or_default().to_owned();
                Json(json!({ "content_type": content_type, "received": body }))
            }),
        );

        let body: Value = AxumTestRequest::post("/echo")
            .json(&json!({ "category_name": "Garden" }))
            .send(app)
            .await
            .assert_status(StatusCode::OK)
            .json();
        assert_eq!(body["content_type"], JSON_MIME);
        assert_eq!(body["received"]["category_name"], "Garden");
    }

    #[tokio::test]
    async fn test_explicit_content_type_wins_over_form_default() {
        let app = Router::new().route(
            "/login",
            post(|Form(fields): Form<HashMap<String, String>>| async move {
                fields.get("username").cloned().unwrap_or_default()
            }),
        );

        let response = AxumTestRequest::post("/login")
            .header(CONTENT_TYPE.as_str(), "text/plain")
            .form(&[("username", "jane"), ("password", "secret")])
            .send(app)
            .await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }

    #[tokio::test]
    async fn test_error_envelope_accessors() {
        let app = Router::new().route(
            "/missing",
            get(|| async {
                (
                    StatusCode::NOT_FOUND,
                    Json(json!({ "detail": "Product not found", "code": "RESOURCE_NOT_FOUND" })),
                )
            }),
        );

        let response = AxumTestRequest::get("/missing")
            .bearer("abc")
            .send(app)
            .await
            .assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.error_code(), "RESOURCE_NOT_FOUND");
        assert_eq!(response.detail(), "Product not found");
    }
}
