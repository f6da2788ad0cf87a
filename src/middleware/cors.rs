// ABOUTME: CORS layer built from the CORS_ALLOW_* origin, method and header lists
// ABOUTME: Builds the tower-http CorsLayer from the CORS_ALLOW_* variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use http::{header::HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer};
use tracing::warn;

use crate::config::CorsConfig;

fn is_wildcard(values: &[String]) -> bool {
    values.is_empty() || values.iter().any(|v| v == "*")
}

/// Configure CORS from `CORS_ALLOW_ORIGINS`, `CORS_ALLOW_METHODS` and
/// `CORS_ALLOW_HEADERS`
///
/// Each list is comma separated; `*` (or an empty list) allows anything.
/// Entries that are not valid header values are skipped with a warning.
///
/// ```bash
/// # Development
/// export CORS_ALLOW_ORIGINS="*"
///
/// # Production
/// export CORS_ALLOW_ORIGINS="https://shop.example.com,https://admin.example.com"
/// export CORS_ALLOW_METHODS="GET,POST,PUT,PATCH,DELETE"
/// ```
#[must_use]
pub fn setup_cors(config: &CorsConfig) -> CorsLayer {
    let allow_origin = if is_wildcard(&config.allow_origins) {
        AllowOrigin::any()
    } else {
        let origins: Vec<HeaderValue> = config
            .allow_origins
            .iter()
            .filter_map(|origin| {
                HeaderValue::from_str(origin)
                    .inspect_err(|_| warn!(origin = %origin, "Ignoring invalid CORS origin"))
                    .ok()
            })
            .collect();
        if origins.is_empty() {
            AllowOrigin::any()
        } else {
            AllowOrigin::list(origins)
        }
    };

    let allow_methods = if is_wildcard(&config.allow_methods) {
        AllowMethods::from(Any)
    } else {
        let methods: Vec<Method> = config
            .allow_methods
            .iter()
            .filter_map(|m| {
                Method::from_bytes(m.to_ascii_uppercase().as_bytes())
                    .inspect_err(|_| warn!(method = %m, "Ignoring invalid CORS method"))
                    .ok()
            })
            .collect();
        AllowMethods::list(methods)
    };

    let allow_headers = if is_wildcard(&config.allow_headers) {
        AllowHeaders::from(Any)
    } else {
        let headers: Vec<HeaderName> = config
            .allow_headers
            .iter()
            .filter_map(|h| {
                HeaderName::from_bytes(h.to_ascii_lowercase().as_bytes())
                    .inspect_err(|_| warn!(header = %h, "Ignoring invalid CORS header"))
                    .ok()
            })
            .collect();
        AllowHeaders::list(headers)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(allow_methods)
        .allow_headers(allow_headers)
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::routing::get;
    use axum::Router;
    use http::header::{ACCESS_CONTROL_ALLOW_ORIGIN, ORIGIN};
    use http::Request;
    use tower::ServiceExt;

    use super::*;

    fn cors(origins: &[&str]) -> CorsConfig {
        CorsConfig {
            allow_origins: origins.iter().map(|s| (*s).to_owned()).collect(),
            allow_methods: vec!["*".to_owned()],
            allow_headers: vec!["*".to_owned()],
        }
    }

    async fn allowed_origin(config: &CorsConfig, origin: &str) -> Option<String> {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(setup_cors(config));
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        response
            .headers()
            .get(ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_owned())
    }

    #[tokio::test]
    async fn test_wildcard_allows_any_origin() {
        let origin = allowed_origin(&cors(&["*"]), "https://anywhere.example").await;
        assert_eq!(origin.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn test_origin_list_is_enforced() {
        let config = cors(&["https://shop.example.com"]);
        assert_eq!(
            allowed_origin(&config, "https://shop.example.com")
                .await
                .as_deref(),
            Some("https://shop.example.com")
        );
        assert!(allowed_origin(&config, "https://evil.example")
            .await
            .is_none());
    }
}
