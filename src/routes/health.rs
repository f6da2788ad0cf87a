// ABOUTME: Liveness and readiness endpoints reporting service metadata and database reachability
// ABOUTME: Liveness answers unconditionally, readiness round-trips the database
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tracing::warn;

use crate::database_plugins::DatabaseProvider;
use crate::resources::ServerResources;

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/health", get(Self::handle_health))
            .route("/ready", get(Self::handle_ready))
            .with_state(resources)
    }

    async fn handle_health(State(resources): State<Arc<ServerResources>>) -> Json<serde_json::Value> {
        Json(json!({
            "status": "healthy",
            "service": resources.config.project.title,
            "version": resources.config.project.version,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        }))
    }

    async fn handle_ready(State(resources): State<Arc<ServerResources>>) -> Response {
        let timestamp = chrono::Utc::now().to_rfc3339();
        match resources.database.ping().await {
            Ok(()) => Json(json!({
                "status": "ready",
                "database": resources.database.backend_info(),
                "timestamp": timestamp,
            }))
            .into_response(),
            Err(e) => {
                warn!(error = %e, "Readiness check failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    Json(json!({
                        "status": "unavailable",
                        "timestamp": timestamp,
                    })),
                )
                    .into_response()
            }
        }
    }
}
