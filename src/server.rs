// ABOUTME: HTTP server assembly for the Shopfront API
// ABOUTME: Merges every domain router under one middleware stack and serves it with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::constants::network::MAX_BODY_BYTES;
use crate::errors::{AppError, AppResult};
use crate::middleware::{
    create_request_span, propagate_request_id_layer, set_request_id_layer, setup_cors,
};
use crate::resources::ServerResources;
use crate::routes::{
    AuthRoutes, CategoryRoutes, EmailRoutes, HealthRoutes, OrganizationRoutes, ProductRoutes,
    RoleRoutes, UserRoutes,
};

/// Build the complete application router
///
/// Layers, outermost first: CORS, request id assignment, request id
/// propagation, tracing span, body size limit.
pub fn build_router(resources: Arc<ServerResources>) -> Router {
    let cors = setup_cors(&resources.config.cors);

    Router::new()
        .merge(HealthRoutes::routes(resources.clone()))
        .merge(AuthRoutes::routes(resources.clone()))
        .merge(EmailRoutes::routes(resources.clone()))
        .merge(UserRoutes::routes(resources.clone()))
        .merge(RoleRoutes::routes(resources.clone()))
        .merge(OrganizationRoutes::routes(resources.clone()))
        .merge(CategoryRoutes::routes(resources.clone()))
        .merge(ProductRoutes::routes(resources))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http().make_span_with(create_request_span))
        .layer(propagate_request_id_layer())
        .layer(set_request_id_layer())
        .layer(cors)
}

/// Bind `HOST:HTTP_PORT` and serve until Ctrl-C
///
/// # Errors
///
/// Returns an error if the address is invalid, the port cannot be bound or
/// the server fails while running.
pub async fn run(resources: Arc<ServerResources>) -> AppResult<()> {
    let addr: SocketAddr = format!("{}:{}", resources.config.host, resources.config.http_port)
        .parse()
        .map_err(|e| AppError::config(format!("Invalid listen address: {e}")))?;

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {addr}")).with_source(e))?;
    info!(%addr, "HTTP server listening");

    axum::serve(listener, build_router(resources).into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::internal("HTTP server terminated").with_source(e))?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining connections"),
        Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
    }
}
