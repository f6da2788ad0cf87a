// ABOUTME: HTTP middleware for request tracing, authentication, and CORS
// ABOUTME: Provides request ID propagation, bearer authentication, and cross-origin policy
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

/// Bearer token authentication
pub mod auth;
/// Cross-origin policy
pub mod cors;
/// Request ids and spans
pub mod tracing;

// Authentication middleware
pub use auth::{AuthMiddleware, CurrentUser, CurrentUserResponse};

// CORS configuration
pub use cors::setup_cors;

// Request tracing
pub use self::tracing::{
    create_request_span, propagate_request_id_layer, set_request_id_layer, REQUEST_ID_HEADER,
};
