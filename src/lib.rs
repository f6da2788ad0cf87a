// ABOUTME: Main library entry point for the Shopfront e-commerce API
// ABOUTME: Exposes configuration, storage, authentication, email and HTTP routing modules
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

#![deny(unsafe_code)]

//! # Shopfront API
//!
//! An HTTP JSON API for a small storefront: organizations register an admin
//! account, admins manage users, and authenticated users manage a catalog of
//! categories and products.
//!
//! ## Features
//!
//! - **Self-registration** with emailed one-time codes for verification
//! - **JWT sessions** with access/refresh tokens and server-side logout
//! - **Catalog CRUD** with page/limit pagination
//! - **Pluggable storage**: `SQLite` by default, `PostgreSQL` behind a feature
//!
//! ## Architecture
//!
//! - **Config**: environment-driven configuration (`.env` aware)
//! - **Database plugins**: `DatabaseProvider` trait with one implementation per backend
//! - **Routes**: one router per domain, merged by [`server::build_router`]
//! - **Middleware**: bearer authentication, CORS and request tracing
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use shopfront_api::config::ServerConfig;
//! use shopfront_api::errors::AppResult;
//!
//! #[tokio::main]
//! async fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Shopfront API configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Password hashing and JWT issuing
pub mod auth;

/// Environment configuration
pub mod config;

/// Application constants, re-exported from `shopfront-core`
pub mod constants;

/// Storage abstraction and backends
pub mod database_plugins;

/// OTP email delivery
pub mod email;

/// Error types, re-exported from `shopfront-core`
pub mod errors;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Domain models and request bodies
pub mod models;

/// Pagination, re-exported from `shopfront-core`
pub mod pagination;

/// Shared state handed to route handlers
pub mod resources;

/// HTTP route handlers
pub mod routes;

/// Built-in roles and super-admin seeding
pub mod seed;

/// Router assembly and serving
pub mod server;

/// Field validation rules
pub mod validation;
