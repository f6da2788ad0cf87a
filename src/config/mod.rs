// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Groups environment loading and database connection settings
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

//! Configuration module for the Shopfront API
//!
//! - **Environment**: server configuration from environment variables
//! - **Database**: connection URL composition for `SQLite` and `PostgreSQL`

/// Database connection configuration
pub mod database;
/// Environment and server configuration
pub mod environment;

pub use database::{DatabaseConfig, DatabaseUrl};
pub use environment::{
    AuthConfig, ClientConfig, CorsConfig, EmailBackend, EmailConfig, EnvReader, Secret,
    ServerConfig, SuperuserConfig,
};
