// ABOUTME: SQLite backend for local development and tests
// ABOUTME: Owns the connection pool and the SQLite dialect of the table definitions
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

//! `SQLite` database implementation
//!
//! In-memory databases live only as long as their connection, so the pool is
//! pinned to a single connection that is never recycled.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions, SqliteRow};
use sqlx::{Pool, Sqlite};
use tracing::{debug, info};

use crate::errors::AppResult;

/// Table definitions in creation order
const SCHEMA: [&str; 8] = [
    r"
    CREATE TABLE IF NOT EXISTS roles (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        role_name VARCHAR(255) NOT NULL UNIQUE,
        role_description VARCHAR(255),
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS organizations (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        organization_name VARCHAR(255) NOT NULL UNIQUE,
        organization_description VARCHAR(255),
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        first_name VARCHAR(255) NOT NULL,
        last_name VARCHAR(255) NOT NULL,
        contact VARCHAR(255),
        username VARCHAR(255) NOT NULL UNIQUE,
        email VARCHAR(255) NOT NULL UNIQUE,
        password_hash VARCHAR(255) NOT NULL,
        address VARCHAR(255),
        city VARCHAR(255),
        state VARCHAR(255),
        country VARCHAR(255),
        postal_code VARCHAR(255),
        profile_image_path VARCHAR(255),
        email_otp VARCHAR(6),
        email_verified BOOLEAN NOT NULL DEFAULT 0,
        password_otp VARCHAR(6),
        is_active BOOLEAN NOT NULL DEFAULT 0,
        token_status VARCHAR(32) NOT NULL DEFAULT 'logout',
        role_id INTEGER NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
        organization_id INTEGER REFERENCES organizations(id) ON DELETE CASCADE,
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS categories (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        category_name VARCHAR(255) NOT NULL UNIQUE,
        category_description VARCHAR(255),
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS products (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        product_name VARCHAR(255) NOT NULL UNIQUE,
        price REAL NOT NULL,
        quantity INTEGER NOT NULL,
        is_available BOOLEAN NOT NULL DEFAULT 1,
        low_stock_threshold INTEGER NOT NULL DEFAULT 50,
        category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
        created_at TIMESTAMP NOT NULL,
        updated_at TIMESTAMP NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_users_role_id ON users(role_id)",
    "CREATE INDEX IF NOT EXISTS idx_users_organization_id ON users(organization_id)",
    "CREATE INDEX IF NOT EXISTS idx_products_category_id ON products(category_id)",
];

/// `SQLite` database implementation
#[derive(Clone)]
pub struct SqliteDatabase {
    pool: Pool<Sqlite>,
}

impl SqliteDatabase {
    /// Open (creating if missing) the database file and create the schema
    ///
    /// `SQLite` has no schemas, so `_schema` is ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is malformed, the file cannot be opened
    /// or a table definition fails.
    pub async fn connect(database_url: &str, _schema: Option<&str>) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool_options = if database_url.contains(":memory:") {
            debug!("Pinning in-memory SQLite database to one connection");
            SqlitePoolOptions::new()
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(5)
        };

        let db = Self {
            pool: pool_options.connect_with(options).await?,
        };
        db.create_schema().await?;
        Ok(db)
    }

    async fn create_schema(&self) -> AppResult<()> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("SQLite schema is up to date");
        Ok(())
    }
}

impl_database_provider!(SqliteDatabase, SqliteRow);
