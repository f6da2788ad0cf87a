// ABOUTME: PostgreSQL backend for production deployments
// ABOUTME: Creates the configured schema, pins search_path on every connection, and owns the DDL
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use std::sync::OnceLock;

use regex::Regex;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{Executor, Pool, Postgres};
use tracing::info;

use crate::errors::{AppError, AppResult};

/// Table definitions in creation order
const SCHEMA: [&str; 8] = [
    r"
    CREATE TABLE IF NOT EXISTS roles (
        id BIGSERIAL PRIMARY KEY,
        role_name VARCHAR(255) NOT NULL UNIQUE,
        role_description VARCHAR(255),
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS organizations (
        id BIGSERIAL PRIMARY KEY,
        organization_name VARCHAR(255) NOT NULL UNIQUE,
        organization_description VARCHAR(255),
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS users (
        id BIGSERIAL PRIMARY KEY,
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
        email_verified BOOLEAN NOT NULL DEFAULT FALSE,
        password_otp VARCHAR(6),
        is_active BOOLEAN NOT NULL DEFAULT FALSE,
        token_status VARCHAR(32) NOT NULL DEFAULT 'logout',
        role_id BIGINT NOT NULL REFERENCES roles(id) ON DELETE CASCADE,
        organization_id BIGINT REFERENCES organizations(id) ON DELETE CASCADE,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS categories (
        id BIGSERIAL PRIMARY KEY,
        category_name VARCHAR(255) NOT NULL UNIQUE,
        category_description VARCHAR(255),
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    ",
    r"
    CREATE TABLE IF NOT EXISTS products (
        id BIGSERIAL PRIMARY KEY,
        product_name VARCHAR(255) NOT NULL UNIQUE,
        price DOUBLE PRECISION NOT NULL,
        quantity INTEGER NOT NULL,
        is_available BOOLEAN NOT NULL DEFAULT TRUE,
        low_stock_threshold INTEGER NOT NULL DEFAULT 50,
        category_id BIGINT NOT NULL REFERENCES categories(id) ON DELETE CASCADE,
        created_at TIMESTAMPTZ NOT NULL,
        updated_at TIMESTAMPTZ NOT NULL
    )
    ",
    "CREATE INDEX IF NOT EXISTS idx_users_role_id ON users(role_id)",
    "CREATE INDEX IF NOT EXISTS idx_users_organization_id ON users(organization_id)",
    "CREATE INDEX IF NOT EXISTS idx_products_category_id ON products(category_id)",
];

static IDENTIFIER_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

/// Accept only plain identifiers so the schema name can be quoted safely
fn validate_schema_name(schema: &str) -> AppResult<&str> {
    let valid = IDENTIFIER_REGEX
        .get_or_init(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]{0,62}$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(schema));
    if valid {
        Ok(schema)
    } else {
        Err(AppError::config_invalid(
            "DB_SCHEMA",
            format!("{schema} is not a plain identifier"),
        ))
    }
}

/// `PostgreSQL` database implementation
#[derive(Clone)]
pub struct PostgresDatabase {
    pool: Pool<Postgres>,
    schema: Option<String>,
}

impl PostgresDatabase {
    /// Connect, pin `search_path` to `schema` when given, and create the schema
    ///
    /// # Errors
    ///
    /// Returns an error if the schema name is not a plain identifier, the
    /// server is unreachable or a table definition fails.
    pub async fn connect(database_url: &str, schema: Option<&str>) -> AppResult<Self> {
        let schema = schema.map(validate_schema_name).transpose()?.map(str::to_owned);

        let search_path = schema.clone();
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .after_connect(move |conn, _meta| {
                let search_path = search_path.clone();
                Box::pin(async move {
                    if let Some(schema) = search_path {
                        conn.execute(format!("SET search_path TO \"{schema}\"").as_str())
                            .await?;
                    }
                    Ok(())
                })
            })
            .connect(database_url)
            .await?;

        let db = Self { pool, schema };
        db.create_schema().await?;
        Ok(db)
    }

    async fn create_schema(&self) -> AppResult<()> {
        if let Some(schema) = &self.schema {
            self.pool
                .execute(format!("CREATE SCHEMA IF NOT EXISTS \"{schema}\"").as_str())
                .await?;
        }
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!(
            schema = self.schema.as_deref().unwrap_or("public"),
            "PostgreSQL schema is up to date"
        );
        Ok(())
    }
}

impl_database_provider!(PostgresDatabase, PgRow);
