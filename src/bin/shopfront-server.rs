// ABOUTME: Shopfront API server binary
// ABOUTME: Loads configuration, prepares the database and serves the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

//! # Shopfront API Server Binary
//!
//! Start-up order: configuration, logging, database connection, schema
//! creation, role and super-admin seeding, then the HTTP listener.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use shopfront_api::auth::AuthManager;
use shopfront_api::config::ServerConfig;
use shopfront_api::database_plugins::factory::Database;
use shopfront_api::database_plugins::DatabaseProvider;
use shopfront_api::email::create_sender;
use shopfront_api::logging;
use shopfront_api::resources::ServerResources;
use shopfront_api::seed::seed_database;
use shopfront_api::server;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "shopfront-server")]
#[command(about = "Shopfront API - E-commerce backend for organizations, users and products")]
pub struct Args {
    /// Override bind address
    #[arg(long)]
    host: Option<String>,

    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = ServerConfig::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    logging::init_from_env()?;

    info!("Starting {}", config.project.title);
    info!("{}", config.summary());

    let database = Database::from_config(&config.database).await?;
    info!(
        "Database initialized successfully: {}",
        database.backend_info()
    );
    database.migrate().await?;

    let auth_manager = AuthManager::new(&config.auth);
    let report = seed_database(&database, config.superuser.as_ref(), &auth_manager).await;
    if !report.roles_created.is_empty() {
        info!("Seeded roles: {}", report.roles_created.join(", "));
    }
    if let Some(username) = &report.superuser_created {
        info!("Seeded super-admin account: {username}");
    }

    let email_sender = create_sender(&config.email)?;
    let resources = Arc::new(ServerResources::new(
        database,
        auth_manager,
        email_sender,
        Arc::new(config),
    ));

    if let Err(e) = server::run(resources).await {
        error!("Server error: {e}");
        return Err(e.into());
    }

    Ok(())
}
