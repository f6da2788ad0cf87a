// ABOUTME: Administrative command-line tool for the Shopfront API
// ABOUTME: Creates the schema, seeds roles, adds super-admin accounts and checks the environment
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use shopfront_api::auth::AuthManager;
use shopfront_api::config::{Secret, ServerConfig, SuperuserConfig};
use shopfront_api::database_plugins::factory::Database;
use shopfront_api::database_plugins::DatabaseProvider;
use shopfront_api::seed::{create_superuser, seed_database};
use tracing::{info, warn};

const DEFAULT_SUPERUSER_ROLE: &str = "super-admin";

#[derive(Parser)]
#[command(
    name = "shopfront-admin",
    about = "Shopfront API administration",
    long_about = "Prepare the Shopfront database and manage super-admin accounts. Reads the same environment (and .env file) as the server."
)]
struct AdminArgs {
    #[command(subcommand)]
    command: AdminCommand,

    /// Override the database URL
    #[arg(long)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Subcommand)]
enum AdminCommand {
    /// Create every table if it does not exist yet
    Migrate,

    /// Insert built-in roles and the configured super-admin
    Seed,

    /// Create an additional super-admin account
    CreateAdmin {
        #[arg(long)]
        email: String,

        #[arg(long)]
        username: String,

        #[arg(long)]
        password: String,

        #[arg(long, default_value = "Super")]
        first_name: String,

        #[arg(long, default_value = "Admin")]
        last_name: String,

        /// Role name; defaults to `SUPERUSER_ROLE`
        #[arg(long)]
        role: Option<String>,
    },

    /// Validate the environment and print the configuration summary
    CheckEnv,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = AdminArgs::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(log_level).init();

    let config = ServerConfig::from_env()?;

    if matches!(args.command, AdminCommand::CheckEnv) {
        println!("{}", config.summary());
        if config.superuser.is_none() {
            warn!("SUPERUSER_* variables are not set; no super-admin will be seeded");
        }
        return Ok(());
    }

    let database = match &args.database_url {
        Some(url) => Database::connect(url, config.database.schema.as_deref()).await?,
        None => Database::from_config(&config.database).await?,
    };
    info!("Connected to {}", database.backend_info());

    info!("Running database migrations...");
    database.migrate().await?;

    let auth_manager = AuthManager::new(&config.auth);

    match args.command {
        AdminCommand::Migrate | AdminCommand::CheckEnv => {
            info!("Schema is up to date");
        }
        AdminCommand::Seed => {
            let report =
                seed_database(&database, config.superuser.as_ref(), &auth_manager).await;
            println!("Roles created: {}", report.roles_created.len());
            for role in &report.roles_created {
                println!("  - {role}");
            }
            match report.superuser_created {
                Some(username) => println!("Super-admin created: {username}"),
                None => println!("Super-admin unchanged"),
            }
        }
        AdminCommand::CreateAdmin {
            email,
            username,
            password,
            first_name,
            last_name,
            role,
        } => {
            let configured = config.superuser.as_ref();
            let role = role
                .or_else(|| configured.map(|su| su.role.clone()))
                .unwrap_or_else(|| DEFAULT_SUPERUSER_ROLE.to_owned());
            let superuser = SuperuserConfig {
                first_name,
                last_name,
                contact: None,
                username,
                email,
                password: Secret::new(password),
                address: None,
                city: None,
                state: None,
                country: None,
                postal_code: None,
                role_description: configured.and_then(|su| su.role_description.clone()),
                role,
            };

            let user = create_superuser(&database, &superuser, &auth_manager)
                .await?
                .ok_or_else(|| anyhow!("A user with that username or email already exists"))?;
            println!("Created super-admin {} (id {})", user.username, user.id);
        }
    }

    Ok(())
}
