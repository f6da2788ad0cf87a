// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Built once at start-up so handlers never construct expensive objects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use std::sync::Arc;

use crate::auth::AuthManager;
use crate::config::ServerConfig;
use crate::database_plugins::factory::Database;
use crate::email::{EmailSender, OtpMailer};
use crate::middleware::AuthMiddleware;

/// Everything a request handler needs
#[derive(Clone)]
pub struct ServerResources {
    /// Storage backend
    pub database: Arc<Database>,
    /// Token issuing and password hashing
    pub auth_manager: Arc<AuthManager>,
    /// Bearer token resolution
    pub auth_middleware: AuthMiddleware,
    /// OTP email delivery
    pub mailer: OtpMailer,
    /// Loaded configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Wire up shared resources
    #[must_use]
    pub fn new(
        database: Database,
        auth_manager: AuthManager,
        email_sender: Arc<dyn EmailSender>,
        config: Arc<ServerConfig>,
    ) -> Self {
        let database = Arc::new(database);
        let auth_manager = Arc::new(auth_manager);

        let superuser_role = config.superuser.as_ref().map(|su| su.role.clone());
        let auth_middleware =
            AuthMiddleware::new(auth_manager.clone(), database.clone(), superuser_role);
        let mailer = OtpMailer::new(email_sender, auth_manager.clone(), config.client.clone());

        Self {
            database,
            auth_manager,
            auth_middleware,
            mailer,
            config,
        }
    }
}
