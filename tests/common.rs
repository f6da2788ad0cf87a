// ABOUTME: TestApp fixture and configuration shared by the integration tests
// ABOUTME: Builds in-memory servers with seeded roles, a super-admin and a recording mailer
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors
#![allow(
    dead_code,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::must_use_candidate,
    clippy::unwrap_used,
    clippy::expect_used
)]
//! Shared test utilities for `shopfront_api`
//!
//! This module provides common test setup functions to reduce duplication
//! across integration tests.

use std::collections::HashMap;
use std::env;
use std::sync::{Arc, Once};

use async_trait::async_trait;
use axum::Router;
use shopfront_api::auth::{AuthManager, TokenType};
use shopfront_api::config::ServerConfig;
use shopfront_api::database_plugins::factory::Database;
use shopfront_api::database_plugins::DatabaseProvider;
use shopfront_api::email::{EmailMessage, EmailSender, RecordingEmailSender};
use shopfront_api::errors::{AppError, AppResult};
use shopfront_api::models::{CreateOrganizationRequest, NewUser, TokenStatus, User};
use shopfront_api::resources::ServerResources;
use shopfront_api::seed::seed_database;
use shopfront_api::server::build_router;
use tracing::Level;

static INIT_LOGGER: Once = Once::new();

/// Username of the seeded super-admin
pub const SUPERUSER_USERNAME: &str = "superadmin";
/// Password of the seeded super-admin
pub const SUPERUSER_PASSWORD: &str = "Sup3r@dmin!";
/// Password used for every user created by these helpers
pub const USER_PASSWORD: &str = "Passw0rd@123";

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => Level::TRACE,
            Ok("DEBUG") => Level::DEBUG,
            Ok("INFO") => Level::INFO,
            _ => Level::WARN,
        };

        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

/// Environment of a self-contained test server
pub fn test_vars() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("DATABASE_URL", "sqlite::memory:"),
        ("ALGORITHM", "HS256"),
        ("EMAIL_BACKEND", "log"),
        ("CLIENT_BASE_URL", "http://localhost:3000"),
        ("COMPANY_NAME", "Acme Shop"),
        ("SUPERUSER_FIRST_NAME", "super"),
        ("SUPERUSER_LAST_NAME", "admin"),
        ("SUPERUSER_USERNAME", SUPERUSER_USERNAME),
        ("SUPERUSER_EMAIL", "superadmin@example.com"),
        ("SUPERUSER_PASSWORD", SUPERUSER_PASSWORD),
        ("SUPERUSER_ROLE", "super-admin"),
        ("SUPERUSER_ROLE_DESCRIPTION", "Super Admin Role Description"),
    ])
}

/// Configuration built from [`test_vars`]
pub fn test_config() -> ServerConfig {
    let vars = test_vars();
    ServerConfig::from_lookup(move |key| vars.get(key).map(|v| (*v).to_owned()))
        .expect("test configuration must load")
}

/// Sender whose relay is always down
pub struct FailingEmailSender;

#[async_trait]
impl EmailSender for FailingEmailSender {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn send(&self, _message: &EmailMessage) -> AppResult<()> {
        Err(AppError::email_delivery("relay unavailable"))
    }
}

/// In-process server with direct access to its state
pub struct TestApp {
    /// Shared state behind the router
    pub resources: Arc<ServerResources>,
    /// Every message mailed so far, when the recording sender is in use
    pub outbox: Arc<RecordingEmailSender>,
    router: Router,
}

impl TestApp {
    /// Server with a recording mailer
    pub async fn new() -> Self {
        let outbox = Arc::new(RecordingEmailSender::new());
        Self::build(outbox.clone(), outbox).await
    }

    /// Server whose mail relay always fails
    pub async fn with_failing_email() -> Self {
        Self::build(Arc::new(FailingEmailSender), Arc::new(RecordingEmailSender::new())).await
    }

    async fn build(sender: Arc<dyn EmailSender>, outbox: Arc<RecordingEmailSender>) -> Self {
        init_test_logging();
        let config = test_config();

        let database = Database::from_config(&config.database)
            .await
            .expect("in-memory database");
        let auth_manager = AuthManager::new(&config.auth).with_password_cost(4);
        seed_database(&database, config.superuser.as_ref(), &auth_manager).await;

        let resources = Arc::new(ServerResources::new(
            database,
            auth_manager,
            sender,
            Arc::new(config),
        ));
        let router = build_router(resources.clone());

        Self {
            resources,
            outbox,
            router,
        }
    }

    /// Fresh handle on the router for one request
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Database behind the server
    pub fn db(&self) -> &Database {
        &self.resources.database
    }

    /// Access token for a stored user, marking the session as logged in
    pub async fn token_for(&self, user: &User) -> String {
        self.db()
            .set_token_status(user.id, TokenStatus::Login)
            .await
            .unwrap();
        self.resources
            .auth_manager
            .create_token(user, TokenType::Access)
            .unwrap()
    }

    /// Access token of the seeded super-admin
    pub async fn superuser_token(&self) -> String {
        let user = self
            .db()
            .get_user_by_username(SUPERUSER_USERNAME)
            .await
            .unwrap()
            .expect("super-admin is seeded");
        self.token_for(&user).await
    }

    /// Store a user with the given role inside a new organization
    ///
    /// Verified users are also active; unverified ones are neither.
    pub async fn insert_user(&self, username: &str, role_name: &str, verified: bool) -> User {
        let organization = self
            .db()
            .create_organization(&CreateOrganizationRequest {
                organization_name: format!("{username} org"),
                organization_description: None,
            })
            .await
            .unwrap();
        self.insert_member(username, role_name, verified, Some(organization.id))
            .await
    }

    /// Store a user with the given role in an existing organization
    pub async fn insert_member(
        &self,
        username: &str,
        role_name: &str,
        verified: bool,
        organization_id: Option<i64>,
    ) -> User {
        let role = self
            .db()
            .get_role_by_name(role_name)
            .await
            .unwrap()
            .expect("role is seeded");

        self.db()
            .create_user(&NewUser {
                first_name: "Test".to_owned(),
                last_name: "User".to_owned(),
                contact: None,
                username: username.to_owned(),
                email: format!("{username}@example.com"),
                password_hash: self.resources.auth_manager.hash_password(USER_PASSWORD).unwrap(),
                address: None,
                city: None,
                state: None,
                country: None,
                postal_code: None,
                email_otp: None,
                email_verified: verified,
                is_active: verified,
                token_status: TokenStatus::Logout,
                role_id: role.id,
                organization_id,
            })
            .await
            .unwrap()
    }

    /// Active, verified user with the given role and a live access token
    pub async fn create_active_user(&self, username: &str, role_name: &str) -> (User, String) {
        let user = self.insert_user(username, role_name, true).await;
        let token = self.token_for(&user).await;
        (user, token)
    }
}

/// Pull the OTP token out of an emailed link
pub fn token_from_email(message: &EmailMessage, purpose_slug: &str) -> String {
    let prefix = format!("http://localhost:3000/{purpose_slug}/");
    let start = message
        .html_body
        .find(&prefix)
        .expect("email contains the OTP link")
        + prefix.len();
    message.html_body[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect()
}
