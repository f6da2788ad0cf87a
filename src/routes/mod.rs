// ABOUTME: Route module organization for the Shopfront HTTP API
// ABOUTME: Declares per-domain routers and the body extractors they share
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

//! Route module for the Shopfront API
//!
//! Each domain module exposes a `XxxRoutes::routes(resources)` constructor
//! returning a fully stated `Router`; `server::build_router` merges them.
//! Handlers are thin: they validate the body, call the database provider and
//! map `None`/`false` results to the domain's not-found message.

/// Self-registration, login, refresh and logout
pub mod auth;
/// Product categories
pub mod categories;
/// Email verification
pub mod email;
/// Liveness and readiness probes
pub mod health;
/// Organizations
pub mod organizations;
/// Catalog products
pub mod products;
/// Roles
pub mod roles;
/// User management and password flows
pub mod users;

pub use auth::AuthRoutes;
pub use categories::CategoryRoutes;
pub use email::EmailRoutes;
pub use health::HealthRoutes;
pub use organizations::OrganizationRoutes;
pub use products::ProductRoutes;
pub use roles::RoleRoutes;
pub use users::UserRoutes;

use axum::async_trait;
use axum::extract::{FromRequest, Request};
use axum::{Form, Json};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::errors::AppError;

/// JSON body whose parse failures render as 422 `{"detail", "code"}`
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Form-encoded body with the same rejection shape as [`JsonBody`]
#[derive(Debug, Clone, Copy, Default)]
pub struct FormBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for FormBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Form(value) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::validation(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// `{"detail": ...}` acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DetailResponse {
    /// Human-readable outcome
    pub detail: String,
}

impl DetailResponse {
    /// Wrap a message
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

/// Tokens returned by login and email verification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Always `bearer`
    pub token_type: String,
    /// Short-lived access token
    pub access_token: String,
    /// Long-lived refresh token
    pub refresh_token: String,
    /// Role of the authenticated user
    pub role_id: i64,
    /// Outcome message, set by email verification only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Result of mailing an OTP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailSentResponse {
    /// Always `true`; failures are returned as errors
    pub success: bool,
    /// Outcome message
    pub detail: String,
}

/// Body naming an email address
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmailRequest {
    /// Target account
    pub email: String,
}
