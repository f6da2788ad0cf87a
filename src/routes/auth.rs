// ABOUTME: Authentication route handlers for admin self-registration and sessions
// ABOUTME: Provides register, form login, access token refresh and logout endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

//! Authentication routes
//!
//! Registration creates an organization together with its first admin
//! account and mails a verification OTP. The account stays inactive until
//! `/email/verify/` succeeds. Login accepts a form body so that standard
//! OAuth2 password-flow clients work unchanged.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::{DetailResponse, FormBody, JsonBody, LoginResponse};
use crate::auth::{verify_password, TokenType};
use crate::constants::email::{verify_subject, VERIFY_PURPOSE};
use crate::constants::messages::auth as auth_messages;
use crate::constants::tokens::BEARER_TOKEN_TYPE;
use crate::database_plugins::DatabaseProvider;
use crate::errors::AppError;
use crate::logging::AppLogger;
use crate::middleware::CurrentUser;
use crate::models::{
    CreateOrganizationRequest, CreateUserRequest, Organization, TokenStatus, User, UserResponse,
};
use crate::resources::ServerResources;

/// Body of `POST /auth/register/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Organization to create
    #[serde(flatten)]
    pub organization: CreateOrganizationRequest,
    /// Its first admin account
    #[serde(flatten)]
    pub user: CreateUserRequest,
}

/// Registered admin with its organization
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    /// Account fields
    #[serde(flatten)]
    pub user: UserResponse,
    /// Organization name
    pub organization_name: String,
    /// Organization description
    pub organization_description: Option<String>,
}

impl RegisterResponse {
    fn new(user: User, organization: Organization) -> Self {
        Self {
            user: user.into(),
            organization_name: organization.organization_name,
            organization_description: organization.organization_description,
        }
    }
}

/// Form body of `POST /auth/login/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginForm {
    /// Username or email
    pub username: String,
    /// Plain-text password
    pub password: String,
}

/// Body of `POST /auth/refresh/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    /// Token issued by login
    pub refresh_token: String,
}

/// Response of `POST /auth/refresh/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    /// Always `access_token`
    pub token_type: String,
    /// Newly issued access token
    pub access_token: String,
}

/// Authentication routes implementation
pub struct AuthRoutes;

impl AuthRoutes {
    /// Create all authentication routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/auth/register/", post(Self::handle_register))
            .route("/auth/login/", post(Self::handle_login))
            .route("/auth/refresh/", post(Self::handle_refresh))
            .route("/auth/logout/", post(Self::handle_logout))
            .with_state(resources)
    }

    /// Issue an access/refresh pair and mark the session as logged in
    ///
    /// # Errors
    ///
    /// Returns an error if the database update or token signing fails.
    pub async fn login_response(
        resources: &ServerResources,
        user: &User,
        detail: Option<String>,
    ) -> Result<LoginResponse, AppError> {
        resources
            .database
            .set_token_status(user.id, TokenStatus::Login)
            .await?;

        Ok(LoginResponse {
            token_type: BEARER_TOKEN_TYPE.to_owned(),
            access_token: resources
                .auth_manager
                .create_token(user, TokenType::Access)?,
            refresh_token: resources
                .auth_manager
                .create_token(user, TokenType::Refresh)?,
            role_id: user.role_id,
            detail,
        })
    }

    /// Handle POST /auth/register/ - Create an organization and its admin
    async fn handle_register(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(body): JsonBody<RegisterRequest>,
    ) -> Result<Response, AppError> {
        let organization_request = body.organization.validate()?;
        let user_request = body.user.validate()?;
        resources
            .auth_middleware
            .require_assignable_role(false, user_request.role_id)
            .await?;
        let db = &resources.database;

        if db
            .get_organization_by_name(&organization_request.organization_name)
            .await?
            .is_some()
        {
            return Err(AppError::already_exists(
                auth_messages::ORGANIZATION_ALREADY_EXISTS,
            ));
        }
        if db
            .get_user_by_username(&user_request.username)
            .await?
            .is_some()
        {
            return Err(AppError::already_exists(
                auth_messages::USERNAME_ALREADY_EXISTS,
            ));
        }
        if db.get_user_by_email(&user_request.email).await?.is_some() {
            return Err(AppError::already_exists(auth_messages::EMAIL_ALREADY_EXISTS));
        }

        let organization = db.create_organization(&organization_request).await?;

        let full_name = format!("{} {}", user_request.first_name, user_request.last_name);
        let otp = match resources
            .mailer
            .send_email_otp(
                &user_request.email,
                &full_name,
                VERIFY_PURPOSE,
                &verify_subject(resources.mailer.company_name()),
            )
            .await
        {
            Ok(otp) => otp,
            Err(e) => {
                Self::rollback_organization(&resources, organization.id).await;
                return Err(e);
            }
        };

        let password_hash = resources
            .auth_manager
            .hash_password(&user_request.password)?;
        let mut new_user = user_request.into_new_user(password_hash, Some(organization.id));
        new_user.email_otp = Some(otp);
        new_user.token_status = TokenStatus::EmailVerify;

        let user = match db.create_user(&new_user).await {
            Ok(user) => user,
            Err(e) => {
                Self::rollback_organization(&resources, organization.id).await;
                return Err(e);
            }
        };

        info!(
            user_id = user.id,
            organization_id = organization.id,
            "Registered organization admin"
        );
        AppLogger::log_auth_event(&user.username, "register", true, None);

        let response = RegisterResponse::new(user, organization);
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    async fn rollback_organization(resources: &ServerResources, organization_id: i64) {
        if let Err(e) = resources
            .database
            .delete_organization(organization_id)
            .await
        {
            warn!(organization_id, error = %e, "Failed to roll back organization");
        }
    }

    /// Handle POST /auth/login/ - Exchange credentials for tokens
    async fn handle_login(
        State(resources): State<Arc<ServerResources>>,
        FormBody(form): FormBody<LoginForm>,
    ) -> Result<Response, AppError> {
        let login = form.username.trim().to_lowercase();

        let Some(user) = resources.database.get_user_by_login(&login).await? else {
            AppLogger::log_auth_event(&login, "login", false, Some("unknown user"));
            return Err(AppError::not_found(auth_messages::USER_NOT_FOUND));
        };

        if !verify_password(&form.password, &user.password_hash) {
            AppLogger::log_auth_event(&user.username, "login", false, Some("bad password"));
            return Err(AppError::auth_invalid(auth_messages::INCORRECT_PASSWORD));
        }

        let response = Self::login_response(&resources, &user, None).await?;
        AppLogger::log_auth_event(&user.username, "login", true, None);

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /auth/refresh/ - Issue a new access token
    async fn handle_refresh(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(body): JsonBody<RefreshRequest>,
    ) -> Result<Response, AppError> {
        let claims = resources
            .auth_manager
            .validate_refresh_token(body.refresh_token.trim())?;

        if resources.database.get_user(claims.id).await?.is_none() {
            return Err(AppError::not_found(auth_messages::USER_NOT_FOUND));
        }

        let response = RefreshResponse {
            token_type: "access_token".to_owned(),
            access_token: resources.auth_manager.reissue_access_token(&claims)?,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /auth/logout/ - Close the caller's session
    async fn handle_logout(
        State(resources): State<Arc<ServerResources>>,
        current: CurrentUser,
    ) -> Result<Response, AppError> {
        resources
            .database
            .set_token_status(current.user.id, TokenStatus::Logout)
            .await?;
        AppLogger::log_auth_event(&current.user.username, "logout", true, None);

        let response = DetailResponse::new(auth_messages::USER_LOGGED_OUT);
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
