// ABOUTME: User management route handlers for the v1 API
// ABOUTME: Provides user CRUD, lookups, password change and OTP-based password reset
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

//! User routes
//!
//! Every endpoint except the two password reset endpoints requires a bearer
//! token. Users created here join the creator's organization and start
//! inactive and unverified, exactly like self-registered admins.
//!
//! Writes are scoped: outside the super-admin, callers may only change or
//! delete members of their own organization, and nobody but the super-admin
//! may assign the super-admin role.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{DetailResponse, EmailRequest, EmailSentResponse, JsonBody};
use crate::auth::verify_password;
use crate::constants::email::{PASSWORD_RESET_PURPOSE, PASSWORD_RESET_SUBJECT};
use crate::constants::messages::{
    auth as auth_messages, email as email_messages, user as user_messages,
};
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;
use crate::middleware::{CurrentUser, CurrentUserResponse};
use crate::models::{
    CreateUserRequest, PatchUserRequest, UpdateUserRequest, User, UserChanges, UserResponse,
};
use crate::pagination::PageQuery;
use crate::resources::ServerResources;
use crate::validation;

/// Body of `POST /v1/user/change-password/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    /// Current password
    pub old_password: String,
    /// Replacement password
    pub new_password: String,
}

/// Body of `POST /v1/user/password-reset/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PasswordResetRequest {
    /// OTP token from the emailed link
    pub token: String,
    /// Replacement password
    pub new_password: String,
}

/// User routes implementation
pub struct UserRoutes;

impl UserRoutes {
    /// Create all user routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/v1/user/",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route("/v1/user/me/", get(Self::handle_me))
            .route(
                "/v1/user/:id/",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .patch(Self::handle_patch)
                    .delete(Self::handle_delete),
            )
            .route(
                "/v1/user/username/:username/",
                get(Self::handle_get_by_username),
            )
            .route("/v1/user/email/:email/", get(Self::handle_get_by_email))
            .route(
                "/v1/user/change-password/",
                post(Self::handle_change_password),
            )
            .route(
                "/v1/user/password-reset-request/",
                post(Self::handle_password_reset_request),
            )
            .route(
                "/v1/user/password-reset/",
                post(Self::handle_password_reset),
            )
            .with_state(resources)
    }

    fn found(user: Option<User>) -> AppResult<UserResponse> {
        user.map(UserResponse::from)
            .ok_or_else(|| AppError::not_found(user_messages::USER_NOT_FOUND))
    }

    /// Load the user a write targets, checking the caller may touch it
    async fn writable_target(
        resources: &ServerResources,
        current: &CurrentUser,
        id: i64,
    ) -> AppResult<User> {
        let target = resources
            .database
            .get_user(id)
            .await?
            .ok_or_else(|| AppError::not_found(user_messages::USER_NOT_FOUND))?;
        current.require_same_organization(&target)?;
        Ok(target)
    }

    async fn check_role(
        resources: &ServerResources,
        current: &CurrentUser,
        role_id: Option<i64>,
    ) -> AppResult<()> {
        let Some(role_id) = role_id else {
            return Ok(());
        };
        resources
            .auth_middleware
            .require_assignable_role(current.is_superuser, role_id)
            .await
    }

    /// Handle POST /v1/user/ - Create a user in the caller's organization
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        current: CurrentUser,
        JsonBody(body): JsonBody<CreateUserRequest>,
    ) -> Result<Response, AppError> {
        let request = body.validate()?;
        Self::check_role(&resources, &current, Some(request.role_id)).await?;
        let db = &resources.database;

        if db.get_user_by_username(&request.username).await?.is_some() {
            return Err(AppError::already_exists(
                auth_messages::USERNAME_ALREADY_EXISTS,
            ));
        }
        if db.get_user_by_email(&request.email).await?.is_some() {
            return Err(AppError::already_exists(auth_messages::EMAIL_ALREADY_EXISTS));
        }

        let password_hash = resources.auth_manager.hash_password(&request.password)?;
        let new_user = request.into_new_user(password_hash, current.user.organization_id);
        let user = db.create_user(&new_user).await?;
        info!(user_id = user.id, created_by = current.user.id, "Created user");

        let response = UserResponse::from(user);
        Ok((StatusCode::CREATED, Json(response)).into_response())
    }

    /// Handle GET /v1/user/ - List users
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        let page = resources
            .database
            .list_users(query.window()?)
            .await?
            .map(UserResponse::from);
        Ok((StatusCode::OK, Json(page)).into_response())
    }

    /// Handle GET /v1/user/me/ - The authenticated caller
    async fn handle_me(current: CurrentUser) -> Result<Response, AppError> {
        let response = CurrentUserResponse::from(current);
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /v1/user/:id/ - Fetch a user
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let response = Self::found(resources.database.get_user(id).await?)?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /v1/user/username/:username/ - Fetch a user by username
    async fn handle_get_by_username(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Path(username): Path<String>,
    ) -> Result<Response, AppError> {
        let username = username.trim().to_lowercase();
        let response = Self::found(resources.database.get_user_by_username(&username).await?)?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle GET /v1/user/email/:email/ - Fetch a user by email
    async fn handle_get_by_email(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Path(email): Path<String>,
    ) -> Result<Response, AppError> {
        let email = email.trim().to_lowercase();
        let response = Self::found(resources.database.get_user_by_email(&email).await?)?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    async fn apply_changes(
        resources: &ServerResources,
        current: &CurrentUser,
        id: i64,
        changes: &UserChanges,
    ) -> Result<Response, AppError> {
        let target = Self::writable_target(resources, current, id).await?;
        Self::check_role(resources, current, changes.role_id).await?;

        let response = Self::found(resources.database.update_user(target.id, changes).await?)?;
        info!(user_id = target.id, updated_by = current.user.id, "Updated user");
        Ok((StatusCode::ACCEPTED, Json(response)).into_response())
    }

    /// Handle PUT /v1/user/:id/ - Replace a user's editable fields
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        current: CurrentUser,
        Path(id): Path<i64>,
        JsonBody(body): JsonBody<UpdateUserRequest>,
    ) -> Result<Response, AppError> {
        let changes = body.validate()?;
        Self::apply_changes(&resources, &current, id, &changes).await
    }

    /// Handle PATCH /v1/user/:id/ - Update the supplied fields
    async fn handle_patch(
        State(resources): State<Arc<ServerResources>>,
        current: CurrentUser,
        Path(id): Path<i64>,
        JsonBody(body): JsonBody<PatchUserRequest>,
    ) -> Result<Response, AppError> {
        let changes = body.validate()?;
        Self::apply_changes(&resources, &current, id, &changes).await
    }

    /// Handle DELETE /v1/user/:id/ - Delete a user
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        current: CurrentUser,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let target = Self::writable_target(&resources, &current, id).await?;
        if !resources.database.delete_user(target.id).await? {
            return Err(AppError::not_found(user_messages::USER_NOT_FOUND));
        }
        info!(user_id = target.id, deleted_by = current.user.id, "Deleted user");

        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }

    /// Handle POST /v1/user/change-password/ - Change the caller's password
    async fn handle_change_password(
        State(resources): State<Arc<ServerResources>>,
        current: CurrentUser,
        JsonBody(body): JsonBody<ChangePasswordRequest>,
    ) -> Result<Response, AppError> {
        let new_password = validation::password(&body.new_password)?;
        let user = current.user;

        if !verify_password(&body.old_password, &user.password_hash) {
            AppLogger::log_security_event(
                "password_change_rejected",
                "old password mismatch",
                Some(&user.username),
            );
            return Err(AppError::invalid_input(user_messages::INCORRECT_PASSWORD));
        }

        let password_hash = resources.auth_manager.hash_password(&new_password)?;
        if !resources
            .database
            .update_password(user.id, &password_hash)
            .await?
        {
            return Err(AppError::not_found(user_messages::USER_NOT_FOUND));
        }
        AppLogger::log_auth_event(&user.username, "password_change", true, None);

        let response = DetailResponse::new(user_messages::PASSWORD_CHANGED);
        Ok((StatusCode::ACCEPTED, Json(response)).into_response())
    }

    /// Handle POST /v1/user/password-reset-request/ - Mail a reset OTP
    async fn handle_password_reset_request(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(body): JsonBody<EmailRequest>,
    ) -> Result<Response, AppError> {
        let email = validation::email(&body.email)?;

        let user = resources
            .database
            .get_user_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found(user_messages::USER_NOT_FOUND))?;

        let otp = resources
            .mailer
            .send_email_otp(
                &user.email,
                &user.full_name(),
                PASSWORD_RESET_PURPOSE,
                PASSWORD_RESET_SUBJECT,
            )
            .await
            .map_err(|e| AppError::invalid_input(email_messages::EMAIL_SENT_FAILED).with_source(e))?;

        resources.database.set_password_otp(user.id, &otp).await?;

        let response = EmailSentResponse {
            success: true,
            detail: email_messages::EMAIL_SENT.to_owned(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /v1/user/password-reset/ - Store a new password
    async fn handle_password_reset(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(body): JsonBody<PasswordResetRequest>,
    ) -> Result<Response, AppError> {
        let new_password = validation::password(&body.new_password)?;
        let claims = resources
            .auth_manager
            .validate_otp_token(body.token.trim())?;

        let user = resources
            .database
            .get_user_by_email(&claims.email)
            .await?
            .ok_or_else(|| AppError::not_found(user_messages::USER_NOT_FOUND))?;

        if user.password_otp.as_deref() != Some(claims.token.as_str()) {
            AppLogger::log_security_event(
                "password_reset_rejected",
                "OTP mismatch",
                Some(&user.username),
            );
            return Err(AppError::invalid_input(email_messages::INCORRECT_OTP_CODE));
        }

        let password_hash = resources.auth_manager.hash_password(&new_password)?;
        resources
            .database
            .update_password(user.id, &password_hash)
            .await?;
        resources.database.clear_password_otp(user.id).await?;
        AppLogger::log_auth_event(&user.username, "password_reset", true, None);

        let response = DetailResponse::new(user_messages::PASSWORD_RESET);
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
