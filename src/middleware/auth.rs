// ABOUTME: Bearer token authentication resolving requests to the calling user
// ABOUTME: Enforces logged-out and inactive account rules and exposes a CurrentUser extractor
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use std::sync::Arc;

use axum::async_trait;
use axum::extract::FromRequestParts;
use http::header::AUTHORIZATION;
use http::request::Parts;
use http::HeaderMap;
use serde::Serialize;
use tracing::{debug, warn, Span};

use crate::auth::AuthManager;
use crate::constants::messages::core as core_messages;
use crate::database_plugins::factory::Database;
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::{TokenStatus, User, UserResponse};
use crate::resources::ServerResources;

/// Authenticated caller
#[derive(Debug, Clone)]
pub struct CurrentUser {
    /// Stored account
    pub user: User,
    /// Name of the user's role
    pub role_name: String,
    /// Whether the role is the configured super-admin role
    pub is_superuser: bool,
    /// Owning organization name, for non-super-admins
    pub organization_name: Option<String>,
}

impl CurrentUser {
    /// Reject callers that are not the super-admin
    ///
    /// # Errors
    ///
    /// Returns 403 for every other role.
    pub fn require_superuser(&self) -> AppResult<()> {
        if self.is_superuser {
            Ok(())
        } else {
            warn!(user_id = self.user.id, role = %self.role_name, "Super-admin route refused");
            Err(AppError::permission_denied(core_messages::PERMISSION_DENIED))
        }
    }

    /// Reject writes to a user outside the caller's organization
    ///
    /// The super-admin may act on anyone; other callers only on members of
    /// their own organization.
    ///
    /// # Errors
    ///
    /// Returns 403 when `target` belongs to another organization or none.
    pub fn require_same_organization(&self, target: &User) -> AppResult<()> {
        let own = self.user.organization_id;
        if self.is_superuser || (own.is_some() && own == target.organization_id) {
            Ok(())
        } else {
            warn!(
                user_id = self.user.id,
                target_id = target.id,
                "Cross-organization user write refused"
            );
            Err(AppError::permission_denied(core_messages::PERMISSION_DENIED))
        }
    }
}

/// Current user as rendered by API responses
#[derive(Debug, Serialize)]
pub struct CurrentUserResponse {
    /// Account fields
    #[serde(flatten)]
    pub user: UserResponse,
    /// Role name
    pub role_name: String,
    /// Owning organization name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_name: Option<String>,
}

impl From<CurrentUser> for CurrentUserResponse {
    fn from(current: CurrentUser) -> Self {
        Self {
            user: current.user.into(),
            role_name: current.role_name,
            organization_name: current.organization_name,
        }
    }
}

/// Resolves `Authorization: Bearer` headers to users
#[derive(Clone)]
pub struct AuthMiddleware {
    auth_manager: Arc<AuthManager>,
    database: Arc<Database>,
    superuser_role: Option<String>,
}

impl AuthMiddleware {
    /// Create the middleware; `superuser_role` comes from `SUPERUSER_ROLE`
    #[must_use]
    pub const fn new(
        auth_manager: Arc<AuthManager>,
        database: Arc<Database>,
        superuser_role: Option<String>,
    ) -> Self {
        Self {
            auth_manager,
            database,
            superuser_role,
        }
    }

    /// Authenticate using the request headers
    ///
    /// # Errors
    ///
    /// See [`Self::authenticate_request`].
    pub async fn authenticate_headers(&self, headers: &HeaderMap) -> AppResult<CurrentUser> {
        let auth_header = headers.get(AUTHORIZATION).and_then(|h| h.to_str().ok());
        self.authenticate_request(auth_header).await
    }

    /// Authenticate an `Authorization` header value
    ///
    /// # Errors
    ///
    /// - 401 "Could not validate credentials" if the header is missing,
    ///   malformed, or names an unknown user
    /// - 401 "Token has expired" for expired tokens
    /// - 401 "User has been logged out" after logout
    /// - 400 "Inactive user" for accounts that are not active
    #[tracing::instrument(skip(self, auth_header), fields(user_id = tracing::field::Empty))]
    pub async fn authenticate_request(&self, auth_header: Option<&str>) -> AppResult<CurrentUser> {
        let Some(token) = auth_header.and_then(|h| h.strip_prefix("Bearer ")) else {
            debug!("Missing or malformed authorization header");
            return Err(AppError::auth_required());
        };

        let claims = self
            .auth_manager
            .validate_access_token(token.trim())
            .map_err(|e| match e.code {
                ErrorCode::AuthExpired => e,
                _ => AppError::auth_invalid(core_messages::COULD_NOT_VALIDATE_CREDENTIALS),
            })?;
        Span::current().record("user_id", claims.id);

        let Some(user) = self.database.get_user(claims.id).await? else {
            warn!(user_id = claims.id, "Token references unknown user");
            return Err(AppError::auth_invalid(
                core_messages::COULD_NOT_VALIDATE_CREDENTIALS,
            ));
        };

        if user.token_status == TokenStatus::Logout {
            return Err(AppError::auth_invalid(core_messages::USER_LOGGED_OUT));
        }
        if !user.is_active {
            return Err(AppError::inactive_user());
        }

        self.resolve(user).await
    }

    /// Refuse to hand out the super-admin role unless the assigner holds it
    ///
    /// Self-registration passes `assigner_is_superuser = false`.
    ///
    /// # Errors
    ///
    /// Returns 403 when `role_id` is the configured super-admin role and the
    /// assigner is not the super-admin.
    pub async fn require_assignable_role(
        &self,
        assigner_is_superuser: bool,
        role_id: i64,
    ) -> AppResult<()> {
        if assigner_is_superuser {
            return Ok(());
        }
        let Some(superuser_role) = self.superuser_role.as_deref() else {
            return Ok(());
        };
        let is_superuser_role = self
            .database
            .get_role(role_id)
            .await?
            .is_some_and(|role| role.role_name == superuser_role);

        if is_superuser_role {
            warn!(role_id, "Super-admin role assignment refused");
            return Err(AppError::permission_denied(core_messages::PERMISSION_DENIED));
        }
        Ok(())
    }

    async fn resolve(&self, user: User) -> AppResult<CurrentUser> {
        let role_name = self
            .database
            .get_role(user.role_id)
            .await?
            .map(|r| r.role_name)
            .unwrap_or_default();
        let is_superuser = self.superuser_role.as_deref() == Some(role_name.as_str());

        let organization_name = match (is_superuser, user.organization_id) {
            (false, Some(id)) => self
                .database
                .get_organization(id)
                .await?
                .map(|o| o.organization_name),
            _ => None,
        };

        Ok(CurrentUser {
            user,
            role_name,
            is_superuser,
            organization_name,
        })
    }
}

#[async_trait]
impl FromRequestParts<Arc<ServerResources>> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        resources: &Arc<ServerResources>,
    ) -> Result<Self, Self::Rejection> {
        resources
            .auth_middleware
            .authenticate_headers(&parts.headers)
            .await
    }
}
