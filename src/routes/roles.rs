// ABOUTME: Role route handlers for the v1 API
// ABOUTME: Any authenticated user may read roles, only the super-admin may change them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use super::JsonBody;
use crate::constants::messages::role as role_messages;
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::models::{CreateRoleRequest, PatchRoleRequest, Role, RoleChanges};
use crate::pagination::PageQuery;
use crate::resources::ServerResources;

/// Role routes implementation
pub struct RoleRoutes;

impl RoleRoutes {
    /// Create all role routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/v1/role/",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/v1/role/:id/",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .patch(Self::handle_patch)
                    .delete(Self::handle_delete),
            )
            .route("/v1/role/name/:name/", get(Self::handle_get_by_name))
            .with_state(resources)
    }

    fn found(role: Option<Role>) -> AppResult<Role> {
        role.ok_or_else(|| AppError::not_found(role_messages::ROLE_NOT_FOUND))
    }

    /// Handle POST /v1/role/ - Create a role
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        current: CurrentUser,
        JsonBody(body): JsonBody<CreateRoleRequest>,
    ) -> Result<Response, AppError> {
        current.require_superuser()?;
        let request = body.validate()?;
        let role = resources.database.create_role(&request).await?;
        Ok((StatusCode::CREATED, Json(role)).into_response())
    }

    /// Handle GET /v1/role/ - List roles
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        let page = resources.database.list_roles(query.window()?).await?;
        Ok((StatusCode::OK, Json(page)).into_response())
    }

    /// Handle GET /v1/role/:id/ - Fetch a role
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let role = Self::found(resources.database.get_role(id).await?)?;
        Ok((StatusCode::OK, Json(role)).into_response())
    }

    /// Handle GET /v1/role/name/:name/ - Fetch a role by name
    async fn handle_get_by_name(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Path(name): Path<String>,
    ) -> Result<Response, AppError> {
        let role = Self::found(resources.database.get_role_by_name(name.trim()).await?)?;
        Ok((StatusCode::OK, Json(role)).into_response())
    }

    async fn apply_changes(
        resources: &ServerResources,
        id: i64,
        changes: &RoleChanges,
    ) -> Result<Response, AppError> {
        let role = Self::found(resources.database.update_role(id, changes).await?)?;
        Ok((StatusCode::ACCEPTED, Json(role)).into_response())
    }

    /// Handle PUT /v1/role/:id/ - Replace a role
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        current: CurrentUser,
        Path(id): Path<i64>,
        JsonBody(body): JsonBody<CreateRoleRequest>,
    ) -> Result<Response, AppError> {
        current.require_superuser()?;
        let changes = RoleChanges::from(body.validate()?);
        Self::apply_changes(&resources, id, &changes).await
    }

    /// Handle PATCH /v1/role/:id/ - Update the supplied fields
    async fn handle_patch(
        State(resources): State<Arc<ServerResources>>,
        current: CurrentUser,
        Path(id): Path<i64>,
        JsonBody(body): JsonBody<PatchRoleRequest>,
    ) -> Result<Response, AppError> {
        current.require_superuser()?;
        let changes = body.validate()?;
        Self::apply_changes(&resources, id, &changes).await
    }

    /// Handle DELETE /v1/role/:id/ - Delete a role and its users
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        current: CurrentUser,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        current.require_superuser()?;
        if !resources.database.delete_role(id).await? {
            return Err(AppError::not_found(role_messages::ROLE_NOT_FOUND));
        }
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
