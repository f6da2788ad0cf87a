// ABOUTME: Organization route handlers for the v1 API
// ABOUTME: Any authenticated user may read organizations, only the super-admin may change them
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
use crate::constants::messages::organization as organization_messages;
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::models::{
    CreateOrganizationRequest, Organization, OrganizationChanges, PatchOrganizationRequest,
};
use crate::pagination::PageQuery;
use crate::resources::ServerResources;

/// Organization routes implementation
pub struct OrganizationRoutes;

impl OrganizationRoutes {
    /// Create all organization routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/v1/organization/",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/v1/organization/:id/",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .patch(Self::handle_patch)
                    .delete(Self::handle_delete),
            )
            .route(
                "/v1/organization/name/:name/",
                get(Self::handle_get_by_name),
            )
            .with_state(resources)
    }

    fn found(organization: Option<Organization>) -> AppResult<Organization> {
        organization
            .ok_or_else(|| AppError::not_found(organization_messages::ORGANIZATION_NOT_FOUND))
    }

    /// Handle POST /v1/organization/ - Create an organization
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        current: CurrentUser,
        JsonBody(body): JsonBody<CreateOrganizationRequest>,
    ) -> Result<Response, AppError> {
        current.require_superuser()?;
        let request = body.validate()?;
        let organization = resources.database.create_organization(&request).await?;
        Ok((StatusCode::CREATED, Json(organization)).into_response())
    }

    /// Handle GET /v1/organization/ - List organizations
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        let page = resources
            .database
            .list_organizations(query.window()?)
            .await?;
        Ok((StatusCode::OK, Json(page)).into_response())
    }

    /// Handle GET /v1/organization/:id/ - Fetch an organization
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let organization = Self::found(resources.database.get_organization(id).await?)?;
        Ok((StatusCode::OK, Json(organization)).into_response())
    }

    /// Handle GET /v1/organization/name/:name/ - Fetch an organization by name
    async fn handle_get_by_name(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Path(name): Path<String>,
    ) -> Result<Response, AppError> {
        let organization = Self::found(
            resources
                .database
                .get_organization_by_name(name.trim())
                .await?,
        )?;
        Ok((StatusCode::OK, Json(organization)).into_response())
    }

    async fn apply_changes(
        resources: &ServerResources,
        id: i64,
        changes: &OrganizationChanges,
    ) -> Result<Response, AppError> {
        let organization = Self::found(
            resources
                .database
                .update_organization(id, changes)
                .await?,
        )?;
        Ok((StatusCode::ACCEPTED, Json(organization)).into_response())
    }

    /// Handle PUT /v1/organization/:id/ - Replace an organization
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        current: CurrentUser,
        Path(id): Path<i64>,
        JsonBody(body): JsonBody<CreateOrganizationRequest>,
    ) -> Result<Response, AppError> {
        current.require_superuser()?;
        let changes = OrganizationChanges::from(body.validate()?);
        Self::apply_changes(&resources, id, &changes).await
    }

    /// Handle PATCH /v1/organization/:id/ - Update the supplied fields
    async fn handle_patch(
        State(resources): State<Arc<ServerResources>>,
        current: CurrentUser,
        Path(id): Path<i64>,
        JsonBody(body): JsonBody<PatchOrganizationRequest>,
    ) -> Result<Response, AppError> {
        current.require_superuser()?;
        let changes = body.validate()?;
        Self::apply_changes(&resources, id, &changes).await
    }

    /// Handle DELETE /v1/organization/:id/ - Delete an organization and its users
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        current: CurrentUser,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        current.require_superuser()?;
        if !resources.database.delete_organization(id).await? {
            return Err(AppError::not_found(
                organization_messages::ORGANIZATION_NOT_FOUND,
            ));
        }
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
