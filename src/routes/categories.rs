// ABOUTME: Category route handlers for the v1 catalog API
// ABOUTME: Provides authenticated CRUD, lookup by name and paginated listing of categories
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
use crate::constants::messages::category as category_messages;
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::models::{
    Category, CategoryChanges, CreateCategoryRequest, PatchCategoryRequest,
    UpdateCategoryRequest,
};
use crate::pagination::PageQuery;
use crate::resources::ServerResources;

/// Category routes implementation
pub struct CategoryRoutes;

impl CategoryRoutes {
    /// Create all category routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/v1/category/",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/v1/category/:id/",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .patch(Self::handle_patch)
                    .delete(Self::handle_delete),
            )
            .route("/v1/category/name/:name/", get(Self::handle_get_by_name))
            .with_state(resources)
    }

    fn found(category: Option<Category>) -> AppResult<Category> {
        category.ok_or_else(|| AppError::not_found(category_messages::CATEGORY_NOT_FOUND))
    }

    /// Handle POST /v1/category/ - Create a category
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        JsonBody(body): JsonBody<CreateCategoryRequest>,
    ) -> Result<Response, AppError> {
        let request = body.validate()?;
        let category = resources.database.create_category(&request).await?;
        Ok((StatusCode::CREATED, Json(category)).into_response())
    }

    /// Handle GET /v1/category/ - List categories
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        let page = resources.database.list_categories(query.window()?).await?;
        Ok((StatusCode::OK, Json(page)).into_response())
    }

    /// Handle GET /v1/category/:id/ - Fetch a category
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let category = Self::found(resources.database.get_category(id).await?)?;
        Ok((StatusCode::OK, Json(category)).into_response())
    }

    /// Handle GET /v1/category/name/:name/ - Fetch a category by name
    async fn handle_get_by_name(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Path(name): Path<String>,
    ) -> Result<Response, AppError> {
        let category = Self::found(
            resources
                .database
                .get_category_by_name(name.trim())
                .await?,
        )?;
        Ok((StatusCode::OK, Json(category)).into_response())
    }

    async fn apply_changes(
        resources: &ServerResources,
        id: i64,
        changes: &CategoryChanges,
    ) -> Result<Response, AppError> {
        let category = Self::found(resources.database.update_category(id, changes).await?)?;
        Ok((StatusCode::ACCEPTED, Json(category)).into_response())
    }

    /// Handle PUT /v1/category/:id/ - Replace a category
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Path(id): Path<i64>,
        JsonBody(body): JsonBody<UpdateCategoryRequest>,
    ) -> Result<Response, AppError> {
        let changes = CategoryChanges::from(body.validate()?);
        Self::apply_changes(&resources, id, &changes).await
    }

    /// Handle PATCH /v1/category/:id/ - Update the supplied fields
    async fn handle_patch(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Path(id): Path<i64>,
        JsonBody(body): JsonBody<PatchCategoryRequest>,
    ) -> Result<Response, AppError> {
        let changes = body.validate()?;
        Self::apply_changes(&resources, id, &changes).await
    }

    /// Handle DELETE /v1/category/:id/ - Delete a category and its products
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        if !resources.database.delete_category(id).await? {
            return Err(AppError::not_found(category_messages::CATEGORY_NOT_FOUND));
        }
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
