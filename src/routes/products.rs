// ABOUTME: Product route handlers for the v1 catalog API
// ABOUTME: Provides authenticated CRUD, lookup by name and per-category listing of products
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

//! Product routes
//!
//! Products belong to exactly one category. Creating or moving a product
//! into a category that does not exist is reported as a missing category
//! rather than as a raw foreign key violation.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use super::JsonBody;
use crate::constants::messages::{category as category_messages, product as product_messages};
use crate::database_plugins::DatabaseProvider;
use crate::errors::{AppError, AppResult};
use crate::middleware::CurrentUser;
use crate::models::{
    CreateProductRequest, PatchProductRequest, Product, ProductChanges, UpdateProductRequest,
};
use crate::pagination::PageQuery;
use crate::resources::ServerResources;

/// Product routes implementation
pub struct ProductRoutes;

impl ProductRoutes {
    /// Create all product routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(
                "/v1/product/",
                get(Self::handle_list).post(Self::handle_create),
            )
            .route(
                "/v1/product/:id/",
                get(Self::handle_get)
                    .put(Self::handle_update)
                    .patch(Self::handle_patch)
                    .delete(Self::handle_delete),
            )
            .route("/v1/product/name/:name/", get(Self::handle_get_by_name))
            .route(
                "/v1/product/category/:category_id/",
                get(Self::handle_list_by_category),
            )
            .with_state(resources)
    }

    fn found(product: Option<Product>) -> AppResult<Product> {
        product.ok_or_else(|| AppError::not_found(product_messages::PRODUCT_NOT_FOUND))
    }

    async fn ensure_category(resources: &ServerResources, category_id: Option<i64>) -> AppResult<()> {
        if let Some(id) = category_id {
            if resources.database.get_category(id).await?.is_none() {
                return Err(AppError::not_found(category_messages::CATEGORY_NOT_FOUND));
            }
        }
        Ok(())
    }

    /// Handle POST /v1/product/ - Create a product
    async fn handle_create(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        JsonBody(body): JsonBody<CreateProductRequest>,
    ) -> Result<Response, AppError> {
        let product = body.validate()?;
        Self::ensure_category(&resources, Some(product.category_id)).await?;

        let product = resources.database.create_product(&product).await?;
        Ok((StatusCode::CREATED, Json(product)).into_response())
    }

    /// Handle GET /v1/product/ - List products
    async fn handle_list(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        let page = resources.database.list_products(query.window()?).await?;
        Ok((StatusCode::OK, Json(page)).into_response())
    }

    /// Handle GET /v1/product/category/:category_id/ - List a category's products
    async fn handle_list_by_category(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Path(category_id): Path<i64>,
        Query(query): Query<PageQuery>,
    ) -> Result<Response, AppError> {
        let page = resources
            .database
            .list_products_by_category(category_id, query.window()?)
            .await?;
        Ok((StatusCode::OK, Json(page)).into_response())
    }

    /// Handle GET /v1/product/:id/ - Fetch a product
    async fn handle_get(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        let product = Self::found(resources.database.get_product(id).await?)?;
        Ok((StatusCode::OK, Json(product)).into_response())
    }

    /// Handle GET /v1/product/name/:name/ - Fetch a product by name
    async fn handle_get_by_name(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Path(name): Path<String>,
    ) -> Result<Response, AppError> {
        let product = Self::found(resources.database.get_product_by_name(name.trim()).await?)?;
        Ok((StatusCode::OK, Json(product)).into_response())
    }

    async fn apply_changes(
        resources: &ServerResources,
        id: i64,
        changes: &ProductChanges,
    ) -> Result<Response, AppError> {
        Self::ensure_category(resources, changes.category_id).await?;
        let product = Self::found(resources.database.update_product(id, changes).await?)?;
        Ok((StatusCode::ACCEPTED, Json(product)).into_response())
    }

    /// Handle PUT /v1/product/:id/ - Replace a product
    async fn handle_update(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Path(id): Path<i64>,
        JsonBody(body): JsonBody<UpdateProductRequest>,
    ) -> Result<Response, AppError> {
        let changes = ProductChanges::from(body.validate()?);
        Self::apply_changes(&resources, id, &changes).await
    }

    /// Handle PATCH /v1/product/:id/ - Update the supplied fields
    async fn handle_patch(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Path(id): Path<i64>,
        JsonBody(body): JsonBody<PatchProductRequest>,
    ) -> Result<Response, AppError> {
        let changes = body.validate()?;
        Self::apply_changes(&resources, id, &changes).await
    }

    /// Handle DELETE /v1/product/:id/ - Delete a product
    async fn handle_delete(
        State(resources): State<Arc<ServerResources>>,
        _current: CurrentUser,
        Path(id): Path<i64>,
    ) -> Result<Response, AppError> {
        if !resources.database.delete_product(id).await? {
            return Err(AppError::not_found(product_messages::PRODUCT_NOT_FOUND));
        }
        Ok((StatusCode::NO_CONTENT, ()).into_response())
    }
}
