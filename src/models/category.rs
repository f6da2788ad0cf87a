// ABOUTME: Category model and request bodies
// ABOUTME: Categories group products; deleting one cascades to its products
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;
use crate::validation;

/// Row of the `categories` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    /// Primary key
    pub id: i64,
    /// Unique category name
    pub category_name: String,
    /// Free-form description
    pub category_description: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /v1/category/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    /// Unique category name
    pub category_name: String,
    /// Free-form description
    pub category_description: Option<String>,
}

impl CreateCategoryRequest {
    /// Trim and length-check every field
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field is empty or too long.
    pub fn validate(self) -> AppResult<Self> {
        Ok(Self {
            category_name: validation::text("category_name", &self.category_name)?,
            category_description: validation::optional_text(
                "category_description",
                self.category_description,
            )?,
        })
    }
}

/// Body of `PUT /v1/category/{id}/`
pub type UpdateCategoryRequest = CreateCategoryRequest;

/// Body of `PATCH /v1/category/{id}/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchCategoryRequest {
    /// New name
    pub category_name: Option<String>,
    /// New description
    pub category_description: Option<String>,
}

impl PatchCategoryRequest {
    /// Validate present fields and convert to a change set
    ///
    /// # Errors
    ///
    /// Returns a validation error if a present field is empty or too long.
    pub fn validate(self) -> AppResult<CategoryChanges> {
        Ok(CategoryChanges {
            category_name: validation::optional_text("category_name", self.category_name)?,
            category_description: validation::optional_text(
                "category_description",
                self.category_description,
            )?,
        })
    }
}

/// Column updates for a category; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct CategoryChanges {
    /// New name
    pub category_name: Option<String>,
    /// New description
    pub category_description: Option<String>,
}

impl From<CreateCategoryRequest> for CategoryChanges {
    fn from(request: CreateCategoryRequest) -> Self {
        Self {
            category_name: Some(request.category_name),
            category_description: request.category_description,
        }
    }
}
