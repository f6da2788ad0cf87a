// ABOUTME: Role model and request bodies
// ABOUTME: Roles are referenced by users and seeded at start-up
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;
use crate::validation;

/// Row of the `roles` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Role {
    /// Primary key
    pub id: i64,
    /// Unique role name
    pub role_name: String,
    /// Free-form description
    pub role_description: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /v1/role/` and `PUT /v1/role/{id}/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoleRequest {
    /// Unique role name
    pub role_name: String,
    /// Free-form description
    pub role_description: Option<String>,
}

impl CreateRoleRequest {
    /// Trim and length-check every field
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field is empty or too long.
    pub fn validate(self) -> AppResult<Self> {
        Ok(Self {
            role_name: validation::text("role_name", &self.role_name)?,
            role_description: validation::optional_text("role_description", self.role_description)?,
        })
    }
}

/// Body of `PATCH /v1/role/{id}/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchRoleRequest {
    /// New name
    pub role_name: Option<String>,
    /// New description
    pub role_description: Option<String>,
}

/// Column updates for a role; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct RoleChanges {
    /// New name
    pub role_name: Option<String>,
    /// New description
    pub role_description: Option<String>,
}

impl From<CreateRoleRequest> for RoleChanges {
    fn from(request: CreateRoleRequest) -> Self {
        Self {
            role_name: Some(request.role_name),
            role_description: request.role_description,
        }
    }
}

impl PatchRoleRequest {
    /// Validate present fields and convert to a change set
    ///
    /// # Errors
    ///
    /// Returns a validation error if a present field is empty or too long.
    pub fn validate(self) -> AppResult<RoleChanges> {
        Ok(RoleChanges {
            role_name: validation::optional_text("role_name", self.role_name)?,
            role_description: validation::optional_text("role_description", self.role_description)?,
        })
    }
}
