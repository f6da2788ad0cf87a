// ABOUTME: Organization model and request bodies
// ABOUTME: Organizations are created by admin self-registration
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::AppResult;
use crate::validation;

/// Row of the `organizations` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Organization {
    /// Primary key
    pub id: i64,
    /// Unique organization name
    pub organization_name: String,
    /// Free-form description
    pub organization_description: Option<String>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /v1/organization/` and `PUT /v1/organization/{id}/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganizationRequest {
    /// Unique organization name
    pub organization_name: String,
    /// Free-form description
    pub organization_description: Option<String>,
}

impl CreateOrganizationRequest {
    /// Trim and length-check every field
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field is empty or too long.
    pub fn validate(self) -> AppResult<Self> {
        Ok(Self {
            organization_name: validation::text("organization_name", &self.organization_name)?,
            organization_description: validation::optional_text(
                "organization_description",
                self.organization_description,
            )?,
        })
    }
}

/// Body of `PATCH /v1/organization/{id}/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchOrganizationRequest {
    /// New name
    pub organization_name: Option<String>,
    /// New description
    pub organization_description: Option<String>,
}

/// Column updates for an organization; `None` leaves the column untouched
#[derive(Debug, Clone, Default)]
pub struct OrganizationChanges {
    /// New name
    pub organization_name: Option<String>,
    /// New description
    pub organization_description: Option<String>,
}

impl From<CreateOrganizationRequest> for OrganizationChanges {
    fn from(request: CreateOrganizationRequest) -> Self {
        Self {
            organization_name: Some(request.organization_name),
            organization_description: request.organization_description,
        }
    }
}

impl PatchOrganizationRequest {
    /// Validate present fields and convert to a change set
    ///
    /// # Errors
    ///
    /// Returns a validation error if a present field is empty or too long.
    pub fn validate(self) -> AppResult<OrganizationChanges> {
        Ok(OrganizationChanges {
            organization_name: validation::optional_text(
                "organization_name",
                self.organization_name,
            )?,
            organization_description: validation::optional_text(
                "organization_description",
                self.organization_description,
            )?,
        })
    }
}
