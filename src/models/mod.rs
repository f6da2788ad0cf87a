// ABOUTME: Domain models for roles, organizations, users, categories and products
// ABOUTME: Row types map to database tables, request types validate client input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

//! # Data Models
//!
//! Each entity module contains three kinds of types:
//!
//! - the row type (`Role`, `User`, ...) decoded straight from the database,
//! - request bodies (`CreateXRequest`, `UpdateXRequest`, `PatchXRequest`)
//!   with a `validate` method that returns the normalized value,
//! - the change set handed to the database layer.
//!
//! All tables carry `id`, `created_at` and `updated_at`.

/// Product categories
pub mod category;
/// Organizations owning admin accounts
pub mod organization;
/// Catalog products
pub mod product;
/// Roles referenced by users
pub mod role;
/// User accounts
pub mod user;

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::AppError;

pub use category::{
    Category, CategoryChanges, CreateCategoryRequest, PatchCategoryRequest, UpdateCategoryRequest,
};
pub use organization::{
    CreateOrganizationRequest, Organization, OrganizationChanges, PatchOrganizationRequest,
};
pub use product::{
    CreateProductRequest, NewProduct, PatchProductRequest, Product, ProductChanges,
    UpdateProductRequest,
};
pub use role::{CreateRoleRequest, PatchRoleRequest, Role, RoleChanges};
pub use user::{
    CreateUserRequest, NewUser, PatchUserRequest, UpdateUserRequest, User, UserChanges,
    UserProfileFields, UserResponse,
};

/// Session state of a user account
///
/// Access tokens stay cryptographically valid until they expire; this marker
/// is what lets a logout take effect immediately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenStatus {
    /// Logged in
    Login,
    /// Logged out (initial state)
    #[default]
    Logout,
    /// Waiting for email verification
    EmailVerify,
    /// Waiting for password reset
    PasswordReset,
}

impl TokenStatus {
    /// Database representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Login => "login",
            Self::Logout => "logout",
            Self::EmailVerify => "email_verify",
            Self::PasswordReset => "password_reset",
        }
    }
}

impl Display for TokenStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "login" => Ok(Self::Login),
            "logout" => Ok(Self::Logout),
            "email_verify" => Ok(Self::EmailVerify),
            "password_reset" => Ok(Self::PasswordReset),
            other => Err(AppError::database(format!("Unknown token status: {other}"))),
        }
    }
}

impl TryFrom<String> for TokenStatus {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_status_round_trips_through_text() {
        for status in [
            TokenStatus::Login,
            TokenStatus::Logout,
            TokenStatus::EmailVerify,
            TokenStatus::PasswordReset,
        ] {
            assert_eq!(status.as_str().parse::<TokenStatus>().unwrap(), status);
        }
        assert!("banned".parse::<TokenStatus>().is_err());
    }

    #[test]
    fn test_token_status_serializes_snake_case() {
        assert_eq!(
            serde_json::to_value(TokenStatus::PasswordReset).unwrap(),
            "password_reset"
        );
        assert_eq!(TokenStatus::default(), TokenStatus::Logout);
    }
}
