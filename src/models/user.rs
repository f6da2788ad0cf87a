// ABOUTME: User account model, public response view and request bodies
// ABOUTME: Password hashes and OTP codes never leave the server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::TokenStatus;
use crate::errors::AppResult;
use crate::validation;

/// Row of the `users` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    /// Primary key
    pub id: i64,
    /// Capitalized first name
    pub first_name: String,
    /// Capitalized last name
    pub last_name: String,
    /// Phone number
    pub contact: Option<String>,
    /// Unique lowercase username
    pub username: String,
    /// Unique lowercase email
    pub email: String,
    /// bcrypt hash
    pub password_hash: String,
    /// Street address
    pub address: Option<String>,
    /// City
    pub city: Option<String>,
    /// State or province
    pub state: Option<String>,
    /// Country
    pub country: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// Path of the uploaded avatar
    pub profile_image_path: Option<String>,
    /// Pending email verification code
    pub email_otp: Option<String>,
    /// Email ownership confirmed
    pub email_verified: bool,
    /// Pending password reset code
    pub password_otp: Option<String>,
    /// Allowed to use the API
    pub is_active: bool,
    /// Session marker
    #[sqlx(try_from = "String")]
    pub token_status: TokenStatus,
    /// Assigned role
    pub role_id: i64,
    /// Owning organization, `None` for the super-admin
    pub organization_id: Option<i64>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Display name used in emails
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// User as returned to API clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    /// Primary key
    pub id: i64,
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Phone number
    pub contact: Option<String>,
    /// Username
    pub username: String,
    /// Email
    pub email: String,
    /// Street address
    pub address: Option<String>,
    /// City
    pub city: Option<String>,
    /// State or province
    pub state: Option<String>,
    /// Country
    pub country: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// Avatar path
    pub profile_image_path: Option<String>,
    /// Email ownership confirmed
    pub email_verified: bool,
    /// Allowed to use the API
    pub is_active: bool,
    /// Session marker
    pub token_status: TokenStatus,
    /// Assigned role
    pub role_id: i64,
    /// Owning organization
    pub organization_id: Option<i64>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            first_name: user.first_name,
            last_name: user.last_name,
            contact: user.contact,
            username: user.username,
            email: user.email,
            address: user.address,
            city: user.city,
            state: user.state,
            country: user.country,
            postal_code: user.postal_code,
            profile_image_path: user.profile_image_path,
            email_verified: user.email_verified,
            is_active: user.is_active,
            token_status: user.token_status,
            role_id: user.role_id,
            organization_id: user.organization_id,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Fully resolved user ready for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Phone number
    pub contact: Option<String>,
    /// Username
    pub username: String,
    /// Email
    pub email: String,
    /// bcrypt hash
    pub password_hash: String,
    /// Street address
    pub address: Option<String>,
    /// City
    pub city: Option<String>,
    /// State or province
    pub state: Option<String>,
    /// Country
    pub country: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// Pending verification code
    pub email_otp: Option<String>,
    /// Email ownership confirmed
    pub email_verified: bool,
    /// Allowed to use the API
    pub is_active: bool,
    /// Initial session marker
    pub token_status: TokenStatus,
    /// Assigned role
    pub role_id: i64,
    /// Owning organization
    pub organization_id: Option<i64>,
}

/// Profile fields shared by every user body
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfileFields {
    /// Phone number
    pub contact: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// City
    pub city: Option<String>,
    /// State or province
    pub state: Option<String>,
    /// Country
    pub country: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
}

impl UserProfileFields {
    /// Validate every present field
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field breaks its rule.
    pub fn validate(self) -> AppResult<Self> {
        Ok(Self {
            contact: self
                .contact
                .map(|c| validation::contact(&c))
                .transpose()?,
            address: validation::optional_text("address", self.address)?,
            city: validation::optional_text("city", self.city)?,
            state: validation::optional_text("state", self.state)?,
            country: validation::optional_text("country", self.country)?,
            postal_code: validation::optional_text("postal_code", self.postal_code)?,
        })
    }
}

/// Body of `POST /v1/user/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUserRequest {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Username
    pub username: String,
    /// Email
    pub email: String,
    /// Plain-text password, hashed before storage
    pub password: String,
    /// Assigned role
    pub role_id: i64,
    /// Optional profile data
    #[serde(flatten)]
    pub profile: UserProfileFields,
}

impl CreateUserRequest {
    /// Validate and normalize every field
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field breaks its rule.
    pub fn validate(self) -> AppResult<Self> {
        Ok(Self {
            first_name: validation::name("first_name", &self.first_name)?,
            last_name: validation::name("last_name", &self.last_name)?,
            username: validation::username(&self.username)?,
            email: validation::email(&self.email)?,
            password: validation::password(&self.password)?,
            role_id: validation::positive_id("role_id", self.role_id)?,
            profile: self.profile.validate()?,
        })
    }

    /// Resolve into an insertable user
    #[must_use]
    pub fn into_new_user(self, password_hash: String, organization_id: Option<i64>) -> NewUser {
        NewUser {
            first_name: self.first_name,
            last_name: self.last_name,
            contact: self.profile.contact,
            username: self.username,
            email: self.email,
            password_hash,
            address: self.profile.address,
            city: self.profile.city,
            state: self.profile.state,
            country: self.profile.country,
            postal_code: self.profile.postal_code,
            email_otp: None,
            email_verified: false,
            is_active: false,
            token_status: TokenStatus::Logout,
            role_id: self.role_id,
            organization_id,
        }
    }
}

/// Body of `PUT /v1/user/{id}/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Username
    pub username: String,
    /// Email
    pub email: String,
    /// Assigned role
    pub role_id: i64,
    /// Allowed to use the API
    pub is_active: bool,
    /// Optional profile data
    #[serde(flatten)]
    pub profile: UserProfileFields,
}

impl UpdateUserRequest {
    /// Validate and convert to a change set
    ///
    /// # Errors
    ///
    /// Returns a validation error if a field breaks its rule.
    pub fn validate(self) -> AppResult<UserChanges> {
        let profile = self.profile.validate()?;
        Ok(UserChanges {
            first_name: Some(validation::name("first_name", &self.first_name)?),
            last_name: Some(validation::name("last_name", &self.last_name)?),
            username: Some(validation::username(&self.username)?),
            email: Some(validation::email(&self.email)?),
            role_id: Some(validation::positive_id("role_id", self.role_id)?),
            is_active: Some(self.is_active),
            contact: profile.contact,
            address: profile.address,
            city: profile.city,
            state: profile.state,
            country: profile.country,
            postal_code: profile.postal_code,
        })
    }
}

/// Body of `PATCH /v1/user/{id}/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchUserRequest {
    /// First name
    pub first_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// Username
    pub username: Option<String>,
    /// Email
    pub email: Option<String>,
    /// Assigned role
    pub role_id: Option<i64>,
    /// Allowed to use the API
    pub is_active: Option<bool>,
    /// Optional profile data
    #[serde(flatten)]
    pub profile: UserProfileFields,
}

impl PatchUserRequest {
    /// Validate present fields and convert to a change set
    ///
    /// # Errors
    ///
    /// Returns a validation error if a present field breaks its rule.
    pub fn validate(self) -> AppResult<UserChanges> {
        let profile = self.profile.validate()?;
        Ok(UserChanges {
            first_name: self
                .first_name
                .map(|n| validation::name("first_name", &n))
                .transpose()?,
            last_name: self
                .last_name
                .map(|n| validation::name("last_name", &n))
                .transpose()?,
            username: self
                .username
                .map(|u| validation::username(&u))
                .transpose()?,
            email: self.email.map(|e| validation::email(&e)).transpose()?,
            role_id: self
                .role_id
                .map(|id| validation::positive_id("role_id", id))
                .transpose()?,
            is_active: self.is_active,
            contact: profile.contact,
            address: profile.address,
            city: profile.city,
            state: profile.state,
            country: profile.country,
            postal_code: profile.postal_code,
        })
    }
}

/// Column updates for a user; `None` leaves the column untouched
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    /// First name
    pub first_name: Option<String>,
    /// Last name
    pub last_name: Option<String>,
    /// Phone number
    pub contact: Option<String>,
    /// Username
    pub username: Option<String>,
    /// Email
    pub email: Option<String>,
    /// Street address
    pub address: Option<String>,
    /// City
    pub city: Option<String>,
    /// State or province
    pub state: Option<String>,
    /// Country
    pub country: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// Assigned role
    pub role_id: Option<i64>,
    /// Allowed to use the API
    pub is_active: Option<bool>,
}
