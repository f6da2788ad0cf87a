// ABOUTME: Unified error type, error codes, and HTTP error responses
// ABOUTME: Every fallible operation in the API surfaces an AppError with a stable code
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

//! # Unified Error Handling System
//!
//! This module provides a centralized error handling system for the Shopfront API.
//! It defines the error codes, the application error type and the JSON body
//! returned to clients, so that every route reports failures the same way.

#[cfg(feature = "database-errors")]
mod database;

#[cfg(feature = "http-response")]
mod http_response;

use std::error::Error as StdError;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::messages::core as core_messages;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// No credentials supplied
    #[serde(rename = "AUTH_REQUIRED")]
    AuthRequired,
    /// Credentials could not be validated
    #[serde(rename = "AUTH_INVALID")]
    AuthInvalid,
    /// Token signature is valid but the token has expired
    #[serde(rename = "AUTH_EXPIRED")]
    AuthExpired,
    /// Authenticated but not allowed
    #[serde(rename = "PERMISSION_DENIED")]
    PermissionDenied,
    /// Account exists but has not been activated
    #[serde(rename = "INACTIVE_USER")]
    InactiveUser,

    // Validation
    /// Request was understood but rejected by business rules
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// Request body failed field validation
    #[serde(rename = "VALIDATION_FAILED")]
    ValidationFailed,

    // Resource Management
    /// Resource does not exist
    #[serde(rename = "RESOURCE_NOT_FOUND")]
    ResourceNotFound,
    /// Resource with the same unique key exists
    #[serde(rename = "RESOURCE_ALREADY_EXISTS")]
    ResourceAlreadyExists,
    /// Database integrity constraint rejected the write
    #[serde(rename = "CONSTRAINT_VIOLATION")]
    ConstraintViolation,

    // External Services
    /// Outbound email could not be delivered
    #[serde(rename = "EMAIL_DELIVERY_FAILED")]
    EmailDeliveryFailed,

    // Configuration
    /// Generic configuration problem
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError,
    /// Required environment variable is absent
    #[serde(rename = "CONFIG_MISSING")]
    ConfigMissing,
    /// Environment variable present but unparsable
    #[serde(rename = "CONFIG_INVALID")]
    ConfigInvalid,

    // Internal Errors
    /// Unexpected server failure
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
    /// Database driver or pool failure
    #[serde(rename = "DATABASE_ERROR")]
    DatabaseError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        match self {
            // 400 Bad Request
            Self::InvalidInput | Self::InactiveUser => 400,

            // 401 Unauthorized
            Self::AuthRequired | Self::AuthInvalid | Self::AuthExpired => 401,

            // 403 Forbidden
            Self::PermissionDenied => 403,

            // 404 Not Found
            Self::ResourceNotFound => 404,

            // 409 Conflict
            Self::ResourceAlreadyExists | Self::ConstraintViolation => 409,

            // 422 Unprocessable Entity
            Self::ValidationFailed => 422,

            // 500 Internal Server Error
            Self::EmailDeliveryFailed
            | Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::ConfigMissing
            | Self::ConfigInvalid => 500,
        }
    }

    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::AuthRequired => "Authentication is required to access this resource",
            Self::AuthInvalid => "The provided authentication credentials are invalid",
            Self::AuthExpired => "The authentication token has expired",
            Self::PermissionDenied => "You do not have permission to perform this action",
            Self::InactiveUser => "The user account is not active",
            Self::InvalidInput => "The provided input is invalid",
            Self::ValidationFailed => "The request body failed validation",
            Self::ResourceNotFound => "The requested resource was not found",
            Self::ResourceAlreadyExists => "A resource with this identifier already exists",
            Self::ConstraintViolation => "The operation violates a data integrity constraint",
            Self::EmailDeliveryFailed => "The email could not be delivered",
            Self::ConfigError => "Configuration error encountered",
            Self::ConfigMissing => "Required configuration is missing",
            Self::ConfigInvalid => "Configuration is invalid",
            Self::InternalError => "An internal server error occurred",
            Self::DatabaseError => "Database operation failed",
        }
    }

    /// Whether the message of this error is safe to show to API clients
    #[must_use]
    pub const fn is_client_visible(&self) -> bool {
        !matches!(
            self,
            Self::InternalError
                | Self::DatabaseError
                | Self::ConfigError
                | Self::ConfigMissing
                | Self::ConfigInvalid
        )
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn StdError + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Get the HTTP status code for this error
    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }

    /// Message shown to API clients; internal failures are masked
    #[must_use]
    pub fn client_message(&self) -> &str {
        if self.code.is_client_visible() {
            &self.message
        } else {
            core_messages::INTERNAL_SERVER_ERROR
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// HTTP error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable message
    pub detail: String,
    /// Stable machine-readable code
    pub code: ErrorCode,
}

impl From<&AppError> for ErrorResponse {
    fn from(error: &AppError) -> Self {
        Self {
            detail: error.client_message().to_owned(),
            code: error.code,
        }
    }
}

/// Convenience functions for creating common errors
impl AppError {
    /// Authentication required
    #[must_use]
    pub fn auth_required() -> Self {
        Self::new(
            ErrorCode::AuthRequired,
            core_messages::COULD_NOT_VALIDATE_CREDENTIALS,
        )
    }

    /// Invalid authentication
    pub fn auth_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::AuthInvalid, message)
    }

    /// Authentication expired
    #[must_use]
    pub fn auth_expired() -> Self {
        Self::new(ErrorCode::AuthExpired, core_messages::TOKEN_EXPIRED)
    }

    /// Caller lacks the required role
    pub fn permission_denied(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::PermissionDenied, message)
    }

    /// Account is not active yet
    #[must_use]
    pub fn inactive_user() -> Self {
        Self::new(ErrorCode::InactiveUser, core_messages::INACTIVE_USER)
    }

    /// Resource not found, message is passed through verbatim
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceNotFound, message)
    }

    /// Invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// Field validation failure
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ValidationFailed, message)
    }

    /// Unique key already taken
    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ResourceAlreadyExists, message)
    }

    /// Integrity constraint violation
    pub fn constraint(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConstraintViolation, message)
    }

    /// Email delivery failure
    pub fn email_delivery(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::EmailDeliveryFailed, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }

    /// Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::DatabaseError, message)
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Missing environment variable
    pub fn config_missing(variable: &str) -> Self {
        Self::new(
            ErrorCode::ConfigMissing,
            format!("Environment variable {variable} is required"),
        )
    }

    /// Environment variable with an unusable value
    pub fn config_invalid(variable: &str, reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ConfigInvalid,
            format!("Environment variable {variable} is invalid: {reason}"),
        )
    }
}
