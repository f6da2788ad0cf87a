// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Response messages, role names and defaults for the Shopfront API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

//! Constants module
//!
//! Constants are grouped into logical domains rather than being in a single
//! large file. Response messages are part of the public API contract: clients
//! match on them, so their wording must stay stable.

/// Response messages returned in `detail` fields
pub mod messages;

/// Built-in role names seeded at start-up
pub mod roles {
    /// Organization administrator created by self-registration
    pub const ADMIN: &str = "admin";
    /// Admin role description
    pub const ADMIN_DESCRIPTION: &str = "Admin Role Description";
    /// Store manager
    pub const MANAGER: &str = "manager";
    /// Manager role description
    pub const MANAGER_DESCRIPTION: &str = "Manager Role Description";
    /// Regular user
    pub const USER: &str = "user";
    /// User role description
    pub const USER_DESCRIPTION: &str = "User Role Description";
}

/// Token and OTP defaults
pub mod tokens {
    /// `token_type` returned by the login endpoint
    pub const BEARER_TOKEN_TYPE: &str = "bearer";
    /// Access token lifetime (one day)
    pub const DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES: i64 = 1440;
    /// Refresh token lifetime (seven days)
    pub const DEFAULT_REFRESH_TOKEN_EXPIRE_MINUTES: i64 = 10080;
    /// Lifetime of the JWT wrapping an emailed OTP
    pub const OTP_TOKEN_EXPIRE_MINUTES: i64 = 5;
    /// Smallest six-digit OTP
    pub const OTP_MIN: u32 = 100_000;
    /// Largest six-digit OTP
    pub const OTP_MAX: u32 = 999_999;
    /// Random bytes used for generated signing secrets
    pub const GENERATED_SECRET_BYTES: usize = 32;
}

/// Email subjects and purposes
pub mod email {
    /// Purpose line of the verification email, also used as link path segment
    pub const VERIFY_PURPOSE: &str = "Verify Email";
    /// Subject of the password reset email
    pub const PASSWORD_RESET_SUBJECT: &str = "Reset Password Request";
    /// Purpose line of the password reset email
    pub const PASSWORD_RESET_PURPOSE: &str = "Reset Password";

    /// Subject of the verification email for a given company
    #[must_use]
    pub fn verify_subject(company_name: &str) -> String {
        format!("Welcome to {company_name}")
    }
}

/// Project metadata defaults
pub mod project {
    /// Default service title
    pub const DEFAULT_TITLE: &str = "Ecommerce Assessment APIs Project";
    /// Default service description
    pub const DEFAULT_DESCRIPTION: &str = "Ecommerce Assessment APIs Project Documentation";
    /// Default API version string
    pub const DEFAULT_VERSION: &str = "1.0.0";
    /// Default completion model for AI integrations
    pub const DEFAULT_MODEL_NAME: &str = "gpt-3.5-turbo-16k";
    /// Service name used in logs
    pub const SERVICE_NAME: &str = "shopfront-api";
}

/// Network defaults
pub mod network {
    /// Default bind address
    pub const DEFAULT_HOST: &str = "0.0.0.0";
    /// Default HTTP port
    pub const DEFAULT_HTTP_PORT: u16 = 8000;
    /// Default PostgreSQL port
    pub const DEFAULT_DB_PORT: u16 = 5432;
    /// Default SMTP submission port
    pub const DEFAULT_EMAIL_PORT: u16 = 587;
    /// Maximum accepted request body
    pub const MAX_BODY_BYTES: usize = 1024 * 1024;
    /// Request timeout in seconds
    pub const REQUEST_TIMEOUT_SECS: u64 = 30;
}

/// Field limits shared by validation and schema
pub mod limits {
    /// Maximum length of any string column
    pub const MAX_STRING_LENGTH: usize = 255;
    /// Minimum password length
    pub const MIN_PASSWORD_LENGTH: usize = 8;
    /// Maximum password length
    pub const MAX_PASSWORD_LENGTH: usize = 100;
    /// Default low stock threshold for new products
    pub const DEFAULT_LOW_STOCK_THRESHOLD: i32 = 50;
}
