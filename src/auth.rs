// ABOUTME: JWT token issuing and validation plus bcrypt password hashing
// ABOUTME: Access, refresh and emailed OTP tokens share one HMAC algorithm with separate secrets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

//! # Authentication
//!
//! Three token kinds are issued, each signed with its own secret:
//!
//! - **access** tokens authenticate API calls,
//! - **refresh** tokens mint new access tokens,
//! - **OTP** tokens carry a six-digit code inside emailed links.
//!
//! A token that fails validation because it expired maps to
//! `AUTH_EXPIRED`; every other failure maps to `AUTH_INVALID`.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::{Error as JwtError, ErrorKind};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::environment::{AuthConfig, Secret};
use crate::constants::messages::core as core_messages;
use crate::constants::tokens::OTP_TOKEN_EXPIRE_MINUTES;
use crate::errors::{AppError, AppResult};
use crate::models::User;

/// Kind of session token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    /// Short-lived API credential
    Access,
    /// Long-lived credential used to mint access tokens
    Refresh,
}

impl TokenType {
    /// Wire name reported in token responses
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Access => "access_token",
            Self::Refresh => "refresh_token",
        }
    }
}

/// Claims carried by access and refresh tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// User id
    pub id: i64,
    /// Username at issue time
    pub username: String,
    /// Email at issue time
    pub email: String,
    /// Expiration timestamp (seconds)
    pub exp: i64,
}

/// Claims carried by emailed OTP tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtpClaims {
    /// Recipient address
    pub email: String,
    /// Six-digit code
    pub token: String,
    /// Expiration timestamp (seconds)
    pub exp: i64,
}

/// Hash a password with bcrypt
///
/// # Errors
///
/// Returns an error if bcrypt rejects the cost or input.
pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    bcrypt::hash(password, cost)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))
}

/// Check a password against a stored bcrypt hash
///
/// Malformed hashes count as a mismatch.
#[must_use]
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or_else(|e| {
        warn!("Stored password hash could not be verified: {e}");
        false
    })
}

/// Issues and validates every token kind
#[derive(Debug, Clone)]
pub struct AuthManager {
    algorithm: Algorithm,
    access_secret: Secret,
    refresh_secret: Secret,
    otp_secret: Secret,
    access_expire_minutes: i64,
    refresh_expire_minutes: i64,
    password_cost: u32,
}

impl AuthManager {
    /// Build from the loaded configuration
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            algorithm: config.algorithm,
            access_secret: config.access_token_secret.clone(),
            refresh_secret: config.refresh_token_secret.clone(),
            otp_secret: config.otp_code_secret.clone(),
            access_expire_minutes: config.access_token_expire_minutes,
            refresh_expire_minutes: config.refresh_token_expire_minutes,
            password_cost: bcrypt::DEFAULT_COST,
        }
    }

    /// Override the bcrypt work factor
    #[must_use]
    pub const fn with_password_cost(mut self, cost: u32) -> Self {
        self.password_cost = cost;
        self
    }

    /// Hash a password with the configured work factor
    ///
    /// # Errors
    ///
    /// Returns an error if hashing fails.
    pub fn hash_password(&self, password: &str) -> AppResult<String> {
        hash_password(password, self.password_cost)
    }

    fn secret_for(&self, token_type: TokenType) -> &Secret {
        match token_type {
            TokenType::Access => &self.access_secret,
            TokenType::Refresh => &self.refresh_secret,
        }
    }

    const fn lifetime_for(&self, token_type: TokenType) -> i64 {
        match token_type {
            TokenType::Access => self.access_expire_minutes,
            TokenType::Refresh => self.refresh_expire_minutes,
        }
    }

    fn sign<T: Serialize>(&self, claims: &T, secret: &Secret) -> AppResult<String> {
        encode(
            &Header::new(self.algorithm),
            claims,
            &EncodingKey::from_secret(secret.expose().as_bytes()),
        )
        .map_err(|e| AppError::internal(format!("Failed to sign token: {e}")))
    }

    fn verify<T: DeserializeOwned + Clone>(&self, token: &str, secret: &Secret) -> AppResult<T> {
        let validation = Validation::new(self.algorithm);
        decode::<T>(
            token,
            &DecodingKey::from_secret(secret.expose().as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| Self::convert_jwt_error(&e))
    }

    fn convert_jwt_error(e: &JwtError) -> AppError {
        match e.kind() {
            ErrorKind::ExpiredSignature => {
                debug!("Rejected expired token");
                AppError::auth_expired()
            }
            _ => {
                debug!("Rejected invalid token: {e}");
                AppError::auth_invalid(core_messages::INVALID_TOKEN)
            }
        }
    }

    /// Issue an access or refresh token for a user
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub fn create_token(&self, user: &User, token_type: TokenType) -> AppResult<String> {
        let claims = Claims {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            exp: (Utc::now() + Duration::minutes(self.lifetime_for(token_type))).timestamp(),
        };
        self.sign(&claims, self.secret_for(token_type))
    }

    /// Issue an access token from previously validated claims
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub fn reissue_access_token(&self, claims: &Claims) -> AppResult<String> {
        let claims = Claims {
            exp: (Utc::now() + Duration::minutes(self.access_expire_minutes)).timestamp(),
            ..claims.clone()
        };
        self.sign(&claims, &self.access_secret)
    }

    /// Validate an access token
    ///
    /// # Errors
    ///
    /// Returns `AUTH_EXPIRED` or `AUTH_INVALID`.
    pub fn validate_access_token(&self, token: &str) -> AppResult<Claims> {
        self.verify(token, &self.access_secret)
    }

    /// Validate a refresh token
    ///
    /// # Errors
    ///
    /// Returns `AUTH_EXPIRED` or `AUTH_INVALID`.
    pub fn validate_refresh_token(&self, token: &str) -> AppResult<Claims> {
        self.verify(token, &self.refresh_secret)
    }

    /// Wrap an OTP code in a short-lived signed token
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    pub fn create_otp_token(&self, email: &str, otp: &str) -> AppResult<String> {
        let claims = OtpClaims {
            email: email.to_owned(),
            token: otp.to_owned(),
            exp: (Utc::now() + Duration::minutes(OTP_TOKEN_EXPIRE_MINUTES)).timestamp(),
        };
        self.sign(&claims, &self.otp_secret)
    }

    /// Validate an OTP token
    ///
    /// # Errors
    ///
    /// Returns `AUTH_EXPIRED` or `AUTH_INVALID`.
    pub fn validate_otp_token(&self, token: &str) -> AppResult<OtpClaims> {
        self.verify(token, &self.otp_secret)
    }
}
