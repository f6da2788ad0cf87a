// ABOUTME: Email verification route handlers
// ABOUTME: Mails verification OTPs and activates accounts whose OTP token matches
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{AuthRoutes, EmailRequest, EmailSentResponse, JsonBody};
use crate::constants::email::{verify_subject, VERIFY_PURPOSE};
use crate::constants::messages::{email as email_messages, user as user_messages};
use crate::database_plugins::DatabaseProvider;
use crate::errors::AppError;
use crate::resources::ServerResources;
use crate::validation;

/// Body of `POST /email/verify/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerifyEmailRequest {
    /// OTP token from the emailed link
    pub token: String,
}

/// Email verification routes implementation
pub struct EmailRoutes;

impl EmailRoutes {
    /// Create all email routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/email/verify-request/", post(Self::handle_verify_request))
            .route("/email/verify/", post(Self::handle_verify))
            .with_state(resources)
    }

    /// Handle POST /email/verify-request/ - Mail a fresh verification OTP
    async fn handle_verify_request(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(body): JsonBody<EmailRequest>,
    ) -> Result<Response, AppError> {
        let email = validation::email(&body.email)?;

        let user = resources
            .database
            .get_user_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found(user_messages::USER_NOT_FOUND))?;

        if user.email_verified {
            return Err(AppError::invalid_input(email_messages::USER_ALREADY_VERIFIED));
        }

        let otp = resources
            .mailer
            .send_email_otp(
                &user.email,
                &user.full_name(),
                VERIFY_PURPOSE,
                &verify_subject(resources.mailer.company_name()),
            )
            .await
            .map_err(|e| AppError::invalid_input(email_messages::EMAIL_SENT_FAILED).with_source(e))?;

        resources.database.set_email_otp(user.id, &otp).await?;

        let response = EmailSentResponse {
            success: true,
            detail: email_messages::EMAIL_SENT.to_owned(),
        };
        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle POST /email/verify/ - Activate the account and log it in
    async fn handle_verify(
        State(resources): State<Arc<ServerResources>>,
        JsonBody(body): JsonBody<VerifyEmailRequest>,
    ) -> Result<Response, AppError> {
        let claims = resources
            .auth_manager
            .validate_otp_token(body.token.trim())?;

        let user = resources
            .database
            .get_user_by_email(&claims.email)
            .await?
            .ok_or_else(|| AppError::not_found(user_messages::USER_NOT_FOUND))?;

        if user.email_verified {
            return Err(AppError::invalid_input(email_messages::USER_ALREADY_VERIFIED));
        }
        if user.email_otp.as_deref() != Some(claims.token.as_str()) {
            return Err(AppError::invalid_input(email_messages::INCORRECT_OTP_CODE));
        }

        resources.database.mark_email_verified(user.id).await?;
        info!(user_id = user.id, "Email verified");

        let response = AuthRoutes::login_response(
            &resources,
            &user,
            Some(email_messages::EMAIL_VERIFIED.to_owned()),
        )
        .await?;
        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
