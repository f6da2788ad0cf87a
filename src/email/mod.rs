// ABOUTME: Outbound email abstraction with SMTP and in-memory delivery backends
// ABOUTME: Renders the OTP template and mails verification and password reset links
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

//! # Email
//!
//! Handlers never talk to a transport directly. They go through
//! [`OtpMailer`], which renders the HTML body and hands an [`EmailMessage`]
//! to whichever [`EmailSender`] the configuration selected:
//!
//! - [`SmtpEmailSender`] relays through `EMAIL_HOST` with STARTTLS,
//! - [`RecordingEmailSender`] keeps messages in memory and logs them
//!   (`EMAIL_BACKEND=log`, and the test suite).

/// One-time code generation and mailing
pub mod otp;
/// In-memory sender
pub mod recording;
/// SMTP sender
pub mod smtp;
/// HTML body rendering
pub mod template;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{EmailBackend, EmailConfig};
use crate::errors::AppResult;

pub use otp::{generate_otp, otp_link, OtpMailer};
pub use recording::RecordingEmailSender;
pub use smtp::SmtpEmailSender;
pub use template::EmailTemplateData;

/// A rendered message ready for delivery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    /// Recipient address
    pub to: String,
    /// Subject line
    pub subject: String,
    /// HTML body
    pub html_body: String,
}

/// Delivery backend for rendered messages
#[async_trait]
pub trait EmailSender: Send + Sync {
    /// Short backend name for logs
    fn name(&self) -> &'static str;

    /// Deliver one message
    ///
    /// # Errors
    ///
    /// Returns an `EMAIL_DELIVERY_FAILED` error if the message could not be
    /// handed to the transport.
    async fn send(&self, message: &EmailMessage) -> AppResult<()>;
}

/// Build the sender selected by `EMAIL_BACKEND`
///
/// # Errors
///
/// Returns an error if the SMTP transport cannot be configured.
pub fn create_sender(config: &EmailConfig) -> AppResult<Arc<dyn EmailSender>> {
    match config.backend {
        EmailBackend::Smtp => Ok(Arc::new(SmtpEmailSender::new(config)?)),
        EmailBackend::Log => Ok(Arc::new(RecordingEmailSender::new())),
    }
}
