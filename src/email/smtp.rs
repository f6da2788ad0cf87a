// ABOUTME: SMTP email delivery over a STARTTLS relay using lettre
// ABOUTME: Authenticates with EMAIL_USERNAME/EMAIL_PASSWORD when both are configured
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Address, AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{debug, info};

use super::{EmailMessage, EmailSender};
use crate::config::EmailConfig;
use crate::errors::{AppError, AppResult};

/// Sends mail through the configured SMTP relay
pub struct SmtpEmailSender {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailSender {
    /// Configure the relay from `EMAIL_*` settings
    ///
    /// No connection is opened until the first message is sent.
    ///
    /// # Errors
    ///
    /// Returns a `CONFIG_INVALID` error if the sender address or relay host
    /// is unusable.
    pub fn new(config: &EmailConfig) -> AppResult<Self> {
        let address: Address = config
            .from
            .parse()
            .map_err(|e| AppError::config_invalid("EMAIL_FROM", e))?;
        let from = Mailbox::new(config.from_name.clone(), address);

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
            .map_err(|e| AppError::config_invalid("EMAIL_HOST", e))?
            .port(config.port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(
                username.clone(),
                password.expose().to_owned(),
            ));
        }

        info!(
            host = %config.host,
            port = config.port,
            "SMTP email sender configured"
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(&self, message: &EmailMessage) -> AppResult<Message> {
        let to: Address = message
            .to
            .parse()
            .map_err(|e| AppError::email_delivery(format!("Invalid recipient address: {e}")))?;

        Message::builder()
            .from(self.from.clone())
            .to(Mailbox::new(None, to))
            .subject(message.subject.clone())
            .header(ContentType::TEXT_HTML)
            .body(message.html_body.clone())
            .map_err(|e| AppError::email_delivery(format!("Failed to build email: {e}")))
    }
}

#[async_trait]
impl EmailSender for SmtpEmailSender {
    fn name(&self) -> &'static str {
        "smtp"
    }

    async fn send(&self, message: &EmailMessage) -> AppResult<()> {
        let email = self.build_message(message)?;
        self.transport
            .send(email)
            .await
            .map_err(|e| AppError::email_delivery(format!("SMTP delivery failed: {e}")))?;
        debug!(subject = %message.subject, "Email handed to SMTP relay");
        Ok(())
    }
}
