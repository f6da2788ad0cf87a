// ABOUTME: One-time code generation and delivery for email verification and password reset
// ABOUTME: Wraps the code in a signed OTP token and mails a client link carrying it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use std::sync::Arc;

use rand::Rng;

use super::{EmailMessage, EmailSender, EmailTemplateData};
use crate::auth::AuthManager;
use crate::config::ClientConfig;
use crate::constants::messages::email as email_messages;
use crate::constants::tokens::{OTP_MAX, OTP_MIN};
use crate::errors::{AppError, AppResult};
use crate::logging::AppLogger;

/// Random six-digit code
#[must_use]
pub fn generate_otp() -> String {
    rand::thread_rng().gen_range(OTP_MIN..=OTP_MAX).to_string()
}

/// Client link for an OTP token: `{base_url}/{purpose-slug}/{token}`
#[must_use]
pub fn otp_link(base_url: &str, purpose: &str, token: &str) -> String {
    let slug = purpose.to_lowercase().replace(' ', "-");
    format!("{base_url}/{slug}/{token}")
}

/// Mails one-time codes to users
#[derive(Clone)]
pub struct OtpMailer {
    sender: Arc<dyn EmailSender>,
    auth: Arc<AuthManager>,
    client: ClientConfig,
}

impl OtpMailer {
    /// Create a mailer over the given sender
    #[must_use]
    pub fn new(sender: Arc<dyn EmailSender>, auth: Arc<AuthManager>, client: ClientConfig) -> Self {
        Self {
            sender,
            auth,
            client,
        }
    }

    /// Company name used in subjects and the template
    #[must_use]
    pub fn company_name(&self) -> &str {
        &self.client.company_name
    }

    /// Generate a code, mail it to `recipient` and return it
    ///
    /// The caller stores the returned code on the user row so the emailed
    /// token can later be checked against it.
    ///
    /// # Errors
    ///
    /// Returns an `EMAIL_DELIVERY_FAILED` error carrying "Email sending
    /// failed" if signing or delivery fails.
    pub async fn send_email_otp(
        &self,
        recipient: &str,
        user_name: &str,
        purpose: &str,
        subject: &str,
    ) -> AppResult<String> {
        let otp_code = generate_otp();
        let token = self.auth.create_otp_token(recipient, &otp_code)?;

        let html_body = EmailTemplateData {
            url: otp_link(&self.client.base_url, purpose, &token),
            otp_code: otp_code.clone(),
            user_name: user_name.to_owned(),
            email_purpose: purpose.to_owned(),
            company_name: self.client.company_name.clone(),
            base_url: self.client.base_url.clone(),
        }
        .render();

        let message = EmailMessage {
            to: recipient.to_owned(),
            subject: subject.to_owned(),
            html_body,
        };

        match self.sender.send(&message).await {
            Ok(()) => {
                AppLogger::log_email_event(recipient, purpose, true);
                Ok(otp_code)
            }
            Err(e) => {
                AppLogger::log_email_event(recipient, purpose, false);
                Err(AppError::email_delivery(email_messages::EMAIL_SENT_FAILED).with_source(e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::Algorithm;

    use super::*;
    use crate::config::environment::generate_secret;
    use crate::config::AuthConfig;
    use crate::email::RecordingEmailSender;

    #[test]
    fn test_generate_otp_is_six_digits() {
        for _ in 0..100 {
            let otp = generate_otp();
            assert_eq!(otp.len(), 6);
            assert!(otp.chars().all(|c| c.is_ascii_digit()));
            assert!(!otp.starts_with('0'));
        }
    }

    #[test]
    fn test_otp_link_slugifies_purpose() {
        assert_eq!(
            otp_link("https://shop.example.com", "Reset Password", "tok"),
            "https://shop.example.com/reset-password/tok"
        );
    }

    #[tokio::test]
    async fn test_send_email_otp_mails_link_with_matching_code() {
        let auth = Arc::new(AuthManager::new(&AuthConfig {
            algorithm: Algorithm::HS256,
            access_token_secret: generate_secret(),
            refresh_token_secret: generate_secret(),
            otp_code_secret: generate_secret(),
            access_token_expire_minutes: 15,
            refresh_token_expire_minutes: 60,
        }));
        let sender = Arc::new(RecordingEmailSender::new());
        let mailer = OtpMailer::new(
            sender.clone(),
            auth.clone(),
            ClientConfig {
                base_url: "https://shop.example.com".into(),
                company_name: "Acme".into(),
            },
        );

        let otp = mailer
            .send_email_otp("jane@example.com", "Jane Doe", "Verify Email", "Welcome to Acme")
            .await
            .unwrap();

        let message = sender.last_message_to("jane@example.com").await.unwrap();
        assert_eq!(message.subject, "Welcome to Acme");
        assert!(message.html_body.contains(&otp));

        let prefix = "https://shop.example.com/verify-email/";
        let start = message.html_body.find(prefix).unwrap() + prefix.len();
        let token: String = message.html_body[start..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
            .collect();
        let claims = auth.validate_otp_token(&token).unwrap();
        assert_eq!(claims.token, otp);
        assert_eq!(claims.email, "jane@example.com");
    }
}
