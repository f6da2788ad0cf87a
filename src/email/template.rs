// ABOUTME: HTML rendering of the OTP email template
// ABOUTME: Escapes every substituted value before it lands in the markup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use html_escape::{encode_double_quoted_attribute, encode_text};

const TEMPLATE: &str = include_str!("../../templates/email.html");

/// Values substituted into `templates/email.html`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailTemplateData {
    /// Link carrying the OTP token
    pub url: String,
    /// Six-digit code
    pub otp_code: String,
    /// Recipient's full name
    pub user_name: String,
    /// Human-readable purpose, e.g. "Verify Email"
    pub email_purpose: String,
    /// Sender branding
    pub company_name: String,
    /// Client application root
    pub base_url: String,
}

impl EmailTemplateData {
    /// Render the HTML body
    #[must_use]
    pub fn render(&self) -> String {
        TEMPLATE
            .replace("{{URL}}", &encode_double_quoted_attribute(&self.url))
            .replace("{{BASE_URL}}", &encode_double_quoted_attribute(&self.base_url))
            .replace("{{OTP_CODE}}", &encode_text(&self.otp_code))
            .replace("{{USER_NAME}}", &encode_text(&self.user_name))
            .replace(
                "{{EMAIL_PURPOSE_LOWER}}",
                &encode_text(&self.email_purpose.to_lowercase()),
            )
            .replace("{{EMAIL_PURPOSE}}", &encode_text(&self.email_purpose))
            .replace("{{COMPANY_NAME}}", &encode_text(&self.company_name))
    }
}
