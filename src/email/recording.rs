// ABOUTME: In-memory email sender that logs and stores every message
// ABOUTME: Backs EMAIL_BACKEND=log deployments and integration tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use super::{EmailMessage, EmailSender};
use crate::errors::AppResult;

/// Keeps delivered messages in memory
#[derive(Debug, Default)]
pub struct RecordingEmailSender {
    sent: Mutex<Vec<EmailMessage>>,
}

impl RecordingEmailSender {
    /// Empty outbox
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every message sent so far, oldest first
    pub async fn messages(&self) -> Vec<EmailMessage> {
        self.sent.lock().await.clone()
    }

    /// Most recent message addressed to `recipient`
    pub async fn last_message_to(&self, recipient: &str) -> Option<EmailMessage> {
        self.sent
            .lock()
            .await
            .iter()
            .rev()
            .find(|m| m.to == recipient)
            .cloned()
    }
}

#[async_trait]
impl EmailSender for RecordingEmailSender {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, message: &EmailMessage) -> AppResult<()> {
        info!(to = %message.to, subject = %message.subject, "Email recorded (log backend)");
        self.sent.lock().await.push(message.clone());
        Ok(())
    }
}
