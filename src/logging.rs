// ABOUTME: Tracing subscriber setup and structured event helpers for the Shopfront API
// ABOUTME: Reads RUST_LOG and LOG_FORMAT, quiets dependency noise, logs auth and email events
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

//! Structured logging built on `tracing-subscriber`
//!
//! The subscriber is a registry with one formatting layer, chosen by
//! `LOG_FORMAT`, under an [`EnvFilter`] built from `RUST_LOG` plus fixed
//! directives for chatty dependencies.

use std::io;

use anyhow::{anyhow, Result};
use tracing::{info, warn};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer, Registry};

use crate::config::EnvReader;
use crate::constants::project::SERVICE_NAME;

/// Directives appended to every filter
const NOISE_DIRECTIVES: [&str; 5] = [
    "hyper=warn",
    "lettre=warn",
    "sqlx=warn",
    "sqlx::query=warn",
    "tower_http=info",
];

/// Output format selected by `LOG_FORMAT`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// One JSON object per event, for log shippers
    Json,
    /// Multi-field human readable lines
    #[default]
    Pretty,
    /// Single-line events without targets
    Compact,
}

impl LogFormat {
    fn parse(raw: &str) -> Self {
        match raw.to_ascii_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Filter expression (`RUST_LOG`)
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Add file and line to each event; always on in production
    pub include_location: bool,
    /// Emit span open/close events
    pub include_spans: bool,
    /// Service name stamped on the start-up event
    pub service_name: String,
    /// Deployment environment
    pub environment: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::default(),
            include_location: false,
            include_spans: false,
            service_name: SERVICE_NAME.to_owned(),
            environment: "development".to_owned(),
        }
    }
}

impl LoggingConfig {
    /// Read the logging variables from the process environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_reader(&EnvReader::process())
    }

    /// Read the logging variables from any source
    #[must_use]
    pub fn from_reader(env: &EnvReader<'_>) -> Self {
        let environment = env.or("ENVIRONMENT", "development");
        let is_production = environment.eq_ignore_ascii_case("production");

        Self {
            level: env.or("RUST_LOG", "info"),
            format: env
                .optional("LOG_FORMAT")
                .map_or_else(LogFormat::default, |raw| LogFormat::parse(&raw)),
            include_location: is_production || env.optional("LOG_INCLUDE_LOCATION").is_some(),
            include_spans: env.optional("LOG_INCLUDE_SPANS").is_some(),
            service_name: env.or("SERVICE_NAME", SERVICE_NAME),
            environment,
        }
    }

    /// `RUST_LOG` plus the dependency noise directives
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        NOISE_DIRECTIVES
            .iter()
            .fold(EnvFilter::new(&self.level), |filter, directive| {
                match directive.parse() {
                    Ok(parsed) => filter.add_directive(parsed),
                    Err(e) => {
                        warn!("Ignoring invalid log directive {directive}: {e}");
                        filter
                    }
                }
            })
    }

    fn fmt_layer(&self) -> Box<dyn Layer<Registry> + Send + Sync> {
        let span_events = if self.include_spans {
            FmtSpan::NEW | FmtSpan::CLOSE
        } else {
            FmtSpan::NONE
        };
        let base = fmt::layer()
            .with_writer(io::stdout)
            .with_span_events(span_events)
            .with_file(self.include_location)
            .with_line_number(self.include_location);

        match self.format {
            LogFormat::Json => base.json().boxed(),
            LogFormat::Pretty => base.with_target(true).boxed(),
            LogFormat::Compact => base.compact().with_target(false).boxed(),
        }
    }

    /// Install the global subscriber
    ///
    /// # Errors
    ///
    /// Returns an error if a global subscriber is already installed
    pub fn init(&self) -> Result<()> {
        tracing_subscriber::registry()
            .with(self.fmt_layer())
            .with(self.env_filter())
            .try_init()
            .map_err(|e| anyhow!("Failed to install tracing subscriber: {e}"))?;

        info!(
            service.name = %self.service_name,
            service.version = env!("CARGO_PKG_VERSION"),
            environment = %self.environment,
            log.level = %self.level,
            log.format = ?self.format,
            "Logging initialized"
        );
        Ok(())
    }
}

/// Install the subscriber described by the environment
///
/// # Errors
///
/// Returns an error if logging initialization fails
pub fn init_from_env() -> Result<()> {
    LoggingConfig::from_env().init()
}

/// Structured events shared by the route handlers
pub struct AppLogger;

impl AppLogger {
    /// Login, logout, registration and password events
    pub fn log_auth_event(username: &str, event: &str, success: bool, details: Option<&str>) {
        info!(
            user.name = %username,
            auth.event = %event,
            auth.success = success,
            auth.details = details.unwrap_or(""),
            "Authentication event"
        );
    }

    /// Outbound OTP mail attempts
    pub fn log_email_event(recipient: &str, purpose: &str, success: bool) {
        if success {
            info!(email.to = %recipient, email.purpose = %purpose, "Email sent");
        } else {
            warn!(email.to = %recipient, email.purpose = %purpose, "Email delivery failed");
        }
    }

    /// Rejected credential checks
    pub fn log_security_event(event_type: &str, details: &str, username: Option<&str>) {
        warn!(
            security.event = %event_type,
            security.details = %details,
            user.name = username.unwrap_or("unknown"),
            "Security event"
        );
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&'static str, &'static str)]) -> LoggingConfig {
        let vars: HashMap<_, _> = vars.iter().copied().collect();
        LoggingConfig::from_reader(&EnvReader::new(move |key| {
            vars.get(key).map(|v| (*v).to_owned())
        }))
    }

    #[test]
    fn test_defaults_without_variables() {
        assert_eq!(config(&[]), LoggingConfig::default());
    }

    #[test]
    fn test_format_and_level_are_read() {
        let config = config(&[("RUST_LOG", "debug"), ("LOG_FORMAT", "JSON")]);
        assert_eq!(config.level, "debug");
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(LogFormat::parse("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::parse("fancy"), LogFormat::Pretty);
    }

    #[test]
    fn test_production_always_logs_location() {
        assert!(config(&[("ENVIRONMENT", "production")]).include_location);
        assert!(!config(&[("ENVIRONMENT", "staging")]).include_location);
        assert!(config(&[("LOG_INCLUDE_LOCATION", "1")]).include_location);
    }

    #[test]
    fn test_filter_keeps_level_and_quiets_dependencies() {
        let filter = config(&[("RUST_LOG", "shopfront_api=trace")])
            .env_filter()
            .to_string();
        assert!(filter.contains("shopfront_api=trace"));
        assert!(filter.contains("sqlx::query=warn"));
    }
}
