// ABOUTME: Environment-based configuration loading for every server subsystem
// ABOUTME: Reads .env via dotenvy, parses typed settings, and summarizes them without secrets
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

//! Server configuration from environment variables
//!
//! All settings come from the process environment, optionally seeded from a
//! `.env` file. [`ServerConfig::from_lookup`] accepts any key/value source so
//! tests can build configurations without touching the real environment.

use std::env;
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::Algorithm;
use rand::RngCore;
use tracing::{info, warn};

use super::database::DatabaseConfig;
use crate::constants::{network, project, tokens};
use crate::errors::{AppError, AppResult};

/// String that never shows up in `Debug` output or logs
#[derive(Clone, PartialEq, Eq)]
pub struct Secret(String);

impl Secret {
    /// Wrap a sensitive value
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Access the raw value
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl Debug for Secret {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

/// Random URL-safe secret used when no signing key is configured
#[must_use]
pub fn generate_secret() -> Secret {
    let mut bytes = [0_u8; tokens::GENERATED_SECRET_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    Secret(URL_SAFE_NO_PAD.encode(bytes))
}

/// Typed access to a key/value source of configuration
pub struct EnvReader<'a> {
    lookup: Box<dyn Fn(&str) -> Option<String> + Send + Sync + 'a>,
}

impl<'a> EnvReader<'a> {
    /// Wrap an arbitrary lookup function
    pub fn new(lookup: impl Fn(&str) -> Option<String> + Send + Sync + 'a) -> Self {
        Self {
            lookup: Box::new(lookup),
        }
    }

    /// Reader over the real process environment
    #[must_use]
    pub fn process() -> EnvReader<'static> {
        EnvReader::new(|key| env::var(key).ok())
    }

    /// Value of `key`, treating empty strings as unset
    #[must_use]
    pub fn optional(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
            .map(|v| v.trim().to_owned())
            .filter(|v| !v.is_empty())
    }

    /// Value of `key` or a `CONFIG_MISSING` error
    ///
    /// # Errors
    ///
    /// Returns an error if the variable is unset or empty.
    pub fn required(&self, key: &str) -> AppResult<String> {
        self.optional(key)
            .ok_or_else(|| AppError::config_missing(key))
    }

    /// Value of `key` or the given default
    #[must_use]
    pub fn or(&self, key: &str, default: &str) -> String {
        self.optional(key).unwrap_or_else(|| default.to_owned())
    }

    /// Parse `key`, falling back to `default` when unset
    ///
    /// # Errors
    ///
    /// Returns a `CONFIG_INVALID` error if the value does not parse.
    pub fn parse_or<T>(&self, key: &str, default: T) -> AppResult<T>
    where
        T: FromStr,
        T::Err: Display,
    {
        self.optional(key).map_or(Ok(default), |raw| {
            raw.parse()
                .map_err(|e| AppError::config_invalid(key, e))
        })
    }
}

/// Cross-origin request policy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsConfig {
    /// Allowed origins, `["*"]` for any
    pub allow_origins: Vec<String>,
    /// Allowed methods, `["*"]` for any
    pub allow_methods: Vec<String>,
    /// Allowed request headers, `["*"]` for any
    pub allow_headers: Vec<String>,
}

impl CorsConfig {
    fn from_reader(env: &EnvReader<'_>) -> Self {
        Self {
            allow_origins: parse_list(&env.or("CORS_ALLOW_ORIGINS", "*")),
            allow_methods: parse_list(&env.or("CORS_ALLOW_METHODS", "*")),
            allow_headers: parse_list(&env.or("CORS_ALLOW_HEADERS", "*")),
        }
    }
}

/// Token signing configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC algorithm shared by all three token kinds
    pub algorithm: Algorithm,
    /// Signs access tokens
    pub access_token_secret: Secret,
    /// Signs refresh tokens
    pub refresh_token_secret: Secret,
    /// Signs emailed OTP tokens
    pub otp_code_secret: Secret,
    /// Access token lifetime
    pub access_token_expire_minutes: i64,
    /// Refresh token lifetime
    pub refresh_token_expire_minutes: i64,
}

impl AuthConfig {
    fn from_reader(env: &EnvReader<'_>) -> AppResult<Self> {
        let algorithm_name = env.required("ALGORITHM")?;
        let algorithm = Algorithm::from_str(&algorithm_name)
            .map_err(|e| AppError::config_invalid("ALGORITHM", e))?;
        if !matches!(
            algorithm,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(AppError::config_invalid(
                "ALGORITHM",
                format!("{algorithm_name} is not an HMAC algorithm (use HS256, HS384 or HS512)"),
            ));
        }

        let secret = |key: &str| {
            env.optional(key).map_or_else(
                || {
                    warn!("{key} not set, using a per-process random secret");
                    generate_secret()
                },
                Secret::new,
            )
        };

        Ok(Self {
            algorithm,
            access_token_secret: secret("ACCESS_TOKEN_SECRET_KEY"),
            refresh_token_secret: secret("REFRESH_TOKEN_SECRET_KEY"),
            otp_code_secret: secret("OTP_CODE_SECRET_KEY"),
            access_token_expire_minutes: positive_minutes(
                env,
                "ACCESS_TOKEN_EXPIRE_MINUTES",
                tokens::DEFAULT_ACCESS_TOKEN_EXPIRE_MINUTES,
            )?,
            refresh_token_expire_minutes: positive_minutes(
                env,
                "REFRESH_TOKEN_EXPIRE_MINUTES",
                tokens::DEFAULT_REFRESH_TOKEN_EXPIRE_MINUTES,
            )?,
        })
    }
}

fn positive_minutes(env: &EnvReader<'_>, key: &str, default: i64) -> AppResult<i64> {
    let minutes = env.parse_or(key, default)?;
    if minutes > 0 {
        Ok(minutes)
    } else {
        Err(AppError::config_invalid(key, "must be greater than zero"))
    }
}

/// Seed data for the initial administrator
#[derive(Debug, Clone)]
pub struct SuperuserConfig {
    /// First name
    pub first_name: String,
    /// Last name
    pub last_name: String,
    /// Phone number
    pub contact: Option<String>,
    /// Username
    pub username: String,
    /// Email
    pub email: String,
    /// Plain-text password, hashed by the seeder
    pub password: Secret,
    /// Street address
    pub address: Option<String>,
    /// City
    pub city: Option<String>,
    /// State or province
    pub state: Option<String>,
    /// Country
    pub country: Option<String>,
    /// Postal code
    pub postal_code: Option<String>,
    /// Name of the super-admin role
    pub role: String,
    /// Description of the super-admin role
    pub role_description: Option<String>,
}

impl SuperuserConfig {
    /// Every `SUPERUSER_*` variable this loader understands
    pub const VARIABLES: [&'static str; 13] = [
        "SUPERUSER_FIRST_NAME",
        "SUPERUSER_LAST_NAME",
        "SUPERUSER_CONTACT",
        "SUPERUSER_USERNAME",
        "SUPERUSER_EMAIL",
        "SUPERUSER_PASSWORD",
        "SUPERUSER_ADDRESS",
        "SUPERUSER_CITY",
        "SUPERUSER_STATE",
        "SUPERUSER_COUNTRY",
        "SUPERUSER_POSTAL_CODE",
        "SUPERUSER_ROLE",
        "SUPERUSER_ROLE_DESCRIPTION",
    ];

    /// `None` when no `SUPERUSER_*` variable is set at all
    fn from_reader(env: &EnvReader<'_>) -> AppResult<Option<Self>> {
        if Self::VARIABLES.iter().all(|key| env.optional(key).is_none()) {
            return Ok(None);
        }
        Ok(Some(Self {
            first_name: env.required("SUPERUSER_FIRST_NAME")?,
            last_name: env.required("SUPERUSER_LAST_NAME")?,
            contact: env.optional("SUPERUSER_CONTACT"),
            username: env.required("SUPERUSER_USERNAME")?,
            email: env.required("SUPERUSER_EMAIL")?,
            password: Secret::new(env.required("SUPERUSER_PASSWORD")?),
            address: env.optional("SUPERUSER_ADDRESS"),
            city: env.optional("SUPERUSER_CITY"),
            state: env.optional("SUPERUSER_STATE"),
            country: env.optional("SUPERUSER_COUNTRY"),
            postal_code: env.optional("SUPERUSER_POSTAL_CODE"),
            role: env.required("SUPERUSER_ROLE")?,
            role_description: env.optional("SUPERUSER_ROLE_DESCRIPTION"),
        }))
    }
}

/// How outbound email is delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailBackend {
    /// SMTP relay with STARTTLS
    Smtp,
    /// Log messages instead of sending them
    Log,
}

/// Outbound email transport
#[derive(Debug, Clone)]
pub struct EmailConfig {
    /// Delivery mechanism (`EMAIL_BACKEND`)
    pub backend: EmailBackend,
    /// SMTP relay host
    pub host: String,
    /// SMTP submission port
    pub port: u16,
    /// SMTP login
    pub username: Option<String>,
    /// SMTP password
    pub password: Option<Secret>,
    /// Sender address
    pub from: String,
    /// Sender display name
    pub from_name: Option<String>,
}

impl EmailConfig {
    fn from_reader(env: &EnvReader<'_>) -> AppResult<Self> {
        let backend = match env.or("EMAIL_BACKEND", "smtp").to_ascii_lowercase().as_str() {
            "smtp" => EmailBackend::Smtp,
            "log" | "console" => EmailBackend::Log,
            other => {
                return Err(AppError::config_invalid(
                    "EMAIL_BACKEND",
                    format!("{other} (use smtp or log)"),
                ))
            }
        };

        let host = match backend {
            EmailBackend::Smtp => env.required("EMAIL_HOST")?,
            EmailBackend::Log => env.or("EMAIL_HOST", "localhost"),
        };
        let from = match backend {
            EmailBackend::Smtp => env.required("EMAIL_FROM")?,
            EmailBackend::Log => env.or("EMAIL_FROM", "noreply@localhost"),
        };

        Ok(Self {
            backend,
            host,
            port: env.parse_or("EMAIL_PORT", network::DEFAULT_EMAIL_PORT)?,
            username: env.optional("EMAIL_USERNAME"),
            password: env.optional("EMAIL_PASSWORD").map(Secret::new),
            from,
            from_name: env.optional("EMAIL_FROM_NAME"),
        })
    }
}

/// Credentials for the external AI service
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API key (`OPENAI_API_KEY`)
    pub api_key: Option<Secret>,
    /// Completion model (`MODEL_NAME`)
    pub model_name: String,
}

/// Client-facing links and branding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Front-end base URL used in emailed links, without trailing slash
    pub base_url: String,
    /// Company name shown in emails
    pub company_name: String,
}

/// Service metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    /// Service title
    pub title: String,
    /// Service description
    pub description: String,
    /// API version
    pub version: String,
    /// Deployment environment (`ENVIRONMENT`)
    pub environment: String,
}

/// Complete server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP port
    pub http_port: u16,
    /// Project metadata
    pub project: ProjectConfig,
    /// Database connection
    pub database: DatabaseConfig,
    /// CORS policy
    pub cors: CorsConfig,
    /// Token signing
    pub auth: AuthConfig,
    /// Super-admin seed, if configured
    pub superuser: Option<SuperuserConfig>,
    /// Email transport
    pub email: EmailConfig,
    /// External AI credentials
    pub openai: OpenAiConfig,
    /// Client links and branding
    pub client: ClientConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// A `.env` file in the working directory is loaded first if present;
    /// variables already set in the process win.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or malformed.
    pub fn from_env() -> AppResult<Self> {
        info!("Loading configuration from environment variables");

        if let Err(e) = dotenvy::dotenv() {
            warn!("No .env file found or failed to load: {}", e);
        }

        Self::from_reader(&EnvReader::process())
    }

    /// Build configuration from an arbitrary key/value source
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or malformed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String> + Send + Sync) -> AppResult<Self> {
        Self::from_reader(&EnvReader::new(lookup))
    }

    fn from_reader(env: &EnvReader<'_>) -> AppResult<Self> {
        let client = ClientConfig {
            base_url: env
                .required("CLIENT_BASE_URL")?
                .trim_end_matches('/')
                .to_owned(),
            company_name: env.required("COMPANY_NAME")?,
        };

        Ok(Self {
            host: env.or("HOST", network::DEFAULT_HOST),
            http_port: env.parse_or("HTTP_PORT", network::DEFAULT_HTTP_PORT)?,
            project: ProjectConfig {
                title: env.or("PROJECT_TITLE", project::DEFAULT_TITLE),
                description: env.or("PROJECT_DESCRIPTION", project::DEFAULT_DESCRIPTION),
                version: env.or("VERSION", project::DEFAULT_VERSION),
                environment: env.or("ENVIRONMENT", "development"),
            },
            database: DatabaseConfig::from_reader(env)?,
            cors: CorsConfig::from_reader(env),
            auth: AuthConfig::from_reader(env)?,
            superuser: SuperuserConfig::from_reader(env)?,
            email: EmailConfig::from_reader(env)?,
            openai: OpenAiConfig {
                api_key: env.optional("OPENAI_API_KEY").map(Secret::new),
                model_name: env.or("MODEL_NAME", project::DEFAULT_MODEL_NAME),
            },
            client,
        })
    }

    /// Get a summary of the configuration for logging (without secrets)
    #[must_use]
    pub fn summary(&self) -> String {
        format!(
            "{} v{} Configuration:\n\
             - Environment: {}\n\
             - Listen: {}:{}\n\
             - Database: {}{}\n\
             - CORS Origins: {}\n\
             - Token Algorithm: {:?}\n\
             - Access Token Lifetime: {} min\n\
             - Refresh Token Lifetime: {} min\n\
             - Super-admin Seed: {}\n\
             - Email: {:?} via {}:{}\n\
             - OpenAI: {}\n\
             - Client Base URL: {}",
            self.project.title,
            self.project.version,
            self.project.environment,
            self.host,
            self.http_port,
            self.database.url,
            self.database
                .schema
                .as_ref()
                .map_or_else(String::new, |s| format!(" (schema {s})")),
            self.cors.allow_origins.join(", "),
            self.auth.algorithm,
            self.auth.access_token_expire_minutes,
            self.auth.refresh_token_expire_minutes,
            self.superuser
                .as_ref()
                .map_or("Disabled", |_| "Enabled"),
            self.email.backend,
            self.email.host,
            self.email.port,
            if self.openai.api_key.is_some() {
                "Configured"
            } else {
                "Not configured"
            },
            self.client.base_url,
        )
    }
}

/// Parse comma-separated CORS lists
fn parse_list(raw: &str) -> Vec<String> {
    if raw.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        raw.split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
