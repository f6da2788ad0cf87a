// ABOUTME: Database URL parsing and DATABASE/DB_* composition for SQLite and PostgreSQL
// ABOUTME: Composes the connection URL from the DATABASE and DB_* variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::environment::{EnvReader, Secret};
use crate::constants::network::DEFAULT_DB_PORT;
use crate::errors::{AppError, AppResult};

/// Type-safe database location
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to `SQLite` database file
        path: PathBuf,
    },
    /// `PostgreSQL` connection
    PostgreSQL {
        /// `PostgreSQL` connection string
        connection_string: String,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse from string with validation
    ///
    /// # Errors
    ///
    /// Returns an error if the scheme is neither `sqlite:` nor `postgres(ql)://`
    pub fn parse_url(s: &str) -> AppResult<Self> {
        if let Some(path_str) = s.strip_prefix("sqlite:") {
            let path_str = path_str.trim_start_matches("//");
            if path_str == ":memory:" {
                Ok(Self::Memory)
            } else {
                Ok(Self::SQLite {
                    path: PathBuf::from(path_str),
                })
            }
        } else if s.starts_with("postgresql://") || s.starts_with("postgres://") {
            Ok(Self::PostgreSQL {
                connection_string: s.to_owned(),
            })
        } else {
            Err(AppError::config_invalid(
                "DATABASE_URL",
                format!("unsupported scheme in {s}"),
            ))
        }
    }

    /// Convert to connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::PostgreSQL { connection_string } => connection_string.clone(),
            Self::Memory => "sqlite::memory:".into(),
        }
    }

    /// Check if this is a `SQLite` database
    #[must_use]
    pub const fn is_sqlite(&self) -> bool {
        matches!(self, Self::SQLite { .. } | Self::Memory)
    }

    /// Connection string with the password masked, for logs
    #[must_use]
    pub fn redacted(&self) -> String {
        match self {
            Self::PostgreSQL { connection_string } => {
                match (connection_string.find("://"), connection_string.rfind('@')) {
                    (Some(scheme_end), Some(at)) if at > scheme_end => {
                        let credentials = &connection_string[scheme_end + 3..at];
                        let user = credentials.split(':').next().unwrap_or_default();
                        format!(
                            "{}{user}:***{}",
                            &connection_string[..scheme_end + 3],
                            &connection_string[at..]
                        )
                    }
                    _ => connection_string.clone(),
                }
            }
            other => other.to_connection_string(),
        }
    }
}

impl Display for DatabaseUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.redacted())
    }
}

/// Database connection settings
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Resolved connection target
    pub url: DatabaseUrl,
    /// `PostgreSQL` schema holding the tables (`DB_SCHEMA`)
    pub schema: Option<String>,
}

impl DatabaseConfig {
    /// Build from `DATABASE_URL`, or compose it from `DATABASE` and `DB_*`
    ///
    /// The composed form is `DATABASE://DB_USER:DB_PASSWORD@DB_HOST:DB_PORT/DB_NAME`.
    /// For `DATABASE=sqlite` only `DB_NAME` is used and names the database file.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or malformed.
    pub fn from_reader(env: &EnvReader<'_>) -> AppResult<Self> {
        let schema = env.optional("DB_SCHEMA");

        if let Some(url) = env.optional("DATABASE_URL") {
            return Ok(Self {
                url: DatabaseUrl::parse_url(&url)?,
                schema,
            });
        }

        let backend = env.required("DATABASE")?.to_ascii_lowercase();
        let url = match backend.as_str() {
            "sqlite" | "sqlite3" => {
                let name = env.required("DB_NAME")?;
                if name == ":memory:" {
                    DatabaseUrl::Memory
                } else {
                    DatabaseUrl::SQLite {
                        path: PathBuf::from(name),
                    }
                }
            }
            "postgresql" | "postgres" | "postgresql+asyncpg" => {
                let user = env.required("DB_USER")?;
                let password = Secret::new(env.required("DB_PASSWORD")?);
                let host = env.required("DB_HOST")?;
                let port: u16 = env.parse_or("DB_PORT", DEFAULT_DB_PORT)?;
                let name = env.required("DB_NAME")?;
                DatabaseUrl::PostgreSQL {
                    connection_string: format!(
                        "postgresql://{}:{}@{host}:{port}/{name}",
                        urlencoding::encode(&user),
                        urlencoding::encode(password.expose()),
                    ),
                }
            }
            other => {
                return Err(AppError::config_invalid(
                    "DATABASE",
                    format!("unsupported backend {other}"),
                ))
            }
        };

        Ok(Self { url, schema })
    }
}
