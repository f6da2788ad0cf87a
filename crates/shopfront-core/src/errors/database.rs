// ABOUTME: Conversion from sqlx errors into AppError with constraint classification
// ABOUTME: Unique, foreign key and not-null violations become 409 conflicts
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use sqlx::error::{DatabaseError, ErrorKind};

use super::AppError;
use crate::constants::messages::core as core_messages;

/// Strip backend noise so the client sees only the offending key
fn constraint_detail(db_error: &dyn DatabaseError) -> String {
    let message = db_error.message();
    // SQLite: "UNIQUE constraint failed: roles.role_name"
    message
        .split_once("failed: ")
        .map_or_else(|| message.to_owned(), |(_, key)| key.trim().to_owned())
}

fn classify(db_error: &dyn DatabaseError) -> AppError {
    let detail = constraint_detail(db_error);
    match db_error.kind() {
        ErrorKind::UniqueViolation => {
            AppError::constraint(format!("{}{detail}", core_messages::UNIQUE_VIOLATION))
        }
        ErrorKind::ForeignKeyViolation => {
            AppError::constraint(format!("{}{detail}", core_messages::FOREIGN_KEY_VIOLATION))
        }
        ErrorKind::NotNullViolation => {
            AppError::constraint(format!("{}{detail}", core_messages::NOT_NULL_VIOLATION))
        }
        ErrorKind::CheckViolation => AppError::constraint(core_messages::INTEGRITY_ERROR),
        _ => AppError::database(db_error.message().to_owned()),
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::Database(db_error) => classify(db_error.as_ref()).with_source(error),
            sqlx::Error::RowNotFound => AppError::not_found("Record not found"),
            _ => AppError::database(error.to_string()).with_source(error),
        }
    }
}
