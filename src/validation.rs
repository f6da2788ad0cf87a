// ABOUTME: Field validators and normalizers for request bodies
// ABOUTME: Names, contacts, usernames, emails and passwords are checked before storage
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

//! Input validation
//!
//! Every validator trims its input, enforces the shared length limit and
//! returns the normalized value that should be stored. Failures map to
//! `422 Unprocessable Entity` via [`AppError::validation`].

use std::sync::OnceLock;

use regex::Regex;

use crate::constants::limits::{MAX_PASSWORD_LENGTH, MAX_STRING_LENGTH, MIN_PASSWORD_LENGTH};
use crate::constants::messages::validation as messages;
use crate::errors::{AppError, AppResult};

/// Phone number shapes accepted anywhere inside a contact string
const CONTACT_PATTERNS: [&str; 6] = [
    r"\d{3}[-. ]\d{3}[-. ]\d{4}",
    r"\(\d{2,3}\)[-. ]\d{3,4}[-. ]\d{4}",
    r"\+\d{1,2}[-. ]\(\d{3}\)[-. ]\d{3}[-. ]\d{4}",
    r"\+\d{1,2}\(\d{3}\)[-. ]\d{3}[-. ]\d{4}",
    r"\+\d{1,2}[-. ]\d{3}[-. ]\d{3}[-. ]\d{4}",
    r"\+\d{1,2}\d{10}",
];

/// Punctuation that satisfies the "special character" password rule
const PASSWORD_SPECIALS: &str = "@$!%*?&#^()_+,-./";

static CONTACT_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
static USERNAME_REGEX: OnceLock<Option<Regex>> = OnceLock::new();

fn contact_regex() -> Option<&'static Regex> {
    CONTACT_REGEX
        .get_or_init(|| Regex::new(&CONTACT_PATTERNS.join("|")).ok())
        .as_ref()
}

fn username_regex() -> Option<&'static Regex> {
    USERNAME_REGEX
        .get_or_init(|| Regex::new(r"^[a-zA-Z0-9_.-]+$").ok())
        .as_ref()
}

/// Trim and enforce `1..=255` characters
///
/// # Errors
///
/// Returns a validation error if the trimmed value is empty or too long.
pub fn text(field: &str, value: &str) -> AppResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > MAX_STRING_LENGTH {
        return Err(AppError::validation(format!(
            "{field} must be at most {MAX_STRING_LENGTH} characters"
        )));
    }
    Ok(trimmed.to_owned())
}

/// [`text`] applied to an optional field
///
/// # Errors
///
/// Returns a validation error if a present value is empty or too long.
pub fn optional_text(field: &str, value: Option<String>) -> AppResult<Option<String>> {
    value.map(|v| text(field, &v)).transpose()
}

/// First and last names: letters only, stored capitalized
///
/// # Errors
///
/// Returns a validation error if the name contains anything but ASCII letters.
pub fn name(field: &str, value: &str) -> AppResult<String> {
    let trimmed = text(field, value)?;
    if !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(AppError::validation(messages::ONLY_ALPHABETS));
    }
    let lower = trimmed.to_ascii_lowercase();
    let mut chars = lower.chars();
    Ok(chars.next().map_or_else(String::new, |first| {
        first.to_ascii_uppercase().to_string() + chars.as_str()
    }))
}

/// Contact numbers must contain one recognizable phone shape
///
/// # Errors
///
/// Returns a validation error if no phone shape is found.
pub fn contact(value: &str) -> AppResult<String> {
    let trimmed = text("contact", value)?;
    match contact_regex() {
        Some(re) if re.is_match(&trimmed) => Ok(trimmed),
        Some(_) => Err(AppError::validation(messages::INVALID_CONTACT)),
        None => Err(AppError::internal("Contact pattern failed to compile")),
    }
}

/// Usernames: `[a-zA-Z0-9_.-]+`, stored lowercase
///
/// # Errors
///
/// Returns a validation error on any other character.
pub fn username(value: &str) -> AppResult<String> {
    let trimmed = text("username", value)?;
    match username_regex() {
        Some(re) if re.is_match(&trimmed) => Ok(trimmed.to_ascii_lowercase()),
        Some(_) => Err(AppError::validation(messages::INVALID_USERNAME)),
        None => Err(AppError::internal("Username pattern failed to compile")),
    }
}

/// Emails are shape-checked and stored lowercase
///
/// # Errors
///
/// Returns a validation error if the address has no local part, no domain,
/// no dot in the domain, or contains whitespace.
pub fn email(value: &str) -> AppResult<String> {
    let trimmed = text("email", value)?;
    let valid = match trimmed.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !trimmed.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if valid {
        Ok(trimmed.to_lowercase())
    } else {
        Err(AppError::validation(messages::INVALID_EMAIL))
    }
}

/// Passwords: 8-100 characters with lower, upper, digit and special
///
/// Only letters, digits and `@$!%*?&#^()_+,-./` are accepted.
///
/// # Errors
///
/// Returns a validation error if any rule is broken.
pub fn password(value: &str) -> AppResult<String> {
    let length = value.chars().count();
    if !(MIN_PASSWORD_LENGTH..=MAX_PASSWORD_LENGTH).contains(&length) {
        return Err(AppError::validation(format!(
            "password must be between {MIN_PASSWORD_LENGTH} and {MAX_PASSWORD_LENGTH} characters"
        )));
    }

    let is_special = |c: char| PASSWORD_SPECIALS.contains(c);
    let strong = value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit())
        && value.chars().any(is_special)
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || is_special(c));

    if strong {
        Ok(value.to_owned())
    } else {
        Err(AppError::validation(messages::WEAK_PASSWORD))
    }
}

/// Foreign key references must be at least 1
///
/// # Errors
///
/// Returns a validation error for zero or negative ids.
pub fn positive_id(field: &str, value: i64) -> AppResult<i64> {
    if value >= 1 {
        Ok(value)
    } else {
        Err(AppError::validation(format!(
            "{field} must be greater than or equal to 1"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_name_is_capitalized() {
        assert_eq!(name("first_name", "  jOHN ").unwrap(), "John");
    }

    #[test]
    fn test_name_rejects_digits_and_spaces() {
        let err = name("first_name", "John2").unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationFailed);
        assert_eq!(err.message, messages::ONLY_ALPHABETS);
        assert!(name("last_name", "Mary Ann").is_err());
    }

    #[test]
    fn test_contact_shapes() {
        for valid in [
            "(02) 123-4567",
            "123-456-7890",
            "+1 (555) 123-4567",
            "+1(555) 123-4567",
            "+92 300 123 4567",
            "+923001234567",
            "call me at 555.123.4567",
        ] {
            assert!(contact(valid).is_ok(), "{valid} should be accepted");
        }
        assert_eq!(
            contact("12345").unwrap_err().message,
            messages::INVALID_CONTACT
        );
    }

    #[test]
    fn test_username_is_lowercased() {
        assert_eq!(username("John.Doe_1").unwrap(), "john.doe_1");
        assert_eq!(
            username("john doe").unwrap_err().message,
            messages::INVALID_USERNAME
        );
    }

    #[test]
    fn test_email_is_lowercased() {
        assert_eq!(email("JohnDoe@Email.com").unwrap(), "johndoe@email.com");
        assert!(email("not-an-email").is_err());
        assert!(email("a@b").is_err());
        assert!(email("a b@c.com").is_err());
    }

    #[test]
    fn test_password_rules() {
        assert!(password("12345@Aa").is_ok());
        assert!(password("Passw0rd-").is_ok());
        // missing special
        assert!(password("Password1").is_err());
        // missing upper
        assert!(password("password1!").is_err());
        // disallowed character
        assert!(password("Passw0rd!~").is_err());
        // too short
        assert!(password("P@ss1").is_err());
    }

    #[test]
    fn test_text_limits() {
        assert!(text("city", "   ").is_err());
        assert!(text("city", &"x".repeat(256)).is_err());
        assert_eq!(text("city", " Lahore ").unwrap(), "Lahore");
    }

    #[test]
    fn test_positive_id() {
        assert!(positive_id("role_id", 0).is_err());
        assert_eq!(positive_id("role_id", 3).unwrap(), 3);
    }
}
