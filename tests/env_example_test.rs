// ABOUTME: Consistency checks between README.md, .env.example and the configuration loader
// ABOUTME: Every documented variable needs a placeholder, every placeholder must be understood
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use std::sync::Mutex;

use regex::Regex;
use shopfront_api::config::{ServerConfig, SuperuserConfig};

/// Variables read by `logging::LoggingConfig::from_env` rather than the config loader
const LOGGING_VARIABLES: [&str; 2] = ["RUST_LOG", "LOG_FORMAT"];

fn read_root_file(name: &str) -> String {
    fs::read_to_string(Path::new(env!("CARGO_MANIFEST_DIR")).join(name))
        .unwrap_or_else(|e| panic!("cannot read {name}: {e}"))
}

/// Names assigned in `.env.example`, including commented-out alternatives
fn env_example_placeholders() -> BTreeSet<String> {
    let assignment = Regex::new(r"(?m)^#?\s*([A-Z][A-Z0-9_]*)=").unwrap();
    assignment
        .captures_iter(&read_root_file(".env.example"))
        .map(|c| c[1].to_owned())
        .collect()
}

/// Variable names written in backticks in the README, e.g. `DB_NAME` or `DATABASE=sqlite`
fn readme_variables() -> BTreeSet<String> {
    let code_span = Regex::new(r"`([^`\n]+)`").unwrap();
    let variable = Regex::new(r"^([A-Z][A-Z0-9_]*)(?:=.*)?$").unwrap();
    let readme = read_root_file("README.md");
    code_span
        .captures_iter(&readme)
        .filter_map(|c| variable.captures(&c[1]).map(|v| v[1].to_owned()))
        .collect()
}

/// Every key the configuration loader asks for on its richest path
fn loader_variables() -> BTreeSet<String> {
    let values: HashMap<&str, &str> = HashMap::from([
        ("DATABASE", "postgresql"),
        ("DB_USER", "postgres"),
        ("DB_PASSWORD", "password"),
        ("DB_HOST", "localhost"),
        ("DB_NAME", "shopfront"),
        ("ALGORITHM", "HS256"),
        ("EMAIL_BACKEND", "smtp"),
        ("EMAIL_HOST", "smtp.example.com"),
        ("EMAIL_FROM", "noreply@example.com"),
        ("CLIENT_BASE_URL", "http://localhost:3000"),
        ("COMPANY_NAME", "Shopfront"),
        ("SUPERUSER_FIRST_NAME", "Super"),
        ("SUPERUSER_LAST_NAME", "Admin"),
        ("SUPERUSER_USERNAME", "superadmin"),
        ("SUPERUSER_EMAIL", "superadmin@example.com"),
        ("SUPERUSER_PASSWORD", "Change@Me123"),
        ("SUPERUSER_ROLE", "super-admin"),
    ]);
    let requested = Mutex::new(BTreeSet::new());

    ServerConfig::from_lookup(|key| {
        requested.lock().unwrap().insert(key.to_owned());
        values.get(key).map(|v| (*v).to_owned())
    })
    .expect("configuration loads");

    let mut keys = requested.into_inner().unwrap();
    keys.extend(LOGGING_VARIABLES.iter().map(|k| (*k).to_owned()));
    keys
}

#[test]
fn test_readme_variables_have_placeholders() {
    let placeholders = env_example_placeholders();
    let documented = readme_variables();
    assert!(documented.len() > 40, "README table not found: {documented:?}");

    let missing: Vec<_> = documented.difference(&placeholders).collect();
    assert!(missing.is_empty(), "missing from .env.example: {missing:?}");
}

#[test]
fn test_placeholders_are_understood_by_loader() {
    let known = loader_variables();
    let unknown: Vec<_> = env_example_placeholders()
        .into_iter()
        .filter(|name| !known.contains(name))
        .collect();
    assert!(unknown.is_empty(), "not read by the loader: {unknown:?}");
}

#[test]
fn test_env_example_covers_required_groups() {
    let placeholders = env_example_placeholders();
    for name in SuperuserConfig::VARIABLES {
        assert!(placeholders.contains(name), "{name} has no placeholder");
    }
    for name in [
        "DATABASE",
        "DB_USER",
        "DB_PASSWORD",
        "DB_HOST",
        "DB_PORT",
        "DB_NAME",
        "DB_SCHEMA",
        "CORS_ALLOW_ORIGINS",
        "CORS_ALLOW_METHODS",
        "CORS_ALLOW_HEADERS",
        "ALGORITHM",
        "EMAIL_HOST",
        "EMAIL_PORT",
        "EMAIL_USERNAME",
        "EMAIL_PASSWORD",
        "EMAIL_FROM",
        "EMAIL_FROM_NAME",
        "OPENAI_API_KEY",
        "CLIENT_BASE_URL",
        "COMPANY_NAME",
    ] {
        assert!(placeholders.contains(name), "{name} has no placeholder");
    }
}

#[test]
fn test_env_example_loads_as_configuration() {
    let assignment = Regex::new(r"(?m)^([A-Z][A-Z0-9_]*)=(.*)$").unwrap();
    let contents = read_root_file(".env.example");
    let values: HashMap<String, String> = assignment
        .captures_iter(&contents)
        .map(|c| (c[1].to_owned(), c[2].trim().to_owned()))
        .collect();

    let config = ServerConfig::from_lookup(|key| values.get(key).cloned()).unwrap();
    assert_eq!(config.http_port, 8000);
    assert!(!config.database.url.is_sqlite());
    assert_eq!(config.database.schema.as_deref(), Some("public"));
    let superuser = config.superuser.expect("super-admin block is complete");
    assert_eq!(superuser.role, "super-admin");
    assert_eq!(config.client.company_name, "Shopfront");
}
