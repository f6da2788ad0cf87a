// ABOUTME: Query text and provider implementation shared by the SQLite and PostgreSQL backends
// ABOUTME: Portable SQL text and the provider implementation generated for each backend
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

/// Portable SQL statements using `$N` placeholders
pub mod queries;

/// `DatabaseProvider` implementation shared by every backend
#[macro_use]
pub mod provider;

/// Listing statements for one table
#[derive(Debug, Clone, Copy)]
pub struct ListSql {
    /// Every row ordered by id
    pub all: &'static str,
    /// One window of rows, binds `LIMIT` then `OFFSET`
    pub window: &'static str,
    /// Row count
    pub count: &'static str,
}
