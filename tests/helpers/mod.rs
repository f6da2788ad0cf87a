// ABOUTME: Helper modules shared by the HTTP integration tests
// ABOUTME: Exports the in-process HTTP request builder used by route tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub mod axum_test;
