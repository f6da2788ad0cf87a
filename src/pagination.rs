// ABOUTME: Re-exports pagination types from shopfront-core for unified type identity
// ABOUTME: Ensures PageQuery/Page are the same type across all workspace crates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

pub use shopfront_core::pagination::*;
