// ABOUTME: Re-exports application constants from shopfront-core
// ABOUTME: Response messages, role names, token lifetimes and network defaults
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

pub use shopfront_core::constants::*;
