// ABOUTME: Re-exports the unified error types from shopfront-core
// ABOUTME: AppError, ErrorCode and the JSON error body used by every handler
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

pub use shopfront_core::errors::*;
