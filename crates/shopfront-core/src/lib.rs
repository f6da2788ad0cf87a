// ABOUTME: Core types and constants for the Shopfront e-commerce API
// ABOUTME: Foundation crate with error handling, pagination, and response messages
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

#![deny(unsafe_code)]

//! # Shopfront Core
//!
//! Foundation crate providing shared types and constants for the Shopfront API.
//! This crate is designed to change infrequently, enabling incremental
//! compilation benefits in the workspace.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError` and `ErrorCode`
//! - **constants**: Response messages, role names and defaults
//! - **pagination**: Page/limit pagination envelope shared by all list endpoints

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Page/limit pagination for list endpoints
pub mod pagination;
