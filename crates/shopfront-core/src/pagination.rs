// ABOUTME: Page/limit pagination envelope for list endpoints
// ABOUTME: Computes offsets and page counts and wraps records with totals
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use serde::{Deserialize, Serialize};

use crate::constants::messages::core as core_messages;
use crate::errors::{AppError, AppResult};

/// Query parameters accepted by every list endpoint
///
/// Both fields must be supplied for pagination to apply; otherwise the whole
/// collection is returned as a single page.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageQuery {
    /// 1-based page number
    pub page: Option<u32>,
    /// Records per page
    pub limit: Option<u32>,
}

/// Resolved window into a collection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    /// Page number being served
    pub page: u32,
    /// Records per page
    pub limit: u32,
}

impl PageWindow {
    /// Number of rows to skip, or `None` when it does not fit a SQL `OFFSET`
    #[must_use]
    pub fn checked_offset(&self) -> Option<i64> {
        i64::from(self.page)
            .checked_sub(1)?
            .checked_mul(i64::from(self.limit))
    }

    /// Number of rows to skip, saturating at `i64::MAX`
    #[must_use]
    pub fn offset(&self) -> i64 {
        self.checked_offset().unwrap_or(i64::MAX)
    }
}

impl PageQuery {
    /// Request a specific page
    #[must_use]
    pub const fn new(page: u32, limit: u32) -> Self {
        Self {
            page: Some(page),
            limit: Some(limit),
        }
    }

    /// Request the whole collection
    #[must_use]
    pub const fn all() -> Self {
        Self {
            page: None,
            limit: None,
        }
    }

    /// Validate the query and resolve it to a window
    ///
    /// Returns `None` when the whole collection was requested.
    ///
    /// # Errors
    ///
    /// Returns an error if `page` or `limit` is zero, or if the offset they
    /// describe overflows.
    pub fn window(&self) -> AppResult<Option<PageWindow>> {
        match (self.page, self.limit) {
            (Some(0), _) | (_, Some(0)) => {
                Err(AppError::invalid_input(core_messages::INVALID_PAGINATION))
            }
            (Some(page), Some(limit)) => {
                let window = PageWindow { page, limit };
                if window.checked_offset().is_none() {
                    return Err(AppError::invalid_input(core_messages::PAGINATION_OUT_OF_RANGE));
                }
                Ok(Some(window))
            }
            _ => Ok(None),
        }
    }
}

/// Paginated response envelope
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Page<T> {
    /// Rows in the whole collection
    pub total_records: i64,
    /// Number of pages of `limit` rows
    pub total_pages: i64,
    /// Page being served
    pub page: i64,
    /// Page size; equals `total_records` for unpaginated requests
    pub limit: i64,
    /// Rows on this page
    pub records: Vec<T>,
}

impl<T> Page<T> {
    /// Build the envelope from a window and the rows it produced
    #[must_use]
    pub fn new(window: Option<PageWindow>, total_records: i64, records: Vec<T>) -> Self {
        match window {
            Some(PageWindow { page, limit }) => {
                let limit = i64::from(limit);
                Self {
                    total_records,
                    total_pages: (total_records + limit - 1) / limit,
                    page: i64::from(page),
                    limit,
                    records,
                }
            }
            None => Self {
                total_records,
                total_pages: 1,
                page: 1,
                limit: total_records,
                records,
            },
        }
    }

    /// Convert every record, keeping the totals
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            total_records: self.total_records,
            total_pages: self.total_pages,
            page: self.page,
            limit: self.limit,
            records: self.records.into_iter().map(f).collect(),
        }
    }
}
