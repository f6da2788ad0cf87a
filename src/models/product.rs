// ABOUTME: Product model and request bodies
// ABOUTME: Products belong to a category and carry price, stock and availability
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::limits::DEFAULT_LOW_STOCK_THRESHOLD;
use crate::errors::{AppError, AppResult};
use crate::validation;

/// Row of the `products` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    /// Primary key
    pub id: i64,
    /// Unique product name
    pub product_name: String,
    /// Unit price
    pub price: f64,
    /// Units in stock
    pub quantity: i32,
    /// Whether the product can be ordered
    pub is_available: bool,
    /// Stock level under which the product counts as low on stock
    pub low_stock_threshold: i32,
    /// Owning category
    pub category_id: i64,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Stock is at or below the configured threshold
    #[must_use]
    pub const fn is_low_stock(&self) -> bool {
        self.quantity <= self.low_stock_threshold
    }
}

/// Body of `POST /v1/product/` and `PUT /v1/product/{id}/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductRequest {
    /// Unique product name
    pub product_name: String,
    /// Unit price, must be positive
    pub price: f64,
    /// Units in stock, must be positive
    pub quantity: i32,
    /// Defaults to available
    pub is_available: Option<bool>,
    /// Defaults to 50
    pub low_stock_threshold: Option<i32>,
    /// Owning category
    pub category_id: i64,
}

/// Body of `PUT /v1/product/{id}/`
pub type UpdateProductRequest = CreateProductRequest;

/// Fully resolved product ready for insertion
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Unique product name
    pub product_name: String,
    /// Unit price
    pub price: f64,
    /// Units in stock
    pub quantity: i32,
    /// Whether the product can be ordered
    pub is_available: bool,
    /// Low stock threshold
    pub low_stock_threshold: i32,
    /// Owning category
    pub category_id: i64,
}

fn positive_price(price: f64) -> AppResult<f64> {
    if price.is_finite() && price > 0.0 {
        Ok(price)
    } else {
        Err(AppError::validation("price must be greater than 0"))
    }
}

fn non_negative(field: &str, value: i32) -> AppResult<i32> {
    if value >= 0 {
        Ok(value)
    } else {
        Err(AppError::validation(format!(
            "{field} must be greater than or equal to 0"
        )))
    }
}

impl CreateProductRequest {
    /// Validate and fill defaults
    ///
    /// # Errors
    ///
    /// Returns a validation error if the name is empty, the price or
    /// quantity is not positive, the threshold is negative or the category
    /// id is below 1.
    pub fn validate(self) -> AppResult<NewProduct> {
        if self.quantity <= 0 {
            return Err(AppError::validation("quantity must be greater than 0"));
        }
        Ok(NewProduct {
            product_name: validation::text("product_name", &self.product_name)?,
            price: positive_price(self.price)?,
            quantity: self.quantity,
            is_available: self.is_available.unwrap_or(true),
            low_stock_threshold: non_negative(
                "low_stock_threshold",
                self.low_stock_threshold
                    .unwrap_or(DEFAULT_LOW_STOCK_THRESHOLD),
            )?,
            category_id: validation::positive_id("category_id", self.category_id)?,
        })
    }
}

/// Body of `PATCH /v1/product/{id}/`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatchProductRequest {
    /// New name
    pub product_name: Option<String>,
    /// New price
    pub price: Option<f64>,
    /// New stock level, zero allowed
    pub quantity: Option<i32>,
    /// New availability
    pub is_available: Option<bool>,
    /// New threshold
    pub low_stock_threshold: Option<i32>,
    /// New category
    pub category_id: Option<i64>,
}

impl PatchProductRequest {
    /// Validate present fields and convert to a change set
    ///
    /// # Errors
    ///
    /// Returns a validation error if a present field breaks its rule.
    pub fn validate(self) -> AppResult<ProductChanges> {
        Ok(ProductChanges {
            product_name: validation::optional_text("product_name", self.product_name)?,
            price: self.price.map(positive_price).transpose()?,
            quantity: self
                .quantity
                .map(|q| non_negative("quantity", q))
                .transpose()?,
            is_available: self.is_available,
            low_stock_threshold: self
                .low_stock_threshold
                .map(|t| non_negative("low_stock_threshold", t))
                .transpose()?,
            category_id: self
                .category_id
                .map(|id| validation::positive_id("category_id", id))
                .transpose()?,
        })
    }
}

/// Column updates for a product; `None` leaves the column untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    /// New name
    pub product_name: Option<String>,
    /// New price
    pub price: Option<f64>,
    /// New stock level
    pub quantity: Option<i32>,
    /// New availability
    pub is_available: Option<bool>,
    /// New threshold
    pub low_stock_threshold: Option<i32>,
    /// New category
    pub category_id: Option<i64>,
}

impl From<NewProduct> for ProductChanges {
    fn from(product: NewProduct) -> Self {
        Self {
            product_name: Some(product.product_name),
            price: Some(product.price),
            quantity: Some(product.quantity),
            is_available: Some(product.is_available),
            low_stock_threshold: Some(product.low_stock_threshold),
            category_id: Some(product.category_id),
        }
    }
}
