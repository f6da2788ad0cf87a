// ABOUTME: Database abstraction layer for the storefront API
// ABOUTME: DatabaseProvider trait covering roles, organizations, users, categories and products
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

use async_trait::async_trait;

use crate::errors::AppResult;
use crate::models::{
    Category, CategoryChanges, CreateCategoryRequest, CreateOrganizationRequest,
    CreateRoleRequest, NewProduct, NewUser, Organization, OrganizationChanges, Product,
    ProductChanges, Role, RoleChanges, TokenStatus, User, UserChanges,
};
use crate::pagination::{Page, PageWindow};

/// Backend selection and delegation
pub mod factory;
/// SQL shared by every backend
#[macro_use]
pub mod shared;
/// `SQLite` backend
pub mod sqlite;

/// `PostgreSQL` backend
#[cfg(feature = "postgresql")]
pub mod postgres;

/// Core database abstraction trait
///
/// All database implementations must implement this trait to provide
/// a consistent interface for the application layer. Lookups return
/// `Ok(None)` for missing rows, updates return `Ok(None)` when no row
/// matched and deletes return `Ok(false)`.
#[async_trait]
pub trait DatabaseProvider: Send + Sync + Clone {
    /// Connect and create the schema
    async fn new(database_url: &str) -> AppResult<Self>
    where
        Self: Sized;

    /// Create every table if it does not exist yet
    async fn migrate(&self) -> AppResult<()>;

    /// Round-trip a trivial query
    async fn ping(&self) -> AppResult<()>;

    // ================================
    // Roles
    // ================================

    /// Insert a role
    async fn create_role(&self, role: &CreateRoleRequest) -> AppResult<Role>;

    /// Role by id
    async fn get_role(&self, role_id: i64) -> AppResult<Option<Role>>;

    /// Role by unique name
    async fn get_role_by_name(&self, role_name: &str) -> AppResult<Option<Role>>;

    /// Roles ordered by id
    async fn list_roles(&self, window: Option<PageWindow>) -> AppResult<Page<Role>>;

    /// Apply a change set to a role
    async fn update_role(&self, role_id: i64, changes: &RoleChanges) -> AppResult<Option<Role>>;

    /// Delete a role and, by cascade, its users
    async fn delete_role(&self, role_id: i64) -> AppResult<bool>;

    // ================================
    // Organizations
    // ================================

    /// Insert an organization
    async fn create_organization(
        &self,
        organization: &CreateOrganizationRequest,
    ) -> AppResult<Organization>;

    /// Organization by id
    async fn get_organization(&self, organization_id: i64) -> AppResult<Option<Organization>>;

    /// Organization by unique name
    async fn get_organization_by_name(&self, name: &str) -> AppResult<Option<Organization>>;

    /// Organizations ordered by id
    async fn list_organizations(
        &self,
        window: Option<PageWindow>,
    ) -> AppResult<Page<Organization>>;

    /// Apply a change set to an organization
    async fn update_organization(
        &self,
        organization_id: i64,
        changes: &OrganizationChanges,
    ) -> AppResult<Option<Organization>>;

    /// Delete an organization and, by cascade, its users
    async fn delete_organization(&self, organization_id: i64) -> AppResult<bool>;

    // ================================
    // Users
    // ================================

    /// Insert a user
    async fn create_user(&self, user: &NewUser) -> AppResult<User>;

    /// User by id
    async fn get_user(&self, user_id: i64) -> AppResult<Option<User>>;

    /// User by unique username
    async fn get_user_by_username(&self, username: &str) -> AppResult<Option<User>>;

    /// User by unique email
    async fn get_user_by_email(&self, email: &str) -> AppResult<Option<User>>;

    /// User whose username or email equals `login`
    async fn get_user_by_login(&self, login: &str) -> AppResult<Option<User>>;

    /// Users ordered by id
    async fn list_users(&self, window: Option<PageWindow>) -> AppResult<Page<User>>;

    /// Apply a change set to a user
    async fn update_user(&self, user_id: i64, changes: &UserChanges) -> AppResult<Option<User>>;

    /// Delete a user
    async fn delete_user(&self, user_id: i64) -> AppResult<bool>;

    /// Replace the stored password hash
    async fn update_password(&self, user_id: i64, password_hash: &str) -> AppResult<bool>;

    /// Record the session state
    async fn set_token_status(&self, user_id: i64, status: TokenStatus) -> AppResult<bool>;

    /// Store an email verification code and mark the user as verifying
    async fn set_email_otp(&self, user_id: i64, otp: &str) -> AppResult<bool>;

    /// Clear the verification code and activate the account
    async fn mark_email_verified(&self, user_id: i64) -> AppResult<bool>;

    /// Store a password reset code and mark the user as resetting
    async fn set_password_otp(&self, user_id: i64, otp: &str) -> AppResult<bool>;

    /// Clear the password reset code and mark the user as logged in
    async fn clear_password_otp(&self, user_id: i64) -> AppResult<bool>;

    // ================================
    // Categories
    // ================================

    /// Insert a category
    async fn create_category(&self, category: &CreateCategoryRequest) -> AppResult<Category>;

    /// Category by id
    async fn get_category(&self, category_id: i64) -> AppResult<Option<Category>>;

    /// Category by unique name
    async fn get_category_by_name(&self, name: &str) -> AppResult<Option<Category>>;

    /// Categories ordered by id
    async fn list_categories(&self, window: Option<PageWindow>) -> AppResult<Page<Category>>;

    /// Apply a change set to a category
    async fn update_category(
        &self,
        category_id: i64,
        changes: &CategoryChanges,
    ) -> AppResult<Option<Category>>;

    /// Delete a category and, by cascade, its products
    async fn delete_category(&self, category_id: i64) -> AppResult<bool>;

    // ================================
    // Products
    // ================================

    /// Insert a product
    async fn create_product(&self, product: &NewProduct) -> AppResult<Product>;

    /// Product by id
    async fn get_product(&self, product_id: i64) -> AppResult<Option<Product>>;

    /// Product by unique name
    async fn get_product_by_name(&self, name: &str) -> AppResult<Option<Product>>;

    /// Products ordered by id
    async fn list_products(&self, window: Option<PageWindow>) -> AppResult<Page<Product>>;

    /// Products of one category ordered by id
    async fn list_products_by_category(
        &self,
        category_id: i64,
        window: Option<PageWindow>,
    ) -> AppResult<Page<Product>>;

    /// Apply a change set to a product
    async fn update_product(
        &self,
        product_id: i64,
        changes: &ProductChanges,
    ) -> AppResult<Option<Product>>;

    /// Delete a product
    async fn delete_product(&self, product_id: i64) -> AppResult<bool>;
}
