// ABOUTME: DatabaseProvider implementation generated for each sqlx backend
// ABOUTME: Binds the shared SQL text against the backend's pool and row types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

//! The SQL in [`super::queries`] is portable, so the only difference between
//! backends is the concrete pool and row type. `impl_database_provider!`
//! expands the whole [`DatabaseProvider`](crate::database_plugins::DatabaseProvider)
//! implementation for a backend struct that has a `pool` field and inherent
//! `connect` and `create_schema` methods.

/// Implement `DatabaseProvider` for `$database`, whose rows are `$row`
macro_rules! impl_database_provider {
    ($database:ty, $row:ty) => {
        impl $database {
            async fn fetch_page<T>(
                &self,
                sql: $crate::database_plugins::shared::ListSql,
                window: Option<$crate::pagination::PageWindow>,
            ) -> $crate::errors::AppResult<$crate::pagination::Page<T>>
            where
                T: for<'r> sqlx::FromRow<'r, $row> + Send + Unpin,
            {
                let total: i64 = sqlx::query_scalar(sql.count)
                    .fetch_one(&self.pool)
                    .await?;
                let records = match window {
                    Some(w) => {
                        sqlx::query_as::<_, T>(sql.window)
                            .bind(i64::from(w.limit))
                            .bind(w.offset())
                            .fetch_all(&self.pool)
                            .await?
                    }
                    None => sqlx::query_as::<_, T>(sql.all).fetch_all(&self.pool).await?,
                };
                Ok($crate::pagination::Page::new(window, total, records))
            }

            async fn fetch_by<T, K>(
                &self,
                sql: &'static str,
                key: K,
            ) -> $crate::errors::AppResult<Option<T>>
            where
                T: for<'r> sqlx::FromRow<'r, $row> + Send + Unpin,
                K: 'static
                    + Send
                    + for<'q> sqlx::Encode<'q, <$row as sqlx::Row>::Database>
                    + sqlx::Type<<$row as sqlx::Row>::Database>,
            {
                Ok(sqlx::query_as::<_, T>(sql)
                    .bind(key)
                    .fetch_optional(&self.pool)
                    .await?)
            }

            async fn delete_by_id(
                &self,
                sql: &'static str,
                id: i64,
            ) -> $crate::errors::AppResult<bool> {
                let result = sqlx::query(sql).bind(id).execute(&self.pool).await?;
                Ok(result.rows_affected() > 0)
            }

            async fn set_status(
                &self,
                sql: &'static str,
                user_id: i64,
                otp: Option<&str>,
                status: $crate::models::TokenStatus,
            ) -> $crate::errors::AppResult<bool> {
                let mut query = sqlx::query(sql);
                if let Some(otp) = otp {
                    query = query.bind(otp.to_owned());
                }
                let result = query
                    .bind(status.as_str())
                    .bind(chrono::Utc::now())
                    .bind(user_id)
                    .execute(&self.pool)
                    .await?;
                Ok(result.rows_affected() > 0)
            }
        }

        #[async_trait::async_trait]
        impl $crate::database_plugins::DatabaseProvider for $database {
            async fn new(database_url: &str) -> $crate::errors::AppResult<Self> {
                Self::connect(database_url, None).await
            }

            async fn migrate(&self) -> $crate::errors::AppResult<()> {
                self.create_schema().await
            }

            async fn ping(&self) -> $crate::errors::AppResult<()> {
                sqlx::query($crate::database_plugins::shared::queries::PING)
                    .execute(&self.pool)
                    .await?;
                Ok(())
            }

            // ================================
            // Roles
            // ================================

            async fn create_role(
                &self,
                role: &$crate::models::CreateRoleRequest,
            ) -> $crate::errors::AppResult<$crate::models::Role> {
                let now = chrono::Utc::now();
                Ok(sqlx::query_as($crate::database_plugins::shared::queries::roles::INSERT)
                    .bind(&role.role_name)
                    .bind(role.role_description.as_deref())
                    .bind(now)
                    .bind(now)
                    .fetch_one(&self.pool)
                    .await?)
            }

            async fn get_role(
                &self,
                role_id: i64,
            ) -> $crate::errors::AppResult<Option<$crate::models::Role>> {
                self.fetch_by($crate::database_plugins::shared::queries::roles::BY_ID, role_id)
                    .await
            }

            async fn get_role_by_name(
                &self,
                role_name: &str,
            ) -> $crate::errors::AppResult<Option<$crate::models::Role>> {
                self.fetch_by(
                    $crate::database_plugins::shared::queries::roles::BY_NAME,
                    role_name.to_owned(),
                )
                .await
            }

            async fn list_roles(
                &self,
                window: Option<$crate::pagination::PageWindow>,
            ) -> $crate::errors::AppResult<$crate::pagination::Page<$crate::models::Role>> {
                self.fetch_page($crate::database_plugins::shared::queries::roles::LIST, window)
                    .await
            }

            async fn update_role(
                &self,
                role_id: i64,
                changes: &$crate::models::RoleChanges,
            ) -> $crate::errors::AppResult<Option<$crate::models::Role>> {
                Ok(sqlx::query_as($crate::database_plugins::shared::queries::roles::UPDATE)
                    .bind(changes.role_name.as_deref())
                    .bind(changes.role_description.as_deref())
                    .bind(chrono::Utc::now())
                    .bind(role_id)
                    .fetch_optional(&self.pool)
                    .await?)
            }

            async fn delete_role(&self, role_id: i64) -> $crate::errors::AppResult<bool> {
                self.delete_by_id($crate::database_plugins::shared::queries::roles::DELETE, role_id)
                    .await
            }

            // ================================
            // Organizations
            // ================================

            async fn create_organization(
                &self,
                organization: &$crate::models::CreateOrganizationRequest,
            ) -> $crate::errors::AppResult<$crate::models::Organization> {
                let now = chrono::Utc::now();
                Ok(sqlx::query_as(
                    $crate::database_plugins::shared::queries::organizations::INSERT,
                )
                .bind(&organization.organization_name)
                .bind(organization.organization_description.as_deref())
                .bind(now)
                .bind(now)
                .fetch_one(&self.pool)
                .await?)
            }

            async fn get_organization(
                &self,
                organization_id: i64,
            ) -> $crate::errors::AppResult<Option<$crate::models::Organization>> {
                self.fetch_by(
                    $crate::database_plugins::shared::queries::organizations::BY_ID,
                    organization_id,
                )
                .await
            }

            async fn get_organization_by_name(
                &self,
                name: &str,
            ) -> $crate::errors::AppResult<Option<$crate::models::Organization>> {
                self.fetch_by(
                    $crate::database_plugins::shared::queries::organizations::BY_NAME,
                    name.to_owned(),
                )
                .await
            }

            async fn list_organizations(
                &self,
                window: Option<$crate::pagination::PageWindow>,
            ) -> $crate::errors::AppResult<
                $crate::pagination::Page<$crate::models::Organization>,
            > {
                self.fetch_page(
                    $crate::database_plugins::shared::queries::organizations::LIST,
                    window,
                )
                .await
            }

            async fn update_organization(
                &self,
                organization_id: i64,
                changes: &$crate::models::OrganizationChanges,
            ) -> $crate::errors::AppResult<Option<$crate::models::Organization>> {
                Ok(sqlx::query_as(
                    $crate::database_plugins::shared::queries::organizations::UPDATE,
                )
                .bind(changes.organization_name.as_deref())
                .bind(changes.organization_description.as_deref())
                .bind(chrono::Utc::now())
                .bind(organization_id)
                .fetch_optional(&self.pool)
                .await?)
            }

            async fn delete_organization(
                &self,
                organization_id: i64,
            ) -> $crate::errors::AppResult<bool> {
                self.delete_by_id(
                    $crate::database_plugins::shared::queries::organizations::DELETE,
                    organization_id,
                )
                .await
            }

            // ================================
            // Users
            // ================================

            async fn create_user(
                &self,
                user: &$crate::models::NewUser,
            ) -> $crate::errors::AppResult<$crate::models::User> {
                let now = chrono::Utc::now();
                Ok(sqlx::query_as($crate::database_plugins::shared::queries::users::INSERT)
                    .bind(&user.first_name)
                    .bind(&user.last_name)
                    .bind(user.contact.as_deref())
                    .bind(&user.username)
                    .bind(&user.email)
                    .bind(&user.password_hash)
                    .bind(user.address.as_deref())
                    .bind(user.city.as_deref())
                    .bind(user.state.as_deref())
                    .bind(user.country.as_deref())
                    .bind(user.postal_code.as_deref())
                    .bind(user.email_otp.as_deref())
                    .bind(user.email_verified)
                    .bind(user.is_active)
                    .bind(user.token_status.as_str())
                    .bind(user.role_id)
                    .bind(user.organization_id)
                    .bind(now)
                    .bind(now)
                    .fetch_one(&self.pool)
                    .await?)
            }

            async fn get_user(
                &self,
                user_id: i64,
            ) -> $crate::errors::AppResult<Option<$crate::models::User>> {
                self.fetch_by($crate::database_plugins::shared::queries::users::BY_ID, user_id)
                    .await
            }

            async fn get_user_by_username(
                &self,
                username: &str,
            ) -> $crate::errors::AppResult<Option<$crate::models::User>> {
                self.fetch_by(
                    $crate::database_plugins::shared::queries::users::BY_USERNAME,
                    username.to_owned(),
                )
                .await
            }

            async fn get_user_by_email(
                &self,
                email: &str,
            ) -> $crate::errors::AppResult<Option<$crate::models::User>> {
                self.fetch_by(
                    $crate::database_plugins::shared::queries::users::BY_EMAIL,
                    email.to_owned(),
                )
                .await
            }

            async fn get_user_by_login(
                &self,
                login: &str,
            ) -> $crate::errors::AppResult<Option<$crate::models::User>> {
                Ok(sqlx::query_as($crate::database_plugins::shared::queries::users::BY_LOGIN)
                    .bind(login)
                    .bind(login)
                    .fetch_optional(&self.pool)
                    .await?)
            }

            async fn list_users(
                &self,
                window: Option<$crate::pagination::PageWindow>,
            ) -> $crate::errors::AppResult<$crate::pagination::Page<$crate::models::User>> {
                self.fetch_page($crate::database_plugins::shared::queries::users::LIST, window)
                    .await
            }

            async fn update_user(
                &self,
                user_id: i64,
                changes: &$crate::models::UserChanges,
            ) -> $crate::errors::AppResult<Option<$crate::models::User>> {
                Ok(sqlx::query_as($crate::database_plugins::shared::queries::users::UPDATE)
                    .bind(changes.first_name.as_deref())
                    .bind(changes.last_name.as_deref())
                    .bind(changes.contact.as_deref())
                    .bind(changes.username.as_deref())
                    .bind(changes.email.as_deref())
                    .bind(changes.address.as_deref())
                    .bind(changes.city.as_deref())
                    .bind(changes.state.as_deref())
                    .bind(changes.country.as_deref())
                    .bind(changes.postal_code.as_deref())
                    .bind(changes.role_id)
                    .bind(changes.is_active)
                    .bind(chrono::Utc::now())
                    .bind(user_id)
                    .fetch_optional(&self.pool)
                    .await?)
            }

            async fn delete_user(&self, user_id: i64) -> $crate::errors::AppResult<bool> {
                self.delete_by_id($crate::database_plugins::shared::queries::users::DELETE, user_id)
                    .await
            }

            async fn update_password(
                &self,
                user_id: i64,
                password_hash: &str,
            ) -> $crate::errors::AppResult<bool> {
                let result =
                    sqlx::query($crate::database_plugins::shared::queries::users::SET_PASSWORD)
                        .bind(password_hash)
                        .bind(chrono::Utc::now())
                        .bind(user_id)
                        .execute(&self.pool)
                        .await?;
                Ok(result.rows_affected() > 0)
            }

            async fn set_token_status(
                &self,
                user_id: i64,
                status: $crate::models::TokenStatus,
            ) -> $crate::errors::AppResult<bool> {
                self.set_status(
                    $crate::database_plugins::shared::queries::users::SET_TOKEN_STATUS,
                    user_id,
                    None,
                    status,
                )
                .await
            }

            async fn set_email_otp(
                &self,
                user_id: i64,
                otp: &str,
            ) -> $crate::errors::AppResult<bool> {
                self.set_status(
                    $crate::database_plugins::shared::queries::users::SET_EMAIL_OTP,
                    user_id,
                    Some(otp),
                    $crate::models::TokenStatus::EmailVerify,
                )
                .await
            }

            async fn mark_email_verified(&self, user_id: i64) -> $crate::errors::AppResult<bool> {
                self.set_status(
                    $crate::database_plugins::shared::queries::users::MARK_EMAIL_VERIFIED,
                    user_id,
                    None,
                    $crate::models::TokenStatus::Login,
                )
                .await
            }

            async fn set_password_otp(
                &self,
                user_id: i64,
                otp: &str,
            ) -> $crate::errors::AppResult<bool> {
                self.set_status(
                    $crate::database_plugins::shared::queries::users::SET_PASSWORD_OTP,
                    user_id,
                    Some(otp),
                    $crate::models::TokenStatus::PasswordReset,
                )
                .await
            }

            async fn clear_password_otp(&self, user_id: i64) -> $crate::errors::AppResult<bool> {
                self.set_status(
                    $crate::database_plugins::shared::queries::users::CLEAR_PASSWORD_OTP,
                    user_id,
                    None,
                    $crate::models::TokenStatus::Login,
                )
                .await
            }

            // ================================
            // Categories
            // ================================

            async fn create_category(
                &self,
                category: &$crate::models::CreateCategoryRequest,
            ) -> $crate::errors::AppResult<$crate::models::Category> {
                let now = chrono::Utc::now();
                Ok(sqlx::query_as($crate::database_plugins::shared::queries::categories::INSERT)
                    .bind(&category.category_name)
                    .bind(category.category_description.as_deref())
                    .bind(now)
                    .bind(now)
                    .fetch_one(&self.pool)
                    .await?)
            }

            async fn get_category(
                &self,
                category_id: i64,
            ) -> $crate::errors::AppResult<Option<$crate::models::Category>> {
                self.fetch_by(
                    $crate::database_plugins::shared::queries::categories::BY_ID,
                    category_id,
                )
                .await
            }

            async fn get_category_by_name(
                &self,
                name: &str,
            ) -> $crate::errors::AppResult<Option<$crate::models::Category>> {
                self.fetch_by(
                    $crate::database_plugins::shared::queries::categories::BY_NAME,
                    name.to_owned(),
                )
                .await
            }

            async fn list_categories(
                &self,
                window: Option<$crate::pagination::PageWindow>,
            ) -> $crate::errors::AppResult<$crate::pagination::Page<$crate::models::Category>>
            {
                self.fetch_page(
                    $crate::database_plugins::shared::queries::categories::LIST,
                    window,
                )
                .await
            }

            async fn update_category(
                &self,
                category_id: i64,
                changes: &$crate::models::CategoryChanges,
            ) -> $crate::errors::AppResult<Option<$crate::models::Category>> {
                Ok(sqlx::query_as($crate::database_plugins::shared::queries::categories::UPDATE)
                    .bind(changes.category_name.as_deref())
                    .bind(changes.category_description.as_deref())
                    .bind(chrono::Utc::now())
                    .bind(category_id)
                    .fetch_optional(&self.pool)
                    .await?)
            }

            async fn delete_category(&self, category_id: i64) -> $crate::errors::AppResult<bool> {
                self.delete_by_id(
                    $crate::database_plugins::shared::queries::categories::DELETE,
                    category_id,
                )
                .await
            }

            // ================================
            // Products
            // ================================

            async fn create_product(
                &self,
                product: &$crate::models::NewProduct,
            ) -> $crate::errors::AppResult<$crate::models::Product> {
                let now = chrono::Utc::now();
                Ok(sqlx::query_as($crate::database_plugins::shared::queries::products::INSERT)
                    .bind(&product.product_name)
                    .bind(product.price)
                    .bind(product.quantity)
                    .bind(product.is_available)
                    .bind(product.low_stock_threshold)
                    .bind(product.category_id)
                    .bind(now)
                    .bind(now)
                    .fetch_one(&self.pool)
                    .await?)
            }

            async fn get_product(
                &self,
                product_id: i64,
            ) -> $crate::errors::AppResult<Option<$crate::models::Product>> {
                self.fetch_by(
                    $crate::database_plugins::shared::queries::products::BY_ID,
                    product_id,
                )
                .await
            }

            async fn get_product_by_name(
                &self,
                name: &str,
            ) -> $crate::errors::AppResult<Option<$crate::models::Product>> {
                self.fetch_by(
                    $crate::database_plugins::shared::queries::products::BY_NAME,
                    name.to_owned(),
                )
                .await
            }

            async fn list_products(
                &self,
                window: Option<$crate::pagination::PageWindow>,
            ) -> $crate::errors::AppResult<$crate::pagination::Page<$crate::models::Product>>
            {
                self.fetch_page($crate::database_plugins::shared::queries::products::LIST, window)
                    .await
            }

            async fn list_products_by_category(
                &self,
                category_id: i64,
                window: Option<$crate::pagination::PageWindow>,
            ) -> $crate::errors::AppResult<$crate::pagination::Page<$crate::models::Product>>
            {
                let total: i64 = sqlx::query_scalar(
                    $crate::database_plugins::shared::queries::products::BY_CATEGORY_COUNT,
                )
                .bind(category_id)
                .fetch_one(&self.pool)
                .await?;
                let records = match window {
                    Some(w) => {
                        sqlx::query_as(
                            $crate::database_plugins::shared::queries::products::BY_CATEGORY_WINDOW,
                        )
                        .bind(category_id)
                        .bind(i64::from(w.limit))
                        .bind(w.offset())
                        .fetch_all(&self.pool)
                        .await?
                    }
                    None => {
                        sqlx::query_as(
                            $crate::database_plugins::shared::queries::products::BY_CATEGORY_ALL,
                        )
                        .bind(category_id)
                        .fetch_all(&self.pool)
                        .await?
                    }
                };
                Ok($crate::pagination::Page::new(window, total, records))
            }

            async fn update_product(
                &self,
                product_id: i64,
                changes: &$crate::models::ProductChanges,
            ) -> $crate::errors::AppResult<Option<$crate::models::Product>> {
                Ok(sqlx::query_as($crate::database_plugins::shared::queries::products::UPDATE)
                    .bind(changes.product_name.as_deref())
                    .bind(changes.price)
                    .bind(changes.quantity)
                    .bind(changes.is_available)
                    .bind(changes.low_stock_threshold)
                    .bind(changes.category_id)
                    .bind(chrono::Utc::now())
                    .bind(product_id)
                    .fetch_optional(&self.pool)
                    .await?)
            }

            async fn delete_product(&self, product_id: i64) -> $crate::errors::AppResult<bool> {
                self.delete_by_id(
                    $crate::database_plugins::shared::queries::products::DELETE,
                    product_id,
                )
                .await
            }
        }
    };
}
