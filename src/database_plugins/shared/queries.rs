// ABOUTME: SQL statements shared by the SQLite and PostgreSQL backends
// ABOUTME: Written in the common subset both engines accept, with RETURNING for writes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

//! Every `UPDATE` wraps its parameters in `COALESCE` so an unbound (`NULL`)
//! value leaves the column untouched. The last two parameters are always
//! `updated_at` and the row id.

use super::ListSql;

/// Connectivity probe
pub const PING: &str = "SELECT 1";

/// `roles` table
pub mod roles {
    use super::ListSql;

    /// Binds name, description, `created_at`, `updated_at`
    pub const INSERT: &str = "INSERT INTO roles (role_name, role_description, created_at, updated_at) \
         VALUES ($1, $2, $3, $4) RETURNING *";
    /// Binds id
    pub const BY_ID: &str = "SELECT * FROM roles WHERE id = $1";
    /// Binds name
    pub const BY_NAME: &str = "SELECT * FROM roles WHERE role_name = $1";
    /// Listing
    pub const LIST: ListSql = ListSql {
        all: "SELECT * FROM roles ORDER BY id",
        window: "SELECT * FROM roles ORDER BY id LIMIT $1 OFFSET $2",
        count: "SELECT COUNT(*) FROM roles",
    };
    /// Binds name, description, `updated_at`, id
    pub const UPDATE: &str = "UPDATE roles SET role_name = COALESCE($1, role_name), \
         role_description = COALESCE($2, role_description), updated_at = $3 \
         WHERE id = $4 RETURNING *";
    /// Binds id
    pub const DELETE: &str = "DELETE FROM roles WHERE id = $1";
}

/// `organizations` table
pub mod organizations {
    use super::ListSql;

    /// Binds name, description, `created_at`, `updated_at`
    pub const INSERT: &str = "INSERT INTO organizations \
         (organization_name, organization_description, created_at, updated_at) \
         VALUES ($1, $2, $3, $4) RETURNING *";
    /// Binds id
    pub const BY_ID: &str = "SELECT * FROM organizations WHERE id = $1";
    /// Binds name
    pub const BY_NAME: &str = "SELECT * FROM organizations WHERE organization_name = $1";
    /// Listing
    pub const LIST: ListSql = ListSql {
        all: "SELECT * FROM organizations ORDER BY id",
        window: "SELECT * FROM organizations ORDER BY id LIMIT $1 OFFSET $2",
        count: "SELECT COUNT(*) FROM organizations",
    };
    /// Binds name, description, `updated_at`, id
    pub const UPDATE: &str = "UPDATE organizations \
         SET organization_name = COALESCE($1, organization_name), \
         organization_description = COALESCE($2, organization_description), updated_at = $3 \
         WHERE id = $4 RETURNING *";
    /// Binds id
    pub const DELETE: &str = "DELETE FROM organizations WHERE id = $1";
}

/// `users` table
pub mod users {
    use super::ListSql;

    /// Binds every column of `NewUser` in declaration order, then
    /// `created_at` and `updated_at`
    pub const INSERT: &str = "INSERT INTO users (first_name, last_name, contact, username, email, \
         password_hash, address, city, state, country, postal_code, email_otp, email_verified, \
         is_active, token_status, role_id, organization_id, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19) \
         RETURNING *";
    /// Binds id
    pub const BY_ID: &str = "SELECT * FROM users WHERE id = $1";
    /// Binds username
    pub const BY_USERNAME: &str = "SELECT * FROM users WHERE username = $1";
    /// Binds email
    pub const BY_EMAIL: &str = "SELECT * FROM users WHERE email = $1";
    /// Binds the login twice (username, email)
    pub const BY_LOGIN: &str = "SELECT * FROM users WHERE username = $1 OR email = $2 ORDER BY id LIMIT 1";
    /// Listing
    pub const LIST: ListSql = ListSql {
        all: "SELECT * FROM users ORDER BY id",
        window: "SELECT * FROM users ORDER BY id LIMIT $1 OFFSET $2",
        count: "SELECT COUNT(*) FROM users",
    };
    /// Binds the twelve `UserChanges` fields in declaration order, then
    /// `updated_at` and id
    pub const UPDATE: &str = "UPDATE users SET first_name = COALESCE($1, first_name), \
         last_name = COALESCE($2, last_name), contact = COALESCE($3, contact), \
         username = COALESCE($4, username), email = COALESCE($5, email), \
         address = COALESCE($6, address), city = COALESCE($7, city), \
         state = COALESCE($8, state), country = COALESCE($9, country), \
         postal_code = COALESCE($10, postal_code), role_id = COALESCE($11, role_id), \
         is_active = COALESCE($12, is_active), updated_at = $13 \
         WHERE id = $14 RETURNING *";
    /// Binds id
    pub const DELETE: &str = "DELETE FROM users WHERE id = $1";
    /// Binds hash, `updated_at`, id
    pub const SET_PASSWORD: &str =
        "UPDATE users SET password_hash = $1, updated_at = $2 WHERE id = $3";
    /// Binds status, `updated_at`, id
    pub const SET_TOKEN_STATUS: &str =
        "UPDATE users SET token_status = $1, updated_at = $2 WHERE id = $3";
    /// Binds otp, status, `updated_at`, id
    pub const SET_EMAIL_OTP: &str =
        "UPDATE users SET email_otp = $1, token_status = $2, updated_at = $3 WHERE id = $4";
    /// Binds status, `updated_at`, id
    pub const MARK_EMAIL_VERIFIED: &str = "UPDATE users SET email_otp = NULL, email_verified = TRUE, \
         is_active = TRUE, token_status = $1, updated_at = $2 WHERE id = $3";
    /// Binds otp, status, `updated_at`, id
    pub const SET_PASSWORD_OTP: &str =
        "UPDATE users SET password_otp = $1, token_status = $2, updated_at = $3 WHERE id = $4";
    /// Binds status, `updated_at`, id
    pub const CLEAR_PASSWORD_OTP: &str =
        "UPDATE users SET password_otp = NULL, token_status = $1, updated_at = $2 WHERE id = $3";
}

/// `categories` table
pub mod categories {
    use super::ListSql;

    /// Binds name, description, `created_at`, `updated_at`
    pub const INSERT: &str = "INSERT INTO categories \
         (category_name, category_description, created_at, updated_at) \
         VALUES ($1, $2, $3, $4) RETURNING *";
    /// Binds id
    pub const BY_ID: &str = "SELECT * FROM categories WHERE id = $1";
    /// Binds name
    pub const BY_NAME: &str = "SELECT * FROM categories WHERE category_name = $1";
    /// Listing
    pub const LIST: ListSql = ListSql {
        all: "SELECT * FROM categories ORDER BY id",
        window: "SELECT * FROM categories ORDER BY id LIMIT $1 OFFSET $2",
        count: "SELECT COUNT(*) FROM categories",
    };
    /// Binds name, description, `updated_at`, id
    pub const UPDATE: &str = "UPDATE categories \
         SET category_name = COALESCE($1, category_name), \
         category_description = COALESCE($2, category_description), updated_at = $3 \
         WHERE id = $4 RETURNING *";
    /// Binds id
    pub const DELETE: &str = "DELETE FROM categories WHERE id = $1";
}

/// `products` table
pub mod products {
    use super::ListSql;

    /// Binds every `NewProduct` field in declaration order, then
    /// `created_at` and `updated_at`
    pub const INSERT: &str = "INSERT INTO products (product_name, price, quantity, is_available, \
         low_stock_threshold, category_id, created_at, updated_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *";
    /// Binds id
    pub const BY_ID: &str = "SELECT * FROM products WHERE id = $1";
    /// Binds name
    pub const BY_NAME: &str = "SELECT * FROM products WHERE product_name = $1";
    /// Listing
    pub const LIST: ListSql = ListSql {
        all: "SELECT * FROM products ORDER BY id",
        window: "SELECT * FROM products ORDER BY id LIMIT $1 OFFSET $2",
        count: "SELECT COUNT(*) FROM products",
    };
    /// Binds category id
    pub const BY_CATEGORY_ALL: &str = "SELECT * FROM products WHERE category_id = $1 ORDER BY id";
    /// Binds category id, `LIMIT`, `OFFSET`
    pub const BY_CATEGORY_WINDOW: &str =
        "SELECT * FROM products WHERE category_id = $1 ORDER BY id LIMIT $2 OFFSET $3";
    /// Binds category id
    pub const BY_CATEGORY_COUNT: &str = "SELECT COUNT(*) FROM products WHERE category_id = $1";
    /// Binds the six `ProductChanges` fields in declaration order, then
    /// `updated_at` and id
    pub const UPDATE: &str = "UPDATE products SET product_name = COALESCE($1, product_name), \
         price = COALESCE($2, price), quantity = COALESCE($3, quantity), \
         is_available = COALESCE($4, is_available), \
         low_stock_threshold = COALESCE($5, low_stock_threshold), \
         category_id = COALESCE($6, category_id), updated_at = $7 \
         WHERE id = $8 RETURNING *";
    /// Binds id
    pub const DELETE: &str = "DELETE FROM products WHERE id = $1";
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placeholders(sql: &str) -> usize {
        (1..=32).filter(|n| sql.contains(&format!("${n}"))).count()
    }

    #[test]
    fn test_update_statements_end_with_timestamp_and_id() {
        for (sql, fields) in [
            (roles::UPDATE, 2),
            (organizations::UPDATE, 2),
            (users::UPDATE, 12),
            (categories::UPDATE, 2),
            (products::UPDATE, 6),
        ] {
            assert_eq!(placeholders(sql), fields + 2, "{sql}");
            assert!(sql.contains(&format!("updated_at = ${}", fields + 1)));
            assert!(sql.contains(&format!("WHERE id = ${}", fields + 2)));
        }
    }

    #[test]
    fn test_insert_placeholder_counts() {
        assert_eq!(placeholders(users::INSERT), 19);
        assert_eq!(placeholders(products::INSERT), 8);
        assert_eq!(placeholders(roles::INSERT), 4);
        assert_eq!(placeholders(PING), 0);
    }
}
