// ABOUTME: Client-facing response messages grouped by API area
// ABOUTME: Wording is part of the API contract and must remain stable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

/// Messages shared by every route
pub mod core {
    /// Generic 500 body
    pub const INTERNAL_SERVER_ERROR: &str = "Internal server error";
    /// Expired JWT
    pub const TOKEN_EXPIRED: &str = "Token has expired";
    /// Malformed or badly signed JWT
    pub const INVALID_TOKEN: &str = "Invalid token";
    /// Bearer token missing or not resolvable to a user
    pub const COULD_NOT_VALIDATE_CREDENTIALS: &str = "Could not validate credentials";
    /// Token belongs to a user whose session was closed
    pub const USER_LOGGED_OUT: &str = "User has been logged out";
    /// Token belongs to an inactive user
    pub const INACTIVE_USER: &str = "Inactive user";
    /// Prefix for unique constraint conflicts
    pub const UNIQUE_VIOLATION: &str = "Unique violation: ";
    /// Prefix for foreign key conflicts
    pub const FOREIGN_KEY_VIOLATION: &str = "Foreign key violation: ";
    /// Prefix for not-null conflicts
    pub const NOT_NULL_VIOLATION: &str = "Not null violation: ";
    /// Any other integrity failure
    pub const INTEGRITY_ERROR: &str = "Integrity error";
    /// Body could not be parsed or failed validation
    pub const INVALID_REQUEST_BODY: &str = "Invalid request body";
    /// `page` or `limit` of zero
    pub const INVALID_PAGINATION: &str = "Page and limit must be greater than zero";
    /// `page` and `limit` describe an offset past the end of any table
    pub const PAGINATION_OUT_OF_RANGE: &str = "Page and limit are too large";
    /// Caller is not allowed to perform the operation
    pub const PERMISSION_DENIED: &str = "You do not have permission to perform this action";
}

/// Authentication routes
pub mod auth {
    /// Registration with a taken organization name
    pub const ORGANIZATION_ALREADY_EXISTS: &str = "Organization already exists";
    /// Registration with a taken username
    pub const USERNAME_ALREADY_EXISTS: &str = "Username already exists";
    /// Registration with a taken email
    pub const EMAIL_ALREADY_EXISTS: &str = "Email already exists";
    /// Login identifier matched nothing
    pub const USER_NOT_FOUND: &str = "User not found";
    /// Login password mismatch
    pub const INCORRECT_PASSWORD: &str = "Incorrect password";
    /// Successful logout
    pub const USER_LOGGED_OUT: &str = "User logged out successfully";
}

/// User routes
pub mod user {
    /// Unknown user
    pub const USER_NOT_FOUND: &str = "User not found";
    /// Successful deletion
    pub const USER_DELETED: &str = "User deleted successfully";
    /// Successful password change
    pub const PASSWORD_CHANGED: &str = "Password changed successfully";
    /// Old password mismatch
    pub const INCORRECT_PASSWORD: &str = "Incorrect password";
    /// Successful password reset
    pub const PASSWORD_RESET: &str = "Password reset successfully";
}

/// Email verification and OTP delivery
pub mod email {
    /// OTP email accepted by the relay
    pub const EMAIL_SENT: &str = "Email sent successfully at given email address";
    /// OTP email rejected or relay unreachable
    pub const EMAIL_SENT_FAILED: &str = "Email sending failed";
    /// OTP inside the token does not match the stored one
    pub const INCORRECT_OTP_CODE: &str = "Incorrect OTP code, please request a new one";
    /// Verification requested for a verified account
    pub const USER_ALREADY_VERIFIED: &str = "User already verified";
    /// Successful verification
    pub const EMAIL_VERIFIED: &str = "Email verified successfully";
}

/// Category routes
pub mod category {
    /// Unknown category
    pub const CATEGORY_NOT_FOUND: &str = "Category not found";
    /// Successful deletion
    pub const CATEGORY_DELETED: &str = "Category deleted successfully";
}

/// Product routes
pub mod product {
    /// Unknown product
    pub const PRODUCT_NOT_FOUND: &str = "Product not found";
    /// Successful deletion
    pub const PRODUCT_DELETED: &str = "Product deleted successfully";
}

/// Role routes
pub mod role {
    /// Unknown role
    pub const ROLE_NOT_FOUND: &str = "Role not found";
}

/// Organization routes
pub mod organization {
    /// Unknown organization
    pub const ORGANIZATION_NOT_FOUND: &str = "Organization not found";
}

/// Field validation failures
pub mod validation {
    /// Name fields with non-letters
    pub const ONLY_ALPHABETS: &str = "Only alphabets are allowed";
    /// Contact that matches none of the phone shapes
    pub const INVALID_CONTACT: &str = "Contact number should be in proper format";
    /// Username with disallowed characters
    pub const INVALID_USERNAME: &str =
        "Username can only contain alphabets, numbers, underscore, dot and hyphen";
    /// Password that fails the strength rules
    pub const WEAK_PASSWORD: &str =
        "Password should contain at least one uppercase, one lowercase and one special character";
    /// Email without a valid shape
    pub const INVALID_EMAIL: &str = "Value is not a valid email address";
}
