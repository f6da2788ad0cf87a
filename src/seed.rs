// ABOUTME: Start-up seeding of the role table and the super-admin account
// ABOUTME: Idempotent inserts driven by the SUPERUSER_* configuration block
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Shopfront API Contributors

//! Seeding runs after schema creation on every server start and from
//! `shopfront-admin seed`. Existing rows are left alone, so running it twice
//! is harmless.

use tracing::{error, info, warn};

use crate::auth::AuthManager;
use crate::config::SuperuserConfig;
use crate::constants::roles;
use crate::database_plugins::DatabaseProvider;
use crate::errors::AppResult;
use crate::models::{CreateRoleRequest, NewUser, Role, TokenStatus, User};
use crate::validation;

/// What a seeding pass changed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Names of roles inserted by this pass
    pub roles_created: Vec<String>,
    /// Username of the super-admin inserted by this pass
    pub superuser_created: Option<String>,
}

/// Roles every deployment carries, the configured super-admin role first
fn default_roles(superuser: Option<&SuperuserConfig>) -> Vec<CreateRoleRequest> {
    let mut wanted = Vec::with_capacity(4);
    if let Some(su) = superuser {
        wanted.push(CreateRoleRequest {
            role_name: su.role.clone(),
            role_description: su.role_description.clone(),
        });
    }
    for (name, description) in [
        (roles::ADMIN, roles::ADMIN_DESCRIPTION),
        (roles::MANAGER, roles::MANAGER_DESCRIPTION),
        (roles::USER, roles::USER_DESCRIPTION),
    ] {
        if wanted.iter().all(|r| r.role_name != name) {
            wanted.push(CreateRoleRequest {
                role_name: name.to_owned(),
                role_description: Some(description.to_owned()),
            });
        }
    }
    wanted
}

/// Insert any of the standard roles that are missing
///
/// # Errors
///
/// Returns an error if a lookup or insert fails.
pub async fn seed_roles(
    db: &impl DatabaseProvider,
    superuser: Option<&SuperuserConfig>,
) -> AppResult<Vec<Role>> {
    let mut created = Vec::new();
    for request in default_roles(superuser) {
        if db.get_role_by_name(&request.role_name).await?.is_some() {
            continue;
        }
        let role = db.create_role(&request).await?;
        info!(role = %role.role_name, id = role.id, "Seeded role");
        created.push(role);
    }
    Ok(created)
}

/// Insert the super-admin account unless its username or email is taken
///
/// The role named by `SUPERUSER_ROLE` is created when absent. Returns the new
/// user, or `None` when an account already holds the username or email.
///
/// # Errors
///
/// Returns an error if a configured value fails validation or a database
/// call fails.
pub async fn create_superuser(
    db: &impl DatabaseProvider,
    superuser: &SuperuserConfig,
    auth: &AuthManager,
) -> AppResult<Option<User>> {
    let username = validation::username(&superuser.username)?;
    let email = validation::email(&superuser.email)?;

    if db.get_user_by_username(&username).await?.is_some()
        || db.get_user_by_email(&email).await?.is_some()
    {
        return Ok(None);
    }

    let role = match db.get_role_by_name(&superuser.role).await? {
        Some(role) => role,
        None => {
            db.create_role(&CreateRoleRequest {
                role_name: superuser.role.clone(),
                role_description: superuser.role_description.clone(),
            })
            .await?
        }
    };

    let new_user = NewUser {
        first_name: validation::name("first_name", &superuser.first_name)?,
        last_name: validation::name("last_name", &superuser.last_name)?,
        contact: superuser.contact.clone(),
        username,
        email,
        password_hash: auth.hash_password(superuser.password.expose())?,
        address: superuser.address.clone(),
        city: superuser.city.clone(),
        state: superuser.state.clone(),
        country: superuser.country.clone(),
        postal_code: superuser.postal_code.clone(),
        email_otp: None,
        email_verified: true,
        is_active: true,
        token_status: TokenStatus::Logout,
        role_id: role.id,
        organization_id: None,
    };

    let user = db.create_user(&new_user).await?;
    info!(username = %user.username, role = %role.role_name, "Seeded super-admin user");
    Ok(Some(user))
}

/// Seed roles and the super-admin, logging instead of failing
///
/// A failing step is logged and skipped; start-up continues either way.
pub async fn seed_database(
    db: &impl DatabaseProvider,
    superuser: Option<&SuperuserConfig>,
    auth: &AuthManager,
) -> SeedReport {
    let mut report = SeedReport::default();

    match seed_roles(db, superuser).await {
        Ok(created) => {
            report.roles_created = created.into_iter().map(|r| r.role_name).collect();
        }
        Err(e) => error!("Failed to seed roles: {e}"),
    }

    let Some(superuser) = superuser else {
        warn!("SUPERUSER_* variables not set, skipping super-admin seeding");
        return report;
    };

    match create_superuser(db, superuser, auth).await {
        Ok(Some(user)) => report.superuser_created = Some(user.username),
        Ok(None) => info!("Super-admin account already present"),
        Err(e) => error!("Failed to seed super-admin user: {e}"),
    }

    report
}
