//! Account management: profile reads and writes, password changes, pictures,
//! and admin-only listing and deletion.
//!
//! Authorization checks run against the row state read inside the caller's
//! transaction, so a concurrent change cannot slip between check and write.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::adapters::users_sea::ProfileUpdate;
use crate::auth::password::{hash_password, verify_password};
use crate::domain::policy;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::repos::users;
use crate::repos::users::User;
use crate::utils::validate::{validate_email, validate_password, validate_username};

fn user_not_found() -> AppError {
    AppError::not_found("user not found")
}

pub async fn get_user(conn: &(impl ConnectionTrait + Send + Sync), id: i64) -> Result<User, AppError> {
    users::find_user_by_id(conn, id)
        .await?
        .ok_or_else(user_not_found)
}

/// Fetch a profile on behalf of an actor. Profiles carry an email address,
/// so visibility follows the mutation rule: self or admin.
pub async fn view_user(
    conn: &(impl ConnectionTrait + Send + Sync),
    actor: &CurrentUser,
    id: i64,
) -> Result<User, AppError> {
    if !policy::can_mutate(actor.id, actor.is_admin, id) {
        return Err(AppError::forbidden("cannot view another user's account"));
    }
    get_user(conn, id).await
}

/// List every account. Admin only.
pub async fn list_users(
    conn: &(impl ConnectionTrait + Send + Sync),
    actor: &CurrentUser,
) -> Result<Vec<User>, AppError> {
    if !policy::can_list_users(actor.is_admin) {
        return Err(AppError::forbidden("admin access required"));
    }
    Ok(users::list_users(conn).await?)
}

/// Rewrite a user's username and email. Allowed for the user themselves and
/// for admins.
pub async fn update_profile(
    conn: &(impl ConnectionTrait + Send + Sync),
    actor: &CurrentUser,
    target_id: i64,
    username: &str,
    email: &str,
) -> Result<User, AppError> {
    if !policy::can_mutate(actor.id, actor.is_admin, target_id) {
        return Err(AppError::forbidden("cannot modify another user's account"));
    }
    validate_username(username)?;
    validate_email(email)?;

    users::update_profile(conn, target_id, ProfileUpdate::new(username, email))
        .await?
        .ok_or_else(user_not_found)
}

/// Change a password after verifying the current one. The current-password
/// check applies to everyone, admins included.
pub async fn change_password(
    conn: &(impl ConnectionTrait + Send + Sync),
    actor: &CurrentUser,
    target_id: i64,
    current_password: &str,
    new_password: &str,
) -> Result<(), AppError> {
    if !policy::can_mutate(actor.id, actor.is_admin, target_id) {
        return Err(AppError::forbidden("cannot modify another user's account"));
    }
    validate_password(new_password)?;

    let user = get_user(conn, target_id).await?;
    if !verify_password(current_password, &user.password_hash)? {
        return Err(AppError::invalid_credentials());
    }

    let hash = hash_password(new_password)?;
    if !users::update_password_hash(conn, target_id, hash).await? {
        return Err(user_not_found());
    }
    info!(user_id = target_id, "password changed");
    Ok(())
}

/// Record a stored picture reference against a user row.
/// File persistence happens at the gateway; this only records the reference.
///
/// Returns the previously stored filename, if any, so the caller can remove
/// the superseded file once the transaction has committed.
pub async fn set_profile_picture(
    conn: &(impl ConnectionTrait + Send + Sync),
    actor: &CurrentUser,
    target_id: i64,
    stored_filename: &str,
) -> Result<Option<String>, AppError> {
    if !policy::can_mutate(actor.id, actor.is_admin, target_id) {
        return Err(AppError::forbidden("cannot modify another user's account"));
    }

    let user = get_user(conn, target_id).await?;
    if !users::update_profile_picture(conn, target_id, stored_filename.to_string()).await? {
        return Err(user_not_found());
    }

    Ok(user.profile_picture.filter(|old| old != stored_filename))
}

/// Delete an account. Admin only, and never the admin's own account, so the
/// system cannot lose its last administrator to a stray request.
///
/// Returns the stored picture filename (if any) so the caller can remove the
/// file once the transaction has committed.
pub async fn delete_user(
    conn: &(impl ConnectionTrait + Send + Sync),
    actor: &CurrentUser,
    target_id: i64,
) -> Result<Option<String>, AppError> {
    if !policy::can_delete_user(actor.id, actor.is_admin, target_id) {
        let detail = if actor.id == target_id {
            "admins cannot delete their own account"
        } else {
            "admin access required"
        };
        return Err(AppError::forbidden(detail));
    }

    let deleted = users::delete_user(conn, target_id)
        .await?
        .ok_or_else(user_not_found)?;

    info!(user_id = target_id, by = actor.id, "user deleted");
    Ok(deleted.profile_picture)
}
