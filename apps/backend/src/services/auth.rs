//! Registration, login, and password-recovery flows.

use std::time::SystemTime;

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::adapters::users_sea::UserCreate;
use crate::auth::jwt::mint_access_token;
use crate::auth::password::{
    generate_password, hash_password, verify_password, GENERATED_PASSWORD_LEN,
};
use crate::error::AppError;
use crate::repos::users;
use crate::repos::users::User;
use crate::state::security_config::SecurityConfig;
use crate::utils::validate::{validate_email, validate_password, validate_username};

/// Create a new account. Uniqueness of username and email is enforced by the
/// store inside the caller's transaction; a duplicate surfaces as a conflict.
pub async fn register(
    conn: &(impl ConnectionTrait + Send + Sync),
    username: &str,
    email: &str,
    password: &str,
) -> Result<User, AppError> {
    validate_username(username)?;
    validate_email(email)?;
    validate_password(password)?;

    let password_hash = hash_password(password)?;
    let user = users::create_user(conn, UserCreate::new(username, email, password_hash)).await?;

    info!(user_id = user.id, "user registered");
    Ok(user)
}

/// Verify credentials and mint an access token.
///
/// Unknown username and wrong password both collapse into the same error so
/// a caller cannot probe which usernames exist.
pub async fn login(
    conn: &(impl ConnectionTrait + Send + Sync),
    security: &SecurityConfig,
    username: &str,
    password: &str,
) -> Result<(String, User), AppError> {
    let user = users::find_user_by_username(conn, username)
        .await?
        .ok_or_else(AppError::invalid_credentials)?;

    if !verify_password(password, &user.password_hash)? {
        return Err(AppError::invalid_credentials());
    }

    let token = mint_access_token(
        &user.username,
        user.id,
        user.is_admin,
        SystemTime::now(),
        security,
    )?;
    Ok((token, user))
}

/// Replace a forgotten password with a freshly generated one and return the
/// plaintext so the caller can hand it to the user exactly once.
pub async fn forgot_password(
    conn: &(impl ConnectionTrait + Send + Sync),
    username: &str,
) -> Result<String, AppError> {
    let user = users::find_user_by_username(conn, username)
        .await?
        .ok_or_else(|| AppError::not_found("user not found"))?;

    let new_password = generate_password(GENERATED_PASSWORD_LEN);
    let password_hash = hash_password(&new_password)?;
    users::update_password_hash(conn, user.id, password_hash).await?;

    info!(user_id = user.id, "password reset issued");
    Ok(new_password)
}
