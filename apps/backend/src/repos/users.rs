//! User repository functions for the domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::users_sea as users_adapter;
use crate::adapters::users_sea::{ProfileUpdate, UserCreate};
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

/// User domain model. The password hash never leaves the service layer;
/// handler responses are built from a separate DTO.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub is_admin: bool,
    pub profile_picture: Option<String>,
    pub created_at: time::OffsetDateTime,
    pub updated_at: time::OffsetDateTime,
}

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<User, DomainError> {
    let user = users_adapter::create_user(conn, dto)
        .await
        .map_err(map_db_err)?;
    Ok(User::from(user))
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_id(conn, id)
        .await
        .map_err(map_db_err)?;
    Ok(user.map(User::from))
}

pub async fn find_user_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::find_user_by_username(conn, username)
        .await
        .map_err(map_db_err)?;
    Ok(user.map(User::from))
}

pub async fn list_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<User>, DomainError> {
    let users = users_adapter::list_users(conn).await.map_err(map_db_err)?;
    Ok(users.into_iter().map(User::from).collect())
}

pub async fn update_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: ProfileUpdate,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::update_profile(conn, id, dto)
        .await
        .map_err(map_db_err)?;
    Ok(user.map(User::from))
}

pub async fn update_password_hash<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    password_hash: String,
) -> Result<bool, DomainError> {
    users_adapter::update_password_hash(conn, id, password_hash)
        .await
        .map_err(map_db_err)
}

pub async fn update_profile_picture<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    picture: String,
) -> Result<bool, DomainError> {
    users_adapter::update_profile_picture(conn, id, picture)
        .await
        .map_err(map_db_err)
}

/// Returns the deleted user when the row existed. The caller is responsible
/// for removing any associated picture file afterwards.
pub async fn delete_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<User>, DomainError> {
    let user = users_adapter::delete_user(conn, id)
        .await
        .map_err(map_db_err)?;
    Ok(user.map(User::from))
}

impl From<crate::entities::users::Model> for User {
    fn from(model: crate::entities::users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            password_hash: model.password_hash,
            is_admin: model.is_admin,
            profile_picture: model.profile_picture,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
