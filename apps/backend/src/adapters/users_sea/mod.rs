//! SeaORM adapter for the user store.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::users;

pub mod dto;

pub use dto::{ProfileUpdate, UserCreate};

// Adapter functions return DbErr; the repos layer maps to DomainError.

pub async fn create_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<users::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let user_active = users::ActiveModel {
        id: NotSet,
        username: Set(dto.username),
        email: Set(dto.email),
        password_hash: Set(dto.password_hash),
        is_admin: Set(dto.is_admin),
        profile_picture: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    };

    user_active.insert(conn).await
}

pub async fn find_user_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find_by_id(id).one(conn).await
}

pub async fn find_user_by_username<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    username: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Username.eq(username))
        .one(conn)
        .await
}

pub async fn list_users<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .order_by_asc(users::Column::Id)
        .all(conn)
        .await
}

pub async fn update_profile<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: ProfileUpdate,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    let Some(user) = users::Entity::find_by_id(id).one(conn).await? else {
        return Ok(None);
    };

    let mut active: users::ActiveModel = user.into();
    active.username = Set(dto.username);
    active.email = Set(dto.email);
    active.updated_at = Set(time::OffsetDateTime::now_utc());

    active.update(conn).await.map(Some)
}

pub async fn update_password_hash<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    password_hash: String,
) -> Result<bool, sea_orm::DbErr> {
    let Some(user) = users::Entity::find_by_id(id).one(conn).await? else {
        return Ok(false);
    };

    let mut active: users::ActiveModel = user.into();
    active.password_hash = Set(password_hash);
    active.updated_at = Set(time::OffsetDateTime::now_utc());
    active.update(conn).await?;
    Ok(true)
}

pub async fn update_profile_picture<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    picture: String,
) -> Result<bool, sea_orm::DbErr> {
    let Some(user) = users::Entity::find_by_id(id).one(conn).await? else {
        return Ok(false);
    };

    let mut active: users::ActiveModel = user.into();
    active.profile_picture = Set(Some(picture));
    active.updated_at = Set(time::OffsetDateTime::now_utc());
    active.update(conn).await?;
    Ok(true)
}

/// Delete a user row, returning the deleted model so the caller can clean up
/// the profile-picture file after the transaction commits.
pub async fn delete_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    let Some(user) = users::Entity::find_by_id(id).one(conn).await? else {
        return Ok(None);
    };

    user.clone().delete(conn).await?;
    Ok(Some(user))
}
