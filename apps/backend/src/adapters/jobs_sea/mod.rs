//! SeaORM adapter for the job store.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ModelTrait, NotSet, QueryFilter,
    QueryOrder, Set,
};

use crate::entities::jobs;

pub mod dto;

pub use dto::{JobCreate, JobUpdate};

pub async fn create_job<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: JobCreate,
) -> Result<jobs::Model, sea_orm::DbErr> {
    let job_active = jobs::ActiveModel {
        id: NotSet,
        title: Set(dto.title),
        description: Set(dto.description),
        location: Set(dto.location),
        company: Set(dto.company),
        salary: Set(dto.salary),
        user_id: Set(dto.user_id),
        created_at: Set(time::OffsetDateTime::now_utc()),
    };

    job_active.insert(conn).await
}

pub async fn find_job_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<jobs::Model>, sea_orm::DbErr> {
    jobs::Entity::find_by_id(id).one(conn).await
}

pub async fn list_jobs<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<jobs::Model>, sea_orm::DbErr> {
    jobs::Entity::find()
        .order_by_asc(jobs::Column::Id)
        .all(conn)
        .await
}

pub async fn list_jobs_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<jobs::Model>, sea_orm::DbErr> {
    jobs::Entity::find()
        .filter(jobs::Column::UserId.eq(user_id))
        .order_by_asc(jobs::Column::Id)
        .all(conn)
        .await
}

/// Overwrite every mutable field of an existing job. Owner and creation
/// timestamp are left untouched.
pub async fn update_job<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: JobUpdate,
) -> Result<Option<jobs::Model>, sea_orm::DbErr> {
    let Some(job) = jobs::Entity::find_by_id(id).one(conn).await? else {
        return Ok(None);
    };

    let mut active: jobs::ActiveModel = job.into();
    active.title = Set(dto.title);
    active.description = Set(dto.description);
    active.location = Set(dto.location);
    active.company = Set(dto.company);
    active.salary = Set(dto.salary);

    active.update(conn).await.map(Some)
}

pub async fn delete_job<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<bool, sea_orm::DbErr> {
    let Some(job) = jobs::Entity::find_by_id(id).one(conn).await? else {
        return Ok(false);
    };

    job.delete(conn).await?;
    Ok(true)
}
