//! Job repository functions for the domain layer (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;

use crate::adapters::jobs_sea as jobs_adapter;
use crate::adapters::jobs_sea::{JobCreate, JobUpdate};
use crate::errors::domain::DomainError;
use crate::infra::db_errors::map_db_err;

/// Job domain model.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub company: String,
    pub salary: String,
    pub user_id: i64,
    pub created_at: time::OffsetDateTime,
}

pub async fn create_job<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: JobCreate,
) -> Result<Job, DomainError> {
    let job = jobs_adapter::create_job(conn, dto)
        .await
        .map_err(map_db_err)?;
    Ok(Job::from(job))
}

pub async fn find_job_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<Job>, DomainError> {
    let job = jobs_adapter::find_job_by_id(conn, id)
        .await
        .map_err(map_db_err)?;
    Ok(job.map(Job::from))
}

pub async fn list_jobs<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Job>, DomainError> {
    let jobs = jobs_adapter::list_jobs(conn).await.map_err(map_db_err)?;
    Ok(jobs.into_iter().map(Job::from).collect())
}

pub async fn list_jobs_by_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Job>, DomainError> {
    let jobs = jobs_adapter::list_jobs_by_user(conn, user_id)
        .await
        .map_err(map_db_err)?;
    Ok(jobs.into_iter().map(Job::from).collect())
}

pub async fn update_job<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: JobUpdate,
) -> Result<Option<Job>, DomainError> {
    let job = jobs_adapter::update_job(conn, id, dto)
        .await
        .map_err(map_db_err)?;
    Ok(job.map(Job::from))
}

pub async fn delete_job<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<bool, DomainError> {
    jobs_adapter::delete_job(conn, id).await.map_err(map_db_err)
}

impl From<crate::entities::jobs::Model> for Job {
    fn from(model: crate::entities::jobs::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            description: model.description,
            location: model.location,
            company: model.company,
            salary: model.salary,
            user_id: model.user_id,
            created_at: model.created_at,
        }
    }
}
