//! Job listings: creation, queries, and owner-scoped mutation.
//!
//! Ownership checks read the current row inside the caller's transaction and
//! the mutation happens in the same transaction granting atomicity.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::adapters::jobs_sea::{JobCreate, JobUpdate};
use crate::domain::policy;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::repos::jobs;
use crate::repos::jobs::Job;
use crate::utils::validate::validate_job_fields;

fn job_not_found() -> AppError {
    AppError::not_found("job not found")
}

/// Payload for creating or rewriting a job. The owner never appears here; it
/// is taken from the authenticated actor (create) or left untouched (update).
#[derive(Debug, Clone)]
pub struct JobFields {
    pub title: String,
    pub description: String,
    pub location: String,
    pub company: String,
    pub salary: String,
}

impl JobFields {
    fn validate(&self) -> Result<(), AppError> {
        validate_job_fields(
            &self.title,
            &self.description,
            &self.location,
            &self.company,
            &self.salary,
        )
    }
}

pub async fn create_job(
    conn: &(impl ConnectionTrait + Send + Sync),
    actor: &CurrentUser,
    fields: JobFields,
) -> Result<Job, AppError> {
    fields.validate()?;

    let job = jobs::create_job(
        conn,
        JobCreate {
            title: fields.title,
            description: fields.description,
            location: fields.location,
            company: fields.company,
            salary: fields.salary,
            user_id: actor.id,
        },
    )
    .await?;

    info!(job_id = job.id, user_id = actor.id, "job created");
    Ok(job)
}

pub async fn get_job(conn: &(impl ConnectionTrait + Send + Sync), id: i64) -> Result<Job, AppError> {
    jobs::find_job_by_id(conn, id)
        .await?
        .ok_or_else(job_not_found)
}

pub async fn list_jobs(conn: &(impl ConnectionTrait + Send + Sync)) -> Result<Vec<Job>, AppError> {
    Ok(jobs::list_jobs(conn).await?)
}

/// Jobs owned by the given user.
pub async fn list_jobs_by_user(
    conn: &(impl ConnectionTrait + Send + Sync),
    user_id: i64,
) -> Result<Vec<Job>, AppError> {
    Ok(jobs::list_jobs_by_user(conn, user_id).await?)
}

/// Rewrite a job's fields. Owner or admin only; the ownership check runs
/// against the row as it exists inside this transaction.
pub async fn update_job(
    conn: &(impl ConnectionTrait + Send + Sync),
    actor: &CurrentUser,
    id: i64,
    fields: JobFields,
) -> Result<Job, AppError> {
    fields.validate()?;

    let existing = jobs::find_job_by_id(conn, id)
        .await?
        .ok_or_else(job_not_found)?;
    if !policy::can_mutate(actor.id, actor.is_admin, existing.user_id) {
        return Err(AppError::forbidden("cannot modify another user's job"));
    }

    jobs::update_job(
        conn,
        id,
        JobUpdate {
            title: fields.title,
            description: fields.description,
            location: fields.location,
            company: fields.company,
            salary: fields.salary,
        },
    )
    .await?
    .ok_or_else(job_not_found)
}

/// Delete a job. Owner or admin only, checked inside the same transaction as
/// the delete.
pub async fn delete_job(
    conn: &(impl ConnectionTrait + Send + Sync),
    actor: &CurrentUser,
    id: i64,
) -> Result<(), AppError> {
    let existing = jobs::find_job_by_id(conn, id)
        .await?
        .ok_or_else(job_not_found)?;
    if !policy::can_mutate(actor.id, actor.is_admin, existing.user_id) {
        return Err(AppError::forbidden("cannot modify another user's job"));
    }

    if !jobs::delete_job(conn, id).await? {
        return Err(job_not_found());
    }
    info!(job_id = id, by = actor.id, "job deleted");
    Ok(())
}
