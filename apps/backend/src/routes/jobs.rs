//! Job listing routes. The full listing is readable without a token; the
//! rest of the scope sits behind JwtExtract.

use actix_web::{guard, web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::extractors::validated_json::ValidatedJson;
use crate::repos::jobs::Job;
use crate::services::jobs::{self as jobs_service, JobFields};
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct JobResponse {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub location: String,
    pub company: String,
    pub salary: String,
    pub user_id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
}

impl From<Job> for JobResponse {
    fn from(job: Job) -> Self {
        Self {
            id: job.id,
            title: job.title,
            description: job.description,
            location: job.location,
            company: job.company,
            salary: job.salary,
            user_id: job.user_id,
            created_at: job.created_at,
        }
    }
}

/// Writable job fields. Any owner field a client sends is simply absent from
/// this shape; ownership always comes from the authenticated actor.
#[derive(Debug, Deserialize)]
pub struct JobRequest {
    pub title: String,
    pub description: String,
    pub location: String,
    pub company: String,
    pub salary: String,
}

impl From<JobRequest> for JobFields {
    fn from(req: JobRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            location: req.location,
            company: req.company,
            salary: req.salary,
        }
    }
}

/// POST /v1/jobs
async fn create_job(
    http_req: HttpRequest,
    current_user: CurrentUser,
    req: ValidatedJson<JobRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let fields = JobFields::from(req.into_inner());

    let job = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { jobs_service::create_job(txn, &current_user, fields).await })
    })
    .await?;

    Ok(HttpResponse::Created().json(JobResponse::from(job)))
}

/// GET /v1/jobs — open to anyone, no token required.
async fn list_jobs(
    http_req: HttpRequest,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let jobs = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { jobs_service::list_jobs(txn).await })
    })
    .await?;

    let body: Vec<JobResponse> = jobs.into_iter().map(JobResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /v1/jobs/mine — jobs owned by the authenticated user.
async fn list_my_jobs(
    http_req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let jobs = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { jobs_service::list_jobs_by_user(txn, current_user.id).await })
    })
    .await?;

    let body: Vec<JobResponse> = jobs.into_iter().map(JobResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /v1/jobs/{id}
async fn get_job(
    http_req: HttpRequest,
    path: web::Path<i64>,
    _current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let job = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { jobs_service::get_job(txn, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(JobResponse::from(job)))
}

/// PUT /v1/jobs/{id}
async fn update_job(
    http_req: HttpRequest,
    path: web::Path<i64>,
    current_user: CurrentUser,
    req: ValidatedJson<JobRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let fields = JobFields::from(req.into_inner());

    let job = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { jobs_service::update_job(txn, &current_user, id, fields).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(JobResponse::from(job)))
}

/// DELETE /v1/jobs/{id}
async fn delete_job(
    http_req: HttpRequest,
    path: web::Path<i64>,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { jobs_service::delete_job(txn, &current_user, id).await })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// The public listing. Registered as a guarded resource ahead of the
/// authenticated scope, so a POST to the same path falls through to it.
pub fn configure_public_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/v1/jobs").guard(guard::Get()).to(list_jobs));
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::post().to(create_job))
        .route("/mine", web::get().to(list_my_jobs))
        .route("/{id}", web::get().to(get_job))
        .route("/{id}", web::put().to(update_job))
        .route("/{id}", web::delete().to(delete_job));
}
