//! Public authentication routes: register, login, forgot-password.

use actix_web::{web, HttpRequest, HttpResponse, Result};
use serde::{Deserialize, Serialize};

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::validated_json::ValidatedJson;
use crate::routes::users::UserResponse;
use crate::services::auth;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

#[derive(Debug, Deserialize)]
pub struct ForgotPasswordRequest {
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct ForgotPasswordResponse {
    pub new_password: String,
}

/// POST /v1/auth/register
async fn register(
    http_req: HttpRequest,
    req: ValidatedJson<RegisterRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = req.into_inner();

    let user = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            auth::register(txn, &body.username, &body.email, &body.password).await
        })
    })
    .await?;

    Ok(HttpResponse::Created().json(UserResponse::from(user)))
}

/// POST /v1/auth/login
async fn login(
    http_req: HttpRequest,
    req: ValidatedJson<LoginRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = req.into_inner();
    let security = app_state.security.clone();

    let (token, user) = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { auth::login(txn, &security, &body.username, &body.password).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(LoginResponse {
        token,
        user: UserResponse::from(user),
    }))
}

/// POST /v1/auth/forgot-password
///
/// Returns the replacement password in the response body; delivery to the
/// user happens out of band.
async fn forgot_password(
    http_req: HttpRequest,
    req: ValidatedJson<ForgotPasswordRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = req.into_inner();

    let new_password = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { auth::forgot_password(txn, &body.username).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(ForgotPasswordResponse { new_password }))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/v1/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/forgot-password", web::post().to(forgot_password)),
    );
}
