//! Account management routes. All of them sit behind JwtExtract.

use actix_multipart::Multipart;
use actix_web::{web, HttpRequest, HttpResponse, Result};
use bytes::BytesMut;
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};

use crate::config::uploads::UPLOAD_FIELD_NAME;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::extractors::current_user::CurrentUser;
use crate::extractors::validated_json::ValidatedJson;
use crate::repos::users::User;
use crate::services::users as users_service;
use crate::state::app_state::AppState;
use crate::utils::files;

/// Public view of a user row. The password hash never appears here.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub profile_picture: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            is_admin: user.is_admin,
            profile_picture: user.profile_picture,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub username: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// GET /v1/users — admin only.
async fn list_users(
    http_req: HttpRequest,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let users = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { users_service::list_users(txn, &current_user).await })
    })
    .await?;

    let body: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /v1/users/{id}
async fn get_user(
    http_req: HttpRequest,
    path: web::Path<i64>,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let user = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { users_service::view_user(txn, &current_user, id).await })
    })
    .await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// PUT /v1/users/{id}
async fn update_profile(
    http_req: HttpRequest,
    path: web::Path<i64>,
    current_user: CurrentUser,
    req: ValidatedJson<UpdateProfileRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = req.into_inner();

    let user = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            users_service::update_profile(txn, &current_user, id, &body.username, &body.email)
                .await
        })
    })
    .await?;

    Ok(HttpResponse::Ok().json(UserResponse::from(user)))
}

/// PUT /v1/users/{id}/password
async fn change_password(
    http_req: HttpRequest,
    path: web::Path<i64>,
    current_user: CurrentUser,
    req: ValidatedJson<ChangePasswordRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let body = req.into_inner();

    with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            users_service::change_password(
                txn,
                &current_user,
                id,
                &body.current_password,
                &body.new_password,
            )
            .await
        })
    })
    .await?;

    Ok(HttpResponse::NoContent().finish())
}

/// POST /v1/users/{id}/picture
///
/// Accepts a multipart form with a single `profile_picture` file field.
/// The file is stored as `{user_id}-{original_name}` under the upload
/// directory; re-uploading under the same name overwrites in place.
async fn upload_picture(
    http_req: HttpRequest,
    path: web::Path<i64>,
    current_user: CurrentUser,
    mut payload: Multipart,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let (filename, bytes) = read_picture_field(&mut payload, app_state.uploads.max_bytes).await?;
    let stored = files::picture_filename(id, &filename);

    // Record the reference first; if authorization or the row lookup fails
    // nothing has been written to disk yet.
    let stored_for_txn = stored.clone();
    let previous = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move {
            users_service::set_profile_picture(txn, &current_user, id, &stored_for_txn).await
        })
    })
    .await?;

    files::save_bytes(&app_state.uploads.path_for(&stored), &bytes).await?;
    if let Some(old) = previous {
        files::remove_if_exists(&app_state.uploads.path_for(&old)).await;
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({ "profile_picture": stored })))
}

/// DELETE /v1/users/{id} — admin only, never self.
async fn delete_user(
    http_req: HttpRequest,
    path: web::Path<i64>,
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let picture = with_txn(Some(&http_req), &app_state, |txn| {
        Box::pin(async move { users_service::delete_user(txn, &current_user, id).await })
    })
    .await?;

    // Row is gone; file removal is best-effort cleanup.
    if let Some(filename) = picture {
        files::remove_if_exists(&app_state.uploads.path_for(&filename)).await;
    }

    Ok(HttpResponse::NoContent().finish())
}

/// Pull the picture file out of the multipart payload, enforcing the size cap.
async fn read_picture_field(
    payload: &mut Multipart,
    max_bytes: usize,
) -> Result<(String, BytesMut), AppError> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::bad_request(format!("invalid multipart payload: {e}")))?
    {
        if field.name() != Some(UPLOAD_FIELD_NAME) {
            continue;
        }

        let filename = field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
            .map(str::to_string)
            .ok_or_else(|| AppError::bad_request("uploaded file must have a filename"))?;

        let mut bytes = BytesMut::new();
        while let Some(chunk) = field
            .try_next()
            .await
            .map_err(|e| AppError::bad_request(format!("failed to read upload: {e}")))?
        {
            if bytes.len() + chunk.len() > max_bytes {
                return Err(AppError::bad_request(format!(
                    "uploaded file exceeds the {max_bytes}-byte limit"
                )));
            }
            bytes.extend_from_slice(&chunk);
        }

        return Ok((filename, bytes));
    }

    Err(AppError::bad_request(format!(
        "multipart field '{UPLOAD_FIELD_NAME}' is required"
    )))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(list_users))
        .route("/{id}", web::get().to(get_user))
        .route("/{id}", web::put().to(update_profile))
        .route("/{id}", web::delete().to(delete_user))
        .route("/{id}/password", web::put().to(change_password))
        .route("/{id}/picture", web::post().to(upload_picture));
}
