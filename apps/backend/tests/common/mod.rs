//! Shared helpers for integration tests.

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use serde_json::{json, Value};
use tempfile::TempDir;

use backend::auth::password::hash_password;
use backend::adapters::users_sea::UserCreate;
use backend::config::db::DbProfile;
use backend::config::uploads::UploadConfig;
use backend::infra::state::build_state;
use backend::repos::users;
use backend::routes;
use backend::state::app_state::AppState;
use backend::state::security_config::SecurityConfig;

pub const TEST_JWT_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

/// Build an AppState backed by a freshly migrated in-memory database.
/// The returned TempDir owns the upload directory; keep it alive for the
/// duration of the test.
pub async fn test_state() -> (AppState, TempDir) {
    backend::test_bootstrap::logging::init();

    let uploads_dir = TempDir::new().expect("create temp upload dir");
    let state = build_state()
        .with_db(DbProfile::Test)
        .with_security(SecurityConfig::new(TEST_JWT_SECRET))
        .with_uploads(UploadConfig::new(uploads_dir.path()))
        .build()
        .await
        .expect("build test state");

    (state, uploads_dir)
}

/// Initialize the full application service against the given state.
pub async fn test_app(
    state: AppState,
) -> impl Service<
    Request,
    Response = ServiceResponse<impl MessageBody<Error = impl std::fmt::Debug>>,
    Error = Error,
> {
    test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure)
            // Render service-level errors like the live HTTP dispatcher does,
            // so `call_service` sees the error status instead of panicking.
            .wrap_fn(|req, srv| {
                let fut = srv.call(req);
                async move {
                    match fut.await {
                        Ok(res) => Ok(res.map_into_boxed_body()),
                        Err(err) => {
                            // The original request was consumed by the inner
                            // service; a stand-in request carries the rendered
                            // error response, which is all the tests inspect.
                            let (http_req, _) = test::TestRequest::default().to_http_parts();
                            let res = err.error_response().map_into_boxed_body();
                            Ok(ServiceResponse::new(http_req, res))
                        }
                    }
                }
            }),
    )
    .await
}

/// Register a user through the API and return the response body.
pub async fn register_user<S, B>(app: &S, username: &str, email: &str, password: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let req = test::TestRequest::post()
        .uri("/v1/auth/register")
        .set_json(json!({
            "username": username,
            "email": email,
            "password": password,
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 201, "register should succeed");
    test::read_body_json(resp).await
}

/// Log in through the API and return the bearer token.
pub async fn login_user<S, B>(app: &S, username: &str, password: &str) -> String
where
    S: Service<Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
    B::Error: std::fmt::Debug,
{
    let req = test::TestRequest::post()
        .uri("/v1/auth/login")
        .set_json(json!({ "username": username, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert_eq!(resp.status().as_u16(), 200, "login should succeed");
    let body: Value = test::read_body_json(resp).await;
    body["token"].as_str().expect("token in body").to_string()
}

/// Insert an admin account directly through the repository layer.
/// Registration never yields an admin, so tests seed one this way.
pub async fn seed_admin(state: &AppState, username: &str, email: &str, password: &str) -> i64 {
    let db = state.db().expect("test state has a db");
    let hash = hash_password(password).expect("hash password");
    let admin = users::create_user(
        db,
        UserCreate::new(username, email, hash).with_admin(true),
    )
    .await
    .expect("insert admin");
    admin.id
}

/// Bearer header tuple for an authenticated request.
pub fn bearer(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Bearer {token}"))
}
