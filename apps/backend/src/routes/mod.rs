use actix_web::web;

use crate::middleware::JwtExtract;

pub mod auth;
pub mod health;
pub mod jobs;
pub mod users;

/// Wire up every route. Authentication routes and the job listing are
/// public; everything else runs behind JwtExtract so handlers always see
/// verified claims.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure_routes)
        .configure(auth::configure_routes)
        .configure(jobs::configure_public_routes)
        .service(
            web::scope("/v1/users")
                .wrap(JwtExtract)
                .configure(users::configure_routes),
        )
        .service(
            web::scope("/v1/jobs")
                .wrap(JwtExtract)
                .configure(jobs::configure_routes),
        );
}
