use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use serde::{Deserialize, Serialize};

use crate::auth::claims::Claims;
use crate::error::AppError;

/// Authenticated identity for the current request.
///
/// Built from the verified claims the JwtExtract middleware stored in request
/// extensions; no database access happens here. Handlers that take this
/// parameter are authenticated by construction.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub is_admin: bool,
}

impl From<&Claims> for CurrentUser {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.uid,
            username: claims.sub.clone(),
            is_admin: claims.is_admin,
        }
    }
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = std::future::Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let user = req
            .extensions()
            .get::<Claims>()
            .map(CurrentUser::from)
            .ok_or_else(AppError::unauthorized_missing_bearer);
        std::future::ready(user)
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[actix_web::test]
    async fn missing_claims_yields_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let result = CurrentUser::from_request(&req, &mut Payload::None).await;
        assert!(result.is_err());
    }

    #[actix_web::test]
    async fn claims_in_extensions_become_current_user() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(Claims {
            sub: "alice".to_string(),
            uid: 7,
            is_admin: true,
            iat: 0,
            exp: i64::MAX,
        });

        let user = CurrentUser::from_request(&req, &mut Payload::None)
            .await
            .unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.username, "alice");
        assert!(user.is_admin);
    }
}
