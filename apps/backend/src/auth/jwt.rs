use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::Claims;
use crate::state::security_config::SecurityConfig;
use crate::AppError;

/// Mint a signed access token for the given identity.
///
/// Claims are self-contained: user id and admin flag travel with the token,
/// so no server-side session state exists. Expiry is the only termination
/// mechanism; compromise requires rotating the secret.
pub fn mint_access_token(
    username: &str,
    user_id: i64,
    is_admin: bool,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("failed to get current time"))?
        .as_secs() as i64;

    let exp = iat + security.token_ttl.as_secs() as i64;

    let claims = Claims {
        sub: username.to_string(),
        uid: user_id,
        is_admin,
        iat,
        exp,
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("failed to encode JWT: {e}")))
}

/// Verify a token and return its claims unchanged from issuance.
///
/// Expired, bad-signature and structurally malformed tokens all fail with a
/// 401-class error; the default `Validation` already checks `exp`.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    let validation = Validation::new(security.algorithm);

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })
}

#[cfg(test)]
mod tests {
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::{mint_access_token, verify_access_token};
    use crate::state::security_config::SecurityConfig;
    use crate::AppError;

    #[test]
    fn test_mint_and_verify_roundtrip() {
        let security = SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes());

        let now = SystemTime::now();
        let token = mint_access_token("alice", 7, false, now, &security).unwrap();
        let claims = verify_access_token(&token, &security).unwrap();

        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.uid, 7);
        assert!(!claims.is_admin);
        assert_eq!(
            claims.iat,
            now.duration_since(UNIX_EPOCH).unwrap().as_secs() as i64
        );
        assert_eq!(
            claims.exp,
            claims.iat + security.token_ttl.as_secs() as i64
        );
    }

    #[test]
    fn test_admin_flag_survives_roundtrip() {
        let security = SecurityConfig::default();
        let token = mint_access_token("root", 1, true, SystemTime::now(), &security).unwrap();
        let claims = verify_access_token(&token, &security).unwrap();
        assert!(claims.is_admin);
    }

    #[test]
    fn test_expired_token() {
        let security = SecurityConfig::new("test_secret_key_for_testing_purposes_only".as_bytes())
            .with_token_ttl(Duration::from_secs(60));

        // Minted two minutes ago with a one-minute TTL.
        let now = SystemTime::now() - Duration::from_secs(2 * 60);
        let token = mint_access_token("alice", 7, false, now, &security).unwrap();

        match verify_access_token(&token, &security) {
            Err(AppError::UnauthorizedExpiredJwt) => {}
            other => panic!("expected expired-token error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_signature() {
        let security_a = SecurityConfig::new("secret-A".as_bytes());
        let token = mint_access_token("alice", 7, false, SystemTime::now(), &security_a).unwrap();

        let security_b = SecurityConfig::new("secret-B".as_bytes());
        match verify_access_token(&token, &security_b) {
            Err(AppError::UnauthorizedInvalidJwt) => {}
            other => panic!("expected invalid-token error, got {other:?}"),
        }
    }

    #[test]
    fn test_malformed_token() {
        let security = SecurityConfig::default();
        match verify_access_token("not-a-jwt", &security) {
            Err(AppError::UnauthorizedInvalidJwt) => {}
            other => panic!("expected invalid-token error, got {other:?}"),
        }
    }
}
