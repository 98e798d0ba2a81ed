//! Identity claims carried by backend-issued access tokens.
//!
//! A verified copy is inserted into request extensions by the `JwtExtract`
//! middleware and read back by the `CurrentUser` extractor; nothing else
//! should reach into extensions for identity.

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Username at issuance time
    pub sub: String,
    /// User id
    pub uid: i64,
    /// Admin flag at issuance time
    pub is_admin: bool,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
